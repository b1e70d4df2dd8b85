use std::io::{self, Write};

use parser::Command;

use super::Unit;
use crate::target::{Platform, TargetProfile};

// x29/x30 and the cursor share one 32-byte frame, keeping sp 16-byte aligned
pub(super) fn prologue(out: &mut impl Write, profile: &TargetProfile) -> io::Result<()> {
    let cursor = profile.cursor_register;
    let array = profile.symbol("ARRAY");

    writeln!(out, "\t.p2align 2")?;
    writeln!(out, "{}:", profile.symbol("main"))?;
    writeln!(out, "\tstp x29, x30, [sp, #-32]!")?;
    writeln!(out, "\tmov x29, sp")?;
    writeln!(out, "\tstr {cursor}, [sp, #16]")?;

    match profile.platform {
        Platform::Apple => {
            writeln!(out, "\tadrp {cursor}, {array}@PAGE")?;
            writeln!(out, "\tadd {cursor}, {cursor}, {array}@PAGEOFF")
        }
        Platform::Elf => {
            writeln!(out, "\tadrp {cursor}, {array}")?;
            writeln!(out, "\tadd {cursor}, {cursor}, :lo12:{array}")
        }
    }
}

pub(super) fn unit(out: &mut impl Write, profile: &TargetProfile, unit: Unit) -> io::Result<()> {
    let cursor = profile.cursor_register;

    match unit {
        Unit::Run(run) => {
            let n = run.count;

            match run.command {
                Command::MoveRight => writeln!(out, "\tadd {cursor}, {cursor}, #{n}"),
                Command::MoveLeft => writeln!(out, "\tsub {cursor}, {cursor}, #{n}"),
                Command::Increment | Command::Decrement => {
                    let op = if run.command == Command::Increment {
                        "add"
                    } else {
                        "sub"
                    };

                    // strb keeps the low byte, which is the modulo 256 wrap
                    writeln!(out, "\tldrb w0, [{cursor}]")?;
                    writeln!(out, "\t{op} w0, w0, #{n}")?;
                    writeln!(out, "\tstrb w0, [{cursor}]")
                }
                _ => Ok(()),
            }
        }
        Unit::Output => {
            writeln!(out, "\tldrb w0, [{cursor}]")?;
            writeln!(out, "\tbl {}", profile.symbol("putchar"))
        }
        Unit::Input => {
            writeln!(out, "\tbl {}", profile.symbol("getchar"))?;
            writeln!(out, "\tstrb w0, [{cursor}]")
        }
        Unit::LoopStart(label) => {
            writeln!(out, "{label}_start:")?;
            writeln!(out, "\tldrb w0, [{cursor}]")?;
            // b.cond/cbz only reach +-1MiB, so branch over an unconditional b
            writeln!(out, "\tcbnz w0, {label}_body")?;
            writeln!(out, "\tb {label}_end")?;
            writeln!(out, "{label}_body:")
        }
        Unit::LoopEnd(label) => {
            writeln!(out, "\tb {label}_start")?;
            writeln!(out, "{label}_end:")
        }
    }
}

pub(super) fn epilogue(out: &mut impl Write, profile: &TargetProfile) -> io::Result<()> {
    writeln!(out, "\tldr {}, [sp, #16]", profile.cursor_register)?;
    writeln!(out, "\tldp x29, x30, [sp], #32")?;
    writeln!(out, "\tmov w0, #0")?;
    writeln!(out, "\tret")
}
