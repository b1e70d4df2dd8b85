use std::io::{self, Write};

use parser::Command;

use super::Unit;
use crate::target::TargetProfile;

// AT&T syntax; rbp push plus 16 bytes for the saved cursor keeps calls aligned
pub(super) fn prologue(out: &mut impl Write, profile: &TargetProfile) -> io::Result<()> {
    let cursor = profile.cursor_register;

    writeln!(out, "{}:", profile.symbol("main"))?;
    writeln!(out, "\tpushq %rbp")?;
    writeln!(out, "\tmovq %rsp, %rbp")?;
    writeln!(out, "\tsubq $16, %rsp")?;
    writeln!(out, "\tmovq %{cursor}, -8(%rbp)")?;
    writeln!(out, "\tleaq {}(%rip), %{cursor}", profile.symbol("ARRAY"))
}

pub(super) fn unit(out: &mut impl Write, profile: &TargetProfile, unit: Unit) -> io::Result<()> {
    let cursor = profile.cursor_register;

    match unit {
        Unit::Run(run) => {
            let n = run.count;

            match run.command {
                Command::MoveRight => writeln!(out, "\taddq ${n}, %{cursor}"),
                Command::MoveLeft => writeln!(out, "\tsubq ${n}, %{cursor}"),
                Command::Increment | Command::Decrement => {
                    let op = if run.command == Command::Increment {
                        "addl"
                    } else {
                        "subl"
                    };

                    writeln!(out, "\tmovzbl (%{cursor}), %eax")?;
                    writeln!(out, "\t{op} ${n}, %eax")?;
                    writeln!(out, "\tmovb %al, (%{cursor})")
                }
                _ => Ok(()),
            }
        }
        Unit::Output => {
            writeln!(out, "\tmovzbl (%{cursor}), %edi")?;
            writeln!(out, "\tcall {}", profile.symbol("putchar"))
        }
        Unit::Input => {
            writeln!(out, "\tcall {}", profile.symbol("getchar"))?;
            writeln!(out, "\tmovb %al, (%{cursor})")
        }
        Unit::LoopStart(label) => {
            writeln!(out, "{label}_start:")?;
            writeln!(out, "\tmovzbl (%{cursor}), %edi")?;
            writeln!(out, "\ttestb %dil, %dil")?;
            writeln!(out, "\tje {label}_end")?;
            writeln!(out, "{label}_body:")
        }
        Unit::LoopEnd(label) => {
            writeln!(out, "\tjmp {label}_start")?;
            writeln!(out, "{label}_end:")
        }
    }
}

pub(super) fn epilogue(out: &mut impl Write, profile: &TargetProfile) -> io::Result<()> {
    writeln!(out, "\tmovq -8(%rbp), %{}", profile.cursor_register)?;
    writeln!(out, "\tmovl $0, %eax")?;
    writeln!(out, "\tleave")?;
    writeln!(out, "\tret")
}
