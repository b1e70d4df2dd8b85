use std::io::{self, Write};

use parser::{Label, Run};

use crate::target::{Arch, Platform, TargetProfile};

mod aarch64;
mod x86_64;

/// One piece of the program the emitter knows how to lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Run(Run),
    Output,
    Input,
    /// Start marker, zero test jumping to the end marker, body marker.
    LoopStart(Label),
    /// Jump back to the start marker, end marker.
    LoopEnd(Label),
}

/// Writes assembly text for the profile's architecture, one unit at a time.
#[derive(Debug)]
pub struct Emitter<'p, W: Write> {
    profile: &'p TargetProfile,
    out: W,
}

impl<'p, W: Write> Emitter<'p, W> {
    pub fn new(profile: &'p TargetProfile, out: W) -> Self {
        Self { profile, out }
    }

    /// Backing array in the data section, `main` symbol, frame setup and
    /// cursor initialisation.
    pub fn prologue(&mut self) -> io::Result<()> {
        let array = self.profile.symbol("ARRAY");
        let main = self.profile.symbol("main");

        writeln!(self.out, "\t{}", self.data_section())?;
        writeln!(self.out, "{array}:")?;
        writeln!(self.out, "\t.zero {}", self.profile.memory_size)?;
        writeln!(self.out, "\t.text")?;
        writeln!(self.out, "\t.globl {main}")?;

        match self.profile.arch {
            Arch::Aarch64 => aarch64::prologue(&mut self.out, self.profile),
            Arch::X86_64 => x86_64::prologue(&mut self.out, self.profile),
        }
    }

    pub fn emit(&mut self, unit: Unit) -> io::Result<()> {
        if let Unit::Run(run) = unit {
            debug_assert!(run.command.is_mutation());
            debug_assert!(run.count >= 1 && run.count <= self.profile.immediate_max);
        }

        match self.profile.arch {
            Arch::Aarch64 => aarch64::unit(&mut self.out, self.profile, unit),
            Arch::X86_64 => x86_64::unit(&mut self.out, self.profile, unit),
        }
    }

    /// Restores the cursor register and returns 0 from `main`.
    pub fn epilogue(&mut self) -> io::Result<()> {
        match self.profile.arch {
            Arch::Aarch64 => aarch64::epilogue(&mut self.out, self.profile)?,
            Arch::X86_64 => x86_64::epilogue(&mut self.out, self.profile)?,
        }

        if self.profile.platform == Platform::Elf {
            writeln!(self.out, "\t.section .note.GNU-stack,\"\",%progbits")?;
        }

        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn data_section(&self) -> &'static str {
        // zero-filled, so ELF targets keep it out of the file image
        match self.profile.platform {
            Platform::Apple => ".data",
            Platform::Elf => ".bss",
        }
    }
}
