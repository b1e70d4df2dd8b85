use std::io::{self, Write};

use parser::{LoopMatcher, Scanner, Token, UnbalancedBrackets};

use crate::{
    codegen::{Emitter, Unit},
    target::TargetProfile,
};

/// Outcome of a translation. Output produced alongside a report with
/// diagnostics is not a valid program and must not be assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Report {
    pub diagnostics: Vec<UnbalancedBrackets>,
    /// Number of loop labels allocated.
    pub labels: u32,
    /// Number of coalesced runs emitted.
    pub runs: usize,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Compiler {
    profile: TargetProfile,
}

impl Compiler {
    pub fn new(profile: TargetProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &TargetProfile {
        &self.profile
    }

    /// Translates `source` in a single forward scan, writing assembly to `out`
    /// as it goes.
    ///
    /// Unmatched brackets don't stop the scan: a stray `]` emits nothing and a
    /// dangling `[` gets no closing code. Both end up in
    /// [`Report::diagnostics`].
    pub fn compile<W: Write>(&self, source: &[u8], out: W) -> io::Result<Report> {
        let mut emitter = Emitter::new(&self.profile, out);
        let mut matcher = LoopMatcher::new();
        let mut report = Report::default();

        log::debug!(
            "compiling {} bytes for {} (cursor {}, immediate max {})",
            source.len(),
            self.profile.arch,
            self.profile.cursor_register,
            self.profile.immediate_max,
        );

        emitter.prologue()?;

        for token in Scanner::new(source, self.profile.immediate_max) {
            let unit = match token {
                Token::Run(run) => {
                    report.runs += 1;

                    Unit::Run(run)
                }
                Token::Output => Unit::Output,
                Token::Input => Unit::Input,
                Token::LoopStart { position } => Unit::LoopStart(matcher.open(position)),
                Token::LoopEnd { position } => match matcher.close(position) {
                    Ok(label) => Unit::LoopEnd(label),
                    Err(err) => {
                        log::error!("unmatched brackets: {err}");
                        report.diagnostics.push(err);

                        continue;
                    }
                },
            };

            log::trace!("{unit:?}");
            emitter.emit(unit)?;
        }

        report.labels = matcher.allocated();

        for err in matcher.finish() {
            log::error!("unmatched brackets: {err}");
            report.diagnostics.push(err);
        }

        emitter.epilogue()?;

        log::debug!(
            "emitted {} runs and {} loops, {} diagnostics",
            report.runs,
            report.labels,
            report.diagnostics.len(),
        );

        Ok(report)
    }
}
