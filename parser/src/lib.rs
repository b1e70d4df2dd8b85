pub use error::UnbalancedBrackets;
pub use instruction::Instruction;
pub use matcher::{Label, LoopFrame, LoopMatcher};
pub use scanner::{Command, Run, Scanner, Token};

mod error;
mod instruction;
mod matcher;
mod scanner;

/// Builds a flat instruction list with resolved jump targets, used by the
/// interpreter. Unlike the compiler's scan, any bracket error is fatal here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    instructions: Vec<Instruction>,
    matcher: LoopMatcher,
    jump_stack: Vec<usize>,
}

impl<'a> Parser<'a> {
    pub fn new(contents: &'a [u8]) -> Self {
        Self {
            scanner: Scanner::unbounded(contents),
            instructions: Vec::new(),
            matcher: LoopMatcher::new(),
            jump_stack: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Result<Vec<Instruction>, UnbalancedBrackets> {
        while let Some(token) = self.scanner.next() {
            let instruction = match token {
                Token::Run(run) => Self::lower_run(run),
                Token::Output => Instruction::Out,
                Token::Input => Instruction::In,
                Token::LoopStart { position } => {
                    self.matcher.open(position);
                    self.jump_stack.push(self.instructions.len());

                    Instruction::JumpIfZero(0)
                }
                Token::LoopEnd { position } => {
                    self.matcher.close(position)?;
                    // the matcher and the jump stack move in lockstep
                    let idx = self.jump_stack.pop().unwrap_or_default();

                    self.instructions[idx] = Instruction::JumpIfZero(self.instructions.len());

                    Instruction::JumpIfNotZero(idx)
                }
            };

            match instruction {
                Instruction::Add(0) | Instruction::Move(0) => {}
                _ => self.instructions.push(instruction),
            }
        }

        if let Some(err) = self.matcher.finish().into_iter().next() {
            return Err(err);
        }

        Ok(self.instructions)
    }

    fn lower_run(run: Run) -> Instruction {
        // only the low byte matters for cells
        let low = (run.count % 256) as u8;

        match run.command {
            Command::Increment => Instruction::Add(low),
            Command::Decrement => Instruction::Add(low.wrapping_neg()),
            Command::MoveRight => Instruction::Move(run.count as isize),
            Command::MoveLeft => Instruction::Move(-(run.count as isize)),
            Command::Output | Command::Input | Command::LoopStart | Command::LoopEnd => {
                unreachable!("scanner only folds mutation commands")
            }
        }
    }
}
