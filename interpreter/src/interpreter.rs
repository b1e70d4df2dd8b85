use std::io::{self, BufWriter, Read, Write};

use parser::{Instruction, Parser, UnbalancedBrackets};

/// Default number of cells, the same as the compiled AArch64 backing array.
pub const MEMORY_SIZE: usize = 65_536;

#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    #[error(transparent)]
    Parse(#[from] UnbalancedBrackets),
    #[error("pointer moved to cell {0}, outside of memory")]
    PointerOutOfBounds(isize),
    #[error("failed to read from stdin")]
    Read(#[source] io::Error),
    #[error("failed to write to stdout")]
    Write(#[source] io::Error),
}

/// Direct interpreter over an owned, explicitly sized memory buffer.
///
/// Cells wrap modulo 256. Moving the pointer outside the buffer is a
/// deterministic error rather than wrapping around.
#[derive(Debug, Clone)]
pub struct Interpreter {
    memory: Vec<u8>,
    memptr: usize,
    instructions: Vec<Instruction>,
    instptr: usize,
}

impl Interpreter {
    /// A `memory_size` of zero is treated as one cell.
    pub fn new(instructions: Vec<Instruction>, memory_size: usize) -> Self {
        Self {
            memory: vec![0u8; memory_size.max(1)],
            memptr: 0,
            instructions,
            instptr: 0,
        }
    }

    pub fn from_source(source: &[u8], memory_size: usize) -> Result<Self, InterpreterError> {
        let instructions = Parser::new(source).parse()?;

        Ok(Self::new(instructions, memory_size))
    }

    /// Runs against the process' standard input and output.
    pub fn run(mut self) -> Result<(), InterpreterError> {
        let stdin = io::stdin().lock();
        let stdout = BufWriter::new(io::stdout().lock());

        self.run_with(stdin, stdout)
    }

    /// Runs until the last instruction. End of input stores 255 in the
    /// current cell, like C's `getchar` returning `EOF`.
    pub fn run_with<R: Read, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> Result<(), InterpreterError> {
        while let Some(&instruction) = self.instructions.get(self.instptr) {
            use Instruction::*;

            match instruction {
                Add(n) => self.memory[self.memptr] = self.memory[self.memptr].wrapping_add(n),
                Move(n) => {
                    let to = self.memptr as isize + n;

                    if to < 0 || to as usize >= self.memory.len() {
                        return Err(InterpreterError::PointerOutOfBounds(to));
                    }

                    self.memptr = to as usize;
                }
                In => {
                    output.flush().map_err(InterpreterError::Write)?;

                    self.memory[self.memptr] = match input.by_ref().bytes().next() {
                        Some(byte) => byte.map_err(InterpreterError::Read)?,
                        None => u8::MAX,
                    };
                }
                Out => output
                    .write_all(&[self.memory[self.memptr]])
                    .map_err(InterpreterError::Write)?,
                JumpIfZero(to) if self.memory[self.memptr] == 0 => {
                    self.instptr = to;
                }
                JumpIfNotZero(to) if self.memory[self.memptr] != 0 => {
                    self.instptr = to;
                }
                _ => {}
            }

            self.instptr += 1;
        }

        output.flush().map_err(InterpreterError::Write)?;

        log::debug!("halted with pointer at cell {}", self.memptr);

        Ok(())
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub const fn pointer(&self) -> usize {
        self.memptr
    }
}
