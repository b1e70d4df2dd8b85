pub use interpreter::{Interpreter, InterpreterError, MEMORY_SIZE};

mod interpreter;
