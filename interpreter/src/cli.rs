use std::path::PathBuf;

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Runs brainfuck using interpreter.")]
pub struct Cli {
    #[arg(help = "Path to file with source code")]
    pub source: Option<PathBuf>,
    #[arg(
        short,
        long,
        default_value_t = interpreter::MEMORY_SIZE,
        help = "Number of memory cells"
    )]
    pub memory: usize,
}
