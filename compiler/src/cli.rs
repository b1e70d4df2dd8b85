use std::path::PathBuf;

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Compiles brainfuck into assembly.")]
pub struct Cli {
    #[arg(help = "Path to file with source code")]
    pub source: Option<PathBuf>,
    #[arg(short, long, default_value = "out.s", help = "Path to output file")]
    pub output: PathBuf,
    #[arg(
        short,
        long,
        help = "Target to compile for (e.g. aarch64-apple-darwin), defaults to the host"
    )]
    pub target: Option<String>,
}
