use std::sync::LazyLock;

use clap::Parser as _;
use cli::Cli;
use color_eyre::{eyre::Context as _, Result};
use interpreter::Interpreter;

mod cli;

pub static ARGS: LazyLock<Cli> = LazyLock::new(Cli::parse);

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let source = match ARGS.source {
        Some(ref source) => std::fs::read(source)
            .wrap_err_with(|| format!("failed to read {}", source.display()))?,
        None => {
            use std::io::{stdin, Read};

            println!("! Live mode. Press ^D to finish.");

            let mut source = Vec::new();
            stdin()
                .read_to_end(&mut source)
                .wrap_err("failed to read from stdin")?;

            source
        }
    };

    let interpreter =
        Interpreter::from_source(&source, ARGS.memory).wrap_err("failed to parse")?;
    interpreter.run().wrap_err("failed to interpret")?;

    Ok(())
}
