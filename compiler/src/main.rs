use std::sync::LazyLock;

use clap::Parser as _;
use cli::Cli;
use color_eyre::{
    eyre::{bail, Context as _},
    Result,
};
use compiler::{Compiler, TargetProfile};

mod cli;

pub static ARGS: LazyLock<Cli> = LazyLock::new(Cli::parse);

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Some(ref src) = ARGS.source else {
        bail!("source file is not specified");
    };
    let contents = std::fs::read(src)
        .wrap_err_with(|| format!("failed to read {}", src.display()))?;

    let profile = match ARGS.target {
        Some(ref triple) => TargetProfile::from_triple(triple)?,
        None => TargetProfile::host()?,
    };

    let compiler = Compiler::new(profile);
    let mut assembly = Vec::new();
    let report = compiler
        .compile(&contents, &mut assembly)
        .wrap_err("failed to compile")?;

    if !report.is_clean() {
        bail!(
            "{} unmatched bracket(s), not writing {}",
            report.diagnostics.len(),
            ARGS.output.display()
        );
    }

    std::fs::write(&ARGS.output, assembly)
        .wrap_err_with(|| format!("failed to write {}", ARGS.output.display()))?;

    Ok(())
}
