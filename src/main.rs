use std::{ffi::OsString, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use sliceobytes::{usage, Literal};

/// Prints a file as a `[]byte{...}` literal for embedding in source code
#[derive(Parser, Debug)]
#[command(name = "sliceobytes", version)]
struct Opts {
    /// File to encode. Keep it small, a few kilobytes at most.
    #[arg(allow_hyphen_values = true)]
    filename: Option<PathBuf>,

    /// Anything after the filename is ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    _rest: Vec<OsString>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .init();

    let opts = Opts::parse();

    let Some(filename) = opts.filename else {
        let program = std::env::args_os()
            .next()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sliceobytes".to_owned());
        print!("{}", usage(&program));
        return Ok(());
    };

    log::debug!("encoding {}", filename.display());

    Literal::open(&filename)?
        .dump()
        .with_context(|| format!("could not encode {}", filename.display()))?;

    Ok(())
}
