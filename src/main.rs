use std::ffi::OsString;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::bail;
use tracing::info;
use tracing_subscriber::{self, fmt, prelude::*, EnvFilter};

use config::Config;
use environment::Environment;
use error::ShellError;
use shell::Shell;

mod builtins;
mod config;
mod environment;
mod error;
mod eval;
mod input;
mod parser;
mod path;
mod process;
mod shell;
#[cfg(test)]
mod test_utils;

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        eprintln!("myshell: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let batch_file = match args.as_slice() {
        [] => None,
        [path] => Some(PathBuf::from(path)),
        _ => bail!("usage: myshell [batchfile]"),
    };

    let env = Environment::from_process();
    let config = Config::from_env(&env);
    let mut shell = Shell::new(env, config);
    shell.init_environment();

    match batch_file {
        Some(path) => {
            let file = File::open(&path).map_err(|source| ShellError::Startup {
                path: path.clone(),
                source,
            })?;
            info!("batch mode: {}", path.display());
            input::run_batch(&mut shell, BufReader::new(file))?;
        }
        None => {
            info!("interactive mode");
            input::run_interactive(&mut shell)?;
        }
    }

    Ok(())
}
