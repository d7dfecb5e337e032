use super::{output_error, BuiltinCommand, BuiltinCommandContext};
use crate::environment::PWD_VAR;
use crate::error::ShellError;
use crate::eval::Flow;

use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct Cd;

impl BuiltinCommand for Cd {
    fn run(&self, ctx: &mut BuiltinCommandContext) -> Result<Flow, ShellError> {
        let path = match ctx.argv.first() {
            Some(path) => path,
            None => {
                let cwd = ctx
                    .shell
                    .env
                    .get(PWD_VAR)
                    .ok_or_else(|| ShellError::UserInput("cd: PWD is not set".to_owned()))?
                    .to_owned();
                writeln!(ctx.shell.out, "Current directory: {}", cwd)
                    .map_err(output_error("cd"))?;
                return Ok(Flow::Continue);
            }
        };

        std::env::set_current_dir(path)
            .map_err(|err| ShellError::resource(format!("cd: {}", path), err))?;

        // Track the resolved directory, not the argument, so that relative
        // paths keep PWD pointing at the real location.
        let cwd = tracked_directory(ctx.shell.env.get(PWD_VAR), path, std::env::current_dir());
        debug!("cd: {}", cwd.display());
        ctx.shell.env.set(PWD_VAR, cwd.to_string_lossy());
        Ok(Flow::Continue)
    }
}

/// The new value of `PWD` once the process has moved to `path`. When the
/// new directory cannot be read back, it is derived from the previous one.
fn tracked_directory(
    previous: Option<&str>,
    path: &str,
    current: std::io::Result<PathBuf>,
) -> PathBuf {
    match current {
        Ok(cwd) => cwd,
        Err(err) => {
            warn!("cd: cannot read working directory: {}", err);
            match previous {
                Some(previous) => Path::new(previous).join(path),
                None => PathBuf::from(path),
            }
        }
    }
}
