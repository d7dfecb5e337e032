use super::{BuiltinCommand, BuiltinCommandContext};
use crate::config::DEFAULT_PAGER;
use crate::error::ShellError;
use crate::eval::{run_external_command, Flow};
use crate::parser::words;

use std::io;

pub struct Help;

impl BuiltinCommand for Help {
    fn run(&self, ctx: &mut BuiltinCommandContext) -> Result<Flow, ShellError> {
        let path = ctx.shell.config.help_path().ok_or_else(|| {
            ShellError::resource(
                "help",
                io::Error::new(io::ErrorKind::NotFound, "help file not found"),
            )
        })?;
        if !path.is_file() {
            return Err(ShellError::resource(
                format!("help: {}", path.display()),
                io::Error::new(io::ErrorKind::NotFound, "No such file"),
            ));
        }

        // The pager runs like any external command; failures to start it
        // are already reported there.
        let mut argv = pager_argv(&ctx.shell.config.pager);
        argv.push(path.to_string_lossy().into_owned());
        run_external_command(ctx.shell, &argv);
        Ok(Flow::Continue)
    }
}

/// Split a pager setting such as `less -R` into program and arguments.
fn pager_argv(pager: &str) -> Vec<String> {
    let argv: Vec<String> = match words(pager) {
        Ok(words) => words.map(str::to_owned).collect(),
        Err(_) => Vec::new(),
    };
    if argv.is_empty() {
        vec![DEFAULT_PAGER.to_owned()]
    } else {
        argv
    }
}
