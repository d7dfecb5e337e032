use super::{output_error, BuiltinCommand, BuiltinCommandContext};
use crate::error::ShellError;
use crate::eval::Flow;

use std::io::Write;

pub struct Echo;

impl BuiltinCommand for Echo {
    fn run(&self, ctx: &mut BuiltinCommandContext) -> Result<Flow, ShellError> {
        if ctx.argv.is_empty() {
            ctx.shell.notice("echo: no message provided");
            return Ok(Flow::Continue);
        }

        writeln!(ctx.shell.out, "{}", ctx.argv.join(" ")).map_err(output_error("echo"))?;
        Ok(Flow::Continue)
    }
}
