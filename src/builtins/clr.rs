use super::{BuiltinCommand, BuiltinCommandContext};
use crate::error::ShellError;
use crate::eval::Flow;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

pub struct Clr;

impl BuiltinCommand for Clr {
    fn run(&self, ctx: &mut BuiltinCommandContext) -> Result<Flow, ShellError> {
        execute!(ctx.shell.out, Clear(ClearType::All), MoveTo(0, 0))
            .map_err(|err| ShellError::resource("clr", err))?;
        Ok(Flow::Continue)
    }
}
