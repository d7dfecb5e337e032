use super::{BuiltinCommand, BuiltinCommandContext};
use crate::error::ShellError;
use crate::eval::Flow;

use tracing::info;

pub struct Quit;

impl BuiltinCommand for Quit {
    fn run(&self, _: &mut BuiltinCommandContext) -> Result<Flow, ShellError> {
        info!("quit requested");
        Ok(Flow::Quit)
    }
}
