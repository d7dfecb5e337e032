use super::{output_error, BuiltinCommand, BuiltinCommandContext};
use crate::error::ShellError;
use crate::eval::Flow;

use std::io::Write;

pub struct Pause;

impl BuiltinCommand for Pause {
    fn run(&self, ctx: &mut BuiltinCommandContext) -> Result<Flow, ShellError> {
        writeln!(ctx.shell.out, "Press Enter to continue...").map_err(output_error("pause"))?;
        ctx.shell.flush();
        // Whatever was typed before Enter is discarded. End of input also
        // releases the pause.
        ctx.shell
            .read_console_line()
            .map_err(|err| ShellError::resource("pause", err))?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use crate::eval::Flow;
    use crate::test_utils::TestShell;

    #[test]
    fn pause_consumes_exactly_one_console_line() {
        let mut t = TestShell::new("ignored text\nnext\n");
        assert_eq!(t.run("pause"), Flow::Continue);
        assert_eq!(t.stdout(), "Press Enter to continue...\n");
        assert_eq!(
            t.shell.read_console_line().unwrap().as_deref(),
            Some("next")
        );
    }

    #[test]
    fn pause_returns_at_end_of_input() {
        let mut t = TestShell::new("");
        assert_eq!(t.run("pause"), Flow::Continue);
        assert_eq!(t.stderr(), "");
    }
}
