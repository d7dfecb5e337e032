use super::{output_error, BuiltinCommand, BuiltinCommandContext};
use crate::error::ShellError;
use crate::eval::Flow;

use std::io::Write;

pub struct Environ;

impl BuiltinCommand for Environ {
    fn run(&self, ctx: &mut BuiltinCommandContext) -> Result<Flow, ShellError> {
        let shell = &mut *ctx.shell;
        for (key, value) in shell.env.iter() {
            writeln!(shell.out, "{}={}", key, value).map_err(output_error("environ"))?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use crate::environment::Environment;
    use crate::test_utils::TestShell;

    #[test]
    fn environ_prints_every_entry_in_order() {
        let env: Environment = [("ZED", "last"), ("ALPHA", "first"), ("MID", "a=b")]
            .into_iter()
            .collect();
        let mut t = TestShell::with_env("", env);
        t.run("environ");
        assert_eq!(t.stdout(), "ALPHA=first\nMID=a=b\nZED=last\n");
    }

    #[test]
    fn environ_reflects_cd_updates() {
        let mut t = TestShell::new("");
        t.shell.env.set("PWD", "/var/tmp");
        t.run("environ");
        assert!(t.stdout().lines().any(|line| line == "PWD=/var/tmp"));
    }
}
