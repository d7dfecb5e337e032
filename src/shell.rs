use crate::config::Config;
use crate::environment::{Environment, PWD_VAR, SHELL_VAR};
use crate::error::ShellError;
use crate::eval::{dispatch, Flow};
use crate::parser::CommandLine;

use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

pub struct Shell {
    pub env: Environment,
    pub config: Config,
    /// Standard input. `pause` always reads from here, and so does the
    /// interactive loop.
    console: Box<dyn BufRead>,
    pub out: Box<dyn Write>,
    pub err: Box<dyn Write>,
}

impl Shell {
    pub fn new(env: Environment, config: Config) -> Self {
        Self::with_io(
            env,
            config,
            Box::new(io::stdin().lock()),
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    pub fn with_io(
        env: Environment,
        config: Config,
        console: Box<dyn BufRead>,
        out: Box<dyn Write>,
        err: Box<dyn Write>,
    ) -> Self {
        Self {
            env,
            config,
            console,
            out,
            err,
        }
    }

    /// Record where this interpreter lives and where it currently is. Run
    /// once before the first command.
    pub fn init_environment(&mut self) {
        match std::env::current_exe().and_then(|exe| exe.canonicalize()) {
            Ok(path) => self.env.set(SHELL_VAR, path.to_string_lossy()),
            Err(err) => warn!("unable to resolve the shell path: {}", err),
        }

        match std::env::current_dir() {
            Ok(cwd) => self.env.set(PWD_VAR, cwd.to_string_lossy()),
            Err(err) => warn!("unable to read the working directory: {}", err),
        }
    }

    /// Read one line from the console without its terminator. `None` at end
    /// of input.
    pub fn read_console_line(&mut self) -> io::Result<Option<String>> {
        read_line(&mut *self.console)
    }

    /// Dispatch one command and flush whatever it printed.
    pub fn execute(&mut self, cmd: &CommandLine) -> Flow {
        let flow = dispatch(self, cmd).flow();
        self.flush();
        flow
    }

    pub fn report(&mut self, err: &ShellError) {
        debug!(?err, "reporting");
        let _ = writeln!(self.err, "myshell: {}", err);
    }

    /// Like [`Shell::report`] but for messages that quiet mode suppresses.
    pub fn notice(&mut self, message: &str) {
        if !self.config.quiet {
            let _ = writeln!(self.err, "myshell: {}", message);
        }
    }

    pub fn flush(&mut self) {
        let _ = self.out.flush();
        let _ = self.err.flush();
    }
}

/// `read_line` that tolerates invalid UTF-8 and strips `\n` / `\r\n`.
pub fn read_line(reader: &mut dyn BufRead) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestShell;

    #[test]
    fn read_line_strips_terminators() {
        let mut input: &[u8] = b"one\r\ntwo\nthree";
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("one"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("two"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("three"));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn read_line_survives_invalid_utf8() {
        let mut input: &[u8] = b"echo \xff\n";
        assert_eq!(
            read_line(&mut input).unwrap().as_deref(),
            Some("echo \u{fffd}")
        );
    }

    #[test]
    fn execute_flushes_and_reports_flow() {
        let mut t = TestShell::new("");
        let cmd = crate::parser::parse("echo flushed").unwrap();
        assert_eq!(t.shell.execute(&cmd), Flow::Continue);
        assert_eq!(t.stdout(), "flushed\n");
    }

    #[test]
    fn init_environment_sets_shell_and_pwd() {
        let _cwd = crate::test_utils::lock_cwd();
        let mut t = TestShell::new("");
        t.shell.init_environment();
        let shell_path = t.shell.env.get(SHELL_VAR).unwrap();
        assert!(std::path::Path::new(shell_path).is_absolute());
        assert_eq!(
            t.shell.env.get(PWD_VAR).map(std::path::PathBuf::from),
            Some(std::env::current_dir().unwrap())
        );
    }

    #[test]
    fn quiet_mode_hides_notices_only() {
        let mut t = TestShell::new("");
        t.shell.config.quiet = true;
        t.shell.notice("informational");
        t.shell.report(&ShellError::UserInput("cd: broken".into()));
        assert_eq!(t.stderr(), "myshell: cd: broken\n");
    }
}
