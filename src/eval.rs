use crate::builtins::{builtin_command, BuiltinCommandContext};
use crate::error::ShellError;
use crate::parser::CommandLine;
use crate::process::{launch, ExecutionResult};
use crate::shell::Shell;

use tracing::debug;

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Which handler a command was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Builtin(Flow),
    External(ExecutionResult),
}

impl Outcome {
    pub fn flow(&self) -> Flow {
        match self {
            Outcome::Builtin(flow) => *flow,
            Outcome::External(_) => Flow::Continue,
        }
    }
}

pub fn dispatch(shell: &mut Shell, cmd: &CommandLine) -> Outcome {
    match builtin_command(cmd.name()) {
        Some(builtin) => {
            debug!("internal command: {}", cmd.name());
            let mut ctx = BuiltinCommandContext {
                argv: cmd.args(),
                shell: &mut *shell,
            };
            let flow = match builtin.run(&mut ctx) {
                Ok(flow) => flow,
                Err(err) => {
                    shell.report(&err);
                    Flow::Continue
                }
            };
            Outcome::Builtin(flow)
        }
        None => {
            debug!("external command: {}", cmd.name());
            Outcome::External(run_external_command(shell, cmd.argv()))
        }
    }
}

/// Launch `argv` and tell the user how it ended. Never fails the loop.
pub fn run_external_command(shell: &mut Shell, argv: &[String]) -> ExecutionResult {
    // The child writes straight to the inherited descriptors.
    shell.flush();
    let result = launch(&shell.env, argv);

    let program = argv.first().map(String::as_str).unwrap_or_default();
    if let Some(err) = result.error() {
        shell.report(&ShellError::process(program, err));
        return result;
    }

    match result {
        ExecutionResult::Exited(code) => {
            shell.notice(&format!("{}: exited with code {}", program, code));
        }
        ExecutionResult::Signaled(signal) => {
            shell.notice(&format!(
                "{}: terminated by signal {} ({})",
                program, signal as i32, signal
            ));
        }
        _ => (),
    }

    result
}
