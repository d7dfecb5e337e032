use std::io;
use std::path::PathBuf;

use nix::errno::Errno;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    /// A missing or malformed argument.
    #[error("{0}")]
    UserInput(String),
    /// A file or directory that could not be opened.
    #[error("{context}: {source}")]
    Resource { context: String, source: io::Error },
    #[error("{program}: {error}")]
    Process { program: String, error: ProcessError },
    /// Only raised before the input loop starts; the caller exits on it.
    #[error("unable to open batch file {}", .path.display())]
    Startup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ShellError {
    pub fn resource(context: impl Into<String>, source: io::Error) -> Self {
        ShellError::Resource {
            context: context.into(),
            source,
        }
    }

    pub fn process(program: impl Into<String>, error: ProcessError) -> Self {
        ShellError::Process {
            program: program.into(),
            error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("command not found")]
    NotFound,
    #[error("cannot execute: {}", .0.desc())]
    Launch(Errno),
    #[error("unable to create process: {}", .0.desc())]
    Spawn(Errno),
    #[error("unable to wait for process: {}", .0.desc())]
    Wait(Errno),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_thing() {
        let err = ShellError::process("frobnicate", ProcessError::NotFound);
        assert_eq!(err.to_string(), "frobnicate: command not found");

        let err = ShellError::resource(
            "dir: /nope",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        assert_eq!(err.to_string(), "dir: /nope: No such file or directory");

        let err = ShellError::process("./x", ProcessError::Launch(Errno::EACCES));
        assert_eq!(err.to_string(), "./x: cannot execute: Permission denied");
    }

    #[test]
    fn startup_error_keeps_its_cause() {
        let err = ShellError::Startup {
            path: PathBuf::from("cmds.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "unable to open batch file cmds.txt");
        assert_eq!(std::error::Error::source(&err).unwrap().to_string(), "gone");
    }
}
