use crate::eval::Flow;
use crate::parser::{self, CommandLine};
use crate::shell::{read_line, Shell};

use std::io::{self, BufRead, Write};
use tracing::debug;

/// Where the loop takes its lines from.
pub enum Source<R> {
    /// The shell's console, with a prompt before every line.
    Interactive,
    /// A batch file. Blank lines and `#` comments are skipped.
    Batch(R),
}

#[derive(Debug)]
enum State {
    Prompting,
    AwaitingLine,
    Dispatching(CommandLine),
    Terminated,
}

pub fn run_interactive(shell: &mut Shell) -> io::Result<()> {
    run(shell, Source::<io::Empty>::Interactive)
}

pub fn run_batch<R: BufRead>(shell: &mut Shell, reader: R) -> io::Result<()> {
    run(shell, Source::Batch(reader))
}

/// Read and dispatch lines until end of input or `quit`. Only I/O errors on
/// the source itself end the loop early.
pub fn run<R: BufRead>(shell: &mut Shell, mut source: Source<R>) -> io::Result<()> {
    let mut state = ready_state(&source);
    loop {
        state = match state {
            State::Prompting => {
                write!(shell.out, "{}", shell.config.prompt)?;
                shell.out.flush()?;
                State::AwaitingLine
            }
            State::AwaitingLine => match next_line(shell, &mut source)? {
                None => State::Terminated,
                Some(line) => match accept(&source, &line) {
                    Some(cmd) => State::Dispatching(cmd),
                    None => ready_state(&source),
                },
            },
            State::Dispatching(cmd) => match shell.execute(&cmd) {
                Flow::Continue => ready_state(&source),
                Flow::Quit => State::Terminated,
            },
            State::Terminated => {
                debug!("input loop terminated");
                return Ok(());
            }
        };
    }
}

fn ready_state<R>(source: &Source<R>) -> State {
    match source {
        Source::Interactive => State::Prompting,
        Source::Batch(_) => State::AwaitingLine,
    }
}

fn next_line<R: BufRead>(shell: &mut Shell, source: &mut Source<R>) -> io::Result<Option<String>> {
    match source {
        Source::Interactive => shell.read_console_line(),
        Source::Batch(reader) => read_line(reader),
    }
}

fn accept<R>(source: &Source<R>, line: &str) -> Option<CommandLine> {
    if let Source::Batch(_) = source {
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
    }

    match parser::parse(line) {
        Ok(cmd) => Some(cmd),
        Err(parser::ParseError::Empty) => None,
        Err(parser::ParseError::Fatal(err)) => {
            debug!("parse error: {}", err);
            None
        }
    }
}
