use crate::error::ShellError;
use crate::eval::Flow;
use crate::shell::Shell;

mod cd;
mod clr;
mod dir;
mod echo;
mod environ;
mod help;
mod pause;
mod quit;

pub trait BuiltinCommand {
    fn run(&self, ctx: &mut BuiltinCommandContext) -> Result<Flow, ShellError>;
}

pub struct BuiltinCommandContext<'a> {
    /// Arguments after the command name.
    pub argv: &'a [String],
    pub shell: &'a mut Shell,
}

pub fn builtin_command(name: &str) -> Option<Box<dyn BuiltinCommand>> {
    match name {
        "cd" => Some(Box::new(cd::Cd)),
        "clr" => Some(Box::new(clr::Clr)),
        "dir" => Some(Box::new(dir::Dir)),
        "environ" => Some(Box::new(environ::Environ)),
        "echo" => Some(Box::new(echo::Echo)),
        "help" => Some(Box::new(help::Help)),
        "pause" => Some(Box::new(pause::Pause)),
        "quit" => Some(Box::new(quit::Quit)),
        _ => None,
    }
}

/// Map a write failure on the shell's own output to a reportable error.
fn output_error(command: &str) -> impl FnOnce(std::io::Error) -> ShellError + '_ {
    move |err| ShellError::resource(format!("{}: write error", command), err)
}
