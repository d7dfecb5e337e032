use super::{output_error, BuiltinCommand, BuiltinCommandContext};
use crate::error::ShellError;
use crate::eval::Flow;

use std::io::Write;

pub struct Dir;

impl BuiltinCommand for Dir {
    fn run(&self, ctx: &mut BuiltinCommandContext) -> Result<Flow, ShellError> {
        let path = ctx.argv.first().map(String::as_str).unwrap_or(".");
        let context = || format!("dir: {}", path);

        // read_dir leaves out the self and parent links; list them like readdir.
        let mut names = vec![".".to_owned(), "..".to_owned()];
        for entry in std::fs::read_dir(path).map_err(|err| ShellError::resource(context(), err))? {
            let entry = entry.map_err(|err| ShellError::resource(context(), err))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        writeln!(ctx.shell.out, "{}", names.join("  ")).map_err(output_error("dir"))?;
        Ok(Flow::Continue)
    }
}
