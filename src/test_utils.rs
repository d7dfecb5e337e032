//! Helpers for running a [`Shell`] against in-memory streams.

use std::cell::RefCell;
use std::io::{Cursor, Result as IoResult, Write};
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};

use crate::config::Config;
use crate::environment::{Environment, PATH_VAR};
use crate::eval::Flow;
use crate::parser::parse;
use crate::shell::Shell;

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Serialises tests that read or change the process working directory.
pub fn lock_cwd() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Memory-backed writer whose contents stay readable after it is boxed.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

pub struct TestShell {
    pub shell: Shell,
    out: SharedBuffer,
    err: SharedBuffer,
}

impl TestShell {
    /// A shell whose console yields `console`, with a minimal `PATH`.
    pub fn new(console: &str) -> Self {
        let env: Environment = [(PATH_VAR, "/usr/local/bin:/usr/bin:/bin")]
            .into_iter()
            .collect();
        Self::with_env(console, env)
    }

    pub fn with_env(console: &str, env: Environment) -> Self {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let shell = Shell::with_io(
            env,
            Config::default(),
            Box::new(Cursor::new(console.as_bytes().to_vec())),
            Box::new(out.clone()),
            Box::new(err.clone()),
        );
        Self { shell, out, err }
    }

    /// Tokenize and dispatch one line the way the input loop would.
    pub fn run(&mut self, line: &str) -> Flow {
        match parse(line) {
            Ok(cmd) => self.shell.execute(&cmd),
            Err(_) => Flow::Continue,
        }
    }

    pub fn stdout(&self) -> String {
        self.out.contents()
    }

    pub fn stderr(&self) -> String {
        self.err.contents()
    }
}
