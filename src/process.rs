use std::ffi::CString;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::os::raw::c_char;
use std::os::unix::ffi::OsStrExt;
use std::ptr;

use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::libc;
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, pipe2, ForkResult, Pid};
use tracing::debug;

use crate::environment::Environment;
use crate::error::ProcessError;
use crate::path::resolve_command;

/// Exit status used by a child whose `execve` failed.
const EXEC_FAILED_STATUS: i32 = 127;

/// Interpreter for executables that have no `#!` line.
const FALLBACK_SHELL: &str = "/bin/sh";

/// Terminal state of one external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionResult {
    Exited(i32),
    Signaled(Signal),
    /// The program could not be found or executed.
    LaunchFailed(Errno),
    /// `fork` itself failed.
    SpawnFailed(Errno),
    WaitFailed(Errno),
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        matches!(self, ExecutionResult::Exited(0))
    }

    /// The failure to report, if the command never ran to a terminal state.
    pub fn error(&self) -> Option<ProcessError> {
        match *self {
            ExecutionResult::LaunchFailed(Errno::ENOENT) => Some(ProcessError::NotFound),
            ExecutionResult::LaunchFailed(errno) => Some(ProcessError::Launch(errno)),
            ExecutionResult::SpawnFailed(errno) => Some(ProcessError::Spawn(errno)),
            ExecutionResult::WaitFailed(errno) => Some(ProcessError::Wait(errno)),
            ExecutionResult::Exited(_) | ExecutionResult::Signaled(_) => None,
        }
    }
}

/// Everything the child needs, built before `fork`, down to the
/// null-terminated pointer arrays, so that the child never allocates.
///
/// The pointers refer to the heap buffers of the `CString`s kept alongside
/// them, which do not move when the image itself is moved.
struct ExecImage {
    path: CString,
    shell: CString,
    _strings: Vec<CString>,
    argv: Vec<*const c_char>,
    envp: Vec<*const c_char>,
    /// `sh <path> <args...>`, tried when the kernel rejects the file format.
    script_argv: Vec<*const c_char>,
}

impl ExecImage {
    fn new(env: &Environment, argv: &[String]) -> Result<Self, Errno> {
        let name = argv.first().ok_or(Errno::EINVAL)?;
        let path = resolve_command(env, name).ok_or(Errno::ENOENT)?;
        let path = CString::new(path.as_os_str().as_bytes()).map_err(|_| Errno::EINVAL)?;
        let shell = CString::new(FALLBACK_SHELL).map_err(|_| Errno::EINVAL)?;
        let args = argv
            .iter()
            .map(|arg| CString::new(arg.as_bytes()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Errno::EINVAL)?;
        let vars = env.child_envp();

        let argv = null_terminated(&args);
        let envp = null_terminated(&vars);
        let script_argv = null_terminated([&shell, &path].into_iter().chain(args.iter().skip(1)));

        let mut strings = args;
        strings.extend(vars);
        Ok(Self {
            path,
            shell,
            _strings: strings,
            argv,
            envp,
            script_argv,
        })
    }
}

fn null_terminated<'a>(strings: impl IntoIterator<Item = &'a CString>) -> Vec<*const c_char> {
    strings
        .into_iter()
        .map(|s| s.as_ptr())
        .chain(Some(ptr::null()))
        .collect()
}

/// Run `argv` as an external program and block until it terminates.
///
/// `argv[0]` is looked up in the `PATH` of `env`, and the child receives the
/// entries of `env` as its environment with `parent` set to the interpreter's
/// own path. An executable file the kernel cannot load is run as a script by
/// `/bin/sh`. Whether the program could be executed at all is reported back
/// through a close-on-exec pipe: it stays empty on a successful `execve` and
/// carries the errno otherwise.
pub fn launch(env: &Environment, argv: &[String]) -> ExecutionResult {
    let image = match ExecImage::new(env, argv) {
        Ok(image) => image,
        Err(errno) => {
            debug!(?argv, %errno, "not launching");
            return ExecutionResult::LaunchFailed(errno);
        }
    };

    let (status_out, status_in) = match pipe2(OFlag::O_CLOEXEC) {
        Ok((read_end, write_end)) => (File::from(read_end), File::from(write_end)),
        Err(errno) => return ExecutionResult::SpawnFailed(errno),
    };

    // SAFETY: between fork and exec the child only drops a file descriptor
    // and calls execve, write and _exit on memory prepared beforehand.
    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            drop(status_out);
            exec_child(&image, status_in)
        }
        Ok(ForkResult::Parent { child }) => {
            drop(status_in);
            debug!(pid = %child, ?argv, "spawned");
            let exec_error = read_exec_error(status_out);
            let result = wait_for_child(child);
            match exec_error {
                Some(errno) => ExecutionResult::LaunchFailed(errno),
                None => result,
            }
        }
        Err(errno) => ExecutionResult::SpawnFailed(errno),
    }
}

fn exec_child(image: &ExecImage, mut status_in: File) -> ! {
    // SAFETY: all pointer arrays are null-terminated and point into strings
    // owned by `image`, which outlives both calls.
    unsafe {
        libc::execve(image.path.as_ptr(), image.argv.as_ptr(), image.envp.as_ptr());
    }
    let errno = Errno::last();
    if errno == Errno::ENOEXEC {
        unsafe {
            libc::execve(
                image.shell.as_ptr(),
                image.script_argv.as_ptr(),
                image.envp.as_ptr(),
            );
        }
    }

    let _ = status_in.write_all(&(errno as i32).to_ne_bytes());
    // SAFETY: _exit is async-signal-safe.
    unsafe { libc::_exit(EXEC_FAILED_STATUS) }
}

fn read_exec_error(mut status_out: File) -> Option<Errno> {
    let mut buf = [0u8; 4];
    let mut filled = 0;
    while filled < buf.len() {
        match status_out.read(&mut buf[filled..]) {
            // Closed by a successful execve.
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }

    if filled == buf.len() {
        Some(Errno::from_raw(i32::from_ne_bytes(buf)))
    } else {
        None
    }
}

fn wait_for_child(pid: Pid) -> ExecutionResult {
    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => {
                debug!(%pid, code, "exited");
                return ExecutionResult::Exited(code);
            }
            Ok(WaitStatus::Signaled(_, signal, _)) => {
                debug!(%pid, ?signal, "killed");
                return ExecutionResult::Signaled(signal);
            }
            Ok(status) => {
                debug!(%pid, ?status, "still running");
            }
            Err(Errno::EINTR) => (),
            Err(errno) => return ExecutionResult::WaitFailed(errno),
        }
    }
}
