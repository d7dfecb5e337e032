use std::collections::BTreeMap;
use std::ffi::CString;

/// Path of the running interpreter, written once at startup.
pub const SHELL_VAR: &str = "shell";
/// Working directory as tracked by `cd`.
pub const PWD_VAR: &str = "PWD";
/// Set in every child to the value of [`SHELL_VAR`].
pub const PARENT_VAR: &str = "parent";
pub const PATH_VAR: &str = "PATH";

/// The variables handed down to child processes. Owned by the shell rather
/// than read from the process globals so that tests can run isolated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_process() -> Self {
        let mut env = Self::new();
        for (key, value) in std::env::vars_os() {
            // Entries that are not valid UTF-8 are kept as lossy text.
            env.set(key.to_string_lossy(), value.to_string_lossy());
        }
        env
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `KEY=VALUE` strings for `execve`, with `parent` pointing at this
    /// interpreter. Entries containing a NUL byte cannot be passed and are
    /// skipped.
    pub fn child_envp(&self) -> Vec<CString> {
        let parent = self.get(SHELL_VAR);
        self.iter()
            .filter(|(key, _)| *key != PARENT_VAR)
            .chain(parent.map(|shell| (PARENT_VAR, shell)))
            .filter_map(|(key, value)| CString::new(format!("{}={}", key, value)).ok())
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (key, value) in iter {
            env.set(key, value);
        }
        env
    }
}
