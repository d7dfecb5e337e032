use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::environment::{Environment, PATH_VAR};

/// Resolve a command name the way `execvp` would, but against the `PATH` of
/// the given environment. Names containing a slash are taken as given.
pub fn resolve_command(env: &Environment, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    if name.contains('/') {
        return Some(PathBuf::from(name));
    }

    let search_paths = env.get(PATH_VAR)?;
    std::env::split_paths(search_paths)
        .map(|dir| {
            // An empty entry means the current directory.
            if dir.as_os_str().is_empty() {
                PathBuf::from(".").join(name)
            } else {
                dir.join(name)
            }
        })
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn env_with_path(path: &str) -> Environment {
        [(PATH_VAR, path)].into_iter().collect()
    }

    #[test]
    fn finds_sh_in_bin() {
        let found = resolve_command(&env_with_path("/nonexistent:/bin"), "sh").unwrap();
        assert_eq!(found, PathBuf::from("/bin/sh"));
    }

    #[test]
    fn unknown_command_is_none() {
        assert!(resolve_command(&env_with_path("/bin"), "no-such-command-here").is_none());
    }

    #[test]
    fn no_path_variable_is_none() {
        assert!(resolve_command(&Environment::new(), "sh").is_none());
    }

    #[test]
    fn slash_names_are_not_searched() {
        let found = resolve_command(&Environment::new(), "./build/run").unwrap();
        assert_eq!(found, PathBuf::from("./build/run"));
    }

    #[test]
    fn skips_files_without_exec_bit() {
        let plain = tempfile::tempdir().unwrap();
        let exec = tempfile::tempdir().unwrap();
        fs::write(plain.path().join("tool"), "data").unwrap();
        let script = exec.path().join("tool");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let path = format!("{}:{}", plain.path().display(), exec.path().display());
        assert_eq!(resolve_command(&env_with_path(&path), "tool"), Some(script));
    }
}
