use std::path::{Path, PathBuf};

use crate::environment::Environment;

pub const DEFAULT_PROMPT: &str = "myshell> ";
pub const DEFAULT_PAGER: &str = "more";
const HELP_FILE_NAME: &str = "help.txt";

/// Settings read from the environment once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub pager: String,
    pub help_file: Option<PathBuf>,
    /// Suppresses diagnostics that are informational only.
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_owned(),
            pager: DEFAULT_PAGER.to_owned(),
            help_file: None,
            quiet: false,
        }
    }
}

impl Config {
    pub fn from_env(env: &Environment) -> Self {
        let defaults = Self::default();
        Self {
            prompt: env
                .get("MYSHELL_PROMPT")
                .map(str::to_owned)
                .unwrap_or(defaults.prompt),
            pager: env
                .get("PAGER")
                .filter(|pager| !pager.trim().is_empty())
                .map(str::to_owned)
                .unwrap_or(defaults.pager),
            help_file: env
                .get("MYSHELL_HELP")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            quiet: env.get("MYSHELL_QUIET").map_or(false, is_truthy),
        }
    }

    /// The help resource to page: the configured file if any, otherwise the
    /// first `help.txt` found in the working directory, the user data
    /// directory, or beside the executable.
    pub fn help_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.help_file {
            return Some(path.clone());
        }

        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let candidates = [
            Some(PathBuf::from(HELP_FILE_NAME)),
            dirs::data_dir().map(|dir| dir.join("myshell").join(HELP_FILE_NAME)),
            exe_dir.map(|dir| dir.join(HELP_FILE_NAME)),
        ];
        candidates.into_iter().flatten().find(|path| path.is_file())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
