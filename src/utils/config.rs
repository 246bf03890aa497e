use dotenv::dotenv;
use rustyline::EditMode;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PROMPT: &str = ">>>";
pub const DEFAULT_MAX_ARGUMENTS: usize = 32;
pub const DEFAULT_MAX_COMMANDS: usize = 12;

#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub prompt: String,
    pub config_dir: PathBuf,
    pub history_file: PathBuf,
    pub editor_mode: String,
    pub logger_level: String,
    pub logger_dir: PathBuf,
    pub log_to_stderr: bool,
    pub max_arguments: usize,
    pub max_commands: usize,
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = Self::get_config_dir();
        Config {
            name: String::from(env!("CARGO_PKG_NAME")),
            prompt: String::from(DEFAULT_PROMPT),
            history_file: config_dir.join(".forksh_history"),
            logger_dir: config_dir.join("logs"),
            config_dir,
            editor_mode: String::from("emacs"),
            logger_level: String::from("info"),
            log_to_stderr: false,
            max_arguments: DEFAULT_MAX_ARGUMENTS,
            max_commands: DEFAULT_MAX_COMMANDS,
        }
    }
}

impl Config {
    fn get_config_dir() -> PathBuf {
        if let Ok(home) = env::var("HOME") {
            PathBuf::from(home).join(".config/forksh")
        } else {
            env::temp_dir().join("forksh")
        }
    }

    pub fn new() -> Self {
        // dotenv values never override variables already in the environment
        if cfg!(debug_assertions) {
            dotenv::from_filename(".env.development").ok();
        } else {
            dotenv().ok();
        }

        let mut config = Config::default();
        config.apply_env(|key| env::var(key).ok());
        config
    }

    /// Overlays `FORKSH_*` variables on top of the current values.
    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prompt) = lookup("FORKSH_PROMPT") {
            self.prompt = prompt;
        }

        if let Some(editor) = lookup("FORKSH_EDITOR") {
            self.editor_mode = editor;
        }

        if let Some(history) = lookup("FORKSH_HISTORY") {
            self.history_file = PathBuf::from(history);
        }

        if let Some(level) = lookup("FORKSH_LOG_LEVEL") {
            self.logger_level = level;
        }

        if let Some(dir) = lookup("FORKSH_LOG_DIR") {
            self.logger_dir = PathBuf::from(dir);
        }

        if let Some(flag) = lookup("FORKSH_LOG_STDERR") {
            self.log_to_stderr = matches!(flag.trim(), "1" | "true" | "yes");
        }

        if let Some(limit) = lookup("FORKSH_MAX_ARGS").and_then(|v| parse_limit(&v)) {
            self.max_arguments = limit;
        }

        if let Some(limit) = lookup("FORKSH_MAX_COMMANDS").and_then(|v| parse_limit(&v)) {
            self.max_commands = limit;
        }
    }

    pub fn get_edit_mode(&self) -> EditMode {
        match self.editor_mode.to_lowercase().as_str() {
            "vi" => EditMode::Vi,
            _ => EditMode::Emacs,
        }
    }
}

fn parse_limit(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|limit| *limit > 0)
}
