use colored::Colorize;

pub struct Theme {
    pub error_symbol: String,
    pub error_style: Box<dyn Fn(String) -> String>,
    pub warning_style: Box<dyn Fn(String) -> String>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            error_symbol: "✗".red().to_string(),
            error_style: Box::new(|s| s.bright_red().to_string()),
            warning_style: Box::new(|s| s.yellow().to_string()),
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formats a message the shell itself reports on stderr.
    pub fn error(&self, message: impl Into<String>) -> String {
        format!("{} {}", self.error_symbol, (self.error_style)(message.into()))
    }

    pub fn warning(&self, message: impl Into<String>) -> String {
        (self.warning_style)(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_keeps_message_text() {
        colored::control::set_override(false);
        let theme = Theme::new();
        assert_eq!(theme.error("cannot cd into /nope"), "✗ cannot cd into /nope");
        assert_eq!(theme.warning("bye"), "bye");
    }
}
