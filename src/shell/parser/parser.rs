use log::{debug, warn};

use super::ast::CommandNode;
use super::split::{split, split_last};
use crate::shell::error::{BuiltinError, ParseError};
use crate::shell::state::ShellState;
use crate::utils::config::{DEFAULT_MAX_ARGUMENTS, DEFAULT_MAX_COMMANDS};

/// Builds command trees by operator precedence.
///
/// Operators are tried in the fixed order `;`, `>`, `|`, `<`: the first one
/// present anywhere in the text decides the node, and `>`, `|` and `<` split on
/// their last occurrence so the left side recurses. `cd` is carried out here,
/// against the borrowed [`ShellState`], as soon as its node is built.
pub struct Parser<'a> {
    state: &'a mut ShellState,
    max_arguments: usize,
    max_commands: usize,
    diagnostics: Vec<BuiltinError>,
}

impl<'a> Parser<'a> {
    pub fn new(state: &'a mut ShellState) -> Self {
        Parser {
            state,
            max_arguments: DEFAULT_MAX_ARGUMENTS,
            max_commands: DEFAULT_MAX_COMMANDS,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_limits(mut self, max_arguments: usize, max_commands: usize) -> Self {
        self.max_arguments = max_arguments;
        self.max_commands = max_commands;
        self
    }

    /// Built-in failures met while building, oldest first.
    #[cfg(test)]
    pub fn diagnostics(&self) -> &[BuiltinError] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<BuiltinError> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn build(&mut self, input: &str) -> Result<CommandNode, ParseError> {
        if input.contains(';') {
            self.build_sequence(input)
        } else if input.contains('>') {
            self.build_redirect(input, '>')
        } else if input.contains('|') {
            self.build_pipe(input)
        } else if input.contains('<') {
            self.build_redirect(input, '<')
        } else {
            self.build_simple(input)
        }
    }

    fn build_sequence(&mut self, input: &str) -> Result<CommandNode, ParseError> {
        let pieces: Vec<&str> = split(input, ';', false)
            .into_iter()
            .filter(|piece| !is_blank(piece))
            .collect();
        if pieces.is_empty() {
            return Err(ParseError::EmptyCommand);
        }
        if pieces.len() > self.max_commands {
            return Err(ParseError::TooManyCommands {
                count: pieces.len(),
                limit: self.max_commands,
            });
        }

        let members = pieces
            .into_iter()
            .map(|piece| self.build(piece))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CommandNode::sequence(members))
    }

    fn build_redirect(&mut self, input: &str, operator: char) -> Result<CommandNode, ParseError> {
        let (left, right) = split_last(input, operator)?;
        if is_blank(left) {
            return Err(ParseError::MissingCommand(operator));
        }

        let target = split(right, ' ', false);
        let file = match target.first() {
            Some(file) => file.to_string(),
            None => return Err(ParseError::MissingTarget(operator)),
        };
        if target.len() > 1 {
            warn!("ignoring {:?} after '{} {}'", &target[1..], operator, file);
        }

        let inner = self.build(left)?;
        Ok(match operator {
            '>' => CommandNode::output_redirect(file, inner),
            _ => CommandNode::input_redirect(file, inner),
        })
    }

    fn build_pipe(&mut self, input: &str) -> Result<CommandNode, ParseError> {
        let (left, right) = split_last(input, '|')?;
        if is_blank(left) || is_blank(right) {
            return Err(ParseError::MissingCommand('|'));
        }

        let left = self.build(left)?;
        let right = self.build(right)?;
        Ok(CommandNode::pipe(left, right))
    }

    fn build_simple(&mut self, input: &str) -> Result<CommandNode, ParseError> {
        let arguments = split(input, ' ', false);
        if arguments.is_empty() {
            return Err(ParseError::EmptyCommand);
        }
        if arguments.len() > self.max_arguments {
            return Err(ParseError::TooManyArguments {
                count: arguments.len(),
                limit: self.max_arguments,
            });
        }

        if arguments[0] == "cd" {
            match self.state.change_directory(arguments.get(1).copied()) {
                Ok(dir) => debug!("cd: now in {}", dir.display()),
                Err(e) => {
                    warn!("{}", e);
                    self.diagnostics.push(e);
                }
            }
        }

        Ok(CommandNode::simple(arguments))
    }
}

fn is_blank(input: &str) -> bool {
    input.chars().all(|c| c == ' ')
}
