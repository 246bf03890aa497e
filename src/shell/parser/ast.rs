/// One parsed input line.
///
/// Every node owns its children, so a tree can be handed to a forked child as
/// is and dropped once the line is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandNode {
    /// `arguments[0]` is the program; never empty.
    Simple { arguments: Vec<String> },
    Pipe {
        left: Box<CommandNode>,
        right: Box<CommandNode>,
    },
    OutputRedirect {
        file: String,
        inner: Box<CommandNode>,
    },
    InputRedirect {
        file: String,
        inner: Box<CommandNode>,
    },
    Sequence { members: Vec<CommandNode> },
}

impl CommandNode {
    pub fn simple<I, S>(arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandNode::Simple {
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn pipe(left: CommandNode, right: CommandNode) -> Self {
        CommandNode::Pipe {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn output_redirect(file: impl Into<String>, inner: CommandNode) -> Self {
        CommandNode::OutputRedirect {
            file: file.into(),
            inner: Box::new(inner),
        }
    }

    pub fn input_redirect(file: impl Into<String>, inner: CommandNode) -> Self {
        CommandNode::InputRedirect {
            file: file.into(),
            inner: Box::new(inner),
        }
    }

    pub fn sequence(members: Vec<CommandNode>) -> Self {
        CommandNode::Sequence { members }
    }

    /// True for the `cd` built-in, which is carried out while parsing.
    pub fn is_builtin(&self) -> bool {
        matches!(self, CommandNode::Simple { arguments } if arguments.first().is_some_and(|a| a == "cd"))
    }
}
