use log::{debug, warn};

use super::process::{ChildId, ProcessOps, Stream, UnixProcess};
use super::status::ChildStatus;
use crate::shell::error::ShellError;
use crate::shell::parser::CommandNode;
use crate::shell::state::ShellState;

/// Status of a child whose program could not be started.
pub const EXEC_FAILURE_STATUS: i32 = 127;
/// Status of a branch aborted by a redirect, pipe or spawn failure.
pub const FAILURE_STATUS: i32 = 1;

pub struct Executor<P: ProcessOps = UnixProcess> {
    ops: P,
}

impl Executor<UnixProcess> {
    pub fn new() -> Self {
        Self::with_ops(UnixProcess::new())
    }
}

impl<P: ProcessOps> Executor<P> {
    pub fn with_ops(ops: P) -> Self {
        Self { ops }
    }

    #[cfg(test)]
    pub fn ops(&self) -> &P {
        &self.ops
    }

    /// Runs one line: forks a child, moves it into the shell's working
    /// directory, runs the tree there and waits for it.
    pub fn execute(&mut self, node: &CommandNode, state: &ShellState) -> Result<ChildStatus, ShellError> {
        let dir = state.working_directory();
        debug!("executing {:?} in {}", node, dir.display());

        let child = self.ops.spawn(|ops| {
            if let Err(e) = ops.change_dir(dir) {
                ops.report(&e);
                return FAILURE_STATUS;
            }
            run(ops, node)
        })?;
        self.ops.wait(child)
    }
}

impl Default for Executor<UnixProcess> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `node` in the current process and returns its exit status.
///
/// Redirects change this process's descriptors; pipes and sequence members
/// get children of their own.
pub fn run<P: ProcessOps>(ops: &mut P, node: &CommandNode) -> i32 {
    match node {
        CommandNode::Simple { arguments } => run_simple(ops, node, arguments),
        CommandNode::Pipe { left, right } => run_pipe(ops, left, right),
        CommandNode::OutputRedirect { file, inner } => run_redirect(ops, Stream::Stdout, file, inner),
        CommandNode::InputRedirect { file, inner } => run_redirect(ops, Stream::Stdin, file, inner),
        CommandNode::Sequence { members } => run_sequence(ops, members),
    }
}

fn run_simple<P: ProcessOps>(ops: &mut P, node: &CommandNode, arguments: &[String]) -> i32 {
    // `cd` already took effect while the line was parsed
    if node.is_builtin() {
        return 0;
    }
    match ops.exec(arguments) {
        Ok(status) => status,
        Err(e) => {
            ops.report(&e);
            EXEC_FAILURE_STATUS
        }
    }
}

fn run_pipe<P: ProcessOps>(ops: &mut P, left: &CommandNode, right: &CommandNode) -> i32 {
    let ends = match ops.pipe() {
        Ok(ends) => ends,
        Err(e) => {
            ops.report(&e);
            return FAILURE_STATUS;
        }
    };

    let writer = spawn_reported(ops, |ops| {
        if let Err(e) = ops.attach(Stream::Stdout, ends.write) {
            ops.report(&e);
            return FAILURE_STATUS;
        }
        ops.close(ends.read);
        ops.close(ends.write);
        run(ops, left)
    });
    let reader = spawn_reported(ops, |ops| {
        if let Err(e) = ops.attach(Stream::Stdin, ends.read) {
            ops.report(&e);
            return FAILURE_STATUS;
        }
        ops.close(ends.read);
        ops.close(ends.write);
        run(ops, right)
    });

    // the reader only sees end-of-stream once no process holds the write end
    ops.close(ends.read);
    ops.close(ends.write);

    if let Some(child) = writer {
        wait_reported(ops, child);
    }
    match reader {
        Some(child) => wait_reported(ops, child),
        None => FAILURE_STATUS,
    }
}

fn run_redirect<P: ProcessOps>(ops: &mut P, stream: Stream, file: &str, inner: &CommandNode) -> i32 {
    if let Err(e) = ops.redirect(stream, file) {
        ops.report(&e);
        return FAILURE_STATUS;
    }
    run(ops, inner)
}

fn run_sequence<P: ProcessOps>(ops: &mut P, members: &[CommandNode]) -> i32 {
    let mut status = 0;
    for member in members {
        status = match spawn_reported(ops, |ops| run(ops, member)) {
            Some(child) => wait_reported(ops, child),
            None => FAILURE_STATUS,
        };
    }
    status
}

fn spawn_reported<P, F>(ops: &mut P, body: F) -> Option<ChildId>
where
    P: ProcessOps,
    F: FnOnce(&mut P) -> i32,
{
    match ops.spawn(body) {
        Ok(child) => Some(child),
        Err(e) => {
            warn!("continuing after spawn failure");
            ops.report(&e);
            None
        }
    }
}

fn wait_reported<P: ProcessOps>(ops: &mut P, child: ChildId) -> i32 {
    match ops.wait(child) {
        Ok(status) => status.code(),
        Err(e) => {
            ops.report(&e);
            FAILURE_STATUS
        }
    }
}
