use std::ffi::CString;
use std::io::{self, Write};
use std::os::fd::{IntoRawFd, RawFd};
use std::path::Path;
use std::process;

use log::{debug, error};
use nix::errno::Errno;
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::sys::wait::waitpid;
use nix::unistd::{chdir, close, dup2, execvp, fork, pipe, ForkResult, Pid};

use super::status::ChildStatus;
use crate::shell::error::ShellError;
use crate::shell::signals;

pub type ChildId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdin,
    Stdout,
}

impl Stream {
    pub fn fd(self) -> RawFd {
        match self {
            Stream::Stdin => 0,
            Stream::Stdout => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeEnds {
    pub read: RawFd,
    pub write: RawFd,
}

/// The process primitives the executor is written against.
///
/// `spawn` is the only place a child comes into existence: the child runs
/// `body` and terminates with the status it returns, so control never comes
/// back out of `spawn` on the child side.
pub trait ProcessOps: Sized {
    fn spawn<F>(&mut self, body: F) -> Result<ChildId, ShellError>
    where
        F: FnOnce(&mut Self) -> i32;

    /// Blocks until `child` has terminated and reaps it.
    fn wait(&mut self, child: ChildId) -> Result<ChildStatus, ShellError>;

    fn pipe(&mut self) -> Result<PipeEnds, ShellError>;

    /// Makes `fd` the process's `stream`.
    fn attach(&mut self, stream: Stream, fd: RawFd) -> Result<(), ShellError>;

    fn close(&mut self, fd: RawFd);

    /// Replaces `stream` with `file`: stdout is created or truncated and
    /// opened write-only, stdin is opened read-only.
    fn redirect(&mut self, stream: Stream, file: &str) -> Result<(), ShellError>;

    fn change_dir(&mut self, path: &Path) -> Result<(), ShellError>;

    /// Replaces the process image. Returns only if the program could not be
    /// started.
    fn exec(&mut self, arguments: &[String]) -> Result<i32, ShellError>;

    fn report(&mut self, error: &ShellError);
}

/// fork/exec on the host system.
#[derive(Debug, Default)]
pub struct UnixProcess;

impl UnixProcess {
    pub fn new() -> Self {
        UnixProcess
    }
}

fn flush_std() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}

impl ProcessOps for UnixProcess {
    fn spawn<F>(&mut self, body: F) -> Result<ChildId, ShellError>
    where
        F: FnOnce(&mut Self) -> i32,
    {
        // anything still buffered would otherwise be written by both processes
        flush_std();

        // SAFETY: the shell is single-threaded, so the child starts with a
        // consistent copy of every lock and allocator state.
        match unsafe { fork() } {
            Ok(ForkResult::Parent { child }) => {
                debug!("spawned child {}", child);
                Ok(child.as_raw())
            }
            Ok(ForkResult::Child) => {
                signals::restore_default_signals();
                let status = body(self);
                flush_std();
                process::exit(status)
            }
            Err(e) => Err(ShellError::Spawn(e)),
        }
    }

    fn wait(&mut self, child: ChildId) -> Result<ChildStatus, ShellError> {
        loop {
            match waitpid(Pid::from_raw(child), None) {
                Ok(ws) => {
                    if let Some(status) = ChildStatus::from_wait_status(ws) {
                        debug!("child {} {}", child, status);
                        return Ok(status);
                    }
                }
                Err(Errno::EINTR) => continue,
                Err(source) => return Err(ShellError::Wait { pid: child, source }),
            }
        }
    }

    fn pipe(&mut self) -> Result<PipeEnds, ShellError> {
        let (read, write) = pipe().map_err(ShellError::Pipe)?;
        Ok(PipeEnds {
            read: read.into_raw_fd(),
            write: write.into_raw_fd(),
        })
    }

    fn attach(&mut self, stream: Stream, fd: RawFd) -> Result<(), ShellError> {
        dup2(fd, stream.fd()).map_err(ShellError::Pipe)?;
        Ok(())
    }

    fn close(&mut self, fd: RawFd) {
        if let Err(e) = close(fd) {
            debug!("close({}) failed: {}", fd, e);
        }
    }

    fn redirect(&mut self, stream: Stream, file: &str) -> Result<(), ShellError> {
        let (flags, mode) = match stream {
            Stream::Stdout => (
                OFlag::O_CREAT | OFlag::O_WRONLY | OFlag::O_TRUNC,
                Mode::S_IRUSR | Mode::S_IWUSR | Mode::S_IRGRP | Mode::S_IROTH,
            ),
            Stream::Stdin => (OFlag::O_RDONLY, Mode::empty()),
        };
        let to_error = |source| ShellError::Redirect {
            file: file.to_string(),
            source,
        };

        let fd = open(file, flags, mode).map_err(to_error)?;
        if fd != stream.fd() {
            dup2(fd, stream.fd()).map_err(to_error)?;
            self.close(fd);
        }
        Ok(())
    }

    fn change_dir(&mut self, path: &Path) -> Result<(), ShellError> {
        chdir(path).map_err(|source| ShellError::ChangeDir {
            path: path.to_path_buf(),
            source,
        })
    }

    fn exec(&mut self, arguments: &[String]) -> Result<i32, ShellError> {
        let program = arguments.first().cloned().unwrap_or_default();
        let argv = arguments
            .iter()
            .map(|arg| CString::new(arg.as_str()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ShellError::Exec {
                program: program.clone(),
                source: Errno::EINVAL,
            })?;
        let Some(filename) = argv.first() else {
            return Err(ShellError::Exec {
                program,
                source: Errno::ENOENT,
            });
        };

        debug!("exec {:?}", arguments);
        flush_std();
        match execvp(filename, &argv) {
            Ok(never) => match never {},
            Err(source) => Err(ShellError::Exec { program, source }),
        }
    }

    fn report(&mut self, err: &ShellError) {
        error!("{}", err);
        eprintln!("{}", err);
    }
}
