use std::fmt;

use nix::sys::wait::WaitStatus as WS;

/// How a reaped child ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChildStatus {
    Exited(i32),
    Signaled(i32),
}

impl ChildStatus {
    /// Shell-style status code: signals map to `128 + signo`.
    pub fn code(&self) -> i32 {
        match self {
            ChildStatus::Exited(code) => *code,
            ChildStatus::Signaled(sig) => 128 + sig,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code() == 0
    }

    /// Terminal states only; stop/continue notifications yield `None`.
    pub fn from_wait_status(status: WS) -> Option<Self> {
        match status {
            WS::Exited(_, code) => Some(ChildStatus::Exited(code)),
            WS::Signaled(_, sig, _core_dumped) => Some(ChildStatus::Signaled(sig as i32)),
            _ => None,
        }
    }
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildStatus::Exited(code) => write!(f, "exited with {}", code),
            ChildStatus::Signaled(sig) => write!(f, "killed by signal {}", sig),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::Signal;
    use nix::unistd::Pid;

    #[test]
    fn test_from_wait_status() {
        let pid = Pid::from_raw(42);
        assert_eq!(ChildStatus::from_wait_status(WS::Exited(pid, 3)), Some(ChildStatus::Exited(3)));
        assert_eq!(
            ChildStatus::from_wait_status(WS::Signaled(pid, Signal::SIGKILL, false)),
            Some(ChildStatus::Signaled(9))
        );
        assert_eq!(ChildStatus::from_wait_status(WS::Continued(pid)), None);
        assert_eq!(ChildStatus::from_wait_status(WS::StillAlive), None);
    }

    #[test]
    fn test_codes() {
        assert!(ChildStatus::Exited(0).is_success());
        assert!(!ChildStatus::Signaled(9).is_success());
        assert_eq!(ChildStatus::Exited(127).code(), 127);
        assert_eq!(ChildStatus::Signaled(2).code(), 130);
        assert_eq!(ChildStatus::Signaled(15).to_string(), "killed by signal 15");
    }
}
