use log::warn;
use nix::sys::signal::{signal, SigHandler, Signal};

const INTERACTIVE_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGQUIT];

/// Dispositions a child must not inherit. SIGPIPE is ignored by the Rust
/// runtime at start-up, and a writer whose reader has gone should die quietly.
const CHILD_DEFAULT_SIGNALS: [Signal; 3] = [Signal::SIGINT, Signal::SIGQUIT, Signal::SIGPIPE];

fn set_handlers(signals: &[Signal], handler: SigHandler) {
    for &sig in signals {
        // SAFETY: only the SIG_IGN / SIG_DFL dispositions are installed, no
        // handler code runs.
        if let Err(e) = unsafe { signal(sig, handler) } {
            warn!("cannot set {} disposition: {}", sig, e);
        }
    }
}

/// Keeps Ctrl-C and Ctrl-\ from killing the shell while a command runs.
pub fn ignore_interactive_signals() {
    set_handlers(&INTERACTIVE_SIGNALS, SigHandler::SigIgn);
}

/// Undoes [`ignore_interactive_signals`] in a freshly forked child; ignored
/// dispositions would otherwise survive exec.
pub fn restore_default_signals() {
    set_handlers(&CHILD_DEFAULT_SIGNALS, SigHandler::SigDfl);
}
