mod error;
mod executor;
mod parser;
mod readline;
mod shell;
mod signals;
mod state;

pub use shell::Shell;
