pub mod executor;
pub mod process;
pub mod status;

pub use executor::Executor;
