pub mod ast;
pub mod parser;
pub mod split;

pub use ast::CommandNode;
pub use parser::Parser;
