pub mod ast;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod tc;
pub mod token;
