pub mod ast;
pub mod builtins;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod token;

pub use interpreter::{EvalConfig, Interpreter, interpret};
pub use runtime::environment::Environment;
pub use runtime::object::Object;
