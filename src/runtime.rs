//! Runtime object model shared by the evaluator and the builtins: values,
//! runtime errors and scopes.
pub mod environment;
pub mod error;
pub mod object;
