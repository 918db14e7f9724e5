use std::fmt;

use thiserror::Error;

/// Category of a runtime failure. The rendered form is what scripts and tests
/// see as the error's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidToken,
    TypeMismatch,
    InvalidOperation,
    InvalidComparison,
    InvalidPrefix,
    TypeError,
    IndexError,
    UndefinedVariable,
    WrongNumberOfArguments,
    InvalidArgumentType,
    DivisionByZero,
    StackOverflow,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidToken => "invalid token",
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::InvalidOperation => "invalid operation",
            ErrorKind::InvalidComparison => "invalid comparison",
            ErrorKind::InvalidPrefix => "invalid prefix",
            ErrorKind::TypeError => "type error",
            ErrorKind::IndexError => "index error",
            ErrorKind::UndefinedVariable => "undefined variable",
            ErrorKind::WrongNumberOfArguments => "wrong number of arguments",
            ErrorKind::InvalidArgumentType => "invalid argument type",
            ErrorKind::DivisionByZero => "division by zero",
            ErrorKind::StackOverflow => "stack overflow",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}: {detail}")]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl RuntimeError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_kind_then_detail() {
        let error = RuntimeError::new(ErrorKind::IndexError, "index 3 out of range for length 2");
        assert_eq!(
            error.to_string(),
            "index error: index 3 out of range for length 2"
        );
        assert_eq!(error.kind(), ErrorKind::IndexError);
    }
}
