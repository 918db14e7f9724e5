use std::{fmt, rc::Rc};

use crate::{
    ast::{Block, Identifier},
    runtime::error::RuntimeError,
};

pub type BuiltinFn = fn(&[Object]) -> Object;

/// A runtime value. Returning from a function is control flow in the
/// evaluator, not a value, so it has no variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer(i64),
    String(String),
    Boolean(bool),
    Null,
    Array(Vec<Object>),
    Function(Rc<Function>),
    Builtin(Builtin),
    Error(RuntimeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    String,
    Boolean,
    Null,
    Array,
    Function,
    Builtin,
    Error,
}

impl ObjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::String => "STRING",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::Array => "ARRAY",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::Error => "ERROR",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-defined function. Holds no environment: every call is scoped under
/// the caller.
#[derive(Debug, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: Vec<Identifier>,
    pub body: Block,
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub function: BuiltinFn,
}

impl Builtin {
    pub fn call(&self, args: &[Object]) -> Object {
        (self.function)(args)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

impl Object {
    pub fn type_of(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::String(_) => ObjectType::String,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::Array(_) => ObjectType::Array,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::Error(_) => ObjectType::Error,
        }
    }

    /// `錯` and Null are falsy, everything else (including `0`) is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{value}"),
            Object::String(value) => f.write_str(value),
            Object::Boolean(true) => f.write_str("啱"),
            Object::Boolean(false) => f.write_str("錯"),
            Object::Null => f.write_str("null"),
            Object::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Object::Function(function) => {
                write!(f, "聽到 {}(", function.name)?;
                for (i, param) in function.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") 嘅話，就 {}", function.body)
            }
            Object::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
            Object::Error(error) => write!(f, "{error}"),
        }
    }
}

impl From<RuntimeError> for Object {
    fn from(error: RuntimeError) -> Self {
        Object::Error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::ErrorKind;

    #[test]
    fn inspects_nested_arrays() {
        let value = Object::Array(vec![
            Object::Integer(3),
            Object::String("hi".to_string()),
            Object::Array(vec![Object::Boolean(true), Object::Null]),
        ]);
        assert_eq!(value.inspect(), "[3, hi, [啱, null]]");
    }

    #[test]
    fn truthiness() {
        assert!(Object::Integer(0).is_truthy());
        assert!(Object::String(String::new()).is_truthy());
        assert!(Object::Array(Vec::new()).is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
        assert!(!Object::Null.is_truthy());
    }

    #[test]
    fn error_inspect_carries_kind() {
        let error: Object = RuntimeError::new(ErrorKind::TypeMismatch, "INTEGER + BOOLEAN").into();
        assert_eq!(error.type_of(), ObjectType::Error);
        assert_eq!(error.inspect(), "type mismatch: INTEGER + BOOLEAN");
    }
}
