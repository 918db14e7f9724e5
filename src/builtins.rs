use std::collections::HashMap;
use std::io::{self, Write};

use crate::runtime::{
    error::{ErrorKind, RuntimeError},
    object::{Builtin, BuiltinFn, Object},
};

pub const LENGTH: &str = "有幾長";
pub const PRINT: &str = "講";

/// Name-to-callable table consulted when a called name has no user binding.
#[derive(Debug, Clone)]
pub struct Builtins {
    functions: HashMap<&'static str, Builtin>,
}

impl Builtins {
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// The registry every interpreter starts with.
    pub fn standard() -> Self {
        let mut builtins = Self::empty();
        builtins.register(LENGTH, length);
        builtins.register(PRINT, print);
        builtins
    }

    pub fn register(&mut self, name: &'static str, function: BuiltinFn) {
        self.functions.insert(name, Builtin { name, function });
    }

    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.functions.get(name).copied()
    }

}

impl Default for Builtins {
    fn default() -> Self {
        Self::standard()
    }
}

fn length(args: &[Object]) -> Object {
    if args.len() != 1 {
        return RuntimeError::new(
            ErrorKind::WrongNumberOfArguments,
            format!("{LENGTH} expected 1 argument, got {}", args.len()),
        )
        .into();
    }
    let count = match &args[0] {
        Object::String(value) => value.chars().count(),
        Object::Array(items) => items.len(),
        other => {
            return RuntimeError::new(
                ErrorKind::InvalidArgumentType,
                format!("{LENGTH} expected STRING or ARRAY, got {}", other.type_of()),
            )
            .into();
        }
    };
    match i64::try_from(count) {
        Ok(count) => Object::Integer(count),
        Err(_) => RuntimeError::new(ErrorKind::InvalidOperation, "length does not fit in an integer")
            .into(),
    }
}

fn print(args: &[Object]) -> Object {
    print_to(&mut io::stdout().lock(), args)
}

/// A closed or failing output is reported to the script, never a panic.
fn print_to(out: &mut impl Write, args: &[Object]) -> Object {
    let rendered = args.iter().map(Object::inspect).collect::<Vec<_>>();
    match writeln!(out, "{}", rendered.join(" ")) {
        Ok(()) => Object::Null,
        Err(error) => {
            RuntimeError::new(ErrorKind::InvalidOperation, format!("cannot print: {error}")).into()
        }
    }
}
