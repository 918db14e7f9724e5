use log::debug;

use crate::ast::Program;
use crate::builtins::Builtins;
use crate::parser::{ParseErrors, ParserConfig, parse_with_config};
use crate::runtime::environment::Environment;
use crate::runtime::object::Object;

mod runtime;

use runtime::Evaluator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Deepest chain of nested user-function calls before a "stack overflow" error.
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_call_depth: 1000,
        }
    }
}

/// Tree-walking evaluator. Holds the builtin registry and limits; all program
/// state lives in the `Environment` passed to each evaluation.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    builtins: Builtins,
    config: EvalConfig,
    parser_config: ParserConfig,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_parser_config(mut self, parser_config: ParserConfig) -> Self {
        self.parser_config = parser_config;
        self
    }

    pub fn builtins_mut(&mut self) -> &mut Builtins {
        &mut self.builtins
    }

    /// Evaluates a program against `environment`. A runtime failure comes back
    /// as `Object::Error`; bindings made before the failure are kept.
    pub fn evaluate(&self, program: &Program, environment: &mut Environment<'_>) -> Object {
        let mut evaluator = Evaluator::new(&self.builtins, self.config);
        match evaluator.run_body(&program.statements, environment) {
            Ok(value) => value,
            Err(error) => {
                debug!("evaluation stopped: {error}");
                Object::Error(error)
            }
        }
    }

    /// Parses and evaluates `source`. Nothing is evaluated when parsing reports
    /// any error.
    pub fn run(&self, source: &str, environment: &mut Environment<'_>) -> Result<Object, ParseErrors> {
        let program = parse_with_config(source, self.parser_config)?;
        Ok(self.evaluate(&program, environment))
    }
}

/// Runs `source` in a fresh root scope with the standard builtins.
pub fn interpret(source: &str) -> Result<Object, ParseErrors> {
    let mut environment = Environment::new();
    Interpreter::new().run(source, &mut environment)
}
