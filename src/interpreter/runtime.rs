use std::rc::Rc;

use log::{debug, trace};

use crate::ast::{Block, Expression, Identifier, InfixOperator, PrefixOperator, Statement, StepDirection};
use crate::builtins::Builtins;
use crate::runtime::environment::Environment;
use crate::runtime::error::{ErrorKind, RuntimeError};
use crate::runtime::object::{Builtin, Function, Object};

use super::EvalConfig;

/// Space left on the host stack below which evaluation moves to a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Why evaluation stopped early. A `俾我` travels on this side of the result
/// so every `?` stops at it, just like an error, until a call boundary or the
/// program itself catches it.
#[derive(Debug)]
pub(super) enum Unwind {
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

pub(super) type EvalResult = std::result::Result<Object, Unwind>;

/// Tree walker for one top-level evaluation.
pub(super) struct Evaluator<'a> {
    builtins: &'a Builtins,
    config: EvalConfig,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub(super) fn new(builtins: &'a Builtins, config: EvalConfig) -> Self {
        Self {
            builtins,
            config,
            depth: 0,
        }
    }

    /// Runs a whole program or function body, the two places a `俾我` stops.
    pub(super) fn run_body(
        &mut self,
        statements: &[Statement],
        environment: &mut Environment<'_>,
    ) -> std::result::Result<Object, RuntimeError> {
        match self.run_statements(statements, environment) {
            Ok(value) | Err(Unwind::Return(value)) => Ok(value),
            Err(Unwind::Error(error)) => Err(error),
        }
    }

    /// Runs statements in order and yields the last value. Returns and errors
    /// pass straight through to the caller.
    fn run_statements(
        &mut self,
        statements: &[Statement],
        environment: &mut Environment<'_>,
    ) -> EvalResult {
        let mut result = Object::Null;
        for statement in statements {
            trace!("exec {statement}");
            result = self.exec_statement(statement, environment)?;
        }
        Ok(result)
    }

    fn run_block(&mut self, block: &Block, environment: &mut Environment<'_>) -> EvalResult {
        self.run_statements(&block.statements, environment)
    }

    fn exec_statement(
        &mut self,
        statement: &Statement,
        environment: &mut Environment<'_>,
    ) -> EvalResult {
        match statement {
            Statement::Declare { .. } => Ok(Object::Null),
            Statement::Assign { value, name, .. } => {
                let value = self.eval_expression(value, environment)?;
                environment.set(name.name.clone(), value.clone());
                Ok(value)
            }
            Statement::Return { value, .. } => {
                let value = self.eval_expression(value, environment)?;
                Err(Unwind::Return(value))
            }
            Statement::Expr(expression) => self.eval_expression(expression, environment),
            Statement::FunctionDef {
                name, params, body, ..
            } => {
                let function = Object::Function(Rc::new(Function {
                    name: name.name.clone(),
                    params: params.clone(),
                    body: body.clone(),
                }));
                environment.set(name.name.clone(), function.clone());
                Ok(function)
            }
            Statement::Step {
                name, direction, ..
            } => self.exec_step(name, *direction, environment),
        }
    }

    fn exec_step(
        &mut self,
        name: &Identifier,
        direction: StepDirection,
        environment: &mut Environment<'_>,
    ) -> EvalResult {
        let current = match environment.get(&name.name) {
            Some(Object::Integer(value)) => *value,
            Some(other) => {
                return Err(RuntimeError::new(
                    ErrorKind::TypeError,
                    format!("{} expected INTEGER, got {}", name.name, other.type_of()),
                )
                .into());
            }
            None => return Err(undefined(&name.name).into()),
        };
        let next = match direction {
            StepDirection::Increment => current.checked_add(1),
            StepDirection::Decrement => current.checked_sub(1),
        }
        .ok_or_else(|| overflow(&format!("{} stepped past the integer range", name.name)))?;
        environment.set(name.name.clone(), Object::Integer(next));
        Ok(Object::Integer(next))
    }

    fn eval_expression(
        &mut self,
        expression: &Expression,
        environment: &mut Environment<'_>,
    ) -> EvalResult {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.eval_expression_inner(expression, environment)
        })
    }

    fn eval_expression_inner(
        &mut self,
        expression: &Expression,
        environment: &mut Environment<'_>,
    ) -> EvalResult {
        match expression {
            Expression::Integer { value, .. } => Ok(Object::Integer(*value)),
            Expression::String { value, .. } => Ok(Object::String(value.clone())),
            Expression::Boolean { value, .. } => Ok(Object::Boolean(*value)),
            Expression::Array { items, .. } => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_expression(item, environment)?);
                }
                Ok(Object::Array(values))
            }
            Expression::Identifier(identifier) => Ok(self.lookup(&identifier.name, environment)),
            Expression::Prefix { op, right, .. } => {
                let right = self.eval_expression(right, environment)?;
                Ok(eval_prefix(*op, right)?)
            }
            Expression::Infix {
                left, op, right, ..
            } => match op {
                InfixOperator::And | InfixOperator::Or => {
                    self.eval_logical(*op, left, right, environment)
                }
                _ => {
                    let left = self.eval_expression(left, environment)?;
                    let right = self.eval_expression(right, environment)?;
                    Ok(eval_infix(*op, left, right)?)
                }
            },
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let condition = self.eval_expression(condition, environment)?;
                if condition.is_truthy() {
                    self.run_block(consequence, environment)
                } else if let Some(alternative) = alternative {
                    self.run_block(alternative, environment)
                } else {
                    Ok(Object::Null)
                }
            }
            Expression::While {
                condition, body, ..
            } => {
                let mut result = Object::Null;
                while self.eval_expression(condition, environment)?.is_truthy() {
                    result = self.run_block(body, environment)?;
                }
                Ok(result)
            }
            Expression::Index {
                collection, index, ..
            } => {
                let collection = self.eval_expression(collection, environment)?;
                let index = self.eval_expression(index, environment)?;
                Ok(eval_index(collection, index)?)
            }
            Expression::Call { function, args, .. } => self.eval_call(function, args, environment),
            Expression::Poisoned { token } => Err(RuntimeError::new(
                ErrorKind::InvalidToken,
                format!("cannot evaluate '{}' at {}", token.literal, token.span),
            )
            .into()),
        }
    }

    /// Unbound names evaluate to Null, builtin names included. Builtins are
    /// only reachable as call targets.
    fn lookup(&self, name: &str, environment: &Environment<'_>) -> Object {
        environment.get(name).cloned().unwrap_or(Object::Null)
    }

    fn eval_logical(
        &mut self,
        op: InfixOperator,
        left: &Expression,
        right: &Expression,
        environment: &mut Environment<'_>,
    ) -> EvalResult {
        let left = match self.eval_expression(left, environment)? {
            Object::Boolean(value) => value,
            other => return Err(invalid_logical_operand(op, &other).into()),
        };
        match (op, left) {
            (InfixOperator::And, false) => return Ok(Object::Boolean(false)),
            (InfixOperator::Or, true) => return Ok(Object::Boolean(true)),
            _ => {}
        }
        match self.eval_expression(right, environment)? {
            Object::Boolean(value) => Ok(Object::Boolean(value)),
            other => Err(invalid_logical_operand(op, &other).into()),
        }
    }

    fn eval_call(
        &mut self,
        function: &Identifier,
        args: &[Expression],
        environment: &mut Environment<'_>,
    ) -> EvalResult {
        let name = &function.name;
        match environment.get(name).cloned() {
            Some(Object::Function(callee)) => self.call_function(&callee, args, environment),
            Some(Object::Builtin(builtin)) => self.call_builtin(builtin, args, environment),
            Some(other) => Err(RuntimeError::new(
                ErrorKind::TypeError,
                format!("{name} is {}, not a function", other.type_of()),
            )
            .into()),
            None => match self.builtins.get(name) {
                Some(builtin) => self.call_builtin(builtin, args, environment),
                None => Err(undefined(name).into()),
            },
        }
    }

    fn call_function(
        &mut self,
        function: &Function,
        args: &[Expression],
        environment: &mut Environment<'_>,
    ) -> EvalResult {
        if args.len() != function.params.len() {
            return Err(RuntimeError::new(
                ErrorKind::WrongNumberOfArguments,
                format!(
                    "{} expected {} arguments, got {}",
                    function.name,
                    function.params.len(),
                    args.len()
                ),
            )
            .into());
        }
        if self.depth >= self.config.max_call_depth {
            return Err(RuntimeError::new(
                ErrorKind::StackOverflow,
                format!(
                    "calling {} exceeded the maximum call depth of {}",
                    function.name, self.config.max_call_depth
                ),
            )
            .into());
        }

        debug!("call {} at depth {}", function.name, self.depth + 1);
        // The call scope hangs off the caller's scope, not the definition site.
        let mut scope = Environment::enclosed(&*environment);
        self.depth += 1;
        let result = self.bind_and_run(function, args, &mut scope);
        self.depth -= 1;
        result
    }

    fn bind_and_run(
        &mut self,
        function: &Function,
        args: &[Expression],
        scope: &mut Environment<'_>,
    ) -> EvalResult {
        // Arguments see the parameters bound before them. A `俾我` inside an
        // argument belongs to the caller, so it is not caught here.
        for (param, arg) in function.params.iter().zip(args) {
            let value = self.eval_expression(arg, scope)?;
            scope.set(param.name.clone(), value);
        }
        Ok(self.run_body(&function.body.statements, scope)?)
    }

    fn call_builtin(
        &mut self,
        builtin: Builtin,
        args: &[Expression],
        environment: &mut Environment<'_>,
    ) -> EvalResult {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expression(arg, environment)?);
        }
        debug!("call builtin {} with {} arguments", builtin.name, values.len());
        match builtin.call(&values) {
            Object::Error(error) => Err(error.into()),
            value => Ok(value),
        }
    }
}

type OpResult = std::result::Result<Object, RuntimeError>;

fn eval_prefix(op: PrefixOperator, right: Object) -> OpResult {
    match (op, right) {
        (PrefixOperator::Negate, Object::Integer(value)) => value
            .checked_neg()
            .map(Object::Integer)
            .ok_or_else(|| overflow(&format!("-{value} overflows"))),
        (PrefixOperator::Not, Object::Boolean(value)) => Ok(Object::Boolean(!value)),
        (op, right) => {
            let symbol = match op {
                PrefixOperator::Negate => "-",
                PrefixOperator::Not => "唔係",
            };
            Err(RuntimeError::new(
                ErrorKind::InvalidPrefix,
                format!("{symbol} {}", right.type_of()),
            ))
        }
    }
}

fn eval_infix(op: InfixOperator, left: Object, right: Object) -> OpResult {
    if left.type_of() != right.type_of() {
        return Err(RuntimeError::new(
            ErrorKind::TypeMismatch,
            format!("{} {} {}", left.type_of(), symbol(op), right.type_of()),
        ));
    }

    match (op, &left, &right) {
        (InfixOperator::Add, Object::String(l), Object::String(r)) => {
            Ok(Object::String(format!("{l}{r}")))
        }
        (
            InfixOperator::Add | InfixOperator::Sub | InfixOperator::Mul | InfixOperator::Div,
            Object::Integer(l),
            Object::Integer(r),
        ) => eval_arithmetic(op, *l, *r),
        (InfixOperator::Add | InfixOperator::Sub | InfixOperator::Mul | InfixOperator::Div, _, _) => {
            Err(RuntimeError::new(
                ErrorKind::InvalidOperation,
                format!("{} {} {}", left.type_of(), symbol(op), right.type_of()),
            ))
        }
        (InfixOperator::LessThan, Object::Integer(l), Object::Integer(r)) => {
            Ok(Object::Boolean(l < r))
        }
        (InfixOperator::GreaterThan, Object::Integer(l), Object::Integer(r)) => {
            Ok(Object::Boolean(l > r))
        }
        (InfixOperator::Equal, Object::Integer(l), Object::Integer(r)) => {
            Ok(Object::Boolean(l == r))
        }
        (InfixOperator::Equal, Object::String(l), Object::String(r)) => Ok(Object::Boolean(l == r)),
        (InfixOperator::Equal, Object::Boolean(l), Object::Boolean(r)) => {
            Ok(Object::Boolean(l == r))
        }
        _ => Err(RuntimeError::new(
            ErrorKind::InvalidComparison,
            format!("{} {} {}", left.type_of(), symbol(op), right.type_of()),
        )),
    }
}

fn eval_arithmetic(op: InfixOperator, left: i64, right: i64) -> OpResult {
    let value = match op {
        InfixOperator::Add => left.checked_add(right),
        InfixOperator::Sub => left.checked_sub(right),
        InfixOperator::Mul => left.checked_mul(right),
        InfixOperator::Div => {
            if right == 0 {
                return Err(RuntimeError::new(
                    ErrorKind::DivisionByZero,
                    format!("{left} / 0"),
                ));
            }
            left.checked_div(right)
        }
        _ => None,
    };
    value
        .map(Object::Integer)
        .ok_or_else(|| overflow(&format!("{left} {} {right} overflows", symbol(op))))
}

fn eval_index(collection: Object, index: Object) -> OpResult {
    let Object::Integer(index) = index else {
        return Err(RuntimeError::new(
            ErrorKind::TypeError,
            format!("index must be INTEGER, got {}", index.type_of()),
        ));
    };
    let out_of_range = |len: usize| {
        RuntimeError::new(
            ErrorKind::IndexError,
            format!("index {index} out of range for length {len}"),
        )
    };
    match collection {
        Object::Array(items) => usize::try_from(index)
            .ok()
            .and_then(|i| items.get(i).cloned())
            .ok_or_else(|| out_of_range(items.len())),
        Object::String(text) => usize::try_from(index)
            .ok()
            .and_then(|i| text.chars().nth(i))
            .map(|ch| Object::String(ch.to_string()))
            .ok_or_else(|| out_of_range(text.chars().count())),
        other => Err(RuntimeError::new(
            ErrorKind::TypeError,
            format!("{} cannot be indexed", other.type_of()),
        )),
    }
}

fn symbol(op: InfixOperator) -> &'static str {
    match op {
        InfixOperator::Add => "+",
        InfixOperator::Sub => "-",
        InfixOperator::Mul => "*",
        InfixOperator::Div => "/",
        InfixOperator::Equal => "係",
        InfixOperator::LessThan => "細過",
        InfixOperator::GreaterThan => "大過",
        InfixOperator::And => "同埋",
        InfixOperator::Or => "或者",
    }
}

fn invalid_logical_operand(op: InfixOperator, operand: &Object) -> RuntimeError {
    RuntimeError::new(
        ErrorKind::InvalidOperation,
        format!("{} expects BOOLEAN operands, got {}", symbol(op), operand.type_of()),
    )
}

fn overflow(detail: &str) -> RuntimeError {
    RuntimeError::new(ErrorKind::InvalidOperation, detail)
}

fn undefined(name: &str) -> RuntimeError {
    RuntimeError::new(
        ErrorKind::UndefinedVariable,
        format!("{name} is used before assignment"),
    )
}
