use std::fmt;

use crate::token::{Token, TokenKind};

#[derive(Debug, PartialEq, Clone)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        let name = token.literal.clone();
        Self { token, name }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum PrefixOperator {
    Negate,
    Not,
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum InfixOperator {
    Add,
    Sub,
    Mul,
    Div,
    Equal,
    LessThan,
    GreaterThan,
    And,
    Or,
}

impl InfixOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Sub,
            TokenKind::Star => Self::Mul,
            TokenKind::Slash => Self::Div,
            TokenKind::EqualTo => Self::Equal,
            TokenKind::LessThan => Self::LessThan,
            TokenKind::GreaterThan => Self::GreaterThan,
            TokenKind::And => Self::And,
            TokenKind::Or => Self::Or,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum StepDirection {
    Increment,
    Decrement,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Integer {
        token: Token,
        value: i64,
    },
    String {
        token: Token,
        value: String,
    },
    Boolean {
        token: Token,
        value: bool,
    },
    Array {
        token: Token,
        items: Vec<Expression>,
    },
    Identifier(Identifier),
    Prefix {
        token: Token,
        op: PrefixOperator,
        right: Box<Expression>,
    },
    Infix {
        token: Token,
        left: Box<Expression>,
        op: InfixOperator,
        right: Box<Expression>,
    },
    If {
        token: Token,
        condition: Box<Expression>,
        consequence: Block,
        alternative: Option<Block>,
    },
    While {
        token: Token,
        condition: Box<Expression>,
        body: Block,
    },
    Index {
        token: Token,
        collection: Box<Expression>,
        index: Box<Expression>,
    },
    Call {
        token: Token,
        function: Identifier,
        args: Vec<Expression>,
    },
    /// Placeholder left behind by a construct the parser could not make sense of.
    /// Only ever present alongside at least one parse error.
    Poisoned { token: Token },
}

impl Expression {
    pub fn token(&self) -> &Token {
        match self {
            Expression::Integer { token, .. }
            | Expression::String { token, .. }
            | Expression::Boolean { token, .. }
            | Expression::Array { token, .. }
            | Expression::Prefix { token, .. }
            | Expression::Infix { token, .. }
            | Expression::If { token, .. }
            | Expression::While { token, .. }
            | Expression::Index { token, .. }
            | Expression::Call { token, .. }
            | Expression::Poisoned { token } => token,
            Expression::Identifier(identifier) => &identifier.token,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    /// `叫佢 x`: names a variable without binding a value.
    Declare {
        token: Token,
        name: Identifier,
    },
    /// `塞 EXPR 入 x`
    Assign {
        token: Token,
        value: Expression,
        name: Identifier,
    },
    Return {
        token: Token,
        value: Expression,
    },
    Expr(Expression),
    FunctionDef {
        token: Token,
        name: Identifier,
        params: Vec<Identifier>,
        body: Block,
    },
    /// `x 大D` / `x 細D`
    Step {
        token: Token,
        name: Identifier,
        direction: StepDirection,
    },
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.statements, "; ")
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        write_joined(f, &self.statements, "; ")?;
        f.write_str("}")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Declare { name, .. } => write!(f, "叫佢 {name}"),
            Statement::Assign { value, name, .. } => write!(f, "塞 {value} 入 {name}"),
            Statement::Return { value, .. } => write!(f, "俾我 {value}"),
            Statement::Expr(expression) => write!(f, "{expression}"),
            Statement::FunctionDef {
                name, params, body, ..
            } => {
                write!(f, "聽到 {name}(")?;
                write_joined(f, params, ", ")?;
                write!(f, ") 嘅話，就 {body}")
            }
            Statement::Step {
                name, direction, ..
            } => match direction {
                StepDirection::Increment => write!(f, "{name} 大D"),
                StepDirection::Decrement => write!(f, "{name} 細D"),
            },
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Integer { value, .. } => write!(f, "{value}"),
            Expression::String { value, .. } => {
                if value.contains('"') {
                    write!(f, "“{value}”")
                } else {
                    write!(f, "\"{value}\"")
                }
            }
            Expression::Boolean { value, .. } => f.write_str(if *value { "啱" } else { "錯" }),
            Expression::Array { items, .. } => {
                f.write_str("[")?;
                write_joined(f, items, ", ")?;
                f.write_str("]")
            }
            Expression::Identifier(identifier) => write!(f, "{identifier}"),
            Expression::Prefix { token, right, .. } => write!(f, "({} {right})", token.literal),
            Expression::Infix {
                token, left, right, ..
            } => write!(f, "({left} {} {right})", token.literal),
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "如果 ({condition}) 嘅話，就 {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " 唔係就 {alternative}")?;
                }
                Ok(())
            }
            Expression::While {
                condition, body, ..
            } => write!(f, "當 ({condition}) 時，就 {body}"),
            Expression::Index {
                collection, index, ..
            } => write!(f, "({collection}[{index}])"),
            Expression::Call { function, args, .. } => {
                write!(f, "{function}(")?;
                write_joined(f, args, ", ")?;
                f.write_str(")")
            }
            Expression::Poisoned { token } => write!(f, "<invalid {}>", token.literal),
        }
    }
}
