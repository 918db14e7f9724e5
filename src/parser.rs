use log::debug;
use thiserror::Error;

use crate::ast::{
    Block, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
    StepDirection,
};
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("{message} at {span}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Every diagnostic collected during one parse pass.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("{}", join_errors(.0))]
pub struct ParseErrors(pub Vec<ParseError>);

fn join_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(ParseError::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest expression nesting accepted before the parser gives up on a statement.
    pub max_nesting: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_nesting: 256 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Logical,     // 同埋 或者
    Equals,      // 係
    LessGreater, // 細過 大過
    Sum,         // + -
    Product,     // * /
    Prefix,      // -x 唔係x
    Call,        // f(x)
    Index,       // xs[i]
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::And | TokenKind::Or => Precedence::Logical,
        TokenKind::EqualTo => Precedence::Equals,
        TokenKind::LessThan | TokenKind::GreaterThan => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Star | TokenKind::Slash => Precedence::Product,
        TokenKind::OpenParen => Precedence::Call,
        TokenKind::OpenBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

pub struct Parser<I: Iterator<Item = Token>> {
    tokens: I,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
    config: ParserConfig,
    depth: usize,
}

impl<'a> Parser<Lexer<'a>> {
    pub fn new(input: &'a str) -> Self {
        Self::from_tokens(Lexer::new(input))
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn from_tokens(tokens: I) -> Self {
        let eof = Token::synthetic(TokenKind::Eof, "");
        let mut parser = Self {
            tokens,
            current: eof.clone(),
            peek: eof,
            errors: Vec::new(),
            config: ParserConfig::default(),
            depth: 0,
        };
        parser.advance();
        parser.advance();
        parser
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses statements until end of file. Malformed statements are replaced
    /// by poisoned placeholders, so the program must not be evaluated unless
    /// the returned error list is empty.
    pub fn parse_program(mut self) -> (Program, Vec<ParseError>) {
        let mut statements = Vec::new();
        loop {
            self.skip_comments();
            if self.current.is(TokenKind::Eof) {
                break;
            }
            statements.push(self.parse_statement());
            self.advance();
        }
        (Program { statements }, self.errors)
    }

    fn parse_statement(&mut self) -> Statement {
        self.skip_comments();
        let parsed = match self.current.kind {
            TokenKind::Initialize => self.parse_declare(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Assign => self.parse_assign(),
            TokenKind::Function => self.parse_function_def(),
            TokenKind::Identifier
                if matches!(self.peek.kind, TokenKind::Increment | TokenKind::Decrement) =>
            {
                self.parse_step()
            }
            _ => self
                .parse_expression(Precedence::Lowest)
                .map(Statement::Expr),
        };

        let statement = match parsed {
            Ok(statement) => statement,
            Err(error) => {
                let token = self.current.clone();
                self.record(error);
                self.synchronize();
                Statement::Expr(Expression::Poisoned { token })
            }
        };

        if self.peek.is(TokenKind::EndOfStatement) {
            self.advance();
        }
        statement
    }

    fn parse_declare(&mut self) -> Result<Statement, ParseError> {
        let token = self.current.clone();
        self.expect_peek(TokenKind::Identifier)?;
        let name = Identifier::new(self.current.clone());
        Ok(Statement::Declare { token, name })
    }

    fn parse_return(&mut self) -> Result<Statement, ParseError> {
        let token = self.current.clone();
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        Ok(Statement::Return { token, value })
    }

    fn parse_assign(&mut self) -> Result<Statement, ParseError> {
        let token = self.current.clone();
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::Into)?;
        self.expect_peek(TokenKind::Identifier)?;
        let name = Identifier::new(self.current.clone());
        Ok(Statement::Assign { token, value, name })
    }

    fn parse_function_def(&mut self) -> Result<Statement, ParseError> {
        let token = self.current.clone();
        self.expect_peek(TokenKind::Identifier)?;
        let name = Identifier::new(self.current.clone());
        self.expect_peek(TokenKind::OpenParen)?;
        let params = self.parse_params()?;
        self.expect_peek(TokenKind::Gewa)?;
        self.expect_block_opening()?;
        let body = self.parse_block()?;
        Ok(Statement::FunctionDef {
            token,
            name,
            params,
            body,
        })
    }

    fn parse_params(&mut self) -> Result<Vec<Identifier>, ParseError> {
        let mut params = Vec::new();
        if self.peek.is(TokenKind::CloseParen) {
            self.advance();
            return Ok(params);
        }
        self.expect_peek(TokenKind::Identifier)?;
        params.push(Identifier::new(self.current.clone()));
        while self.peek.is(TokenKind::Comma) {
            self.advance();
            self.expect_peek(TokenKind::Identifier)?;
            params.push(Identifier::new(self.current.clone()));
        }
        self.expect_peek(TokenKind::CloseParen)?;
        Ok(params)
    }

    fn parse_step(&mut self) -> Result<Statement, ParseError> {
        let name = Identifier::new(self.current.clone());
        self.advance();
        let direction = if self.current.is(TokenKind::Increment) {
            StepDirection::Increment
        } else {
            StepDirection::Decrement
        };
        Ok(Statement::Step {
            token: self.current.clone(),
            name,
            direction,
        })
    }

    /// Expects `current` to be the opening brace; leaves `current` on the closing one.
    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.advance();
        let mut statements = Vec::new();
        loop {
            self.skip_comments();
            match self.current.kind {
                TokenKind::CloseBrace => break,
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        "expected 」 to close block, got end of file",
                        self.current.span,
                    ));
                }
                _ => {}
            }
            statements.push(self.parse_statement());
            self.advance();
        }
        Ok(Block { statements })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression, ParseError> {
        if self.depth >= self.config.max_nesting {
            return Err(ParseError::new(
                format!(
                    "expression nested deeper than {} levels",
                    self.config.max_nesting
                ),
                self.current.span,
            ));
        }
        self.depth += 1;
        let parsed = self.parse_expression_at(precedence);
        self.depth -= 1;
        parsed
    }

    fn parse_expression_at(&mut self, precedence: Precedence) -> Result<Expression, ParseError> {
        let mut left = self.parse_prefix()?;
        while precedence < precedence_of(self.peek.kind) {
            self.advance();
            left = match self.current.kind {
                TokenKind::OpenParen => self.parse_call(left)?,
                TokenKind::OpenBracket => self.parse_index(left)?,
                _ => self.parse_infix(left)?,
            };
        }
        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        match token.kind {
            TokenKind::Minus | TokenKind::Not => {
                let op = if token.is(TokenKind::Minus) {
                    PrefixOperator::Negate
                } else {
                    PrefixOperator::Not
                };
                self.advance();
                let right = self.parse_expression(Precedence::Prefix)?;
                Ok(Expression::Prefix {
                    token,
                    op,
                    right: Box::new(right),
                })
            }
            TokenKind::Identifier => Ok(Expression::Identifier(Identifier::new(token))),
            TokenKind::OpenParen => {
                self.advance();
                let expression = self.parse_expression(Precedence::Lowest)?;
                self.expect_peek(TokenKind::CloseParen)?;
                Ok(expression)
            }
            TokenKind::OpenBracket => {
                let items = self.parse_expression_list(TokenKind::CloseBracket)?;
                Ok(Expression::Array { token, items })
            }
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::True | TokenKind::False => Ok(Expression::Boolean {
                value: token.is(TokenKind::True),
                token,
            }),
            TokenKind::Number => match token.literal.parse::<i64>() {
                Ok(value) => Ok(Expression::Integer { token, value }),
                Err(_) => {
                    // Recorded but not fatal: the rest of the statement still parses.
                    self.record(ParseError::new(
                        format!("cannot convert {} to number", token.literal),
                        token.span,
                    ));
                    Ok(Expression::Poisoned { token })
                }
            },
            TokenKind::String => Ok(Expression::String {
                value: token.literal.clone(),
                token,
            }),
            TokenKind::Invalid => Err(ParseError::new(
                format!("invalid token '{}'", token.literal),
                token.span,
            )),
            _ => Err(ParseError::new(
                format!("expected expression, got {token}"),
                token.span,
            )),
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let op = InfixOperator::from_token(token.kind).ok_or_else(|| {
            ParseError::new(format!("infix operator expected, got {token}"), token.span)
        })?;
        let precedence = precedence_of(token.kind);
        self.advance();
        let right = self.parse_expression(precedence)?;
        Ok(Expression::Infix {
            token,
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    fn parse_call(&mut self, left: Expression) -> Result<Expression, ParseError> {
        let function = match left {
            Expression::Identifier(identifier) => identifier,
            other => {
                return Err(ParseError::new(
                    format!("expected function name before (, got {other}"),
                    self.current.span,
                ));
            }
        };
        let args = self.parse_expression_list(TokenKind::CloseParen)?;
        Ok(Expression::Call {
            token: function.token.clone(),
            function,
            args,
        })
    }

    fn parse_index(&mut self, left: Expression) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        self.advance();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::CloseBracket)?;
        Ok(Expression::Index {
            token,
            collection: Box::new(left),
            index: Box::new(index),
        })
    }

    fn parse_if(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let condition = self.parse_condition()?;
        self.expect_peek(TokenKind::Gewa)?;
        self.expect_block_opening()?;
        let consequence = self.parse_block()?;

        let alternative = if self.peek.is(TokenKind::Else) {
            self.advance();
            self.expect_peek(TokenKind::OpenBrace)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Expression::If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_while(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let condition = self.parse_condition()?;
        if matches!(self.peek.kind, TokenKind::Si | TokenKind::Gewa) {
            self.advance();
        } else {
            return Err(self.unexpected_peek("時"));
        }
        self.expect_block_opening()?;
        let body = self.parse_block()?;
        Ok(Expression::While {
            token,
            condition: Box::new(condition),
            body,
        })
    }

    /// `( EXPR )` following an 如果 / 當 keyword.
    fn parse_condition(&mut self) -> Result<Expression, ParseError> {
        self.expect_peek(TokenKind::OpenParen)?;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::CloseParen)?;
        Ok(condition)
    }

    /// The fixed `，就「` sequence introducing a block.
    fn expect_block_opening(&mut self) -> Result<(), ParseError> {
        self.expect_peek(TokenKind::Comma)?;
        self.expect_peek(TokenKind::Then)?;
        self.expect_peek(TokenKind::OpenBrace)
    }

    /// Expects `current` to be the opening delimiter; leaves `current` on `end`.
    fn parse_expression_list(&mut self, end: TokenKind) -> Result<Vec<Expression>, ParseError> {
        let mut items = Vec::new();
        if self.peek.is(end) {
            self.advance();
            return Ok(items);
        }
        self.advance();
        items.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek.is(TokenKind::Comma) {
            self.advance();
            self.advance();
            items.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_peek(end)?;
        Ok(items)
    }

    fn expect_peek(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        if self.peek.is(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected_peek(expected.describe()))
        }
    }

    fn unexpected_peek(&self, expected: &str) -> ParseError {
        ParseError::new(
            format!("expected {expected}, got {}", self.peek),
            self.peek.span,
        )
    }

    fn skip_comments(&mut self) {
        while self.current.is(TokenKind::Comment) {
            self.advance();
        }
    }

    /// Skips the rest of a broken statement, including any block it opened,
    /// without crossing the brace that closes the enclosing block.
    fn synchronize(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current.kind {
                TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseBrace if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                TokenKind::EndOfStatement if depth == 0 => return,
                _ => {}
            }
            if self.peek.is(TokenKind::Eof) {
                return;
            }
            if depth == 0
                && matches!(
                    self.peek.kind,
                    TokenKind::EndOfStatement | TokenKind::CloseBrace
                )
            {
                return;
            }
            self.advance();
        }
    }

    fn record(&mut self, error: ParseError) {
        debug!("parse error: {error}");
        self.errors.push(error);
    }

    fn advance(&mut self) {
        let next = self.tokens.next().unwrap_or_else(|| {
            let mut eof = Token::synthetic(TokenKind::Eof, "");
            eof.span = self.peek.span;
            eof
        });
        self.current = std::mem::replace(&mut self.peek, next);
    }
}

/// Parses a pre-scanned token stream, collecting every diagnostic.
pub fn parse_tokens(tokens: Vec<Token>) -> (Program, Vec<ParseError>) {
    Parser::from_tokens(tokens.into_iter()).parse_program()
}

/// Parses source text, refusing to hand out a program that carries poisoned nodes.
pub fn parse(input: &str) -> Result<Program, ParseErrors> {
    parse_with_config(input, ParserConfig::default())
}

pub fn parse_with_config(input: &str, config: ParserConfig) -> Result<Program, ParseErrors> {
    let (program, errors) = Parser::new(input).with_config(config).parse_program();
    if errors.is_empty() {
        Ok(program)
    } else {
        Err(ParseErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn parse_ok(input: &str) -> Program {
        parse(input).unwrap_or_else(|errors| panic!("unexpected parse errors:\n{errors}"))
    }

    fn single_expression(input: &str) -> Expression {
        let program = parse_ok(input);
        assert_eq!(program.statements.len(), 1, "expected one statement");
        match program.statements.into_iter().next() {
            Some(Statement::Expr(expression)) => expression,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn parses_terminated_literals() {
        let program = parse_ok(indoc! {"
            2。
            1;
            啱。
            \"hi\"
        "});
        let rendered = program
            .statements
            .iter()
            .map(Statement::to_string)
            .collect::<Vec<_>>();
        assert_eq!(rendered, vec!["2", "1", "啱", "\"hi\""]);
    }

    #[test]
    fn renders_infix_with_full_parentheses() {
        let cases = [
            ("1-1", "(1 - 1)"),
            ("1+2+3", "((1 + 2) + 3)"),
            ("1+3*2/5", "(1 + ((3 * 2) / 5))"),
            ("10+x", "(10 + x)"),
            ("hello+world", "(hello + world)"),
            ("（1 + 2） + 3", "((1 + 2) + 3)"),
            ("1 + （2 + 3）", "(1 + (2 + 3))"),
            ("1 * （2 + 3）", "(1 * (2 + 3))"),
            ("1 加 2 乘 3", "(1 加 (2 乘 3))"),
            ("3 + 3 係 6", "((3 + 3) 係 6)"),
            ("1 細過 2 係 啱", "((1 細過 2) 係 啱)"),
            ("a 同埋 b 或者 c", "((a 同埋 b) 或者 c)"),
            ("a 係 b 同埋 c", "((a 係 b) 同埋 c)"),
        ];
        for (input, expected) in cases {
            assert_eq!(single_expression(input).to_string(), expected, "input: {input}");
        }
    }

    #[test]
    fn parses_prefix_operators() {
        let cases = [
            ("-2", "(- 2)"),
            ("唔係5", "(唔係 5)"),
            ("唔係 唔係(6 大過 3)", "(唔係 (唔係 (6 大過 3)))"),
            ("-a * b", "((- a) * b)"),
        ];
        for (input, expected) in cases {
            assert_eq!(single_expression(input).to_string(), expected, "input: {input}");
        }
    }

    #[test]
    fn parses_calls_and_indexes() {
        let cases = [
            ("add（x，y）", "add(x, y)"),
            ("f()", "f()"),
            ("sum(1, sum(2, 3))", "sum(1, sum(2, 3))"),
            ("a * f(b) + c", "((a * f(b)) + c)"),
            ("[1, 2][0]", "([1, 2][0])"),
            ("xs[1 + 1] * 2", "((xs[(1 + 1)]) * 2)"),
            ("[]", "[]"),
        ];
        for (input, expected) in cases {
            assert_eq!(single_expression(input).to_string(), expected, "input: {input}");
        }
    }

    #[test]
    fn parses_if_else_expression() {
        let expression = single_expression(indoc! {"
            如果 （a） 嘅話，就「
                2。
            」唔係就「
                3。
            」
        "});
        let Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } = expression
        else {
            panic!("expected if expression");
        };
        assert_eq!(condition.to_string(), "a");
        assert_eq!(consequence.to_string(), "{2}");
        assert_eq!(alternative.map(|block| block.to_string()), Some("{3}".to_string()));
    }

    #[test]
    fn parses_if_without_else() {
        let expression = single_expression("如果 (a) 嘅話，就 {2}");
        assert!(matches!(
            expression,
            Expression::If {
                alternative: None,
                ..
            }
        ));
    }

    #[test]
    fn parses_while_loop_with_either_marker() {
        for input in ["當 （i 細過 8） 時，就「 i 大D。 」", "當 (i 細過 8) 嘅話，就 { i 大D }"] {
            let expression = single_expression(input);
            assert_eq!(expression.to_string(), "當 ((i 細過 8)) 時，就 {i 大D}");
        }
    }

    #[test]
    fn parses_statements() {
        let program = parse_ok(indoc! {"
            叫佢 i。
            塞 (2 + 3) 入 i
            i 大D;
            i 細D
            俾我 1 + 2。
        "});
        let rendered = program
            .statements
            .iter()
            .map(Statement::to_string)
            .collect::<Vec<_>>();
        assert_eq!(
            rendered,
            vec!["叫佢 i", "塞 (2 + 3) 入 i", "i 大D", "i 細D", "俾我 (1 + 2)"]
        );
    }

    #[test]
    fn parses_function_definition() {
        let program = parse_ok(indoc! {"
            聽到 add（x，y） 嘅話，就「
                俾我 x + y。
            」
        "});
        let Some(Statement::FunctionDef { name, params, body, .. }) = program.statements.first()
        else {
            panic!("expected function definition");
        };
        assert_eq!(name.name, "add");
        assert_eq!(
            params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["x", "y"]
        );
        assert_eq!(body.statements.len(), 1);
        assert_eq!(
            program.to_string(),
            "聽到 add(x, y) 嘅話，就 {俾我 (x + y)}"
        );
    }

    #[test]
    fn parses_function_without_parameters() {
        let program = parse_ok("聽到 f() 嘅話，就 {1}");
        assert!(matches!(
            program.statements.first(),
            Some(Statement::FunctionDef { params, .. }) if params.is_empty()
        ));
    }

    #[test]
    fn skips_comments_between_statements() {
        let program = parse_ok(indoc! {"
            // leading
            1。
            // middle
            2
            // trailing
        "});
        assert_eq!(program.statements.len(), 2);

        let program = parse_ok("如果 (a) 嘅話，就 { // only a comment\n }");
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn rendering_reparses_to_same_rendering() {
        for input in [
            "5 - (3 + 3) * -x",
            "唔係 (a 係 b) 同埋 c",
            "f(1, [2, \"three\"])[0] 大過 4 / 2",
        ] {
            let rendered = single_expression(input).to_string();
            assert_eq!(single_expression(&rendered).to_string(), rendered);
        }
    }

    #[test]
    fn collects_multiple_errors_in_one_pass() {
        let (program, errors) = Parser::new(indoc! {"
            塞 1 入 2。
            3 + 4。
            @。
            聽到 (x) 嘅話，就 { x }
            5
        "})
        .parse_program();
        assert_eq!(errors.len(), 3, "errors: {errors:?}");
        assert!(errors[0].message.contains("expected identifier"));
        assert!(errors[1].message.contains("invalid token '@'"));
        assert!(errors[2].message.contains("expected identifier"));
        assert!(program.statements.iter().any(|statement| matches!(
            statement,
            Statement::Expr(Expression::Poisoned { .. })
        )));
        assert_eq!(program.statements.last().map(ToString::to_string), Some("5".to_string()));
    }

    #[test]
    fn records_number_overflow_without_aborting() {
        let (program, errors) = Parser::new("99999999999999999999999 + 1").parse_program();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("cannot convert"));
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn reports_missing_markers() {
        let errors = parse("如果 (a) 就 {1}").expect_err("missing 嘅話 should fail");
        assert!(errors.0[0].message.contains("expected 嘅話"));

        let errors = parse("如果 (a) 嘅話 就 {1}").expect_err("missing comma should fail");
        assert!(errors.0[0].message.contains("expected ，"));
    }

    #[test]
    fn reports_unclosed_block() {
        let errors = parse("聽到 f(x) 嘅話，就 { x").expect_err("unclosed block should fail");
        assert!(errors.to_string().contains("expected 」 to close block"));
    }

    #[test]
    fn rejects_call_on_non_identifier() {
        let errors = parse("(1 + 2)(3)").expect_err("call on literal should fail");
        assert!(errors.0[0].message.contains("expected function name"));
    }

    #[test]
    fn limits_nesting_depth() {
        let input = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        let config = ParserConfig { max_nesting: 16 };
        let errors = parse_with_config(&input, config).expect_err("nesting should be limited");
        assert!(errors.0[0].message.contains("nested deeper than 16"));
        assert!(parse(&input).is_ok());
    }

    #[test]
    fn parses_pre_scanned_tokens() {
        let tokens = crate::lexer::tokenize("塞 5 入 i; i * 3");
        let (program, errors) = parse_tokens(tokens);
        assert!(errors.is_empty());
        assert_eq!(program.to_string(), "塞 5 入 i; (i * 3)");
    }
}
