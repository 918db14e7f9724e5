use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Comment,
    Invalid,
    Number,
    String,
    Identifier,
    True,
    False,

    // Delimiters
    OpenParen,    // ( （
    CloseParen,   // ) ）
    OpenBrace,    // { 「
    CloseBrace,   // } 」
    OpenBracket,  // [ 【
    CloseBracket, // ] 】
    EndOfStatement, // ; 。
    Comma,        // , ，

    // Operators
    Plus,        // + 加
    Minus,       // - 減
    Star,        // * 乘
    Slash,       // / 除
    EqualTo,     // 係
    LessThan,    // 細過
    GreaterThan, // 大過
    And,         // 同埋
    Or,          // 或者
    Not,         // 唔係

    // Keywords
    Initialize, // 叫佢
    Assign,     // 塞
    Into,       // 入
    If,         // 如果
    Else,       // 唔係就
    Gewa,       // 嘅話
    Then,       // 就
    While,      // 當
    Si,         // 時
    Function,   // 聽到
    Return,     // 俾我
    Increment,  // 大D
    Decrement,  // 細D
}

impl TokenKind {
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of file",
            TokenKind::Comment => "comment",
            TokenKind::Invalid => "invalid token",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::True => "啱",
            TokenKind::False => "錯",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::EndOfStatement => "。",
            TokenKind::Comma => "，",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::EqualTo => "係",
            TokenKind::LessThan => "細過",
            TokenKind::GreaterThan => "大過",
            TokenKind::And => "同埋",
            TokenKind::Or => "或者",
            TokenKind::Not => "唔係",
            TokenKind::Initialize => "叫佢",
            TokenKind::Assign => "塞",
            TokenKind::Into => "入",
            TokenKind::If => "如果",
            TokenKind::Else => "唔係就",
            TokenKind::Gewa => "嘅話",
            TokenKind::Then => "就",
            TokenKind::While => "當",
            TokenKind::Si => "時",
            TokenKind::Function => "聽到",
            TokenKind::Return => "俾我",
            TokenKind::Increment => "大D",
            TokenKind::Decrement => "細D",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Single-rune punctuation and operators. A rune listed here always forms a
/// token on its own and can never appear inside an identifier.
pub fn lookup_symbol(ch: char) -> Option<TokenKind> {
    let kind = match ch {
        '(' | '（' => TokenKind::OpenParen,
        ')' | '）' => TokenKind::CloseParen,
        '{' | '「' => TokenKind::OpenBrace,
        '}' | '」' => TokenKind::CloseBrace,
        '[' | '【' => TokenKind::OpenBracket,
        ']' | '】' => TokenKind::CloseBracket,
        ';' | '。' => TokenKind::EndOfStatement,
        ',' | '，' => TokenKind::Comma,
        '+' | '加' => TokenKind::Plus,
        '-' | '減' => TokenKind::Minus,
        '*' | '乘' => TokenKind::Star,
        '/' | '除' => TokenKind::Slash,
        _ => return None,
    };
    Some(kind)
}

/// Whole-word keyword lookup against a fully scanned identifier.
pub fn lookup_keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "係" => TokenKind::EqualTo,
        "細過" => TokenKind::LessThan,
        "大過" => TokenKind::GreaterThan,
        "同埋" => TokenKind::And,
        "或者" => TokenKind::Or,
        "唔係" => TokenKind::Not,
        "如果" => TokenKind::If,
        "唔係就" => TokenKind::Else,
        "嘅話" => TokenKind::Gewa,
        "大D" => TokenKind::Increment,
        "細D" => TokenKind::Decrement,
        "叫佢" => TokenKind::Initialize,
        "就" => TokenKind::Then,
        "當" => TokenKind::While,
        "時" => TokenKind::Si,
        "塞" => TokenKind::Assign,
        "入" => TokenKind::Into,
        "聽到" => TokenKind::Function,
        "俾我" => TokenKind::Return,
        "啱" => TokenKind::True,
        "錯" => TokenKind::False,
        _ => return None,
    };
    Some(kind)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    /// Token that did not come from source text, used when building nodes by hand.
    pub fn synthetic(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self::new(kind, literal, Span::default())
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of file"),
            TokenKind::Comment => f.write_str("comment"),
            _ => write!(f, "'{}' ({:?})", self.literal, self.kind),
        }
    }
}
