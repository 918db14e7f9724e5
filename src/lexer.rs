use std::{iter::Peekable, str::CharIndices};

use crate::token::{Span, Token, TokenKind, lookup_keyword, lookup_symbol};

/// Runes that may never appear inside an identifier, on top of whitespace,
/// ASCII digits and the symbol runes.
const IDENTIFIER_BLACKLIST: &[char] = &['!', '@', '#', '$', '%', '^', '&'];

pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    offset: usize,
    eof_reached: bool,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            offset: 0,
            eof_reached: false,
            line: 1,
            column: 0,
        }
    }

    /// Produces the next token. Once the input is exhausted every further call
    /// yields an end-of-file token with an empty literal.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let (start_idx, ch) = match self.chars.peek() {
            Some(&(idx, c)) => (idx, c),
            None => {
                self.eof_reached = true;
                let index = self.input.len();
                return Token::new(
                    TokenKind::Eof,
                    "",
                    self.span_from(index, self.line, self.column),
                );
            }
        };

        let start_line = self.line;
        let start_column = self.column;

        if ch == '/' && self.peek_second() == Some('/') {
            return self.read_comment(start_idx, start_line, start_column);
        }

        if let Some(kind) = lookup_symbol(ch) {
            self.advance_char();
            return Token::new(
                kind,
                ch.to_string(),
                self.span_from(start_idx, start_line, start_column),
            );
        }

        if ch.is_ascii_digit() {
            return self.read_number(start_idx, start_line, start_column);
        }

        if let Some(closing) = closing_quote(ch) {
            return match closing {
                Some(closing) => self.read_string(closing, start_idx, start_line, start_column),
                None => {
                    self.advance_char();
                    Token::new(
                        TokenKind::Invalid,
                        ch.to_string(),
                        self.span_from(start_idx, start_line, start_column),
                    )
                }
            };
        }

        if is_allowed_in_identifier(ch) {
            return self.read_identifier(start_idx, start_line, start_column);
        }

        self.advance_char();
        Token::new(
            TokenKind::Invalid,
            ch.to_string(),
            self.span_from(start_idx, start_line, start_column),
        )
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.advance_char();
            } else {
                break;
            }
        }
    }

    fn read_comment(&mut self, start: usize, line: usize, column: usize) -> Token {
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.advance_char();
        }
        Token::new(TokenKind::Comment, "", self.span_from(start, line, column))
    }

    fn read_number(&mut self, start: usize, line: usize, column: usize) -> Token {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                self.advance_char();
            } else {
                break;
            }
        }
        let end_idx = self.offset;
        Token::new(
            TokenKind::Number,
            &self.input[start..end_idx],
            self.span_from(start, line, column),
        )
    }

    fn read_string(&mut self, closing: char, start: usize, line: usize, column: usize) -> Token {
        self.advance_char(); // Consume opening quote
        let content_start = self.offset;
        while let Some(&(idx, c)) = self.chars.peek() {
            if c == closing {
                self.advance_char();
                return Token::new(
                    TokenKind::String,
                    &self.input[content_start..idx],
                    self.span_from(start, line, column),
                );
            }
            self.advance_char();
        }
        // Unterminated strings keep whatever text was read.
        Token::new(
            TokenKind::String,
            &self.input[content_start..],
            self.span_from(start, line, column),
        )
    }

    fn read_identifier(&mut self, start: usize, line: usize, column: usize) -> Token {
        while let Some(&(_, c)) = self.chars.peek() {
            if is_allowed_in_identifier(c) {
                self.advance_char();
            } else {
                break;
            }
        }

        let end_idx = self.offset;
        let word = &self.input[start..end_idx];
        let kind = lookup_keyword(word).unwrap_or(TokenKind::Identifier);
        Token::new(kind, word, self.span_from(start, line, column))
    }
}

impl<'a> Lexer<'a> {
    fn advance_char(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((idx, c)) = next {
            self.offset = idx + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        next
    }

    fn peek_second(&self) -> Option<char> {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        lookahead.peek().map(|&(_, c)| c)
    }

    fn span_from(&self, start: usize, line: usize, column: usize) -> Span {
        Span {
            start,
            end: self.offset,
            line,
            column,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof_reached {
            return None;
        }
        Some(self.next_token())
    }
}

/// `Some(Some(close))` for an opening quote, `Some(None)` for a closing quote
/// that has no opener of its own.
fn closing_quote(ch: char) -> Option<Option<char>> {
    match ch {
        '"' => Some(Some('"')),
        '“' => Some(Some('”')),
        '”' => Some(None),
        _ => None,
    }
}

fn is_allowed_in_identifier(ch: char) -> bool {
    !ch.is_whitespace()
        && !ch.is_ascii_digit()
        && !IDENTIFIER_BLACKLIST.contains(&ch)
        && lookup_symbol(ch).is_none()
}

/// Scans the whole input, including the trailing end-of-file token.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn kinds_and_literals(input: &str) -> Vec<(TokenKind, String)> {
        tokenize(input)
            .into_iter()
            .map(|token| (token.kind, token.literal))
            .collect()
    }

    fn pair(kind: TokenKind, literal: &str) -> (TokenKind, String) {
        (kind, literal.to_string())
    }

    #[test]
    fn test_simple_program() {
        let input = indoc! {"
            // initialize
            叫佢 i。

            當 （i 細過 8） 時，就「
                講（i）。
                塞 i + 1 入 i。
            」

            a 大D。
        "};
        let expected = vec![
            pair(TokenKind::Comment, ""),
            pair(TokenKind::Initialize, "叫佢"),
            pair(TokenKind::Identifier, "i"),
            pair(TokenKind::EndOfStatement, "。"),
            pair(TokenKind::While, "當"),
            pair(TokenKind::OpenParen, "（"),
            pair(TokenKind::Identifier, "i"),
            pair(TokenKind::LessThan, "細過"),
            pair(TokenKind::Number, "8"),
            pair(TokenKind::CloseParen, "）"),
            pair(TokenKind::Si, "時"),
            pair(TokenKind::Comma, "，"),
            pair(TokenKind::Then, "就"),
            pair(TokenKind::OpenBrace, "「"),
            pair(TokenKind::Identifier, "講"),
            pair(TokenKind::OpenParen, "（"),
            pair(TokenKind::Identifier, "i"),
            pair(TokenKind::CloseParen, "）"),
            pair(TokenKind::EndOfStatement, "。"),
            pair(TokenKind::Assign, "塞"),
            pair(TokenKind::Identifier, "i"),
            pair(TokenKind::Plus, "+"),
            pair(TokenKind::Number, "1"),
            pair(TokenKind::Into, "入"),
            pair(TokenKind::Identifier, "i"),
            pair(TokenKind::EndOfStatement, "。"),
            pair(TokenKind::CloseBrace, "」"),
            pair(TokenKind::Identifier, "a"),
            pair(TokenKind::Increment, "大D"),
            pair(TokenKind::EndOfStatement, "。"),
            pair(TokenKind::Eof, ""),
        ];

        assert_eq!(kinds_and_literals(input), expected);
    }

    #[test]
    fn skips_unicode_whitespace() {
        assert_eq!(
            kinds_and_literals("塞\u{3000}1\u{3000}入\u{00A0}x"),
            vec![
                pair(TokenKind::Assign, "塞"),
                pair(TokenKind::Number, "1"),
                pair(TokenKind::Into, "入"),
                pair(TokenKind::Identifier, "x"),
                pair(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn keywords_match_whole_identifiers_only() {
        assert_eq!(
            kinds_and_literals("唔係就 唔係 唔係啱 就"),
            vec![
                pair(TokenKind::Else, "唔係就"),
                pair(TokenKind::Not, "唔係"),
                pair(TokenKind::Identifier, "唔係啱"),
                pair(TokenKind::Then, "就"),
                pair(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn symbols_and_digits_split_identifiers() {
        assert_eq!(
            kinds_and_literals("嘅話，就 x1加y"),
            vec![
                pair(TokenKind::Gewa, "嘅話"),
                pair(TokenKind::Comma, "，"),
                pair(TokenKind::Then, "就"),
                pair(TokenKind::Identifier, "x"),
                pair(TokenKind::Number, "1"),
                pair(TokenKind::Plus, "加"),
                pair(TokenKind::Identifier, "y"),
                pair(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn reads_both_quote_styles() {
        assert_eq!(
            kinds_and_literals(r#""hello world" “塞 塞 塞”"#),
            vec![
                pair(TokenKind::String, "hello world"),
                pair(TokenKind::String, "塞 塞 塞"),
                pair(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn unterminated_string_returns_partial_text() {
        assert_eq!(
            kinds_and_literals("\"abc"),
            vec![pair(TokenKind::String, "abc"), pair(TokenKind::Eof, "")]
        );
    }

    #[test]
    fn lone_closing_quote_is_invalid() {
        assert_eq!(
            kinds_and_literals("” 1"),
            vec![
                pair(TokenKind::Invalid, "”"),
                pair(TokenKind::Number, "1"),
                pair(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn blacklisted_rune_is_invalid() {
        assert_eq!(
            kinds_and_literals("x @ y"),
            vec![
                pair(TokenKind::Identifier, "x"),
                pair(TokenKind::Invalid, "@"),
                pair(TokenKind::Identifier, "y"),
                pair(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn comment_at_end_of_input_terminates() {
        assert_eq!(
            kinds_and_literals("1 // trailing"),
            vec![
                pair(TokenKind::Number, "1"),
                pair(TokenKind::Comment, ""),
                pair(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn single_slash_is_division() {
        assert_eq!(
            kinds_and_literals("6/3"),
            vec![
                pair(TokenKind::Number, "6"),
                pair(TokenKind::Slash, "/"),
                pair(TokenKind::Number, "3"),
                pair(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = tokenize("塞 1\n入 x");
        let into = tokens
            .iter()
            .find(|token| token.kind == TokenKind::Into)
            .expect("missing 入 token");
        assert_eq!(into.span.line, 2);
        assert_eq!(into.span.column, 0);
    }

    #[test]
    fn keeps_returning_eof() {
        let mut lexer = Lexer::new("");
        assert!(lexer.next_token().is(TokenKind::Eof));
        assert!(lexer.next_token().is(TokenKind::Eof));
    }
}
