//! This lexer tokenizes Neander assembly source text.
use std::collections::{HashMap, VecDeque};

use once_cell::sync::Lazy;
use regex::Regex;

use super::ast::Directive;

/// The fixed instruction vocabulary, mnemonic to machine byte code.
/// The byte codes are informational (nothing is emitted here) but the
/// table is the single source of truth for what counts as an opcode.
pub static OPCODES: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
    let mut codes = HashMap::new();
    codes.insert("NOP", 0x00);
    codes.insert("STA", 0x10);
    codes.insert("LDA", 0x20);
    codes.insert("ADD", 0x30);
    codes.insert("OR", 0x40);
    codes.insert("AND", 0x50);
    codes.insert("NOT", 0x60);
    codes.insert("JMP", 0x80);
    codes.insert("JN", 0x90);
    codes.insert("JZ", 0xA0);
    codes.insert("HLT", 0xF0);
    codes
});

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

// Tokens pair a classification with the piece of source text it was
// classified from. A Section token stores the piece with its leading
// dot removed; a Define token stores the matched directive.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    Section(String),
    Define(Directive),
    Op(String),
    Num(String),
    Var(String),
    Unknown(String),
    Eof,
}

impl Token {
    /// The text this token carries, as it would appear in source.
    pub fn text(&self) -> &str {
        match self {
            Token::Section(s)
            | Token::Op(s)
            | Token::Num(s)
            | Token::Var(s)
            | Token::Unknown(s) => s,
            Token::Define(directive) => directive.keyword(),
            Token::Eof => "",
        }
    }
}

/// Classify a single whitespace-delimited piece of source text.
///
/// Classification is total and priority-ordered, first match wins:
/// section marker, directive keyword, opcode mnemonic, hex literal,
/// identifier. Anything left over is tagged Unknown and logged, never
/// rejected - rejecting is the parser's job, not the lexer's.
fn classify(piece: &str) -> Token {
    if piece.starts_with('.') {
        return Token::Section(piece[1..].to_string());
    }
    if let Some(directive) = Directive::from_keyword(piece) {
        return Token::Define(directive);
    }
    if OPCODES.contains_key(piece) {
        return Token::Op(piece.to_string());
    }
    // Optional sign, no prefix. The literal text is kept un-normalized.
    if i64::from_str_radix(piece, 16).is_ok() {
        return Token::Num(piece.to_string());
    }
    if IDENTIFIER.is_match(piece) {
        return Token::Var(piece.to_string());
    }
    warn!("unknown token: `{}`", piece);
    Token::Unknown(piece.to_string())
}

/// Tokenize a complete source text into a queue of classified tokens.
///
/// Each line is stripped of its `;` comment and split on runs of
/// whitespace; every surviving piece yields exactly one token, in
/// source order. The queue ends with a single Eof token.
pub fn tokenize(source: &str) -> VecDeque<Token> {
    let mut tokens: VecDeque<Token> = VecDeque::with_capacity(256);

    for line in source.lines() {
        let line = line.split(';').next().unwrap_or("");
        for piece in line.split_whitespace() {
            tokens.push_back(classify(piece));
        }
    }

    tokens.push_back(Token::Eof);
    tokens
}
