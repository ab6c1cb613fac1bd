//! Everything that can abort an assembly run.
//!
//! The lexer never fails; unrecognized pieces become `Unknown` tokens
//! and the parser decides their fate. Every error here is fatal: the
//! caller gets no instruction or variable output alongside it.

use thiserror::Error;

use super::ast::Directive;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to read source file `{path}`: {source}")]
    UnreadableSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected token: `{0}`")]
    UnexpectedToken(String),

    #[error("expected DB, DS, EQU or ORG after variable name `{0}`")]
    MissingDefine(String),

    #[error("expected a value after {0}")]
    MissingValue(Directive),

    #[error("invalid value after {directive}: `{text}` is not an 8-bit hex number")]
    InvalidValue { directive: Directive, text: String },
}
