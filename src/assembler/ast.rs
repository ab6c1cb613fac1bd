//! Parsed representation of a Neander assembly file.
//!
//! Execution begins with the first instruction in the file.
//! Comments are prefixed with semicolons (;) and are single-line only.
//! Pieces on a line are delimited by runs of whitespace; line breaks
//! carry no meaning beyond ending a comment.
//!
//! Supported Instructions:
//!
//! ```nasm
//! NOP       ; no-op
//! STA addr  ; MEM(addr) <= ACC
//! LDA addr  ; ACC <= MEM(addr)
//! ADD addr  ; ACC <= ACC + MEM(addr)
//! OR  addr  ; ACC <= ACC | MEM(addr)
//! AND addr  ; ACC <= ACC & MEM(addr)
//! NOT       ; ACC <= ~ACC
//! JMP addr  ; unconditional jump
//! JN  addr  ; jump if ACC is negative
//! JZ  addr  ; jump if ACC is zero
//! HLT       ; halt
//! ```
//!
//! Variables are declared as `NAME DIRECTIVE VALUE`, all values in
//! base 16. Example source file:
//!
//! ```nasm
//! .DATA
//! X   DB  05  ; a byte with an explicit initial value
//! TMP DS  00  ; reserved storage, placed after the code at resolution
//! TEN EQU 0A
//!
//! .CODE
//! LDA X
//! ADD TEN
//! STA TMP     ; TMP's operand becomes its assigned address
//! HLT
//! ```

use std::fmt;

use indexmap::IndexMap;

/// Memory addresses on the target machine are a single byte wide.
pub type Address = u8;

/// A variable declaration keyword. `DB`, `EQU` and `ORG` carry an
/// explicit literal from source; `DS` reserves uninitialized storage
/// and is assigned an address by the resolver instead.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Directive {
    DB,
    DS,
    EQU,
    ORG,
}

impl Directive {
    /// Matches a source piece against the directive keywords.
    /// Keywords are case-sensitive.
    pub fn from_keyword(piece: &str) -> Option<Directive> {
        match piece {
            "DB" => Some(Directive::DB),
            "DS" => Some(Directive::DS),
            "EQU" => Some(Directive::EQU),
            "ORG" => Some(Directive::ORG),
            _ => None,
        }
    }

    /// The keyword as spelled in source.
    pub fn keyword(&self) -> &'static str {
        match self {
            Directive::DB => "DB",
            Directive::DS => "DS",
            Directive::EQU => "EQU",
            Directive::ORG => "ORG",
        }
    }

    /// Whether the declared variable is uninitialized storage whose
    /// address is picked during symbol resolution.
    pub fn reserves_storage(&self) -> bool {
        match self {
            Directive::DS => true,
            _ => false,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A single instruction: a recognized mnemonic and, optionally, the
/// literal text of its operand. The operand is either a numeric
/// literal or a variable name until resolution rewrites the latter.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub opcode: String,
    pub operand: Option<String>,
}

/// A declared variable. `value` holds the parsed literal until the
/// resolver overwrites it for `DS` variables.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Variable {
    pub name: String,
    pub value: Address,
    pub kind: Directive,
}

/// A successfully parsed program: the instruction list in source order
/// and the variable table in declaration order. Produced by the parser,
/// then mutated exactly once by the resolver.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    pub variables: IndexMap<String, Variable>,
}
