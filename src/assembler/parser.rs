//! The Parser module takes a token stream (VecDeque<Token>) from the
//! lexer and structures it into an instruction list and a variable
//! table.
//!
//! The cursor only ever moves forward; the single exception is a
//! one-token peek used to decide whether a mnemonic has an operand.
//! Parsing fails fast: the first error aborts the pass and no partial
//! instruction or variable state escapes.
use std::collections::VecDeque;

use indexmap::IndexMap;

use super::ast::{Address, Instruction, Program, Variable};
use super::error::Error;
use super::lexer::Token;

pub struct Parser {
    tokens: VecDeque<Token>,
    instructions: Vec<Instruction>,
    variables: IndexMap<String, Variable>,
}

impl Parser {
    pub fn new(tokens: VecDeque<Token>) -> Self {
        Parser {
            tokens,
            instructions: Vec::new(),
            variables: IndexMap::new(),
        }
    }

    /// Run the parser, consuming itself and returning the parsed
    /// program. Dispatches on each token in turn until the queue is
    /// exhausted; the Eof token itself is inert.
    pub fn run(mut self) -> Result<Program, Error> {
        while let Some(token) = self.consume() {
            match token {
                Token::Op(opcode) => self.instruction(opcode),
                Token::Var(name) => self.variable(name)?,
                // Section markers are recognized but carry no structure.
                Token::Section(_) => {}
                Token::Eof => {}
                other => {
                    return Err(Error::UnexpectedToken(other.text().to_string()));
                }
            }
        }

        Ok(Program {
            instructions: self.instructions,
            variables: self.variables,
        })
    }

    /// Consumes an instruction's operand, if the next token can be
    /// one. A mnemonic followed by anything but a number or a variable
    /// name stands alone, and the non-matching token stays put.
    fn instruction(&mut self, opcode: String) {
        let operand = match self.peek() {
            Some(Token::Num(_)) | Some(Token::Var(_)) => {
                self.consume().map(|token| token.text().to_string())
            }
            _ => None,
        };

        self.instructions.push(Instruction { opcode, operand });
    }

    /// Parses `NAME <directive> <value>` into a variable table entry.
    /// Redeclaring a name overwrites the earlier entry in place.
    fn variable(&mut self, name: String) -> Result<(), Error> {
        let directive = match self.consume() {
            Some(Token::Define(directive)) => directive,
            _ => return Err(Error::MissingDefine(name)),
        };

        let value = match self.consume() {
            None | Some(Token::Eof) => return Err(Error::MissingValue(directive)),
            Some(Token::Num(text)) => match Address::from_str_radix(&text, 16) {
                Ok(value) => value,
                Err(_) => return Err(Error::InvalidValue { directive, text }),
            },
            Some(other) => {
                return Err(Error::InvalidValue {
                    directive,
                    text: other.text().to_string(),
                });
            }
        };

        let variable = Variable {
            name: name.clone(),
            value,
            kind: directive,
        };
        self.variables.insert(name, variable);
        Ok(())
    }

    /// Pops a token off the input stream and returns it.
    /// Returns None if no tokens are left.
    #[inline]
    fn consume(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Looks at the next token without consuming it.
    #[inline]
    fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }
}

#[cfg(test)]
mod tests {
    use super::super::ast::Directive;
    use super::super::lexer::tokenize;
    use super::*;

    fn parse(src: &str) -> Result<Program, Error> {
        Parser::new(tokenize(src)).run()
    }

    #[test]
    fn test_parse_instructions() {
        let program = parse("LDA X\nADD 0A\nHLT").unwrap();
        assert_eq!(
            program.instructions,
            vec![
                Instruction {
                    opcode: "LDA".to_owned(),
                    operand: Some("X".to_owned()),
                },
                Instruction {
                    opcode: "ADD".to_owned(),
                    operand: Some("0A".to_owned()),
                },
                Instruction {
                    opcode: "HLT".to_owned(),
                    operand: None,
                },
            ]
        );
        assert!(program.variables.is_empty());
    }

    #[test]
    fn test_bare_instruction_leaves_next_token() {
        // `STA` with no operand must not swallow the following token.
        let tokens = VecDeque::from(vec![Token::Section("DATA".to_owned())]);
        let mut parser = Parser::new(tokens);
        parser.instruction("STA".to_owned());

        assert_eq!(
            parser.instructions,
            vec![Instruction {
                opcode: "STA".to_owned(),
                operand: None,
            }]
        );
        assert_eq!(parser.peek(), Some(&Token::Section("DATA".to_owned())));
    }

    #[test]
    fn test_operand_stops_at_eof() {
        let program = parse("STA").unwrap();
        assert_eq!(
            program.instructions,
            vec![Instruction {
                opcode: "STA".to_owned(),
                operand: None,
            }]
        );
    }

    #[test]
    fn test_parse_variables() {
        let program = parse("X DS 05").unwrap();
        assert_eq!(
            program.variables.get("X"),
            Some(&Variable {
                name: "X".to_owned(),
                value: 0x05,
                kind: Directive::DS,
            })
        );

        let program = parse("X DB 05").unwrap();
        assert_eq!(
            program.variables.get("X"),
            Some(&Variable {
                name: "X".to_owned(),
                value: 0x05,
                kind: Directive::DB,
            })
        );

        let program = parse("A EQU 0A\nB ORG FF").unwrap();
        assert_eq!(program.variables["A"].kind, Directive::EQU);
        assert_eq!(program.variables["A"].value, 0x0A);
        assert_eq!(program.variables["B"].kind, Directive::ORG);
        assert_eq!(program.variables["B"].value, 0xFF);
    }

    #[test]
    fn test_redeclaration_overwrites() {
        let program = parse("X DB 01\nLDA X\nX DB 02").unwrap();
        assert_eq!(program.variables.len(), 1);
        assert_eq!(program.variables["X"].value, 0x02);
        assert_eq!(program.variables["X"].kind, Directive::DB);
    }

    #[test]
    fn test_variable_order_is_declaration_order() {
        let program = parse("B DS 00\nA DS 00\nC DB 01").unwrap();
        let names: Vec<&str> = program.variables.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_sections_are_inert() {
        let program = parse(".DATA\n.CODE\nNOP").unwrap();
        assert_eq!(program.instructions.len(), 1);
        assert!(program.variables.is_empty());
    }

    #[test]
    fn test_unexpected_token() {
        let err = parse("@@@").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken(ref text) if text == "@@@"));

        // A number with nothing to attach to is just as unexpected.
        let err = parse("05").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken(ref text) if text == "05"));

        let err = parse("DB").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken(ref text) if text == "DB"));
    }

    #[test]
    fn test_missing_define() {
        let err = parse("X").unwrap_err();
        assert!(matches!(err, Error::MissingDefine(ref name) if name == "X"));

        let err = parse("X LDA").unwrap_err();
        assert!(matches!(err, Error::MissingDefine(ref name) if name == "X"));
    }

    #[test]
    fn test_missing_value() {
        let err = parse("X DB").unwrap_err();
        assert!(matches!(err, Error::MissingValue(Directive::DB)));

        let err = parse("X DS ; no value").unwrap_err();
        assert!(matches!(err, Error::MissingValue(Directive::DS)));
    }

    #[test]
    fn test_invalid_value() {
        // `ZZ` lexes as a variable name, not a number.
        let err = parse("X DB ZZ").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidValue { directive: Directive::DB, ref text } if text == "ZZ"
        ));

        // Numeric but too wide for an address byte.
        let err = parse("X DB 1FF").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidValue { directive: Directive::DB, ref text } if text == "1FF"
        ));

        // Negative literals lex as numbers but are not valid values.
        let err = parse("X DB -1").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidValue { directive: Directive::DB, ref text } if text == "-1"
        ));
    }

    #[test]
    fn test_first_error_aborts() {
        // Valid prefix, then garbage: the whole parse is rejected.
        assert!(parse("LDA X\nX DB 05\n@@@").is_err());
    }
}
