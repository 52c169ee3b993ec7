use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    UnterminatedString,
    IntegerTooLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                (
                    "Unrecognized character",
                    vec![format!("Don't know what to do with `{tok}` at offset {}", self.location.start)]
                )
            },
            LexicalErrorType::UnterminatedString => {
                ("Missing closing `\"` of string literal", vec![])
            },
            LexicalErrorType::IntegerTooLarge => {
                (
                    "Integer literal is too large",
                    vec![format!("Integers must fit between {} and {}", i64::MIN, i64::MAX)]
                )
            },
        }
    }
}
