use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::RuntimeError,
    lexer::prelude::LexicalError,
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan,
};
use super::diagnostic::{Diagnostic, Label, Location, Phase};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to tokenize source code")]
    Lex {
        path: PathBuf,
        src: String,
        error: LexicalError
    },
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("program aborted")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        let diagnostic = self.to_diagnostic();
        diagnostic.write(buf);
        writeln!(buf).expect("write new line diagnostic");
    }

    pub fn to_diagnostic(&self) -> Diagnostic<'_> {
        match self {
            Error::Lex { path, src, error } => {
                let (label, extra) = error.details();

                spanned_diagnostic(Phase::Lexing, path, src, label, extra, error.location)
            },
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();

                let adjusted_location = if matches!(error.error, ParseErrorType::UnexpectedEof) {
                    SrcSpan {
                        start: src.len() as u32,
                        end: src.len() as u32,
                    }
                } else {
                    error.span
                };

                spanned_diagnostic(Phase::Parsing, path, src, label, extra, adjusted_location)
            },
            Error::Runtime { path, src, error } => {
                let (label, extra) = error.details();

                spanned_diagnostic(Phase::Running, path, src, label, extra, error.location)
            },
            Error::StdIo { err } => Diagnostic {
                title: "Standard IO error".into(),
                text: format!("{err}"),
                location: None,
            }
        }
    }
}

fn spanned_diagnostic<'a>(
    phase: Phase,
    path: &PathBuf,
    src: &'a str,
    label: &str,
    extra: Vec<String>,
    span: SrcSpan
) -> Diagnostic<'a> {
    Diagnostic {
        title: phase.title().into(),
        text: extra.join("\n"),
        location: Some(Location {
            src,
            path: path.clone(),
            label: Label {
                text: Some(label.to_string()),
                span,
            },
        }),
    }
}
