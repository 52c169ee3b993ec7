use crate::{lexer::prelude::{Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{parse_error, ParseError, ParseErrorType};
use super::ast::Program;

/// Nested expressions and blocks allowed before parsing gives up.
pub const MAX_NESTING_DEPTH: usize = 256;

pub trait Parse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError>;
}

pub struct Parser<T: Iterator<Item = Spanned>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,

    tokens: T,
    depth: usize,
}

impl<T: Iterator<Item = Spanned>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,

            tokens: input,
            depth: 0,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();

        self.current_token = self.next_token.take();
        self.next_token = self.tokens.next();

        t
    }

    pub fn current_is(&self, token: &Token) -> bool {
        matches!(&self.current_token, Some((_, tok, _)) if tok == token)
    }

    pub fn next_is(&self, token: &Token) -> bool {
        matches!(&self.next_token, Some((_, tok, _)) if tok == token)
    }

    /// Span of the current token, or an empty span if the input ran dry.
    pub fn current_span(&self) -> SrcSpan {
        match &self.current_token {
            Some((start, _, end)) => SrcSpan { start: *start, end: *end },
            None => SrcSpan::default(),
        }
    }

    /// Runs `inner` one nesting level deeper, failing past `MAX_NESTING_DEPTH`.
    pub fn nested<R>(
        &mut self,
        inner: impl FnOnce(&mut Self) -> Result<R, ParseError>
    ) -> Result<R, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return parse_error(
                ParseErrorType::NestingTooDeep { limit: MAX_NESTING_DEPTH },
                self.current_span()
            );
        }

        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;

        result
    }

    pub fn parse(&mut self) -> Result<Program, ParseError> {
        Program::parse(self)
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            },
            Some(t) => {
                let (start, tok, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: tok,
                        expected: vec![format!("`{}`", token.as_literal())],
                    },
                    SrcSpan { start, end }
                )
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((start, value, end))
            },
            Some(t) => {
                let (start, token, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::ExpectedIdent { token },
                    SrcSpan { start, end }
                )
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }

    /// Parses `open item {, item} close`, allowing an empty list.
    pub fn parse_delimited<I>(
        &mut self,
        open: Token,
        close: Token,
        mut item: impl FnMut(&mut Self) -> Result<I, ParseError>
    ) -> Result<(Vec<I>, SrcSpan), ParseError> {
        let (start, _) = self.expect_one(open)?;
        let mut items = vec![];

        if !self.current_is(&close) {
            items.push(item(self)?);

            while self.current_is(&Token::Comma) {
                self.step();
                items.push(item(self)?);
            }
        }

        let (_, end) = match self.expect_one(close.clone()) {
            Ok(span) => span,
            Err(ParseError { error: ParseErrorType::UnexpectedToken { token, .. }, span }) => {
                return parse_error(
                    ParseErrorType::UnexpectedToken {
                        token,
                        expected: vec!["`,`".to_string(), format!("`{}`", close.as_literal())],
                    },
                    span
                )
            },
            Err(err) => return Err(err)
        };

        Ok((items, SrcSpan { start, end }))
    }
}

pub fn parse_tokens(tokens: Vec<Spanned>) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens.into_iter());

    parser.parse()
}
