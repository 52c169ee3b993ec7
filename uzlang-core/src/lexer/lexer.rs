use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use std::fmt::Display;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"soni" => Token::Var,
		"chop" => Token::Print,
		"agar" => Token::If,
		"aks" => Token::Else,
		"funksiya" => Token::Function,
		"qaytar" => Token::Return,

		_ => return None
	})
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	ch: Option<(u32, char)>,
	next_ch: Option<(u32, char)>,
	// offset right after the last consumed char
	end: u32,
	input: T,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.offset(), self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(mut input: T) -> Self {
		let ch = input.next();
		let next_ch = input.next();

		Self {
			ch,
			next_ch,
			end: 0,
			input,
		}
	}

	pub fn next_token(&mut self) -> LexResult {
		while matches!(self.current_char(), Some('\n' | ' ' | '\t' | '\x0C' | '\r')) {
			self.next_char();
		}

		let ch = match self.current_char() {
			Some(ch) => ch,
			None => {
				let end = self.offset();
				return Ok((end, Token::Eof, end));
			}
		};

		let span = match ch {
			'"' => return self.lex_string(),
			'+' => self.eat_one_char(Token::Plus),
			'-' => self.eat_one_char(Token::Minus),
			'*' => self.eat_one_char(Token::Mult),
			'/' => self.eat_one_char(Token::Div),
			'(' => self.eat_one_char(Token::LParen),
			')' => self.eat_one_char(Token::RParen),
			'{' => self.eat_one_char(Token::LBrace),
			'}' => self.eat_one_char(Token::RBrace),
			'[' => self.eat_one_char(Token::LSBracket),
			']' => self.eat_one_char(Token::RSBracket),
			',' => self.eat_one_char(Token::Comma),
			';' => self.eat_one_char(Token::Semicolon),
			'=' => self.eat_with_equals(Token::Assign, Token::Equal),
			'<' => self.eat_with_equals(Token::LessThan, Token::LessThanOrEqual),
			'>' => self.eat_with_equals(Token::GreaterThan, Token::GreaterThanOrEqual),
			'!' if self.peek_char() == Some('=') => self.eat_two_chars(Token::NotEqual),
			'0'..='9' => return self.lex_number(),
			c if c.is_alphabetic() || c == '_' => self.lex_ident(),
			c => {
				let location = self.offset();
				return Err(LexicalError {
					error: LexicalErrorType::UnrecognizedToken { tok: c },
					location: SrcSpan::from(location, location + c.len_utf8() as u32),
				});
			}
		};

		Ok(span)
	}

	fn current_char(&self) -> Option<char> {
		self.ch.map(|(_, ch)| ch)
	}

	fn peek_char(&self) -> Option<char> {
		self.next_ch.map(|(_, ch)| ch)
	}

	fn offset(&self) -> u32 {
		match self.ch {
			Some((pos, _)) => pos,
			None => self.end,
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let current = self.ch.take();

		if let Some((pos, ch)) = current {
			self.end = pos + ch.len_utf8() as u32;
		}

		self.ch = self.next_ch.take();
		self.next_ch = self.input.next();

		current.map(|(_, ch)| ch)
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.offset();
		self.next_char();
		let end_pos = self.offset();

		(start_pos, token, end_pos)
	}

	fn eat_two_chars(&mut self, token: Token) -> Spanned {
		let start_pos = self.offset();
		self.next_char();
		self.next_char();
		let end_pos = self.offset();

		(start_pos, token, end_pos)
	}

	fn eat_with_equals(&mut self, single: Token, with_equals: Token) -> Spanned {
		if self.peek_char() == Some('=') {
			self.eat_two_chars(with_equals)
		} else {
			self.eat_one_char(single)
		}
	}

	fn lex_ident(&mut self) -> Spanned {
		let start_pos = self.offset();
		let mut ident = String::new();

		while let Some(ch) = self.current_char() {
			if !(ch.is_alphanumeric() || ch == '_') {
				break;
			}

			ident.push(ch);
			self.next_char();
		}

		let end_pos = self.offset();

		match str_to_keyword(&ident) {
			Some(tok) => (start_pos, tok, end_pos),
			None => (start_pos, Token::Ident(ident), end_pos)
		}
	}

	fn lex_number(&mut self) -> LexResult {
		let start_pos = self.offset();
		let mut value = String::new();

		while let Some(ch) = self.current_char() {
			if !ch.is_ascii_digit() {
				break;
			}

			value.push(ch);
			self.next_char();
		}

		let end_pos = self.offset();

		match value.parse::<i64>() {
			Ok(value) => Ok((start_pos, Token::Int(value), end_pos)),
			Err(_) => Err(LexicalError {
				error: LexicalErrorType::IntegerTooLarge,
				location: SrcSpan::from(start_pos, end_pos)
			})
		}
	}

	fn lex_string(&mut self) -> LexResult {
		let start_pos = self.offset();
		let mut value = String::new();

		self.next_char(); // skip opening quote

		loop {
			match self.next_char() {
				Some('"') => break,
				Some(ch) => value.push(ch),
				None => return Err(LexicalError {
					error: LexicalErrorType::UnterminatedString,
					location: SrcSpan::from(start_pos, self.offset())
				})
			}
		}

		let end_pos = self.offset();

		Ok((start_pos, Token::Str(value), end_pos))
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		let token = self.next_token();

		Some(token)
	}
}

/// Pulls tokens until `Eof`. The returned list always ends with `Eof`.
pub fn tokenize(src: &str) -> Result<Vec<Spanned>, LexicalError> {
	let mut lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
	let mut tokens = vec![];

	loop {
		let spanned = lexer.next_token()?;
		let is_eof = spanned.1 == Token::Eof;

		tokens.push(spanned);

		if is_eof {
			return Ok(tokens);
		}
	}
}
