use std::io::Write;

use uzlang_core::lexer::prelude::{Lexer, Token};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::new();

		print!("{PROMPT}");
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		let input = input.trim_end_matches(['\n', '\r']);

		match input {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));

				for res in lexer {
					match res {
						Ok((start, token, end)) => {
							println!("{start}..{end}\t{token:?}");

							if token == Token::Eof {
								break;
							}
						},
						Err(err) => {
							let (message, notes) = err.details();
							println!("[at {}] Lexical error: {message}", err.location.start);
							if !notes.is_empty() {
								println!("{}", notes.join("\n"));
							}
							break;
						}
					}
				}
			}
		}
	}
}
