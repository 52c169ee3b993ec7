use std::io::Write;

use uzlang_core::{lexer::prelude::tokenize, parser::prelude::parse_tokens};

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
				let tokens = match tokenize(input) {
					Ok(tokens) => tokens,
					Err(err) => {
						let (message, notes) = err.details();
						println!("Lexical error: {message}.\n\t{}", notes.join(";\n\t"));
						continue;
					}
				};

				match parse_tokens(tokens) {
					Ok(program) => {
						println!("{program}");
					},
					Err(err) => {
						let (message, notes) = err.details();
						println!("Parse error: {message}.\n\t{}", notes.join(";\n\t"))
					}
				}
			}
		}
	}
}
