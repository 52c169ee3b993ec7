use std::{io::Write, path::PathBuf, rc::Rc};

use uzlang_core::{
	eval::prelude::Interpreter,
	runner::{parse_source, run_program}
};

use crate::{cli::print_warning, print_error, ConsoleOutputEmitter};

const PROMPT: &str = ">> ";
const FAREWELL: &str = "Xayr!";

/// Ctrl-C says goodbye and ends the process.
fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
	ctrlc::set_handler(|| {
		println!("\n{FAREWELL}");
		std::process::exit(0);
	})
}

/// Every line runs on the same interpreter, so declarations persist.
pub fn start() -> std::io::Result<()> {
	if let Err(err) = install_interrupt_handler() {
		print_warning(&format!("Ctrl-C handler not installed: {err}"));
	}

	let stdin = std::io::stdin();
	let path = PathBuf::from("<repl>");
	let mut interpreter = Interpreter::new(Rc::new(ConsoleOutputEmitter));

	loop {
		let mut input = String::new();

		print!("{PROMPT}");
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			println!("{FAREWELL}");
			return Ok(());
		}

		let input = input.trim_end_matches(['\n', '\r']);

		match input {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let result = parse_source(&path, input)
					.and_then(|program| run_program(&mut interpreter, &path, input, &program));

				if let Err(err) = result {
					print_error(&err);
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::install_interrupt_handler;

	#[test]
	fn test_second_handler_is_reported() {
		assert!(install_interrupt_handler().is_ok());
		assert!(matches!(install_interrupt_handler(), Err(ctrlc::Error::MultipleHandlers)));
	}
}
