mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::{path::PathBuf, rc::Rc, time::Instant};

use clap::Parser;
use cli::{print_failed, print_finished, print_running};
use uzlang_core::{
    eval::prelude::{Interpreter, OutputEmitterIO},
    runner::{load_source, parse_source, run_program, tokenize_source, DEFAULT_SCRIPT},
    utils::prelude::Error
};

#[derive(Parser)]
enum Command {
    /// Lexes, parses and runs a script
    Run {
        /// Path of source file
        #[arg(default_value = DEFAULT_SCRIPT)]
        path: PathBuf,
        /// Print the token list before running
        #[arg(long, default_value_t = false)]
        print_tokens: bool,
        /// Print the parsed source code before running
        #[arg(long, default_value_t = false)]
        print_ast: bool,
        /// Print the ast structure before running
        #[arg(long, default_value_t = false)]
        debug_ast: bool,
        /// Do not print status lines
        #[arg(short, long, default_value_t = false)]
        quiet: bool,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl,
    /// Runs Read Eval Print Loop
    Repl
}

fn main() {
    match Command::parse() {
        Command::Run { path, print_tokens, print_ast, debug_ast, quiet } => {
            if !quiet {
                print_running(&path.display().to_string());
            }
            let start = Instant::now();

            let options = RunOptions { print_tokens, print_ast, debug_ast };

            match run(path, options) {
                Ok(()) => {
                    if !quiet {
                        print_finished(Instant::now() - start);
                    }
                },
                Err(err) => {
                    print_error(&err);

                    if !quiet {
                        print_failed(Instant::now() - start);
                    }
                    std::process::exit(1);
                }
            }
        },
        Command::Rlpl => {
            let _ = rlpl::start();
        },
        Command::Rppl => {
            let _ = rppl::start();
        },
        Command::Repl => {
            let _ = repl::start();
        }
    };
}

struct RunOptions {
    print_tokens: bool,
    print_ast: bool,
    debug_ast: bool,
}

fn run(path: PathBuf, options: RunOptions) -> Result<(), Error> {
    let src = load_source(&path)?;

    if options.print_tokens {
        for (_, token, _) in tokenize_source(&path, &src)? {
            println!("{token:?}");
        }
    }

    let program = parse_source(&path, &src)?;

    if options.debug_ast {
        println!("{program:#?}");
    } else if options.print_ast {
        println!("{program}");
    }

    let mut interpreter = Interpreter::new(Rc::new(ConsoleOutputEmitter));

    run_program(&mut interpreter, &path, &src, &program)
}

pub(crate) fn print_error(err: &Error) {
    let buf_writer = cli::stderr_buffer_writer();
    let mut buf = buf_writer.buffer();

    err.pretty(&mut buf);
    buf_writer
        .print(&buf)
        .expect("Writing error to stderr");
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleOutputEmitter;

impl OutputEmitterIO for ConsoleOutputEmitter {
    fn emit_line(&self, line: String) {
        println!("{line}");
    }
}
