use std::{io::BufReader, path::{Path, PathBuf}, rc::Rc};

use utf8_chars::BufReadCharsExt;

use crate::{
    eval::prelude::{Interpreter, OutputEmitterIO},
    lexer::prelude::{tokenize, Spanned},
    parser::prelude::{parse_tokens, Program},
    utils::prelude::Error
};

/// Default script looked up in the working directory.
pub const DEFAULT_SCRIPT: &str = "main.uzlang";

pub fn load_source(path: &Path) -> Result<String, Error> {
    let file = std::fs::File::open(path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = BufReader::new(file);

    for c in reader.chars() {
        src.push(c.map_err(|err| Error::StdIo { err: err.kind() })?);
    }

    Ok(src)
}

pub fn tokenize_source(path: &Path, src: &str) -> Result<Vec<Spanned>, Error> {
    tokenize(src).map_err(|error| Error::Lex {
        path: path.to_path_buf(),
        src: src.to_string(),
        error
    })
}

pub fn parse_source(path: &Path, src: &str) -> Result<Program, Error> {
    let tokens = tokenize_source(path, src)?;

    parse_tokens(tokens).map_err(|error| Error::Parse {
        path: path.to_path_buf(),
        src: src.to_string(),
        error
    })
}

/// Runs `program` on an existing interpreter, so that state survives between calls.
pub fn run_program(
    interpreter: &mut Interpreter,
    path: &Path,
    src: &str,
    program: &Program
) -> Result<(), Error> {
    interpreter.interpret(program).map_err(|error| Error::Runtime {
        path: path.to_path_buf(),
        src: src.to_string(),
        error
    })
}

pub fn run_source(
    path: &Path,
    src: &str,
    output: Rc<dyn OutputEmitterIO>
) -> Result<(), Error> {
    let program = parse_source(path, src)?;
    let mut interpreter = Interpreter::new(output);

    run_program(&mut interpreter, path, src, &program)
}

pub fn run_file(path: PathBuf, output: Rc<dyn OutputEmitterIO>) -> Result<(), Error> {
    let src = load_source(&path)?;

    run_source(&path, &src, output)
}
