use crate::{environment::prelude::ValueType, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorType {
    UnboundVariable {
        name: String,
    },
    UnknownFunction {
        name: String,
    },
    /// A value was used where a different tag is required.
    UnsupportedType {
        expected: ValueType,
        got: ValueType,
        context: String,
    },
    DivisionByZero,
    IntegerOverflow,
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    CallDepthExceeded {
        limit: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}

impl RuntimeError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            RuntimeErrorType::UnboundVariable { name } => (
                "Unbound variable",
                vec![format!("Variable `{name}` is not declared")]
            ),
            RuntimeErrorType::UnknownFunction { name } => (
                "Unknown function",
                vec![format!("Function `{name}` is not defined")]
            ),
            RuntimeErrorType::UnsupportedType { expected, got, context } => (
                "Unsupported type",
                vec![format!("{context} expects `{expected}`, but got `{got}`")]
            ),
            RuntimeErrorType::DivisionByZero => ("Division by zero", vec![]),
            RuntimeErrorType::IntegerOverflow => (
                "Integer overflow",
                vec![format!("Integers must fit between {} and {}", i64::MIN, i64::MAX)]
            ),
            RuntimeErrorType::ArityMismatch { name, expected, got } => (
                "Wrong number of arguments",
                vec![format!("Function `{name}` takes {expected} argument(s), but {got} were given")]
            ),
            RuntimeErrorType::CallDepthExceeded { limit } => (
                "Call depth exceeded",
                vec![format!("More than {limit} nested calls")]
            ),
        }
    }
}

pub fn runtime_error<T>(error: RuntimeErrorType, location: SrcSpan) -> Result<T, RuntimeError> {
    Err(RuntimeError { error, location })
}
