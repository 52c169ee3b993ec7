use std::collections::HashMap;
use std::rc::Rc;

use crate::parser::prelude::FunctionDefinition;

use super::prelude::Value;

/// Functions that exist before any user code runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `qoshish(a, b)` -> `a + b`
    Qoshish,
}

impl Builtin {
    pub const ALL: [Builtin; 1] = [Builtin::Qoshish];

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Qoshish => "qoshish",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Builtin::Qoshish => 2,
        }
    }

    /// Returns `None` when the result does not fit into an integer.
    /// The caller has already checked the arity.
    pub fn call(&self, args: &[i64]) -> Option<i64> {
        match self {
            Builtin::Qoshish => args[0].checked_add(args[1]),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Callable {
    UserDefined(Rc<FunctionDefinition>),
    Builtin(Builtin),
}

impl Callable {
    pub fn arity(&self) -> usize {
        match self {
            Callable::UserDefined(function) => function.parameters.len(),
            Callable::Builtin(builtin) => builtin.arity(),
        }
    }
}

pub type Frame = HashMap<String, Value>;

/// Variable frames plus the function table.
///
/// The bottom frame holds globals and is never popped. Lookups walk from the
/// innermost frame outwards, declarations always land in the innermost one.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    frames: Vec<Frame>,
    functions: HashMap<String, Callable>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        let functions = Builtin::ALL.iter()
            .map(|builtin| (builtin.name().to_string(), Callable::Builtin(*builtin)))
            .collect();

        Self {
            frames: vec![Frame::new()],
            functions,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.frames.iter()
            .rev()
            .find_map(|frame| frame.get(name))
    }

    pub fn declare(&mut self, name: String, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name, value);
        }
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop_frame(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Number of active calls.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn define_function(&mut self, name: String, callable: Callable) {
        self.functions.insert(name, callable);
    }

    pub fn function(&self, name: &str) -> Option<&Callable> {
        self.functions.get(name)
    }

    pub fn globals(&self) -> &Frame {
        &self.frames[0]
    }
}
