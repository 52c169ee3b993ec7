pub mod error;
pub mod output;

pub mod prelude {
    pub use super::{
        error::*,
        output::*,
        Flow,
        Interpreter,
        MAX_CALL_DEPTH
    };
}

#[cfg(test)]
mod tests;

use std::rc::Rc;

use crate::{
    environment::prelude::{Callable, Environment, Value, ValueType},
    parser::prelude::{
        BinaryOperation, BinaryOperator, Block, Expression, FunctionCall, Program, Statement
    },
    utils::prelude::SrcSpan
};

use self::error::{runtime_error, RuntimeError, RuntimeErrorType};
use self::output::OutputEmitterIO;

/// Nested user calls allowed before evaluation gives up.
pub const MAX_CALL_DEPTH: usize = 200;

/// How a block finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value),
}

pub struct Interpreter {
    env: Environment,
    output: Rc<dyn OutputEmitterIO>,
}

impl Interpreter {
    pub fn new(output: Rc<dyn OutputEmitterIO>) -> Self {
        Self {
            env: Environment::new(),
            output,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Runs the top-level statements in order. A top-level `qaytar` ends the run.
    pub fn interpret(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for statement in &program.statements {
            if let Flow::Return(_) = self.eval_statement(statement)? {
                break;
            }
        }

        Ok(())
    }

    fn eval_block(&mut self, block: &Block) -> Result<Flow, RuntimeError> {
        for statement in &block.statements {
            let flow = self.eval_statement(statement)?;

            if let Flow::Return(_) = flow {
                return Ok(flow);
            }
        }

        Ok(Flow::Normal)
    }

    fn eval_statement(&mut self, statement: &Statement) -> Result<Flow, RuntimeError> {
        match statement {
            Statement::VariableDeclaration(declaration) => {
                let value = self.eval_expression(&declaration.value)?;

                self.env.declare(declaration.name.value.clone(), value);
            },
            Statement::Print(print) => {
                let value = self.eval_expression(&print.expression)?;

                self.output.emit_line(value.to_string());
            },
            Statement::If(conditional) => {
                let condition = self.eval_expression(&conditional.condition)?;
                let condition = expect_integer(
                    &condition,
                    "Condition of `agar`",
                    conditional.condition.location()
                )?;

                if condition != 0 {
                    return self.eval_block(&conditional.then_block);
                }

                if let Some(else_block) = &conditional.else_block {
                    return self.eval_block(else_block);
                }
            },
            Statement::FunctionDefinition(function) => {
                self.env.define_function(
                    function.name.value.clone(),
                    Callable::UserDefined(function.clone())
                );
            },
            Statement::Return(ret) => {
                let value = self.eval_expression(&ret.expression)?;
                let value = expect_integer(&value, "`qaytar`", ret.expression.location())?;

                return Ok(Flow::Return(Value::Integer { value }));
            },
        }

        Ok(Flow::Normal)
    }

    fn eval_expression(&mut self, expression: &Expression) -> Result<Value, RuntimeError> {
        match expression {
            Expression::Integer { value, .. } => Ok(Value::Integer { value: *value }),
            Expression::Str { value, .. } => Ok(Value::String { value: value.clone() }),
            Expression::Variable(ident) => match self.env.get(&ident.value) {
                Some(value) => Ok(value.clone()),
                None => runtime_error(
                    RuntimeErrorType::UnboundVariable { name: ident.value.clone() },
                    ident.location
                )
            },
            Expression::Binary(binary) => self.eval_binary(binary),
            Expression::Call(call) => self.eval_call(call),
            // elements are counted, never evaluated
            Expression::List(list) => Ok(Value::Integer { value: list.elements.len() as i64 }),
        }
    }

    fn eval_binary(&mut self, binary: &BinaryOperation) -> Result<Value, RuntimeError> {
        let left = self.eval_expression(&binary.left)?;
        let right = self.eval_expression(&binary.right)?;

        let context = format!("Operator `{}`", binary.operator);
        let left = expect_integer(&left, &context, binary.left.location())?;
        let right = expect_integer(&right, &context, binary.right.location())?;

        let result = match binary.operator {
            BinaryOperator::Add => left.checked_add(right),
            BinaryOperator::Subtract => left.checked_sub(right),
            BinaryOperator::Multiply => left.checked_mul(right),
            BinaryOperator::Divide => {
                if right == 0 {
                    return runtime_error(RuntimeErrorType::DivisionByZero, binary.location);
                }

                left.checked_div(right)
            },
            BinaryOperator::Equal => Some((left == right) as i64),
            BinaryOperator::NotEqual => Some((left != right) as i64),
            BinaryOperator::Less => Some((left < right) as i64),
            BinaryOperator::LessOrEqual => Some((left <= right) as i64),
            BinaryOperator::Greater => Some((left > right) as i64),
            BinaryOperator::GreaterOrEqual => Some((left >= right) as i64),
        };

        match result {
            Some(value) => Ok(Value::Integer { value }),
            None => runtime_error(RuntimeErrorType::IntegerOverflow, binary.location)
        }
    }

    fn eval_call(&mut self, call: &FunctionCall) -> Result<Value, RuntimeError> {
        let callable = match self.env.function(&call.name.value) {
            Some(callable) => callable.clone(),
            None => return runtime_error(
                RuntimeErrorType::UnknownFunction { name: call.name.value.clone() },
                call.name.location
            )
        };

        let mut args = Vec::with_capacity(call.arguments.len());

        for argument in &call.arguments {
            let value = self.eval_expression(argument)?;
            args.push(expect_integer(&value, "Function argument", argument.location())?);
        }

        if args.len() != callable.arity() {
            return runtime_error(
                RuntimeErrorType::ArityMismatch {
                    name: call.name.value.clone(),
                    expected: callable.arity(),
                    got: args.len(),
                },
                call.location
            );
        }

        match callable {
            Callable::Builtin(builtin) => match builtin.call(&args) {
                Some(value) => Ok(Value::Integer { value }),
                None => runtime_error(RuntimeErrorType::IntegerOverflow, call.location)
            },
            Callable::UserDefined(function) => {
                if self.env.depth() >= MAX_CALL_DEPTH {
                    return runtime_error(
                        RuntimeErrorType::CallDepthExceeded { limit: MAX_CALL_DEPTH },
                        call.location
                    );
                }

                let frame = function.parameters.iter()
                    .map(|param| param.value.clone())
                    .zip(args.into_iter().map(Value::from))
                    .collect();

                self.env.push_frame(frame);
                let flow = self.eval_block(&function.body);
                self.env.pop_frame();

                match flow? {
                    Flow::Return(value) => Ok(value),
                    Flow::Normal => Ok(Value::Integer { value: 0 }),
                }
            },
        }
    }
}

fn expect_integer(value: &Value, context: &str, location: SrcSpan) -> Result<i64, RuntimeError> {
    match value.as_integer() {
        Ok(value) => Ok(value),
        Err(got) => runtime_error(
            RuntimeErrorType::UnsupportedType {
                expected: ValueType::Integer,
                got,
                context: context.to_string(),
            },
            location
        )
    }
}
