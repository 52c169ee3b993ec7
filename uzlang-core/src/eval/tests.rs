use std::rc::Rc;

use crate::{
    environment::prelude::{Value, ValueType},
    lexer::prelude::tokenize,
    parser::prelude::{parse_tokens, BinaryOperation, BinaryOperator, Expression, Program},
    utils::prelude::SrcSpan
};

use super::prelude::{
    Interpreter, NullOutputEmitterIO, RuntimeError, RuntimeErrorType, VectorOutputEmitterIO,
    MAX_CALL_DEPTH
};

fn program(input: &str) -> Program {
    let tokens = tokenize(input).expect("input should lex");

    parse_tokens(tokens).expect("input should parse")
}

fn run(input: &str) -> Result<Vec<String>, RuntimeError> {
    let output = VectorOutputEmitterIO::new();
    let mut interpreter = Interpreter::new(Rc::new(output.clone()));

    interpreter.interpret(&program(input))?;

    Ok(output.take())
}

fn run_err(input: &str) -> RuntimeErrorType {
    match run(input) {
        Ok(lines) => panic!("expected {input:?} to fail, but it printed {lines:?}"),
        Err(err) => err.error
    }
}

fn int(value: i64) -> Expression {
    Expression::Integer { value, location: SrcSpan::default() }
}

fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
    Expression::Binary(BinaryOperation {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        location: SrcSpan::default()
    })
}

fn eval(expression: &Expression) -> Result<Value, RuntimeError> {
    Interpreter::new(Rc::new(NullOutputEmitterIO)).eval_expression(expression)
}

#[test]
fn test_arithmetic() -> Result<(), RuntimeError> {
    assert_eq!(eval(&binary(BinaryOperator::Add, int(2), int(3)))?, Value::Integer { value: 5 });
    assert_eq!(eval(&binary(BinaryOperator::Multiply, int(4), int(5)))?, Value::Integer { value: 20 });
    assert_eq!(eval(&binary(BinaryOperator::Divide, int(7), int(2)))?, Value::Integer { value: 3 });
    assert_eq!(eval(&binary(BinaryOperator::Divide, int(-7), int(2)))?, Value::Integer { value: -3 });
    assert_eq!(eval(&binary(BinaryOperator::Subtract, int(2), int(9)))?, Value::Integer { value: -7 });

    Ok(())
}

#[test]
fn test_division_by_zero() {
    for n in [0, 1, -1, 42, i64::MAX, i64::MIN] {
        let err = eval(&binary(BinaryOperator::Divide, int(n), int(0))).unwrap_err();

        assert_eq!(err.error, RuntimeErrorType::DivisionByZero, "{n} / 0");
    }
}

#[test]
fn test_overflow() {
    let cases = [
        binary(BinaryOperator::Add, int(i64::MAX), int(1)),
        binary(BinaryOperator::Subtract, int(i64::MIN), int(1)),
        binary(BinaryOperator::Multiply, int(i64::MAX), int(2)),
        binary(BinaryOperator::Divide, int(i64::MIN), int(-1)),
    ];

    for case in cases {
        assert_eq!(eval(&case).unwrap_err().error, RuntimeErrorType::IntegerOverflow, "{case}");
    }

    assert_eq!(run_err("chop qoshish(9223372036854775807, 1);"), RuntimeErrorType::IntegerOverflow);
}

#[test]
fn test_comparisons() -> Result<(), RuntimeError> {
    let lines = run("chop 1 < 2; chop 2 < 1; chop 3 == 3; chop 3 != 3; chop 2 >= 2; chop 1 > 2; chop 1 <= 0;")?;

    assert_eq!(lines, vec!["1", "0", "1", "0", "1", "0", "0"]);

    Ok(())
}

#[test]
fn test_print_round_trip() -> Result<(), RuntimeError> {
    let literals = [0i64, 7, 42, 1000000, 9223372036854775807];

    let input = literals.iter()
        .map(|value| format!("chop {value};"))
        .collect::<Vec<String>>()
        .join("\n");

    let expected = literals.iter()
        .map(|value| value.to_string())
        .collect::<Vec<String>>();

    assert_eq!(run(&input)?, expected);

    Ok(())
}

#[test]
fn test_strings() -> Result<(), RuntimeError> {
    let lines = run(r#"soni salom = "Salom, dunyo"; chop salom; chop "";"#)?;

    assert_eq!(lines, vec!["Salom, dunyo", ""]);

    Ok(())
}

#[test]
fn test_string_rejected_by_arithmetic() {
    assert_eq!(
        run_err(r#"chop "a" + 1;"#),
        RuntimeErrorType::UnsupportedType {
            expected: ValueType::Integer,
            got: ValueType::String,
            context: "Operator `+`".to_string(),
        }
    );
    assert!(matches!(
        run_err(r#"agar ("ha") { chop 1; }"#),
        RuntimeErrorType::UnsupportedType { got: ValueType::String, .. }
    ));
    assert!(matches!(
        run_err(r#"funksiya f() { qaytar "x"; } chop f();"#),
        RuntimeErrorType::UnsupportedType { got: ValueType::String, .. }
    ));
    assert!(matches!(
        run_err(r#"chop qoshish("a", 1);"#),
        RuntimeErrorType::UnsupportedType { got: ValueType::String, .. }
    ));
}

#[test]
fn test_conditionals() -> Result<(), RuntimeError> {
    let input = r#"
        agar (0) { chop "then"; } aks { chop "else"; }
        agar (0) { chop "never"; }
        agar (5) { chop "five"; } aks { chop "never"; }
        agar (0 - 1) { chop "minus one"; }
    "#;

    assert_eq!(run(input)?, vec!["else", "five", "minus one"]);

    Ok(())
}

#[test]
fn test_scenarios() -> Result<(), RuntimeError> {
    assert_eq!(run("soni x = 5; chop(x);")?, vec!["5"]);
    assert_eq!(run("funksiya kvadrat(a) { qaytar a * a; } chop kvadrat(6);")?, vec!["36"]);
    assert_eq!(run("chop qoshish(2, 3);")?, vec!["5"]);

    Ok(())
}

#[test]
fn test_list_prints_its_length() -> Result<(), RuntimeError> {
    assert_eq!(run("chop [1,2,3];")?, vec!["3"]);
    assert_eq!(run("chop [];")?, vec!["0"]);
    // elements are not evaluated, so unbound names and bad arithmetic are fine
    assert_eq!(run("soni n = [yoq, 1 / 0, \"s\"]; chop n + 1;")?, vec!["4"]);

    Ok(())
}

#[test]
fn test_function_isolation() -> Result<(), RuntimeError> {
    let input = r#"
        soni a = 10;
        soni b = 1;
        funksiya f(a) {
            soni b = a * 100;
            chop b;
            qaytar a + b;
        }
        chop f(2);
        chop a;
        chop b;
    "#;

    assert_eq!(run(input)?, vec!["200", "202", "10", "1"]);

    Ok(())
}

#[test]
fn test_callee_reads_caller_variables() -> Result<(), RuntimeError> {
    let input = r#"
        soni k = 3;
        funksiya kop(x) { qaytar x * k; }
        chop kop(5);
        soni k = 4;
        chop kop(5);
    "#;

    assert_eq!(run(input)?, vec!["15", "20"]);

    Ok(())
}

#[test]
fn test_return_short_circuits() -> Result<(), RuntimeError> {
    let input = r#"
        funksiya belgi(n) {
            agar (n < 0) {
                qaytar 0 - 1;
                chop "unreachable";
            }
            agar (n) {
                qaytar 1;
            }
            chop "zero";
        }
        chop belgi(0 - 5);
        chop belgi(9);
        chop belgi(0);
    "#;

    assert_eq!(run(input)?, vec!["-1", "1", "zero", "0"]);

    Ok(())
}

#[test]
fn test_top_level_return_stops_the_run() -> Result<(), RuntimeError> {
    assert_eq!(run("chop 1; qaytar 0; chop 2;")?, vec!["1"]);

    Ok(())
}

#[test]
fn test_recursion() -> Result<(), RuntimeError> {
    let input = r#"
        funksiya fib(n) {
            agar (n < 2) { qaytar n; }
            qaytar fib(n - 1) + fib(n - 2);
        }
        chop fib(15);

        funksiya fakt(n) {
            agar (n == 0) { qaytar 1; } aks { qaytar n * fakt(n - 1); }
        }
        chop fakt(10);
    "#;

    assert_eq!(run(input)?, vec!["610", "3628800"]);

    Ok(())
}

#[test]
fn test_call_depth_is_bounded() {
    // deep evaluation needs more than the default test thread stack
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| run_err("funksiya abadiy(n) { qaytar abadiy(n + 1); } chop abadiy(0);"))
        .expect("spawn deep recursion thread");

    let err = handle.join().expect("deep recursion thread panicked");

    assert_eq!(err, RuntimeErrorType::CallDepthExceeded { limit: MAX_CALL_DEPTH });
}

#[test]
fn test_redefinition_overwrites() -> Result<(), RuntimeError> {
    let input = r#"
        funksiya f() { qaytar 1; }
        chop f();
        funksiya f() { qaytar 2; }
        chop f();
        funksiya qoshish(a, b) { qaytar a - b; }
        chop qoshish(5, 3);
    "#;

    assert_eq!(run(input)?, vec!["1", "2", "2"]);

    Ok(())
}

#[test]
fn test_errors() {
    assert_eq!(run_err("chop x;"), RuntimeErrorType::UnboundVariable { name: "x".to_string() });
    assert_eq!(run_err("chop g(1);"), RuntimeErrorType::UnknownFunction { name: "g".to_string() });
    assert_eq!(
        run_err("chop qoshish(1);"),
        RuntimeErrorType::ArityMismatch { name: "qoshish".to_string(), expected: 2, got: 1 }
    );
    assert_eq!(
        run_err("funksiya f(a) { qaytar a; } chop f(1, 2);"),
        RuntimeErrorType::ArityMismatch { name: "f".to_string(), expected: 1, got: 2 }
    );
}

#[test]
fn test_error_aborts_remaining_statements() {
    let output = VectorOutputEmitterIO::new();
    let mut interpreter = Interpreter::new(Rc::new(output.clone()));

    let err = interpreter.interpret(&program("chop 1; chop 1 / 0; chop 2;")).unwrap_err();

    assert_eq!(err.error, RuntimeErrorType::DivisionByZero);
    assert_eq!((err.location.start, err.location.end), (13, 18));
    assert_eq!(output.take(), vec!["1"]);
}

#[test]
fn test_frames_are_popped_after_errors() {
    let output = VectorOutputEmitterIO::new();
    let mut interpreter = Interpreter::new(Rc::new(output.clone()));

    let failing = program("funksiya f(a) { soni ichki = a; qaytar a / 0; } chop f(1);");
    assert!(interpreter.interpret(&failing).is_err());

    assert_eq!(interpreter.environment().depth(), 0);

    // the interpreter stays usable and the callee's locals are gone
    assert!(interpreter.interpret(&program("chop a;")).is_err());
    assert!(interpreter.interpret(&program("chop ichki;")).is_err());
    assert!(interpreter.interpret(&program("soni a = 7; chop f(a) + 0 * a;")).is_err());
    assert_eq!(interpreter.environment().globals().get("a"), Some(&Value::Integer { value: 7 }));
}

#[test]
fn test_missing_return_yields_zero() -> Result<(), RuntimeError> {
    assert_eq!(run("funksiya f() { chop \"ichida\"; } chop f();")?, vec!["ichida", "0"]);

    Ok(())
}
