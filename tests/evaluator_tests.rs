use monkey_interpreter::environment::Environment;
use monkey_interpreter::evaluator::eval_program;
use monkey_interpreter::object::Object;
use monkey_interpreter::parser::parse;

fn eval(input: &str) -> Object {
    let (program, errors) = parse(input);
    assert!(errors.is_empty(), "parser errors: {:?}", errors);
    let env = Environment::new();
    eval_program(&program, &env)
}

#[test]
fn end_to_end_arithmetic_and_precedence() {
    assert!(matches!(eval("5 + 5 + 5 + 5 - 10"), Object::Integer(10)));
}

#[test]
fn end_to_end_string_concatenation() {
    match eval(r#""hello" + " " + "world!""#) {
        Object::String(s) => assert_eq!(s, "hello world!"),
        other => panic!("expected String, got {:?}", other),
    }
}

#[test]
fn end_to_end_closures_and_higher_order_functions() {
    let input = r#"
        let newAdder = fn(x) {
            fn(y) { x + y };
        };
        let addTwo = newAdder(2);
        addTwo(3);
    "#;
    assert!(matches!(eval(input), Object::Integer(5)));
}

#[test]
fn end_to_end_map_over_array() {
    let input = r#"
        let double = fn(x) { x * 2 };
        map([1, 2, 3], double);
    "#;
    match eval(input) {
        Object::Array(items) => {
            assert_eq!(items.len(), 3);
            assert!(matches!(items[0], Object::Integer(2)));
            assert!(matches!(items[1], Object::Integer(4)));
            assert!(matches!(items[2], Object::Integer(6)));
        }
        other => panic!("expected Array, got {:?}", other),
    }
}

#[test]
fn end_to_end_reduce_sums_array() {
    let input = r#"
        let sum = fn(arr) {
            reduce(arr, 0, fn(acc, x) { acc + x });
        };
        sum([1, 2, 3, 4, 5]);
    "#;
    assert!(matches!(eval(input), Object::Integer(15)));
}

#[test]
fn end_to_end_push_does_not_mutate_original_array() {
    let input = r#"
        let a = [1, 2, 3];
        let b = push(a, 4);
        len(a);
    "#;
    assert!(matches!(eval(input), Object::Integer(3)));
}

#[test]
fn end_to_end_return_exits_nested_if_blocks() {
    let input = "if (10 > 1) { if (10 > 1) { return 10; } return 1; }";
    assert!(matches!(eval(input), Object::Integer(10)));
}

#[test]
fn end_to_end_runtime_error_is_the_program_result() {
    match eval("5 + true;") {
        Object::Error(msg) => assert_eq!(msg, "type mismatch: INTEGER + BOOLEAN"),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[test]
fn len_rejects_non_string_non_array_arguments() {
    match eval("len(1)") {
        Object::Error(msg) => assert_eq!(msg, "argument to `len` not supported, got INTEGER"),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[test]
fn rest_on_empty_array_is_an_empty_array_not_an_error() {
    match eval("rest([])") {
        Object::Array(items) => assert!(items.is_empty()),
        other => panic!("expected empty Array, got {:?}", other),
    }
}
