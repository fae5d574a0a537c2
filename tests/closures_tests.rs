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
fn closures_hold_independent_state_per_call() {
    let input = r#"
        let makeCounter = fn() {
            let count = 0;
            fn() { count }
        };
        let a = makeCounter();
        let b = makeCounter();
        a() + b();
    "#;
    assert!(matches!(eval(input), Object::Integer(0)));
}

#[test]
fn a_closure_outlives_the_call_that_created_it() {
    let input = r#"
        let adders = fn() {
            let firstAdder = fn(x) { fn(y) { x + y } };
            firstAdder(1)
        };
        let addOne = adders();
        addOne(41);
    "#;
    assert!(matches!(eval(input), Object::Integer(42)));
}

#[test]
fn nested_closures_each_capture_their_own_enclosing_scope() {
    let input = r#"
        let newAdderPair = fn(a, b) {
            fn(x) { fn(y) { a + b + x + y } }
        };
        let pair = newAdderPair(1, 2);
        let inner = pair(3);
        inner(4);
    "#;
    assert!(matches!(eval(input), Object::Integer(10)));
}

#[test]
fn recursive_function_bound_via_let_can_call_itself() {
    let input = r#"
        let fact = fn(n) {
            if (n == 0) {
                1
            } else {
                n * fact(n - 1)
            }
        };
        fact(5);
    "#;
    assert!(matches!(eval(input), Object::Integer(120)));
}
