//! End-to-end tests driving the evaluator over whole parsed programs,
//! exercising definitions, combinators, and recursion together rather than
//! one primitive at a time.

use joy_core::parser::parse_program;
use joy_core::value::Value;
use joy_runtime::Evaluator;

fn run(src: &str) -> Vec<Value> {
    let items = parse_program(src).unwrap();
    let mut ev = Evaluator::new(vec![]);
    ev.autoput = false;
    ev.run_program(&items).unwrap();
    ev.stack
}

#[test]
fn define_and_call_a_user_word() {
    let stack = run("DEFINE square == dup * . 5 square");
    assert_eq!(stack, vec![Value::Int(25)]);
}

#[test]
fn recursive_factorial_via_ifte() {
    let stack = run(
        "DEFINE fact == [null] [pop 1] [dup pred fact *] ifte . 6 fact",
    );
    assert_eq!(stack, vec![Value::Int(720)]);
}

#[test]
fn bare_dot_prints_and_pops_top_of_stack() {
    let stack = run("2 3 + .");
    assert!(stack.is_empty());
}

#[test]
fn times_runs_a_quotation_n_times() {
    let stack = run("0 10 [1 +] times");
    assert_eq!(stack, vec![Value::Int(10)]);
}

#[test]
fn tailrec_counts_a_value_down_to_zero() {
    let stack = run("5 [0 =] [] [pred] tailrec");
    assert_eq!(stack, vec![Value::Int(0)]);
}

#[test]
fn map_over_a_list_doubles_each_element() {
    let stack = run("[1 2 3] [2 *] map");
    assert_eq!(stack, vec![Value::list(vec![Value::Int(2), Value::Int(4), Value::Int(6)])]);
}

#[test]
fn module_qualifies_clause_names() {
    let stack = run("MODULE geo DEFINE area == dup * . END 4 geo.area");
    assert_eq!(stack, vec![Value::Int(16)]);
}

#[test]
fn undefined_word_is_a_fatal_error() {
    let items = parse_program("bogus-word").unwrap();
    let mut ev = Evaluator::new(vec![]);
    assert!(ev.run_program(&items).is_err());
}
