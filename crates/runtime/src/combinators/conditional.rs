//! Conditional combinators: `ifte`, `branch`, `cond`, and the eight
//! type-inspecting `ifKIND` forms (§4.6).

use super::{run_quotation_parts, test_predicate};
use crate::eval::Evaluator;
use crate::helpers::{pop, pop_bool, pop_quotation};
use joy_core::error::JoyError;
use joy_core::value::Value;

/// `ifte`: `[C] [T] [F] -> ...`. Run C under snapshot/restore; branch on
/// its truthiness into T or F, both on the original (restored) stack.
pub fn ifte(ev: &mut Evaluator) -> Result<(), JoyError> {
    let f = pop_quotation(&mut ev.stack, "ifte")?;
    let t = pop_quotation(&mut ev.stack, "ifte")?;
    let c = pop_quotation(&mut ev.stack, "ifte")?;
    if test_predicate(ev, &c)? {
        ev.execute_terms(&t)
    } else {
        ev.execute_terms(&f)
    }
}

/// `branch`: `B [T] [F] -> ...`. B is an already-computed boolean, not a
/// quotation — no snapshot needed.
pub fn branch(ev: &mut Evaluator) -> Result<(), JoyError> {
    let f = pop_quotation(&mut ev.stack, "branch")?;
    let t = pop_quotation(&mut ev.stack, "branch")?;
    let b = pop_bool(&mut ev.stack, "branch")?;
    if b {
        ev.execute_terms(&t)
    } else {
        ev.execute_terms(&f)
    }
}

/// `cond`: TOS is a list of clauses `[[P1] R1 R2 …] … [Dflt…]`. All but the
/// last clause carry a leading predicate quotation; the last is always the
/// default. Each remaining clause element is itself a quotation, run in
/// turn (§4.6).
pub fn cond(ev: &mut Evaluator) -> Result<(), JoyError> {
    let clauses_val = pop(&mut ev.stack, "cond")?;
    let clauses = clauses_val
        .as_terms()
        .ok_or_else(|| JoyError::type_error("cond", "list of clauses", clauses_val.kind_name()))?
        .to_vec();
    if clauses.is_empty() {
        return Err(JoyError::domain("cond: empty clause list"));
    }
    let (last, rest) = clauses.split_last().unwrap();
    for clause in rest {
        let parts = clause
            .as_terms()
            .ok_or_else(|| JoyError::type_error("cond", "clause list", clause.kind_name()))?;
        let (predicate, body) = parts
            .split_first()
            .ok_or_else(|| JoyError::domain("cond: empty clause"))?;
        let predicate_terms = predicate
            .as_terms()
            .ok_or_else(|| JoyError::type_error("cond", "quotation", predicate.kind_name()))?;
        if test_predicate(ev, predicate_terms)? {
            return run_quotation_parts(ev, body);
        }
    }
    let default_parts = last
        .as_terms()
        .ok_or_else(|| JoyError::type_error("cond", "clause list", last.kind_name()))?;
    run_quotation_parts(ev, default_parts)
}

fn if_kind(ev: &mut Evaluator, prim: &str, matches: impl Fn(&Value) -> bool) -> Result<(), JoyError> {
    let f = pop_quotation(&mut ev.stack, prim)?;
    let t = pop_quotation(&mut ev.stack, prim)?;
    let x = ev
        .stack
        .last()
        .ok_or_else(|| JoyError::underflow(prim, 1, 0))?
        .clone();
    if matches(&x) {
        ev.execute_terms(&t)
    } else {
        ev.execute_terms(&f)
    }
}

pub fn iflist(ev: &mut Evaluator) -> Result<(), JoyError> {
    if_kind(ev, "iflist", |v| matches!(v, Value::List(_) | Value::Quotation(_)))
}

pub fn ifinteger(ev: &mut Evaluator) -> Result<(), JoyError> {
    if_kind(ev, "ifinteger", |v| matches!(v, Value::Int(_)))
}

pub fn ifchar(ev: &mut Evaluator) -> Result<(), JoyError> {
    if_kind(ev, "ifchar", |v| matches!(v, Value::Char(_)))
}

pub fn iflogical(ev: &mut Evaluator) -> Result<(), JoyError> {
    if_kind(ev, "iflogical", |v| matches!(v, Value::Bool(_)))
}

pub fn ifset(ev: &mut Evaluator) -> Result<(), JoyError> {
    if_kind(ev, "ifset", |v| matches!(v, Value::Set(_)))
}

pub fn ifstring(ev: &mut Evaluator) -> Result<(), JoyError> {
    if_kind(ev, "ifstring", |v| matches!(v, Value::Str(_)))
}

pub fn iffloat(ev: &mut Evaluator) -> Result<(), JoyError> {
    if_kind(ev, "iffloat", |v| matches!(v, Value::Float(_)))
}

pub fn iffile(ev: &mut Evaluator) -> Result<(), JoyError> {
    if_kind(ev, "iffile", |v| matches!(v, Value::File(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ifte_runs_predicate_under_snapshot() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack = vec![Value::Int(5)];
        ev.stack.push(Value::quotation(vec![Value::Int(0), Value::symbol(">")]));
        ev.stack.push(Value::quotation(vec![Value::str("pos")]));
        ev.stack.push(Value::quotation(vec![Value::str("nonpos")]));
        ifte(&mut ev).unwrap();
        assert_eq!(ev.stack, vec![Value::Int(5), Value::str("pos")]);
    }

    #[test]
    fn ifinteger_leaves_tested_value_in_place() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack.push(Value::Int(3));
        ev.stack.push(Value::quotation(vec![Value::symbol("succ")]));
        ev.stack.push(Value::quotation(vec![Value::symbol("pop"), Value::Int(0)]));
        ifinteger(&mut ev).unwrap();
        assert_eq!(ev.stack, vec![Value::Int(4)]);
    }
}
