//! Aggregate-iteration combinators: `map`, `filter`, `split`, `step`,
//! `fold`, `some`, `all`, `treestep`, `treerec`, `treegenrec` (§4.6).
//!
//! `map`/`filter`/`split` run Q once per element with exactly that element
//! on top of a scratch stack, require Q leave exactly one net result
//! (universal law 9: elements visited left-to-right), and rebuild an
//! aggregate of the source's kind the same way `helpers::rebuild_aggregate`
//! does for the plain aggregate primitives.

use crate::eval::Evaluator;
use crate::helpers::{pop_aggregate, pop_quotation, rebuild_aggregate, AggKind};
use joy_core::compare::truthy;
use joy_core::error::JoyError;
use joy_core::value::Value;

fn apply_one(ev: &mut Evaluator, q: &[Value], elem: Value) -> Result<Value, JoyError> {
    let base = ev.stack.len();
    ev.stack.push(elem);
    ev.execute_terms(q)?;
    if ev.stack.len() != base + 1 {
        return Err(JoyError::domain(
            "map/filter/step: quotation must leave exactly one result per element",
        ));
    }
    Ok(ev.stack.pop().unwrap())
}

pub fn map(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "map")?;
    let (kind, elems) = pop_aggregate(&mut ev.stack, "map")?;
    let mut results = Vec::with_capacity(elems.len());
    for e in elems {
        results.push(apply_one(ev, &q, e)?);
    }
    ev.stack.push(rebuild_aggregate(kind, results));
    Ok(())
}

pub fn filter(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "filter")?;
    let (kind, elems) = pop_aggregate(&mut ev.stack, "filter")?;
    let mut kept = Vec::new();
    for e in elems {
        let keep = truthy(&apply_one(ev, &q, e.clone())?);
        if keep {
            kept.push(e);
        }
    }
    ev.stack.push(rebuild_aggregate(kind, kept));
    Ok(())
}

pub fn split(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "split")?;
    let (kind, elems) = pop_aggregate(&mut ev.stack, "split")?;
    let mut keepers = Vec::new();
    let mut rejects = Vec::new();
    for e in elems {
        if truthy(&apply_one(ev, &q, e.clone())?) {
            keepers.push(e);
        } else {
            rejects.push(e);
        }
    }
    ev.stack.push(rebuild_aggregate(clone_kind(&kind), keepers));
    ev.stack.push(rebuild_aggregate(kind, rejects));
    Ok(())
}

fn clone_kind(kind: &AggKind) -> AggKind {
    match kind {
        AggKind::List => AggKind::List,
        AggKind::Quotation => AggKind::Quotation,
        AggKind::Str => AggKind::Str,
        AggKind::Set => AggKind::Set,
    }
}

/// `step`: iterate for effect only, directly on the live stack (no
/// collection, no isolation between iterations).
pub fn step(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "step")?;
    let (_, elems) = pop_aggregate(&mut ev.stack, "step")?;
    for e in elems {
        ev.stack.push(e);
        ev.execute_terms(&q)?;
    }
    Ok(())
}

/// `fold`: `A I [Q] -> V`. Push I; for each element of A push it and run Q.
pub fn fold(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "fold")?;
    let seed = crate::helpers::pop(&mut ev.stack, "fold")?;
    let (_, elems) = pop_aggregate(&mut ev.stack, "fold")?;
    ev.stack.push(seed);
    for e in elems {
        ev.stack.push(e);
        ev.execute_terms(&q)?;
    }
    Ok(())
}

/// `some`: true if Q is truthy for some element (short-circuit); false on
/// an empty aggregate.
pub fn some(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "some")?;
    let (_, elems) = pop_aggregate(&mut ev.stack, "some")?;
    for e in elems {
        if truthy(&apply_one(ev, &q, e)?) {
            ev.stack.push(Value::Bool(true));
            return Ok(());
        }
    }
    ev.stack.push(Value::Bool(false));
    Ok(())
}

/// `all`: true if Q is truthy for every element (short-circuit); true on
/// an empty aggregate.
pub fn all(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "all")?;
    let (_, elems) = pop_aggregate(&mut ev.stack, "all")?;
    for e in elems {
        if !truthy(&apply_one(ev, &q, e)?) {
            ev.stack.push(Value::Bool(false));
            return Ok(());
        }
    }
    ev.stack.push(Value::Bool(true));
    Ok(())
}

/// `treestep`: `A [Q] -> ...`. Recursively descend into nested aggregates;
/// at each leaf (non-aggregate element) run Q with that leaf on top.
pub fn treestep(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "treestep")?;
    let (_, elems) = pop_aggregate(&mut ev.stack, "treestep")?;
    treestep_walk(ev, &elems, &q)
}

/// The element sequence of any aggregate kind, or `None` for a scalar leaf.
fn aggregate_elements(v: &Value) -> Option<Vec<Value>> {
    match v {
        Value::List(terms) | Value::Quotation(terms) => Some(terms.to_vec()),
        Value::Str(s) => Some(s.bytes().map(Value::Char).collect()),
        Value::Set(mask) => Some((0..64).filter(|b| mask & (1 << b) != 0).map(Value::Int).collect()),
        _ => None,
    }
}

fn treestep_walk(ev: &mut Evaluator, elems: &[Value], q: &[Value]) -> Result<(), JoyError> {
    for e in elems {
        match aggregate_elements(e) {
            Some(sub) => treestep_walk(ev, &sub, q)?,
            None => {
                ev.stack.push(e.clone());
                ev.execute_terms(q)?;
            }
        }
    }
    Ok(())
}

/// `treerec`: `A [Leaf] [Branch] -> ...`. At a leaf, run Leaf with it on
/// top. At a branch (nested aggregate), recurse into every child first,
/// then run Branch to combine.
pub fn treerec(ev: &mut Evaluator) -> Result<(), JoyError> {
    let branch = pop_quotation(&mut ev.stack, "treerec")?;
    let leaf = pop_quotation(&mut ev.stack, "treerec")?;
    let x = crate::helpers::pop(&mut ev.stack, "treerec")?;
    treerec_walk(ev, x, &leaf, &branch)
}

fn treerec_walk(ev: &mut Evaluator, x: Value, leaf: &[Value], branch: &[Value]) -> Result<(), JoyError> {
    match aggregate_elements(&x) {
        Some(children) => {
            for child in children {
                treerec_walk(ev, child, leaf, branch)?;
            }
            ev.execute_terms(branch)
        }
        None => {
            ev.stack.push(x);
            ev.execute_terms(leaf)
        }
    }
}

/// `treegenrec`: like `treerec` but Branch additionally receives the
/// original (unprocessed) aggregate pushed before the recursive results, so
/// it can consult the tree's shape as well as its children's outcomes.
pub fn treegenrec(ev: &mut Evaluator) -> Result<(), JoyError> {
    let branch = pop_quotation(&mut ev.stack, "treegenrec")?;
    let leaf = pop_quotation(&mut ev.stack, "treegenrec")?;
    let x = crate::helpers::pop(&mut ev.stack, "treegenrec")?;
    treegenrec_walk(ev, x, &leaf, &branch)
}

fn treegenrec_walk(ev: &mut Evaluator, x: Value, leaf: &[Value], branch: &[Value]) -> Result<(), JoyError> {
    match aggregate_elements(&x) {
        Some(children) => {
            let original = x.clone();
            for child in children {
                treegenrec_walk(ev, child, leaf, branch)?;
            }
            ev.stack.push(original);
            ev.execute_terms(branch)
        }
        None => {
            ev.stack.push(x);
            ev.execute_terms(leaf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_preserves_list_kind_and_order() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack.push(Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
        ev.stack.push(Value::quotation(vec![Value::symbol("dup"), Value::symbol("*")]));
        map(&mut ev).unwrap();
        assert_eq!(
            ev.stack,
            vec![Value::list(vec![Value::Int(1), Value::Int(4), Value::Int(9)])]
        );
    }

    #[test]
    fn filter_preserves_string_kind() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack.push(Value::str("test"));
        ev.stack.push(Value::quotation(vec![Value::Char(b't'), Value::symbol("<")]));
        filter(&mut ev).unwrap();
        assert_eq!(ev.stack, vec![Value::str("es")]);
    }

    #[test]
    fn empty_aggregate_all_is_true_some_is_false() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack.push(Value::list(vec![]));
        ev.stack.push(Value::quotation(vec![Value::symbol("pop"), Value::Bool(true)]));
        all(&mut ev).unwrap();
        assert_eq!(ev.stack, vec![Value::Bool(true)]);

        ev.stack.clear();
        ev.stack.push(Value::list(vec![]));
        ev.stack.push(Value::quotation(vec![Value::symbol("pop"), Value::Bool(true)]));
        some(&mut ev).unwrap();
        assert_eq!(ev.stack, vec![Value::Bool(false)]);
    }
}
