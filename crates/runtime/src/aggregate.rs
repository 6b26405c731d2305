//! Aggregate primitives (spec §4.5).
//!
//! Operand order for the binary aggregate ops follows the convention that
//! falls out of testable property 3 (`A uncons cons ≡ A`, §8): the
//! aggregate is always the argument closest to TOS, any auxiliary operand
//! sits below it, so `uncons`'s two results (`X` then `Rest`) feed straight
//! back into `cons` (`X A -> A'`) without reshuffling. This resolves an
//! open point spec.md leaves to the implementation (§9 "Open questions"
//! notes the historical source used positional heuristics rather than a
//! single documented convention); the choice is recorded in `DESIGN.md`.

use crate::helpers::{pop, pop_aggregate, pop_int, pop_set, rebuild_aggregate, AggKind};
use joy_core::compare::equal;
use joy_core::error::JoyError;
use joy_core::value::Value;
use joy_core::Stack;

fn agg_kind_matches(a: &AggKind, b: &AggKind) -> bool {
    matches!(
        (a, b),
        (AggKind::List, AggKind::List)
            | (AggKind::List, AggKind::Quotation)
            | (AggKind::Quotation, AggKind::List)
            | (AggKind::Quotation, AggKind::Quotation)
            | (AggKind::Str, AggKind::Str)
            | (AggKind::Set, AggKind::Set)
    )
}

pub fn first(stack: &mut Stack) -> Result<(), JoyError> {
    let (_, elems) = pop_aggregate(stack, "first")?;
    let x = elems
        .into_iter()
        .next()
        .ok_or_else(|| JoyError::domain("first: empty aggregate"))?;
    stack.push(x);
    Ok(())
}

pub fn rest(stack: &mut Stack) -> Result<(), JoyError> {
    let (kind, mut elems) = pop_aggregate(stack, "rest")?;
    if elems.is_empty() {
        return Err(JoyError::domain("rest: empty aggregate"));
    }
    elems.remove(0);
    stack.push(rebuild_aggregate(kind, elems));
    Ok(())
}

pub fn uncons(stack: &mut Stack) -> Result<(), JoyError> {
    let (kind, mut elems) = pop_aggregate(stack, "uncons")?;
    if elems.is_empty() {
        return Err(JoyError::domain("uncons: empty aggregate"));
    }
    let x = elems.remove(0);
    stack.push(x);
    stack.push(rebuild_aggregate(kind, elems));
    Ok(())
}

pub fn cons(stack: &mut Stack) -> Result<(), JoyError> {
    let (kind, mut elems) = pop_aggregate(stack, "cons")?;
    let x = pop(stack, "cons")?;
    check_cons_element(&kind, &x)?;
    elems.insert(0, x);
    stack.push(rebuild_aggregate(kind, elems));
    Ok(())
}

pub fn swons(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop(stack, "swons")?;
    let (kind, mut elems) = pop_aggregate(stack, "swons")?;
    check_cons_element(&kind, &x)?;
    elems.insert(0, x);
    stack.push(rebuild_aggregate(kind, elems));
    Ok(())
}

pub fn unswons(stack: &mut Stack) -> Result<(), JoyError> {
    let (kind, mut elems) = pop_aggregate(stack, "unswons")?;
    if elems.is_empty() {
        return Err(JoyError::domain("unswons: empty aggregate"));
    }
    let x = elems.remove(0);
    stack.push(rebuild_aggregate(kind, elems));
    stack.push(x);
    Ok(())
}

fn check_cons_element(kind: &AggKind, x: &Value) -> Result<(), JoyError> {
    match kind {
        AggKind::Set => match x {
            Value::Int(i) if (0..64).contains(i) => Ok(()),
            _ => Err(JoyError::domain(
                "cons: set elements must be integers 0..63",
            )),
        },
        _ => Ok(()),
    }
}

pub fn concat(stack: &mut Stack) -> Result<(), JoyError> {
    let (kb, eb) = pop_aggregate(stack, "concat")?;
    let (ka, mut ea) = pop_aggregate(stack, "concat")?;
    if !agg_kind_matches(&ka, &kb) {
        return Err(JoyError::domain("concat: mismatched aggregate kinds"));
    }
    ea.extend(eb);
    stack.push(rebuild_aggregate(ka, ea));
    Ok(())
}

pub fn swoncat(stack: &mut Stack) -> Result<(), JoyError> {
    let (kb, mut eb) = pop_aggregate(stack, "swoncat")?;
    let (ka, ea) = pop_aggregate(stack, "swoncat")?;
    if !agg_kind_matches(&ka, &kb) {
        return Err(JoyError::domain("swoncat: mismatched aggregate kinds"));
    }
    eb.extend(ea);
    stack.push(rebuild_aggregate(kb, eb));
    Ok(())
}

pub fn size(stack: &mut Stack) -> Result<(), JoyError> {
    let (_, elems) = pop_aggregate(stack, "size")?;
    stack.push(Value::Int(elems.len() as i64));
    Ok(())
}

pub fn null(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop(stack, "null")?;
    stack.push(Value::Bool(!joy_core::compare::truthy(&x)));
    Ok(())
}

pub fn small(stack: &mut Stack) -> Result<(), JoyError> {
    let (_, elems) = pop_aggregate(stack, "small")?;
    stack.push(Value::Bool(elems.len() <= 1));
    Ok(())
}

pub fn at(stack: &mut Stack) -> Result<(), JoyError> {
    let n = pop_int(stack, "at")?;
    let (_, elems) = pop_aggregate(stack, "at")?;
    let v = index_into(&elems, n, "at")?;
    stack.push(v);
    Ok(())
}

pub fn of(stack: &mut Stack) -> Result<(), JoyError> {
    let (_, elems) = pop_aggregate(stack, "of")?;
    let n = pop_int(stack, "of")?;
    let v = index_into(&elems, n, "of")?;
    stack.push(v);
    Ok(())
}

fn index_into(elems: &[Value], n: i64, prim: &str) -> Result<Value, JoyError> {
    usize::try_from(n)
        .ok()
        .and_then(|i| elems.get(i).cloned())
        .ok_or_else(|| JoyError::domain(format!("{prim}: index {n} out of bounds")))
}

pub fn take(stack: &mut Stack) -> Result<(), JoyError> {
    let n = pop_int(stack, "take")?;
    let (kind, elems) = pop_aggregate(stack, "take")?;
    let n = usize::try_from(n).map_err(|_| JoyError::domain("take: negative count"))?;
    let n = n.min(elems.len());
    stack.push(rebuild_aggregate(kind, elems[..n].to_vec()));
    Ok(())
}

pub fn drop_(stack: &mut Stack) -> Result<(), JoyError> {
    let n = pop_int(stack, "drop")?;
    let (kind, elems) = pop_aggregate(stack, "drop")?;
    let n = usize::try_from(n).map_err(|_| JoyError::domain("drop: negative count"))?;
    let n = n.min(elems.len());
    stack.push(rebuild_aggregate(kind, elems[n..].to_vec()));
    Ok(())
}

pub fn in_(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop(stack, "in")?;
    let (_, elems) = pop_aggregate(stack, "in")?;
    stack.push(Value::Bool(elems.iter().any(|e| equal(e, &x))));
    Ok(())
}

pub fn has(stack: &mut Stack) -> Result<(), JoyError> {
    let n = pop_int(stack, "has")?;
    let s = pop_set(stack, "has")?;
    let member = (0..64).contains(&n) && (s & (1 << n)) != 0;
    stack.push(Value::Bool(member));
    Ok(())
}

pub fn reverse(stack: &mut Stack) -> Result<(), JoyError> {
    let (kind, mut elems) = pop_aggregate(stack, "reverse")?;
    elems.reverse();
    stack.push(rebuild_aggregate(kind, elems));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncons_then_cons_is_identity() {
        let original = Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let mut s: Stack = vec![original.clone()];
        uncons(&mut s).unwrap();
        cons(&mut s).unwrap();
        assert_eq!(s, vec![original]);
    }

    #[test]
    fn cons_onto_set_requires_integer_in_range() {
        let mut s: Stack = vec![Value::Int(70), Value::Set(0)];
        assert!(cons(&mut s).is_err());
    }

    #[test]
    fn string_filter_preserves_string_kind() {
        let (kind, elems) = pop_aggregate(&mut vec![Value::str("test")], "first").unwrap();
        let kept: Vec<Value> = elems.into_iter().filter(|v| matches!(v, Value::Char(c) if *c != b't')).collect();
        assert_eq!(rebuild_aggregate(kind, kept), Value::str("es"));
    }

    #[test]
    fn empty_aggregate_first_is_error() {
        let mut s: Stack = vec![Value::list(vec![])];
        assert!(first(&mut s).is_err());
    }
}
