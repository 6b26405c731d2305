//! Recursion combinators (§4.6): the heart of Joy. `linrec` and `tailrec`
//! are implemented iteratively so recursion depth costs operand-stack
//! space, not host-stack frames (universal law 10). `binrec` recurses on
//! the host stack, which §4.6 explicitly allows ("natural recursion on the
//! runtime stack is acceptable for well-founded Joy programs"). `genrec`
//! needs no special-casing at all: it reifies itself as an ordinary
//! quotation and leaves recursing to R2, via the ordinary dispatch loop.

use super::{run_quotation_parts, test_predicate};
use crate::eval::Evaluator;
use crate::helpers::{pop, pop_quotation};
use joy_core::error::JoyError;
use joy_core::value::Value;

/// `linrec [P] [T] [R1] [R2]`. Iterative per §4.6: loop running P/R1 until
/// P is true (running T then), counting R1 invocations, then unwind by
/// running R2 that many times.
pub fn linrec(ev: &mut Evaluator) -> Result<(), JoyError> {
    let r2 = pop_quotation(&mut ev.stack, "linrec")?;
    let r1 = pop_quotation(&mut ev.stack, "linrec")?;
    let t = pop_quotation(&mut ev.stack, "linrec")?;
    let p = pop_quotation(&mut ev.stack, "linrec")?;

    let mut pending = 0usize;
    loop {
        if test_predicate(ev, &p)? {
            ev.execute_terms(&t)?;
            break;
        }
        ev.execute_terms(&r1)?;
        pending += 1;
    }
    for _ in 0..pending {
        ev.execute_terms(&r2)?;
    }
    Ok(())
}

/// `tailrec [P] [T] [R1]`. `linrec` with R2 empty: a pure loop.
pub fn tailrec(ev: &mut Evaluator) -> Result<(), JoyError> {
    let r1 = pop_quotation(&mut ev.stack, "tailrec")?;
    let t = pop_quotation(&mut ev.stack, "tailrec")?;
    let p = pop_quotation(&mut ev.stack, "tailrec")?;

    loop {
        if test_predicate(ev, &p)? {
            return ev.execute_terms(&t);
        }
        ev.execute_terms(&r1)?;
    }
}

/// `binrec [P] [T] [R1] [R2]`. R1 splits the current value into two; each
/// is recursed on independently (one held aside while the other runs),
/// then R2 combines the two recursive results.
pub fn binrec(ev: &mut Evaluator) -> Result<(), JoyError> {
    let r2 = pop_quotation(&mut ev.stack, "binrec")?;
    let r1 = pop_quotation(&mut ev.stack, "binrec")?;
    let t = pop_quotation(&mut ev.stack, "binrec")?;
    let p = pop_quotation(&mut ev.stack, "binrec")?;
    binrec_step(ev, &p, &t, &r1, &r2)
}

fn binrec_step(
    ev: &mut Evaluator,
    p: &[Value],
    t: &[Value],
    r1: &[Value],
    r2: &[Value],
) -> Result<(), JoyError> {
    if test_predicate(ev, p)? {
        return ev.execute_terms(t);
    }
    ev.execute_terms(r1)?;
    let second = pop(&mut ev.stack, "binrec")?;
    binrec_step(ev, p, t, r1, r2)?;
    ev.stack.push(second);
    binrec_step(ev, p, t, r1, r2)?;
    ev.execute_terms(r2)
}

/// `primrec X [I] [C]`. Run I to seed; then for each member of X (1..n for
/// an integer, elements for a list/quotation, chars for a string) push the
/// member and run C.
pub fn primrec(ev: &mut Evaluator) -> Result<(), JoyError> {
    let c = pop_quotation(&mut ev.stack, "primrec")?;
    let i = pop_quotation(&mut ev.stack, "primrec")?;
    let x = pop(&mut ev.stack, "primrec")?;

    ev.execute_terms(&i)?;
    let members: Vec<Value> = match &x {
        Value::Int(n) => (1..=*n).map(Value::Int).collect(),
        Value::List(v) | Value::Quotation(v) => v.to_vec(),
        Value::Str(s) => s.bytes().map(Value::Char).collect(),
        other => {
            return Err(JoyError::type_error(
                "primrec",
                "integer, list, or string",
                other.kind_name(),
            ))
        }
    };
    for m in members {
        ev.stack.push(m);
        ev.execute_terms(&c)?;
    }
    Ok(())
}

/// `genrec [P] [T] [R1] [R2]`. If P, run T. Else R1, then push a reified
/// `[[P] [T] [R1] [R2] genrec]` quotation and run R2 — R2 decides whether
/// (and how) to invoke it, via ordinary `i`/dispatch.
pub fn genrec(ev: &mut Evaluator) -> Result<(), JoyError> {
    let r2 = pop_quotation(&mut ev.stack, "genrec")?;
    let r1 = pop_quotation(&mut ev.stack, "genrec")?;
    let t = pop_quotation(&mut ev.stack, "genrec")?;
    let p = pop_quotation(&mut ev.stack, "genrec")?;

    if test_predicate(ev, &p)? {
        return ev.execute_terms(&t);
    }
    ev.execute_terms(&r1)?;
    let reified = Value::quotation(vec![
        Value::Quotation(p.clone()),
        Value::Quotation(t.clone()),
        Value::Quotation(r1.clone()),
        Value::Quotation(r2.clone()),
        Value::symbol("genrec"),
    ]);
    ev.stack.push(reified);
    ev.execute_terms(&r2)
}

/// `condlinrec`/`condnestrec` share this implementation (§4.6): a list of
/// clauses `[C1] [C2] … [D]`, each non-final `[[B] R1 R2 …]`. Find the
/// first clause whose B is truthy (default to the last); run its first
/// part, then for each remaining part recur on the *same* clause list
/// before running that part.
pub fn condlinrec(ev: &mut Evaluator) -> Result<(), JoyError> {
    let clauses_val = pop(&mut ev.stack, "condlinrec")?;
    let clauses = clauses_val
        .as_terms()
        .ok_or_else(|| JoyError::type_error("condlinrec", "list of clauses", clauses_val.kind_name()))?
        .to_vec();
    condlinrec_step(ev, &clauses)
}

fn condlinrec_step(ev: &mut Evaluator, clauses: &[Value]) -> Result<(), JoyError> {
    if clauses.is_empty() {
        return Err(JoyError::domain("condlinrec: empty clause list"));
    }
    let (last, rest) = clauses.split_last().unwrap();

    let mut chosen: Option<&[Value]> = None;
    for clause in rest {
        let parts = clause
            .as_terms()
            .ok_or_else(|| JoyError::type_error("condlinrec", "clause list", clause.kind_name()))?;
        let (predicate, body) = parts
            .split_first()
            .ok_or_else(|| JoyError::domain("condlinrec: empty clause"))?;
        let predicate_terms = predicate
            .as_terms()
            .ok_or_else(|| JoyError::type_error("condlinrec", "quotation", predicate.kind_name()))?;
        if test_predicate(ev, predicate_terms)? {
            chosen = Some(body);
            break;
        }
    }
    let body = match chosen {
        Some(b) => b,
        None => last
            .as_terms()
            .ok_or_else(|| JoyError::type_error("condlinrec", "clause list", last.kind_name()))?,
    };

    if body.is_empty() {
        return Ok(());
    }
    run_quotation_parts(ev, &body[..1])?;
    for part in &body[1..] {
        condlinrec_step(ev, clauses)?;
        run_quotation_parts(ev, std::slice::from_ref(part))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tailrec_counts_down_to_zero() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack.push(Value::Int(5));
        ev.stack.push(Value::quotation(vec![Value::Int(0), Value::symbol("=")]));
        ev.stack.push(Value::quotation(vec![]));
        ev.stack.push(Value::quotation(vec![Value::symbol("pred")]));
        tailrec(&mut ev).unwrap();
        assert_eq!(ev.stack, vec![Value::Int(0)]);
    }

    #[test]
    fn primrec_computes_factorial() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack.push(Value::Int(5));
        ev.stack.push(Value::quotation(vec![Value::Int(1)]));
        ev.stack.push(Value::quotation(vec![Value::symbol("*")]));
        primrec(&mut ev).unwrap();
        assert_eq!(ev.stack, vec![Value::Int(120)]);
    }
}
