//! Arity/application-shape combinators: `nullary`..`ternary`, `unary2..4`,
//! `app1..4`, `app11`, `app12`, `cleave`, `construct`, `infra` (§4.6).

use crate::eval::Evaluator;
use crate::helpers::{pop, pop_quotation};
use joy_core::error::JoyError;
use joy_core::value::Value;

/// Save the stack, run Q, take exactly one result off TOS, restore the
/// saved stack, push the result. Shared by `nullary`/`unary`/`binary`/
/// `ternary` (§4.6: "save the stack; run Q; pop one result; restore saved
/// stack; push result").
fn saved_call(ev: &mut Evaluator, prim: &str, q: &[Value]) -> Result<Value, JoyError> {
    let snapshot = ev.stack.clone();
    ev.execute_terms(q)?;
    let result = ev.stack.pop().ok_or_else(|| JoyError::underflow(prim, 1, 0))?;
    ev.stack = snapshot;
    Ok(result)
}

pub fn nullary(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "nullary")?;
    let result = saved_call(ev, "nullary", &q)?;
    ev.stack.push(result);
    Ok(())
}

pub fn unary(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "unary")?;
    let result = saved_call(ev, "unary", &q)?;
    ev.stack.push(result);
    Ok(())
}

pub fn binary(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "binary")?;
    let result = saved_call(ev, "binary", &q)?;
    ev.stack.push(result);
    Ok(())
}

pub fn ternary(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "ternary")?;
    let result = saved_call(ev, "ternary", &q)?;
    ev.stack.push(result);
    Ok(())
}

/// `unaryN`: apply Q to each of the top N values independently (each under
/// its own saved-stack call) and return N results, deepest-argument-first.
fn unary_n(ev: &mut Evaluator, prim: &str, n: usize) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, prim)?;
    let mut args = Vec::with_capacity(n);
    for _ in 0..n {
        args.push(pop(&mut ev.stack, prim)?);
    }
    args.reverse();
    let mut results = Vec::with_capacity(n);
    for a in args {
        ev.stack.push(a);
        results.push(saved_call(ev, prim, &q)?);
        ev.stack.pop();
    }
    for r in results {
        ev.stack.push(r);
    }
    Ok(())
}

pub fn unary2(ev: &mut Evaluator) -> Result<(), JoyError> {
    unary_n(ev, "unary2", 2)
}

pub fn unary3(ev: &mut Evaluator) -> Result<(), JoyError> {
    unary_n(ev, "unary3", 3)
}

pub fn unary4(ev: &mut Evaluator) -> Result<(), JoyError> {
    unary_n(ev, "unary4", 4)
}

/// `appN`: like `unaryN` but Q runs once with all N arguments present
/// together (positional structure preserved) rather than isolated one at a
/// time — a plain call, no save/restore, since Q naturally reaches only as
/// deep as it needs.
fn app_n(ev: &mut Evaluator, prim: &str, n: usize) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, prim)?;
    if ev.stack.len() < n {
        return Err(JoyError::underflow(prim, n, ev.stack.len()));
    }
    ev.execute_terms(&q)
}

pub fn app1(ev: &mut Evaluator) -> Result<(), JoyError> {
    app_n(ev, "app1", 1)
}

pub fn app2(ev: &mut Evaluator) -> Result<(), JoyError> {
    app_n(ev, "app2", 2)
}

pub fn app3(ev: &mut Evaluator) -> Result<(), JoyError> {
    app_n(ev, "app3", 3)
}

pub fn app4(ev: &mut Evaluator) -> Result<(), JoyError> {
    app_n(ev, "app4", 4)
}

/// `app11`: `X Y Q -> X' R`. Apply Q to the deeper argument Y, keeping the
/// shallower argument X untouched on the side.
pub fn app11(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "app11")?;
    let y = pop(&mut ev.stack, "app11")?;
    let x = pop(&mut ev.stack, "app11")?;
    ev.stack.push(y);
    ev.execute_terms(&q)?;
    let r = ev.stack.pop().ok_or_else(|| JoyError::underflow("app11", 1, 0))?;
    ev.stack.push(x);
    ev.stack.push(r);
    Ok(())
}

/// `app12`: `X Y Z Q -> X R1 R2`. Apply Q to each of the two deeper
/// arguments Y, Z independently, keeping X on the side.
pub fn app12(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "app12")?;
    let z = pop(&mut ev.stack, "app12")?;
    let y = pop(&mut ev.stack, "app12")?;
    let x = pop(&mut ev.stack, "app12")?;
    ev.stack.push(y);
    ev.execute_terms(&q)?;
    let r1 = ev.stack.pop().ok_or_else(|| JoyError::underflow("app12", 1, 0))?;
    ev.stack.push(z);
    ev.execute_terms(&q)?;
    let r2 = ev.stack.pop().ok_or_else(|| JoyError::underflow("app12", 1, 0))?;
    ev.stack.push(x);
    ev.stack.push(r1);
    ev.stack.push(r2);
    Ok(())
}

/// `cleave`: `X [P1] [P2] -> R1 R2`. Apply each quotation to X independently.
pub fn cleave(ev: &mut Evaluator) -> Result<(), JoyError> {
    let p2 = pop_quotation(&mut ev.stack, "cleave")?;
    let p1 = pop_quotation(&mut ev.stack, "cleave")?;
    let x = pop(&mut ev.stack, "cleave")?;
    ev.stack.push(x.clone());
    let r1 = saved_call(ev, "cleave", &p1)?;
    ev.stack.push(x);
    let r2 = saved_call(ev, "cleave", &p2)?;
    ev.stack.push(r1);
    ev.stack.push(r2);
    Ok(())
}

/// `construct`: `[P] [[P1] [P2] …] -> R1 R2 …`. Run P once to set up shared
/// context; for each Pi, restore that context and run Pi, collecting one
/// result per sub-quotation.
pub fn construct(ev: &mut Evaluator) -> Result<(), JoyError> {
    let subs_val = pop(&mut ev.stack, "construct")?;
    let p = pop_quotation(&mut ev.stack, "construct")?;
    let subs = subs_val
        .as_terms()
        .ok_or_else(|| JoyError::type_error("construct", "list of quotations", subs_val.kind_name()))?
        .to_vec();

    let base = ev.stack.clone();
    ev.execute_terms(&p)?;
    let context = ev.stack.clone();

    let mut results = Vec::with_capacity(subs.len());
    for sub in &subs {
        let terms = sub
            .as_terms()
            .ok_or_else(|| JoyError::type_error("construct", "quotation", sub.kind_name()))?;
        ev.stack = context.clone();
        ev.execute_terms(terms)?;
        let r = ev.stack.pop().ok_or_else(|| JoyError::underflow("construct", 1, 0))?;
        results.push(r);
    }
    ev.stack = base;
    ev.stack.extend(results);
    Ok(())
}

/// `infra`: `L [Q] -> L'`. Swap the real stack with L's contents, run Q,
/// read the result back into a LIST (TOS-first), restore the original
/// stack around it.
pub fn infra(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "infra")?;
    let l = pop(&mut ev.stack, "infra")?;
    let terms = l
        .as_terms()
        .ok_or_else(|| JoyError::type_error("infra", "list", l.kind_name()))?;
    let outer = std::mem::replace(&mut ev.stack, joy_core::stack::from_list_tos_first(terms));
    ev.execute_terms(&q)?;
    let result = joy_core::stack::to_list_tos_first(&ev.stack);
    ev.stack = outer;
    ev.stack.push(result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_saves_and_restores_the_stack() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
        ev.stack.push(Value::quotation(vec![Value::symbol("pop"), Value::symbol("pop"), Value::Int(99)]));
        unary(&mut ev).unwrap();
        assert_eq!(ev.stack, vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(99)]);
    }

    #[test]
    fn cleave_applies_both_quotations_to_the_same_value() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack.push(Value::Int(5));
        ev.stack.push(Value::quotation(vec![Value::symbol("succ")]));
        ev.stack.push(Value::quotation(vec![Value::symbol("pred")]));
        cleave(&mut ev).unwrap();
        assert_eq!(ev.stack, vec![Value::Int(6), Value::Int(4)]);
    }
}
