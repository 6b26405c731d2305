//! Loop combinators: `times`, `while`, `loop` (§4.6).

use super::test_predicate;
use crate::eval::Evaluator;
use crate::helpers::{pop_int, pop_quotation};
use joy_core::compare::truthy;
use joy_core::error::JoyError;

/// `times`: `N Q -> ...`. Execute Q exactly N times (N <= 0 is a no-op).
pub fn times(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "times")?;
    let n = pop_int(&mut ev.stack, "times")?;
    for _ in 0..n.max(0) {
        ev.execute_terms(&q)?;
    }
    Ok(())
}

/// `while`: `[B] [Q] -> ...`. Test B under snapshot/restore; while true,
/// run Q (on the live stack) and test again.
pub fn while_(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "while")?;
    let b = pop_quotation(&mut ev.stack, "while")?;
    loop {
        if !test_predicate(ev, &b)? {
            break;
        }
        ev.execute_terms(&q)?;
    }
    Ok(())
}

/// `loop`: `[Q] -> ...`. Run Q; Q must leave a boolean on top that decides
/// whether to run again (a do-while, with no separate predicate quotation).
pub fn loop_(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "loop")?;
    loop {
        ev.execute_terms(&q)?;
        let cont = ev.stack.pop().ok_or_else(|| JoyError::underflow("loop", 1, 0))?;
        if !truthy(&cont) {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use joy_core::value::Value;

    #[test]
    fn times_runs_exactly_n_times() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack.push(Value::Int(0));
        ev.stack.push(Value::Int(5));
        ev.stack.push(Value::quotation(vec![Value::symbol("succ")]));
        times(&mut ev).unwrap();
        assert_eq!(ev.stack, vec![Value::Int(5)]);
    }
}
