//! Quotation application: `i`, `x`, `dip`, `dipd`, `dipdd` (§4.6).

use crate::eval::Evaluator;
use crate::helpers::{pop, pop_quotation};
use joy_core::error::JoyError;
use joy_core::value::Value;

/// `i`: `Q -> ...`. Execute Q immediately.
pub fn i(ev: &mut Evaluator) -> Result<(), JoyError> {
    let terms = pop_quotation(&mut ev.stack, "i")?;
    ev.execute_terms(&terms)
}

/// `x`: `Q -> ... Q`. `x == dup i` — the quotation survives its own
/// execution, which is what makes self-application combinators possible.
pub fn x(ev: &mut Evaluator) -> Result<(), JoyError> {
    let terms = pop_quotation(&mut ev.stack, "x")?;
    ev.stack.push(Value::Quotation(terms.clone()));
    ev.execute_terms(&terms)
}

/// `dip`: `X Q -> ... X`. Hide X below Q, run Q, restore X on top.
pub fn dip(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "dip")?;
    let x = pop(&mut ev.stack, "dip")?;
    ev.execute_terms(&q)?;
    ev.stack.push(x);
    Ok(())
}

/// `dipd`: `X Y Q -> ... X Y`. Hide the top two below Q.
pub fn dipd(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "dipd")?;
    let y = pop(&mut ev.stack, "dipd")?;
    let x = pop(&mut ev.stack, "dipd")?;
    ev.execute_terms(&q)?;
    ev.stack.push(x);
    ev.stack.push(y);
    Ok(())
}

/// `dipdd`: `X Y Z Q -> ... X Y Z`. Hide the top three below Q.
pub fn dipdd(ev: &mut Evaluator) -> Result<(), JoyError> {
    let q = pop_quotation(&mut ev.stack, "dipdd")?;
    let z = pop(&mut ev.stack, "dipdd")?;
    let y = pop(&mut ev.stack, "dipdd")?;
    let x = pop(&mut ev.stack, "dipdd")?;
    ev.execute_terms(&q)?;
    ev.stack.push(x);
    ev.stack.push(y);
    ev.stack.push(z);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use joy_core::Stack;

    fn stack(ev: &Evaluator) -> &Stack {
        &ev.stack
    }

    #[test]
    fn dip_hides_and_restores() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack = vec![Value::Int(10), Value::Int(2), Value::Int(3)];
        ev.stack.push(Value::quotation(vec![Value::symbol("+")]));
        dip(&mut ev).unwrap();
        assert_eq!(stack(&ev), &vec![Value::Int(12), Value::Int(3)]);
    }
}
