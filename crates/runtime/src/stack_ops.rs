//! Stack-shuffling primitives (spec §4.5).
//!
//! "Their `…d` variants operate one slot below TOS by saving/restoring the
//! top." Implemented generically with `below`, rather than hand-duplicating
//! each op, since the save/restore wrapper is identical for all of them.

use crate::helpers::pop;
use joy_core::error::JoyError;
use joy_core::value::Value;
use joy_core::Stack;

pub fn dup(stack: &mut Stack) -> Result<(), JoyError> {
    let top = stack.last().cloned().ok_or_else(|| JoyError::underflow("dup", 1, 0))?;
    stack.push(top);
    Ok(())
}

pub fn pop_op(stack: &mut Stack) -> Result<(), JoyError> {
    pop(stack, "pop").map(|_| ())
}

pub fn swap(stack: &mut Stack) -> Result<(), JoyError> {
    let y = pop(stack, "swap")?;
    let x = pop(stack, "swap")?;
    stack.push(y);
    stack.push(x);
    Ok(())
}

pub fn over(stack: &mut Stack) -> Result<(), JoyError> {
    let y = pop(stack, "over")?;
    let x = pop(stack, "over")?;
    stack.push(x.clone());
    stack.push(y);
    stack.push(x);
    Ok(())
}

pub fn dup2(stack: &mut Stack) -> Result<(), JoyError> {
    let y = pop(stack, "dup2")?;
    let x = pop(stack, "dup2")?;
    stack.push(x.clone());
    stack.push(y.clone());
    stack.push(x);
    stack.push(y);
    Ok(())
}

/// `X Y Z -> Z X Y`
pub fn rollup(stack: &mut Stack) -> Result<(), JoyError> {
    let z = pop(stack, "rollup")?;
    let y = pop(stack, "rollup")?;
    let x = pop(stack, "rollup")?;
    stack.push(z);
    stack.push(x);
    stack.push(y);
    Ok(())
}

/// `X Y Z -> Y Z X`
pub fn rolldown(stack: &mut Stack) -> Result<(), JoyError> {
    let z = pop(stack, "rolldown")?;
    let y = pop(stack, "rolldown")?;
    let x = pop(stack, "rolldown")?;
    stack.push(y);
    stack.push(z);
    stack.push(x);
    Ok(())
}

/// `X Y Z -> Z Y X`
pub fn rotate(stack: &mut Stack) -> Result<(), JoyError> {
    let z = pop(stack, "rotate")?;
    let y = pop(stack, "rotate")?;
    let x = pop(stack, "rotate")?;
    stack.push(z);
    stack.push(y);
    stack.push(x);
    Ok(())
}

/// Save TOS, run `f` on the stack below it, restore TOS on top.
fn below(
    stack: &mut Stack,
    prim: &str,
    f: impl Fn(&mut Stack) -> Result<(), JoyError>,
) -> Result<(), JoyError> {
    let top = pop(stack, prim)?;
    f(stack)?;
    stack.push(top);
    Ok(())
}

pub fn dupd(stack: &mut Stack) -> Result<(), JoyError> {
    below(stack, "dupd", dup)
}

pub fn popd(stack: &mut Stack) -> Result<(), JoyError> {
    below(stack, "popd", pop_op)
}

pub fn swapd(stack: &mut Stack) -> Result<(), JoyError> {
    below(stack, "swapd", swap)
}

pub fn overd(stack: &mut Stack) -> Result<(), JoyError> {
    below(stack, "overd", over)
}

pub fn dup2d(stack: &mut Stack) -> Result<(), JoyError> {
    below(stack, "dup2d", dup2)
}

pub fn rollupd(stack: &mut Stack) -> Result<(), JoyError> {
    below(stack, "rollupd", rollup)
}

pub fn rolldownd(stack: &mut Stack) -> Result<(), JoyError> {
    below(stack, "rolldownd", rolldown)
}

pub fn rotated(stack: &mut Stack) -> Result<(), JoyError> {
    below(stack, "rotated", rotate)
}

/// Snapshot the whole stack into a LIST, TOS first (§4.5 `stack`).
pub fn stack_to_list(stack: &mut Stack) -> Result<(), JoyError> {
    let list = joy_core::stack::to_list_tos_first(stack);
    stack.push(list);
    Ok(())
}

/// Replace the stack with a LIST's contents, preserving TOS-first order
/// (§4.5 `unstack`).
pub fn unstack(stack: &mut Stack) -> Result<(), JoyError> {
    let top = pop(stack, "unstack")?;
    let terms = top
        .as_terms()
        .ok_or_else(|| JoyError::type_error("unstack", "list", top.kind_name()))?;
    *stack = joy_core::stack::from_list_tos_first(terms);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dup_pop_is_identity() {
        let mut s: Stack = vec![Value::Int(7)];
        dup(&mut s).unwrap();
        pop_op(&mut s).unwrap();
        assert_eq!(s, vec![Value::Int(7)]);
    }

    #[test]
    fn swap_twice_is_identity() {
        let mut s: Stack = vec![Value::Int(1), Value::Int(2)];
        swap(&mut s).unwrap();
        swap(&mut s).unwrap();
        assert_eq!(s, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn dupd_saves_and_restores_top() {
        let mut s: Stack = vec![Value::Int(1), Value::Int(2)];
        dupd(&mut s).unwrap();
        assert_eq!(s, vec![Value::Int(1), Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn rollup_and_rolldown_are_inverses() {
        let mut s: Stack = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
        rollup(&mut s).unwrap();
        rolldown(&mut s).unwrap();
        assert_eq!(s, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }
}
