//! Logical primitives (spec §4.5): "Logical `and`/`or`/`not`/`xor` operate
//! on sets as bitmask operations when all operands are sets; otherwise as
//! boolean ops on truthiness."

use crate::helpers::pop;
use joy_core::compare::truthy;
use joy_core::error::JoyError;
use joy_core::value::Value;
use joy_core::Stack;

fn binop(
    stack: &mut Stack,
    prim: &str,
    set_op: impl Fn(u64, u64) -> u64,
    bool_op: impl Fn(bool, bool) -> bool,
) -> Result<(), JoyError> {
    let b = pop(stack, prim)?;
    let a = pop(stack, prim)?;
    let result = match (&a, &b) {
        (Value::Set(x), Value::Set(y)) => Value::Set(set_op(*x, *y)),
        _ => Value::Bool(bool_op(truthy(&a), truthy(&b))),
    };
    stack.push(result);
    Ok(())
}

pub fn and(stack: &mut Stack) -> Result<(), JoyError> {
    binop(stack, "and", |x, y| x & y, |x, y| x && y)
}

pub fn or(stack: &mut Stack) -> Result<(), JoyError> {
    binop(stack, "or", |x, y| x | y, |x, y| x || y)
}

pub fn xor(stack: &mut Stack) -> Result<(), JoyError> {
    binop(stack, "xor", |x, y| x ^ y, |x, y| x != y)
}

pub fn not(stack: &mut Stack) -> Result<(), JoyError> {
    let a = pop(stack, "not")?;
    let result = match a {
        Value::Set(s) => Value::Set(!s),
        other => Value::Bool(!truthy(&other)),
    };
    stack.push(result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_on_sets_is_intersection() {
        let mut s: Stack = vec![Value::Set(0b0110), Value::Set(0b1010)];
        and(&mut s).unwrap();
        assert_eq!(s, vec![Value::Set(0b0010)]);
    }

    #[test]
    fn or_on_non_sets_is_boolean() {
        let mut s: Stack = vec![Value::Int(0), Value::Int(5)];
        or(&mut s).unwrap();
        assert_eq!(s, vec![Value::Bool(true)]);
    }
}
