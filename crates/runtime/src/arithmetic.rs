//! Arithmetic and comparison primitives (spec §4.5).
//!
//! "Arithmetic promotes INTEGER to FLOAT when any operand is FLOAT. `/` is
//! true division for floats, floor-truncating for two integers. `rem` is
//! integer remainder only."

use crate::helpers::{pop, pop_int, pop_number};
use joy_core::compare;
use joy_core::error::JoyError;
use joy_core::value::Value;
use joy_core::Stack;

enum Num {
    Int(i64),
    Float(f64),
}

fn pop_num(stack: &mut Stack, prim: &str) -> Result<Num, JoyError> {
    match pop(stack, prim)? {
        Value::Int(i) => Ok(Num::Int(i)),
        Value::Float(f) => Ok(Num::Float(f)),
        other => Err(JoyError::type_error(prim, "integer or float", other.kind_name())),
    }
}

fn binop(
    stack: &mut Stack,
    prim: &str,
    int_op: impl Fn(i64, i64) -> Option<i64>,
    float_op: impl Fn(f64, f64) -> f64,
) -> Result<(), JoyError> {
    let b = pop_num(stack, prim)?;
    let a = pop_num(stack, prim)?;
    let result = match (a, b) {
        (Num::Int(x), Num::Int(y)) => match int_op(x, y) {
            Some(r) => Value::Int(r),
            None => return Err(JoyError::domain(format!("{prim}: integer overflow"))),
        },
        (Num::Int(x), Num::Float(y)) => Value::Float(float_op(x as f64, y)),
        (Num::Float(x), Num::Int(y)) => Value::Float(float_op(x, y as f64)),
        (Num::Float(x), Num::Float(y)) => Value::Float(float_op(x, y)),
    };
    stack.push(result);
    Ok(())
}

pub fn add(stack: &mut Stack) -> Result<(), JoyError> {
    binop(stack, "+", |x, y| x.checked_add(y), |x, y| x + y)
}

pub fn sub(stack: &mut Stack) -> Result<(), JoyError> {
    binop(stack, "-", |x, y| x.checked_sub(y), |x, y| x - y)
}

pub fn mul(stack: &mut Stack) -> Result<(), JoyError> {
    binop(stack, "*", |x, y| x.checked_mul(y), |x, y| x * y)
}

pub fn div(stack: &mut Stack) -> Result<(), JoyError> {
    let b = pop_num(stack, "/")?;
    let a = pop_num(stack, "/")?;
    let result = match (a, b) {
        (Num::Int(x), Num::Int(y)) => {
            if y == 0 {
                return Err(JoyError::domain("/: division by zero"));
            }
            Value::Int(floor_div(x, y))
        }
        (Num::Int(x), Num::Float(y)) => Value::Float(x as f64 / y),
        (Num::Float(x), Num::Int(y)) => Value::Float(x / y as f64),
        (Num::Float(x), Num::Float(y)) => Value::Float(x / y),
    };
    stack.push(result);
    Ok(())
}

pub fn rem(stack: &mut Stack) -> Result<(), JoyError> {
    let b = pop_int(stack, "rem")?;
    let a = pop_int(stack, "rem")?;
    if b == 0 {
        return Err(JoyError::domain("rem: division by zero"));
    }
    stack.push(Value::Int(a % b));
    Ok(())
}

/// Floor division: rounds toward negative infinity, unlike Rust's default
/// truncating `/` (§4.5: "`/` is... floor-truncating for two integers").
fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

fn cmp_prim(stack: &mut Stack, prim: &str, want_equal: bool, want_less: bool, want_greater: bool) -> Result<(), JoyError> {
    let b = pop(stack, prim)?;
    let a = pop(stack, prim)?;
    let ord = compare::compare(&a, &b);
    let hit = match ord {
        compare::Ordering3::Less => want_less,
        compare::Ordering3::Equal => want_equal,
        compare::Ordering3::Greater => want_greater,
    };
    stack.push(Value::Bool(hit));
    Ok(())
}

pub fn eq(stack: &mut Stack) -> Result<(), JoyError> {
    let b = pop(stack, "=")?;
    let a = pop(stack, "=")?;
    stack.push(Value::Bool(compare::equal(&a, &b)));
    Ok(())
}

pub fn neq(stack: &mut Stack) -> Result<(), JoyError> {
    let b = pop(stack, "!=")?;
    let a = pop(stack, "!=")?;
    stack.push(Value::Bool(!compare::equal(&a, &b)));
    Ok(())
}

pub fn lt(stack: &mut Stack) -> Result<(), JoyError> {
    cmp_prim(stack, "<", false, true, false)
}

pub fn gt(stack: &mut Stack) -> Result<(), JoyError> {
    cmp_prim(stack, ">", false, false, true)
}

pub fn lte(stack: &mut Stack) -> Result<(), JoyError> {
    cmp_prim(stack, "<=", true, true, false)
}

pub fn gte(stack: &mut Stack) -> Result<(), JoyError> {
    cmp_prim(stack, ">=", true, false, true)
}

pub fn joy_compare(stack: &mut Stack) -> Result<(), JoyError> {
    let b = pop(stack, "compare")?;
    let a = pop(stack, "compare")?;
    stack.push(Value::Int(compare::compare(&a, &b).to_int()));
    Ok(())
}

pub fn equal(stack: &mut Stack) -> Result<(), JoyError> {
    let b = pop(stack, "equal")?;
    let a = pop(stack, "equal")?;
    stack.push(Value::Bool(compare::equal(&a, &b)));
    Ok(())
}

/// Numeric bound for `pop_number`'s promotion use in other modules.
pub fn as_f64(stack: &mut Stack, prim: &str) -> Result<f64, JoyError> {
    pop_number(stack, prim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_division_floors() {
        let mut s: Stack = vec![Value::Int(7), Value::Int(2)];
        div(&mut s).unwrap();
        assert_eq!(s, vec![Value::Int(3)]);
    }

    #[test]
    fn mixed_arithmetic_promotes_to_float() {
        let mut s: Stack = vec![Value::Int(1), Value::Float(0.5)];
        add(&mut s).unwrap();
        assert_eq!(s, vec![Value::Float(1.5)]);
    }

    #[test]
    fn division_by_zero_is_domain_error() {
        let mut s: Stack = vec![Value::Int(1), Value::Int(0)];
        assert!(div(&mut s).is_err());
    }
}
