//! Numeric and character-conversion primitives (spec §4.5, §4.7).

use crate::helpers::{pop, pop_int, pop_number, pop_string};
use joy_core::error::JoyError;
use joy_core::value::Value;
use joy_core::Stack;

fn unary_float(stack: &mut Stack, prim: &str, f: impl Fn(f64) -> f64) -> Result<(), JoyError> {
    let x = pop_number(stack, prim)?;
    stack.push(Value::Float(f(x)));
    Ok(())
}

pub fn sin(stack: &mut Stack) -> Result<(), JoyError> {
    unary_float(stack, "sin", f64::sin)
}
pub fn cos(stack: &mut Stack) -> Result<(), JoyError> {
    unary_float(stack, "cos", f64::cos)
}
pub fn tan(stack: &mut Stack) -> Result<(), JoyError> {
    unary_float(stack, "tan", f64::tan)
}
pub fn asin(stack: &mut Stack) -> Result<(), JoyError> {
    unary_float(stack, "asin", f64::asin)
}
pub fn acos(stack: &mut Stack) -> Result<(), JoyError> {
    unary_float(stack, "acos", f64::acos)
}
pub fn atan(stack: &mut Stack) -> Result<(), JoyError> {
    unary_float(stack, "atan", f64::atan)
}

pub fn atan2(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop_number(stack, "atan2")?;
    let y = pop_number(stack, "atan2")?;
    stack.push(Value::Float(y.atan2(x)));
    Ok(())
}

pub fn sinh(stack: &mut Stack) -> Result<(), JoyError> {
    unary_float(stack, "sinh", f64::sinh)
}
pub fn cosh(stack: &mut Stack) -> Result<(), JoyError> {
    unary_float(stack, "cosh", f64::cosh)
}
pub fn tanh(stack: &mut Stack) -> Result<(), JoyError> {
    unary_float(stack, "tanh", f64::tanh)
}
pub fn exp(stack: &mut Stack) -> Result<(), JoyError> {
    unary_float(stack, "exp", f64::exp)
}
pub fn log(stack: &mut Stack) -> Result<(), JoyError> {
    unary_float(stack, "log", f64::ln)
}
pub fn log10(stack: &mut Stack) -> Result<(), JoyError> {
    unary_float(stack, "log10", f64::log10)
}

pub fn sqrt(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop_number(stack, "sqrt")?;
    if x < 0.0 {
        return Err(JoyError::domain("sqrt: negative operand"));
    }
    stack.push(Value::Float(x.sqrt()));
    Ok(())
}

pub fn pow(stack: &mut Stack) -> Result<(), JoyError> {
    let y = pop(stack, "pow")?;
    let x = pop(stack, "pow")?;
    let result = match (&x, &y) {
        (Value::Int(a), Value::Int(b)) if *b >= 0 => Value::Int(a.pow(*b as u32)),
        _ => {
            let a = to_f64(&x, "pow")?;
            let b = to_f64(&y, "pow")?;
            Value::Float(a.powf(b))
        }
    };
    stack.push(result);
    Ok(())
}

fn to_f64(v: &Value, prim: &str) -> Result<f64, JoyError> {
    match v {
        Value::Int(i) => Ok(*i as f64),
        Value::Float(f) => Ok(*f),
        other => Err(JoyError::type_error(prim, "integer or float", other.kind_name())),
    }
}

pub fn floor(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop(stack, "floor")?;
    match x {
        Value::Int(i) => stack.push(Value::Int(i)),
        Value::Float(f) => stack.push(Value::Int(f.floor() as i64)),
        other => return Err(JoyError::type_error("floor", "integer or float", other.kind_name())),
    }
    Ok(())
}

pub fn ceil(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop(stack, "ceil")?;
    match x {
        Value::Int(i) => stack.push(Value::Int(i)),
        Value::Float(f) => stack.push(Value::Int(f.ceil() as i64)),
        other => return Err(JoyError::type_error("ceil", "integer or float", other.kind_name())),
    }
    Ok(())
}

pub fn trunc(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop(stack, "trunc")?;
    match x {
        Value::Int(i) => stack.push(Value::Int(i)),
        Value::Float(f) => stack.push(Value::Int(f.trunc() as i64)),
        other => return Err(JoyError::type_error("trunc", "integer or float", other.kind_name())),
    }
    Ok(())
}

pub fn abs(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop(stack, "abs")?;
    match x {
        Value::Int(i) => stack.push(Value::Int(i.abs())),
        Value::Float(f) => stack.push(Value::Float(f.abs())),
        other => return Err(JoyError::type_error("abs", "integer or float", other.kind_name())),
    }
    Ok(())
}

pub fn neg(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop(stack, "neg")?;
    match x {
        Value::Int(i) => stack.push(Value::Int(-i)),
        Value::Float(f) => stack.push(Value::Float(-f)),
        other => return Err(JoyError::type_error("neg", "integer or float", other.kind_name())),
    }
    Ok(())
}

pub fn sign(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop(stack, "sign")?;
    match x {
        Value::Int(i) => stack.push(Value::Int(i.signum())),
        Value::Float(f) => stack.push(Value::Float(if f > 0.0 { 1.0 } else if f < 0.0 { -1.0 } else { 0.0 })),
        other => return Err(JoyError::type_error("sign", "integer or float", other.kind_name())),
    }
    Ok(())
}

pub fn min(stack: &mut Stack) -> Result<(), JoyError> {
    let b = pop(stack, "min")?;
    let a = pop(stack, "min")?;
    let result = if matches!(joy_core::compare::compare(&a, &b), joy_core::compare::Ordering3::Greater) {
        b
    } else {
        a
    };
    stack.push(result);
    Ok(())
}

pub fn max(stack: &mut Stack) -> Result<(), JoyError> {
    let b = pop(stack, "max")?;
    let a = pop(stack, "max")?;
    let result = if matches!(joy_core::compare::compare(&a, &b), joy_core::compare::Ordering3::Less) {
        b
    } else {
        a
    };
    stack.push(result);
    Ok(())
}

pub fn succ(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop(stack, "succ")?;
    match x {
        Value::Int(i) => stack.push(Value::Int(i + 1)),
        Value::Float(f) => stack.push(Value::Float(f + 1.0)),
        other => return Err(JoyError::type_error("succ", "integer or float", other.kind_name())),
    }
    Ok(())
}

pub fn pred(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop(stack, "pred")?;
    match x {
        Value::Int(i) => stack.push(Value::Int(i - 1)),
        Value::Float(f) => stack.push(Value::Float(f - 1.0)),
        other => return Err(JoyError::type_error("pred", "integer or float", other.kind_name())),
    }
    Ok(())
}

pub fn frexp(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop_number(stack, "frexp")?;
    if x == 0.0 {
        stack.push(Value::Float(0.0));
        stack.push(Value::Int(0));
        return Ok(());
    }
    let exponent = x.abs().log2().floor() as i32 + 1;
    let mantissa = x / 2f64.powi(exponent);
    stack.push(Value::Float(mantissa));
    stack.push(Value::Int(exponent as i64));
    Ok(())
}

pub fn ldexp(stack: &mut Stack) -> Result<(), JoyError> {
    let exponent = pop_int(stack, "ldexp")?;
    let mantissa = pop_number(stack, "ldexp")?;
    stack.push(Value::Float(mantissa * 2f64.powi(exponent as i32)));
    Ok(())
}

pub fn modf(stack: &mut Stack) -> Result<(), JoyError> {
    let x = pop_number(stack, "modf")?;
    stack.push(Value::Float(x.trunc()));
    stack.push(Value::Float(x.fract()));
    Ok(())
}

pub fn chr(stack: &mut Stack) -> Result<(), JoyError> {
    let i = pop_int(stack, "chr")?;
    let byte = u8::try_from(i).map_err(|_| JoyError::domain(format!("chr: {i} out of byte range")))?;
    stack.push(Value::Char(byte));
    Ok(())
}

pub fn ord(stack: &mut Stack) -> Result<(), JoyError> {
    let v = pop(stack, "ord")?;
    let n = match v {
        Value::Char(c) => c as i64,
        Value::Bool(b) => b as i64,
        other => return Err(JoyError::type_error("ord", "char or logical", other.kind_name())),
    };
    stack.push(Value::Int(n));
    Ok(())
}

pub fn strtol(stack: &mut Stack) -> Result<(), JoyError> {
    let radix = pop_int(stack, "strtol")?;
    let s = pop_string(stack, "strtol")?;
    let radix = u32::try_from(radix).map_err(|_| JoyError::domain("strtol: invalid radix"))?;
    match i64::from_str_radix(s.trim(), radix) {
        Ok(n) => stack.push(Value::Int(n)),
        Err(_) => stack.push(Value::Int(0)),
    }
    Ok(())
}

pub fn strtod(stack: &mut Stack) -> Result<(), JoyError> {
    let s = pop_string(stack, "strtod")?;
    match s.trim().parse::<f64>() {
        Ok(f) => stack.push(Value::Float(f)),
        Err(_) => stack.push(Value::Float(0.0)),
    }
    Ok(())
}

pub fn format(stack: &mut Stack) -> Result<(), JoyError> {
    let width = pop_int(stack, "format")?;
    let n = pop_int(stack, "format")?;
    stack.push(Value::str(format!("{n:>width$}", width = width.unsigned_abs() as usize)));
    Ok(())
}

pub fn formatf(stack: &mut Stack) -> Result<(), JoyError> {
    let precision = pop_int(stack, "formatf")?;
    let width = pop_int(stack, "formatf")?;
    let f = pop_number(stack, "formatf")?;
    let precision = precision.max(0) as usize;
    stack.push(Value::str(format!(
        "{f:>width$.precision$}",
        width = width.unsigned_abs() as usize,
        precision = precision
    )));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow_keeps_integers_when_exponent_is_nonnegative() {
        let mut s: Stack = vec![Value::Int(2), Value::Int(10)];
        pow(&mut s).unwrap();
        assert_eq!(s, vec![Value::Int(1024)]);
    }

    #[test]
    fn sqrt_of_negative_is_domain_error() {
        let mut s: Stack = vec![Value::Float(-1.0)];
        assert!(sqrt(&mut s).is_err());
    }

    #[test]
    fn chr_and_ord_are_inverses() {
        let mut s: Stack = vec![Value::Int(65)];
        chr(&mut s).unwrap();
        ord(&mut s).unwrap();
        assert_eq!(s, vec![Value::Int(65)]);
    }
}
