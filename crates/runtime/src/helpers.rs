//! Typed pop helpers shared by every primitive module.
//!
//! Each one enforces the arity/type contract a primitive declares (§4.4):
//! "Each primitive declares an arity... Each primitive that requires
//! specific input kinds raises a type error on mismatch."

use joy_core::error::JoyError;
use joy_core::stack::Stack;
use joy_core::value::Value;

pub fn pop(stack: &mut Stack, prim: &str) -> Result<Value, JoyError> {
    joy_core::stack::pop(stack, prim)
}

pub fn pop_int(stack: &mut Stack, prim: &str) -> Result<i64, JoyError> {
    match pop(stack, prim)? {
        Value::Int(i) => Ok(i),
        other => Err(JoyError::type_error(prim, "integer", other.kind_name())),
    }
}

pub fn pop_number(stack: &mut Stack, prim: &str) -> Result<f64, JoyError> {
    match pop(stack, prim)? {
        Value::Int(i) => Ok(i as f64),
        Value::Float(f) => Ok(f),
        other => Err(JoyError::type_error(prim, "integer or float", other.kind_name())),
    }
}

pub fn pop_bool(stack: &mut Stack, prim: &str) -> Result<bool, JoyError> {
    match pop(stack, prim)? {
        Value::Bool(b) => Ok(b),
        other => Err(JoyError::type_error(prim, "logical", other.kind_name())),
    }
}

pub fn pop_char(stack: &mut Stack, prim: &str) -> Result<u8, JoyError> {
    match pop(stack, prim)? {
        Value::Char(c) => Ok(c),
        other => Err(JoyError::type_error(prim, "char", other.kind_name())),
    }
}

pub fn pop_string(stack: &mut Stack, prim: &str) -> Result<std::rc::Rc<str>, JoyError> {
    match pop(stack, prim)? {
        Value::Str(s) => Ok(s),
        other => Err(JoyError::type_error(prim, "string", other.kind_name())),
    }
}

pub fn pop_symbol(stack: &mut Stack, prim: &str) -> Result<std::rc::Rc<str>, JoyError> {
    match pop(stack, prim)? {
        Value::Symbol(s) => Ok(s),
        other => Err(JoyError::type_error(prim, "symbol", other.kind_name())),
    }
}

pub fn pop_set(stack: &mut Stack, prim: &str) -> Result<u64, JoyError> {
    match pop(stack, prim)? {
        Value::Set(s) => Ok(s),
        other => Err(JoyError::type_error(prim, "set", other.kind_name())),
    }
}

pub fn pop_file(stack: &mut Stack, prim: &str) -> Result<joy_core::value::FileHandle, JoyError> {
    match pop(stack, prim)? {
        Value::File(f) => Ok(f),
        other => Err(JoyError::type_error(prim, "file", other.kind_name())),
    }
}

/// Pop a LIST or QUOTATION's term sequence (combinators accept either, per
/// §3.1).
pub fn pop_quotation(stack: &mut Stack, prim: &str) -> Result<std::rc::Rc<[Value]>, JoyError> {
    match pop(stack, prim)? {
        Value::List(v) | Value::Quotation(v) => Ok(v),
        other => Err(JoyError::type_error(prim, "quotation", other.kind_name())),
    }
}

/// Pop any aggregate (LIST, QUOTATION, STRING, or SET) as a vector of
/// elements, remembering which kind it was for type-preservation (§4.5).
pub enum AggKind {
    List,
    Quotation,
    Str,
    Set,
}

pub fn pop_aggregate(
    stack: &mut Stack,
    prim: &str,
) -> Result<(AggKind, Vec<Value>), JoyError> {
    match pop(stack, prim)? {
        Value::List(v) => Ok((AggKind::List, v.to_vec())),
        Value::Quotation(v) => Ok((AggKind::Quotation, v.to_vec())),
        Value::Str(s) => Ok((AggKind::Str, s.bytes().map(Value::Char).collect())),
        Value::Set(s) => Ok((
            AggKind::Set,
            (0..64).filter(|b| s & (1 << b) != 0).map(Value::Int).collect(),
        )),
        other => Err(JoyError::type_error(
            prim,
            "aggregate",
            other.kind_name(),
        )),
    }
}

/// Rebuild an aggregate of the recorded kind from a vector of elements.
/// When a STRING-in op produces non-char elements, or a SET-in op produces
/// non-integer-in-range elements, it falls back to LIST (§3.2, §4.5).
pub fn rebuild_aggregate(kind: AggKind, elems: Vec<Value>) -> Value {
    match kind {
        AggKind::List => Value::list(elems),
        AggKind::Quotation => Value::list(elems),
        AggKind::Str => {
            if elems.iter().all(|v| matches!(v, Value::Char(_))) {
                let bytes: Vec<u8> = elems
                    .into_iter()
                    .map(|v| match v {
                        Value::Char(c) => c,
                        _ => unreachable!(),
                    })
                    .collect();
                Value::str(String::from_utf8_lossy(&bytes).into_owned())
            } else {
                Value::list(elems)
            }
        }
        AggKind::Set => {
            if elems
                .iter()
                .all(|v| matches!(v, Value::Int(i) if (0..64).contains(i)))
            {
                let mut mask = 0u64;
                for v in &elems {
                    if let Value::Int(i) = v {
                        mask |= 1 << i;
                    }
                }
                Value::Set(mask)
            } else {
                Value::list(elems)
            }
        }
    }
}
