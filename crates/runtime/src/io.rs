//! Output primitives (spec §4.5, §4.8): `put`, `putln`, `putch`, `putchars`,
//! and `.` (print TOS to stdout, the same renderer `autoput` uses).

use crate::helpers::{pop, pop_char, pop_string};
use joy_core::error::JoyError;
use joy_core::value::Value;
use joy_core::Stack;
use std::io::{BufRead, Write as _};

/// Render a value the way Joy prints it: strings without quotes, chars as
/// the raw byte, aggregates bracketed and space-separated.
pub fn print_value(v: &Value) {
    print!("{}", format_value(v));
}

pub fn format_value(v: &Value) -> String {
    match v {
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::Bool(b) => if *b { "true".to_string() } else { "false".to_string() },
        Value::Char(c) => (*c as char).to_string(),
        Value::Str(s) => s.to_string(),
        Value::Symbol(s) => s.to_string(),
        Value::Set(s) => format_set(*s),
        Value::List(v) | Value::Quotation(v) => format_aggregate(v),
        Value::File(_) => "<file>".to_string(),
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

fn format_set(mask: u64) -> String {
    let members: Vec<String> = (0..64).filter(|b| mask & (1 << b) != 0).map(|b| b.to_string()).collect();
    format!("{{{}}}", members.join(" "))
}

fn format_aggregate(terms: &[Value]) -> String {
    let parts: Vec<String> = terms.iter().map(format_value).collect();
    format!("[{}]", parts.join(" "))
}

pub fn put(stack: &mut Stack) -> Result<(), JoyError> {
    let v = pop(stack, "put")?;
    print!("{}", format_value(&v));
    let _ = std::io::stdout().flush();
    Ok(())
}

pub fn putln(stack: &mut Stack) -> Result<(), JoyError> {
    let v = pop(stack, "putln")?;
    println!("{}", format_value(&v));
    Ok(())
}

pub fn putch(stack: &mut Stack) -> Result<(), JoyError> {
    let c = pop_char(stack, "putch")?;
    print!("{}", c as char);
    let _ = std::io::stdout().flush();
    Ok(())
}

pub fn putchars(stack: &mut Stack) -> Result<(), JoyError> {
    let s = pop_string(stack, "putchars")?;
    print!("{s}");
    let _ = std::io::stdout().flush();
    Ok(())
}

pub fn dot(stack: &mut Stack) -> Result<(), JoyError> {
    let v = pop(stack, ".")?;
    println!("{}", format_value(&v));
    Ok(())
}

/// `get`: read one line from stdin and parse a single term from it via the
/// host parser (§4.7). Compiled code stubs this out with a warning (§6) —
/// the tree-walking evaluator is the only place it works for real.
pub fn get(stack: &mut Stack) -> Result<(), JoyError> {
    let mut line = String::new();
    let n = std::io::stdin().lock().read_line(&mut line).map_err(|e| JoyError::domain(format!("get: {e}")))?;
    if n == 0 {
        return Err(JoyError::domain("get: end of input"));
    }
    let term = joy_core::parser::parse_one_term(&line)?;
    stack.push(term);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_aggregates_bracketed() {
        let v = Value::list(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(format_value(&v), "[1 2]");
    }

    #[test]
    fn formats_sets_as_braces() {
        assert_eq!(format_set(0b101), "{0 2}");
    }
}
