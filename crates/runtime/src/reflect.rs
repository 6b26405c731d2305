//! Reflection and process-control primitives (spec §4.8): dictionary
//! introspection plus the `autoput`/`echo`/`undeferror` flag accessors that
//! make the evaluator context mutable from within a running program.

use crate::eval::Evaluator;
use crate::helpers::{pop, pop_bool, pop_int, pop_symbol};
use joy_core::dict::Binding;
use joy_core::error::JoyError;
use joy_core::value::Value;

pub fn name(ev: &mut Evaluator) -> Result<(), JoyError> {
    let v = pop(&mut ev.stack, "name")?;
    let n = match v {
        Value::Symbol(s) => s,
        other => other.kind_name().into(),
    };
    ev.stack.push(Value::Symbol(n));
    Ok(())
}

pub fn intern(ev: &mut Evaluator) -> Result<(), JoyError> {
    let s = crate::helpers::pop_string(&mut ev.stack, "intern")?;
    ev.stack.push(Value::Symbol(s));
    Ok(())
}

/// `body`: W -> Q, the defined quotation body of a user word, or the empty
/// quotation for a primitive (§4.8). `Dictionary::body_of` already returns
/// `[]` for anything that isn't a user binding, so there is nothing else to
/// check here.
pub fn body(ev: &mut Evaluator) -> Result<(), JoyError> {
    let sym = pop_symbol(&mut ev.stack, "body")?;
    let terms = ev.dict.body_of(sym.as_ref()).to_vec();
    ev.stack.push(Value::quotation(terms));
    Ok(())
}

/// `user`: W -> BOOL, true iff `W` is bound to a user definition (§4.8).
pub fn user(ev: &mut Evaluator) -> Result<(), JoyError> {
    let sym = pop_symbol(&mut ev.stack, "user")?;
    ev.stack.push(Value::Bool(ev.dict.is_user(sym.as_ref())));
    Ok(())
}

pub fn get_autoput(ev: &mut Evaluator) -> Result<(), JoyError> {
    ev.stack.push(Value::Bool(ev.autoput));
    Ok(())
}

pub fn set_autoput(ev: &mut Evaluator) -> Result<(), JoyError> {
    ev.autoput = pop_bool(&mut ev.stack, "setautoput")?;
    Ok(())
}

pub fn get_undeferror(ev: &mut Evaluator) -> Result<(), JoyError> {
    ev.stack.push(Value::Bool(ev.undeferror));
    Ok(())
}

pub fn set_undeferror(ev: &mut Evaluator) -> Result<(), JoyError> {
    ev.undeferror = pop_bool(&mut ev.stack, "setundeferror")?;
    Ok(())
}

pub fn get_echo(ev: &mut Evaluator) -> Result<(), JoyError> {
    ev.stack.push(Value::Int(ev.echo as i64));
    Ok(())
}

pub fn set_echo(ev: &mut Evaluator) -> Result<(), JoyError> {
    let n = pop_int(&mut ev.stack, "setecho")?;
    ev.echo = n.clamp(0, 3) as u8;
    Ok(())
}

pub fn abort(_ev: &mut Evaluator) -> Result<(), JoyError> {
    Err(JoyError::domain("abort"))
}

pub fn quit(_ev: &mut Evaluator) -> Result<(), JoyError> {
    std::process::exit(0);
}

/// No-op: the tree-walking evaluator has no explicit GC to trigger (§4.10
/// `trace_gc` flag is likewise a no-op outside the compiled runtime).
pub fn gc(_ev: &mut Evaluator) -> Result<(), JoyError> {
    Ok(())
}

pub fn maxint(ev: &mut Evaluator) -> Result<(), JoyError> {
    ev.stack.push(Value::Int(i64::MAX));
    Ok(())
}

pub fn unassign(ev: &mut Evaluator) -> Result<(), JoyError> {
    let sym = pop_symbol(&mut ev.stack, "unassign")?;
    let exists = matches!(ev.dict.get(sym.as_ref()), Some(Binding::User(_)));
    if !exists {
        return Err(JoyError::domain(format!("unassign: {sym} is not a user-defined word")));
    }
    ev.unassign(sym.as_ref());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_returns_the_defined_quotation() {
        let mut ev = Evaluator::new(vec![]);
        ev.define("twice", vec![Value::symbol("dup"), Value::symbol("+")]);
        ev.stack.push(Value::symbol("twice"));
        body(&mut ev).unwrap();
        assert_eq!(
            ev.stack,
            vec![Value::quotation(vec![Value::symbol("dup"), Value::symbol("+")])]
        );
    }

    #[test]
    fn body_of_a_primitive_is_the_empty_quotation() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack.push(Value::symbol("dup"));
        body(&mut ev).unwrap();
        assert_eq!(ev.stack, vec![Value::quotation(vec![])]);
    }

    #[test]
    fn user_is_false_for_primitives() {
        let mut ev = Evaluator::new(vec![]);
        ev.stack.push(Value::symbol("dup"));
        user(&mut ev).unwrap();
        assert_eq!(ev.stack, vec![Value::Bool(false)]);
    }
}
