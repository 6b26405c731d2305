//! Combinators (spec §4.6): primitives whose operands include one or more
//! quotations they invoke. Organized the way §4.6 groups them: quotation
//! application, conditionals, loops, aggregate iteration, arity/application
//! shape, and the seven recursion schemes.

pub mod arity;
pub mod conditional;
pub mod iteration;
pub mod loops;
pub mod quotation;
pub mod recursion;

use crate::eval::Evaluator;
use crate::helpers::pop_quotation;
use joy_core::compare::truthy;
use joy_core::error::JoyError;
use joy_core::value::Value;
use std::rc::Rc;

/// Snapshot the whole stack, run a predicate quotation, read truthiness off
/// TOS, then restore the snapshot (§4.6 "snapshot discipline", universal
/// law 8). Every combinator that probes the stack with a predicate goes
/// through this so scratch values from the predicate never leak.
pub(crate) fn test_predicate(ev: &mut Evaluator, predicate: &[Value]) -> Result<bool, JoyError> {
    let snapshot = ev.stack.clone();
    ev.execute_terms(predicate)?;
    let top = ev.stack.pop().ok_or_else(|| JoyError::underflow("predicate", 1, 0))?;
    let result = truthy(&top);
    ev.stack = snapshot;
    Ok(result)
}

/// Pop the combinator's trailing quotation arguments off the stack, in the
/// order they were pushed (first popped is the rightmost/TOS argument).
pub(crate) fn pop_n_quotations(ev: &mut Evaluator, prim: &str, n: usize) -> Result<Vec<Rc<[Value]>>, JoyError> {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(pop_quotation(&mut ev.stack, prim)?);
    }
    out.reverse();
    Ok(out)
}

/// Run each element of `parts` as its own term sequence (§4.6 `cond`,
/// `condlinrec`: a clause body is a sequence of quotations, each invoked in
/// turn, rather than one flat term list).
pub(crate) fn run_quotation_parts(ev: &mut Evaluator, parts: &[Value]) -> Result<(), JoyError> {
    for part in parts {
        let terms = part
            .as_terms()
            .ok_or_else(|| JoyError::type_error("cond", "quotation", part.kind_name()))?;
        ev.execute_terms(terms)?;
    }
    Ok(())
}
