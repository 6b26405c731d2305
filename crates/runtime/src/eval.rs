//! The tree-walking evaluator (spec §4.4, §3.5, §4.10).
//!
//! `Evaluator` owns everything §3.5 calls the "execution context": the
//! stack, the dictionary, the three process flags, and `argc`/`argv`.
//! Per the design note in §9 ("thread one context value through all
//! primitive invocations rather than using process globals"), every
//! primitive function in this crate takes `&mut Evaluator` rather than
//! reaching for a global.

use crate::dispatch;
use joy_core::dict::Binding;
use joy_core::error::JoyError;
use joy_core::stack::Stack;
use joy_core::value::Value;
use joy_core::Dictionary;
use std::rc::Rc;

pub struct Evaluator {
    pub stack: Stack,
    pub dict: Dictionary,

    /// Print TOS after each top-level term sequence (default on, §3.5).
    pub autoput: bool,
    /// Trace setting, 0..3 (§3.5). Each evaluated symbol is echoed to
    /// stderr when `echo > 0` — this is Joy's own "logging" facility.
    pub echo: u8,
    /// Whether an unknown word is a fatal error (true, default) or a
    /// silent no-op recorded in `undefs` (false).
    pub undeferror: bool,

    pub argv: Vec<String>,
    pub undefs: Vec<String>,

    /// Seed state for `rand`/`srand` (§4.7). A simple xorshift64 generator
    /// is enough here: Joy only asks for *a* pseudo-random integer stream,
    /// not a cryptographic one.
    pub rng_state: u64,
}

impl Evaluator {
    pub fn new(argv: Vec<String>) -> Self {
        Evaluator {
            stack: Vec::new(),
            dict: Dictionary::with_primitives(dispatch::PRIMITIVE_NAMES.iter().copied()),
            autoput: true,
            echo: 0,
            undeferror: true,
            argv,
            undefs: Vec::new(),
            rng_state: 0x2545_F491_4F6C_DD1D,
        }
    }

    /// Execute a single term per the dispatch rule (§4.4):
    /// "If t is a SYMBOL and the dictionary has a binding, invoke the bound
    /// primitive or expand the body recursively as a term sequence.
    /// Otherwise push a deep copy of t onto the stack."
    pub fn execute_term(&mut self, term: &Value) -> Result<(), JoyError> {
        if let Value::Symbol(name) = term {
            if self.echo > 0 {
                eprintln!("{name}");
            }
            let binding = self.dict.get(name.as_ref()).cloned();
            match binding {
                Some(Binding::User(body)) => return self.execute_terms(&body),
                Some(Binding::Primitive) => return dispatch::call(self, name),
                None => {
                    if self.undeferror {
                        return Err(JoyError::UndefinedWord {
                            name: name.to_string(),
                        });
                    }
                    self.undefs.push(name.to_string());
                    return Ok(());
                }
            }
        }
        self.stack.push(term.clone());
        Ok(())
    }

    /// Execute a sequence of terms in order (§5 "Ordering guarantees":
    /// strict left-to-right evaluation of every term sequence).
    pub fn execute_terms(&mut self, terms: &[Value]) -> Result<(), JoyError> {
        for term in terms {
            self.execute_term(term)?;
        }
        Ok(())
    }

    /// Install a user definition (`DEFINE`/`LIBRA`/`CONST`/`MODULE..END`
    /// clauses, §3.4, §4.10 "Definition ingestion").
    pub fn define(&mut self, name: impl Into<String>, body: Vec<Value>) {
        self.dict.define(name, Rc::from(body.into_boxed_slice()));
    }

    pub fn unassign(&mut self, name: &str) {
        self.dict.unassign(name);
    }

    /// Run one top-level term sequence and, if `autoput` is set, print TOS
    /// afterward (§3.5, scenario 1 in §8).
    pub fn run_top_level(&mut self, terms: &[Value]) -> Result<(), JoyError> {
        self.execute_terms(terms)?;
        if self.autoput {
            if let Some(top) = self.stack.last() {
                crate::io::print_value(top);
                println!();
            }
        }
        Ok(())
    }

    /// Run a whole parsed program: install each definition as execution
    /// reaches it, execute each plain term immediately (§3.4 "Definition
    /// ingestion": definitions are attached to the program, not evaluated
    /// at parse time, so the evaluator installs them in program order as it
    /// walks past them).
    pub fn run_program(&mut self, items: &[joy_core::parser::Item]) -> Result<(), JoyError> {
        use joy_core::parser::Item;
        for item in items {
            match item {
                Item::Definition(def) => {
                    for clause in &def.clauses {
                        self.define(clause.name.clone(), clause.body.clone());
                    }
                }
                Item::Term(term) => self.execute_term(term)?,
            }
        }
        if self.autoput {
            if let Some(top) = self.stack.last() {
                crate::io::print_value(top);
                println!();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushes_literals_and_dispatches_symbols() {
        let mut ev = Evaluator::new(vec![]);
        ev.execute_terms(&[Value::Int(2), Value::Int(3), Value::symbol("+")])
            .unwrap();
        assert_eq!(ev.stack, vec![Value::Int(5)]);
    }

    #[test]
    fn undefined_word_is_fatal_by_default() {
        let mut ev = Evaluator::new(vec![]);
        let err = ev.execute_term(&Value::symbol("no-such-word")).unwrap_err();
        assert!(matches!(err, JoyError::UndefinedWord { .. }));
    }

    #[test]
    fn undeferror_off_records_and_continues() {
        let mut ev = Evaluator::new(vec![]);
        ev.undeferror = false;
        ev.execute_term(&Value::symbol("mystery")).unwrap();
        assert_eq!(ev.undefs, vec!["mystery".to_string()]);
    }

    #[test]
    fn later_definition_shadows_earlier_one() {
        let mut ev = Evaluator::new(vec![]);
        ev.define("twice", vec![Value::symbol("dup"), Value::symbol("+")]);
        ev.define("twice", vec![Value::Int(0)]);
        ev.stack.push(Value::Int(41));
        ev.execute_term(&Value::symbol("twice")).unwrap();
        assert_eq!(ev.stack, vec![Value::Int(41), Value::Int(0)]);
    }
}
