//! The word dictionary (spec §3.4).
//!
//! An order-insensitive name → body map. A binding is either a primitive
//! (an opaque action implemented elsewhere — the evaluator or the C
//! lowering each own their own primitive table) or a user definition (a
//! quotation body). Later definitions shadow earlier ones globally;
//! `unassign` removes a binding outright.

use crate::value::Value;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// An opaque built-in action. The dictionary only records that the name
    /// *is* a primitive; dispatch to its implementation lives in
    /// `joy-runtime` (the evaluator) and `joy-compiler` (the C lowering).
    Primitive,
    /// A user-defined word: the term sequence installed by `DEFINE`/`LIBRA`/
    /// `CONST`/`MODULE..END`.
    User(Rc<[Value]>),
}

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, Binding>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary::default()
    }

    /// Pre-populate with the primitive set. Called once at evaluator/codegen
    /// startup with the runtime's canonical primitive name list (§3.4:
    /// "The dictionary is populated at startup with the built-in
    /// primitives...").
    pub fn with_primitives<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut dict = Dictionary::new();
        for name in names {
            dict.entries.insert(name.to_string(), Binding::Primitive);
        }
        dict
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.entries.get(name)
    }

    pub fn is_user(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(Binding::User(_)))
    }

    pub fn is_primitive(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(Binding::Primitive))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Install or shadow a user definition. A later definition of the same
    /// name always wins, including over a primitive of the same name.
    pub fn define(&mut self, name: impl Into<String>, body: Rc<[Value]>) {
        self.entries.insert(name.into(), Binding::User(body));
    }

    pub fn unassign(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// The body of a user-defined word, or an empty quotation for a
    /// primitive or unknown name (§4.8 `body`).
    pub fn body_of(&self, name: &str) -> Rc<[Value]> {
        match self.entries.get(name) {
            Some(Binding::User(body)) => body.clone(),
            _ => Rc::from(Vec::new().into_boxed_slice()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_definition_shadows_primitive() {
        let mut dict = Dictionary::with_primitives(["dup"]);
        assert!(dict.is_primitive("dup"));
        dict.define("dup", Rc::from(vec![Value::Int(1)].into_boxed_slice()));
        assert!(dict.is_user("dup"));
    }

    #[test]
    fn unassign_removes_binding() {
        let mut dict = Dictionary::with_primitives(["foo"]);
        dict.unassign("foo");
        assert!(!dict.contains("foo"));
    }
}
