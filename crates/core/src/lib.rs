//! Joy Core: the value model, stack, and dictionary shared by the evaluator
//! and the C lowering pass.
//!
//! Language-agnostic in spirit the way the teacher's `seq-core` crate is:
//! this crate knows nothing about scanning, parsing, or evaluating Joy
//! source. It only knows what a Joy *value* is, how two values compare, how
//! a stack snapshot is taken, and how the dictionary maps names to bodies.
//!
//! # Modules
//!
//! - `value`: the tagged `Value` union (§3.1 of the spec) and aggregate
//!   ownership (§3.2).
//! - `compare`: structural equality, total ordering, and truthiness (§4.3).
//! - `stack`: the operand stack and the snapshot/restore discipline
//!   combinators rely on (§4.6 "Snapshot discipline").
//! - `dict`: the word dictionary (§3.4).
//! - `error`: the error taxonomy (§7).
//! - `lexer`/`parser`: the scanner and parser (§2). These live here, not in
//!   the compiler crate, because the `get` primitive (§4.7) needs a host
//!   parser from inside the tree-walking evaluator itself; the compiler
//!   crate depends on the runtime crate, so the parser can't live downstream
//!   of either without a cycle.

pub mod compare;
pub mod dict;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod stack;
pub mod value;

pub use compare::{compare, equal, kind_name, truthy, Ordering3};
pub use dict::{Binding, Dictionary};
pub use error::JoyError;
pub use parser::{parse_one_term, parse_program, Clause, DefKind, Definition, Item};
pub use stack::Stack;
pub use value::{FileHandle, Value};
