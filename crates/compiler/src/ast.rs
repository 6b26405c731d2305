//! The parsed-program AST (§4.2). Scanning and parsing themselves live in
//! `joy_core::{lexer, parser}` — shared with the runtime crate, which needs
//! a host parser for the `get` primitive — so this module only re-exports
//! the types the rest of the compiler crate (codegen, test runner) names.

pub use joy_core::parser::{parse_program, Clause, DefKind, Definition, Item};
pub use joy_core::value::Value;

/// A fully parsed program, ready for the evaluator or the C lowering pass.
pub type Program = Vec<Item>;
