//! Joy compiler library: scanning and parsing are shared with the runtime
//! crate (see `joy_core::{lexer, parser}`); this crate owns everything that
//! sits downstream of a parsed program — the C lowering pass, the embedded
//! standard library, the evaluator-driving CLI, and the test runner.

pub mod ast;
pub mod codegen;
pub mod config;
pub mod driver;
pub mod stdlib_embed;
pub mod test_runner;

pub use ast::{Clause, DefKind, Definition, Item, Program};
pub use codegen::{expand_includes, lower, Lowered};
pub use config::EvalConfig;
pub use driver::{compile_file, load_stdlib, run_file, run_source, CompileOptions};
