//! Joy Runtime: the tree-walking evaluator and the full primitive set
//! (spec §4.4–§4.8), plus the embedded C sources that give the *same*
//! primitive set to programs lowered to C (§2 step 5, §4.9, §6.3).
//!
//! Mirrors the teacher's `seq-runtime` layout: one module per family of
//! primitives (`arithmetic`, `stack_ops`, `aggregate`, `io`, `file_ops`,
//! `system`, `numeric`, `reflect`), plus `combinators/` for the quotation,
//! conditional, loop, aggregate, arity, and recursion combinators that make
//! up the bulk of the engineering (§2: "Combinators... 25%").

pub mod arithmetic;
pub mod combinators;
pub mod dispatch;
pub mod eval;
pub mod file_ops;
pub mod helpers;
pub mod io;
pub mod logic;
pub mod numeric;
pub mod reflect;
pub mod stack_ops;
pub mod system;

pub mod aggregate;

/// Embedded C runtime sources, used by `joy-compiler`'s codegen to
/// materialize a compiled-artifact directory (§6.3) without touching the
/// filesystem at build time. Grounded in the teacher's `stdlib_embed.rs`
/// (`include_str!` into a lookup table).
pub mod c_assets {
    pub const RUNTIME_H: &str = include_str!("../c/joy_runtime.h");
    pub const RUNTIME_C: &str = include_str!("../c/joy_runtime.c");
    pub const PRIMITIVES_C: &str = include_str!("../c/joy_primitives.c");
    pub const MAKEFILE: &str = include_str!("../c/Makefile.in");
}

pub use eval::Evaluator;
