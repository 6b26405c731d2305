//! Embedded standard library (§6.4): two ordinary Joy source files, loaded
//! at evaluator startup in order, before any user input is accepted.
//!
//! Grounded in the teacher's `stdlib_embed.rs` (`include_str!` into a
//! `LazyLock<HashMap<&str, &str>>`, so the binary is self-contained with no
//! external file lookup at runtime).

use std::collections::HashMap;
use std::sync::LazyLock;

static STDLIB: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("base", include_str!("../lib/base.joy"));
    m.insert("aggregate", include_str!("../lib/aggregate.joy"));
    m
});

/// Base library then aggregate library, in that order (§6.4).
pub const LOAD_ORDER: &[&str] = &["base", "aggregate"];

pub fn get(name: &str) -> Option<&'static str> {
    STDLIB.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_stdlib_modules_are_embedded() {
        assert!(get("base").unwrap().contains("DEFINE"));
        assert!(get("aggregate").unwrap().contains("DEFINE"));
    }

    #[test]
    fn load_order_is_base_then_aggregate() {
        assert_eq!(LOAD_ORDER, &["base", "aggregate"]);
    }
}
