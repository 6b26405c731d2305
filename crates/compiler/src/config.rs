//! Evaluation flags the CLI surface exposes (§3.5, §6.2).
//!
//! Grounded in the teacher's `CompilerConfig` (`compiler/src/config.rs`): a
//! small struct of toggles threaded from `main.rs` into the thing that does
//! the work, built with `Default` plus builder-style setters.

#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub autoput: bool,
    pub echo: u8,
    pub undeferror: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            autoput: true,
            echo: 0,
            undeferror: true,
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_echo(mut self, level: u8) -> Self {
        self.echo = level;
        self
    }

    pub fn with_undeferror(mut self, on: bool) -> Self {
        self.undeferror = on;
        self
    }
}
