//! C lowering (§4.9, §6.3): walk a parsed program together with the
//! dictionary and produce a C translation unit that links against the
//! embedded runtime (`joy_runtime.c`/`joy_primitives.c`) and behaves
//! observably identically to the tree-walking evaluator for any program
//! that doesn't rely on `get` or reflection over non-primitive symbols.
//!
//! Grounded in the teacher's `codegen/program.rs` (walk-program-emit-main)
//! and `codegen/words.rs` (one C function per user word), scaled down: the
//! teacher's codegen is a multi-pass optimizing backend for a typed
//! language (inlining, specialization, NaN-boxing); Joy is dynamically
//! typed and untyped-by-design, so there is no type-directed specialization
//! to do. One function per user word, a direct call for a statically known
//! user word and a `joy_dispatch` lookup for everything else (combinator
//! names included, since a combinator's quotation argument can itself call
//! a user word), a literal-aggregate constant pool: that's the whole
//! strategy §4.9 asks for.

use joy_core::dict::Dictionary;
use joy_core::error::JoyError;
use joy_core::parser::{parse_program, DefKind, Item};
use joy_core::value::Value;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Resolve every `include "FILE"` term pair before codegen proper runs
/// (§4.9: "preprocessed at lowering time... no runtime `include` in the
/// compiled artifact"). Cycles are rejected via a canonical-path visited
/// set.
pub fn expand_includes(items: Vec<Item>, base_dir: &Path, visited: &mut HashSet<PathBuf>) -> Result<Vec<Item>, JoyError> {
    let mut out = Vec::with_capacity(items.len());
    let mut i = 0;
    while i < items.len() {
        if let (Item::Term(Value::Symbol(sym)), Some(Item::Term(Value::Str(path)))) =
            (&items[i], items.get(i + 1))
        {
            if sym.as_ref() == "include" {
                let full = base_dir.join(path.as_ref());
                let canonical = full.canonicalize().unwrap_or(full.clone());
                if !visited.insert(canonical.clone()) {
                    return Err(JoyError::domain(format!("include cycle detected at {}", full.display())));
                }
                let src = std::fs::read_to_string(&full)
                    .map_err(|e| JoyError::domain(format!("cannot read included file {}: {e}", full.display())))?;
                let included = parse_program(&src)?;
                let included_dir = full.parent().map(Path::to_path_buf).unwrap_or_else(|| base_dir.to_path_buf());
                out.extend(expand_includes(included, &included_dir, visited)?);
                i += 2;
                continue;
            }
        }
        out.push(items[i].clone());
        i += 1;
    }
    Ok(out)
}

/// Turn a Joy word name into a valid C identifier.
fn mangle(name: &str) -> String {
    let mut out = String::from("joy_word_");
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            let _ = write!(out, "_{:02x}", c as u32);
        }
    }
    out
}

/// Escape a Rust string as a C string literal body (no surrounding quotes).
fn c_escape(s: &str) -> String {
    let mut out = String::new();
    for b in s.bytes() {
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\x{b:02x}");
            }
        }
    }
    out
}

struct Pool {
    decls: Vec<String>,
    counter: usize,
}

impl Pool {
    fn new() -> Self {
        Pool { decls: Vec::new(), counter: 0 }
    }

    /// Emit a literal aggregate (list/quotation) into the constant pool,
    /// recursing into nested aggregate elements first, and return a C
    /// expression that evaluates to a `joy_value_t` for it.
    fn emit_literal(&mut self, v: &Value) -> String {
        match v {
            Value::Int(i) => format!("joy_int({i}LL)"),
            Value::Float(f) => format!("joy_float({f:?})"),
            Value::Bool(b) => format!("joy_bool({})", if *b { 1 } else { 0 }),
            Value::Char(c) => format!("joy_char({c}u)"),
            Value::Str(s) => format!("joy_str(\"{}\")", c_escape(s)),
            Value::Symbol(s) => format!("joy_symbol(\"{}\")", c_escape(s)),
            Value::Set(mask) => format!("joy_set({mask}ULL)"),
            Value::List(terms) | Value::Quotation(terms) => {
                let elem_exprs: Vec<String> = terms.iter().map(|t| self.emit_literal(t)).collect();
                let id = self.counter;
                self.counter += 1;
                let items_name = format!("joy_pool_items_{id}");
                let agg_name = format!("joy_pool_agg_{id}");
                if elem_exprs.is_empty() {
                    self.decls.push(format!("static const joy_agg_t {agg_name} = {{ NULL, 0 }};"));
                } else {
                    self.decls.push(format!(
                        "static joy_value_t {items_name}[] = {{ {} }};",
                        elem_exprs.join(", ")
                    ));
                    self.decls.push(format!(
                        "static const joy_agg_t {agg_name} = {{ {items_name}, {} }};",
                        elem_exprs.len()
                    ));
                }
                let ctor = if matches!(v, Value::List(_)) { "joy_list" } else { "joy_quotation" };
                format!("{ctor}(&{agg_name})")
            }
            Value::File(_) => unreachable!("a FILE value can never appear in parsed source"),
        }
    }
}

pub struct Lowered {
    pub translation_unit: String,
}

/// Lower a whole (include-expanded) program to a C translation unit.
///
/// `dict` should already hold the primitive set and any stdlib definitions;
/// this function registers the program's own clause names into a local
/// copy first so forward and mutual references between user words resolve
/// correctly, exactly as `Evaluator::run_program` does at tree-walking time.
pub fn lower(program: &[Item], dict: &Dictionary, program_name: &str) -> Result<Lowered, JoyError> {
    let mut dict = dict.clone();
    for item in program {
        if let Item::Definition(def) = item {
            for clause in &def.clauses {
                dict.define(clause.name.clone(), std::rc::Rc::from(clause.body.clone().into_boxed_slice()));
            }
        }
    }
    let dict = &dict;

    let mut pool = Pool::new();
    let mut word_fns = Vec::new();
    let mut word_table = Vec::new();
    let mut top_level_stmts = Vec::new();

    for item in program {
        match item {
            Item::Definition(def) => {
                for clause in &def.clauses {
                    let body_stmts = lower_terms(&clause.body, dict, &mut pool)?;
                    let fn_name = mangle(&clause.name);
                    let kind_comment = match def.kind {
                        DefKind::Define => "DEFINE",
                        DefKind::Libra => "LIBRA",
                        DefKind::Const => "CONST",
                    };
                    word_fns.push(format!(
                        "/* {kind_comment} {} */\nstatic void {fn_name}(joy_context_t *ctx) {{\n{}\n}}",
                        clause.name,
                        indent(&body_stmts)
                    ));
                    word_table.push((clause.name.clone(), fn_name));
                }
            }
            Item::Term(term) => {
                top_level_stmts.extend(lower_term(term, dict, &mut pool)?);
            }
        }
    }

    let mut out = String::new();
    out.push_str("/* Generated by joy-compiler (§4.9). Do not edit. */\n");
    out.push_str("#include \"joy_runtime.h\"\n");
    out.push_str("#include <string.h>\n\n");
    for decl in &pool.decls {
        out.push_str(decl);
        out.push('\n');
    }
    out.push('\n');
    for f in &word_fns {
        out.push_str(f);
        out.push_str("\n\n");
    }

    // A per-program name->function table lets combinators (`dip`, `times`,
    // `ifte`, ...) invoke a quotation that calls a user word, the same way
    // Evaluator::execute_term resolves a symbol against the dictionary
    // before falling back to the primitive table.
    out.push_str("typedef struct { const char *name; void (*fn)(joy_context_t *); } joy_word_entry_t;\n");
    if word_table.is_empty() {
        out.push_str("static const joy_word_entry_t joy_word_table[] = { { NULL, NULL } };\n");
        out.push_str("static const size_t joy_word_table_len = 0;\n\n");
    } else {
        out.push_str("static const joy_word_entry_t joy_word_table[] = {\n");
        for (name, fn_name) in &word_table {
            out.push_str(&format!("    {{ \"{}\", {} }},\n", c_escape(name), fn_name));
        }
        out.push_str("};\n");
        out.push_str(&format!(
            "static const size_t joy_word_table_len = {};\n\n",
            word_table.len()
        ));
    }
    out.push_str("int joy_dispatch(joy_context_t *ctx, const char *name) {\n");
    out.push_str("    for (size_t i = 0; i < joy_word_table_len; i++) {\n");
    out.push_str("        if (!strcmp(joy_word_table[i].name, name)) {\n");
    out.push_str("            joy_word_table[i].fn(ctx);\n");
    out.push_str("            return 0;\n");
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("    return joy_call_primitive(ctx, name);\n");
    out.push_str("}\n\n");

    out.push_str("int main(int argc, char **argv) {\n");
    out.push_str("    joy_context_t ctx_storage;\n");
    out.push_str("    joy_context_t *ctx = &ctx_storage;\n");
    out.push_str("    joy_context_init(ctx, argc, argv);\n");
    out.push_str(&indent(&top_level_stmts));
    out.push_str("\n    joy_context_free(ctx);\n");
    out.push_str("    return 0;\n}\n");

    let _ = program_name;
    Ok(Lowered { translation_unit: out })
}

fn indent(stmts: &[String]) -> String {
    stmts.iter().map(|s| format!("    {s}")).collect::<Vec<_>>().join("\n")
}

fn lower_terms(terms: &[Value], dict: &Dictionary, pool: &mut Pool) -> Result<Vec<String>, JoyError> {
    let mut out = Vec::new();
    for t in terms {
        out.extend(lower_term(t, dict, pool)?);
    }
    Ok(out)
}

fn lower_term(term: &Value, dict: &Dictionary, pool: &mut Pool) -> Result<Vec<String>, JoyError> {
    if let Value::Symbol(name) = term {
        if dict.is_user(name.as_ref()) {
            return Ok(vec![format!("{}(ctx);", mangle(name.as_ref()))]);
        }
        // Not a user word known at lowering time (a primitive, a combinator,
        // or an undefined word deferred to a runtime error): dispatch
        // through `joy_dispatch` rather than `joy_call_primitive` directly,
        // so the same symbol resolution rule applies here and inside
        // `joy_eval_quotation` (which combinators use to run a quotation
        // argument that may itself call a user word).
        return Ok(vec![format!(
            "if (joy_dispatch(ctx, \"{}\")) return 1;",
            c_escape(name.as_ref())
        )]);
    }
    let expr = pool.emit_literal(term);
    Ok(vec![format!("joy_stack_push(&ctx->stack, {expr});")])
}
