//! Glue between a parsed program and the two execution paths (§6.2):
//! tree-walking (`run`/`-e`) and C lowering (`compile`). Grounded in the
//! teacher's `compile_file_with_config` (load → parse → lower → link),
//! scaled down to the system `cc` instead of `clang`+LLVM IR, since the
//! compiled artifact here is plain C (§4.9), not LLVM IR.

use crate::codegen;
use joy_core::error::JoyError;
use joy_core::parser::{parse_program, Item};
use joy_runtime::c_assets;
use joy_runtime::Evaluator;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Parse and install the embedded standard library into a fresh evaluator
/// (§6.4: "the evaluator must load them successfully before accepting user
/// input"). Panics are never used here: a malformed embedded stdlib file is
/// a build-time defect, but we still report it as an ordinary error so a
/// caller embedding this crate doesn't get an abort.
pub fn load_stdlib(ev: &mut Evaluator) -> Result<(), JoyError> {
    for name in crate::stdlib_embed::LOAD_ORDER {
        let src = crate::stdlib_embed::get(name)
            .unwrap_or_else(|| panic!("stdlib module `{name}` registered in LOAD_ORDER but not embedded"));
        let items = parse_program(src)?;
        ev.run_program(&items)?;
    }
    Ok(())
}

/// Run Joy source text against a fresh evaluator seeded with the stdlib and
/// the given `argv` (`argv[0]` is conventionally the program name, §6.2).
pub fn run_source(src: &str, argv: Vec<String>) -> Result<Evaluator, JoyError> {
    let mut ev = Evaluator::new(argv);
    load_stdlib(&mut ev)?;
    let items = parse_program(src)?;
    ev.run_program(&items)?;
    Ok(ev)
}

/// Run a Joy source file. `argv[0]` becomes the file path, `extra_args`
/// becomes `argv[1..]` (§6.2 "the filename becomes argv[0]... subsequent
/// arguments are argv[1..]").
pub fn run_file(path: &Path, extra_args: &[String]) -> Result<Evaluator, JoyError> {
    let src = std::fs::read_to_string(path)
        .map_err(|e| JoyError::domain(format!("cannot read {}: {e}", path.display())))?;
    let mut argv = vec![path.display().to_string()];
    argv.extend(extra_args.iter().cloned());
    run_source(&src, argv)
}

pub struct CompileOptions {
    pub out_dir: PathBuf,
    pub name: String,
    pub invoke_cc: bool,
    pub run_after: bool,
}

/// Outcome of `compile` (§6.3): the artifact directory, and the child
/// process's exit status if `--run` was requested.
pub struct CompileOutcome {
    pub artifact_dir: PathBuf,
    pub run_status: Option<std::process::ExitStatus>,
}

/// Lower `path` to C and materialize the compiled-artifact directory
/// (§6.3): `DIR/NAME/{NAME, NAME.c, joy_runtime.{c,h}, joy_primitives.c,
/// Makefile}`. The runtime sources are the embedded copies verbatim, so
/// they're byte-for-byte identical across compilations, as the spec
/// requires.
pub fn compile_file(path: &Path, opts: &CompileOptions) -> Result<CompileOutcome, JoyError> {
    let src = std::fs::read_to_string(path)
        .map_err(|e| JoyError::domain(format!("cannot read {}: {e}", path.display())))?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));

    let items = parse_program(&src)?;
    let items = codegen::expand_includes(items, &base_dir, &mut std::collections::HashSet::new())?;

    // The dictionary needs the primitive set and the stdlib's own
    // definitions so that calls into stdlib words (from the program or
    // from each other) resolve during lowering, exactly as they would at
    // evaluator startup (§6.4).
    let mut dict = joy_core::Dictionary::with_primitives(joy_runtime::dispatch::PRIMITIVE_NAMES.iter().copied());
    for name in crate::stdlib_embed::LOAD_ORDER {
        let lib_src = crate::stdlib_embed::get(name).expect("stdlib module missing");
        install_definitions(&mut dict, &parse_program(lib_src)?);
    }

    let lowered = codegen::lower(&items, &dict, &opts.name)?;

    let artifact_dir = opts.out_dir.join(&opts.name);
    std::fs::create_dir_all(&artifact_dir)
        .map_err(|e| JoyError::domain(format!("cannot create {}: {e}", artifact_dir.display())))?;

    write_artifact(&artifact_dir, &format!("{}.c", opts.name), &lowered.translation_unit)?;
    write_artifact(&artifact_dir, "joy_runtime.h", c_assets::RUNTIME_H)?;
    write_artifact(&artifact_dir, "joy_runtime.c", c_assets::RUNTIME_C)?;
    write_artifact(&artifact_dir, "joy_primitives.c", c_assets::PRIMITIVES_C)?;
    let makefile = c_assets::MAKEFILE.replace("@NAME@", &opts.name);
    write_artifact(&artifact_dir, "Makefile", &makefile)?;

    let mut run_status = None;
    if opts.invoke_cc {
        let status = Command::new("make")
            .arg("-C")
            .arg(&artifact_dir)
            .status()
            .map_err(|e| JoyError::domain(format!("failed to invoke make: {e}")))?;
        if !status.success() {
            return Err(JoyError::domain("compiled artifact failed to build"));
        }
        if opts.run_after {
            let exe = artifact_dir.join(&opts.name);
            run_status = Some(
                Command::new(&exe)
                    .status()
                    .map_err(|e| JoyError::domain(format!("failed to run {}: {e}", exe.display())))?,
            );
        }
    }

    Ok(CompileOutcome { artifact_dir, run_status })
}

fn install_definitions(dict: &mut joy_core::Dictionary, items: &[Item]) {
    for item in items {
        if let Item::Definition(def) = item {
            for clause in &def.clauses {
                dict.define(clause.name.clone(), std::rc::Rc::from(clause.body.clone().into_boxed_slice()));
            }
        }
    }
}

fn write_artifact(dir: &Path, name: &str, contents: &str) -> Result<(), JoyError> {
    std::fs::write(dir.join(name), contents)
        .map_err(|e| JoyError::domain(format!("cannot write {}: {e}", dir.join(name).display())))
}
