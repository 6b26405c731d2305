//! Joy CLI driver (§6.2).
//!
//! Grounded in the teacher's `main.rs` (clap derive `Cli`/`Commands`,
//! `run_*` functions per subcommand, `process::exit(1)` on any failure),
//! adapted to Joy's smaller surface: no subcommand (or `run`) executes a
//! file, `-e` runs an inline expression, `compile` lowers to C and invokes
//! the system compiler, `test` walks a directory of `.joy` files.

use clap::{Parser as ClapParser, Subcommand};
use joyc::driver::{self, CompileOptions};
use joyc::test_runner::TestRunner;
use std::path::PathBuf;
use std::process;

#[derive(ClapParser)]
#[command(name = "joy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Joy: a purely concatenative, stack-based language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Execute an inline expression instead of a file (shorthand for `-e`
    /// with no subcommand).
    #[arg(short = 'e', long = "eval", value_name = "EXPR", global = true)]
    eval: Option<String>,

    /// Source file to run when no subcommand is given.
    file: Option<PathBuf>,

    /// Arguments passed to the running program as argv[1..].
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a Joy source file (§6.2).
    Run {
        file: PathBuf,
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Lower a Joy source file to C and build it (§6.3).
    Compile {
        file: PathBuf,

        /// Output directory (parent of the produced DIR/NAME/ artifact).
        #[arg(short = 'o', long = "out", default_value = ".")]
        out_dir: PathBuf,

        /// Name of the produced executable.
        #[arg(short = 'n', long = "name")]
        name: Option<String>,

        /// Execute the resulting binary after a successful build.
        #[arg(long)]
        run: bool,

        /// Only lower to C; skip invoking the system compiler.
        #[arg(long = "no-compile")]
        no_compile: bool,
    },
    /// Run every `.joy` file under DIR and check `# expected:` comments.
    Test {
        #[arg(default_value = ".")]
        dir: PathBuf,

        #[arg(long)]
        pattern: Option<String>,

        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let code = match (cli.command, cli.eval, cli.file) {
        (Some(Commands::Run { file, args }), _, _) => run_file(&file, &args),
        (Some(Commands::Compile { file, out_dir, name, run, no_compile }), _, _) => {
            compile_file(&file, &out_dir, name, run, no_compile)
        }
        (Some(Commands::Test { dir, pattern, verbose }), _, _) => run_test(&dir, pattern, verbose),
        (None, Some(expr), _) => run_expr(&expr),
        (None, None, Some(file)) => run_file(&file, &cli.args),
        (None, None, None) => {
            eprintln!("joy: expected a file, -e EXPR, or a subcommand (run/compile/test)");
            1
        }
    };

    process::exit(code);
}

fn run_file(file: &std::path::Path, args: &[String]) -> i32 {
    match driver::run_file(file, args) {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("joy: {e}");
            1
        }
    }
}

fn run_expr(expr: &str) -> i32 {
    match driver::run_source(expr, vec!["-e".to_string()]) {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("joy: {e}");
            1
        }
    }
}

fn compile_file(file: &std::path::Path, out_dir: &std::path::Path, name: Option<String>, run: bool, no_compile: bool) -> i32 {
    let name = name.unwrap_or_else(|| {
        file.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("joy_out")
            .to_string()
    });
    let opts = CompileOptions {
        out_dir: out_dir.to_path_buf(),
        name,
        invoke_cc: !no_compile,
        run_after: run,
    };
    match driver::compile_file(file, &opts) {
        Ok(outcome) => {
            println!("Compiled {} -> {}", file.display(), outcome.artifact_dir.display());
            match outcome.run_status {
                Some(status) => status.code().unwrap_or(1),
                None => 0,
            }
        }
        Err(e) => {
            eprintln!("joy: {e}");
            1
        }
    }
}

fn run_test(dir: &std::path::Path, pattern: Option<String>, verbose: bool) -> i32 {
    let runner = TestRunner::new(verbose, pattern);
    let summary = runner.run(&[dir.to_path_buf()]);
    println!("{} passed, {} failed, {} total", summary.passed, summary.failed, summary.total);
    if summary.failed > 0 {
        1
    } else {
        0
    }
}
