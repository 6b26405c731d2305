//! Primitive name table and dispatch (spec §4.4, §4.5–§4.8).
//!
//! `PRIMITIVE_NAMES` seeds the dictionary at evaluator startup
//! (`Dictionary::with_primitives`); `call` maps a resolved primitive name
//! back to its implementation. Two names, `condlinrec` and `condnestrec`,
//! route to the same function: §4.6 says the pair "share an implementation".
//! Likewise `compare`/`<=>` and `equal`/`==` are each one implementation
//! registered under both the spec's prose name (§4.3) and its symbolic
//! alias.

use crate::eval::Evaluator;
use crate::{aggregate, arithmetic, combinators, file_ops, io, logic, numeric, reflect, stack_ops, system};
use joy_core::error::JoyError;

pub const PRIMITIVE_NAMES: &[&str] = &[
    // arithmetic (§4.5)
    "+", "-", "*", "/", "rem", "=", "!=", "<", ">", "<=", ">=", "<=>", "==", "compare", "equal",
    // logic (§4.5)
    "and", "or", "xor", "not",
    // stack shuffling (§4.5)
    "dup", "pop", "swap", "over", "dup2", "rollup", "rolldown", "rotate",
    "dupd", "popd", "swapd", "overd", "dup2d", "rollupd", "rolldownd", "rotated",
    "stack", "unstack",
    // aggregate (§4.5)
    "first", "rest", "uncons", "cons", "swons", "unswons", "concat", "swoncat",
    "size", "null", "small", "at", "of", "take", "drop", "in", "has", "reverse",
    // io (§4.5, §4.7)
    "put", "putln", "putch", "putchars", ".", "get",
    // file (§4.7)
    "fopen", "fclose", "fflush", "feof", "ferror", "fgetch", "fgets", "fread",
    "fput", "fputch", "fputchars", "fputstring", "fwrite", "fseek", "ftell",
    "fremove", "frename", "stdin", "stdout", "stderr",
    // system (§4.7)
    "system", "getenv", "argc", "argv", "time", "clock", "rand", "srand",
    "localtime", "gmtime", "mktime", "strftime",
    // numeric (§4.7)
    "sin", "cos", "tan", "asin", "acos", "atan", "atan2", "sinh", "cosh", "tanh",
    "exp", "log", "log10", "sqrt", "pow", "floor", "ceil", "trunc", "abs", "neg",
    "sign", "min", "max", "succ", "pred", "frexp", "ldexp", "modf", "chr", "ord",
    "strtol", "strtod", "format", "formatf",
    // reflection/process (§4.8)
    "name", "intern", "body", "user", "get-autoput", "set-autoput",
    "get-undeferror", "set-undeferror", "get-echo", "set-echo", "abort", "quit",
    "gc", "maxint", "unassign",
    // quotation application (§4.6)
    "i", "x", "dip", "dipd", "dipdd",
    // conditionals (§4.6)
    "ifte", "branch", "cond",
    "iflist", "ifinteger", "ifchar", "iflogical", "ifset", "ifstring", "iffloat", "iffile",
    // loops (§4.6)
    "times", "while", "loop",
    // aggregate iteration (§4.6)
    "map", "filter", "split", "step", "fold", "some", "all",
    "treestep", "treerec", "treegenrec",
    // arity/application shape (§4.6)
    "nullary", "unary", "binary", "ternary", "unary2", "unary3", "unary4",
    "app1", "app2", "app3", "app4", "app11", "app12", "cleave", "construct", "infra",
    // recursion (§4.6)
    "linrec", "tailrec", "binrec", "primrec", "genrec", "condlinrec", "condnestrec",
];

pub fn call(ev: &mut Evaluator, name: &str) -> Result<(), JoyError> {
    match name {
        "+" => arithmetic::add(&mut ev.stack),
        "-" => arithmetic::sub(&mut ev.stack),
        "*" => arithmetic::mul(&mut ev.stack),
        "/" => arithmetic::div(&mut ev.stack),
        "rem" => arithmetic::rem(&mut ev.stack),
        "=" => arithmetic::eq(&mut ev.stack),
        "!=" => arithmetic::neq(&mut ev.stack),
        "<" => arithmetic::lt(&mut ev.stack),
        ">" => arithmetic::gt(&mut ev.stack),
        "<=" => arithmetic::lte(&mut ev.stack),
        ">=" => arithmetic::gte(&mut ev.stack),
        "<=>" | "compare" => arithmetic::joy_compare(&mut ev.stack),
        "==" | "equal" => arithmetic::equal(&mut ev.stack),

        "and" => logic::and(&mut ev.stack),
        "or" => logic::or(&mut ev.stack),
        "xor" => logic::xor(&mut ev.stack),
        "not" => logic::not(&mut ev.stack),

        "dup" => stack_ops::dup(&mut ev.stack),
        "pop" => stack_ops::pop_op(&mut ev.stack),
        "swap" => stack_ops::swap(&mut ev.stack),
        "over" => stack_ops::over(&mut ev.stack),
        "dup2" => stack_ops::dup2(&mut ev.stack),
        "rollup" => stack_ops::rollup(&mut ev.stack),
        "rolldown" => stack_ops::rolldown(&mut ev.stack),
        "rotate" => stack_ops::rotate(&mut ev.stack),
        "dupd" => stack_ops::dupd(&mut ev.stack),
        "popd" => stack_ops::popd(&mut ev.stack),
        "swapd" => stack_ops::swapd(&mut ev.stack),
        "overd" => stack_ops::overd(&mut ev.stack),
        "dup2d" => stack_ops::dup2d(&mut ev.stack),
        "rollupd" => stack_ops::rollupd(&mut ev.stack),
        "rolldownd" => stack_ops::rolldownd(&mut ev.stack),
        "rotated" => stack_ops::rotated(&mut ev.stack),
        "stack" => stack_ops::stack_to_list(&mut ev.stack),
        "unstack" => stack_ops::unstack(&mut ev.stack),

        "first" => aggregate::first(&mut ev.stack),
        "rest" => aggregate::rest(&mut ev.stack),
        "uncons" => aggregate::uncons(&mut ev.stack),
        "cons" => aggregate::cons(&mut ev.stack),
        "swons" => aggregate::swons(&mut ev.stack),
        "unswons" => aggregate::unswons(&mut ev.stack),
        "concat" => aggregate::concat(&mut ev.stack),
        "swoncat" => aggregate::swoncat(&mut ev.stack),
        "size" => aggregate::size(&mut ev.stack),
        "null" => aggregate::null(&mut ev.stack),
        "small" => aggregate::small(&mut ev.stack),
        "at" => aggregate::at(&mut ev.stack),
        "of" => aggregate::of(&mut ev.stack),
        "take" => aggregate::take(&mut ev.stack),
        "drop" => aggregate::drop_(&mut ev.stack),
        "in" => aggregate::in_(&mut ev.stack),
        "has" => aggregate::has(&mut ev.stack),
        "reverse" => aggregate::reverse(&mut ev.stack),

        "put" => io::put(&mut ev.stack),
        "putln" => io::putln(&mut ev.stack),
        "putch" => io::putch(&mut ev.stack),
        "putchars" => io::putchars(&mut ev.stack),
        "." => io::dot(&mut ev.stack),
        "get" => io::get(&mut ev.stack),

        "fopen" => file_ops::fopen(&mut ev.stack),
        "fclose" => file_ops::fclose(&mut ev.stack),
        "fflush" => file_ops::fflush(&mut ev.stack),
        "feof" => file_ops::feof(&mut ev.stack),
        "ferror" => file_ops::ferror(&mut ev.stack),
        "fgetch" => file_ops::fgetch(&mut ev.stack),
        "fgets" => file_ops::fgets(&mut ev.stack),
        "fread" => file_ops::fread(&mut ev.stack),
        "fput" => file_ops::fput(&mut ev.stack),
        "fputch" => file_ops::fputch(&mut ev.stack),
        "fputchars" => file_ops::fputchars(&mut ev.stack),
        "fputstring" => file_ops::fputstring(&mut ev.stack),
        "fwrite" => file_ops::fwrite(&mut ev.stack),
        "fseek" => file_ops::fseek(&mut ev.stack),
        "ftell" => file_ops::ftell(&mut ev.stack),
        "fremove" => file_ops::fremove(&mut ev.stack),
        "frename" => file_ops::frename(&mut ev.stack),
        "stdin" => file_ops::stdin(&mut ev.stack),
        "stdout" => file_ops::stdout(&mut ev.stack),
        "stderr" => file_ops::stderr(&mut ev.stack),

        "system" => system::system(&mut ev.stack),
        "getenv" => system::getenv(&mut ev.stack),
        "argc" => system::argc(&mut ev.stack, &ev.argv.clone()),
        "argv" => system::argv(&mut ev.stack, &ev.argv.clone()),
        "time" => system::time(&mut ev.stack),
        "clock" => system::clock(&mut ev.stack),
        "rand" => system::rand(&mut ev.stack, &mut ev.rng_state),
        "srand" => system::srand(&mut ev.stack, &mut ev.rng_state),
        "localtime" => system::localtime(&mut ev.stack),
        "gmtime" => system::gmtime(&mut ev.stack),
        "mktime" => system::mktime(&mut ev.stack),
        "strftime" => system::strftime(&mut ev.stack),

        "sin" => numeric::sin(&mut ev.stack),
        "cos" => numeric::cos(&mut ev.stack),
        "tan" => numeric::tan(&mut ev.stack),
        "asin" => numeric::asin(&mut ev.stack),
        "acos" => numeric::acos(&mut ev.stack),
        "atan" => numeric::atan(&mut ev.stack),
        "atan2" => numeric::atan2(&mut ev.stack),
        "sinh" => numeric::sinh(&mut ev.stack),
        "cosh" => numeric::cosh(&mut ev.stack),
        "tanh" => numeric::tanh(&mut ev.stack),
        "exp" => numeric::exp(&mut ev.stack),
        "log" => numeric::log(&mut ev.stack),
        "log10" => numeric::log10(&mut ev.stack),
        "sqrt" => numeric::sqrt(&mut ev.stack),
        "pow" => numeric::pow(&mut ev.stack),
        "floor" => numeric::floor(&mut ev.stack),
        "ceil" => numeric::ceil(&mut ev.stack),
        "trunc" => numeric::trunc(&mut ev.stack),
        "abs" => numeric::abs(&mut ev.stack),
        "neg" => numeric::neg(&mut ev.stack),
        "sign" => numeric::sign(&mut ev.stack),
        "min" => numeric::min(&mut ev.stack),
        "max" => numeric::max(&mut ev.stack),
        "succ" => numeric::succ(&mut ev.stack),
        "pred" => numeric::pred(&mut ev.stack),
        "frexp" => numeric::frexp(&mut ev.stack),
        "ldexp" => numeric::ldexp(&mut ev.stack),
        "modf" => numeric::modf(&mut ev.stack),
        "chr" => numeric::chr(&mut ev.stack),
        "ord" => numeric::ord(&mut ev.stack),
        "strtol" => numeric::strtol(&mut ev.stack),
        "strtod" => numeric::strtod(&mut ev.stack),
        "format" => numeric::format(&mut ev.stack),
        "formatf" => numeric::formatf(&mut ev.stack),

        "name" => reflect::name(ev),
        "intern" => reflect::intern(ev),
        "body" => reflect::body(ev),
        "user" => reflect::user(ev),
        "get-autoput" => reflect::get_autoput(ev),
        "set-autoput" => reflect::set_autoput(ev),
        "get-undeferror" => reflect::get_undeferror(ev),
        "set-undeferror" => reflect::set_undeferror(ev),
        "get-echo" => reflect::get_echo(ev),
        "set-echo" => reflect::set_echo(ev),
        "abort" => reflect::abort(ev),
        "quit" => reflect::quit(ev),
        "gc" => reflect::gc(ev),
        "maxint" => reflect::maxint(ev),
        "unassign" => reflect::unassign(ev),

        "i" => combinators::quotation::i(ev),
        "x" => combinators::quotation::x(ev),
        "dip" => combinators::quotation::dip(ev),
        "dipd" => combinators::quotation::dipd(ev),
        "dipdd" => combinators::quotation::dipdd(ev),

        "ifte" => combinators::conditional::ifte(ev),
        "branch" => combinators::conditional::branch(ev),
        "cond" => combinators::conditional::cond(ev),
        "iflist" => combinators::conditional::iflist(ev),
        "ifinteger" => combinators::conditional::ifinteger(ev),
        "ifchar" => combinators::conditional::ifchar(ev),
        "iflogical" => combinators::conditional::iflogical(ev),
        "ifset" => combinators::conditional::ifset(ev),
        "ifstring" => combinators::conditional::ifstring(ev),
        "iffloat" => combinators::conditional::iffloat(ev),
        "iffile" => combinators::conditional::iffile(ev),

        "times" => combinators::loops::times(ev),
        "while" => combinators::loops::while_(ev),
        "loop" => combinators::loops::loop_(ev),

        "map" => combinators::iteration::map(ev),
        "filter" => combinators::iteration::filter(ev),
        "split" => combinators::iteration::split(ev),
        "step" => combinators::iteration::step(ev),
        "fold" => combinators::iteration::fold(ev),
        "some" => combinators::iteration::some(ev),
        "all" => combinators::iteration::all(ev),
        "treestep" => combinators::iteration::treestep(ev),
        "treerec" => combinators::iteration::treerec(ev),
        "treegenrec" => combinators::iteration::treegenrec(ev),

        "nullary" => combinators::arity::nullary(ev),
        "unary" => combinators::arity::unary(ev),
        "binary" => combinators::arity::binary(ev),
        "ternary" => combinators::arity::ternary(ev),
        "unary2" => combinators::arity::unary2(ev),
        "unary3" => combinators::arity::unary3(ev),
        "unary4" => combinators::arity::unary4(ev),
        "app1" => combinators::arity::app1(ev),
        "app2" => combinators::arity::app2(ev),
        "app3" => combinators::arity::app3(ev),
        "app4" => combinators::arity::app4(ev),
        "app11" => combinators::arity::app11(ev),
        "app12" => combinators::arity::app12(ev),
        "cleave" => combinators::arity::cleave(ev),
        "construct" => combinators::arity::construct(ev),
        "infra" => combinators::arity::infra(ev),

        "linrec" => combinators::recursion::linrec(ev),
        "tailrec" => combinators::recursion::tailrec(ev),
        "binrec" => combinators::recursion::binrec(ev),
        "primrec" => combinators::recursion::primrec(ev),
        "genrec" => combinators::recursion::genrec(ev),
        "condlinrec" | "condnestrec" => combinators::recursion::condlinrec(ev),

        other => Err(JoyError::UndefinedWord { name: other.to_string() }),
    }
}

