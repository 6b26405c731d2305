//! Host-environment primitives (spec §4.7): process argv, environment
//! variables, time, and a simple PRNG (`rand`/`srand`).

use crate::helpers::pop_int;
use joy_core::error::JoyError;
use joy_core::value::Value;
use joy_core::Stack;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn system(stack: &mut Stack) -> Result<(), JoyError> {
    let cmd = crate::helpers::pop_string(stack, "system")?;
    let status = std::process::Command::new("sh").arg("-c").arg(cmd.as_ref()).status();
    let code = status.ok().and_then(|s| s.code()).unwrap_or(-1);
    stack.push(Value::Int(code as i64));
    Ok(())
}

pub fn getenv(stack: &mut Stack) -> Result<(), JoyError> {
    let name = crate::helpers::pop_string(stack, "getenv")?;
    match std::env::var(name.as_ref()) {
        Ok(v) => stack.push(Value::str(v)),
        Err(_) => stack.push(Value::str("")),
    }
    Ok(())
}

/// `argc`/`argv` read the evaluator's program arguments (§3.5), so they
/// live on `Evaluator` rather than this stack-only module; see
/// `dispatch::call`.
pub fn argc(stack: &mut Stack, argv: &[String]) -> Result<(), JoyError> {
    stack.push(Value::Int(argv.len() as i64));
    Ok(())
}

pub fn argv(stack: &mut Stack, argv: &[String]) -> Result<(), JoyError> {
    let list = argv.iter().map(|a| Value::str(a.clone())).collect();
    stack.push(Value::list(list));
    Ok(())
}

pub fn time(stack: &mut Stack) -> Result<(), JoyError> {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    stack.push(Value::Int(secs as i64));
    Ok(())
}

pub fn clock(stack: &mut Stack) -> Result<(), JoyError> {
    let micros = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_micros()).unwrap_or(0);
    stack.push(Value::Int(micros as i64));
    Ok(())
}

/// Plain xorshift64 (§4.7: "a pseudo-random integer stream, not a
/// cryptographic one"). Returns the next state and the value drawn from it.
fn xorshift64(state: u64) -> u64 {
    let mut x = state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

pub fn rand(stack: &mut Stack, rng_state: &mut u64) -> Result<(), JoyError> {
    *rng_state = xorshift64(*rng_state);
    stack.push(Value::Int((*rng_state >> 1) as i64));
    Ok(())
}

pub fn srand(stack: &mut Stack, rng_state: &mut u64) -> Result<(), JoyError> {
    let seed = pop_int(stack, "srand")?;
    *rng_state = (seed as u64) ^ 0x2545_F491_4F6C_DD1D;
    if *rng_state == 0 {
        *rng_state = 1;
    }
    Ok(())
}

/// `localtime`/`gmtime`/`mktime`/`strftime` exchange time as a 9-integer
/// list per §4.7: `sec min hour mday mon year wday yday isdst`, matching
/// C's `struct tm` field order so `strftime` can round-trip it through
/// libc without a reimplementation of calendar math.
fn tm_to_list(tm: &libc::tm) -> Value {
    Value::list(vec![
        Value::Int(tm.tm_sec as i64),
        Value::Int(tm.tm_min as i64),
        Value::Int(tm.tm_hour as i64),
        Value::Int(tm.tm_mday as i64),
        Value::Int(tm.tm_mon as i64),
        Value::Int(tm.tm_year as i64),
        Value::Int(tm.tm_wday as i64),
        Value::Int(tm.tm_yday as i64),
        Value::Int(tm.tm_isdst as i64),
    ])
}

fn list_to_tm(v: &Value, prim: &str) -> Result<libc::tm, JoyError> {
    let terms = v
        .as_terms()
        .ok_or_else(|| JoyError::type_error(prim, "9-integer time list", v.kind_name()))?;
    if terms.len() != 9 {
        return Err(JoyError::domain(format!(
            "{prim}: expected a 9-element time list, got {}",
            terms.len()
        )));
    }
    let mut ints = [0i64; 9];
    for (i, t) in terms.iter().enumerate() {
        ints[i] = match t {
            Value::Int(n) => *n,
            other => return Err(JoyError::type_error(prim, "integer", other.kind_name())),
        };
    }
    // SAFETY: libc::tm is a plain C struct of integers; zeroed then filled.
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    tm.tm_sec = ints[0] as i32;
    tm.tm_min = ints[1] as i32;
    tm.tm_hour = ints[2] as i32;
    tm.tm_mday = ints[3] as i32;
    tm.tm_mon = ints[4] as i32;
    tm.tm_year = ints[5] as i32;
    tm.tm_wday = ints[6] as i32;
    tm.tm_yday = ints[7] as i32;
    tm.tm_isdst = ints[8] as i32;
    Ok(tm)
}

pub fn localtime(stack: &mut Stack) -> Result<(), JoyError> {
    let secs = pop_int(stack, "localtime")?;
    let t = secs as libc::time_t;
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    unsafe { libc::localtime_r(&t, &mut tm) };
    stack.push(tm_to_list(&tm));
    Ok(())
}

pub fn gmtime(stack: &mut Stack) -> Result<(), JoyError> {
    let secs = pop_int(stack, "gmtime")?;
    let t = secs as libc::time_t;
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    unsafe { libc::gmtime_r(&t, &mut tm) };
    stack.push(tm_to_list(&tm));
    Ok(())
}

pub fn mktime(stack: &mut Stack) -> Result<(), JoyError> {
    let list = crate::helpers::pop(stack, "mktime")?;
    let mut tm = list_to_tm(&list, "mktime")?;
    let secs = unsafe { libc::mktime(&mut tm) };
    stack.push(Value::Int(secs as i64));
    Ok(())
}

pub fn strftime(stack: &mut Stack) -> Result<(), JoyError> {
    let list = crate::helpers::pop(stack, "strftime")?;
    let fmt = crate::helpers::pop_string(stack, "strftime")?;
    let tm = list_to_tm(&list, "strftime")?;
    let c_fmt = std::ffi::CString::new(fmt.as_ref())
        .map_err(|_| JoyError::domain("strftime: format contains a NUL byte"))?;
    let mut buf = vec![0u8; 256];
    let n = unsafe {
        libc::strftime(
            buf.as_mut_ptr() as *mut libc::c_char,
            buf.len(),
            c_fmt.as_ptr(),
            &tm,
        )
    };
    buf.truncate(n);
    stack.push(Value::str(String::from_utf8_lossy(&buf).into_owned()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rand_is_deterministic_given_a_seed() {
        let mut s1: Stack = vec![Value::Int(42)];
        let mut state1 = 0u64;
        srand(&mut s1, &mut state1).unwrap();
        rand(&mut s1, &mut state1).unwrap();

        let mut s2: Stack = vec![Value::Int(42)];
        let mut state2 = 0u64;
        srand(&mut s2, &mut state2).unwrap();
        rand(&mut s2, &mut state2).unwrap();

        assert_eq!(s1, s2);
    }

    #[test]
    fn argc_counts_argv() {
        let mut s: Stack = vec![];
        argc(&mut s, &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(s, vec![Value::Int(2)]);
    }
}
