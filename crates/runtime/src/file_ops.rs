//! File I/O primitives (spec §4.5 FILE row, §4.7): open/close/read/write a
//! borrowed `FileHandle` without the Joy program ever owning the underlying
//! descriptor directly.

use crate::helpers::{pop, pop_char, pop_file, pop_int, pop_string};
use joy_core::error::JoyError;
use joy_core::value::{FileHandle, FileSlot, Value};
use joy_core::Stack;
use std::fs::OpenOptions;

pub fn fopen(stack: &mut Stack) -> Result<(), JoyError> {
    let mode = pop_string(stack, "fopen")?;
    let path = pop_string(stack, "fopen")?;
    let mut opts = OpenOptions::new();
    match mode.as_ref() {
        "r" => opts.read(true),
        "w" => opts.write(true).create(true).truncate(true),
        "a" => opts.append(true).create(true),
        "r+" => opts.read(true).write(true),
        other => return Err(JoyError::domain(format!("fopen: unsupported mode {other:?}"))),
    };
    // I/O failures return a sentinel rather than aborting (§7).
    match opts.open(path.as_ref()) {
        Ok(f) => stack.push(Value::File(FileHandle::new(FileSlot::Open(f)))),
        Err(_) => stack.push(Value::Bool(false)),
    }
    Ok(())
}

pub fn fclose(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "fclose")?;
    f.close();
    Ok(())
}

pub fn fflush(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "fflush")?;
    let _ = f.flush();
    Ok(())
}

pub fn feof(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "feof")?;
    let eof = f.eof();
    stack.push(Value::File(f));
    stack.push(Value::Bool(eof));
    Ok(())
}

pub fn ferror(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "ferror")?;
    let closed = f.is_closed();
    stack.push(Value::File(f));
    stack.push(Value::Bool(closed));
    Ok(())
}

pub fn fgetch(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "fgetch")?;
    let byte = f.read_byte();
    stack.push(Value::File(f));
    match byte {
        Some(b) => stack.push(Value::Char(b)),
        None => stack.push(Value::Int(-1)),
    }
    Ok(())
}

pub fn fgets(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "fgets")?;
    let line = f.read_line();
    stack.push(Value::File(f));
    match line {
        Some(s) => stack.push(Value::str(s.trim_end_matches('\n').to_string())),
        None => stack.push(Value::str("")),
    }
    Ok(())
}

pub fn fread(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "fread")?;
    let n = pop_int(stack, "fread")?;
    let n = usize::try_from(n).map_err(|_| JoyError::domain("fread: negative count"))?;
    let bytes = f.read_n(n);
    stack.push(Value::File(f));
    stack.push(Value::str(String::from_utf8_lossy(&bytes).into_owned()));
    Ok(())
}

pub fn fput(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "fput")?;
    let v = pop(stack, "fput")?;
    let _ = f.write_all(crate::io::format_value(&v).as_bytes());
    stack.push(Value::File(f));
    Ok(())
}

pub fn fputch(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "fputch")?;
    let c = pop_char(stack, "fputch")?;
    let _ = f.write_all(&[c]);
    stack.push(Value::File(f));
    Ok(())
}

pub fn fputchars(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "fputchars")?;
    let s = pop_string(stack, "fputchars")?;
    let _ = f.write_all(s.as_bytes());
    stack.push(Value::File(f));
    Ok(())
}

pub fn fputstring(stack: &mut Stack) -> Result<(), JoyError> {
    fputchars(stack)
}

pub fn fwrite(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "fwrite")?;
    let s = pop_string(stack, "fwrite")?;
    let _ = f.write_all(s.as_bytes());
    stack.push(Value::File(f));
    Ok(())
}

pub fn fseek(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "fseek")?;
    let whence = pop_int(stack, "fseek")?;
    let pos = pop_int(stack, "fseek")?;
    let ok = f.seek(pos, whence as i32);
    stack.push(Value::File(f));
    stack.push(Value::Bool(ok));
    Ok(())
}

pub fn ftell(stack: &mut Stack) -> Result<(), JoyError> {
    let f = pop_file(stack, "ftell")?;
    let pos = f.tell();
    stack.push(Value::File(f));
    stack.push(Value::Int(pos.map(|p| p as i64).unwrap_or(-1)));
    Ok(())
}

pub fn fremove(stack: &mut Stack) -> Result<(), JoyError> {
    let path = pop_string(stack, "fremove")?;
    stack.push(Value::Bool(std::fs::remove_file(path.as_ref()).is_ok()));
    Ok(())
}

pub fn frename(stack: &mut Stack) -> Result<(), JoyError> {
    let to = pop_string(stack, "frename")?;
    let from = pop_string(stack, "frename")?;
    stack.push(Value::Bool(std::fs::rename(from.as_ref(), to.as_ref()).is_ok()));
    Ok(())
}

pub fn stdin(stack: &mut Stack) -> Result<(), JoyError> {
    stack.push(Value::File(FileHandle::stdin()));
    Ok(())
}

pub fn stdout(stack: &mut Stack) -> Result<(), JoyError> {
    stack.push(Value::File(FileHandle::stdout()));
    Ok(())
}

pub fn stderr(stack: &mut Stack) -> Result<(), JoyError> {
    stack.push(Value::File(FileHandle::stderr()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_a_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("joytest.txt");
        let mut s: Stack = vec![
            Value::str(path.to_string_lossy().into_owned()),
            Value::str("w"),
        ];
        fopen(&mut s).unwrap();
        let f = pop_file(&mut s, "test").unwrap();
        s.push(Value::File(f));
        s.push(Value::str("hello"));
        fputchars(&mut s).unwrap();
        fclose(&mut s).unwrap();

        let mut s2: Stack = vec![
            Value::str(path.to_string_lossy().into_owned()),
            Value::str("r"),
        ];
        fopen(&mut s2).unwrap();
        s2.push(Value::Int(5));
        fread(&mut s2).unwrap();
        match s2.pop().unwrap() {
            Value::Str(got) => assert_eq!(got.as_ref(), "hello"),
            other => panic!("expected string, got {other:?}"),
        }
    }
}
