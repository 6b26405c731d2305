//! The Joy value model (spec §3.1–3.2).
//!
//! Every stack slot, every aggregate element, and every quotation term is a
//! `Value`. LIST and QUOTATION are structurally identical (both own a
//! `Rc<[Value]>`) — per §3.1 the distinction is positional, not structural,
//! so both variants carry the same payload and combinators that accept "a
//! quotation" match on either.
//!
//! Aggregates share their backing buffer through `Rc`, the same choice the
//! teacher's `Value` makes with `Arc` for `Variant`/`Closure::env` ("Arc is
//! used... to enable O(1) cloning. This is essential for functional
//! programming with recursive data structures" — `runtime/src/value.rs`).
//! Joy values are immutable after construction (§3.2), so sharing a buffer
//! behind a snapshot is observationally identical to a deep copy: nothing
//! can mutate through the shared reference. This is what makes the
//! recursion combinators' "snapshot the whole stack, restore it later"
//! discipline (§4.6) affordable — cloning a `Stack` is a vector of `Rc`
//! bumps, not a structural deep copy.

use std::cell::RefCell;
use std::fmt;
use std::io::{Read, Seek, Write};
use std::rc::Rc;

/// A file handle is *borrowed*, not owned (§3.1 table, §5 "Ownership"):
/// dropping a `Value::File` never closes the underlying OS resource, only
/// `fclose` does. Standard streams are distinguished from opened files so
/// that closing a handle doesn't touch stdio.
pub enum FileSlot {
    Stdin,
    Stdout,
    Stderr,
    Open(std::fs::File),
    Closed,
}

/// Shared, identity-compared handle to a `FileSlot`.
///
/// Grounded in the teacher's `ChannelData`, which is also `Clone` via a
/// shared handle and compares `PartialEq` by identity rather than by value
/// ("PartialEq by identity (Arc pointer comparison)" — `runtime/src/value.rs`).
#[derive(Clone)]
pub struct FileHandle(pub Rc<RefCell<FileSlot>>);

impl FileHandle {
    pub fn new(slot: FileSlot) -> Self {
        FileHandle(Rc::new(RefCell::new(slot)))
    }

    pub fn stdin() -> Self {
        Self::new(FileSlot::Stdin)
    }

    pub fn stdout() -> Self {
        Self::new(FileSlot::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(FileSlot::Stderr)
    }

    pub fn is_closed(&self) -> bool {
        matches!(*self.0.borrow(), FileSlot::Closed)
    }

    pub fn close(&self) {
        *self.0.borrow_mut() = FileSlot::Closed;
    }

    pub fn write_all(&self, bytes: &[u8]) -> std::io::Result<()> {
        match &mut *self.0.borrow_mut() {
            FileSlot::Stdout => std::io::stdout().write_all(bytes),
            FileSlot::Stderr => std::io::stderr().write_all(bytes),
            FileSlot::Open(f) => f.write_all(bytes),
            FileSlot::Stdin | FileSlot::Closed => Ok(()),
        }
    }

    pub fn flush(&self) -> std::io::Result<()> {
        match &mut *self.0.borrow_mut() {
            FileSlot::Stdout => std::io::stdout().flush(),
            FileSlot::Stderr => std::io::stderr().flush(),
            FileSlot::Open(f) => f.flush(),
            FileSlot::Stdin | FileSlot::Closed => Ok(()),
        }
    }

    pub fn read_byte(&self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match &mut *self.0.borrow_mut() {
            FileSlot::Stdin => std::io::stdin().read_exact(&mut buf).ok().map(|_| buf[0]),
            FileSlot::Open(f) => f.read_exact(&mut buf).ok().map(|_| buf[0]),
            FileSlot::Stdout | FileSlot::Stderr | FileSlot::Closed => None,
        }
    }

    pub fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match &mut *self.0.borrow_mut() {
            FileSlot::Stdin => {
                let n = std::io::stdin().read_line(&mut line).ok()?;
                if n == 0 { None } else { Some(line) }
            }
            FileSlot::Open(f) => {
                let mut byte = [0u8; 1];
                loop {
                    match f.read(&mut byte) {
                        Ok(0) => {
                            if line.is_empty() {
                                return None;
                            }
                            break;
                        }
                        Ok(_) => {
                            line.push(byte[0] as char);
                            if byte[0] == b'\n' {
                                break;
                            }
                        }
                        Err(_) => return None,
                    }
                }
                Some(line)
            }
            FileSlot::Stdout | FileSlot::Stderr | FileSlot::Closed => None,
        }
    }

    pub fn read_n(&self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        let read = match &mut *self.0.borrow_mut() {
            FileSlot::Stdin => std::io::stdin().read(&mut buf).unwrap_or(0),
            FileSlot::Open(f) => f.read(&mut buf).unwrap_or(0),
            FileSlot::Stdout | FileSlot::Stderr | FileSlot::Closed => 0,
        };
        buf.truncate(read);
        buf
    }

    pub fn seek(&self, pos: i64, whence: i32) -> bool {
        let from = match whence {
            0 => std::io::SeekFrom::Start(pos.max(0) as u64),
            1 => std::io::SeekFrom::Current(pos),
            2 => std::io::SeekFrom::End(pos),
            _ => return false,
        };
        match &mut *self.0.borrow_mut() {
            FileSlot::Open(f) => f.seek(from).is_ok(),
            _ => false,
        }
    }

    pub fn tell(&self) -> Option<u64> {
        match &mut *self.0.borrow_mut() {
            FileSlot::Open(f) => f.stream_position().ok(),
            _ => None,
        }
    }

    pub fn eof(&self) -> bool {
        match &mut *self.0.borrow_mut() {
            FileSlot::Open(f) => {
                let pos = f.stream_position().unwrap_or(0);
                let len = f.metadata().map(|m| m.len()).unwrap_or(0);
                pos >= len
            }
            _ => false,
        }
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileHandle({:p})", Rc::as_ptr(&self.0))
    }
}

impl PartialEq for FileHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A Joy value (spec §3.1).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(u8),
    /// Immutable UTF-8 buffer, shared for O(1) clone.
    Str(Rc<str>),
    /// A reference to be looked up in the dictionary when executed.
    Symbol(Rc<str>),
    /// Data aggregate. Structurally identical to `Quotation`; see module docs.
    List(Rc<[Value]>),
    /// Executable aggregate, invoked by combinators.
    Quotation(Rc<[Value]>),
    /// Bitmask over members 0..63 (§3.2).
    Set(u64),
    /// Borrowed, never closed implicitly (§3.1, §5).
    File(FileHandle),
}

impl Value {
    pub fn str(s: impl Into<Rc<str>>) -> Value {
        Value::Str(s.into())
    }

    pub fn symbol(s: impl Into<Rc<str>>) -> Value {
        Value::Symbol(s.into())
    }

    pub fn list(v: Vec<Value>) -> Value {
        Value::List(v.into())
    }

    pub fn quotation(v: Vec<Value>) -> Value {
        Value::Quotation(v.into())
    }

    /// Either LIST or QUOTATION's backing terms; combinators that accept
    /// "a quotation" use this instead of matching a single variant, per
    /// §3.1: "All combinators that take a quotation accept either variant
    /// and treat them identically."
    pub fn as_terms(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) | Value::Quotation(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Value::List(_) | Value::Quotation(_) | Value::Str(_) | Value::Set(_)
        )
    }

    /// The kind name used in type-error diagnostics (§7) and by the `name`
    /// reflection primitive (§4.8) for non-symbol values.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "logical",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Quotation(_) => "quotation",
            Value::Set(_) => "set",
            Value::File(_) => "file",
        }
    }
}
