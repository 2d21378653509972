//! Valgrind-style memory trace ingestion.
//!
//! Traces are line-oriented, one record per line:
//!
//! ```text
//! I 0400d7d4,8
//!  L 7ff0005c8,8
//!  S 7ff0005c8,8
//!  M 0421c7f0,4
//! ```
//!
//! Leading whitespace is insignificant. The operation is a single character,
//! the address is unprefixed hexadecimal, and the size is a decimal byte
//! count. Instruction fetches (`I`) are carried through so callers can report
//! them, but they never touch the cache.
//!
//! A record that does not match this shape ends the run: [`TraceReader`]
//! yields a [`TraceError::Malformed`] naming the line, then fuses. Silently
//! producing counters from a half-read trace would be worse than stopping.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::TraceError;

/// Kind of memory operation a trace record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Instruction fetch; never touches the simulated data cache.
    Instruction,
    /// Data load: one cache access.
    Load,
    /// Data store: one cache access.
    Store,
    /// Read-modify-write: exactly two sequential accesses to the same address.
    Modify,
}

impl Operation {
    /// Maps a trace operation character, or `None` for anything unrecognized.
    const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::Instruction),
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Instruction => 'I',
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        };
        write!(f, "{c}")
    }
}

/// One trace record: operation, 64-bit address, and byte count.
///
/// The size is carried for reporting only; classification depends solely on
/// which block the address falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// The operation kind.
    pub op: Operation,
    /// The accessed address.
    pub addr: u64,
    /// Bytes touched by the access.
    pub size: u64,
}

impl TraceRecord {
    /// Parses one trace line, or `None` if it does not match the record shape.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim_start();
        let mut chars = rest.chars();
        let op = Operation::from_char(chars.next()?)?;
        let (addr_text, size_text) = chars.as_str().split_once(',')?;
        let addr = u64::from_str_radix(addr_text.trim(), 16).ok()?;
        let size = size_text.trim().parse().ok()?;
        Some(Self { op, addr, size })
    }
}

/// Iterator of trace records from any buffered source.
///
/// Yields `Ok(record)` per well-formed line. The first I/O or format error is
/// yielded as `Err`, after which the iterator is fused: the rest of the
/// source is not consumed.
#[derive(Debug)]
pub struct TraceReader<R> {
    source: R,
    line: usize,
    done: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Open`] when the file cannot be opened; nothing
    /// is processed in that case.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps an already-buffered source.
    pub const fn new(source: R) -> Self {
        Self {
            source,
            line: 0,
            done: false,
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        let n = self.source.read_line(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        self.line += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            let _ = buf.pop();
        }
        Ok(Some(buf))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_line() {
            Ok(None) => {
                self.done = true;
                None
            }
            Ok(Some(text)) => match TraceRecord::parse(&text) {
                Some(record) => Some(Ok(record)),
                None => {
                    self.done = true;
                    Some(Err(TraceError::Malformed {
                        line: self.line,
                        text,
                    }))
                }
            },
            Err(e) => {
                self.done = true;
                Some(Err(TraceError::Io(e)))
            }
        }
    }
}
