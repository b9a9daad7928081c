//! Single forward cursor exposed to the host's iteration protocol.
//!
//! Each collection keeps one cursor as part of its state. The cursor is not
//! part of the value: it is ignored by equality, ordering and hashing.

use crate::value::Value;

/// Key reported for the current cursor position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CursorKey {
    /// Positional counter (sets, lists, tuples).
    Index(usize),
    /// Field name (user types).
    Name(String),
    /// Entry key (maps).
    Value(Value),
}

/// The host's `Countable` + `Iterator` surface.
pub trait HostCursor {
    fn count(&self) -> usize;

    fn rewind(&mut self);

    fn valid(&self) -> bool;

    /// Element under the cursor. `None` past the end, for unset tuple and
    /// user type slots, and for a set element removed while the cursor
    /// rested on it.
    fn current(&self) -> Option<Value>;

    fn key(&self) -> Option<CursorKey>;

    fn next(&mut self);
}

/// Cursor over entries identified by an insertion sequence number.
///
/// Holding the sequence number rather than a reference lets the entry under
/// the cursor be removed; the next advance continues with the first entry
/// inserted after it.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SeqCursor {
    position: Option<u64>,
    index: usize,
}

impl SeqCursor {
    pub(crate) fn start(first: Option<u64>) -> Self {
        Self { position: first, index: 0 }
    }

    pub(crate) fn position(&self) -> Option<u64> {
        self.position
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn advance(&mut self, next: Option<u64>) {
        self.position = next;
        self.index += 1;
    }
}

/// Cursor over a positional sequence.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct IndexCursor {
    pub(crate) position: usize,
}
