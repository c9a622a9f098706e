//! No-allocation containers over caller-owned storage.
//!
//! Every container here borrows its backing memory from the caller and keeps
//! only plain-value bookkeeping of its own, so the structures embed anywhere
//! a fixed buffer does. Nothing grows: when a table or heap fills, the
//! caller decides whether to rebuild into larger storage.

mod list;
mod minheap;
mod ringbuf;
mod swiss;

pub use list::{ListArena, NODE_NONE};
pub use minheap::{HeapError, MinHeap};
pub use ringbuf::RingBuf;
pub use swiss::{Bucket, SwissTable, TableError, CTRL_EMPTY, CTRL_TOMBSTONE};
