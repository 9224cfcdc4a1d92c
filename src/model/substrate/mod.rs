//! The durability substrate: whatever finally holds the bytes.
//!
//! Everything above this layer sees a flat namespace of string keys holding
//! string blobs, with whole-value get/put semantics.

mod file;
mod memory;

pub use file::FileSubstrate;
pub use memory::MemorySubstrate;

use crate::error::Result;

/// A minimal key-value store of string blobs.
pub trait Substrate {
    /// Get the blob stored under `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    fn put(&mut self, key: &str, value: String) -> Result<()>;

    /// Remove the blob stored under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}
