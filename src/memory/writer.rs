//! Patching scan results with new values

use super::accessor::MemoryAccess;
use super::scanner::ResultStore;
use crate::core::types::{Address, EncodedValue, MemoryError, MemoryResult, Width};
use tracing::info;

/// Writes encoded values over scan results
pub struct PatchWriter<'a, M: MemoryAccess + ?Sized> {
    memory: &'a M,
}

impl<'a, M: MemoryAccess + ?Sized> PatchWriter<'a, M> {
    /// Create a new patch writer
    pub fn new(memory: &'a M) -> Self {
        PatchWriter { memory }
    }

    /// Writes raw bytes, treating a short transfer as a failure
    pub fn write_exact(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        let written = self.memory.write_at(address, data)?;

        if written != data.len() {
            return Err(MemoryError::PartialWrite {
                address: address.to_string(),
                expected: data.len(),
                actual: written,
            });
        }

        Ok(())
    }

    /// Encodes `text` at `width` and writes it over result `index`
    ///
    /// Returns the value actually written. The store is not touched and the
    /// written location is not re-read.
    pub fn patch(
        &self,
        results: &ResultStore,
        index: usize,
        text: &str,
        width: Width,
    ) -> MemoryResult<EncodedValue> {
        if results.is_empty() {
            return Err(MemoryError::EmptyResults);
        }

        let address = results.get(index).ok_or(MemoryError::IndexOutOfRange {
            index,
            len: results.len(),
        })?;

        let value = EncodedValue::for_patch(text, width)?;
        self.write_exact(address, value.bytes())?;

        info!(%address, %value, "patched result {}", index);
        Ok(value)
    }
}
