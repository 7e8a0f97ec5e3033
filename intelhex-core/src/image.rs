//! Sparse 64 KiB memory image with populated-range watermarks

use crate::constants::MEMORY_SIZE;
use crate::types::Address;
use alloc::vec;
use alloc::vec::Vec;

/// Byte image of the 16-bit address space
///
/// `start_address` starts at the highest address and `end_address` at zero, so an
/// image nothing was written to has `start_address > end_address` and an empty
/// populated range.
#[derive(Debug, Clone)]
pub struct MemoryImage {
    memory: Vec<u8>,
    start_address: Address,
    end_address: u32,
}

impl MemoryImage {
    /// Create a zero-filled image
    pub fn new() -> Self {
        Self {
            memory: vec![0u8; MEMORY_SIZE],
            start_address: Address::MAX,
            end_address: 0,
        }
    }

    /// Store `bytes` at `offset` and widen the watermarks.
    ///
    /// Bytes that would land past the top of the address space are not stored.
    /// Returns how many bytes were stored.
    pub fn write(&mut self, offset: Address, bytes: &[u8]) -> usize {
        let start = offset as usize;
        let stored = bytes.len().min(MEMORY_SIZE - start);
        self.memory[start..start + stored].copy_from_slice(&bytes[..stored]);

        self.start_address = self.start_address.min(offset);
        self.end_address = self.end_address.max((start + stored) as u32);

        stored
    }

    /// Lowest offset written so far
    pub fn start_address(&self) -> Address {
        self.start_address
    }

    /// One past the highest byte written so far (up to 0x10000)
    pub fn end_address(&self) -> u32 {
        self.end_address
    }

    /// Check if nothing lies in the populated range
    pub fn is_empty(&self) -> bool {
        self.start_address as u32 >= self.end_address
    }

    /// The populated range `[start_address, end_address)`, empty if nothing was written
    pub fn populated(&self) -> &[u8] {
        if self.is_empty() {
            return &[];
        }
        &self.memory[self.start_address as usize..self.end_address as usize]
    }

    /// Full 64 KiB backing store
    pub fn as_slice(&self) -> &[u8] {
        &self.memory
    }
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}
