//! Shared fixtures: an in-memory address space and canned region sources

#![allow(dead_code)]

use memscan::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use memscan::memory::{MemoryAccess, Region, RegionSource};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

pub const PID: ProcessId = 4242;

/// Byte-addressed fake memory; reads stop at the first unmapped byte
#[derive(Debug, Default)]
pub struct FakeMemory {
    bytes: RefCell<BTreeMap<u64, u8>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl FakeMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `len` zero bytes at `base`
    pub fn map_zeroed(&self, base: u64, len: u64) {
        let mut bytes = self.bytes.borrow_mut();
        for addr in base..base + len {
            bytes.insert(addr, 0);
        }
    }

    /// Overwrites mapped bytes starting at `addr`
    pub fn poke(&self, addr: u64, data: &[u8]) {
        let mut bytes = self.bytes.borrow_mut();
        for (i, b) in data.iter().enumerate() {
            bytes.insert(addr + i as u64, *b);
        }
    }

    pub fn peek(&self, addr: u64, len: usize) -> Vec<u8> {
        let bytes = self.bytes.borrow();
        (0..len as u64)
            .filter_map(|i| bytes.get(&(addr + i)).copied())
            .collect()
    }

    /// Makes every subsequent read fail as a dead handle would
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Makes every subsequent write fail with an I/O error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl MemoryAccess for FakeMemory {
    fn read_at(&self, address: Address, buf: &mut [u8]) -> MemoryResult<usize> {
        if self.fail_reads.get() {
            return Err(MemoryError::read_failed(address, "handle closed"));
        }
        let bytes = self.bytes.borrow();
        let mut n = 0;
        for (i, slot) in buf.iter_mut().enumerate() {
            match bytes.get(&(address.as_u64() + i as u64)) {
                Some(b) => {
                    *slot = *b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn write_at(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        if self.fail_writes.get() {
            return Err(MemoryError::write_failed(address, "Input/output error"));
        }
        let mut bytes = self.bytes.borrow_mut();
        let mut n = 0;
        for (i, b) in data.iter().enumerate() {
            let addr = address.as_u64() + i as u64;
            match bytes.get_mut(&addr) {
                Some(slot) => {
                    *slot = *b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

pub fn anon_region(base: u64, size: u64) -> Region {
    Region::new(Address::new(base), size, "rw---", "[ anon ]")
}

/// Region list that can be swapped or made to fail between enumerations
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    pub regions: Rc<RefCell<Vec<Region>>>,
    pub fail: Rc<Cell<bool>>,
}

impl ScriptedSource {
    pub fn new(regions: Vec<Region>) -> Self {
        ScriptedSource {
            regions: Rc::new(RefCell::new(regions)),
            fail: Rc::new(Cell::new(false)),
        }
    }
}

impl RegionSource for ScriptedSource {
    fn enumerate(&self, pid: ProcessId) -> MemoryResult<Vec<Region>> {
        if self.fail.get() {
            return Err(MemoryError::EnumerationFailed(format!(
                "no maps for pid {pid}"
            )));
        }
        Ok(self.regions.borrow().clone())
    }
}
