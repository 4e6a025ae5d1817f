//! Positioned read/write access to a process's memory address space
//!
//! Every call transfers at an absolute offset (`pread`/`pwrite` on
//! `/proc/<pid>/mem`). Nothing is cached between calls.

use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Raw memory transfer against a target address space
pub trait MemoryAccess {
    /// Reads up to `buf.len()` bytes at `address`
    ///
    /// Returns the number of bytes actually transferred. A short or zero
    /// count means the range is partially unmapped or the process went away;
    /// that is not an error. Errors are reserved for failures of the handle
    /// itself.
    fn read_at(&self, address: Address, buf: &mut [u8]) -> MemoryResult<usize>;

    /// Writes `data` at `address`, returning the number of bytes transferred
    fn write_at(&self, address: Address, data: &[u8]) -> MemoryResult<usize>;

    /// Reads up to `length` bytes, truncating the buffer to what was returned
    fn read(&self, address: Address, length: usize) -> MemoryResult<Vec<u8>> {
        let mut buffer = vec![0u8; length];
        let n = self.read_at(address, &mut buffer)?;
        buffer.truncate(n);
        Ok(buffer)
    }
}

impl<M: MemoryAccess + ?Sized> MemoryAccess for &M {
    fn read_at(&self, address: Address, buf: &mut [u8]) -> MemoryResult<usize> {
        (**self).read_at(address, buf)
    }

    fn write_at(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        (**self).write_at(address, data)
    }
}

/// Memory handle backed by `/proc/<pid>/mem`
#[derive(Debug)]
pub struct ProcMemory {
    file: File,
    pid: ProcessId,
    path: PathBuf,
}

impl ProcMemory {
    /// Opens the memory file of `pid` for reading and writing
    pub fn open(pid: ProcessId) -> MemoryResult<Self> {
        Self::open_path(pid, format!("/proc/{pid}/mem"))
    }

    /// Opens an arbitrary file as the address space of `pid`
    pub fn open_path(pid: ProcessId, path: impl AsRef<Path>) -> MemoryResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| MemoryError::attach_failed(pid, format!("{}: {}", path.display(), e)))?;

        debug!(pid, path = %path.display(), "opened memory handle");
        Ok(ProcMemory { file, pid, path })
    }

    /// Get the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Path of the memory file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Errors that mean "nothing readable here" rather than a broken handle
fn is_unreadable_range(err: &io::Error) -> bool {
    matches!(
        err.raw_os_error(),
        Some(libc::EIO) | Some(libc::EFAULT) | Some(libc::ESRCH)
    )
}

impl MemoryAccess for ProcMemory {
    fn read_at(&self, address: Address, buf: &mut [u8]) -> MemoryResult<usize> {
        let mut filled = 0;

        while filled < buf.len() {
            let offset = address.as_u64().saturating_add(filled as u64);
            match self.file.read_at(&mut buf[filled..], offset) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if is_unreadable_range(&e) => {
                    trace!(address = %Address::new(offset), error = %e, "read stopped");
                    break;
                }
                Err(e) => return Err(MemoryError::read_failed(address, e.to_string())),
            }
        }

        Ok(filled)
    }

    fn write_at(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        if data.is_empty() {
            return Ok(0);
        }

        loop {
            match self.file.write_at(data, address.as_u64()) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(MemoryError::write_failed(address, e.to_string())),
            }
        }
    }
}

impl Drop for ProcMemory {
    fn drop(&mut self) {
        debug!(pid = self.pid, "releasing memory handle");
    }
}
