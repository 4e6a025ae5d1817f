//! Eligibility policy for scannable regions
//!
//! Applied once when regions are enumerated: a region is kept when it is
//! readable and writable and not backed by a shared library image.

/// Suffix the kernel appends to mappings whose file was unlinked
const DELETED_SUFFIX: &str = " (deleted)";

/// True when the permission field grants read and write
pub fn is_read_write(mode: &str) -> bool {
    mode.starts_with("rw")
}

/// True when the mapping label names a shared object (`libc.so.6`, `libfoo.so`)
pub fn is_shared_library(mapping: &str) -> bool {
    let mapping = mapping.trim();
    let mapping = mapping.strip_suffix(DELETED_SUFFIX).unwrap_or(mapping);
    let file_name = mapping.rsplit('/').next().unwrap_or(mapping);

    file_name.ends_with(".so") || file_name.contains(".so.")
}

/// Combined eligibility check
pub fn is_scannable(mode: &str, mapping: &str) -> bool {
    is_read_write(mode) && !is_shared_library(mapping)
}
