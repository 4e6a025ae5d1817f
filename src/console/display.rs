//! Text rendering of results, regions and raw memory

use crate::core::types::Address;
use crate::memory::regions::Region;
use std::fmt::Write;

const DUMP_ROW: usize = 16;

fn spaced_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result count followed by up to `limit` rows of index, address and preview
pub fn format_results<F>(results: &[Address], limit: usize, preview: F) -> String
where
    F: Fn(Address) -> Vec<u8>,
{
    let mut out = format!("matches: {}\n", results.len());

    for (index, &address) in results.iter().enumerate().take(limit) {
        let _ = writeln!(out, "{:<4}{:<18} {}", index, address, spaced_hex(&preview(address)));
    }
    if results.len() > limit {
        out.push_str("...\n");
    }

    out
}

/// Region table in pmap's column order
pub fn format_regions(regions: &[Region]) -> String {
    let mut out = format!(
        "{:<20} {:<8} {:<8} {:<8} {:<10} {}\n",
        "Address", "Kbytes", "RSS", "Dirty", "Mode", "Mapping"
    );

    let optional = |v: Option<u64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
    for region in regions {
        let _ = writeln!(
            out,
            "{:<20} {:<8} {:<8} {:<8} {:<10} {}",
            region.base,
            region.size_kb(),
            optional(region.rss_kb),
            optional(region.dirty_kb),
            region.mode,
            region.mapping
        );
    }

    out
}

/// Hex dump, 16 bytes per row, each row labelled with its absolute address
pub fn format_hex_dump(start: Address, bytes: &[u8]) -> String {
    let header: Vec<String> = (0..DUMP_ROW).map(|i| format!("{i:02x}")).collect();
    let mut out = format!("read:{:<15}{}\n", bytes.len(), header.join(" "));

    for (row, chunk) in bytes.chunks(DUMP_ROW).enumerate() {
        let _ = writeln!(
            out,
            "{:<20}{}",
            start.offset(row * DUMP_ROW),
            spaced_hex(chunk)
        );
    }

    out
}
