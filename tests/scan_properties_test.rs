//! Property tests for window scanning and narrowing

mod common;

use common::{anon_region, FakeMemory, ScriptedSource, PID};
use memscan::core::types::{Address, EncodedValue, MatchSet, Width};
use memscan::memory::{scan_buffer, MemoryScanner, ResultStore};
use memscan::process::Session;
use proptest::prelude::*;

fn width_strategy() -> impl Strategy<Value = Width> {
    prop::sample::select(Width::ALL.to_vec())
}

proptest! {
    #[test]
    fn planted_value_is_found_at_its_offset(
        mut data in prop::collection::vec(any::<u8>(), 8..256),
        value in any::<i64>(),
        width in width_strategy(),
        base in 0u64..0x7fff_0000,
        seed in any::<usize>(),
    ) {
        let size = width.bytes();
        let offset = seed % (data.len() - size + 1);
        let bytes = value.to_le_bytes();
        data[offset..offset + size].copy_from_slice(&bytes[..size]);

        // reinterpret the planted bytes as a signed value of this width
        let planted = match width {
            Width::W8 => i64::from(data[offset] as i8),
            Width::W16 => i64::from(i16::from_le_bytes([data[offset], data[offset + 1]])),
            Width::W32 => i64::from(i32::from_le_bytes(
                data[offset..offset + 4].try_into().unwrap(),
            )),
            Width::W64 => i64::from_le_bytes(data[offset..offset + 8].try_into().unwrap()),
        };
        let query = MatchSet::parse(&planted.to_string(), width);

        let mut found = Vec::new();
        scan_buffer(Address::new(base), &data, &query, &mut found);

        prop_assert!(found.contains(&Address::new(base).offset(offset)));
        for address in &found {
            let rel = (address.as_u64() - base) as usize;
            prop_assert!(rel + size <= data.len());
            prop_assert!(query.matches(&data[rel..rel + size]));
        }
        prop_assert!(found.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn narrowing_is_an_ordered_subsequence_and_idempotent(
        data in prop::collection::vec(0u8..4, 16..128),
        mutations in prop::collection::vec((any::<usize>(), 0u8..4), 0..16),
        width in width_strategy(),
        needle in 0u8..4,
    ) {
        let memory = FakeMemory::new();
        memory.map_zeroed(0x1000, data.len() as u64);
        memory.poke(0x1000, &data);
        let regions = vec![anon_region(0x1000, data.len() as u64)];
        let query = MatchSet::parse(&needle.to_string(), width);
        let scanner = MemoryScanner::new(&memory);

        let first = scanner.advance(&ResultStore::Empty, &regions, &query).unwrap();

        for (at, byte) in mutations {
            memory.poke(0x1000 + (at % data.len()) as u64, &[byte]);
        }

        let narrowed = scanner.advance(&first, &regions, &query).unwrap();
        let mut prior = first.addresses().iter();
        for address in narrowed.addresses() {
            prop_assert!(prior.any(|candidate| candidate == address));
        }

        let again = scanner.advance(&narrowed, &regions, &query).unwrap();
        if narrowed.is_empty() {
            // an empty store rescans from scratch
            prop_assert_eq!(again, scanner.advance(&ResultStore::Empty, &regions, &query).unwrap());
        } else {
            prop_assert_eq!(again, narrowed);
        }
    }

    #[test]
    fn chunked_region_scan_matches_whole_buffer_scan(
        data in prop::collection::vec(0u8..3, 0..200),
        chunk in 1usize..48,
        width in width_strategy(),
        needle in 0u8..3,
    ) {
        let memory = FakeMemory::new();
        memory.map_zeroed(0x1000, data.len() as u64);
        memory.poke(0x1000, &data);
        let query = MatchSet::parse(&needle.to_string(), width);

        let mut whole = Vec::new();
        scan_buffer(Address::new(0x1000), &data, &query, &mut whole);

        let mut chunked = Vec::new();
        MemoryScanner::with_chunk_size(&memory, chunk)
            .scan_region(&anon_region(0x1000, data.len() as u64), &query, &mut chunked)
            .unwrap();

        prop_assert_eq!(chunked, whole);
    }

    #[test]
    fn patched_integer_is_retained_by_rescan(
        width in width_strategy(),
        value in any::<i64>(),
        unsigned in any::<bool>(),
    ) {
        let bits = width.bits();
        let text = if unsigned {
            ((value as u64) >> (64 - bits)).to_string()
        } else {
            (value >> (64 - bits)).to_string()
        };
        prop_assume!(EncodedValue::for_patch(&text, width).is_ok());

        let memory = FakeMemory::new();
        memory.map_zeroed(0x1000, 32);
        memory.poke(0x1004, &[0x5A]);
        let source = ScriptedSource::new(vec![anon_region(0x1000, 32)]);
        let mut session = Session::new(PID, &memory, Box::new(source))
            .unwrap()
            .with_width(width);

        session.scan("90").unwrap();
        prop_assert_eq!(session.results(), &[Address::new(0x1004)]);

        session.patch(0, &text).unwrap();
        session.scan(&text).unwrap();
        prop_assert_eq!(session.results(), &[Address::new(0x1004)]);
    }
}
