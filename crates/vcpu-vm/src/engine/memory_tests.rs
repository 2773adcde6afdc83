use super::memory::{
    BLOCK_ALLOCATED, FREE_SENTINEL, MEMORY_SIZE, Memory, MemoryError, STACK_SIZE,
    slab_boundaries,
};

#[test]
fn fresh_image_has_free_slab_headers() {
    let memory = Memory::new();
    let bounds: Vec<usize> = slab_boundaries().collect();

    assert_eq!(bounds.len(), 16);
    assert_eq!(bounds[0], STACK_SIZE);
    assert_eq!(bounds[15], 62464);
    for b in bounds {
        assert_eq!(memory.as_bytes()[b..b + 3], FREE_SENTINEL, "slab at {b}");
    }
    assert!(memory.as_bytes()[..STACK_SIZE].iter().all(|&b| b == 0));
}

#[test]
fn malloc_writes_big_endian_header() {
    let mut memory = Memory::new();
    let addr = memory.malloc(0x1234).unwrap();

    assert_eq!(addr, STACK_SIZE as u32 + 3);
    assert_eq!(
        memory.as_bytes()[STACK_SIZE..STACK_SIZE + 3],
        [0x12, 0x34, BLOCK_ALLOCATED]
    );
    assert_eq!(memory.block_size(addr), Some(0x1234));
    assert!(memory.is_allocated(addr));
}

#[test]
fn malloc_is_first_fit() {
    let mut memory = Memory::new();
    assert_eq!(memory.malloc(10), Some(1027));
    assert_eq!(memory.malloc(10), Some(5123));
    assert_eq!(memory.malloc(10), Some(9219));
}

#[test]
fn free_restores_sentinel_and_block_is_reused() {
    let mut memory = Memory::new();
    let first = memory.malloc(100).unwrap();
    let second = memory.malloc(100).unwrap();

    assert!(memory.free(first));
    assert_eq!(memory.as_bytes()[first as usize - 3..first as usize], FREE_SENTINEL);
    assert!(!memory.is_allocated(first));
    assert_eq!(memory.block_size(first), None);

    assert_eq!(memory.malloc(50), Some(first));
    assert!(memory.is_allocated(second));
}

#[test]
fn block_spanning_slabs_claims_the_slabs_it_covers() {
    let mut memory = Memory::new();
    let big = memory.malloc(5000).unwrap();
    assert_eq!(big, 1027);
    assert_ne!(memory.as_bytes()[5120..5123], FREE_SENTINEL);

    // 5120 lies inside the big block, so the next block starts a slab later.
    assert_eq!(memory.malloc(8), Some(9219));

    assert!(memory.free(big));
    assert_eq!(memory.as_bytes()[5120..5123], FREE_SENTINEL);
    assert_eq!(memory.malloc(8), Some(1027));
    assert_eq!(memory.malloc(8), Some(5123));
}

#[test]
fn block_never_runs_over_a_live_slab() {
    let mut memory = Memory::new();
    let first = memory.malloc(8).unwrap();
    memory.malloc(8).unwrap();
    memory.free(first);

    // 1024 is free but a 5000-byte block there would cover the live 5120 slab.
    assert_eq!(memory.malloc(5000), Some(9219));
    assert!(memory.is_allocated(5123));
}

#[test]
fn malloc_fails_once_every_slab_is_taken() {
    let mut memory = Memory::new();
    for _ in 0..16 {
        assert!(memory.malloc(1).is_some());
    }
    assert_eq!(memory.malloc(1), None);
}

#[test]
fn malloc_rejects_blocks_running_off_the_image() {
    let mut memory = Memory::new();
    for _ in 0..15 {
        memory.malloc(1).unwrap();
    }

    // Last slab header sits at 62464; 62464 + 2 + 4000 is past the end.
    assert_eq!(memory.malloc(4000), None);
    assert_eq!(memory.malloc(3000), Some(62467));
}

#[test]
fn malloc_rejects_sizes_the_header_cannot_hold() {
    let mut memory = Memory::new();
    assert_eq!(memory.malloc(70_000), None);
    assert_eq!(memory.as_bytes()[STACK_SIZE..STACK_SIZE + 3], FREE_SENTINEL);
}

#[test]
fn free_outside_image_is_ignored() {
    let mut memory = Memory::new();
    let before = memory.clone();

    assert!(!memory.free(0));
    assert!(!memory.free(2));
    assert!(!memory.free(MEMORY_SIZE as u32));
    assert!(!memory.free(u32::MAX));
    assert!(memory == before);
}

#[test]
fn reset_zeroes_and_restamps() {
    let mut memory = Memory::new();
    let addr = memory.malloc(4).unwrap();
    memory.write(addr, &[1, 2, 3, 4]).unwrap();
    memory.write(10, &[0xAA]).unwrap();

    memory.reset();

    assert!(memory == Memory::new());
    assert_eq!(memory.malloc(4), Some(addr));
}

#[test]
fn address_of_rejects_offsets_outside_image() {
    let memory = Memory::new();
    assert_eq!(memory.address_of(0), Ok(0));
    assert_eq!(memory.address_of(1027), Ok(1027));
    assert_eq!(memory.address_of(MEMORY_SIZE as i64 - 1), Ok(65535));
    assert_eq!(memory.address_of(-1), Err(MemoryError::InvalidAddress(-1)));
    assert_eq!(
        memory.address_of(MEMORY_SIZE as i64),
        Err(MemoryError::InvalidAddress(65536))
    );
}

#[test]
fn byte_access_is_bounds_checked() {
    let mut memory = Memory::new();
    assert!(memory.write(65534, &[1, 2]).is_ok());
    assert_eq!(
        memory.write(65535, &[1, 2]),
        Err(MemoryError::OutOfBounds { addr: 65535, len: 2 })
    );
    assert_eq!(memory.slice(65534, 2).unwrap(), &[1, 2]);
    assert!(memory.slice(u32::MAX, 1).is_err());
    assert!(memory.read_u32_be(65533).is_err());

    memory.write_u32_be(100, 0x0102_0304).unwrap();
    assert_eq!(memory.slice(100, 4).unwrap(), &[1, 2, 3, 4]);
    assert_eq!(memory.read_u32_be(100), Ok(0x0102_0304));
}

#[test]
fn hexdump_formats_rows() {
    let mut memory = Memory::new();
    memory.write(STACK_SIZE as u32 + 3, b"Hi there").unwrap();

    let dump = memory.hexdump(STACK_SIZE as u32, 2).unwrap();
    let lines: Vec<&str> = dump.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "0x00000400: 0F FF 01 48 69 20 74 68 65 72 65 00 00 00 00  | ~~~Hi there~~~~"
    );
    assert_eq!(
        lines[1],
        "0x0000040F: 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00  | ~~~~~~~~~~~~~~~"
    );
}

#[test]
fn hexdump_pads_last_row_at_end_of_image() {
    let mut memory = Memory::new();
    memory.write(65534, b"AZ").unwrap();

    let dump = memory.hexdump(65534, 3).unwrap();
    let expected = format!("0x0000FFFE: 41 5A {} | AZ\n", "   ".repeat(13));
    assert_eq!(dump, expected);
}

#[test]
fn hexdump_rejects_start_outside_image() {
    let memory = Memory::new();
    assert!(matches!(
        memory.hexdump(MEMORY_SIZE as u32, 1),
        Err(MemoryError::OutOfBounds { .. })
    ));
    assert_eq!(memory.hexdump(0, 0).unwrap(), "");
}
