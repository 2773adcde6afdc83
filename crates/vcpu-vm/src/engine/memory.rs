//! Flat memory image with a slab allocator.
//!
//! The image is `MEMORY_SIZE` bytes. The first `STACK_SIZE` bytes belong to
//! the stack; the rest is cut into slabs of `PADDING_SIZE` bytes, each starting
//! with a three-byte block header:
//!
//! ```text
//! free:       0F FF 01
//! allocated:  size_hi size_lo 02 | data...
//!                                ^ returned address
//! ```
//!
//! Allocation is first-fit over free headers. There is no coalescing and no
//! splitting. A block may run past its slab, but only over slabs that are
//! free; their headers are cleared while the block lives and restamped by
//! `free`.

use std::fmt::Write as _;

use tracing::{debug, warn};

pub const MEMORY_SIZE: usize = 65536;
pub const STACK_SIZE: usize = 1024;
pub const PADDING_SIZE: usize = 4096;

/// Header bytes of a free slab.
pub const FREE_SENTINEL: [u8; 3] = [0x0F, 0xFF, 0x01];
/// State byte of an allocated block header.
pub const BLOCK_ALLOCATED: u8 = 0x02;
pub const BLOCK_HEADER_LEN: usize = 3;

const HEXDUMP_ROW_WIDTH: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MemoryError {
    #[error("{len} bytes at {addr:#x} fall outside the {MEMORY_SIZE}-byte image")]
    OutOfBounds { addr: u32, len: usize },
    #[error("offset {0} does not map to a memory address")]
    InvalidAddress(i64),
}

/// Owned memory image.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    /// Zeroed image with every slab boundary stamped free.
    pub fn new() -> Self {
        let mut memory = Self {
            bytes: vec![0u8; MEMORY_SIZE].into_boxed_slice(),
        };
        memory.stamp_slabs();
        memory
    }

    /// Zero the image and re-stamp the slab boundaries.
    pub fn reset(&mut self) {
        self.bytes.fill(0);
        let stamped = self.stamp_slabs();
        debug!(slabs = stamped, "memory reset");
    }

    fn stamp_slabs(&mut self) -> usize {
        let mut stamped = 0;
        for b in slab_boundaries() {
            let header = &mut self.bytes[b..b + BLOCK_HEADER_LEN];
            if *header != FREE_SENTINEL {
                header.copy_from_slice(&FREE_SENTINEL);
                stamped += 1;
            }
        }
        stamped
    }

    /// Reserve `size` bytes. Returns the address just past the block header.
    ///
    /// Scans slab boundaries in order and takes the first free header whose
    /// block fits inside the image without covering a live slab.
    pub fn malloc(&mut self, size: usize) -> Option<u32> {
        let Ok(size16) = u16::try_from(size) else {
            warn!(size, "allocation larger than a block header can describe");
            return None;
        };

        let Some(header) = slab_boundaries()
            .filter(|&i| i + 2 + size < MEMORY_SIZE)
            .find(|&i| {
                self.is_free_slab(i) && covered_slabs(i, size).all(|b| self.is_free_slab(b))
            })
        else {
            warn!(size, "out of memory");
            return None;
        };

        for b in covered_slabs(header, size) {
            self.bytes[b..b + BLOCK_HEADER_LEN].fill(0);
        }
        let [hi, lo] = size16.to_be_bytes();
        self.bytes[header..header + BLOCK_HEADER_LEN].copy_from_slice(&[hi, lo, BLOCK_ALLOCATED]);
        let addr = (header + BLOCK_HEADER_LEN) as u32;
        debug!(size, addr, "allocated block");
        Some(addr)
    }

    fn is_free_slab(&self, header: usize) -> bool {
        self.bytes[header..header + BLOCK_HEADER_LEN] == FREE_SENTINEL
    }

    /// Return a block to the allocator by restoring its free header.
    ///
    /// Addresses outside `[3, MEMORY_SIZE)` are ignored. Returns whether the
    /// header was rewritten. Slabs the block ran over become free again.
    pub fn free(&mut self, addr: u32) -> bool {
        if !(BLOCK_HEADER_LEN..MEMORY_SIZE).contains(&(addr as usize)) {
            warn!(addr, "free of an address outside the image");
            return false;
        }
        let header = addr as usize - BLOCK_HEADER_LEN;
        if let Some(size) = self.block_size(addr) {
            for b in covered_slabs(header, size as usize) {
                self.bytes[b..b + BLOCK_HEADER_LEN].copy_from_slice(&FREE_SENTINEL);
            }
        }
        self.bytes[header..header + BLOCK_HEADER_LEN].copy_from_slice(&FREE_SENTINEL);
        true
    }

    /// Size recorded in the header in front of `addr`.
    pub fn block_size(&self, addr: u32) -> Option<u16> {
        let header = self.header(addr)?;
        (header[2] == BLOCK_ALLOCATED).then(|| u16::from_be_bytes([header[0], header[1]]))
    }

    pub fn is_allocated(&self, addr: u32) -> bool {
        self.header(addr)
            .is_some_and(|header| header[2] == BLOCK_ALLOCATED)
    }

    fn header(&self, addr: u32) -> Option<&[u8]> {
        let addr = addr as usize;
        if !(BLOCK_HEADER_LEN..=MEMORY_SIZE).contains(&addr) {
            return None;
        }
        Some(&self.bytes[addr - BLOCK_HEADER_LEN..addr])
    }

    /// Translate an offset into the image to an address.
    pub fn address_of(&self, offset: i64) -> Result<u32, MemoryError> {
        if !(0..MEMORY_SIZE as i64).contains(&offset) {
            return Err(MemoryError::InvalidAddress(offset));
        }
        Ok(offset as u32)
    }

    pub fn slice(&self, addr: u32, len: usize) -> Result<&[u8], MemoryError> {
        let range = checked_range(addr, len)?;
        Ok(&self.bytes[range])
    }

    pub fn write(&mut self, addr: u32, data: &[u8]) -> Result<(), MemoryError> {
        let range = checked_range(addr, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    pub fn read_u32_be(&self, addr: u32) -> Result<u32, MemoryError> {
        let bytes = self.slice(addr, 4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn write_u32_be(&mut self, addr: u32, value: u32) -> Result<(), MemoryError> {
        self.write(addr, &value.to_be_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Render `rows` rows of 15 bytes starting at `start`.
    ///
    /// ```text
    /// 0x00000400: 0F FF 01 00 ... 00  | ~~~~~~~~~~~~~~~
    /// ```
    ///
    /// The last row is padded when the image ends mid-row.
    pub fn hexdump(&self, start: u32, rows: usize) -> Result<String, MemoryError> {
        if start as usize >= MEMORY_SIZE {
            return Err(MemoryError::OutOfBounds {
                addr: start,
                len: rows.saturating_mul(HEXDUMP_ROW_WIDTH),
            });
        }

        let start = start as usize;
        let end = MEMORY_SIZE.min(start.saturating_add(rows.saturating_mul(HEXDUMP_ROW_WIDTH)));
        let mut out = String::new();

        for row in (start..end).step_by(HEXDUMP_ROW_WIDTH) {
            let bytes = &self.bytes[row..end.min(row + HEXDUMP_ROW_WIDTH)];

            write!(out, "0x{row:08X}: ").unwrap();
            for i in 0..HEXDUMP_ROW_WIDTH {
                match bytes.get(i) {
                    Some(b) => write!(out, "{b:02X} ").unwrap(),
                    None => out.push_str("   "),
                }
            }
            out.push_str(" | ");
            for &b in bytes {
                out.push(if b == b' ' || b.is_ascii_graphic() {
                    b as char
                } else {
                    '~'
                });
            }
            out.push('\n');
        }

        Ok(out)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("size", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Header offsets of every slab: `STACK_SIZE + k * PADDING_SIZE` while the
/// header fits in the image.
pub fn slab_boundaries() -> impl Iterator<Item = usize> {
    (STACK_SIZE..MEMORY_SIZE - 2).step_by(PADDING_SIZE)
}

/// Slab boundaries strictly inside a block whose header sits at `header`.
fn covered_slabs(header: usize, size: usize) -> impl Iterator<Item = usize> {
    let end = header + BLOCK_HEADER_LEN + size;
    slab_boundaries().filter(move |&b| b > header && b < end)
}

fn checked_range(addr: u32, len: usize) -> Result<std::ops::Range<usize>, MemoryError> {
    let start = addr as usize;
    match start.checked_add(len) {
        Some(end) if end <= MEMORY_SIZE => Ok(start..end),
        _ => Err(MemoryError::OutOfBounds { addr, len }),
    }
}
