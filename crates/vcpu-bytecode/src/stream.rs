//! Cursor-addressed byte buffer with typed accessors.
//!
//! A `ByteStream` has a fixed capacity of [`STREAM_CAPACITY`] bytes and is
//! either writable or read-only for its whole lifetime. Every access is
//! bounds-checked against the capacity; rejected accesses return 0 and leave
//! the stream untouched.
//!
//! Typed helpers use the host's native byte order. The encoding is therefore
//! platform-dependent and must not be treated as a portable wire format.

use tracing::warn;

/// Fixed capacity of every stream, in bytes.
pub const STREAM_CAPACITY: usize = 6144;

/// Width of the `write_string`/`read_string` length prefix.
pub const STRING_PREFIX_WIDTH: usize = 8;

/// Fixed-capacity byte buffer with a read/write cursor.
pub struct ByteStream {
    position: usize,
    /// High-water mark of bytes written.
    length: usize,
    writable: bool,
    bytes: Box<[u8]>,
}

macro_rules! typed_accessors {
    ($($write:ident, $read:ident => $ty:ty;)*) => {
        $(
            #[doc = concat!("Append a native-endian `", stringify!($ty), "`.")]
            pub fn $write(&mut self, value: $ty) -> usize {
                self.append(&value.to_ne_bytes())
            }

            #[doc = concat!("Read a native-endian `", stringify!($ty), "`, or 0 if out of bounds.")]
            pub fn $read(&mut self) -> $ty {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                self.read(&mut buf);
                <$ty>::from_ne_bytes(buf)
            }
        )*
    };
}

impl ByteStream {
    fn with_mode(writable: bool) -> Self {
        Self {
            position: 0,
            length: 0,
            writable,
            bytes: vec![0u8; STREAM_CAPACITY].into_boxed_slice(),
        }
    }

    /// Create an empty writable stream.
    pub fn writer() -> Self {
        Self::with_mode(true)
    }

    /// Create a read-only stream holding a copy of `data`.
    ///
    /// At most [`STREAM_CAPACITY`] bytes are copied; the remainder is dropped
    /// with a warning.
    pub fn reader(data: &[u8]) -> Self {
        let mut stream = Self::with_mode(false);
        let len = data.len().min(STREAM_CAPACITY);
        if len < data.len() {
            warn!(
                given = data.len(),
                capacity = STREAM_CAPACITY,
                "reader() truncated input to stream capacity"
            );
        }
        stream.bytes[..len].copy_from_slice(&data[..len]);
        stream.length = len;
        stream
    }

    /// Cursor position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// High-water mark of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Check if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Check whether moving the cursor by `size` would leave the buffer.
    #[inline]
    pub fn is_out_of_bounds(&self, size: usize) -> bool {
        self.position
            .checked_add(size)
            .is_none_or(|end| end > STREAM_CAPACITY)
    }

    /// Copy `data` in at the cursor.
    ///
    /// Returns the number of bytes written: `data.len()` on success, 0 if the
    /// stream is read-only or the write would exceed capacity.
    pub fn append(&mut self, data: &[u8]) -> usize {
        if !self.writable {
            warn!("append() rejected: stream is not writable");
            return 0;
        }
        if self.is_out_of_bounds(data.len()) {
            warn!(
                position = self.position,
                size = data.len(),
                capacity = STREAM_CAPACITY,
                "append() out of bounds"
            );
            return 0;
        }

        let end = self.position + data.len();
        self.bytes[self.position..end].copy_from_slice(data);
        self.position = end;
        self.length = self.length.max(end);
        data.len()
    }

    /// Copy `dest.len()` bytes out from the cursor.
    ///
    /// Returns the number of bytes read: `dest.len()` on success, 0 if the read
    /// would exceed capacity (in which case `dest` is left untouched).
    pub fn read(&mut self, dest: &mut [u8]) -> usize {
        if self.is_out_of_bounds(dest.len()) {
            warn!(
                position = self.position,
                size = dest.len(),
                capacity = STREAM_CAPACITY,
                "read() out of bounds"
            );
            return 0;
        }

        let end = self.position + dest.len();
        dest.copy_from_slice(&self.bytes[self.position..end]);
        self.position = end;
        dest.len()
    }

    /// Rewind the cursor. Content and length are kept.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Move the cursor to an absolute position.
    ///
    /// Returns `false` (cursor unchanged) if `position` exceeds capacity.
    pub fn set_position(&mut self, position: usize) -> bool {
        if position > STREAM_CAPACITY {
            return false;
        }
        self.position = position;
        true
    }

    /// Advance the cursor without copying.
    ///
    /// Returns `false` (cursor unchanged) if the move would exceed capacity.
    pub fn skip(&mut self, size: usize) -> bool {
        if self.is_out_of_bounds(size) {
            return false;
        }
        self.position += size;
        true
    }

    /// Owned copy of the written bytes.
    pub fn snapshot(&self) -> Vec<u8> {
        self.bytes[..self.length].to_vec()
    }

    /// Borrow the written bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.length]
    }

    typed_accessors! {
        write_i8, read_i8 => i8;
        write_i16, read_i16 => i16;
        write_i32, read_i32 => i32;
        write_i64, read_i64 => i64;
        write_u8, read_u8 => u8;
        write_u16, read_u16 => u16;
        write_u32, read_u32 => u32;
        write_u64, read_u64 => u64;
    }

    /// Append `s` as an 8-byte length prefix followed by its raw bytes.
    ///
    /// No terminator is written. Returns the string length, or 0 if prefix and
    /// payload do not fit together (nothing is written then).
    pub fn write_string(&mut self, s: &str) -> usize {
        let mut encoded = Vec::with_capacity(STRING_PREFIX_WIDTH + s.len());
        encoded.extend_from_slice(&(s.len() as i64).to_ne_bytes());
        encoded.extend_from_slice(s.as_bytes());
        if self.append(&encoded) == 0 {
            return 0;
        }
        s.len()
    }

    /// Read a length-prefixed string into `dest`.
    ///
    /// Returns the number of payload bytes read. If the payload is out of
    /// bounds this is 0 and the cursor stays before the prefix.
    ///
    /// # Panics
    ///
    /// The caller must size `dest` for the encoded length. A prefix larger than
    /// `dest.len()` (including a negative one) is a broken precondition and
    /// panics; it is not reported as an error.
    pub fn read_string(&mut self, dest: &mut [u8]) -> usize {
        let start = self.position;
        let len = self.read_i64();
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        assert!(
            len <= dest.len(),
            "read_string: destination holds {} bytes, encoded length is {}",
            dest.len(),
            len
        );
        let read = self.read(&mut dest[..len]);
        if read < len {
            self.position = start;
        }
        read
    }
}

impl Default for ByteStream {
    fn default() -> Self {
        Self::writer()
    }
}

impl std::fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteStream")
            .field("position", &self.position)
            .field("length", &self.length)
            .field("writable", &self.writable)
            .finish()
    }
}
