//! Register file.

use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};
use vcpu_bytecode::{REGISTER_COUNT, Register};

/// Fourteen 32-bit registers, indexed by [`Register`].
///
/// Values are stored unsigned; arithmetic reinterprets them as `i32`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    values: [u32; REGISTER_COUNT],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, register: Register) -> u32 {
        self.values[register.index()]
    }

    #[inline]
    pub fn set(&mut self, register: Register, value: u32) {
        self.values[register.index()] = value;
    }

    pub fn reset(&mut self) {
        self.values = [0; REGISTER_COUNT];
    }

    pub fn as_array(&self) -> &[u32; REGISTER_COUNT] {
        &self.values
    }

    /// `(register, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (Register, u32)> + '_ {
        Register::ALL.iter().map(|&r| (r, self.get(r)))
    }
}

impl Index<Register> for RegisterFile {
    type Output = u32;

    fn index(&self, register: Register) -> &u32 {
        &self.values[register.index()]
    }
}

/// Serializes as `{ "r0": .., ..., "sf": .. }` in id order.
impl Serialize for RegisterFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(REGISTER_COUNT))?;
        for (register, value) in self.iter() {
            map.serialize_entry(register.name(), &value)?;
        }
        map.end()
    }
}
