//! Register identifiers.

use std::fmt;

/// Number of registers in the register file.
pub const REGISTER_COUNT: usize = 14;

/// Symbolic register id.
///
/// The discriminant is the id encoded in bytecode operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Register {
    R0 = 0x00,
    R1 = 0x01,
    R2 = 0x02,
    R3 = 0x03,
    R4 = 0x04,
    R5 = 0x05,
    R6 = 0x06,
    R7 = 0x07,
    R8 = 0x08,
    /// Program counter: absolute address of the instruction being executed.
    Pc = 0x09,
    /// Stack pointer: offset of the next free stack slot.
    Sp = 0x0A,
    /// Upper bound of the loaded program window.
    Px = 0x0B,
    /// Zero flag. Reserved for CMP, which is not implemented.
    Zf = 0x0C,
    /// Sign flag. Reserved for CMP, which is not implemented.
    Sf = 0x0D,
}

impl Register {
    /// All registers in id order.
    pub const ALL: [Register; REGISTER_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
        Self::R8,
        Self::Pc,
        Self::Sp,
        Self::Px,
        Self::Zf,
        Self::Sf,
    ];

    /// Decode an operand id. Returns `None` for ids outside the register file.
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.get(usize::try_from(id).ok()?).copied()
    }

    /// Operand id of this register.
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Index into the register file.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase assembly name.
    pub fn name(self) -> &'static str {
        match self {
            Self::R0 => "r0",
            Self::R1 => "r1",
            Self::R2 => "r2",
            Self::R3 => "r3",
            Self::R4 => "r4",
            Self::R5 => "r5",
            Self::R6 => "r6",
            Self::R7 => "r7",
            Self::R8 => "r8",
            Self::Pc => "pc",
            Self::Sp => "sp",
            Self::Px => "px",
            Self::Zf => "zf",
            Self::Sf => "sf",
        }
    }

    /// Check if this is one of the general purpose registers `r0..r8`.
    pub fn is_general_purpose(self) -> bool {
        self.id() <= Self::R8.id()
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrip() {
        for reg in Register::ALL {
            assert_eq!(Register::from_id(reg.id() as u32), Some(reg));
        }
    }

    #[test]
    fn out_of_range_ids() {
        assert_eq!(Register::from_id(14), None);
        assert_eq!(Register::from_id(0x21), None);
        assert_eq!(Register::from_id(u32::MAX), None);
    }

    #[test]
    fn names_and_kinds() {
        assert_eq!(Register::R5.to_string(), "r5");
        assert_eq!(Register::Sp.to_string(), "sp");
        assert!(Register::R8.is_general_purpose());
        assert!(!Register::Pc.is_general_purpose());
        assert_eq!(Register::Sf.index(), REGISTER_COUNT - 1);
    }
}
