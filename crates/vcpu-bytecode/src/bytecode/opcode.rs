//! Instruction set.

use std::fmt;

/// Byte width of every operand consumed by the executor.
pub const OPERAND_WIDTH: usize = 4;

/// Opcode tag.
///
/// The discriminant is the byte written at the start of each encoded
/// instruction. `0x02` is unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Push an immediate onto the stack.
    Push = 0x00,
    /// Pop the stack into a register.
    Pop = 0x01,
    Add = 0x03,
    Sub = 0x04,
    Mul = 0x05,
    Div = 0x06,
    Or = 0x07,
    Xor = 0x08,
    And = 0x09,
    Cmp = 0x0A,
    /// Move the replay cursor to an offset inside the loaded window.
    Jmp = 0x0B,
    Je = 0x0C,
    Jne = 0x0D,
    /// Raise an interrupt.
    Int = 0x0E,
}

impl Opcode {
    pub const ALL: [Opcode; 14] = [
        Self::Push,
        Self::Pop,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Or,
        Self::Xor,
        Self::And,
        Self::Cmp,
        Self::Jmp,
        Self::Je,
        Self::Jne,
        Self::Int,
    ];

    /// Decode from bytecode tag. Returns `None` for unassigned tags.
    pub fn from_byte(b: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.to_byte() == b)
    }

    /// Encode for bytecode.
    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Declared operand count.
    pub fn arity(self) -> u32 {
        match self {
            Self::Push | Self::Pop | Self::Jmp | Self::Je | Self::Jne | Self::Int => 1,
            Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Div
            | Self::Or
            | Self::Xor
            | Self::And
            | Self::Cmp => 2,
        }
    }

    /// Check if the executor has a handler for this opcode.
    ///
    /// AND, CMP, JE, JNE and INT are part of the instruction set but fall
    /// through to the unknown-opcode path at runtime.
    pub fn is_implemented(self) -> bool {
        !matches!(
            self,
            Self::And | Self::Cmp | Self::Je | Self::Jne | Self::Int
        )
    }

    /// Uppercase assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::And => "AND",
            Self::Cmp => "CMP",
            Self::Jmp => "JMP",
            Self::Je => "JE",
            Self::Jne => "JNE",
            Self::Int => "INT",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Register-to-register arithmetic performed by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Or,
    Xor,
}

impl ArithOp {
    /// Map an opcode to its arithmetic operation, if it is one.
    pub fn from_opcode(opcode: Opcode) -> Option<Self> {
        match opcode {
            Opcode::Add => Some(Self::Add),
            Opcode::Sub => Some(Self::Sub),
            Opcode::Mul => Some(Self::Mul),
            Opcode::Div => Some(Self::Div),
            Opcode::Or => Some(Self::Or),
            Opcode::Xor => Some(Self::Xor),
            _ => None,
        }
    }

    pub fn opcode(self) -> Opcode {
        match self {
            Self::Add => Opcode::Add,
            Self::Sub => Opcode::Sub,
            Self::Mul => Opcode::Mul,
            Self::Div => Opcode::Div,
            Self::Or => Opcode::Or,
            Self::Xor => Opcode::Xor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_roundtrip() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_byte(op.to_byte()), Some(op));
        }
    }

    #[test]
    fn unassigned_tags() {
        assert_eq!(Opcode::from_byte(0x02), None);
        assert_eq!(Opcode::from_byte(0x0F), None);
        assert_eq!(Opcode::from_byte(0x21), None);
    }

    #[test]
    fn arity() {
        assert_eq!(Opcode::Push.arity(), 1);
        assert_eq!(Opcode::Pop.arity(), 1);
        assert_eq!(Opcode::Jmp.arity(), 1);
        assert_eq!(Opcode::Int.arity(), 1);
        assert_eq!(Opcode::Add.arity(), 2);
        assert_eq!(Opcode::Cmp.arity(), 2);
    }

    #[test]
    fn implemented_set() {
        let implemented: Vec<_> = Opcode::ALL
            .into_iter()
            .filter(|op| op.is_implemented())
            .collect();
        assert_eq!(
            implemented,
            [
                Opcode::Push,
                Opcode::Pop,
                Opcode::Add,
                Opcode::Sub,
                Opcode::Mul,
                Opcode::Div,
                Opcode::Or,
                Opcode::Xor,
                Opcode::Jmp,
            ]
        );
    }

    #[test]
    fn arith_mapping() {
        for op in Opcode::ALL {
            if let Some(arith) = ArithOp::from_opcode(op) {
                assert_eq!(arith.opcode(), op);
            }
        }
        assert_eq!(ArithOp::from_opcode(Opcode::And), None);
        assert_eq!(ArithOp::from_opcode(Opcode::Jmp), None);
    }
}
