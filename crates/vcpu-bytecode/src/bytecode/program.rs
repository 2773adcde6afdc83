//! Program model: an append-only list of instructions.
//!
//! Instructions keep their operands as raw bytes plus a width per operand,
//! which is exactly what the encoder writes. The typed constructors build
//! that raw form with 4-byte native-endian operands.

use super::opcode::{OPERAND_WIDTH, Opcode};
use super::register::Register;

/// Errors from building a program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    #[error("{opcode}: operand count {count} does not match {widths} declared widths")]
    WidthCountMismatch {
        opcode: Opcode,
        count: u32,
        widths: usize,
    },
    #[error("{opcode}: operand widths sum to {expected} bytes but {actual} were given")]
    OperandBytesMismatch {
        opcode: Opcode,
        expected: usize,
        actual: usize,
    },
}

/// One instruction. Immutable once appended to a [`Program`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    opcode: Opcode,
    operand_count: u32,
    widths: Vec<usize>,
    operand_bytes: Vec<u8>,
}

impl Instruction {
    /// Build an instruction from raw operands.
    ///
    /// `widths` holds one byte-width per operand; `operand_bytes` is all
    /// operands concatenated in order.
    pub fn new(
        opcode: Opcode,
        operand_count: u32,
        widths: Vec<usize>,
        operand_bytes: Vec<u8>,
    ) -> Result<Self, ProgramError> {
        if widths.len() != operand_count as usize {
            return Err(ProgramError::WidthCountMismatch {
                opcode,
                count: operand_count,
                widths: widths.len(),
            });
        }
        let expected: usize = widths.iter().sum();
        if expected != operand_bytes.len() {
            return Err(ProgramError::OperandBytesMismatch {
                opcode,
                expected,
                actual: operand_bytes.len(),
            });
        }

        Ok(Self {
            opcode,
            operand_count,
            widths,
            operand_bytes,
        })
    }

    /// Build an instruction from 4-byte operand words.
    pub fn with_words(opcode: Opcode, words: &[u32]) -> Self {
        let operand_bytes = words.iter().flat_map(|w| w.to_ne_bytes()).collect();
        Self {
            opcode,
            operand_count: words.len() as u32,
            widths: vec![OPERAND_WIDTH; words.len()],
            operand_bytes,
        }
    }

    pub fn push(value: i32) -> Self {
        Self::with_words(Opcode::Push, &[value as u32])
    }

    pub fn pop(dst: Register) -> Self {
        Self::with_words(Opcode::Pop, &[dst.id() as u32])
    }

    pub fn add(lhs: Register, rhs: Register) -> Self {
        Self::binary(Opcode::Add, lhs, rhs)
    }

    pub fn sub(lhs: Register, rhs: Register) -> Self {
        Self::binary(Opcode::Sub, lhs, rhs)
    }

    pub fn mul(lhs: Register, rhs: Register) -> Self {
        Self::binary(Opcode::Mul, lhs, rhs)
    }

    pub fn div(lhs: Register, rhs: Register) -> Self {
        Self::binary(Opcode::Div, lhs, rhs)
    }

    pub fn or(lhs: Register, rhs: Register) -> Self {
        Self::binary(Opcode::Or, lhs, rhs)
    }

    pub fn xor(lhs: Register, rhs: Register) -> Self {
        Self::binary(Opcode::Xor, lhs, rhs)
    }

    pub fn and(lhs: Register, rhs: Register) -> Self {
        Self::binary(Opcode::And, lhs, rhs)
    }

    pub fn cmp(lhs: Register, rhs: Register) -> Self {
        Self::binary(Opcode::Cmp, lhs, rhs)
    }

    /// Jump to a byte offset inside the loaded window.
    pub fn jmp(target: u32) -> Self {
        Self::with_words(Opcode::Jmp, &[target])
    }

    pub fn je(target: u32) -> Self {
        Self::with_words(Opcode::Je, &[target])
    }

    pub fn jne(target: u32) -> Self {
        Self::with_words(Opcode::Jne, &[target])
    }

    /// Raise interrupt `id`.
    pub fn int(id: u32) -> Self {
        Self::with_words(Opcode::Int, &[id])
    }

    fn binary(opcode: Opcode, lhs: Register, rhs: Register) -> Self {
        Self::with_words(opcode, &[lhs.id() as u32, rhs.id() as u32])
    }

    #[inline]
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Declared operand count, as written into the bytecode.
    #[inline]
    pub fn operand_count(&self) -> u32 {
        self.operand_count
    }

    /// Byte-width of each operand.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// All operands' bytes, concatenated.
    pub fn operand_bytes(&self) -> &[u8] {
        &self.operand_bytes
    }

    /// Iterate operands as byte slices, split by width.
    pub fn operands(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.widths.iter().scan(0usize, |offset, &width| {
            let start = *offset;
            *offset += width;
            Some(&self.operand_bytes[start..start + width])
        })
    }

    /// Encoded size: tag byte, 4-byte operand count, operand bytes.
    pub fn encoded_len(&self) -> usize {
        INSTRUCTION_HEADER_LEN + self.operand_bytes.len()
    }
}

/// Tag byte plus 4-byte operand count.
pub const INSTRUCTION_HEADER_LEN: usize = 1 + 4;

/// Ordered, append-only instruction sequence.
///
/// An instruction's index is its append position. There is no removal or
/// in-place edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw instruction. Returns its index.
    pub fn add_instruction(
        &mut self,
        opcode: Opcode,
        operand_count: u32,
        widths: Vec<usize>,
        operand_bytes: Vec<u8>,
    ) -> Result<usize, ProgramError> {
        let instruction = Instruction::new(opcode, operand_count, widths, operand_bytes)?;
        Ok(self.push(instruction))
    }

    /// Append an instruction. Returns its index.
    pub fn push(&mut self, instruction: Instruction) -> usize {
        let index = self.instructions.len();
        self.instructions.push(instruction);
        index
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Total encoded size of all instructions.
    pub fn encoded_len(&self) -> usize {
        self.instructions.iter().map(Instruction::encoded_len).sum()
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self {
            instructions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
