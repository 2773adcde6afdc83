//! Upward-growing stack in `[0, STACK_SIZE)`.
//!
//! Slots are four bytes, stored big-endian. `SP` holds the offset of the next
//! free slot, so an empty stack has `SP == 0`.

use vcpu_bytecode::Register;

use super::memory::{Memory, MemoryError, STACK_SIZE};
use super::registers::RegisterFile;

const SLOT: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    #[error("stack overflow (sp = {sp})")]
    Overflow { sp: u32 },
    #[error("stack underflow (sp = {sp})")]
    Underflow { sp: u32 },
    #[error("stack pointer {sp} lies past the stack region")]
    PointerOutOfBounds { sp: u32 },
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Stack view over a memory image and the register holding `SP`.
pub struct Stack<'a> {
    memory: &'a mut Memory,
    registers: &'a mut RegisterFile,
}

impl<'a> Stack<'a> {
    pub fn new(memory: &'a mut Memory, registers: &'a mut RegisterFile) -> Self {
        Self { memory, registers }
    }

    #[inline]
    pub fn pointer(&self) -> u32 {
        self.registers.get(Register::Sp)
    }

    /// Slots currently on the stack.
    pub fn depth(&self) -> u32 {
        self.pointer() / SLOT
    }

    /// Push a word. On error neither memory nor `SP` changes.
    pub fn push(&mut self, value: u32) -> Result<(), StackError> {
        let sp = self.pointer();
        if sp as usize + SLOT as usize > STACK_SIZE {
            return Err(StackError::Overflow { sp });
        }
        self.memory.write_u32_be(sp, value)?;
        self.registers.set(Register::Sp, sp + SLOT);
        Ok(())
    }

    /// Pop a word. On error neither memory nor `SP` changes.
    pub fn pop(&mut self) -> Result<u32, StackError> {
        let sp = self.pointer();
        if sp < SLOT {
            return Err(StackError::Underflow { sp });
        }
        if sp as usize > STACK_SIZE {
            return Err(StackError::PointerOutOfBounds { sp });
        }
        let value = self.memory.read_u32_be(sp - SLOT)?;
        self.registers.set(Register::Sp, sp - SLOT);
        Ok(value)
    }

    /// Top word without popping.
    pub fn peek(&self) -> Option<u32> {
        let sp = self.pointer();
        if sp < SLOT || sp as usize > STACK_SIZE {
            return None;
        }
        self.memory.read_u32_be(sp - SLOT).ok()
    }
}
