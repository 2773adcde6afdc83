//! Human-readable disassembly for debugging.
//!
//! One line per instruction: zero-padded byte offset, two spaces, then the
//! instruction in assembly form.
//!
//! ```text
//! 0000  PUSH 25
//! 0009  POP r5
//! 0018  INT 33
//! ```

use std::fmt::Write as _;

use vcpu_core::Colors;

use crate::stream::ByteStream;

use super::decode::{Op, decode};

/// Disassemble encoded program bytes.
pub fn dump(bytes: &[u8], colors: Colors) -> String {
    let mut out = String::new();
    let mut stream = ByteStream::reader(bytes);
    let width = offset_width(bytes.len());

    while stream.position() < stream.len() {
        let before = stream.position();
        match decode(&mut stream) {
            Ok(decoded) => {
                writeln!(
                    out,
                    "{}{:0width$}{}  {}",
                    colors.muted,
                    decoded.offset,
                    colors.reset,
                    format_op(&decoded.op, colors),
                )
                .unwrap();
            }
            Err(e) => {
                writeln!(
                    out,
                    "{}{:0width$}{}  {}error: {}{}",
                    colors.muted, before, colors.reset, colors.fault, e, colors.reset,
                )
                .unwrap();
                break;
            }
        }
        // Reads at the very end of capacity fail without moving the cursor.
        if stream.position() == before {
            break;
        }
    }

    out
}

/// Format a decoded instruction in assembly form.
pub fn format_op(op: &Op, c: Colors) -> String {
    match op {
        Op::Push { value } => {
            format!("{}PUSH{} {}{}{}", c.mnemonic, c.reset, c.value, value, c.reset)
        }
        Op::Pop { dst } => format!("{}POP{} {}", c.mnemonic, c.reset, dst),
        Op::Arith { op, lhs, rhs } => {
            format!("{}{}{} {}, {}", c.mnemonic, op.opcode(), c.reset, lhs, rhs)
        }
        Op::Jmp { target } => {
            format!("{}JMP{} {}{}{}", c.mnemonic, c.reset, c.value, target, c.reset)
        }
        Op::Unimplemented { opcode, operands } => {
            let mut s = format!("{}{}{}", c.mnemonic, opcode, c.reset);
            push_words(&mut s, operands);
            s
        }
        Op::Unknown { tag, operands } => {
            let mut s = format!("{}UNKNOWN({:#04x}){}", c.fault, tag, c.reset);
            push_words(&mut s, operands);
            s
        }
        Op::ArityMismatch {
            opcode,
            expected,
            found,
        } => format!(
            "{}{}{} {}({} operands, expected {}){}",
            c.fault, opcode, c.reset, c.muted, found, expected, c.reset
        ),
    }
}

fn push_words(s: &mut String, words: &[u32]) {
    for (i, w) in words.iter().enumerate() {
        s.push_str(if i == 0 { " " } else { ", " });
        write!(s, "{w}").unwrap();
    }
}

/// Digits needed for offsets, at least 4.
fn offset_width(len: usize) -> usize {
    len.to_string().len().max(4)
}
