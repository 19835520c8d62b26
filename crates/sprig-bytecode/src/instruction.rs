//! Tree-construction instructions and their packed wire codec.
//!
//! The `Instruction` enum is the canonical in-memory form; the packed `u32`
//! stream (`encode_stream`/`decode_stream`) exists only at the serialization
//! boundary. Every string operand is a [`StringId`] into the program's
//! constant pool.

use serde::{Deserialize, Serialize};

use crate::ids::StringId;

/// Instruction opcodes, stored in the header bits above the operand count.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    OpenElement = 0x0,
    CloseElement = 0x1,
    SetAttribute = 0x2,
    AppendText = 0x3,
    AppendComment = 0x4,
    AppendHtml = 0x5,
}

impl Opcode {
    /// Decode raw opcode bits from a header word.
    pub fn from_u32(v: u32) -> Result<Self, DecodeError> {
        match v {
            0x0 => Ok(Self::OpenElement),
            0x1 => Ok(Self::CloseElement),
            0x2 => Ok(Self::SetAttribute),
            0x3 => Ok(Self::AppendText),
            0x4 => Ok(Self::AppendComment),
            0x5 => Ok(Self::AppendHtml),
            _ => Err(DecodeError::InvalidOpcode(v)),
        }
    }

    /// Number of operand words following this instruction's header.
    pub fn operand_count(self) -> usize {
        match self {
            Self::OpenElement => 2,
            Self::CloseElement => 0,
            Self::SetAttribute => 3,
            Self::AppendText => 1,
            Self::AppendComment => 1,
            Self::AppendHtml => 1,
        }
    }

    /// Whether executing this opcode registers a node token.
    pub fn creates_node(self) -> bool {
        matches!(self, Self::OpenElement | Self::AppendText | Self::AppendComment)
    }

    /// Mnemonic used by the disassembler.
    pub fn name(self) -> &'static str {
        match self {
            Self::OpenElement => "open_element",
            Self::CloseElement => "close_element",
            Self::SetAttribute => "set_attribute",
            Self::AppendText => "append_text",
            Self::AppendComment => "append_comment",
            Self::AppendHtml => "append_html",
        }
    }
}

/// Pack an opcode and operand count into a single header word.
///
/// Layout: `opcode << 3 | operand_count`, operand count in the low two bits.
///
/// # Panics
/// Panics if `operand_count > 3`.
pub fn pack_header(opcode: Opcode, operand_count: usize) -> u32 {
    assert!(operand_count <= 3, "operand count overflow: {operand_count}");
    ((opcode as u32) << 3) | operand_count as u32
}

/// Split a header word into raw opcode bits and operand count.
pub fn unpack_header(word: u32) -> (u32, usize) {
    (word >> 3, (word & 0b11) as usize)
}

/// One tree-construction instruction.
///
/// The sequence of instructions is a flattened pre-order traversal of the
/// subtree to build; the VM dispatches on it with an exhaustive match.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Instruction {
    /// Begin an element. The element stays pending (not connected to the
    /// tree) until a child is appended or the element is closed.
    OpenElement { tag: StringId, namespace: StringId },
    /// Close the innermost open element, restoring the enclosing parent.
    CloseElement,
    /// Set an attribute on the pending element. Only valid between an open
    /// and the first child append; the VM rejects it otherwise.
    SetAttribute {
        name: StringId,
        value: StringId,
        namespace: StringId,
    },
    /// Append a text node to the current parent.
    AppendText { text: StringId },
    /// Append a comment node to the current parent.
    AppendComment { text: StringId },
    /// Reserved. Assembles and round-trips, but the VM refuses to execute it.
    AppendHtml { html: StringId },
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::OpenElement { .. } => Opcode::OpenElement,
            Self::CloseElement => Opcode::CloseElement,
            Self::SetAttribute { .. } => Opcode::SetAttribute,
            Self::AppendText { .. } => Opcode::AppendText,
            Self::AppendComment { .. } => Opcode::AppendComment,
            Self::AppendHtml { .. } => Opcode::AppendHtml,
        }
    }

    /// String operands in stream order.
    pub fn operands(&self) -> impl Iterator<Item = StringId> {
        let ids: [Option<StringId>; 3] = match *self {
            Self::OpenElement { tag, namespace } => [Some(tag), Some(namespace), None],
            Self::CloseElement => [None, None, None],
            Self::SetAttribute {
                name,
                value,
                namespace,
            } => [Some(name), Some(value), Some(namespace)],
            Self::AppendText { text } => [Some(text), None, None],
            Self::AppendComment { text } => [Some(text), None, None],
            Self::AppendHtml { html } => [Some(html), None, None],
        };
        ids.into_iter().flatten()
    }

    /// Append the packed form (header word + operand words) to `words`.
    pub fn encode_into(&self, words: &mut Vec<u32>) {
        let opcode = self.opcode();
        words.push(pack_header(opcode, opcode.operand_count()));
        words.extend(self.operands().map(|id| id.0));
    }
}

/// Encode instructions into a flat packed stream.
pub fn encode_stream(instructions: &[Instruction]) -> Vec<u32> {
    let mut words = Vec::with_capacity(instructions.len() * 2);
    for instruction in instructions {
        instruction.encode_into(&mut words);
    }
    words
}

/// Decode a packed stream back into instructions.
///
/// String ids are not range-checked here; [`crate::Program::from_stream`]
/// validates them against its constant pool.
pub fn decode_stream(words: &[u32]) -> Result<Vec<Instruction>, DecodeError> {
    let mut out = Vec::new();
    let mut cursor = 0;

    while cursor < words.len() {
        let (raw, size) = unpack_header(words[cursor]);
        let opcode = Opcode::from_u32(raw)?;
        if size != opcode.operand_count() {
            return Err(DecodeError::OperandCountMismatch {
                opcode,
                expected: opcode.operand_count(),
                found: size,
            });
        }

        let end = cursor + 1 + size;
        if end > words.len() {
            return Err(DecodeError::Truncated {
                missing: end - words.len(),
            });
        }
        let ops = &words[cursor + 1..end];

        out.push(match opcode {
            Opcode::OpenElement => Instruction::OpenElement {
                tag: StringId(ops[0]),
                namespace: StringId(ops[1]),
            },
            Opcode::CloseElement => Instruction::CloseElement,
            Opcode::SetAttribute => Instruction::SetAttribute {
                name: StringId(ops[0]),
                value: StringId(ops[1]),
                namespace: StringId(ops[2]),
            },
            Opcode::AppendText => Instruction::AppendText {
                text: StringId(ops[0]),
            },
            Opcode::AppendComment => Instruction::AppendComment {
                text: StringId(ops[0]),
            },
            Opcode::AppendHtml => Instruction::AppendHtml {
                html: StringId(ops[0]),
            },
        });
        cursor = end;
    }

    Ok(out)
}

/// Errors from decoding a packed instruction stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid opcode: {0:#x}")]
    InvalidOpcode(u32),

    #[error("operand count mismatch for {}: header says {found}, expected {expected}", opcode.name())]
    OperandCountMismatch {
        opcode: Opcode,
        expected: usize,
        found: usize,
    },

    #[error("instruction stream truncated: {missing} operand word(s) missing")]
    Truncated { missing: usize },

    #[error("string id {id} out of range (pool holds {len} strings)")]
    StringIdOutOfRange { id: u32, len: usize },
}
