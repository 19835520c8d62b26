//! Tests for instruction headers and the packed stream codec.

use crate::ids::StringId;
use crate::instruction::{
    DecodeError, Instruction, Opcode, decode_stream, encode_stream, pack_header, unpack_header,
};

#[test]
fn opcode_operand_counts() {
    assert_eq!(Opcode::OpenElement.operand_count(), 2);
    assert_eq!(Opcode::CloseElement.operand_count(), 0);
    assert_eq!(Opcode::SetAttribute.operand_count(), 3);
    assert_eq!(Opcode::AppendText.operand_count(), 1);
    assert_eq!(Opcode::AppendComment.operand_count(), 1);
    assert_eq!(Opcode::AppendHtml.operand_count(), 1);
}

#[test]
fn opcode_creates_node() {
    assert!(Opcode::OpenElement.creates_node());
    assert!(Opcode::AppendText.creates_node());
    assert!(Opcode::AppendComment.creates_node());
    assert!(!Opcode::CloseElement.creates_node());
    assert!(!Opcode::SetAttribute.creates_node());
    assert!(!Opcode::AppendHtml.creates_node());
}

#[test]
fn header_layout() {
    // opcode in the high bits, operand count in the low two.
    assert_eq!(pack_header(Opcode::OpenElement, 2), 0b000_010);
    assert_eq!(pack_header(Opcode::SetAttribute, 3), 0b010_011);
    assert_eq!(pack_header(Opcode::CloseElement, 0), 0b001_000);
}

#[test]
fn header_roundtrip() {
    for opcode in [
        Opcode::OpenElement,
        Opcode::CloseElement,
        Opcode::SetAttribute,
        Opcode::AppendText,
        Opcode::AppendComment,
        Opcode::AppendHtml,
    ] {
        let word = pack_header(opcode, opcode.operand_count());
        let (raw, size) = unpack_header(word);
        assert_eq!(Opcode::from_u32(raw), Ok(opcode));
        assert_eq!(size, opcode.operand_count());
    }
}

#[test]
#[should_panic(expected = "operand count overflow")]
fn pack_header_rejects_oversized_count() {
    pack_header(Opcode::OpenElement, 4);
}

fn sample_instructions() -> Vec<Instruction> {
    vec![
        Instruction::OpenElement {
            tag: StringId(0),
            namespace: StringId(1),
        },
        Instruction::SetAttribute {
            name: StringId(2),
            value: StringId(3),
            namespace: StringId(1),
        },
        Instruction::AppendText { text: StringId(4) },
        Instruction::AppendComment { text: StringId(5) },
        Instruction::CloseElement,
    ]
}

#[test]
fn stream_roundtrip() {
    let instructions = sample_instructions();
    let words = encode_stream(&instructions);
    // header + operands per instruction: 3 + 4 + 2 + 2 + 1
    assert_eq!(words.len(), 12);
    assert_eq!(decode_stream(&words).unwrap(), instructions);
}

#[test]
fn decode_rejects_invalid_opcode() {
    let words = [0x9 << 3];
    assert!(matches!(
        decode_stream(&words),
        Err(DecodeError::InvalidOpcode(_))
    ));
}

#[test]
fn decode_rejects_operand_count_mismatch() {
    // OpenElement header claiming a single operand.
    let words = [((Opcode::OpenElement as u32) << 3) | 1, 0];
    assert_eq!(
        decode_stream(&words),
        Err(DecodeError::OperandCountMismatch {
            opcode: Opcode::OpenElement,
            expected: 2,
            found: 1,
        })
    );
}

#[test]
fn decode_rejects_truncated_stream() {
    // OpenElement wants two operand words; only one follows.
    let words = vec![pack_header(Opcode::OpenElement, 2), 0];
    assert_eq!(
        decode_stream(&words),
        Err(DecodeError::Truncated { missing: 1 })
    );
}

#[test]
fn operands_match_stream_order() {
    let instruction = Instruction::SetAttribute {
        name: StringId(7),
        value: StringId(8),
        namespace: StringId(9),
    };
    let ids: Vec<u32> = instruction.operands().map(|id| id.0).collect();
    assert_eq!(ids, vec![7, 8, 9]);

    assert_eq!(Instruction::CloseElement.operands().count(), 0);
}
