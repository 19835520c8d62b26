//! Human-readable program dump for debugging and documentation.
//!
//! One line per instruction, operands resolved through the constant pool,
//! indented by element depth.

use std::fmt::Write as _;

use crate::instruction::Instruction;
use crate::namespace::Namespace;
use crate::program::Program;

/// Generate a human-readable dump of a program.
pub fn dump(program: &Program) -> String {
    let mut out = String::new();
    let mut depth: usize = 0;

    for (index, instruction) in program.instructions().iter().enumerate() {
        if matches!(instruction, Instruction::CloseElement) {
            depth = depth.saturating_sub(1);
        }

        let _ = write!(out, "{index:04} {:indent$}", "", indent = depth * 2);
        dump_instruction(&mut out, program, instruction);
        out.push('\n');

        if matches!(instruction, Instruction::OpenElement { .. }) {
            depth += 1;
        }
    }

    out
}

fn dump_instruction(out: &mut String, program: &Program, instruction: &Instruction) {
    let _ = match *instruction {
        Instruction::OpenElement { tag, namespace } => write!(
            out,
            "open_element <{}> {}",
            program.resolve(tag),
            namespace_label(program.resolve(namespace)),
        ),
        Instruction::CloseElement => write!(out, "close_element"),
        Instruction::SetAttribute {
            name,
            value,
            namespace,
        } => write!(
            out,
            "set_attribute {}={:?} {}",
            program.resolve(name),
            program.resolve(value),
            namespace_label(program.resolve(namespace)),
        ),
        Instruction::AppendText { text } => {
            write!(out, "append_text {:?}", program.resolve(text))
        }
        Instruction::AppendComment { text } => {
            write!(out, "append_comment {:?}", program.resolve(text))
        }
        Instruction::AppendHtml { html } => {
            write!(out, "append_html {:?}", program.resolve(html))
        }
    };
}

/// Short label for a namespace URI; unknown URIs print verbatim.
fn namespace_label(uri: &str) -> String {
    match Namespace::from_uri(uri) {
        Some(ns) => format!("({ns})"),
        None => format!("({uri})"),
    }
}
