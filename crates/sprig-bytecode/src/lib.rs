//! Instruction format and assembler for Sprig DOM construction programs.
//!
//! This crate contains:
//! - The `Instruction` sum type and its packed integer wire codec
//! - The deduplicating string `ConstantPool`
//! - The `OperationsBuilder` assembler and the frozen `Program` it emits
//! - A human-readable program `dump` for debugging

mod builder;
mod constants;
mod dump;
mod ids;
mod instruction;
mod namespace;
mod program;

#[cfg(test)]
mod instruction_tests;

pub use builder::OperationsBuilder;
pub use constants::ConstantPool;
pub use dump::dump;
pub use ids::{BuildToken, StringId};
pub use instruction::{DecodeError, Instruction, Opcode, pack_header, unpack_header};
pub use namespace::{HTML_NAMESPACE, Namespace, SVG_NAMESPACE};
pub use program::Program;
