//! Frozen, replayable construction programs.

use serde::{Deserialize, Serialize};

use crate::constants::ConstantPool;
use crate::ids::StringId;
use crate::instruction::{DecodeError, Instruction, decode_stream, encode_stream};

/// A frozen instruction stream plus its constant pool.
///
/// Produced once per compiled template fragment by
/// [`OperationsBuilder::finish`](crate::OperationsBuilder::finish) and
/// immutable afterwards. A program may be replayed any number of times, from
/// any number of threads, against independent documents; each run allocates
/// its own construction state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    instructions: Vec<Instruction>,
    constants: ConstantPool,
}

impl Program {
    pub(crate) fn new(instructions: Vec<Instruction>, constants: ConstantPool) -> Self {
        Self {
            instructions,
            constants,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn constants(&self) -> &ConstantPool {
        &self.constants
    }

    /// Resolve a string operand against the pool.
    ///
    /// # Panics
    /// Panics if the ID is out of range. Ids inside a builder-produced
    /// program are valid by construction.
    pub fn resolve(&self, id: StringId) -> &str {
        self.constants.resolve(id)
    }

    /// Encode the instruction stream into its packed integer form.
    pub fn encode_stream(&self) -> Vec<u32> {
        encode_stream(&self.instructions)
    }

    /// Rebuild a program from a packed stream and its constant pool.
    ///
    /// Every string operand is validated against the pool, so a program
    /// obtained this way upholds the same index-validity invariant as a
    /// builder-produced one.
    pub fn from_stream(words: &[u32], constants: ConstantPool) -> Result<Self, DecodeError> {
        let instructions = decode_stream(words)?;
        for instruction in &instructions {
            for id in instruction.operands() {
                if !constants.contains_id(id) {
                    return Err(DecodeError::StringIdOutOfRange {
                        id: id.0,
                        len: constants.len(),
                    });
                }
            }
        }
        Ok(Self {
            instructions,
            constants,
        })
    }
}
