//! Index newtypes for program data.

use serde::{Deserialize, Serialize};

/// Index into the constant pool.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct StringId(pub u32);

impl StringId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Assembly-time handle for a node-creating operation.
///
/// Numbering starts at 1: index 0 is reserved for the root parent the VM
/// registers before executing any instruction, so a `BuildToken` carries the
/// same value as the runtime token the VM later assigns to the node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BuildToken(pub u32);

impl BuildToken {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_id_index() {
        assert_eq!(StringId(0).index(), 0);
        assert_eq!(StringId(17).index(), 17);
    }
}
