//! Runtime VM materializing Sprig construction programs into a document tree.
//!
//! This crate provides the arena document model, the interpreter that replays
//! a frozen [`sprig_bytecode::Program`] against it, the node-token table the
//! interpreter returns, and the namespace-aware `TreeBuilder` front end.

pub mod dom;
pub mod engine;

// Re-export commonly used items at crate root
pub use dom::{Attribute, Document, NodeId};
pub use engine::{
    BuildError, NodeTokens, NoopTracer, PrintTracer, RuntimeError, Token, Tracer, TreeBuilder, Vm,
    run,
};
