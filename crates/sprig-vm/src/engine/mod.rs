//! Runtime engine: the interpreter, its token table, tracing hooks, and the
//! namespace-aware tree builder layered over the assembler.

mod error;
mod node_tokens;
mod trace;
mod tree_builder;
mod vm;

#[cfg(test)]
mod tree_builder_tests;

pub use error::RuntimeError;
pub use node_tokens::{NodeTokens, Token};
pub use trace::{NoopTracer, PrintTracer, Tracer};
pub use tree_builder::{BuildError, TreeBuilder};
pub use vm::{Vm, run};
