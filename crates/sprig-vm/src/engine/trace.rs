//! Execution tracing hooks for the VM.

use sprig_bytecode::Instruction;

use crate::dom::{Document, NodeId};

/// Observes VM execution. All hooks default to no-ops.
pub trait Tracer {
    /// Called before an instruction is dispatched.
    fn on_instruction(&mut self, ip: usize, instruction: &Instruction) {
        let _ = (ip, instruction);
    }

    /// Called right after a deferred element is connected to its parent.
    fn on_flush(&mut self, document: &Document, element: NodeId) {
        let _ = (document, element);
    }
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn on_instruction(&mut self, ip: usize, instruction: &Instruction) {
        (**self).on_instruction(ip, instruction);
    }

    fn on_flush(&mut self, document: &Document, element: NodeId) {
        (**self).on_flush(document, element);
    }
}

/// Tracer that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// Tracer printing each dispatched instruction to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintTracer;

impl Tracer for PrintTracer {
    fn on_instruction(&mut self, ip: usize, instruction: &Instruction) {
        eprintln!("{ip:04} {}", instruction.opcode().name());
    }

    fn on_flush(&mut self, document: &Document, element: NodeId) {
        eprintln!(
            "     flush <{}>",
            document.tag_name(element).unwrap_or("?")
        );
    }
}
