//! The construction interpreter.
//!
//! Replays a frozen program against a live document in one uninterrupted,
//! synchronous pass. Construction order is instruction order: a flattened
//! pre-order traversal. An element stays pending (detached) until its first
//! child is appended or it is closed, so attributes are always fully applied
//! before the element becomes observable in the tree.

use sprig_bytecode::{Instruction, Namespace, Program, StringId};

use crate::dom::{Document, NodeId};

use super::error::RuntimeError;
use super::node_tokens::NodeTokens;
use super::trace::{NoopTracer, Tracer};

/// One open ancestor: the parent to append into, and the anchor to insert
/// before. Only the root frame carries an anchor; children of a freshly
/// flushed element always append at its end.
#[derive(Clone, Copy, Debug)]
struct Frame {
    parent: NodeId,
    next_sibling: Option<NodeId>,
}

/// Interpreter state for a single run.
///
/// Each run allocates its own state, so one frozen program can be replayed
/// concurrently against independent documents.
pub struct Vm<'p, 'd, T: Tracer = NoopTracer> {
    program: &'p Program,
    document: &'d mut Document,
    frames: Vec<Frame>,
    /// Element created but not yet connected to its parent.
    pending: Option<NodeId>,
    tokens: NodeTokens,
    tracer: T,
}

impl<'p, 'd> Vm<'p, 'd> {
    pub fn new(program: &'p Program, document: &'d mut Document) -> Self {
        Self::with_tracer(program, document, NoopTracer)
    }
}

impl<'p, 'd, T: Tracer> Vm<'p, 'd, T> {
    pub fn with_tracer(program: &'p Program, document: &'d mut Document, tracer: T) -> Self {
        Self {
            program,
            document,
            frames: Vec::new(),
            pending: None,
            tokens: NodeTokens::new(),
            tracer,
        }
    }

    /// Execute the program, inserting under `parent` before `next_sibling`
    /// (at the end of `parent` when `None`).
    ///
    /// Returns the token table: token 0 is `parent`, followed by one token
    /// per created node in creation order.
    pub fn run(
        mut self,
        parent: NodeId,
        next_sibling: Option<NodeId>,
    ) -> Result<NodeTokens, RuntimeError> {
        self.frames.push(Frame {
            parent,
            next_sibling,
        });
        self.tokens.register(parent);

        let program = self.program;
        for (ip, instruction) in program.instructions().iter().enumerate() {
            self.tracer.on_instruction(ip, instruction);
            self.step(instruction)?;
        }

        Ok(self.tokens)
    }

    fn step(&mut self, instruction: &Instruction) -> Result<(), RuntimeError> {
        match *instruction {
            Instruction::OpenElement { tag, namespace } => {
                self.flush();
                let namespace = self.resolve_namespace(namespace)?;
                let element = self
                    .document
                    .create_element(self.program.resolve(tag), namespace);
                self.tokens.register(element);
                self.pending = Some(element);
            }

            Instruction::CloseElement => {
                self.flush();
                // Balanced open/close is the producer's contract; going
                // below the root frame is a defect, not a runtime error.
                assert!(self.frames.len() > 1, "close_element below the root frame");
                self.frames.pop();
            }

            Instruction::SetAttribute {
                name,
                value,
                namespace,
            } => {
                let element = self.pending.ok_or(RuntimeError::AttributeWithoutElement)?;
                let namespace = self.resolve_namespace(namespace)?;
                self.document.set_attribute(
                    element,
                    self.program.resolve(name),
                    self.program.resolve(value),
                    namespace,
                );
            }

            Instruction::AppendText { text } => {
                self.flush();
                let node = self.document.create_text(self.program.resolve(text));
                self.insert(node);
                self.tokens.register(node);
            }

            Instruction::AppendComment { text } => {
                self.flush();
                let node = self.document.create_comment(self.program.resolve(text));
                self.insert(node);
                self.tokens.register(node);
            }

            Instruction::AppendHtml { .. } => {
                return Err(RuntimeError::AppendHtmlUnimplemented);
            }
        }
        Ok(())
    }

    /// Connect the pending element and make it the current parent.
    fn flush(&mut self) {
        if let Some(element) = self.pending.take() {
            self.insert(element);
            self.frames.push(Frame {
                parent: element,
                next_sibling: None,
            });
            self.tracer.on_flush(self.document, element);
        }
    }

    /// Insert a node at the current frame's insertion point.
    fn insert(&mut self, node: NodeId) {
        let frame = *self.frames.last().expect("frame stack is empty");
        self.document
            .insert_before(frame.parent, node, frame.next_sibling);
    }

    fn resolve_namespace(&self, id: StringId) -> Result<Namespace, RuntimeError> {
        let uri = self.program.resolve(id);
        Namespace::from_uri(uri).ok_or_else(|| RuntimeError::UnknownNamespace {
            uri: uri.to_owned(),
        })
    }
}

/// Execute `program` against `document`, inserting under `parent` before
/// `next_sibling`.
pub fn run(
    program: &Program,
    document: &mut Document,
    parent: NodeId,
    next_sibling: Option<NodeId>,
) -> Result<NodeTokens, RuntimeError> {
    Vm::new(program, document).run(parent, next_sibling)
}
