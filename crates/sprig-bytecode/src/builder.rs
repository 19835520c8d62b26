//! Assembler turning high-level construction calls into a frozen program.

use crate::constants::ConstantPool;
use crate::ids::BuildToken;
use crate::instruction::Instruction;
use crate::namespace::Namespace;
use crate::program::Program;

/// Accumulates instructions and constant-pool references.
///
/// The caller is expected to emit a well-formed sequence: every
/// `open_element` matched by one `close_element` at the same depth, and
/// attributes set only before the first child append. The builder does not
/// verify this; the VM rejects misplaced attributes at run time.
///
/// Node-creating operations return a [`BuildToken`] equal to the runtime
/// token the VM will assign when the program runs (token 0 is the root
/// parent supplied to the VM).
#[derive(Debug)]
pub struct OperationsBuilder {
    instructions: Vec<Instruction>,
    constants: ConstantPool,
    next_token: u32,
}

impl Default for OperationsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationsBuilder {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
            constants: ConstantPool::new(),
            // Token 0 is the runtime root parent.
            next_token: 1,
        }
    }

    fn alloc_token(&mut self) -> BuildToken {
        let token = BuildToken(self.next_token);
        self.next_token += 1;
        token
    }

    /// Open an HTML element.
    pub fn open_element(&mut self, tag: &str) -> BuildToken {
        self.open_element_ns(tag, Namespace::Html)
    }

    /// Open an element in an explicit namespace.
    pub fn open_element_ns(&mut self, tag: &str, namespace: Namespace) -> BuildToken {
        let tag = self.constants.get(tag);
        let namespace = self.constants.get(namespace.uri());
        self.instructions.push(Instruction::OpenElement { tag, namespace });
        self.alloc_token()
    }

    /// Close the innermost open element.
    pub fn close_element(&mut self) {
        self.instructions.push(Instruction::CloseElement);
    }

    /// Set an attribute on the innermost open element.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.set_attribute_ns(name, value, Namespace::Html);
    }

    /// Set a namespaced attribute on the innermost open element.
    pub fn set_attribute_ns(&mut self, name: &str, value: &str, namespace: Namespace) {
        let name = self.constants.get(name);
        let value = self.constants.get(value);
        let namespace = self.constants.get(namespace.uri());
        self.instructions.push(Instruction::SetAttribute {
            name,
            value,
            namespace,
        });
    }

    /// Append a text node.
    pub fn append_text(&mut self, text: &str) -> BuildToken {
        let text = self.constants.get(text);
        self.instructions.push(Instruction::AppendText { text });
        self.alloc_token()
    }

    /// Append a comment node.
    pub fn append_comment(&mut self, text: &str) -> BuildToken {
        let text = self.constants.get(text);
        self.instructions.push(Instruction::AppendComment { text });
        self.alloc_token()
    }

    /// Append raw HTML. Reserved: assembles, but the VM refuses to execute
    /// it. Returns no token since it can never materialize a node.
    pub fn append_html(&mut self, html: &str) {
        let html = self.constants.get(html);
        self.instructions.push(Instruction::AppendHtml { html });
    }

    /// Number of instructions assembled so far.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Freeze the assembled instructions and constants into a [`Program`].
    pub fn finish(self) -> Program {
        Program::new(self.instructions, self.constants)
    }
}
