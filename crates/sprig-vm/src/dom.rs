//! Arena document model the VM materializes into.
//!
//! The arena owns every node; [`NodeId`] handles are plain indices into it,
//! so token tables and external callers never hold owning references.

use sprig_bytecode::Namespace;

/// Handle to a node in a [`Document`] arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A namespaced attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub namespace: Namespace,
}

#[derive(Debug)]
enum NodeData {
    Fragment {
        children: Vec<NodeId>,
    },
    Element {
        tag: String,
        namespace: Namespace,
        attributes: Vec<Attribute>,
        children: Vec<NodeId>,
    },
    Text(String),
    Comment(String),
}

/// Append-only node arena with fragment, element, text, and comment nodes.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(data);
        id
    }

    /// Create a detached fragment, the usual construction target.
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeData::Fragment {
            children: Vec::new(),
        })
    }

    /// Create a detached, namespace-qualified element.
    pub fn create_element(&mut self, tag: &str, namespace: Namespace) -> NodeId {
        self.alloc(NodeData::Element {
            tag: tag.to_owned(),
            namespace,
            attributes: Vec::new(),
            children: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Text(text.to_owned()))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Comment(text.to_owned()))
    }

    /// Set an attribute, replacing an existing one with the same name and
    /// namespace.
    ///
    /// # Panics
    /// Panics if `element` is not an element node.
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str, namespace: Namespace) {
        let NodeData::Element { attributes, .. } = &mut self.nodes[element.index()] else {
            panic!("set_attribute on a non-element node");
        };
        if let Some(existing) = attributes
            .iter_mut()
            .find(|a| a.name == name && a.namespace == namespace)
        {
            existing.value = value.to_owned();
            return;
        }
        attributes.push(Attribute {
            name: name.to_owned(),
            value: value.to_owned(),
            namespace,
        });
    }

    /// Insert `node` as a child of `parent`, before `reference` (or at the
    /// end when `reference` is `None`).
    ///
    /// # Panics
    /// Panics if `parent` is a leaf node or `reference` is not its child.
    pub fn insert_before(&mut self, parent: NodeId, node: NodeId, reference: Option<NodeId>) {
        let children = match &mut self.nodes[parent.index()] {
            NodeData::Fragment { children } | NodeData::Element { children, .. } => children,
            _ => panic!("insert_before on a leaf node"),
        };
        match reference {
            Some(reference) => {
                let position = children
                    .iter()
                    .position(|&c| c == reference)
                    .expect("reference is not a child of parent");
                children.insert(position, node);
            }
            None => children.push(node),
        }
    }

    /// Child list of a fragment or element; empty for leaf nodes.
    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        match &self.nodes[parent.index()] {
            NodeData::Fragment { children } | NodeData::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Tag name of an element node.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()] {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Namespace of an element node.
    pub fn namespace(&self, id: NodeId) -> Option<Namespace> {
        match &self.nodes[id.index()] {
            NodeData::Element { namespace, .. } => Some(*namespace),
            _ => None,
        }
    }

    /// Attribute value by name (any namespace) on an element node.
    pub fn attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.attributes(element)
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Attributes of an element node, in set order; empty for other nodes.
    pub fn attributes(&self, element: NodeId) -> &[Attribute] {
        match &self.nodes[element.index()] {
            NodeData::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Body of a text or comment node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.index()] {
            NodeData::Text(text) | NodeData::Comment(text) => Some(text),
            _ => None,
        }
    }

    /// Serialize a subtree to markup. Fragments serialize as the
    /// concatenation of their children.
    pub fn serialize(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.serialize_into(id, &mut out);
        out
    }

    fn serialize_into(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.index()] {
            NodeData::Fragment { children } => {
                for &child in children {
                    self.serialize_into(child, out);
                }
            }
            NodeData::Element {
                tag,
                attributes,
                children,
                ..
            } => {
                out.push('<');
                out.push_str(tag);
                for attribute in attributes {
                    out.push(' ');
                    out.push_str(&attribute.name);
                    out.push_str("=\"");
                    escape_attribute(&attribute.value, out);
                    out.push('"');
                }
                out.push('>');
                for &child in children {
                    self.serialize_into(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            NodeData::Text(text) => escape_text(text, out),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
}
