//! Token table correlating small integers with constructed nodes.

use crate::dom::NodeId;

/// Handle correlated 1:1 with a constructed node, for later lookup without
/// re-traversing the produced subtree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct Token(pub u32);

/// Append-only registry mapping tokens to nodes.
///
/// Entries are arena handles, not owning references; the document owns the
/// nodes. Token 0 is the root parent the VM was given, and tokens grow by
/// one per created node, in creation order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeTokens {
    nodes: Vec<NodeId>,
}

impl NodeTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node, returning the next token.
    pub fn register(&mut self, node: NodeId) -> Token {
        let token = Token(self.nodes.len() as u32);
        self.nodes.push(node);
        token
    }

    /// Look up the node for a previously issued token.
    ///
    /// # Panics
    /// Panics on a token this table never issued; that is a defect in the
    /// caller, not a recoverable condition.
    pub fn reify(&self, token: Token) -> NodeId {
        self.nodes[token.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over (token, node) pairs in issue order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, NodeId)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, &node)| (Token(i as u32), node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn tokens_increase_from_zero() {
        let mut doc = Document::new();
        let mut tokens = NodeTokens::new();

        let a = doc.create_text("a");
        let b = doc.create_text("b");
        assert_eq!(tokens.register(a), Token(0));
        assert_eq!(tokens.register(b), Token(1));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn reify_returns_registered_node() {
        let mut doc = Document::new();
        let mut tokens = NodeTokens::new();

        let node = doc.create_comment("c");
        let token = tokens.register(node);
        assert_eq!(tokens.reify(token), node);
    }

    #[test]
    #[should_panic]
    fn reify_unissued_token_panics() {
        let tokens = NodeTokens::new();
        tokens.reify(Token(0));
    }
}
