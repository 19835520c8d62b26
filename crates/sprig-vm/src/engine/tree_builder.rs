//! Namespace-aware front end over the operations builder.
//!
//! Implements the foreign-content subset of the HTML5 tree-construction
//! algorithm: SVG namespace propagation, integration points, and the list of
//! HTML-only tags that may not appear directly inside SVG content. This is
//! the only component that reasons about HTML vs. SVG; everything below it
//! takes the namespace as given.

use sprig_bytecode::{BuildToken, Namespace, OperationsBuilder, Program};

use crate::dom::{Document, NodeId};

use super::error::RuntimeError;
use super::node_tokens::NodeTokens;
use super::vm::run;

/// HTML-only tags that may not be opened directly inside SVG content.
/// Sorted for binary search.
const DISALLOWED_IN_SVG: &[&str] = &[
    "b", "big", "blockquote", "body", "br", "center", "code", "dd", "div", "dl", "dt", "em",
    "embed", "h1", "h2", "h3", "h4", "h5", "h6", "head", "hr", "i", "img", "li", "listing",
    "main", "meta", "nobr", "ol", "p", "pre", "ruby", "s", "small", "span", "strike", "strong",
    "sub", "sup", "table", "tt", "u", "ul", "var",
];

/// SVG elements whose children are ordinary HTML content again.
fn is_integration_point(tag: &str) -> bool {
    matches!(tag, "foreignObject" | "desc" | "title")
}

/// One currently open element, tracked at assembly time.
#[derive(Debug, Clone)]
struct Context {
    tag: String,
    namespace: Namespace,
    integration_point: bool,
}

/// Errors detected while assembling a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// An HTML-only tag was opened directly inside SVG content, outside an
    /// integration point.
    #[error("cannot open <{tag}> inside an SVG context")]
    TagNotAllowedInSvg { tag: String },
}

/// Assembler front end resolving each opened tag to its namespace.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    ops: OperationsBuilder,
    stack: Vec<Context>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            ops: OperationsBuilder::new(),
            stack: Vec::new(),
        }
    }

    /// Open an element, resolving its namespace from the enclosing context.
    ///
    /// The element is SVG-namespaced when the enclosing context is SVG and
    /// not an integration point, or when there is no context and the tag is
    /// `svg` itself. HTML-only tags are rejected inside SVG content.
    pub fn open_element(&mut self, tag: &str) -> Result<BuildToken, BuildError> {
        let in_svg = match self.stack.last() {
            Some(context) => context.namespace == Namespace::Svg && !context.integration_point,
            None => tag == "svg",
        };

        if in_svg && DISALLOWED_IN_SVG.binary_search(&tag).is_ok() {
            return Err(BuildError::TagNotAllowedInSvg {
                tag: tag.to_owned(),
            });
        }

        let namespace = if in_svg { Namespace::Svg } else { Namespace::Html };
        self.stack.push(Context {
            tag: tag.to_owned(),
            namespace,
            integration_point: namespace == Namespace::Svg && is_integration_point(tag),
        });
        Ok(self.ops.open_element_ns(tag, namespace))
    }

    /// Close the innermost open element.
    pub fn close_element(&mut self) {
        self.ops.close_element();
        self.stack.pop();
    }

    /// Set an attribute on the innermost open element.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.ops.set_attribute(name, value);
    }

    /// Set a namespaced attribute on the innermost open element.
    pub fn set_attribute_ns(&mut self, name: &str, value: &str, namespace: Namespace) {
        self.ops.set_attribute_ns(name, value, namespace);
    }

    /// Append a text node to the current parent.
    pub fn append_text(&mut self, text: &str) -> BuildToken {
        self.ops.append_text(text)
    }

    /// Append a comment node to the current parent.
    pub fn append_comment(&mut self, text: &str) -> BuildToken {
        self.ops.append_comment(text)
    }

    /// Append raw HTML. Reserved; the VM refuses to execute it.
    pub fn append_html(&mut self, html: &str) {
        self.ops.append_html(html);
    }

    /// Tag of the innermost open element.
    pub fn current_tag(&self) -> Option<&str> {
        self.stack.last().map(|context| context.tag.as_str())
    }

    /// Namespace of the innermost open element.
    pub fn current_namespace(&self) -> Option<Namespace> {
        self.stack.last().map(|context| context.namespace)
    }

    /// Freeze the assembled program without running it.
    pub fn finish(self) -> Program {
        self.ops.finish()
    }

    /// Freeze the assembled program and run it, appending at the end of
    /// `parent`. Returns the token table for later node lookup.
    pub fn append_to(
        self,
        document: &mut Document,
        parent: NodeId,
    ) -> Result<NodeTokens, RuntimeError> {
        let program = self.finish();
        run(&program, document, parent, None)
    }
}

#[cfg(test)]
mod tests {
    use super::DISALLOWED_IN_SVG;

    // binary_search requires strict ascending order
    #[test]
    fn blacklist_is_sorted() {
        assert!(DISALLOWED_IN_SVG.windows(2).all(|w| w[0] < w[1]));
    }
}
