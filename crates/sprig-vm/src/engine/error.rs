//! Errors that can occur while running a construction program.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// SetAttribute dispatched with no element under construction.
    #[error("set_attribute with no element under construction")]
    AttributeWithoutElement,

    /// AppendHtml is part of the instruction set but permanently
    /// unimplemented.
    #[error("append_html is not implemented")]
    AppendHtmlUnimplemented,

    /// A namespace operand did not name a known namespace URI. Unreachable
    /// through the builders; a hand-decoded stream can carry one.
    #[error("unknown namespace uri: {uri}")]
    UnknownNamespace { uri: String },
}
