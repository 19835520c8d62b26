//! Element and attribute namespaces.
//!
//! Instructions carry namespaces as interned URI strings; `Namespace` is the
//! closed runtime form the VM and tree builder work with.

use serde::{Deserialize, Serialize};

/// The XHTML namespace URI.
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// The SVG namespace URI.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Namespace an element or attribute is created in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
}

impl Namespace {
    /// The W3C namespace URI, as stored in the constant pool.
    pub fn uri(self) -> &'static str {
        match self {
            Self::Html => HTML_NAMESPACE,
            Self::Svg => SVG_NAMESPACE,
        }
    }

    /// Map a URI back to the namespace, or `None` for anything else.
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            HTML_NAMESPACE => Some(Self::Html),
            SVG_NAMESPACE => Some(Self::Svg),
            _ => None,
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Html => f.write_str("html"),
            Self::Svg => f.write_str("svg"),
        }
    }
}
