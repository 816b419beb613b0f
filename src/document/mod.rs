//! Document trees and the text-walker that translates them.
//!
//! The walker only talks to [`DocumentTree`], so any host that can expose
//! elements, text nodes and attributes can be translated. [`HtmlDocument`] is
//! the adapter for plain HTML text.

/// HTML adapter
mod html;
/// Tree walker
mod walker;

pub use html::{
    HtmlDocument,
    HtmlError,
    HtmlNodeId,
};
pub use walker::{
    PageWalker,
    WalkOptions,
    WalkSummary,
};

/// Attributes whose values are user-visible text.
pub const TRANSLATED_ATTRIBUTES: [&str; 5] = ["placeholder", "title", "alt", "aria-label", "value"];

/// Elements whose text content is code or fallback markup, never prose.
pub const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// What a node is, as far as translation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    /// Comments, doctypes and anything else that is left alone.
    Other,
}

/// A mutable document tree the walker can traverse.
///
/// Node handles are cheap copies; they stay valid while the tree is alive.
pub trait DocumentTree {
    type NodeId: Copy;

    fn kind(&self, node: Self::NodeId) -> NodeKind;

    /// Tag name of an element, `None` for other nodes.
    fn tag_name(&self, node: Self::NodeId) -> Option<&str>;

    fn parent(&self, node: Self::NodeId) -> Option<Self::NodeId>;

    /// Children in document order.
    fn children(&self, node: Self::NodeId) -> Vec<Self::NodeId>;

    /// Text content of a text node, `None` for other nodes.
    fn text(&self, node: Self::NodeId) -> Option<&str>;

    fn set_text(&mut self, node: Self::NodeId, text: String);

    fn attribute(&self, node: Self::NodeId, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, node: Self::NodeId, name: &str, value: String);

    /// Where a page walk starts: the `<body>` element, or the whole document
    /// when there is none.
    fn body(&self) -> Option<Self::NodeId>;
}
