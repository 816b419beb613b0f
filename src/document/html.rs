//! [`DocumentTree`] adapter for HTML text, parsed with tree-sitter-html.
//!
//! Text and attribute values are exposed decoded, the way a browser DOM
//! exposes them. Serialization splices only the modified spans back into the
//! original source, so untouched markup comes out byte-for-byte.

use std::borrow::Cow;

use thiserror::Error;

use super::{
    DocumentTree,
    NodeKind,
};

#[derive(Error, Debug)]
pub enum HtmlError {
    #[error("Failed to load the HTML grammar: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),

    #[error("Failed to parse HTML")]
    ParseFailed,
}

/// Handle of a node in an [`HtmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HtmlNodeId(usize);

/// Where an attribute value sits in the source.
#[derive(Debug, Clone, Copy)]
enum ValueSpan {
    /// Between quotes; the range excludes the quotes.
    Quoted { start: usize, end: usize, quote: char },
    /// Bare value.
    Unquoted { start: usize, end: usize },
    /// Attribute written without `=value`; a value is inserted at `name_end`.
    Missing { name_end: usize },
}

#[derive(Debug, Clone)]
struct Attribute {
    /// Lowercased attribute name.
    name: String,
    /// Decoded value.
    value: String,
    span: ValueSpan,
    /// Set once the value has been replaced.
    dirty: bool,
}

#[derive(Debug, Clone)]
struct ElementData {
    /// Lowercased tag name.
    tag_name: String,
    attributes: Vec<Attribute>,
    /// Attributes set after parsing that did not exist in the source.
    added: Vec<(String, String)>,
    /// Byte offset in the start tag where added attributes go.
    insert_at: usize,
}

#[derive(Debug, Clone)]
struct TextData {
    /// Decoded content (raw for script and style bodies).
    content: String,
    start: usize,
    end: usize,
    /// Raw text is written back without entity encoding.
    raw: bool,
    dirty: bool,
}

#[derive(Debug, Clone)]
enum NodeData {
    Document,
    Element(ElementData),
    Text(TextData),
    Other,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<usize>,
    children: Vec<usize>,
    data: NodeData,
}

/// An HTML document that can be translated in place.
///
/// # Examples
/// ```
/// use word_overlay::document::{DocumentTree, HtmlDocument};
///
/// let mut page = HtmlDocument::parse(r#"<p title="Hello">Hello</p>"#).unwrap();
/// let paragraph = page.find_element("p").unwrap();
/// page.set_attribute(paragraph, "title", "Labas".to_string());
///
/// assert_eq!(page.to_html(), r#"<p title="Labas">Hello</p>"#);
/// ```
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    source: String,
    /// Node arena; index 0 is the document node.
    nodes: Vec<Node>,
    body: Option<usize>,
}

impl HtmlDocument {
    /// Parses `source`.
    ///
    /// Malformed markup is tolerated the way tree-sitter recovers from it;
    /// only a failure to run the parser at all is an error.
    pub fn parse(source: &str) -> Result<Self, HtmlError> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_html::LANGUAGE.into())?;
        let tree = parser.parse(source, None).ok_or(HtmlError::ParseFailed)?;

        let mut builder = TreeBuilder { source, nodes: Vec::new() };
        builder.build(tree.root_node());

        let mut document = Self { source: source.to_string(), nodes: builder.nodes, body: None };
        document.body = document.find_element("body").map(|HtmlNodeId(index)| index);
        tracing::debug!(nodes = document.nodes.len(), has_body = document.body.is_some(), "Parsed HTML");
        Ok(document)
    }

    /// The document node.
    #[must_use]
    pub const fn root(&self) -> HtmlNodeId {
        HtmlNodeId(0)
    }

    /// The markup this document was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// First element named `tag_name` (case-insensitive) in document order.
    #[must_use]
    pub fn find_element(&self, tag_name: &str) -> Option<HtmlNodeId> {
        let mut stack = vec![0];
        while let Some(index) = stack.pop() {
            let node = self.nodes.get(index)?;
            if let NodeData::Element(element) = &node.data
                && element.tag_name.eq_ignore_ascii_case(tag_name)
            {
                return Some(HtmlNodeId(index));
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Serializes the document, applying every modification.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut edits: Vec<(usize, usize, String)> = Vec::new();

        for node in &self.nodes {
            match &node.data {
                NodeData::Text(text) if text.dirty => {
                    let replacement =
                        if text.raw { text.content.clone() } else { encode_text(&text.content) };
                    edits.push((text.start, text.end, replacement));
                }
                NodeData::Element(element) => {
                    for attribute in element.attributes.iter().filter(|attribute| attribute.dirty) {
                        edits.push(attribute_edit(attribute));
                    }
                    for (name, value) in &element.added {
                        let inserted = format!(" {name}=\"{}\"", encode_attribute(value, '"'));
                        edits.push((element.insert_at, element.insert_at, inserted));
                    }
                }
                _ => {}
            }
        }

        // Stable: insertions at one offset keep their order.
        edits.sort_by_key(|(start, end, _)| (*start, *end));

        let mut html = String::with_capacity(self.source.len());
        let mut position = 0;
        for (start, end, replacement) in edits {
            html.push_str(self.source.get(position..start).unwrap_or_default());
            html.push_str(&replacement);
            position = end;
        }
        html.push_str(self.source.get(position..).unwrap_or_default());
        html
    }

    fn node(&self, id: HtmlNodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn element(&self, id: HtmlNodeId) -> Option<&ElementData> {
        match &self.node(id)?.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// Source edit replacing the value of a modified attribute.
fn attribute_edit(attribute: &Attribute) -> (usize, usize, String) {
    match attribute.span {
        ValueSpan::Quoted { start, end, quote } => {
            (start, end, encode_attribute(&attribute.value, quote))
        }
        ValueSpan::Unquoted { start, end } => {
            (start, end, format!("\"{}\"", encode_attribute(&attribute.value, '"')))
        }
        ValueSpan::Missing { name_end } => {
            (name_end, name_end, format!("=\"{}\"", encode_attribute(&attribute.value, '"')))
        }
    }
}

impl DocumentTree for HtmlDocument {
    type NodeId = HtmlNodeId;

    fn kind(&self, node: HtmlNodeId) -> NodeKind {
        match self.node(node).map(|node| &node.data) {
            Some(NodeData::Document) => NodeKind::Document,
            Some(NodeData::Element(_)) => NodeKind::Element,
            Some(NodeData::Text(_)) => NodeKind::Text,
            Some(NodeData::Other) | None => NodeKind::Other,
        }
    }

    fn tag_name(&self, node: HtmlNodeId) -> Option<&str> {
        self.element(node).map(|element| element.tag_name.as_str())
    }

    fn parent(&self, node: HtmlNodeId) -> Option<HtmlNodeId> {
        self.node(node)?.parent.map(HtmlNodeId)
    }

    fn children(&self, node: HtmlNodeId) -> Vec<HtmlNodeId> {
        self.node(node).map(|node| node.children.iter().copied().map(HtmlNodeId).collect()).unwrap_or_default()
    }

    fn text(&self, node: HtmlNodeId) -> Option<&str> {
        match &self.node(node)?.data {
            NodeData::Text(text) => Some(&text.content),
            _ => None,
        }
    }

    fn set_text(&mut self, node: HtmlNodeId, content: String) {
        if let Some(Node { data: NodeData::Text(text), .. }) = self.nodes.get_mut(node.0) {
            text.content = content;
            text.dirty = true;
        }
    }

    fn attribute(&self, node: HtmlNodeId, name: &str) -> Option<&str> {
        let element = self.element(node)?;
        element
            .attributes
            .iter()
            .find(|attribute| attribute.name.eq_ignore_ascii_case(name))
            .map(|attribute| attribute.value.as_str())
            .or_else(|| {
                element
                    .added
                    .iter()
                    .find(|(added, _)| added.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value.as_str())
            })
    }

    fn set_attribute(&mut self, node: HtmlNodeId, name: &str, value: String) {
        let Some(Node { data: NodeData::Element(element), .. }) = self.nodes.get_mut(node.0) else {
            return;
        };

        if let Some(attribute) =
            element.attributes.iter_mut().find(|attribute| attribute.name.eq_ignore_ascii_case(name))
        {
            attribute.value = value;
            attribute.dirty = true;
        } else if let Some((_, added)) =
            element.added.iter_mut().find(|(added, _)| added.eq_ignore_ascii_case(name))
        {
            *added = value;
        } else {
            element.added.push((name.to_ascii_lowercase(), value));
        }
    }

    fn body(&self) -> Option<HtmlNodeId> {
        Some(HtmlNodeId(self.body.unwrap_or(0)))
    }
}

/// Builds the node arena from a tree-sitter-html syntax tree.
///
/// Spans tree-sitter could not parse, and elements whose start tag contains
/// one, become [`NodeData::Other`] so their bytes are never read as text.
struct TreeBuilder<'s> {
    source: &'s str,
    nodes: Vec<Node>,
}

impl TreeBuilder<'_> {
    fn build(&mut self, root: tree_sitter::Node<'_>) {
        self.nodes.push(Node { parent: None, children: Vec::new(), data: NodeData::Document });
        if root.is_error() {
            // Nothing was recovered; the whole source stays opaque.
            self.push_node(0, NodeData::Other);
            return;
        }

        // (syntax node whose content is pending, arena index of its node)
        let mut pending = vec![(root, 0, 0, self.source.len())];
        while let Some((container, parent, content_start, content_end)) = pending.pop() {
            let mut position = content_start;
            let mut cursor = container.walk();
            for child in container.named_children(&mut cursor) {
                if !child.is_error()
                    && !matches!(
                        child.kind(),
                        "element"
                            | "script_element"
                            | "style_element"
                            | "comment"
                            | "doctype"
                            | "erroneous_end_tag"
                    )
                {
                    // Text and entities are covered by the gaps.
                    continue;
                }

                self.push_text(parent, position, child.start_byte(), false);
                position = child.end_byte();

                if child.kind() == "element" {
                    if let Some(pending_content) = self.push_element(child, parent) {
                        pending.push(pending_content);
                    }
                } else if matches!(child.kind(), "script_element" | "style_element") {
                    self.push_raw_text_element(child, parent);
                } else {
                    // Comments, doctypes and unparseable spans are kept byte for byte.
                    self.push_node(parent, NodeData::Other);
                }
            }
            self.push_text(parent, position, content_end, false);
        }
    }

    /// Adds an element; returns its content range when it has content to walk.
    fn push_element<'t>(
        &mut self,
        element: tree_sitter::Node<'t>,
        parent: usize,
    ) -> Option<(tree_sitter::Node<'t>, usize, usize, usize)> {
        let mut cursor = element.walk();
        let mut start_tag = None;
        let mut end_tag = None;
        for child in element.named_children(&mut cursor) {
            match child.kind() {
                "start_tag" | "self_closing_tag" if start_tag.is_none() => start_tag = Some(child),
                "end_tag" => end_tag = Some(child),
                _ => {}
            }
        }

        let start_tag = start_tag?;
        if start_tag.has_error() {
            self.push_node(parent, NodeData::Other);
            return None;
        }
        let index = self.push_node(parent, NodeData::Element(self.element_data(start_tag)));
        if start_tag.kind() == "self_closing_tag" {
            return None;
        }

        let content_end = end_tag.map_or_else(|| element.end_byte(), |tag| tag.start_byte());
        Some((element, index, start_tag.end_byte(), content_end))
    }

    /// Adds a script or style element with its body as a single raw text child.
    fn push_raw_text_element(&mut self, element: tree_sitter::Node<'_>, parent: usize) {
        let mut cursor = element.walk();
        let mut start_tag = None;
        let mut raw_text = None;
        for child in element.named_children(&mut cursor) {
            match child.kind() {
                "start_tag" => start_tag = Some(child),
                "raw_text" => raw_text = Some(child),
                _ => {}
            }
        }

        let Some(start_tag) = start_tag.filter(|tag| !tag.has_error()) else {
            self.push_node(parent, NodeData::Other);
            return;
        };
        let index = self.push_node(parent, NodeData::Element(self.element_data(start_tag)));
        if let Some(raw_text) = raw_text {
            self.push_text(index, raw_text.start_byte(), raw_text.end_byte(), true);
        }
    }

    fn push_text(&mut self, parent: usize, start: usize, end: usize, raw: bool) {
        let Some(source) = self.source.get(start..end).filter(|source| !source.is_empty()) else {
            return;
        };
        let content = if raw { source.to_string() } else { decode_entities(source).into_owned() };
        self.push_node(parent, NodeData::Text(TextData { content, start, end, raw, dirty: false }));
    }

    fn push_node(&mut self, parent: usize, data: NodeData) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node { parent: Some(parent), children: Vec::new(), data });
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.push(index);
        }
        index
    }

    fn text_of(&self, node: tree_sitter::Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    /// Reads the tag name and attributes of a start tag.
    fn element_data(&self, tag: tree_sitter::Node<'_>) -> ElementData {
        let mut data = ElementData {
            tag_name: String::new(),
            attributes: Vec::new(),
            added: Vec::new(),
            insert_at: tag.start_byte().saturating_add(1),
        };

        let mut cursor = tag.walk();
        for part in tag.named_children(&mut cursor) {
            match part.kind() {
                "tag_name" => {
                    data.tag_name = self.text_of(part).to_ascii_lowercase();
                    data.insert_at = part.end_byte();
                }
                "attribute" => {
                    if let Some(attribute) = self.attribute(part) {
                        data.attributes.push(attribute);
                        data.insert_at = part.end_byte();
                    }
                }
                _ => {}
            }
        }
        data
    }

    fn attribute(&self, node: tree_sitter::Node<'_>) -> Option<Attribute> {
        let mut name = None;
        let mut span = ValueSpan::Missing { name_end: node.end_byte() };

        let mut cursor = node.walk();
        for part in node.named_children(&mut cursor) {
            match part.kind() {
                "attribute_name" => {
                    name = Some(self.text_of(part).to_ascii_lowercase());
                    span = ValueSpan::Missing { name_end: part.end_byte() };
                }
                "attribute_value" => {
                    span = ValueSpan::Unquoted { start: part.start_byte(), end: part.end_byte() };
                }
                "quoted_attribute_value" => {
                    let quote = if self.text_of(part).starts_with('\'') { '\'' } else { '"' };
                    let start = part.start_byte().saturating_add(1);
                    let end = part.end_byte().saturating_sub(1).max(start);
                    span = ValueSpan::Quoted { start, end, quote };
                }
                _ => {}
            }
        }

        let value = match span {
            ValueSpan::Quoted { start, end, .. } | ValueSpan::Unquoted { start, end } => {
                decode_entities(self.source.get(start..end).unwrap_or_default()).into_owned()
            }
            ValueSpan::Missing { .. } => String::new(),
        };
        Some(Attribute { name: name?, value, span, dirty: false })
    }
}

/// Named character references understood when decoding.
const NAMED_ENTITIES: [(&str, char); 16] = [
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("copy", '©'),
    ("reg", '®'),
    ("hellip", '…'),
    ("ndash", '–'),
    ("mdash", '—'),
    ("lsquo", '‘'),
    ("rsquo", '’'),
    ("ldquo", '“'),
    ("rdquo", '”'),
    ("laquo", '«'),
];

/// Replaces character references with the characters they stand for.
///
/// Unknown or malformed references are kept literally.
fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        let (before, reference) = rest.split_at(amp);
        decoded.push_str(before);
        let (character, consumed) = parse_reference(reference).unwrap_or(('&', 1));
        decoded.push(character);
        rest = reference.get(consumed..).unwrap_or_default();
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}

/// Parses a reference at the start of `text` (which begins with `&`).
///
/// Returns the character and the number of bytes consumed.
fn parse_reference(text: &str) -> Option<(char, usize)> {
    let semicolon = text.find(';').filter(|&position| position <= 32)?;
    let name = text.get(1..semicolon)?;

    let character = if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        char::from_u32(code)?
    } else {
        NAMED_ENTITIES.iter().find(|(entity, _)| *entity == name).map(|(_, character)| *character)?
    };
    Some((character, semicolon.saturating_add(1)))
}

/// Escapes text content for HTML.
fn encode_text(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => encoded.push_str("&amp;"),
            '<' => encoded.push_str("&lt;"),
            '>' => encoded.push_str("&gt;"),
            '\u{a0}' => encoded.push_str("&nbsp;"),
            _ => encoded.push(c),
        }
    }
    encoded
}

/// Escapes an attribute value for use inside `quote`.
fn encode_attribute(value: &str, quote: char) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => encoded.push_str("&amp;"),
            '"' if quote == '"' => encoded.push_str("&quot;"),
            '\'' if quote == '\'' => encoded.push_str("&#39;"),
            '\u{a0}' => encoded.push_str("&nbsp;"),
            _ => encoded.push(c),
        }
    }
    encoded
}
