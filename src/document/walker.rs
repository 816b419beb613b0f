//! Applies the translator to every visible piece of text in a document.

use std::borrow::Cow;

use super::{
    DocumentTree,
    NodeKind,
    SKIPPED_TAGS,
    TRANSLATED_ATTRIBUTES,
};
use crate::config::PageConfig;
use crate::translate::Translator;

/// What the walker touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// Attributes translated on every element.
    pub attributes: Vec<String>,
    /// Elements whose direct text is left alone (compared case-insensitively).
    pub skip_tags: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            attributes: TRANSLATED_ATTRIBUTES.iter().map(ToString::to_string).collect(),
            skip_tags: SKIPPED_TAGS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl From<&PageConfig> for WalkOptions {
    fn from(config: &PageConfig) -> Self {
        Self { attributes: config.attributes.clone(), skip_tags: config.skip_tags.clone() }
    }
}

/// Counts of what a walk changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub text_nodes_translated: usize,
    pub attributes_translated: usize,
    /// Text nodes left alone because they sit in a skipped element.
    pub skipped_text_nodes: usize,
}

impl WalkSummary {
    /// Total number of rewritten values.
    #[must_use]
    pub const fn changes(&self) -> usize {
        self.text_nodes_translated.saturating_add(self.attributes_translated)
    }
}

/// Walks a [`DocumentTree`] translating text nodes and attributes into one language.
#[derive(Debug, Clone, Copy)]
pub struct PageWalker<'a> {
    translator: &'a Translator,
    language: &'a str,
    options: &'a WalkOptions,
}

impl<'a> PageWalker<'a> {
    #[must_use]
    pub const fn new(translator: &'a Translator, language: &'a str, options: &'a WalkOptions) -> Self {
        Self { translator, language, options }
    }

    /// Translates the tree from its default root.
    pub fn translate_page<T: DocumentTree>(&self, tree: &mut T) -> WalkSummary {
        let root = tree.body();
        self.translate_subtree(tree, root)
    }

    /// Translates `root`'s attributes and everything below it.
    ///
    /// `None` is a no-op. Values are only written back when translation
    /// changed them, so a walk in the source language leaves the tree
    /// untouched.
    pub fn translate_subtree<T: DocumentTree>(
        &self,
        tree: &mut T,
        root: Option<T::NodeId>,
    ) -> WalkSummary {
        let mut summary = WalkSummary::default();
        let Some(root) = root else {
            return summary;
        };

        if tree.kind(root) == NodeKind::Element {
            self.translate_attributes(tree, root, &mut summary);
        }

        let mut stack = tree.children(root);
        stack.reverse();
        while let Some(node) = stack.pop() {
            match tree.kind(node) {
                NodeKind::Text => self.translate_text(tree, node, &mut summary),
                NodeKind::Element => {
                    self.translate_attributes(tree, node, &mut summary);
                    stack.extend(tree.children(node).into_iter().rev());
                }
                NodeKind::Document => stack.extend(tree.children(node).into_iter().rev()),
                NodeKind::Other => {}
            }
        }

        tracing::debug!(
            language = self.language,
            text_nodes = summary.text_nodes_translated,
            attributes = summary.attributes_translated,
            skipped = summary.skipped_text_nodes,
            "Translated document"
        );
        summary
    }

    fn translate_text<T: DocumentTree>(&self, tree: &mut T, node: T::NodeId, summary: &mut WalkSummary) {
        if self.in_skipped_element(tree, node) {
            summary.skipped_text_nodes = summary.skipped_text_nodes.saturating_add(1);
            return;
        }

        let Some(text) = tree.text(node).filter(|text| !text.trim().is_empty()) else {
            return;
        };
        if let Some(translated) = self.changed(text) {
            tree.set_text(node, translated);
            summary.text_nodes_translated = summary.text_nodes_translated.saturating_add(1);
        }
    }

    fn translate_attributes<T: DocumentTree>(
        &self,
        tree: &mut T,
        node: T::NodeId,
        summary: &mut WalkSummary,
    ) {
        for name in &self.options.attributes {
            let Some(value) = tree.attribute(node, name).filter(|value| !value.is_empty()) else {
                continue;
            };
            if let Some(translated) = self.changed(value) {
                tree.set_attribute(node, name, translated);
                summary.attributes_translated = summary.attributes_translated.saturating_add(1);
            }
        }
    }

    /// The translation of `original`, if it differs.
    fn changed(&self, original: &str) -> Option<String> {
        match self.translator.translate(original, self.language) {
            Cow::Owned(translated) if translated != original => Some(translated),
            _ => None,
        }
    }

    /// Whether the nearest element above `node` is one of the skipped tags.
    fn in_skipped_element<T: DocumentTree>(&self, tree: &T, node: T::NodeId) -> bool {
        let mut current = tree.parent(node);
        while let Some(ancestor) = current {
            if let Some(tag_name) = tree.tag_name(ancestor) {
                return self.options.skip_tags.iter().any(|skip| skip.eq_ignore_ascii_case(tag_name));
            }
            current = tree.parent(ancestor);
        }
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::document::HtmlDocument;
    use crate::test_utils::dictionary;

    #[fixture]
    fn translator() -> Translator {
        Translator::new(dictionary(&[(
            "lt",
            &[
                ("hello", "labas"),
                ("world", "pasaulis"),
                ("search", "paieška"),
                ("name", "vardas"),
                ("your", "jūsų"),
                ("logo", "logotipas"),
                ("send", "siųsti"),
                ("close", "uždaryti"),
                ("x", "y"),
            ],
        )]))
    }

    fn walk(translator: &Translator, html: &str, language: &str) -> (String, WalkSummary) {
        let mut document = HtmlDocument::parse(html).unwrap();
        let options = WalkOptions::default();
        let summary = PageWalker::new(translator, language, &options).translate_page(&mut document);
        (document.to_html(), summary)
    }

    #[rstest]
    fn translates_text_nodes(translator: Translator) {
        let (html, summary) =
            walk(&translator, "<body><h1>Hello world</h1><p>Hello <b>world</b>!</p></body>", "lt");

        assert_that!(html, eq("<body><h1>Labas pasaulis</h1><p>Labas <b>pasaulis</b>!</p></body>"));
        assert_that!(summary.text_nodes_translated, eq(3));
    }

    #[rstest]
    #[case::script("<body><script>var x = 1; // hello</script></body>")]
    #[case::style("<body><style>.hello { color: red }</style></body>")]
    #[case::noscript("<body><noscript>Hello</noscript></body>")]
    #[case::uppercase_tag("<body><SCRIPT>hello()</SCRIPT></body>")]
    fn skips_code_elements(translator: Translator, #[case] input: &str) {
        let (html, summary) = walk(&translator, input, "lt");

        assert_that!(html, eq(input));
        assert_that!(summary.skipped_text_nodes, eq(1));
        assert_that!(summary.changes(), eq(0));
    }

    #[rstest]
    fn script_skip_does_not_leak_to_siblings(translator: Translator) {
        let (html, _) = walk(&translator, "<body><script>hello</script><p>hello</p></body>", "lt");

        assert_that!(html, eq("<body><script>hello</script><p>labas</p></body>"));
    }

    #[rstest]
    fn translates_allowed_attributes(translator: Translator) {
        let input = r#"<body><input placeholder="Search" name="search"><img alt="Logo" src="logo.png"><button title="Close" aria-label="Close" value="Send">x</button></body>"#;

        let (html, summary) = walk(&translator, input, "lt");

        assert_that!(
            html,
            eq(r#"<body><input placeholder="Paieška" name="search"><img alt="Logotipas" src="logo.png"><button title="Uždaryti" aria-label="Uždaryti" value="Siųsti">y</button></body>"#)
        );
        assert_that!(summary.attributes_translated, eq(5));
    }

    #[rstest]
    fn empty_attribute_is_left_alone(translator: Translator) {
        let (html, summary) = walk(&translator, r#"<body><input placeholder=""></body>"#, "lt");

        assert_that!(html, eq(r#"<body><input placeholder=""></body>"#));
        assert_that!(summary.attributes_translated, eq(0));
    }

    #[rstest]
    fn source_language_changes_nothing(translator: Translator) {
        let input = r#"<body><p title="Hello">Hello world</p></body>"#;

        let (html, summary) = walk(&translator, input, "en");

        assert_that!(html, eq(input));
        assert_that!(summary, eq(WalkSummary::default()));
    }

    #[rstest]
    fn walks_only_body(translator: Translator) {
        let input = "<html><head><title>Hello</title></head><body>Hello</body></html>";

        let (html, _) = walk(&translator, input, "lt");

        assert_that!(html, eq("<html><head><title>Hello</title></head><body>Labas</body></html>"));
    }

    #[rstest]
    fn none_root_is_noop(translator: Translator) {
        let mut document = HtmlDocument::parse("<p>Hello</p>").unwrap();
        let options = WalkOptions::default();

        let summary = PageWalker::new(&translator, "lt", &options).translate_subtree(&mut document, None);

        assert_that!(summary, eq(WalkSummary::default()));
        assert_that!(document.to_html(), eq("<p>Hello</p>"));
    }

    #[rstest]
    fn subtree_root_attributes_come_first(translator: Translator) {
        let mut document =
            HtmlDocument::parse(r#"<div title="Hello"><p title="World">Hello</p></div><p>Hello</p>"#).unwrap();
        let options = WalkOptions::default();
        let root = document.find_element("div");

        let summary = PageWalker::new(&translator, "lt", &options).translate_subtree(&mut document, root);

        assert_that!(
            document.to_html(),
            eq(r#"<div title="Labas"><p title="Pasaulis">Labas</p></div><p>Hello</p>"#)
        );
        assert_that!(summary.attributes_translated, eq(2));
        assert_that!(summary.text_nodes_translated, eq(1));
    }

    #[rstest]
    fn custom_options(translator: Translator) {
        let mut document =
            HtmlDocument::parse(r#"<p data-tip="Hello" title="Hello">Hello</p><code>hello</code>"#).unwrap();
        let options = WalkOptions {
            attributes: vec!["data-tip".to_string()],
            skip_tags: vec!["code".to_string()],
        };

        PageWalker::new(&translator, "lt", &options).translate_page(&mut document);

        assert_that!(
            document.to_html(),
            eq(r#"<p data-tip="Labas" title="Hello">Labas</p><code>hello</code>"#)
        );
    }

    #[rstest]
    fn unclosed_script_is_left_alone() {
        let translator = Translator::new(dictionary(&[(
            "lt",
            &[("hello", "labas"), ("script", "scenarijus"), ("body", "kūnas")],
        )]));
        let input = "<body><script>hello</body>";

        let (html, summary) = walk(&translator, input, "lt");

        assert_that!(html, eq(input));
        assert_that!(summary.changes(), eq(0));
    }

    #[rstest]
    fn truncated_start_tag_keeps_its_markup(translator: Translator) {
        let (html, _) =
            walk(&translator, r#"<body><p>Hello <div class="x" title="hello"</p></body>"#, "lt");

        assert_that!(html, contains_substring(r#"<div class="x" title="hello""#));
        assert_that!(html, not(contains_substring("&lt;")));
        assert_that!(html, ends_with("</p></body>"));
    }

    #[rstest]
    fn second_walk_in_same_language_changes_nothing(translator: Translator) {
        let mut document = HtmlDocument::parse(
            r#"<body><h1 title="Hello">Hello world</h1><input placeholder="Search"></body>"#,
        )
        .unwrap();
        let options = WalkOptions::default();
        let walker = PageWalker::new(&translator, "lt", &options);

        let first = walker.translate_page(&mut document);
        let translated = document.to_html();
        let second = walker.translate_page(&mut document);

        assert_that!(first.changes(), eq(3));
        assert_that!(second, eq(WalkSummary::default()));
        assert_that!(
            translated,
            eq(r#"<body><h1 title="Labas">Labas pasaulis</h1><input placeholder="Paieška"></body>"#)
        );
        assert_that!(document.to_html(), eq(&translated));
    }

    /// Only words whose translation is itself a key change on the second walk.
    #[rstest]
    fn second_walk_follows_chained_entries() {
        let translator = Translator::new(dictionary(&[(
            "lt",
            &[("home", "namai"), ("about", "apie"), ("apie", "about-ish")],
        )]));
        let mut document =
            HtmlDocument::parse(r#"<body><a title="About">Home about</a></body>"#).unwrap();
        let options = WalkOptions::default();
        let walker = PageWalker::new(&translator, "lt", &options);

        walker.translate_page(&mut document);
        assert_that!(document.to_html(), eq(r#"<body><a title="Apie">Namai apie</a></body>"#));

        let second = walker.translate_page(&mut document);

        assert_that!(
            document.to_html(),
            eq(r#"<body><a title="About-ish">Namai about-ish</a></body>"#)
        );
        assert_that!(second.changes(), eq(2));
    }

    #[rstest]
    fn options_from_page_config() {
        let options = WalkOptions::from(&PageConfig::default());

        assert_that!(options, eq(&WalkOptions::default()));
    }
}
