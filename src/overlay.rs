//! The translation overlay: translator, current language and walk options in one place.

use std::borrow::Cow;

use crate::document::{
    DocumentTree,
    PageWalker,
    WalkOptions,
    WalkSummary,
};
use crate::language::LanguageState;
use crate::translate::Translator;

/// Translates text and documents into the currently selected language.
#[derive(Debug)]
pub struct Overlay {
    translator: Translator,
    language: LanguageState,
    walk_options: WalkOptions,
}

impl Overlay {
    #[must_use]
    pub fn new(translator: Translator, language: LanguageState) -> Self {
        Self { translator, language, walk_options: WalkOptions::default() }
    }

    #[must_use]
    pub fn with_walk_options(mut self, walk_options: WalkOptions) -> Self {
        self.walk_options = walk_options;
        self
    }

    #[must_use]
    pub const fn translator(&self) -> &Translator {
        &self.translator
    }

    #[must_use]
    pub const fn walk_options(&self) -> &WalkOptions {
        &self.walk_options
    }

    /// Translates `text` into the current language.
    #[must_use]
    pub fn translate<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.translator.translate(text, self.language.get())
    }

    /// Translates `text` into `language`, ignoring the current selection.
    #[must_use]
    pub fn translate_with<'a>(&self, text: &'a str, language: &str) -> Cow<'a, str> {
        self.translator.translate(text, language)
    }

    /// Translates the whole page into the current language.
    pub fn translate_page<T: DocumentTree>(&self, tree: &mut T) -> WalkSummary {
        self.walker().translate_page(tree)
    }

    /// Translates `root` and its descendants into the current language.
    pub fn translate_subtree<T: DocumentTree>(
        &self,
        tree: &mut T,
        root: Option<T::NodeId>,
    ) -> WalkSummary {
        self.walker().translate_subtree(tree, root)
    }

    #[must_use]
    pub fn language(&self) -> &str {
        self.language.get()
    }

    /// Selects `language` and persists the choice.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language.set(language);
    }

    /// Switches between the toggle pair and returns the new language.
    pub fn toggle_language(&mut self) -> &str {
        self.language.toggle()
    }

    fn walker(&self) -> PageWalker<'_> {
        PageWalker::new(&self.translator, self.language.get(), &self.walk_options)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::document::HtmlDocument;
    use crate::test_utils::dictionary;

    #[fixture]
    fn overlay() -> Overlay {
        let translator = Translator::new(dictionary(&[(
            "lt",
            &[
                ("hello", "labas"),
                ("search", "paieška"),
                ("about", "apie"),
                ("me", "mane"),
            ],
        )]));
        Overlay::new(translator, LanguageState::default())
    }

    #[rstest]
    fn translate_follows_current_language(mut overlay: Overlay) {
        assert_that!(overlay.translate("Hello").as_ref(), eq("Hello"));

        overlay.set_language("lt");

        assert_that!(overlay.language(), eq("lt"));
        assert_that!(overlay.translate("Hello").as_ref(), eq("Labas"));
        assert_that!(overlay.translate_with("Hello", "en").as_ref(), eq("Hello"));
    }

    #[rstest]
    fn toggle_language_round_trip(mut overlay: Overlay) {
        assert_that!(overlay.toggle_language(), eq("lt"));
        assert_that!(overlay.toggle_language(), eq("en"));
    }

    #[rstest]
    fn walker_skips_script_text(mut overlay: Overlay) {
        let mut page =
            HtmlDocument::parse("<body><script>hello()</script><p>hello</p></body>").unwrap();
        overlay.set_language("lt");

        overlay.translate_page(&mut page);

        assert_that!(page.to_html(), eq("<body><script>hello()</script><p>labas</p></body>"));
    }

    #[rstest]
    fn placeholder_attribute_translated(mut overlay: Overlay) {
        let mut page = HtmlDocument::parse(r#"<input placeholder="Search">"#).unwrap();
        overlay.set_language("lt");

        let summary = overlay.translate_page(&mut page);

        let input = page.find_element("input").unwrap();
        assert_that!(page.attribute(input, "placeholder"), some(eq("Paieška")));
        assert_that!(summary.attributes_translated, eq(1));
    }

    /// Switching back only restores the page when it is rebuilt from its source.
    #[rstest]
    fn round_trip_on_language_switch(mut overlay: Overlay) {
        let source = "<body><h1>About me</h1></body>";

        overlay.set_language("lt");
        let mut page = HtmlDocument::parse(source).unwrap();
        overlay.translate_page(&mut page);
        assert_that!(page.to_html(), eq("<body><h1>Apie mane</h1></body>"));

        overlay.set_language("en");
        let mut page = HtmlDocument::parse(source).unwrap();
        let summary = overlay.translate_page(&mut page);
        assert_that!(page.to_html(), eq(source));
        assert_that!(summary.changes(), eq(0));
    }

    #[rstest]
    fn subtree_uses_current_language(mut overlay: Overlay) {
        let mut page = HtmlDocument::parse("<div><p>Hello</p></div><p>Hello</p>").unwrap();
        overlay.set_language("lt");

        let root = page.find_element("div");
        overlay.translate_subtree(&mut page, root);

        assert_that!(page.to_html(), eq("<div><p>Labas</p></div><p>Hello</p>"));
    }

    #[rstest]
    fn custom_walk_options(overlay: Overlay) {
        let mut overlay = overlay
            .with_walk_options(WalkOptions { attributes: vec![], skip_tags: vec![] });
        let mut page =
            HtmlDocument::parse(r#"<body><script>hello</script><a title="Hello">x</a></body>"#).unwrap();
        overlay.set_language("lt");

        overlay.translate_page(&mut page);

        assert_that!(
            page.to_html(),
            eq(r#"<body><script>labas</script><a title="Hello">x</a></body>"#)
        );
    }
}
