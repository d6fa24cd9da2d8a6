pub mod links;
pub mod problems;


use scraper::{ElementRef, Html};

/// Finds the first `div` whose `id` attribute equals `content_id`
pub fn content_region<'a>(doc: &'a Html, content_id: &str) -> Option<ElementRef<'a>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "div" && e.value().id() == Some(content_id))
}

/// Elements named `name` below `root`, in document order
pub fn elements_named<'a>(
    root: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |e| e.value().name() == name)
}

/// All text below an element, trimmed at both ends
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
