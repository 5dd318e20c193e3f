use ego_tree::iter::Edge;
use pledgewatch_core::{Attributes, RewardRecord, TagEvent, TagScanner};
use scraper::node::Node;
use scraper::Html;

/// Parses the page with html5ever and replays it as start/end/text events in
/// document order. Every element produces a matching end event, void elements
/// included.
pub fn for_each_tag_event<F>(html: &str, mut sink: F)
where
    F: FnMut(TagEvent),
{
    let document = Html::parse_document(html);
    for edge in document.tree.root().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(element) => {
                    let mut attrs = Attributes::new();
                    for (name, value) in element.attrs() {
                        attrs.push(name, Some(value.to_string()));
                    }
                    sink(TagEvent::start(element.name(), attrs));
                }
                Node::Text(text) => sink(TagEvent::text(&**text)),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    sink(TagEvent::end(element.name()));
                }
            }
        }
    }
}

pub fn tag_events(html: &str) -> Vec<TagEvent> {
    let mut events = Vec::new();
    for_each_tag_event(html, |event| events.push(event));
    events
}

/// Extracts the limited reward tiers from a decoded pledge page.
pub fn scan_document(html: &str) -> Vec<RewardRecord> {
    let mut scanner = TagScanner::new();
    for_each_tag_event(html, |event| scanner.feed(&event));
    scanner.finish()
}
