use element_inspector::dom::{Document, LightChildren, PageDocument, ShadowIncludingChildren, TreeFilter, element_data};
use element_inspector::highlight::HighlightStyle;
use element_inspector::tools::utils::html_data_url;
use element_inspector::tools::{ToolContext, ToolRegistry};
use element_inspector::{BrowserSession, InspectorError, LaunchOptions};
use serde_json::json;

const PAGE: &str = r#"<html><body style="margin:0">
<ul id="menu" class="menu" style="margin:0;padding:0;list-style:none">
    <li class="item" id="first" style="height:30px">One</li>
    <li class="item" id="second" style="height:30px">Two <span class="item">nested</span></li>
    <li id="third" style="height:30px">Three</li>
</ul>
<div id="host"></div>
<script>
    const root = document.getElementById('host').attachShadow({ mode: 'open' });
    root.innerHTML = '<header id="shadow-header"></header>';
    document.getElementById('host').appendChild(document.createElement('footer'));
</script>
</body></html>"#;

fn open_page() -> BrowserSession {
    let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
    session.navigate(&html_data_url(PAGE)).expect("Failed to navigate");
    session.wait_for_navigation().expect("Navigation did not complete");
    session
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_element_data_on_live_page() {
    let session = open_page();
    let document = session.document().unwrap();

    let data = element_data(&document, "#menu").unwrap();
    assert_eq!(data.tag_name, "UL");
    assert_eq!(data.attributes.len(), 3);
    assert_eq!(data.get_attribute("class"), Some("menu"));
    assert!(data.rect.is_finite());
    assert!(data.rect.height >= 90.0);

    assert!(matches!(element_data(&document, "#missing"), Err(InspectorError::ElementNotFound(_))));
    assert!(matches!(element_data(&document, "li["), Err(InspectorError::InvalidSelector { .. })));
}

#[test]
#[ignore]
fn test_element_tree_on_live_page() {
    let session = open_page();
    let document: PageDocument = session.document().unwrap();

    let tree = element_inspector::dom::element_node_tree_data(
        &document,
        &LightChildren,
        "#menu",
        &TreeFilter::selector(".item"),
    )
    .unwrap()
    .unwrap();
    assert_eq!(tree.child_nodes.len(), 2);
    assert_eq!(tree.child_nodes[1].child_nodes[0].tag_name, "SPAN");

    let composed =
        element_inspector::dom::element_node_tree_data(&document, &ShadowIncludingChildren, "#host", &TreeFilter::All)
            .unwrap()
            .unwrap();
    let tags: Vec<_> = composed.child_nodes.iter().map(|c| c.tag_name.as_str()).collect();
    assert_eq!(tags, vec!["HEADER", "FOOTER"]);
}

#[test]
#[ignore]
fn test_highlighter_round_trip() {
    let mut session = open_page();
    session.create_highlighter("main", HighlightStyle::default()).unwrap();

    let mut inspector = session.inspector().unwrap();
    assert_eq!(inspector.get_highlighter_target_data("main").unwrap(), None);

    inspector
        .highlight_element_at_point("main", element_inspector::Point::new(10.0, 45.0))
        .unwrap();
    let target = inspector.get_highlighter_target_data("main").unwrap().unwrap();
    assert_eq!(target.id(), Some("second"));

    // the overlay must not be hit by later point queries
    inspector
        .highlight_element_at_point("main", element_inspector::Point::new(10.0, 45.0))
        .unwrap();
    assert_eq!(inspector.get_highlighter_target_data("main").unwrap().unwrap().id(), Some("second"));

    inspector.highlight_element_for_selector("main", "#menu").unwrap();
    let children = inspector.get_highlighter_target_children_data("main", ".item").unwrap();
    let tags: Vec<_> = children.iter().map(|c| c.tag_name.as_str()).collect();
    assert_eq!(tags, vec!["LI", "LI", "SPAN"]);

    inspector.hide_highlighter("main").unwrap();
    assert!(inspector.get_highlighter_target_data("main").unwrap().is_some());
    inspector.show_highlighter("main").unwrap();

    let overlays: usize = inspector
        .document()
        .tab()
        .evaluate("document.querySelectorAll('[data-element-inspector-overlay]').length", false)
        .unwrap()
        .value
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as usize;
    assert_eq!(overlays, 1);
}

#[test]
#[ignore]
fn test_overlay_hidden_from_queries() {
    let mut session = open_page();
    session.create_highlighter("main", HighlightStyle::default()).unwrap();
    session.inspector().unwrap().highlight_element_for_selector("main", "#third").unwrap();

    let document = session.document().unwrap();
    let body = document.query_selector("body").unwrap().unwrap();
    let tags: Vec<_> = document
        .child_nodes(&body)
        .unwrap()
        .iter()
        .filter(|node| document.node_type(node).unwrap().is_element())
        .map(|node| document.tag_name(node).unwrap())
        .collect();
    assert_eq!(tags, vec!["UL", "DIV", "SCRIPT"]);
}

#[test]
#[ignore]
fn test_handles_do_not_survive_navigation() {
    let mut session = open_page();
    session.create_highlighter("main", HighlightStyle::default()).unwrap();
    session.inspector().unwrap().highlight_element_for_selector("main", "#menu").unwrap();
    let menu = session.document().unwrap().query_selector("#menu").unwrap().unwrap();

    session.navigate(&html_data_url("<p>x</p>")).unwrap();
    session.wait_for_navigation().unwrap();

    // the new page hands out its own handles, starting over
    let document = session.document().unwrap();
    let paragraph = document.query_selector("p").unwrap().unwrap();
    assert_ne!(paragraph, menu);
    assert!(matches!(document.tag_name(&menu), Err(InspectorError::ElementNotFound(_))));

    assert!(matches!(
        session.inspector().unwrap().get_highlighter_target_data("main"),
        Err(InspectorError::ElementNotFound(_))
    ));
}

#[test]
#[ignore]
fn test_tools_against_live_page() {
    let mut session = open_page();
    let registry = ToolRegistry::with_defaults();
    let mut context = ToolContext::new(&mut session);

    let created = registry
        .execute("create_highlighter", json!({ "highlighter_id": "main" }), &mut context)
        .unwrap();
    assert!(created.success);

    let highlighted = registry
        .execute("highlight", json!({ "highlighter_id": "main", "selector": "#first" }), &mut context)
        .unwrap();
    assert_eq!(highlighted.data.unwrap()["tagName"], "LI");

    let target = registry
        .execute("highlighter_target", json!({ "highlighter_id": "main" }), &mut context)
        .unwrap();
    assert_eq!(target.data.unwrap()["attributes"]["id"], "first");

    let tree = registry
        .execute("element_tree", json!({ "root": "#menu" }), &mut context)
        .unwrap();
    assert_eq!(tree.data.unwrap()["childNodes"].as_array().unwrap().len(), 3);

    let shot = registry
        .execute("screenshot", json!({ "highlighter_id": "main" }), &mut context)
        .unwrap();
    let shot = shot.data.unwrap();
    assert_eq!(shot["outlined"], true);
    assert!(!shot["data"].as_str().unwrap().is_empty());

    let err = registry
        .execute("highlight", json!({ "highlighter_id": "ghost", "selector": "#first" }), &mut context)
        .unwrap_err();
    assert!(matches!(err, InspectorError::HighlighterNotFound(_)));

    let navigated = registry
        .execute("navigate", json!({ "url": html_data_url("<p id='after'>x</p>") }), &mut context)
        .unwrap();
    assert_eq!(navigated.data.unwrap()["highlighters_reset"], 1);

    let target = registry
        .execute("highlighter_target", json!({ "highlighter_id": "main" }), &mut context)
        .unwrap();
    assert_eq!(target.data, Some(serde_json::Value::Null));

    // the overlay is reinstalled on the new page
    let highlighted = registry
        .execute("highlight", json!({ "highlighter_id": "main", "selector": "#after" }), &mut context)
        .unwrap();
    assert_eq!(highlighted.data.unwrap()["tagName"], "P");
}
