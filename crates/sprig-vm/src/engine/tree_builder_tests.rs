//! Tree builder tests: namespace propagation, integration points, blacklist.

use sprig_bytecode::Namespace;

use crate::dom::{Document, NodeId};

use super::node_tokens::Token;
use super::tree_builder::{BuildError, TreeBuilder};

/// Walk `path` of child indices from `root`.
fn descend(doc: &Document, root: NodeId, path: &[usize]) -> NodeId {
    let mut node = root;
    for &index in path {
        node = doc.children(node)[index];
    }
    node
}

#[test]
fn svg_namespace_propagates_to_children() {
    let mut builder = TreeBuilder::new();
    builder.open_element("svg").unwrap();
    builder.open_element("circle").unwrap();
    builder.close_element();
    builder.close_element();

    let mut doc = Document::new();
    let fragment = doc.create_fragment();
    builder.append_to(&mut doc, fragment).unwrap();

    let svg = descend(&doc, fragment, &[0]);
    let circle = descend(&doc, fragment, &[0, 0]);
    assert_eq!(doc.namespace(svg), Some(Namespace::Svg));
    assert_eq!(doc.namespace(circle), Some(Namespace::Svg));
}

#[test]
fn integration_point_restores_html() {
    let mut builder = TreeBuilder::new();
    builder.open_element("svg").unwrap();
    builder.open_element("foreignObject").unwrap();
    builder.open_element("div").unwrap();
    builder.close_element();
    builder.close_element();
    builder.close_element();

    let mut doc = Document::new();
    let fragment = doc.create_fragment();
    builder.append_to(&mut doc, fragment).unwrap();

    // foreignObject is itself an SVG element; its children are HTML again.
    let foreign_object = descend(&doc, fragment, &[0, 0]);
    let div = descend(&doc, fragment, &[0, 0, 0]);
    assert_eq!(doc.namespace(foreign_object), Some(Namespace::Svg));
    assert_eq!(doc.namespace(div), Some(Namespace::Html));
}

#[test]
fn desc_and_title_are_integration_points() {
    for tag in ["desc", "title"] {
        let mut builder = TreeBuilder::new();
        builder.open_element("svg").unwrap();
        builder.open_element(tag).unwrap();
        // span is blacklisted under SVG, allowed under an integration point.
        builder.open_element("span").unwrap();
        assert_eq!(builder.current_namespace(), Some(Namespace::Html));
    }
}

#[test]
fn blacklisted_tag_in_svg_fails_naming_the_tag() {
    let mut builder = TreeBuilder::new();
    builder.open_element("svg").unwrap();
    let err = builder.open_element("div").unwrap_err();

    assert_eq!(
        err,
        BuildError::TagNotAllowedInSvg {
            tag: "div".to_owned()
        }
    );
    assert_eq!(err.to_string(), "cannot open <div> inside an SVG context");
}

#[test]
fn non_blacklisted_tags_are_fine_in_svg() {
    let mut builder = TreeBuilder::new();
    builder.open_element("svg").unwrap();
    builder.open_element("g").unwrap();
    builder.open_element("path").unwrap();
    assert_eq!(builder.current_namespace(), Some(Namespace::Svg));
}

#[test]
fn svg_under_an_open_html_element_stays_html() {
    // Namespace resolution only enters SVG at the top of a fragment or by
    // propagation from an SVG context.
    let mut builder = TreeBuilder::new();
    builder.open_element("div").unwrap();
    builder.open_element("svg").unwrap();
    assert_eq!(builder.current_namespace(), Some(Namespace::Html));
}

#[test]
fn top_of_stack_accessors() {
    let mut builder = TreeBuilder::new();
    assert_eq!(builder.current_tag(), None);
    assert_eq!(builder.current_namespace(), None);

    builder.open_element("svg").unwrap();
    assert_eq!(builder.current_tag(), Some("svg"));
    assert_eq!(builder.current_namespace(), Some(Namespace::Svg));

    builder.open_element("circle").unwrap();
    assert_eq!(builder.current_tag(), Some("circle"));

    builder.close_element();
    assert_eq!(builder.current_tag(), Some("svg"));

    builder.close_element();
    assert_eq!(builder.current_tag(), None);
}

#[test]
fn append_to_runs_with_no_anchor() {
    let mut builder = TreeBuilder::new();
    builder.open_element("p").unwrap();
    builder.set_attribute("class", "a");
    builder.append_text("Hi ");
    builder.append_comment("c");
    builder.close_element();

    let mut doc = Document::new();
    let fragment = doc.create_fragment();
    let existing = doc.create_text("tail");
    doc.insert_before(fragment, existing, None);

    let tokens = builder.append_to(&mut doc, fragment).unwrap();

    // Appended at the end of the parent, after pre-existing children.
    assert_eq!(doc.serialize(fragment), "tail<p class=\"a\">Hi <!--c--></p>");
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens.reify(Token(0)), fragment);
}

#[test]
fn finish_then_replay_by_hand() {
    let mut builder = TreeBuilder::new();
    builder.open_element("svg").unwrap();
    builder.close_element();
    let program = builder.finish();

    let mut doc = Document::new();
    let fragment = doc.create_fragment();
    super::vm::run(&program, &mut doc, fragment, None).unwrap();
    super::vm::run(&program, &mut doc, fragment, None).unwrap();

    assert_eq!(doc.serialize(fragment), "<svg></svg><svg></svg>");
}
