//! Rendering is a pure function of the tree.

use trellis_compiler_html::{escape_text, render, render_with_options, RenderOptions};
use trellis_vdom::{attrs, m, Arg, VNode, VOID_ELEMENTS};

fn unescape(html: &str) -> String {
    html.replace("&lt;", "<").replace("&gt;", ">").replace("&amp;", "&")
}

fn todo_list(items: &[&str]) -> VNode {
    m!(
        "ul#todoListUl",
        items
            .iter()
            .map(|item| m!("li.todo", attrs! { "title" => *item }, *item))
            .collect::<Vec<_>>()
    )
}

#[test]
fn test_render_is_idempotent() {
    let node = todo_list(&["milk", "eggs & ham", "<bread>"]);
    let first = render(&node).expect("Failed to render");
    let second = render(&node).expect("Failed to render");
    assert_eq!(first, second);

    let rebuilt = todo_list(&["milk", "eggs & ham", "<bread>"]);
    assert_eq!(render(&rebuilt).unwrap(), first);
}

#[test]
fn test_escaped_text_round_trips() {
    for text in ["You & I", "a < b > c", "&amp; already", "say \"hi\"", "&&<<>>"] {
        let html = render(&m!("p", text)).expect("Failed to render");
        let inner = html
            .strip_prefix("<p>")
            .and_then(|rest| rest.strip_suffix("</p>"))
            .expect("wrapped in <p>");

        assert_eq!(inner, escape_text(text));
        assert_eq!(unescape(inner), text);
    }
}

#[test]
fn test_dropped_children_do_not_change_output() {
    let show_banner = false;
    let with_gaps = m!(
        "section",
        if show_banner { Some(m!("div.banner")) } else { None },
        Arg::Null,
        false,
        m!("p", "body")
    );
    let without = m!("section", m!("p", "body"));
    assert_eq!(render(&with_gaps).unwrap(), render(&without).unwrap());
}

#[test]
fn test_void_elements_ignore_children() {
    for tag in VOID_ELEMENTS {
        let with_children = m!(*tag, attrs! { "title" => "t" }, "x", m!("b", "y"));
        let without = m!(*tag, attrs! { "title" => "t" });
        assert_eq!(with_children, without);
        assert_eq!(
            render(&with_children).unwrap(),
            format!(r#"<{} title="t">"#, tag)
        );
    }
}

#[test]
fn test_compact_output_has_no_inserted_whitespace() {
    let options = RenderOptions {
        pretty: false,
        ..Default::default()
    };
    let html = render_with_options(&todo_list(&["a", "b"]), &options).expect("Failed to render");
    assert_eq!(
        html,
        r#"<ul id="todoListUl"><li title="a" class="todo">a</li><li title="b" class="todo">b</li></ul>"#
    );
    assert!(!html.contains('\n'));
}
