//! End-to-end check of the account filters page against its expected markup.

use serde_json::json;
use trellis_compiler_html::render;
use trellis_vdom::{attrs, dedent, m, nodes_from_json, trust, VNode};

fn form(name: &str, fields: &[(&str, &str)], extra: Option<VNode>) -> VNode {
    let inputs: Vec<VNode> = fields
        .iter()
        .map(|(key, value)| {
            m!(
                "input.my-input",
                attrs! { "name" => *key, "placeholder" => format!("hello: {}", value) }
            )
        })
        .collect();
    m!("form#my-form", attrs! { "class" => vec![name] }, inputs, extra)
}

fn account(member_count: usize, extra: Option<VNode>) -> VNode {
    let hidden_class = "hidden";
    m!(
        "#account-filters",
        m!(
            "h3",
            m!(
                "button.fold-button",
                attrs! { "title" => "expand", "onclick" => None::<&str> },
                "⇕"
            ),
            "Filters  🔍"
        ),
        m!(
            ".to-fold",
            attrs! { "class" => vec![if member_count == 1 { hidden_class } else { "" }] }
        ),
        m!("h3", m!("a", attrs! { "href" => "#foo" }, "You & I")),
        form(
            "members_by_member_ids",
            &[("member_ids", "M-00-0000-0001")],
            extra
        )
    )
}

#[test]
fn test_account_fixture() {
    let html = render(&account(1, None)).expect("Failed to render");

    println!("Generated HTML:\n{}", html);

    let expected = dedent(
        r##"
        <div id="account-filters">
            <h3><button title="expand" class="fold-button">⇕</button>Filters  🔍</h3>
            <div class="to-fold hidden"></div>
            <h3><a href="#foo">You &amp; I</a></h3>
            <form id="my-form" class="members_by_member_ids">
                <input name="member_ids" placeholder="hello: M-00-0000-0001" class="my-input"></form>
        </div>
        "##,
    );
    assert_eq!(html, expected);
}

#[test]
fn test_account_fixture_with_trusted_markup() {
    let html = render(&account(1, Some(trust("no escape: &").into())))
        .expect("Failed to render");

    let expected = dedent(
        r##"
        <div id="account-filters">
            <h3><button title="expand" class="fold-button">⇕</button>Filters  🔍</h3>
            <div class="to-fold hidden"></div>
            <h3><a href="#foo">You &amp; I</a></h3>
            <form id="my-form" class="members_by_member_ids">
                <input name="member_ids" placeholder="hello: M-00-0000-0001" class="my-input">no escape: &</form>
        </div>
        "##,
    );
    assert_eq!(html, expected);
}

#[test]
fn test_account_fixture_without_hidden_class() {
    let html = render(&account(0, None)).expect("Failed to render");
    assert!(html.contains(r#"<div class="to-fold"></div>"#));
}

#[test]
fn test_account_fixture_from_vnode_json() {
    // Same tree as exported JSON, with className strings and null handlers
    let value = json!({
        "tag": "div",
        "attrs": {"className": "", "id": "account-filters"},
        "children": [
            {"tag": "h3", "attrs": {"className": ""}, "children": [
                {"tag": "button", "attrs": {"className": "fold-button", "title": "expand", "onclick": null}, "children": ["⇕"]},
                "Filters  🔍"
            ]},
            {"tag": "div", "attrs": {"className": "to-fold hidden"}, "children": []},
            {"tag": "h3", "attrs": {"className": ""}, "children": [
                {"tag": "a", "attrs": {"className": "", "href": "#foo"}, "children": ["You & I"]}
            ]},
            {"tag": "form", "attrs": {"className": "members_by_member_ids", "id": "my-form"}, "children": [
                {"tag": "input", "attrs": {"className": "my-input", "name": "member_ids", "placeholder": "hello: M-00-0000-0001"}, "children": []}
            ]}
        ]
    });

    let nodes = nodes_from_json(value);
    assert_eq!(nodes.len(), 1);

    let from_json = render(&nodes[0]).expect("Failed to render");
    let built = render(&account(1, None)).expect("Failed to render");
    assert_eq!(from_json, built);
}
