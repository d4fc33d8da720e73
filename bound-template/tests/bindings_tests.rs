use std::cell::RefCell;
use std::rc::Rc;

use bound_template::bound_dom::{Event, Node};
use bound_template::{BoundNode, BoundTemplate, Record, Value};
use serde_json::json;

fn texts(node: &Node) -> Vec<String> {
    node.children().iter().map(Node::text_content).collect()
}

#[test]
fn text_placeholder_is_split_from_literal_text() {
    let tpl = BoundTemplate::from_markup("<p>Hello {{name}}</p>").unwrap();
    let (instance, mut bindings) = tpl.create().unwrap();
    let p = instance.child(0).unwrap();

    assert_eq!(texts(&p), vec!["Hello ", ""]);
    bindings.set("name", "World");
    assert_eq!(texts(&p), vec!["Hello ", "World"]);
    assert_eq!(instance.to_html(), "<p>Hello World</p>");
}

#[test]
fn set_updates_every_position_of_a_name_and_nothing_else() {
    let tpl = BoundTemplate::from_markup(
        r#"<div title="{{who}}"><h1>{{who}}</h1><p>by {{author}} for {{who}}</p></div>"#,
    )
    .unwrap();
    let (instance, mut bindings) = tpl.create().unwrap();
    bindings.set("author", "ann");
    bindings.set("who", "bob");

    assert_eq!(
        instance.to_html(),
        r#"<div title="bob"><h1>bob</h1><p>by ann for bob</p></div>"#
    );
    assert_eq!(bindings.bound_nodes("who").count(), 3);

    bindings.set("who", "cy");
    assert_eq!(
        instance.to_html(),
        r#"<div title="cy"><h1>cy</h1><p>by ann for cy</p></div>"#
    );
}

#[test]
fn multi_placeholder_attribute_is_order_independent() {
    let tpl = BoundTemplate::from_markup(r#"<span class="{{a}} {{b}}"></span>"#).unwrap();

    let (first, mut forward) = tpl.create().unwrap();
    let span = first.child(0).unwrap();
    assert_eq!(span.get_attribute("class").as_deref(), Some(" "));
    forward.set("a", "x");
    assert_eq!(span.get_attribute("class").as_deref(), Some("x "));
    forward.set("b", "y");
    assert_eq!(span.get_attribute("class").as_deref(), Some("x y"));

    let (second, mut reverse) = tpl.create().unwrap();
    reverse.set("b", "y");
    reverse.set("a", "x");
    assert_eq!(
        second.child(0).unwrap().get_attribute("class").as_deref(),
        Some("x y")
    );
}

#[test]
fn attribute_rerenders_from_the_original_value() {
    let tpl = BoundTemplate::from_markup(r#"<a href="/u/{{id}}/{{tab}}#{{id}}"></a>"#).unwrap();
    let (instance, mut bindings) = tpl.create().unwrap();
    let a = instance.child(0).unwrap();
    assert_eq!(a.get_attribute("href").as_deref(), Some("/u//#"));

    bindings.set("id", "{{tab}}");
    bindings.set("tab", "posts");
    assert_eq!(
        a.get_attribute("href").as_deref(),
        Some("/u/{{tab}}/posts#{{tab}}")
    );
    bindings.set("id", 7);
    assert_eq!(a.get_attribute("href").as_deref(), Some("/u/7/posts#7"));
}

#[test]
fn unknown_names_are_ignored() {
    let tpl = BoundTemplate::from_markup("<p>{{a}}</p>").unwrap();
    let (instance, mut bindings) = tpl.create().unwrap();
    let before = instance.to_html();
    bindings.set("nope", "value");
    bindings.set_data([("alsoNope", 1)]);
    assert_eq!(instance.to_html(), before);
    assert!(!bindings.contains("nope"));
}

#[test]
fn event_binding_swaps_handlers() {
    let tpl = BoundTemplate::from_markup(r#"<button on-click="{{click}}">go</button>"#).unwrap();
    let (instance, mut bindings) = tpl.create().unwrap();
    let button = instance.child(0).unwrap();
    assert!(!button.has_attribute("on-click"));
    assert_eq!(instance.to_html(), "<button>go</button>");

    let log = Rc::new(RefCell::new(Vec::new()));
    let handler = |tag: &'static str| {
        let log = log.clone();
        Value::handler(move |e: &Event| log.borrow_mut().push((tag, e.name.clone())))
    };

    bindings.set("click", handler("a"));
    assert_eq!(button.dispatch_event(&Event::new("click")), 1);
    bindings.set("click", handler("b"));
    assert_eq!(button.dispatch_event(&Event::new("click")), 1);

    assert_eq!(
        *log.borrow(),
        vec![("a", "click".to_string()), ("b", "click".to_string())]
    );
    assert_eq!(button.listener_count("click"), 1);
    assert!(bindings.handler("click").is_some());
}

#[test]
fn event_name_is_camel_cased() {
    let tpl =
        BoundTemplate::from_markup(r#"<input on-value-changed="{{changed}}">"#).unwrap();
    let (instance, mut bindings) = tpl.create().unwrap();
    let input = instance.child(0).unwrap();
    bindings.set("changed", Value::handler(|_| {}));
    assert_eq!(input.listener_count("valueChanged"), 1);
    assert_eq!(input.listener_count("value-changed"), 0);
}

#[test]
fn non_handler_value_clears_event_binding() {
    let tpl = BoundTemplate::from_markup(r#"<b on-click="{{click}}"></b>"#).unwrap();
    let (instance, mut bindings) = tpl.create().unwrap();
    let b = instance.child(0).unwrap();
    bindings.set("click", Value::handler(|_| {}));
    assert_eq!(b.listener_count("click"), 1);
    bindings.set("click", "not a function");
    assert_eq!(b.listener_count("click"), 0);
    assert!(bindings.handler("click").is_none());
}

#[test]
fn property_binding_uses_the_side_store() {
    let tpl = BoundTemplate::from_markup(
        r#"<input type="checkbox" checked$="{{checked}}" aria-label$="{{label}}">"#,
    )
    .unwrap();
    let (instance, mut bindings) = tpl.create().unwrap();
    let input = instance.child(0).unwrap();

    assert!(!input.has_attribute("checked$"));
    assert!(!input.has_attribute("aria-label$"));
    let slots = bindings.properties(&input).unwrap();
    assert_eq!(slots.get("checked"), Some(&None));
    assert_eq!(bindings.property(&input, "checked"), None);

    bindings.set("checked", true);
    bindings.set("label", json!({"text": "agree"}));
    assert_eq!(bindings.property(&input, "checked"), Some(&Value::Bool(true)));
    assert_eq!(
        bindings.property(&input, "ariaLabel").map(ToString::to_string),
        Some(r#"{"text":"agree"}"#.to_string())
    );
    assert_eq!(instance.to_html(), r#"<input type="checkbox">"#);
}

#[test]
fn set_data_matches_individual_sets() {
    let markup = r#"<p class="{{a}}-{{b}}">{{a}} and {{b}}</p>"#;
    let tpl = BoundTemplate::from_markup(markup).unwrap();

    let (one, mut by_record) = tpl.create().unwrap();
    let mut record = Record::new();
    record.insert("a".into(), Value::from(1));
    record.insert("b".into(), Value::from(2));
    by_record.set_data(&record);

    let (two, mut by_hand) = tpl.create().unwrap();
    by_hand.set("a", 1);
    by_hand.set("b", 2);

    let (three, mut by_json) = tpl.create().unwrap();
    by_json.set_json(&json!({"a": 1, "b": 2})).unwrap();

    assert_eq!(one.to_html(), r#"<p class="1-2">1 and 2</p>"#);
    assert_eq!(one.to_html(), two.to_html());
    assert_eq!(one.to_html(), three.to_html());
    assert!(by_json.set_json(&json!([1, 2])).is_err());
}

#[test]
fn instances_do_not_share_state() {
    let tpl = BoundTemplate::from_markup("<i>{{v}}</i>").unwrap();
    let (a, mut a_bindings) = tpl.create().unwrap();
    let (b, _b_bindings) = tpl.create().unwrap();
    a_bindings.set("v", "only a");
    assert_eq!(a.to_html(), "<i>only a</i>");
    assert_eq!(b.to_html(), "<i></i>");
    assert_eq!(tpl.template().content().to_html(), "<i>{{v}}</i>");
}

#[test]
fn bound_nodes_expose_their_kind() {
    let tpl = BoundTemplate::from_markup(r#"<div class="{{x}}" on-tap="{{x}}">{{x}}</div>"#)
        .unwrap();
    let (instance, bindings) = tpl.create().unwrap();
    let div = instance.child(0).unwrap();
    let kinds: Vec<_> = bindings
        .bound_nodes("x")
        .map(|n| match n {
            BoundNode::Text { .. } => "text",
            BoundNode::Attribute { .. } => "attribute",
            BoundNode::EventHandler { .. } => "event",
            BoundNode::Property { .. } => "property",
        })
        .collect();
    assert_eq!(kinds, vec!["text", "attribute", "event"]);
    assert!(bindings.bound_nodes("x").skip(1).all(|n| n.node().ptr_eq(&div)));
}
