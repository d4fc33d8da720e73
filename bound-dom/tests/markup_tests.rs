use bound_dom::{DomError, NodeKind, Template, parse_fragment};

#[test]
fn parse_element_with_text() {
    let frag = parse_fragment("<div>hi</div>").unwrap();
    assert_eq!(frag.kind(), NodeKind::Fragment);
    assert_eq!(frag.child_count(), 1);
    let div = frag.child(0).unwrap();
    assert_eq!(div.tag().as_deref(), Some("div"));
    assert_eq!(div.child_count(), 1);
    assert!(div.child(0).unwrap().is_text());
}

#[test]
fn placeholders_are_plain_text_to_the_host() {
    let frag = parse_fragment("<p>Hello {{name}}</p>").unwrap();
    let p = frag.child(0).unwrap();
    assert_eq!(p.child_count(), 1);
    assert_eq!(p.text_content(), "Hello {{name}}");
}

#[test]
fn parse_binding_style_attribute_names() {
    let frag = parse_fragment(
        r#"<input class="x {{a}}" on-click="{{click}}" checked$="{{checked}}" disabled/>"#,
    )
    .unwrap();
    let input = frag.child(0).unwrap();
    assert_eq!(input.child_count(), 0);
    let names: Vec<_> = input.attributes().into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["class", "on-click", "checked$", "disabled"]);
    assert_eq!(input.get_attribute("class").as_deref(), Some("x {{a}}"));
    assert_eq!(input.get_attribute("disabled").as_deref(), Some(""));
}

#[test]
fn void_tags_do_not_swallow_siblings() {
    let frag = parse_fragment("<p>a<br>b</p><hr><span>c</span>").unwrap();
    assert_eq!(frag.child_count(), 3);
    let p = frag.child(0).unwrap();
    assert_eq!(p.child_count(), 3);
    assert_eq!(p.child(2).unwrap().text_content(), "b");
}

#[test]
fn whitespace_and_comments_are_nodes() {
    let frag = parse_fragment("<ul>\n  <li>one</li>\n  <!-- note -->\n</ul>").unwrap();
    let ul = frag.child(0).unwrap();
    let kinds: Vec<_> = ul.children().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Text,
            NodeKind::Element,
            NodeKind::Text,
            NodeKind::Comment,
            NodeKind::Text,
        ]
    );
}

#[test]
fn unclosed_and_stray_tags_are_tolerated() {
    let frag = parse_fragment("<div><span>x</div></em>tail").unwrap();
    assert_eq!(frag.child_count(), 2);
    assert_eq!(frag.child(1).unwrap().text_content(), "tail");
    let frag = parse_fragment("<div><b>open").unwrap();
    assert_eq!(frag.text_content(), "open");
}

#[test]
fn unterminated_constructs_are_errors() {
    assert!(matches!(
        parse_fragment(r#"<a href="x>y"#),
        Err(DomError::Markup { offset: 8, .. })
    ));
    assert!(matches!(
        parse_fragment("<p><!-- open"),
        Err(DomError::Markup { offset: 3, .. })
    ));
    assert!(matches!(
        parse_fragment("<p class"),
        Err(DomError::Markup { .. })
    ));
}

#[test]
fn serializer_round_trips_structure() {
    let src = r#"<div class="a &amp; b"><input value="1"><p>x &lt; y</p></div>"#;
    let frag = parse_fragment(src).unwrap();
    assert_eq!(frag.to_html(), src);
}

#[test]
fn template_instantiates_independent_copies() {
    let tpl = Template::parse("<b>{{x}}</b>").unwrap();
    let a = tpl.instantiate();
    let b = tpl.instantiate();
    a.child(0).unwrap().set_text_content("changed");
    assert_eq!(b.to_html(), "<b>{{x}}</b>");
    assert_eq!(tpl.content().to_html(), "<b>{{x}}</b>");
}
