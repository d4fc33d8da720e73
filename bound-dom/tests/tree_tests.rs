use bound_dom::{DomError, Node, h, text};

fn names(node: &Node) -> Vec<String> {
    node.children().iter().map(Node::text_content).collect()
}

#[test]
fn failed_insert_leaves_both_parents_untouched() {
    let a = h("div", (), vec![text("x")]);
    let b = h("div", (), vec![text("y")]);
    let x = a.child(0).unwrap();

    let err = b.insert_child(5, x.clone()).unwrap_err();
    assert_eq!(err, DomError::IndexOutOfBounds { index: 5, len: 1 });
    assert_eq!(a.child_count(), 1);
    assert!(x.parent().unwrap().ptr_eq(&a));
    assert_eq!(names(&b), vec!["y"]);
}

#[test]
fn insert_moves_a_child_between_parents() {
    let a = h("div", (), vec![text("x")]);
    let b = h("div", (), vec![text("y"), text("z")]);
    let x = a.child(0).unwrap();

    b.insert_child(1, x.clone()).unwrap();
    assert_eq!(a.child_count(), 0);
    assert_eq!(names(&b), vec!["y", "x", "z"]);
    assert!(x.parent().unwrap().ptr_eq(&b));
}

#[test]
fn insert_within_the_same_parent() {
    let list = h("ol", (), vec![text("a"), text("b"), text("c")]);

    // to the end: index counts the old slot
    list.insert_child(3, list.child(0).unwrap()).unwrap();
    assert_eq!(names(&list), vec!["b", "c", "a"]);

    // towards the front
    list.insert_child(0, list.child(2).unwrap()).unwrap();
    assert_eq!(names(&list), vec!["a", "b", "c"]);

    // before its own successor is a no-op
    list.insert_child(2, list.child(1).unwrap()).unwrap();
    assert_eq!(names(&list), vec!["a", "b", "c"]);

    assert!(list.insert_child(4, list.child(0).unwrap()).is_err());
    assert_eq!(names(&list), vec!["a", "b", "c"]);
    assert!(list.children().iter().all(|c| c.parent().unwrap().ptr_eq(&list)));
}
