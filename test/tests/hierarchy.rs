//! Layout items: attaching view nodes under a parent view's node.

use flexbind_test::prelude::*;
use serial_test::serial;

#[test]
#[serial]
fn test_add_item_attaches_node() {
    let container = TestView::new();
    let header = TestView::new();
    let content = TestView::new();

    let header_binding = container.add_layout_item(header.id()).unwrap();
    container.add_layout_item(content.id()).unwrap();

    let parent = container.layout_binding().unwrap();
    let content_node = content.layout_binding().unwrap().node().id();
    assert_eq!(
        parent.node().children().unwrap(),
        vec![header_binding.node().id(), content_node]
    );
    assert_eq!(
        header_binding.node().parent().unwrap(),
        Some(parent.node().id())
    );
    assert_eq!(header.layout_parent(), Some(container.id()));
    assert_eq!(container.layout_items(), vec![header.id(), content.id()]);
}

#[test]
#[serial]
fn test_excluded_item_is_detached() {
    let container = TestView::new();
    let a = TestView::new();
    let b = TestView::new();
    let c = TestView::new();
    for item in [&a, &b, &c] {
        container.add_layout_item(item.id()).unwrap();
    }
    let parent = container.layout_binding().unwrap();
    let b_binding = b.layout_binding().unwrap();

    b_binding.set_included_in_layout(false);
    assert_eq!(parent.node().child_count().unwrap(), 2);
    assert_eq!(b_binding.node().parent().unwrap(), None);
    // still an item, just not laid out
    assert_eq!(container.layout_items().len(), 3);

    b_binding.set_included_in_layout(true);
    let children = parent.node().children().unwrap();
    assert_eq!(children.len(), 3);
    assert_eq!(children[1], b_binding.node().id());
}

#[test]
#[serial]
fn test_disabled_item_is_detached() {
    let container = TestView::new();
    let item = TestView::new();
    let binding = container.add_layout_item(item.id()).unwrap();
    let parent = container.layout_binding().unwrap();

    binding.set_enabled(false);
    assert_eq!(parent.node().child_count().unwrap(), 0);
    binding.set_enabled(true);
    assert_eq!(parent.node().child_count().unwrap(), 1);
}

#[test]
#[serial]
fn test_item_of_disabled_kind_is_not_attached() {
    let previous = flexbind::layout_policy();
    flexbind::set_layout_policy(LayoutPolicy::default().with_kind("spacer", false));

    let container = TestView::new();
    let spacer = TestView::with_kind("spacer");
    container.add_layout_item(spacer.id()).unwrap();
    assert_eq!(
        container.layout_binding().unwrap().node().child_count().unwrap(),
        0
    );

    flexbind::set_layout_policy(previous);
}

#[test]
#[serial]
fn test_adding_moves_item_between_parents() {
    let left = TestView::new();
    let right = TestView::new();
    let item = TestView::new();

    left.add_layout_item(item.id()).unwrap();
    right.add_layout_item(item.id()).unwrap();

    assert!(left.layout_items().is_empty());
    assert_eq!(right.layout_items(), vec![item.id()]);
    assert_eq!(
        left.layout_binding().unwrap().node().child_count().unwrap(),
        0
    );
    assert_eq!(
        right.layout_binding().unwrap().node().child_count().unwrap(),
        1
    );
}

#[test]
#[serial]
fn test_remove_item() {
    let container = TestView::new();
    let item = TestView::new();
    container.add_layout_item(item.id()).unwrap();

    container.remove_layout_item(item.id()).unwrap();
    assert!(container.layout_items().is_empty());
    assert_eq!(item.layout_parent(), None);
    assert_eq!(
        container.layout_binding().unwrap().node().child_count().unwrap(),
        0
    );

    // removing something that is not an item is fine
    container.remove_layout_item(item.id()).unwrap();
}

#[test]
#[serial]
fn test_cycles_are_rejected() {
    let root = TestView::new();
    let child = TestView::new();
    root.add_layout_item(child.id()).unwrap();

    assert!(matches!(
        child.add_layout_item(root.id()),
        Err(LayoutError::CyclicItem(v)) if v == root.id()
    ));
    assert!(matches!(
        root.add_layout_item(root.id()),
        Err(LayoutError::CyclicItem(_))
    ));
    assert_eq!(root.layout_items(), vec![child.id()]);
}

#[test]
#[serial]
fn test_removing_views_unlinks_items() {
    let container = TestView::new();
    let item = ViewId::new();
    let other = TestView::new();
    container.add_layout_item(item).unwrap();
    container.add_layout_item(other.id()).unwrap();

    item.remove();
    assert_eq!(container.layout_items(), vec![other.id()]);
    assert_eq!(
        container.layout_binding().unwrap().node().child_count().unwrap(),
        1
    );

    let other_binding = other.layout_binding().unwrap();
    container.id().remove();
    assert_eq!(other.layout_parent(), None);
    assert_eq!(other_binding.node().parent().unwrap(), None);
}
