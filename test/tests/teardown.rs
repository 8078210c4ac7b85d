//! Releasing layout nodes when views are removed.

use flexbind_test::prelude::*;
use serial_test::serial;

#[test]
#[serial]
fn test_remove_releases_node_once() {
    let view = ViewId::new();
    let before = node_count();
    view.layout_binding().unwrap();
    assert_eq!(node_count(), before + 1);

    view.remove();
    assert_eq!(node_count(), before);
    assert!(!view.is_valid());
    assert!(!view.has_layout_binding());

    // a second teardown is absorbed
    view.remove();
    assert_eq!(node_count(), before);
}

#[test]
#[serial]
fn test_remove_without_binding() {
    let view = ViewId::new();
    let before = node_count();
    view.remove();
    view.remove();
    assert_eq!(node_count(), before);
}

#[test]
#[serial]
fn test_held_binding_is_torn_down() {
    let view = ViewId::new();
    let binding = view.layout_binding().unwrap();
    binding.node().set_width(10.0).unwrap();

    view.remove();

    assert!(binding.is_torn_down());
    assert!(matches!(
        binding.node().width(),
        Err(LayoutError::NodeReleased)
    ));
    assert!(matches!(
        binding.node().set_height(1.0),
        Err(LayoutError::NodeReleased)
    ));
    let before = node_count();
    drop(binding);
    assert_eq!(node_count(), before);
}

#[test]
#[serial]
fn test_dropping_guard_tears_down() {
    let before = node_count();
    let binding = {
        let view = TestView::new();
        view.layout_binding().unwrap()
    };
    assert!(binding.is_torn_down());
    assert_eq!(node_count(), before);
}

#[test]
#[serial]
fn test_new_view_never_reuses_old_binding() {
    let old = ViewId::new();
    let old_binding = old.layout_binding().unwrap();
    old.remove();

    let new = TestView::new();
    let new_binding = new.layout_binding().unwrap();

    assert_ne!(old, new.id());
    assert!(!new_binding.is_torn_down());
    assert!(old_binding.is_torn_down());
    assert!(layout_binding(old).is_err());
}

#[test]
#[serial]
fn test_remove_during_configure() {
    let view = ViewId::new();
    let before = node_count();

    let result = view
        .configure_layout(|node| {
            node.set_width(10.0).unwrap();
            view.remove();
            node.set_height(20.0)
        })
        .unwrap();

    assert!(matches!(result, Err(LayoutError::NodeReleased)));
    assert_eq!(node_count(), before);
    assert!(!view.is_valid());
}

#[test]
#[serial]
fn test_remove_while_tree_is_borrowed() {
    let view = ViewId::new();
    let other = TestView::new();
    let other_binding = other.layout_binding().unwrap();
    let before = node_count();
    view.layout_binding().unwrap();

    let tree = flexbind::layout_tree();
    let solver = tree.borrow_mut();
    view.remove();
    assert!(matches!(
        other_binding.node().set_width(1.0),
        Err(LayoutError::TreeBusy)
    ));
    drop(solver);

    // the release went through with the next write to the tree
    other_binding.node().set_width(1.0).unwrap();
    assert_eq!(node_count(), before);
    assert!(!view.is_valid());
}
