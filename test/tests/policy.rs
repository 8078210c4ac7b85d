//! Per-kind enablement of new bindings.

use flexbind::{layout_policy, set_layout_policy};
use flexbind_test::prelude::*;
use serial_test::serial;

fn with_policy(policy: LayoutPolicy, test: impl FnOnce()) {
    let previous = layout_policy();
    set_layout_policy(policy);
    test();
    set_layout_policy(previous);
}

#[test]
#[serial]
fn test_enabled_after_first_access() {
    with_policy(LayoutPolicy::default(), || {
        let view = TestView::with_kind("label");
        assert!(!is_layout_enabled(view.id()));
        layout_binding(view.id()).unwrap();
        assert!(is_layout_enabled(view.id()));
    });
}

#[test]
#[serial]
fn test_disabled_kind_stays_disabled() {
    with_policy(LayoutPolicy::default().with_kind("spacer", false), || {
        let spacer = TestView::with_kind("spacer");
        assert!(!is_layout_enabled(spacer.id()));
        let binding = layout_binding(spacer.id()).unwrap();
        assert!(!binding.is_enabled());
        assert!(!is_layout_enabled(spacer.id()));

        binding.set_enabled(true);
        assert!(is_layout_enabled(spacer.id()));
    });
}

#[test]
#[serial]
fn test_policy_from_json() {
    let policy =
        LayoutPolicy::from_json(r#"{ "default_enabled": false, "kinds": { "stack": true } }"#)
            .unwrap();
    with_policy(policy, || {
        let plain = TestView::new();
        let stack = TestView::with_kind("stack");
        plain.layout_binding().unwrap();
        stack.layout_binding().unwrap();
        assert!(!is_layout_enabled(plain.id()));
        assert!(is_layout_enabled(stack.id()));
    });
}

#[test]
#[serial]
fn test_policy_change_keeps_existing_bindings() {
    let view = TestView::new();
    with_policy(LayoutPolicy::new(true), || {
        view.layout_binding().unwrap();
    });
    with_policy(LayoutPolicy::new(false), || {
        assert!(is_layout_enabled(view.id()));
        let late = TestView::new();
        late.layout_binding().unwrap();
        assert!(!is_layout_enabled(late.id()));
    });
}

#[test]
#[serial]
fn test_included_in_layout_defaults_on() {
    let view = TestView::new();
    let binding = view.layout_binding().unwrap();
    assert!(binding.is_included_in_layout());
    binding.set_included_in_layout(false);
    assert!(!view.layout_binding().unwrap().is_included_in_layout());
}
