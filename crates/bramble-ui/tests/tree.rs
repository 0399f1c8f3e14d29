//! Tree structure: reparenting, inner panels, z-order, lookup and hit tests.

use bramble_core::math::Vec2;
use bramble_core::{Rect, Size};
use bramble_test_utils::RecordingRenderer;
use bramble_ui::widgets::GroupPanel;
use bramble_ui::{Canvas, UiError};

fn canvas() -> Canvas {
    let mut cx = Canvas::new(RecordingRenderer::new());
    cx.resize(Size::new(200.0, 100.0));
    cx
}

#[test]
fn test_reparent_moves_between_child_lists() {
    let mut cx = canvas();
    let root = cx.root();
    let a = cx.create_panel(None);
    let b = cx.create_panel(Some(root));
    let c = cx.create_panel(Some(root));

    cx.set_parent(a, Some(b));
    assert_eq!(cx.children(b), &[a]);

    cx.set_parent(a, Some(c));
    assert!(cx.children(b).is_empty());
    assert_eq!(cx.children(c), &[a]);
    assert_eq!(cx.parent(a), Some(c));
    assert_eq!(cx.control(a).unwrap().actual_parent(), Some(c));
}

#[test]
fn test_reparent_to_same_parent_keeps_order() {
    let mut cx = canvas();
    let root = cx.root();
    let a = cx.create_panel(Some(root));
    let b = cx.create_panel(Some(root));

    cx.set_parent(a, Some(root));
    assert_eq!(cx.children(root), &[a, b]);
}

#[test]
fn test_reparent_refuses_cycles() {
    let mut cx = canvas();
    let root = cx.root();
    let outer = cx.create_panel(Some(root));
    let inner = cx.create_panel(Some(outer));

    cx.set_parent(outer, Some(inner));
    assert_eq!(cx.parent(outer), Some(root));
    cx.set_parent(outer, Some(outer));
    assert_eq!(cx.parent(outer), Some(root));
}

#[test]
fn test_inner_panel_stores_logical_children() {
    let mut cx = canvas();
    let root = cx.root();
    let group = GroupPanel::create(&mut cx, Some(root), "Title");
    let inner = cx.inner_panel(group).unwrap();

    let child = cx.create_panel(Some(group));

    assert_eq!(cx.parent(child), Some(group));
    assert_eq!(cx.control(child).unwrap().actual_parent(), Some(inner));
    assert_eq!(cx.children(group), &[child]);
    assert_eq!(cx.control(inner).unwrap().actual_children(), &[child]);
    assert_eq!(cx.control(group).unwrap().actual_children(), &[inner]);
    assert!(cx.is_child(group, child));
}

#[test]
fn test_remove_child_through_inner_panel() {
    let mut cx = canvas();
    let root = cx.root();
    let group = GroupPanel::create(&mut cx, Some(root), "Title");
    let inner = cx.inner_panel(group).unwrap();
    let child = cx.create_panel(Some(group));

    cx.remove_child(group, child, false);
    assert!(cx.children(group).is_empty());
    assert!(cx.control(inner).unwrap().actual_children().is_empty());
    assert_eq!(cx.parent(child), None);
    assert!(cx.contains(child));
}

#[test]
fn test_remove_child_through_nested_inner_panels() {
    let mut cx = canvas();
    let root = cx.root();
    let container = cx.create_panel(Some(root));
    let outer = cx.create_panel(Some(container));
    cx.set_inner_panel(container, outer).unwrap();
    let nested = cx.create_panel(Some(outer));
    cx.set_inner_panel(outer, nested).unwrap();

    let child = cx.create_panel(Some(container));
    assert_eq!(cx.parent(child), Some(container));
    assert_eq!(cx.control(child).unwrap().actual_parent(), Some(nested));

    cx.remove_child(container, child, false);
    assert_eq!(cx.parent(child), None);
    assert!(cx.children(container).is_empty());
    assert!(cx.control(nested).unwrap().actual_children().is_empty());
    assert!(cx.contains(child));

    let queued = cx.create_panel(Some(container));
    cx.remove_child(container, queued, true);
    assert!(cx.control(queued).unwrap().is_pending_delete());
    cx.do_think();
    assert!(!cx.contains(queued));
    assert!(cx.contains(nested));
}

#[test]
fn test_removing_inner_panel_queues_it_for_deletion() {
    let mut cx = canvas();
    let root = cx.root();
    let group = GroupPanel::create(&mut cx, Some(root), "Title");
    let inner = cx.inner_panel(group).unwrap();
    let child = cx.create_panel(Some(group));

    cx.remove_child(group, inner, false);
    assert_eq!(cx.inner_panel(group), None);
    assert!(cx.control(group).unwrap().actual_children().is_empty());
    assert!(cx.control(inner).unwrap().is_pending_delete());

    cx.do_think();
    assert!(!cx.contains(inner));
    assert!(!cx.contains(child));
}

#[test]
fn test_set_inner_panel_requires_direct_child() {
    let mut cx = canvas();
    let root = cx.root();
    let container = cx.create_panel(Some(root));
    let stranger = cx.create_panel(Some(root));

    assert_eq!(
        cx.set_inner_panel(container, stranger),
        Err(UiError::InvalidInnerPanel {
            container,
            panel: stranger
        })
    );

    let panel = cx.create_panel(Some(container));
    assert_eq!(cx.set_inner_panel(container, panel), Ok(()));
    let added = cx.create_panel(Some(container));
    assert_eq!(cx.control(added).unwrap().actual_parent(), Some(panel));
}

#[test]
fn test_z_order_changes() {
    let mut cx = canvas();
    let root = cx.root();
    let a = cx.create_panel(Some(root));
    let b = cx.create_panel(Some(root));
    let c = cx.create_panel(Some(root));

    cx.bring_to_front(a);
    assert_eq!(cx.children(root), &[b, c, a]);

    cx.send_to_back(a);
    assert_eq!(cx.children(root), &[a, b, c]);

    cx.bring_next_to_control(c, a, true);
    assert_eq!(cx.children(root), &[c, a, b]);

    cx.bring_next_to_control(c, a, false);
    assert_eq!(cx.children(root), &[a, c, b]);
}

#[test]
fn test_bring_to_front_is_noop_when_already_front() {
    let mut cx = canvas();
    let root = cx.root();
    let a = cx.create_panel(Some(root));
    let b = cx.create_panel(Some(root));
    cx.render_canvas().unwrap();
    assert!(!cx.control(root).unwrap().needs_layout());

    cx.bring_to_front(b);
    assert!(!cx.control(root).unwrap().needs_layout());
    assert!(!cx.control(b).unwrap().cache_dirty());

    cx.bring_to_front(a);
    assert!(cx.control(root).unwrap().needs_layout());
    assert_eq!(cx.children(root), &[b, a]);
}

#[test]
fn test_find_child_by_name() {
    let mut cx = canvas();
    let root = cx.root();
    let group = GroupPanel::create(&mut cx, Some(root), "Options");
    let field = cx.create_panel(Some(group));
    cx.set_name(field, "field");

    assert_eq!(cx.find_child_by_name(root, "field", false), None);
    assert_eq!(cx.find_child_by_name(root, "field", true), Some(field));
    assert_eq!(cx.find_child_by_name(group, "field", false), Some(field));
    assert_eq!(cx.find_child_by_name(root, "missing", true), None);
}

#[test]
fn test_hit_test_topmost_wins() {
    let mut cx = canvas();
    let root = cx.root();
    let back = cx.create_panel(Some(root));
    let front = cx.create_panel(Some(root));
    cx.set_bounds(back, Rect::new(0.0, 0.0, 50.0, 50.0));
    cx.set_bounds(front, Rect::new(25.0, 25.0, 50.0, 50.0));

    assert_eq!(cx.control_at(Vec2::new(30.0, 30.0)), Some(front));
    assert_eq!(cx.control_at(Vec2::new(10.0, 10.0)), Some(back));
    assert_eq!(cx.control_at(Vec2::new(150.0, 90.0)), Some(root));
    assert_eq!(cx.control_at(Vec2::new(250.0, 10.0)), None);
}

#[test]
fn test_hit_test_bounds_are_half_open() {
    let mut cx = canvas();
    let root = cx.root();
    let panel = cx.create_panel(Some(root));
    cx.set_bounds(panel, Rect::new(10.0, 10.0, 20.0, 20.0));

    assert_eq!(cx.control_at(Vec2::new(10.0, 10.0)), Some(panel));
    assert_eq!(cx.control_at(Vec2::new(29.5, 29.5)), Some(panel));
    assert_eq!(cx.control_at(Vec2::new(30.0, 30.0)), Some(root));
}

#[test]
fn test_hit_test_skips_hidden_and_mouse_disabled() {
    let mut cx = canvas();
    let root = cx.root();
    let parent = cx.create_panel(Some(root));
    let child = cx.create_panel(Some(parent));
    cx.set_bounds(parent, Rect::new(0.0, 0.0, 50.0, 50.0));
    cx.set_bounds(child, Rect::new(0.0, 0.0, 20.0, 20.0));

    cx.set_mouse_input_enabled(child, false);
    assert_eq!(cx.control_at(Vec2::new(5.0, 5.0)), Some(parent));

    cx.set_mouse_input_enabled(child, true);
    cx.set_hidden(parent, true);
    assert_eq!(cx.control_at(Vec2::new(5.0, 5.0)), Some(root));
}

#[test]
fn test_coordinates_include_inner_panel_offset() {
    let mut cx = canvas();
    let root = cx.root();
    let group = GroupPanel::create(&mut cx, Some(root), "Title");
    cx.set_bounds(group, Rect::new(10.0, 10.0, 100.0, 80.0));
    let child = cx.create_panel(Some(group));
    cx.set_bounds(child, Rect::new(1.0, 2.0, 5.0, 5.0));
    cx.do_think();

    // Inner panel sits 6px in and below the 12px title plus 3px.
    let inner = cx.inner_panel(group).unwrap();
    assert_eq!(cx.control(inner).unwrap().bounds(), Rect::new(6.0, 15.0, 88.0, 59.0));
    assert_eq!(cx.local_to_canvas(child, Vec2::ZERO), Vec2::new(17.0, 27.0));
    assert_eq!(cx.canvas_to_local(child, Vec2::new(20.0, 30.0)), Vec2::new(3.0, 3.0));
    assert_eq!(cx.control_at(Vec2::new(18.0, 28.0)), Some(child));
}

#[test]
fn test_visibility_follows_the_chain() {
    let mut cx = canvas();
    let root = cx.root();
    let parent = cx.create_panel(Some(root));
    let child = cx.create_panel(Some(parent));
    let detached = cx.create_panel(None);

    assert!(cx.is_visible(child));
    assert!(!cx.is_visible(detached));

    cx.set_hidden(parent, true);
    assert!(!cx.is_visible(child));
    assert!(!cx.is_hidden(child));
}
