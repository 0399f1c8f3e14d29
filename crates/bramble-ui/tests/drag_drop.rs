//! Drag and drop through the input router.

use std::cell::RefCell;
use std::rc::Rc;

use bramble_core::math::Vec2;
use bramble_core::platform::CursorShape;
use bramble_core::{Color, Rect, Size};
use bramble_render::Painter;
use bramble_test_utils::{MockPlatform, RecordingRenderer, RenderCall};
use bramble_ui::{Behavior, Canvas, ControlId, MouseButton, Package, Skin};

type Log = Rc<RefCell<Vec<String>>>;

struct Source {
    log: Log,
}

impl Behavior for Source {
    fn render(&self, cx: &Canvas, id: ControlId, _skin: &dyn Skin, painter: &mut Painter) {
        painter.fill_rect(cx.control(id).unwrap().render_bounds(), Color::RED);
    }

    fn on_mouse_clicked(&self, _cx: &mut Canvas, _id: ControlId, _button: MouseButton, _pos: Vec2, down: bool) {
        self.log
            .borrow_mut()
            .push(format!("source:click:{}", if down { "down" } else { "up" }));
    }

    fn on_lost_mouse_focus(&self, _cx: &mut Canvas, _id: ControlId) {
        self.log.borrow_mut().push("source:lost_mouse".into());
    }

    fn drag_start(&self, cx: &mut Canvas, id: ControlId, package: &mut Package, pos: Vec2) {
        self.log.borrow_mut().push(format!("source:start:{}", package.name));
        package.hold_offset = cx.canvas_to_local(id, pos);
        package.draw_control = Some(id);
    }

    fn drag_end(&self, _cx: &mut Canvas, _id: ControlId, success: bool, _pos: Vec2) {
        self.log.borrow_mut().push(format!("source:end:{success}"));
    }
}

/// Accepts packages named `item` and records the drag hooks.
struct Target {
    log: Log,
}

impl Behavior for Target {
    fn on_mouse_clicked(&self, _cx: &mut Canvas, _id: ControlId, _button: MouseButton, _pos: Vec2, _down: bool) {
        self.log.borrow_mut().push("target:click".into());
    }

    fn drag_can_accept(&self, _cx: &Canvas, _id: ControlId, package: &Package) -> bool {
        package.is("item")
    }

    fn drag_handle_drop(&self, _cx: &mut Canvas, _id: ControlId, package: &Package, _pos: Vec2) -> bool {
        let value = package.user_data::<u32>().copied().unwrap_or_default();
        self.log.borrow_mut().push(format!("target:drop:{value}"));
        true
    }

    fn drag_hover_enter(&self, _cx: &mut Canvas, _id: ControlId, _package: &Package, _pos: Vec2) {
        self.log.borrow_mut().push("target:enter".into());
    }

    fn drag_hover_leave(&self, _cx: &mut Canvas, _id: ControlId, _package: &Package) {
        self.log.borrow_mut().push("target:leave".into());
    }

    fn drag_hover(&self, _cx: &mut Canvas, _id: ControlId, _package: &Package, pos: Vec2) {
        self.log.borrow_mut().push(format!("target:hover:{}", pos.x));
    }
}

/// Accepts anything and keeps the default drop, which reparents the source.
struct Bin;

impl Behavior for Bin {
    fn drag_can_accept(&self, _cx: &Canvas, _id: ControlId, _package: &Package) -> bool {
        true
    }
}

struct Scene {
    cx: Canvas,
    recorder: RecordingRenderer,
    platform: MockPlatform,
    log: Log,
    source: ControlId,
    target: ControlId,
    plain: ControlId,
}

impl Scene {
    fn new() -> Self {
        let recorder = RecordingRenderer::new();
        let mut cx = Canvas::new(recorder.clone());
        cx.resize(Size::new(300.0, 200.0));
        let platform = MockPlatform::new();
        cx.set_platform(platform.clone());
        let log = Log::default();
        let root = cx.root();

        let source = cx.create(Some(root), Source { log: log.clone() });
        cx.set_bounds(source, Rect::new(0.0, 0.0, 40.0, 40.0));
        cx.set_drag_package(source, Some(Package::new("item").with_user_data(7u32)));

        let target = cx.create(Some(root), Target { log: log.clone() });
        cx.set_bounds(target, Rect::new(100.0, 0.0, 50.0, 50.0));

        let plain = cx.create_panel(Some(root));
        cx.set_bounds(plain, Rect::new(200.0, 0.0, 50.0, 50.0));

        Self {
            cx,
            recorder,
            platform,
            log,
            source,
            target,
            plain,
        }
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.cx.input_mouse_moved(x, y, 0.0, 0.0);
    }

    fn button(&mut self, down: bool) {
        self.cx.input_mouse_button(MouseButton::Left, down);
    }

    fn take_log(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// Press on the source and pull it past the threshold.
    fn pick_up(&mut self) {
        self.move_to(12.0, 10.0);
        self.button(true);
        self.move_to(30.0, 10.0);
        assert!(self.cx.is_dragging());
        self.take_log();
    }
}

#[test]
fn test_small_movement_is_a_plain_click() {
    let mut s = Scene::new();
    s.move_to(10.0, 10.0);
    s.button(true);
    s.move_to(12.0, 11.0);
    s.button(false);

    assert!(!s.cx.is_dragging());
    assert_eq!(s.take_log(), ["source:click:down", "source:click:up"]);
}

#[test]
fn test_drag_and_drop_onto_accepting_target() {
    let mut s = Scene::new();
    s.move_to(12.0, 10.0);
    s.button(true);
    s.cx.capture_mouse(s.source);
    s.move_to(30.0, 10.0);

    assert_eq!(s.cx.drag_source(), Some(s.source));
    assert_eq!(s.cx.mouse_focus(), None);
    assert_eq!(
        s.take_log(),
        ["source:click:down", "source:lost_mouse", "source:start:item"]
    );
    let package = s.cx.current_drag_package().unwrap();
    assert_eq!(package.source, Some(s.source));
    assert_eq!(package.hold_offset, Vec2::new(12.0, 10.0));

    s.move_to(110.0, 10.0);
    s.move_to(115.0, 10.0);
    assert_eq!(s.cx.drag_hovered(), Some(s.target));
    assert_eq!(
        s.take_log(),
        ["target:enter", "target:hover:110", "target:hover:115"]
    );

    s.button(false);
    assert!(!s.cx.is_dragging());
    assert_eq!(s.cx.drag_source(), None);
    assert_eq!(
        s.take_log(),
        ["target:leave", "target:drop:7", "source:end:true"]
    );
}

#[test]
fn test_hover_enter_and_leave_fire_once() {
    let mut s = Scene::new();
    s.pick_up();

    s.move_to(105.0, 5.0);
    s.move_to(120.0, 20.0);
    s.move_to(140.0, 40.0);
    s.move_to(180.0, 40.0);
    s.move_to(181.0, 40.0);

    let log = s.take_log();
    assert_eq!(log.iter().filter(|e| *e == "target:enter").count(), 1);
    assert_eq!(log.iter().filter(|e| *e == "target:leave").count(), 1);
    assert_eq!(s.cx.drag_hovered(), None);
}

#[test]
fn test_refusing_controls_show_no_cursor() {
    let mut s = Scene::new();
    s.pick_up();

    let plain = s.cx.control(s.plain).unwrap().bounds();
    s.move_to(plain.x + 10.0, plain.y + 10.0);
    assert_eq!(s.platform.cursor_history().last(), Some(&CursorShape::No));
    assert_eq!(s.cx.drag_hovered(), None);

    s.move_to(110.0, 10.0);
    assert_eq!(s.platform.cursor(), Some(CursorShape::Arrow));
}

#[test]
fn test_target_accepts_only_known_packages() {
    let mut s = Scene::new();
    s.cx.set_drag_package(s.source, Some(Package::new("other")));
    s.pick_up();

    s.move_to(110.0, 10.0);
    assert_eq!(s.cx.drag_hovered(), None);
    assert!(!s.take_log().iter().any(|e| e.starts_with("target:")));
}

#[test]
fn test_drop_on_bare_canvas_fails() {
    let mut s = Scene::new();
    s.pick_up();

    s.move_to(290.0, 190.0);
    s.button(false);
    assert!(!s.cx.is_dragging());
    assert_eq!(s.take_log(), ["source:end:false"]);
}

#[test]
fn test_default_drop_reparents_source() {
    let mut s = Scene::new();
    let root = s.cx.root();
    let bin = s.cx.create(Some(root), Bin);
    s.cx.set_bounds(bin, Rect::new(0.0, 100.0, 80.0, 80.0));
    s.pick_up();

    s.move_to(10.0, 120.0);
    s.button(false);
    assert_eq!(s.cx.parent(s.source), Some(bin));
}

#[test]
fn test_deleting_source_cancels_drag() {
    let mut s = Scene::new();
    s.pick_up();
    s.move_to(110.0, 10.0);

    s.cx.dispose(s.source);
    assert!(!s.cx.is_dragging());
    assert_eq!(s.cx.drag_hovered(), None);

    s.move_to(115.0, 10.0);
    s.button(false);
    assert!(!s.take_log().iter().any(|e| e.contains("drop")));
}

#[test]
fn test_dragged_control_follows_cursor() {
    let mut s = Scene::new();
    s.pick_up();
    s.move_to(110.0, 10.0);
    s.cx.render_canvas().unwrap();

    let calls = s.recorder.calls();
    assert!(calls.contains(&RenderCall::FilledRect {
        rect: Rect::new(0.0, 0.0, 40.0, 40.0),
        color: Color::RED
    }));
    assert!(calls.contains(&RenderCall::FilledRect {
        rect: Rect::new(98.0, 0.0, 40.0, 40.0),
        color: Color::RED
    }));
}

#[test]
fn test_programmatic_drag() {
    let mut s = Scene::new();
    let source = s.source;
    assert!(s.cx.start_drag(source, Package::new("item"), Vec2::new(5.0, 5.0)));
    assert_eq!(s.take_log(), ["source:start:item"]);

    s.move_to(110.0, 10.0);
    s.button(false);
    let log = s.take_log();
    assert!(log.contains(&"target:drop:0".to_string()));
    assert_eq!(log.last().map(String::as_str), Some("source:end:true"));
}
