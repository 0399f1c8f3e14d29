//! Render pipeline: traversal order, clip culling, cache-to-texture and
//! renderer bookkeeping.

use std::cell::Cell;
use std::rc::Rc;

use bramble_core::{Color, Pos, Rect, Size};
use bramble_render::Painter;
use bramble_test_utils::{PrimitiveKind, RecordingRenderer, RenderCall};
use bramble_ui::{Behavior, Canvas, CanvasConfig, ControlId, SimpleSkin, Skin, UiError};

/// Fills its bounds with one colour and counts how often it is laid out
/// and drawn.
struct Block {
    color: Color,
    layouts: Rc<Cell<u32>>,
    renders: Rc<Cell<u32>>,
}

impl Block {
    fn new(color: Color) -> Self {
        Self {
            color,
            layouts: Rc::default(),
            renders: Rc::default(),
        }
    }
}

impl Behavior for Block {
    fn layout(&self, _cx: &mut Canvas, _id: ControlId) {
        self.layouts.set(self.layouts.get() + 1);
    }

    fn render(&self, cx: &Canvas, id: ControlId, _skin: &dyn Skin, painter: &mut Painter) {
        self.renders.set(self.renders.get() + 1);
        painter.fill_rect(cx.control(id).unwrap().render_bounds(), self.color);
    }
}

fn block(cx: &mut Canvas, parent: ControlId, color: Color, bounds: Rect) -> ControlId {
    let id = cx.create(Some(parent), Block::new(color));
    cx.set_bounds(id, bounds);
    id
}

fn canvas(recorder: &RecordingRenderer) -> Canvas {
    let mut cx = Canvas::new(recorder.clone());
    cx.resize(Size::new(200.0, 100.0));
    cx
}

#[test]
fn test_children_draw_back_to_front() {
    let recorder = RecordingRenderer::new();
    let mut cx = canvas(&recorder);
    let root = cx.root();
    block(&mut cx, root, Color::RED, Rect::new(0.0, 0.0, 50.0, 50.0));
    block(&mut cx, root, Color::BLUE, Rect::new(25.0, 25.0, 50.0, 50.0));
    cx.render_canvas().unwrap();

    let colors: Vec<Color> = recorder.visible_frame().into_iter().map(|(_, _, c)| c).collect();
    assert_eq!(colors[1..], [Color::RED, Color::BLUE]);
}

#[test]
fn test_clipped_subtree_is_laid_out_but_not_drawn() {
    let recorder = RecordingRenderer::new();
    let mut cx = canvas(&recorder);
    let root = cx.root();
    let parent = block(&mut cx, root, Color::RED, Rect::new(0.0, 0.0, 50.0, 50.0));

    let outside = Block::new(Color::GREEN);
    let layouts = outside.layouts.clone();
    let renders = outside.renders.clone();
    let outside = cx.create(Some(parent), outside);
    cx.set_bounds(outside, Rect::new(60.0, 0.0, 10.0, 10.0));
    let nested = Block::new(Color::BLUE);
    let nested_renders = nested.renders.clone();
    cx.create(Some(outside), nested);

    cx.render_canvas().unwrap();

    assert_eq!(layouts.get(), 1);
    assert_eq!(renders.get(), 0);
    assert_eq!(nested_renders.get(), 0);
    // Background and the parent block only.
    assert_eq!(recorder.count_filled_rects(), 2);
}

#[test]
fn test_hidden_controls_are_not_drawn() {
    let recorder = RecordingRenderer::new();
    let mut cx = canvas(&recorder);
    let root = cx.root();
    let id = block(&mut cx, root, Color::RED, Rect::new(0.0, 0.0, 50.0, 50.0));
    cx.set_hidden(id, true);
    cx.render_canvas().unwrap();

    assert_eq!(recorder.count_filled_rects(), 1);
}

fn build_scene(cx: &mut Canvas) -> ControlId {
    let root = cx.root();
    let panel = block(cx, root, Color::RED, Rect::new(20.0, 20.0, 100.0, 60.0));
    cx.set_cache_to_texture(panel, true);

    let header = cx.create(Some(panel), Block::new(Color::GREEN));
    cx.set_size(header, Size::new(10.0, 10.0));
    cx.set_dock(header, Pos::TOP);
    let body = cx.create(Some(panel), Block::new(Color::BLUE));
    cx.set_dock(body, Pos::FILL);
    block(cx, panel, Color::WHITE, Rect::new(90.0, 50.0, 30.0, 30.0));

    block(cx, root, Color::BLACK, Rect::new(150.0, 10.0, 20.0, 20.0));
    panel
}

#[test]
fn test_cached_and_direct_rendering_match() {
    let direct = RecordingRenderer::new();
    let mut cx = canvas(&direct);
    build_scene(&mut cx);
    cx.render_canvas().unwrap();

    let cached = RecordingRenderer::with_cache_to_texture();
    let mut cx = canvas(&cached);
    build_scene(&mut cx);
    cx.render_canvas().unwrap();

    assert_eq!(direct.count_cache_setups(), 0);
    assert_eq!(cached.count_cache_setups(), 1);
    assert_eq!(cached.count_cached_draws(), 1);
    assert_eq!(direct.visible_frame(), cached.visible_frame());
    assert!(
        cached
            .visible_frame()
            .contains(&(PrimitiveKind::Fill, Rect::new(110.0, 70.0, 10.0, 10.0), Color::WHITE))
    );
}

#[test]
fn test_cached_surface_is_reused_until_dirty() {
    let recorder = RecordingRenderer::with_cache_to_texture();
    let mut cx = canvas(&recorder);
    let panel = build_scene(&mut cx);
    let header = cx.children(panel)[0];

    cx.render_canvas().unwrap();
    cx.render_canvas().unwrap();
    assert_eq!(recorder.count_cache_setups(), 1);
    assert_eq!(recorder.count_cached_draws(), 2);

    cx.redraw(header);
    cx.render_canvas().unwrap();
    assert_eq!(recorder.count_cache_setups(), 2);

    let body = cx.children(panel)[1];
    cx.invalidate(body);
    cx.render_canvas().unwrap();
    assert_eq!(recorder.count_cache_setups(), 3);

    cx.render_canvas().unwrap();
    assert_eq!(recorder.count_cache_setups(), 3);
    assert_eq!(recorder.count_cached_draws(), 5);
}

#[test]
fn test_nested_cache_roots_share_the_outer_surface() {
    let recorder = RecordingRenderer::with_cache_to_texture();
    let mut cx = canvas(&recorder);
    let panel = build_scene(&mut cx);
    let header = cx.children(panel)[0];
    cx.set_cache_to_texture(header, true);

    cx.render_canvas().unwrap();
    assert_eq!(recorder.count_cache_setups(), 1);
    assert_eq!(recorder.count_cached_draws(), 1);
}

#[test]
fn test_offscreen_cache_root_is_skipped() {
    let recorder = RecordingRenderer::with_cache_to_texture();
    let mut cx = canvas(&recorder);
    let root = cx.root();
    let panel = block(&mut cx, root, Color::RED, Rect::new(300.0, 0.0, 50.0, 50.0));
    cx.set_cache_to_texture(panel, true);
    cx.render_canvas().unwrap();

    assert_eq!(recorder.count_cache_setups(), 0);
    assert_eq!(recorder.count_cached_draws(), 0);
}

#[test]
fn test_cache_released_when_disabled_or_disposed() {
    let recorder = RecordingRenderer::with_cache_to_texture();
    let mut cx = canvas(&recorder);
    let root = cx.root();
    let first = block(&mut cx, root, Color::RED, Rect::new(0.0, 0.0, 20.0, 20.0));
    let second = block(&mut cx, root, Color::BLUE, Rect::new(30.0, 0.0, 20.0, 20.0));
    cx.set_cache_to_texture(first, true);
    cx.set_cache_to_texture(second, true);
    cx.render_canvas().unwrap();
    assert!(recorder.released_caches().is_empty());

    cx.set_cache_to_texture(first, false);
    cx.dispose(second);
    cx.render_canvas().unwrap();
    assert_eq!(recorder.released_caches(), vec![first.cache_key(), second.cache_key()]);
}

#[test]
fn test_missing_skin_is_an_error() {
    let recorder = RecordingRenderer::new();
    let mut cx = canvas(&recorder);
    let root = cx.root();
    cx.set_skin(None);

    assert_eq!(cx.render_canvas(), Err(UiError::MissingSkin { control: root }));
    assert_eq!(recorder.calls().last(), Some(&RenderCall::End));

    cx.set_control_skin(root, Some(Rc::new(SimpleSkin::new())));
    assert_eq!(cx.render_canvas(), Ok(()));
}

#[test]
fn test_scale_applies_to_output() {
    let recorder = RecordingRenderer::new();
    let config = CanvasConfig {
        scale: 2.0,
        ..CanvasConfig::default()
    };
    let mut cx = Canvas::with_config(recorder.clone(), config);
    cx.resize(Size::new(100.0, 50.0));
    let root = cx.root();
    block(&mut cx, root, Color::RED, Rect::new(10.0, 10.0, 10.0, 10.0));
    cx.render_canvas().unwrap();

    let calls = recorder.calls();
    assert!(calls.contains(&RenderCall::StartClip {
        clip: Rect::new(0.0, 0.0, 200.0, 100.0)
    }));
    assert!(calls.contains(&RenderCall::FilledRect {
        rect: Rect::new(20.0, 20.0, 20.0, 20.0),
        color: Color::RED
    }));
}

#[test]
fn test_focused_tabable_control_gets_highlight() {
    let recorder = RecordingRenderer::new();
    let mut cx = canvas(&recorder);
    let root = cx.root();
    let id = cx.create_panel(Some(root));
    cx.set_bounds(id, Rect::new(10.0, 10.0, 20.0, 20.0));
    cx.set_tabable(id, true);
    cx.set_keyboard_input_enabled(id, true);
    cx.focus(id);
    cx.render_canvas().unwrap();

    let outlined: Vec<Rect> = recorder
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            RenderCall::LinedRect { rect, .. } => Some(rect),
            _ => None,
        })
        .collect();
    assert_eq!(outlined, vec![Rect::new(13.0, 13.0, 14.0, 14.0)]);
}

#[test]
fn test_no_background_when_disabled() {
    let recorder = RecordingRenderer::new();
    let config = CanvasConfig {
        background: None,
        ..CanvasConfig::default()
    };
    let mut cx = Canvas::with_config(recorder.clone(), config);
    cx.resize(Size::new(10.0, 10.0));
    cx.render_canvas().unwrap();

    assert_eq!(recorder.count_filled_rects(), 0);
    assert_eq!(recorder.calls().first(), Some(&RenderCall::Begin));
}
