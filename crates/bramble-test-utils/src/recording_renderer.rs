//! Renderer double that records calls and composites the frame.

use bramble_core::alloc::HashMap;
use bramble_core::math::Vec2;
use bramble_core::{Color, Rect, Size};
use bramble_render::{CacheKey, Font, Renderer, Texture};
use parking_lot::Mutex;
use std::sync::Arc;

/// Records a backend call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Begin,
    End,
    StartClip { clip: Rect },
    EndClip,
    FilledRect { rect: Rect, color: Color },
    LinedRect { rect: Rect, color: Color },
    TexturedRect { texture: String, rect: Rect },
    Text { text: String, pos: Vec2 },
    SetupCache { key: CacheKey, size: Size },
    FinishCache { key: CacheKey },
    DrawCached { key: CacheKey, dest: Rect },
    ReleaseCache { key: CacheKey },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveKind {
    Fill,
    Outline,
    Texture(String),
    Text(String),
}

/// A drawn primitive in screen space together with the clip it was drawn
/// under.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub rect: Rect,
    pub clip: Option<Rect>,
    pub color: Color,
}

impl Primitive {
    /// The part of the primitive that survives clipping, if any.
    pub fn visible(&self) -> Option<Rect> {
        let rect = match self.clip {
            Some(clip) => self.rect.intersect(&clip),
            None => self.rect,
        };
        (!rect.is_empty()).then_some(rect)
    }

    fn translated(&self, offset: Vec2, outer: Option<Rect>) -> Primitive {
        let clip = match (self.clip.map(|c| c.translate(offset)), outer) {
            (Some(a), Some(b)) => Some(a.intersect(&b)),
            (a, b) => a.or(b),
        };
        Primitive {
            kind: self.kind.clone(),
            rect: self.rect.translate(offset),
            clip,
            color: self.color,
        }
    }
}

#[derive(Debug, Default)]
struct RecorderState {
    calls: Vec<RenderCall>,
    cache_to_texture: bool,
    clip: Option<Rect>,
    target: Option<CacheKey>,
    surfaces: HashMap<CacheKey, Vec<Primitive>>,
    frame: Vec<Primitive>,
}

impl RecorderState {
    fn push(&mut self, kind: PrimitiveKind, rect: Rect, color: Color) {
        let primitive = Primitive {
            kind,
            rect,
            clip: self.clip,
            color,
        };
        match self.target {
            Some(key) => self.surfaces.entry(key).or_default().push(primitive),
            None => self.frame.push(primitive),
        }
    }
}

/// Recording [`Renderer`].
///
/// Text is measured as half the font size per character by the font size.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    state: Arc<Mutex<RecorderState>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that also implements the cache-to-texture entry points.
    pub fn with_cache_to_texture() -> Self {
        let recorder = Self::new();
        recorder.state.lock().cache_to_texture = true;
        recorder
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn count(&self, pred: impl Fn(&RenderCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|call| pred(call)).count()
    }

    pub fn count_filled_rects(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::FilledRect { .. }))
    }

    pub fn count_text(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::Text { .. }))
    }

    pub fn count_cache_setups(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::SetupCache { .. }))
    }

    pub fn count_cached_draws(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::DrawCached { .. }))
    }

    /// Keys passed to `release_cache_texture`, in call order.
    pub fn released_caches(&self) -> Vec<CacheKey> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::ReleaseCache { key } => Some(*key),
                _ => None,
            })
            .collect()
    }

    /// Strings passed to `render_text`, in call order.
    pub fn texts(&self) -> Vec<String> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Everything composited onto the screen since the last `begin`, with
    /// cached surfaces expanded at the place they were drawn.
    pub fn frame(&self) -> Vec<Primitive> {
        self.state.lock().frame.clone()
    }

    /// The visible part of each composited primitive, dropping those that
    /// were clipped away entirely.
    pub fn visible_frame(&self) -> Vec<(PrimitiveKind, Rect, Color)> {
        self.state
            .lock()
            .frame
            .iter()
            .filter_map(|p| p.visible().map(|rect| (p.kind.clone(), rect, p.color)))
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn begin(&mut self) {
        let mut state = self.state.lock();
        state.calls.push(RenderCall::Begin);
        state.frame.clear();
        state.clip = None;
    }

    fn end(&mut self) {
        self.state.lock().calls.push(RenderCall::End);
    }

    fn start_clip(&mut self, clip: Rect) {
        let mut state = self.state.lock();
        state.calls.push(RenderCall::StartClip { clip });
        state.clip = Some(clip);
    }

    fn end_clip(&mut self) {
        let mut state = self.state.lock();
        state.calls.push(RenderCall::EndClip);
        state.clip = None;
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Color) {
        let mut state = self.state.lock();
        state.calls.push(RenderCall::FilledRect { rect, color });
        state.push(PrimitiveKind::Fill, rect, color);
    }

    fn draw_lined_rect(&mut self, rect: Rect, color: Color) {
        let mut state = self.state.lock();
        state.calls.push(RenderCall::LinedRect { rect, color });
        state.push(PrimitiveKind::Outline, rect, color);
    }

    fn draw_textured_rect(&mut self, texture: &Texture, rect: Rect, _uv: [f32; 4], color: Color) {
        let mut state = self.state.lock();
        state.calls.push(RenderCall::TexturedRect {
            texture: texture.name.clone(),
            rect,
        });
        state.push(PrimitiveKind::Texture(texture.name.clone()), rect, color);
    }

    fn render_text(&mut self, font: &Font, pos: Vec2, text: &str, color: Color) {
        let size = self.measure_text(font, text);
        let mut state = self.state.lock();
        state.calls.push(RenderCall::Text {
            text: text.to_owned(),
            pos,
        });
        let rect = Rect::new(pos.x, pos.y, size.width, size.height);
        state.push(PrimitiveKind::Text(text.to_owned()), rect, color);
    }

    fn measure_text(&self, font: &Font, text: &str) -> Size {
        Size::new(text.chars().count() as f32 * font.size * 0.5, font.size)
    }

    fn supports_cache_to_texture(&self) -> bool {
        self.state.lock().cache_to_texture
    }

    fn setup_cache_texture(&mut self, key: CacheKey, size: Size) {
        let mut state = self.state.lock();
        state.calls.push(RenderCall::SetupCache { key, size });
        state.surfaces.insert(key, Vec::new());
        state.target = Some(key);
    }

    fn finish_cache_texture(&mut self, key: CacheKey) {
        let mut state = self.state.lock();
        state.calls.push(RenderCall::FinishCache { key });
        if state.target == Some(key) {
            state.target = None;
        }
    }

    fn draw_cached_texture(&mut self, key: CacheKey, dest: Rect) {
        let mut state = self.state.lock();
        state.calls.push(RenderCall::DrawCached { key, dest });
        let outer = Some(match state.clip {
            Some(clip) => clip.intersect(&dest),
            None => dest,
        });
        let composited: Vec<Primitive> = state
            .surfaces
            .get(&key)
            .map(|surface| {
                surface
                    .iter()
                    .map(|p| p.translated(dest.origin(), outer))
                    .collect()
            })
            .unwrap_or_default();
        let target = state.target;
        match target {
            Some(target) => state.surfaces.entry(target).or_default().extend(composited),
            None => state.frame.extend(composited),
        }
    }

    fn release_cache_texture(&mut self, key: CacheKey) {
        let mut state = self.state.lock();
        state.calls.push(RenderCall::ReleaseCache { key });
        state.surfaces.remove(&key);
    }
}
