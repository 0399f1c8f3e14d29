use bramble_core::Color;
use bramble_core::math::Vec2;

/// Tunables for a [`Canvas`](crate::Canvas).
///
/// Times are in seconds, distances in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Max interval between the two presses of a double click.
    pub double_click_time: f64,
    /// Max Manhattan distance between the two presses of a double click.
    pub double_click_distance: f32,
    /// Delay before a held key starts repeating.
    pub key_repeat_delay: f64,
    /// Interval between repeats once repeating.
    pub key_repeat_rate: f64,
    /// Manhattan distance a press must travel before it becomes a drag.
    pub drag_threshold: f32,
    /// Tooltip placement relative to the cursor.
    pub tooltip_offset: Vec2,
    /// Canvas scale factor handed to the renderer.
    pub scale: f32,
    /// Clear colour. `None` leaves the background untouched.
    pub background: Option<Color>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            double_click_time: 0.5,
            double_click_distance: 4.0,
            key_repeat_delay: 0.5,
            key_repeat_rate: 0.03,
            drag_threshold: 5.0,
            tooltip_offset: Vec2::new(12.0, 12.0),
            scale: 1.0,
            background: Some(Color::from_rgba_u8(150, 170, 170, 255)),
        }
    }
}
