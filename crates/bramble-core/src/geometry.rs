//! Geometry value types shared by every layer of the toolkit.
//!
//! All coordinates are logical pixels stored as `f32`.

use crate::math::Vec2;
use bitflags::bitflags;

/// An axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle of the given size at the origin.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Intersection of two rectangles. Disjoint inputs yield a zero-sized
    /// rectangle anchored at the clamped corner.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Move the rectangle by `offset`.
    pub fn translate(&self, offset: Vec2) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Shrink inwards by `edges`. The size never goes negative.
    pub fn shrink(&self, edges: Edges) -> Rect {
        Rect::new(
            self.x + edges.left,
            self.y + edges.top,
            (self.width - edges.horizontal()).max(0.0),
            (self.height - edges.vertical()).max(0.0),
        )
    }

    /// Grow outwards by `edges`.
    pub fn expand(&self, edges: Edges) -> Rect {
        Rect::new(
            self.x - edges.left,
            self.y - edges.top,
            self.width + edges.horizontal(),
            self.height + edges.vertical(),
        )
    }

    pub fn scale(&self, factor: f32) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    /// Position a rectangle of `size` inside `self` according to `pos`.
    ///
    /// Flags that do not describe an alignment are ignored; an axis without
    /// a flag keeps the top/left edge.
    pub fn align(&self, size: Size, pos: Pos) -> Rect {
        let mut x = self.x;
        let mut y = self.y;
        if pos.contains(Pos::RIGHT) {
            x = self.right() - size.width;
        } else if pos.contains(Pos::CENTER_H) {
            x = self.x + (self.width - size.width) * 0.5;
        }
        if pos.contains(Pos::BOTTOM) {
            y = self.bottom() - size.height;
        } else if pos.contains(Pos::CENTER_V) {
            y = self.y + (self.height - size.height) * 0.5;
        }
        Rect::new(x, y, size.width, size.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }

    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    pub fn min(self, other: Size) -> Size {
        Size::new(self.width.min(other.width), self.height.min(other.height))
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl From<Vec2> for Size {
    fn from(v: Vec2) -> Self {
        Size::new(v.x, v.y)
    }
}

/// Per-edge insets used for margins and paddings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

pub type Margin = Edges;
pub type Padding = Edges;

impl Edges {
    pub const ZERO: Edges = Edges::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Sum of the left and right insets.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

bitflags! {
    /// Alignment and docking flags.
    ///
    /// The same flag set serves both purposes: `Rect::align` reads the
    /// alignment bits, the dock layout reads `LEFT/RIGHT/TOP/BOTTOM/FILL`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Pos: u32 {
        const NONE = 0;
        const LEFT = 1 << 1;
        const RIGHT = 1 << 2;
        const TOP = 1 << 3;
        const BOTTOM = 1 << 4;
        const CENTER_V = 1 << 5;
        const CENTER_H = 1 << 6;
        const FILL = 1 << 7;
        const CENTER = Self::CENTER_V.bits() | Self::CENTER_H.bits();
    }
}
