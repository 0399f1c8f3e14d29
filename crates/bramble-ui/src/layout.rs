//! Dock layout.
//!
//! Each control carves the space left inside its padding: directional docks
//! take a strip from their edge in child order, then every `FILL` child gets
//! whatever remains. The remaining space is kept as the control's inner
//! bounds.

use crate::canvas::Canvas;
use crate::control::ControlId;
use bramble_core::profiling::profile_function;
use bramble_core::{Pos, Rect};

/// How a dock flag set is interpreted by the layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockSide {
    Top,
    Left,
    Right,
    Bottom,
    Fill,
}

impl DockSide {
    /// `FILL` anywhere in the set wins. Otherwise exactly one directional
    /// flag is required; anything else is not docked.
    pub fn from_pos(dock: Pos) -> Option<Self> {
        if dock.contains(Pos::FILL) {
            return Some(DockSide::Fill);
        }
        let directional = dock & (Pos::TOP | Pos::LEFT | Pos::RIGHT | Pos::BOTTOM);
        if directional == Pos::TOP {
            Some(DockSide::Top)
        } else if directional == Pos::LEFT {
            Some(DockSide::Left)
        } else if directional == Pos::RIGHT {
            Some(DockSide::Right)
        } else if directional == Pos::BOTTOM {
            Some(DockSide::Bottom)
        } else {
            None
        }
    }
}

impl Canvas {
    /// Lay out `id` and its subtree.
    pub(crate) fn recurse_layout(&mut self, id: ControlId) {
        profile_function!();
        let Some(control) = self.control(id) else {
            return;
        };
        if control.hidden {
            return;
        }

        if control.needs_layout() {
            if let Some(control) = self.control_mut(id) {
                control.dirty.remove(crate::dirty::DirtyFlags::LAYOUT);
            }
            if let Some(behavior) = self.behavior(id) {
                behavior.layout(self, id);
            }
        }

        let Some(control) = self.control(id) else {
            return;
        };
        let mut area = control.render_bounds.shrink(control.padding);
        let children = control.children.clone();
        let mut fill = Vec::new();

        for &child in &children {
            // A hook may have moved the child elsewhere.
            let Some(c) = self.control(child).filter(|c| c.actual_parent == Some(id)) else {
                continue;
            };
            if c.hidden {
                continue;
            }
            let m = c.margin;
            let size = c.bounds.size();
            match DockSide::from_pos(c.dock) {
                Some(DockSide::Fill) => {
                    fill.push(child);
                    continue;
                }
                Some(DockSide::Top) => {
                    self.set_bounds(
                        child,
                        Rect::new(area.x + m.left, area.y + m.top, area.width - m.horizontal(), size.height),
                    );
                    let consumed = size.height + m.vertical();
                    area.y += consumed;
                    area.height -= consumed;
                }
                Some(DockSide::Left) => {
                    self.set_bounds(
                        child,
                        Rect::new(area.x + m.left, area.y + m.top, size.width, area.height - m.vertical()),
                    );
                    let consumed = size.width + m.horizontal();
                    area.x += consumed;
                    area.width -= consumed;
                }
                Some(DockSide::Right) => {
                    self.set_bounds(
                        child,
                        Rect::new(
                            area.right() - size.width - m.right,
                            area.y + m.top,
                            size.width,
                            area.height - m.vertical(),
                        ),
                    );
                    area.width -= size.width + m.horizontal();
                }
                Some(DockSide::Bottom) => {
                    self.set_bounds(
                        child,
                        Rect::new(
                            area.x + m.left,
                            area.bottom() - size.height - m.bottom,
                            area.width - m.horizontal(),
                            size.height,
                        ),
                    );
                    area.height -= size.height + m.vertical();
                }
                None => {}
            }
            area.width = area.width.max(0.0);
            area.height = area.height.max(0.0);
            self.recurse_layout(child);
        }

        if let Some(control) = self.control_mut(id) {
            control.inner_bounds = area;
        }

        for child in fill {
            let Some(m) = self.control(child).map(|c| c.margin) else {
                continue;
            };
            self.set_bounds(
                child,
                Rect::new(
                    area.x + m.left,
                    area.y + m.top,
                    (area.width - m.horizontal()).max(0.0),
                    (area.height - m.vertical()).max(0.0),
                ),
            );
            self.recurse_layout(child);
        }

        if let Some(behavior) = self.behavior(id) {
            behavior.post_layout(self, id);
        }

        if self.track_tabs {
            self.register_tab(id);
        }
    }

    fn register_tab(&mut self, id: ControlId) {
        let Some(control) = self.control(id) else {
            return;
        };
        if control.tabable && !control.disabled {
            if self.first_tab.is_none() {
                self.first_tab = Some(id);
            }
            if self.next_tab.is_none() {
                self.next_tab = Some(id);
            }
        }
        if self.input.keyboard_focus == Some(id) {
            self.next_tab = None;
        }
    }
}
