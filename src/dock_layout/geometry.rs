use egui::{Pos2, Rect, Vec2};

use super::DockLayout;
use super::error::DockError;
use super::host::DockHost;
use super::types::{ControlKind, DockState, Orientation, PanelId, RootKind, WindowKey};

/// Divide `rect` into the two slot rects of a split, leaving `splitter_size` between them.
pub(super) fn split_rects(
    rect: Rect,
    orientation: Orientation,
    ratio: f32,
    splitter_size: f32,
) -> (Rect, Rect) {
    match orientation {
        Orientation::Horizontal => {
            let available = (rect.width() - splitter_size).max(0.0);
            let first_width = available * ratio;
            let first = Rect::from_min_size(rect.min, Vec2::new(first_width, rect.height()));
            let second = Rect::from_min_max(
                Pos2::new(rect.min.x + first_width + splitter_size.min(rect.width()), rect.min.y),
                rect.max,
            );
            (first, second)
        }
        Orientation::Vertical => {
            let available = (rect.height() - splitter_size).max(0.0);
            let first_height = available * ratio;
            let first = Rect::from_min_size(rect.min, Vec2::new(rect.width(), first_height));
            let second = Rect::from_min_max(
                Pos2::new(rect.min.x, rect.min.y + first_height + splitter_size.min(rect.height())),
                rect.max,
            );
            (first, second)
        }
    }
}

impl<W: WindowKey> DockLayout<W> {
    /// Recompute the rect of every control, for every root.
    ///
    /// Rects are in the local space of the root's window: the root panel spans
    /// `(0, 0)..size` of its screen rect.
    pub fn perform_layout(&mut self) {
        let splitter_size = self.options.splitter_size;
        for root in self.roots() {
            let (Some(screen_rect), Some(panel)) =
                (self.root_screen_rect(root), self.panels.get(&root))
            else {
                continue;
            };
            let root_rect = Rect::from_min_size(Pos2::ZERO, screen_rect.size());
            let mut stack = vec![(panel.control, root_rect)];

            while let Some((id, rect)) = stack.pop() {
                let Some(control) = self.controls.get_mut(&id) else {
                    continue;
                };
                control.rect = rect;
                match control.kind {
                    ControlKind::Split(split) => {
                        let (first, second) =
                            split_rects(rect, split.orientation, split.ratio, splitter_size);
                        stack.push((split.slots[0], first));
                        stack.push((split.slots[1], second));
                    }
                    ControlKind::Panel(_) | ControlKind::TabsProxy(_) | ControlKind::SplitSlot => {
                        stack.extend(control.children.iter().map(|&child| (child, rect)));
                    }
                }
            }
        }
    }

    /// Screen rect of the window hosting the root panel `root`.
    pub(crate) fn root_screen_rect(&self, root: PanelId) -> Option<Rect> {
        match self.panels.get(&root)?.root? {
            RootKind::Master => Some(self.master_screen_rect),
            RootKind::Floating => self.floating.windows.get(&root).map(|f| f.screen_rect),
        }
    }

    /// Convert a screen position into the local space of the window owning `panel`.
    pub fn screen_to_local(&self, panel: PanelId, screen_pos: Pos2) -> Option<Pos2> {
        let origin = self.root_screen_rect(self.root_of(panel)?)?.min;
        Some(screen_pos - origin.to_vec2())
    }

    /// Convert a position in the local space of the window owning `panel` to the screen.
    pub fn local_to_screen(&self, panel: PanelId, local_pos: Pos2) -> Option<Pos2> {
        let origin = self.root_screen_rect(self.root_of(panel)?)?.min;
        Some(local_pos + origin.to_vec2())
    }

    /// Local bounds of `panel` as of the last layout pass.
    pub fn panel_rect(&self, panel: PanelId) -> Option<Rect> {
        let control = self.panels.get(&panel)?.control;
        self.controls.get(&control).map(|c| c.rect)
    }

    /// Screen bounds of `panel` as of the last layout pass.
    pub fn panel_screen_rect(&self, panel: PanelId) -> Option<Rect> {
        let rect = self.panel_rect(panel)?;
        let offset = self.root_screen_rect(self.root_of(panel)?)?.min.to_vec2();
        Some(rect.translate(offset))
    }

    /// Local rect available to the selected window's view: the tabs proxy minus the tab strip.
    pub fn tab_content_rect(&self, panel: PanelId) -> Option<Rect> {
        let proxy = self.panels.get(&panel)?.tabs_proxy;
        let rect = self.controls.get(&proxy)?.rect;
        let top = (rect.min.y + self.options.tab_strip_height).min(rect.max.y);
        Some(Rect::from_min_max(Pos2::new(rect.min.x, top), rect.max))
    }

    /// The innermost panel of `panel`'s subtree under `screen_pos`.
    ///
    /// Among child panels reporting a hit, the one with the smallest bounds wins (compared by
    /// squared diagonal). Without a child hit, `panel` itself is the result if the point lies in
    /// its own bounds.
    pub fn hit_test(&self, panel: PanelId, screen_pos: Pos2) -> Option<PanelId> {
        let dock_panel = self.panels.get(&panel)?;

        let child_hit = dock_panel
            .child_panels
            .iter()
            .filter_map(|&child| self.hit_test(child, screen_pos))
            .filter_map(|hit| Some((hit, self.panel_rect(hit)?.size().length_sq())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(hit, _metric)| hit);
        if child_hit.is_some() {
            return child_hit;
        }

        let local = self.screen_to_local(panel, screen_pos)?;
        self.panel_rect(panel)?.contains(local).then_some(panel)
    }

    /// Hit-test every root: floating windows front to back, then the master panel.
    pub fn hit_test_screen(&self, screen_pos: Pos2) -> Option<PanelId> {
        self.floating
            .z_order
            .iter()
            .rev()
            .find_map(|&root| self.hit_test(root, screen_pos))
            .or_else(|| self.hit_test(self.master, screen_pos))
    }

    /// Drop `window` at `screen_pos`: dock it into whatever panel is there.
    ///
    /// Returns `Ok(None)` when nothing is under the point.
    ///
    /// # Errors
    /// See [`Self::dock_window`].
    pub fn dock_window_at(
        &mut self,
        host: &mut impl DockHost<W>,
        screen_pos: Pos2,
        state: DockState,
        window: W,
    ) -> Result<Option<PanelId>, DockError> {
        let Some(target) = self.hit_test_screen(screen_pos) else {
            return Ok(None);
        };
        self.dock_window(host, target, state, window).map(Some)
    }
}
