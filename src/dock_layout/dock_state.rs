use super::DockLayout;
use super::error::DockError;
use super::options::DockLayoutOptions;
use super::types::{ControlKind, DockState, PanelId, RootKind, WindowKey, WindowSlot};

impl<W: WindowKey> DockLayout<W> {
    /// Classify how `panel` is docked, from its place in the split tree.
    ///
    /// The ratio is the share of the split on `panel`'s side. Panels that aren't in a split
    /// (roots, stale handles) report [`DockState::Unknown`] with the default ratio.
    pub fn try_get_dock_state(&self, panel: PanelId) -> (DockState, f32) {
        match self.split_of_panel(panel) {
            Some((_, split, slot)) => {
                let ratio = if slot == 0 {
                    split.ratio
                } else {
                    1.0 - split.ratio
                };
                (DockState::from_split_slot(split.orientation, slot), ratio)
            }
            None => (DockState::Unknown, self.options.default_split_ratio),
        }
    }

    /// How `window` is docked right now.
    ///
    /// Windows of a floating root report `Float`, windows of the master panel `DockFill`, and
    /// windows the layout doesn't know `Unknown`.
    pub fn window_dock_state(&self, window: &W) -> DockState {
        match self.windows.get(window) {
            Some(WindowSlot::Hidden) => DockState::Hidden,
            Some(WindowSlot::Docked(panel)) => match self.panels.get(panel).and_then(|p| p.root) {
                Some(RootKind::Floating) => DockState::Float,
                Some(RootKind::Master) => DockState::DockFill,
                None => self.try_get_dock_state(*panel).0,
            },
            None => DockState::Unknown,
        }
    }

    /// Move the splitter next to `panel` so `panel`'s side gets `ratio` of the split.
    ///
    /// # Errors
    /// [`DockError::InvalidSplitRatio`] for a ratio outside `(0, 1)`,
    /// [`DockError::PanelNotInSplitter`] if `panel` has no split of its own.
    pub fn set_split_ratio(&mut self, panel: PanelId, ratio: f32) -> Result<(), DockError> {
        let ratio = DockLayoutOptions::validate_split_ratio(ratio)?;
        self.panel_checked(panel)?;
        let (split_id, _, slot) = self
            .split_of_panel(panel)
            .ok_or(DockError::PanelNotInSplitter(panel))?;

        if let Some(control) = self.controls.get_mut(&split_id)
            && let ControlKind::Split(split) = &mut control.kind
        {
            split.ratio = if slot == 0 { ratio } else { 1.0 - ratio };
        }
        self.perform_layout();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::NoopHost;
    use super::*;

    fn assert_state(actual: (DockState, f32), state: DockState, ratio: f32) {
        assert_eq!(actual.0, state);
        assert!(
            (actual.1 - ratio).abs() < 1e-6,
            "ratio {} != {ratio}",
            actual.1
        );
    }

    #[test]
    fn every_edge_reports_its_own_state_and_near_ratio() {
        let mut layout: DockLayout<u32> = DockLayout::default();
        let master = layout.master();
        let cases = [
            (DockState::DockTop, 0.2),
            (DockState::DockLeft, 0.3),
            (DockState::DockBottom, 0.4),
            (DockState::DockRight, 0.15),
        ];
        for (i, (state, ratio)) in cases.into_iter().enumerate() {
            let child = layout
                .dock_window_with_ratio(&mut NoopHost, master, state, i as u32, ratio)
                .unwrap();
            assert_state(layout.try_get_dock_state(child), state, ratio);
            assert_eq!(layout.window_dock_state(&(i as u32)), state);
        }
    }

    #[test]
    fn master_is_unknown_and_its_windows_fill() {
        let mut layout: DockLayout<u32> = DockLayout::default();
        let master = layout.master();
        layout
            .dock_window(&mut NoopHost, master, DockState::DockFill, 1)
            .unwrap();
        assert_state(layout.try_get_dock_state(master), DockState::Unknown, 0.5);
        assert_eq!(layout.window_dock_state(&1), DockState::DockFill);
        assert_eq!(layout.window_dock_state(&2), DockState::Unknown);
    }

    #[test]
    fn set_split_ratio_is_near_side() {
        let mut layout: DockLayout<u32> = DockLayout::default();
        let master = layout.master();
        let bottom = layout
            .dock_window(&mut NoopHost, master, DockState::DockBottom, 1)
            .unwrap();
        layout.set_split_ratio(bottom, 0.1).unwrap();
        assert_state(layout.try_get_dock_state(bottom), DockState::DockBottom, 0.1);

        assert_eq!(
            layout.set_split_ratio(master, 0.3),
            Err(DockError::PanelNotInSplitter(master))
        );
        assert_eq!(
            layout.set_split_ratio(bottom, 0.0),
            Err(DockError::InvalidSplitRatio(0.0))
        );
    }
}
