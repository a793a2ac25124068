use egui::{Rect, Vec2};

use super::DockLayout;
use super::error::DockError;
use super::host::DockHost;
use super::types::{FloatingRoot, PanelId, RootKind, WindowKey, WindowSlot};

impl<W: WindowKey> DockLayout<W> {
    /// Take `window` out of wherever it is docked and give it a floating window of its own.
    ///
    /// The new floating root panel is placed on top of the other floating windows. Its size is
    /// clamped to [`super::DockLayoutOptions::min_floating_size`].
    ///
    /// # Errors
    /// Errors of [`Self::undock_window`] for the window's current panel.
    pub fn float_window(
        &mut self,
        host: &mut impl DockHost<W>,
        window: W,
        screen_rect: Rect,
    ) -> Result<PanelId, DockError> {
        if let Some(current) = self.window_panel(&window) {
            self.undock_window(host, current, &window)?;
        }

        let min = self.options.min_floating_size;
        let size = Vec2::new(
            screen_rect.width().max(min.x),
            screen_rect.height().max(min.y),
        );
        let screen_rect = Rect::from_min_size(screen_rect.min, size);

        let root = self.alloc_panel(None, Some(RootKind::Floating));
        self.floating.windows.insert(root, FloatingRoot { screen_rect });
        self.floating.bring_to_front(root);

        self.add_tab(host, root, window)?;
        self.perform_layout();
        self.after_edit(format!("float {root:?} at {screen_rect:?}"));
        Ok(root)
    }

    /// Undock `window` (if docked) and remember it as hidden.
    ///
    /// # Errors
    /// Errors of [`Self::undock_window`] for the window's current panel.
    pub fn hide_window(&mut self, host: &mut impl DockHost<W>, window: W) -> Result<(), DockError> {
        if let Some(current) = self.window_panel(&window) {
            self.undock_window(host, current, &window)?;
        }
        self.windows.insert(window, WindowSlot::Hidden);
        Ok(())
    }

    /// Floating root panels, back to front.
    pub fn floating_panels(&self) -> &[PanelId] {
        &self.floating.z_order
    }

    /// Raise a floating root above the others. Does nothing for other panels.
    pub fn bring_to_front(&mut self, panel: PanelId) {
        if self.floating.windows.contains_key(&panel) {
            self.floating.bring_to_front(panel);
        }
    }

    /// Move or resize the floating window of root `panel`.
    ///
    /// # Errors
    /// [`DockError::UnknownPanel`] if `panel` isn't a floating root.
    pub fn set_floating_rect(
        &mut self,
        panel: PanelId,
        screen_rect: Rect,
    ) -> Result<(), DockError> {
        let floating = self
            .floating
            .windows
            .get_mut(&panel)
            .ok_or(DockError::UnknownPanel(panel))?;
        floating.screen_rect = screen_rect;
        self.perform_layout();
        Ok(())
    }

    /// Drop an empty floating root and close its window.
    pub(crate) fn destroy_floating_root(&mut self, host: &mut impl DockHost<W>, panel: PanelId) {
        let Some(dock_panel) = self.panels.get(&panel) else {
            return;
        };
        debug_assert!(
            dock_panel.tabs.is_empty() && dock_panel.child_panels.is_empty(),
            "destroying non-empty floating root {panel:?}"
        );
        let control = dock_panel.control;

        self.remove_control_subtree(control);
        self.panels.remove(&panel);
        self.floating.remove(panel);
        host.floating_window_closed(panel);
        log::debug!("closed floating window of {panel:?}");
    }
}
