use super::DockLayout;
use super::error::DockError;
use super::host::DockHost;
use super::types::{PanelId, RootKind, WindowKey};

impl<W: WindowKey> DockLayout<W> {
    /// Remove `window` from the tabs of `panel`.
    ///
    /// If it was selected, the tab before it becomes selected (the new first tab when it was the
    /// first one). A non-root panel losing its last tab collapses: its split is removed and the
    /// other side takes the split's place again.
    ///
    /// # Errors
    /// - [`DockError::TabNotFound`] if `window` isn't a tab of `panel`.
    /// - [`DockError::PanelNotInSplitter`] if `panel` would have to collapse but isn't inside a
    ///   split. Nothing is changed in that case.
    pub fn undock_window(
        &mut self,
        host: &mut impl DockHost<W>,
        panel: PanelId,
        window: &W,
    ) -> Result<(), DockError> {
        let dock_panel = self.panel_checked(panel)?;
        let index = dock_panel
            .tab_index(window)
            .ok_or(DockError::TabNotFound { panel })?;
        if dock_panel.tab_count() == 1 {
            self.check_can_collapse(panel)?;
        }

        self.remove_tab_at(host, panel, index);

        if self.panel_checked(panel)?.tabs.is_empty() {
            self.on_last_tab_removed(host, panel);
        } else {
            self.perform_layout();
        }
        self.after_edit(format!("undock {window:?} from {panel:?}"));
        Ok(())
    }

    /// Undock every tab of `panel`, last to first.
    ///
    /// # Errors
    /// [`DockError::PanelNotInSplitter`] if `panel` would have to collapse but can't.
    pub fn close_all(
        &mut self,
        host: &mut impl DockHost<W>,
        panel: PanelId,
    ) -> Result<(), DockError> {
        if self.panel_checked(panel)?.tabs.is_empty() {
            return Ok(());
        }
        self.check_can_collapse(panel)?;
        while let Some(window) = self
            .panels
            .get(&panel)
            .and_then(|p| p.tabs.last())
            .cloned()
        {
            self.undock_window(host, panel, &window)?;
        }
        Ok(())
    }

    /// Every non-root panel must sit in a slot of exactly one split.
    fn check_can_collapse(&self, panel: PanelId) -> Result<(), DockError> {
        let dock_panel = self.panel_checked(panel)?;
        if dock_panel.root.is_some() || self.split_of_panel(panel).is_some() {
            Ok(())
        } else {
            Err(DockError::PanelNotInSplitter(panel))
        }
    }

    fn remove_tab_at(&mut self, host: &mut impl DockHost<W>, panel: PanelId, index: usize) {
        let Some(dock_panel) = self.panels.get(&panel) else {
            return;
        };
        let remaining = dock_panel.tab_count() - 1;

        if dock_panel.selected == Some(index) {
            let next = (remaining > 0).then(|| index.saturating_sub(1));
            self.show_tab(host, panel, None);
            let window = self.take_tab(host, panel, index);
            self.show_tab(host, panel, next);
            log::trace!("removed selected tab {window:?}, now selecting {next:?}");
        } else {
            self.take_tab(host, panel, index);
            if let Some(dock_panel) = self.panels.get_mut(&panel)
                && let Some(selected) = dock_panel.selected
                && selected > index
            {
                dock_panel.selected = Some(selected - 1);
            }
        }
    }

    /// Remove the tab at `index` and forget where its window was docked.
    fn take_tab(&mut self, host: &mut impl DockHost<W>, panel: PanelId, index: usize) -> Option<W> {
        let window = self.panels.get_mut(&panel)?.tabs.remove(index);
        self.windows.remove(&window);
        host.window_undocked(&window, panel);
        Some(window)
    }

    pub(crate) fn on_last_tab_removed(&mut self, host: &mut impl DockHost<W>, panel: PanelId) {
        let Some(dock_panel) = self.panels.get(&panel) else {
            return;
        };
        match dock_panel.root {
            Some(RootKind::Master) => self.perform_layout(),
            Some(RootKind::Floating) => {
                if dock_panel.child_panels.is_empty() {
                    self.destroy_floating_root(host, panel);
                } else {
                    self.perform_layout();
                }
            }
            None => self.collapse_panel(host, panel),
        }
    }

    /// Tear down `panel` and everything split off it.
    ///
    /// Descendants go first (deepest first, no recursion), each losing all of its tabs before its
    /// split is dissolved.
    fn collapse_panel(&mut self, host: &mut impl DockHost<W>, panel: PanelId) {
        for descendant in self.descendants_post_order(panel) {
            self.force_close_tabs(host, descendant);
            self.dissolve_split(descendant);
        }
        let parent = self.panels.get(&panel).and_then(|p| p.parent_panel);
        self.dissolve_split(panel);

        if let Some(parent) = parent
            && let Some(parent_panel) = self.panels.get(&parent)
            && parent_panel.is_floating()
            && parent_panel.tabs.is_empty()
            && parent_panel.child_panels.is_empty()
        {
            self.destroy_floating_root(host, parent);
        }
        self.perform_layout();
    }

    fn force_close_tabs(&mut self, host: &mut impl DockHost<W>, panel: PanelId) {
        self.show_tab(host, panel, None);
        let tabs = self
            .panels
            .get_mut(&panel)
            .map(|p| std::mem::take(&mut p.tabs))
            .unwrap_or_default();
        for window in tabs {
            self.windows.remove(&window);
            host.window_undocked(&window, panel);
        }
    }

    /// Remove the split holding `panel` and put the other slot's content where the split was.
    ///
    /// Disposes the split, both slots, the panel's controls and the panel record.
    fn dissolve_split(&mut self, panel: PanelId) {
        let Some((split_id, split, slot_index)) = self.split_of_panel(panel) else {
            unreachable!("collapsing {panel:?} which is not inside a split");
        };
        let other_slot = split.slots[1 - slot_index];
        let Some((split_parent, split_index)) = self.detach_control(split_id) else {
            unreachable!("split {split_id:?} has no container");
        };

        let expected = self
            .controls
            .get(&other_slot)
            .map_or(0, |c| c.children.len());
        let mut moved = 0;
        // Last to first, each inserted at the split's former index: keeps the original order.
        while let Some(item) = self
            .controls
            .get_mut(&other_slot)
            .and_then(|slot| slot.children.pop())
        {
            if let Some(control) = self.controls.get_mut(&item) {
                control.parent = None;
            }
            self.attach_control(item, split_parent, split_index);
            moved += 1;
        }
        let left_over = self
            .controls
            .get(&other_slot)
            .map_or(0, |c| c.children.len());
        assert!(
            left_over == 0 && moved == expected,
            "dissolving {split_id:?}: moved {moved} of {expected} items, {left_over} left behind"
        );

        self.remove_control_subtree(split_id);

        if let Some(removed) = self.panels.remove(&panel) {
            debug_assert!(
                removed
                    .child_panels
                    .iter()
                    .all(|c| !self.panels.contains_key(c)),
                "dissolved {panel:?} while it still had live child panels"
            );
            if let Some(parent) = removed.parent_panel
                && let Some(parent_panel) = self.panels.get_mut(&parent)
            {
                parent_panel.child_panels.retain(|&c| c != panel);
            }
        }
        log::debug!("dissolved {split_id:?} of {panel:?}, moved {moved} items back");
    }
}
