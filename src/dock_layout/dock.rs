use super::DockLayout;
use super::error::DockError;
use super::host::DockHost;
use super::options::DockLayoutOptions;
use super::types::{ControlKind, DockState, PanelId, SplitPanel, WindowKey, WindowSlot};

impl<W: WindowKey> DockLayout<W> {
    /// Dock `window` into `panel`, as a tab (`DockFill`) or as a new panel split off one edge.
    ///
    /// Edge docks use [`DockLayoutOptions::default_split_ratio`]. Returns the panel that now
    /// holds `window`.
    ///
    /// # Errors
    /// [`DockError::InvalidDockState`] for anything but `DockFill` and the four edges, and the
    /// errors of [`Self::dock_window_with_ratio`].
    pub fn dock_window(
        &mut self,
        host: &mut impl DockHost<W>,
        panel: PanelId,
        state: DockState,
        window: W,
    ) -> Result<PanelId, DockError> {
        let ratio = self.options.default_split_ratio;
        self.dock_window_with_ratio(host, panel, state, window, ratio)
    }

    /// Like [`Self::dock_window`], with the fraction of `panel` given to the new side.
    ///
    /// A window docked elsewhere is undocked first. Filling a window into the panel that already
    /// holds it just selects it.
    ///
    /// # Errors
    /// - [`DockError::InvalidDockState`] / [`DockError::InvalidSplitRatio`] for bad arguments.
    /// - [`DockError::UnknownPanel`] for a stale `panel`.
    /// - [`DockError::DockOntoSelf`] if undocking `window` from its current place would remove
    ///   `panel`.
    pub fn dock_window_with_ratio(
        &mut self,
        host: &mut impl DockHost<W>,
        panel: PanelId,
        state: DockState,
        window: W,
        ratio: f32,
    ) -> Result<PanelId, DockError> {
        let directional = match state {
            DockState::DockFill => false,
            DockState::DockTop
            | DockState::DockLeft
            | DockState::DockBottom
            | DockState::DockRight => {
                DockLayoutOptions::validate_split_ratio(ratio)?;
                true
            }
            DockState::Unknown | DockState::Float | DockState::Hidden => {
                return Err(DockError::InvalidDockState(state));
            }
        };
        self.panel_checked(panel)?;

        if let Some(current) = self.window_panel(&window) {
            if current == panel && !directional {
                self.select_window(host, panel, &window)?;
                return Ok(panel);
            }

            if self.panel_checked(current)?.tab_count() == 1
                && let Some(removed) = self.removed_with_last_tab(current)
                && self.is_within(panel, removed)
            {
                return Err(DockError::DockOntoSelf(panel));
            }
            self.undock_window(host, current, &window)?;
        }

        if !directional {
            self.add_tab(host, panel, window)?;
            self.perform_layout();
            self.after_edit(format!("dock {panel:?} fill"));
            return Ok(panel);
        }

        let child = self.create_child_panel(panel, state, ratio)?;
        self.dock_window_with_ratio(host, child, DockState::DockFill, window, ratio)
    }

    /// Dock `window` relative to the panel holding `relative_to`, or to the master panel if
    /// `relative_to` isn't docked.
    ///
    /// # Errors
    /// See [`Self::dock_window_with_ratio`].
    pub fn dock_window_next_to(
        &mut self,
        host: &mut impl DockHost<W>,
        window: W,
        state: DockState,
        relative_to: &W,
        ratio: f32,
    ) -> Result<PanelId, DockError> {
        let target = self.window_panel(relative_to).unwrap_or(self.master);
        self.dock_window_with_ratio(host, target, state, window, ratio)
    }

    /// Append `window` as a tab. The first tab of a panel is always selected.
    pub(crate) fn add_tab(
        &mut self,
        host: &mut impl DockHost<W>,
        panel: PanelId,
        window: W,
    ) -> Result<(), DockError> {
        let auto_select = self.options.auto_select_new_tabs;
        let dock_panel = self.panel_mut(panel)?;
        dock_panel.tabs.push(window.clone());
        let index = dock_panel.tabs.len() - 1;
        let select = auto_select || dock_panel.selected.is_none();

        self.windows.insert(window, WindowSlot::Docked(panel));
        if select {
            self.show_tab(host, panel, Some(index));
        }
        Ok(())
    }

    /// Split a new, empty child panel off one edge of `parent`.
    ///
    /// The split takes the place of `parent`'s tabs proxy in the proxy's container. The new
    /// panel goes first for top/left and second for bottom/right, where the stored ratio is
    /// inverted so it always reads as the first slot's share.
    pub(crate) fn create_child_panel(
        &mut self,
        parent: PanelId,
        state: DockState,
        ratio: f32,
    ) -> Result<PanelId, DockError> {
        let (orientation, new_first) = state
            .split_placement()
            .ok_or(DockError::InvalidDockState(state))?;
        let ratio = DockLayoutOptions::validate_split_ratio(ratio)?;
        let stored_ratio = if new_first { ratio } else { 1.0 - ratio };

        let proxy = self.panel_checked(parent)?.tabs_proxy;
        let Some((proxy_parent, proxy_index)) = self.detach_control(proxy) else {
            unreachable!("tabs proxy of {parent:?} has no container");
        };

        let child = self.alloc_panel(Some(parent), None);
        let child_control = self.panel_checked(child)?.control;

        let slot1 = self.alloc_control(ControlKind::SplitSlot);
        let slot2 = self.alloc_control(ControlKind::SplitSlot);
        let split = self.alloc_control(ControlKind::Split(SplitPanel {
            orientation,
            ratio: stored_ratio,
            slots: [slot1, slot2],
        }));
        self.attach_control(slot1, split, 0);
        self.attach_control(slot2, split, 1);

        let (first, second) = if new_first {
            (child_control, proxy)
        } else {
            (proxy, child_control)
        };
        self.attach_control(first, slot1, 0);
        self.attach_control(second, slot2, 0);
        self.attach_control(split, proxy_parent, proxy_index);

        self.panel_mut(parent)?.child_panels.push(child);

        log::debug!(
            "split {parent:?} {state:?} ratio={ratio} -> child {child:?} in {split:?} \
             ({orientation:?})"
        );
        Ok(child)
    }
}
