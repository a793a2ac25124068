use super::DockLayout;
use super::error::DockError;
use super::host::DockHost;
use super::types::{PanelId, TabSurface, WindowKey};

impl<W: WindowKey> DockLayout<W> {
    /// Select the tab at `index` of `panel`; `None` deselects.
    ///
    /// The previous tab's view is detached from the tab content slot, the new one attached,
    /// unlocked and focused. Selecting the current tab again does nothing.
    ///
    /// # Errors
    /// [`DockError::TabIndexOutOfRange`] if `index >= tab_count`, [`DockError::UnknownPanel`]
    /// for a stale `panel`.
    pub fn select_tab(
        &mut self,
        host: &mut impl DockHost<W>,
        panel: PanelId,
        index: Option<usize>,
    ) -> Result<(), DockError> {
        let dock_panel = self.panel_checked(panel)?;
        if let Some(index) = index
            && index >= dock_panel.tab_count()
        {
            return Err(DockError::TabIndexOutOfRange {
                panel,
                index,
                count: dock_panel.tab_count(),
            });
        }
        self.show_tab(host, panel, index);
        Ok(())
    }

    /// Select `window` in `panel`.
    ///
    /// A window that isn't a tab of `panel` resolves to "no tab", so the panel ends up with
    /// nothing selected.
    ///
    /// # Errors
    /// [`DockError::UnknownPanel`] for a stale `panel`.
    pub fn select_window(
        &mut self,
        host: &mut impl DockHost<W>,
        panel: PanelId,
        window: &W,
    ) -> Result<(), DockError> {
        let index = self.panel_checked(panel)?.tab_index(window);
        self.select_tab(host, panel, index)
    }

    /// Swap the view shown in `panel`'s tab content slot. `index` must be valid.
    pub(crate) fn show_tab(
        &mut self,
        host: &mut impl DockHost<W>,
        panel: PanelId,
        index: Option<usize>,
    ) {
        let Some(dock_panel) = self.panels.get_mut(&panel) else {
            return;
        };
        if dock_panel.selected == index {
            return;
        }

        if let TabSurface::Showing(old) = std::mem::take(&mut dock_panel.surface) {
            host.detach_view(panel, &old);
        }
        dock_panel.selected = index;

        if let Some(window) = index.and_then(|i| dock_panel.tabs.get(i)).cloned() {
            dock_panel.surface = TabSurface::Showing(window.clone());
            host.attach_view(panel, &window);
            host.unlock_content(&window);
            host.focus(&window);
        }
    }
}
