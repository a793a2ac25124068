use std::collections::{BTreeMap, VecDeque};

use egui::{Pos2, Rect, Vec2};

mod controls;
mod debug;
mod dock;
mod dock_state;
mod error;
mod floating;
mod geometry;
mod host;
mod integrity;
mod options;
#[cfg(feature = "persistence")]
mod persistence;
mod select;
mod types;
mod undock;

#[cfg(test)]
mod dock_tests;

pub use error::DockError;
pub use host::{DockHost, NoopHost};
pub use options::DockLayoutOptions;
#[cfg(feature = "persistence")]
pub use persistence::{
    ChildPanelSnapshot, FloatingSnapshot, LAYOUT_SNAPSHOT_VERSION, LayoutPersistenceError,
    LayoutSnapshot, PanelSnapshot,
};
pub use types::{
    Control, ControlId, ControlKind, DockPanel, DockState, Orientation, PanelId, RootKind,
    SplitPanel, TabSurface, WindowKey,
};

use types::{FloatingManager, WindowSlot};

/// A dock layout: one master panel, any number of floating root panels, and the panels split
/// off from them.
///
/// Panels and the containers realizing them live in arenas keyed by stable handles;
/// parent/child relations are handle fields. All operations are synchronous tree edits meant
/// to run on the UI thread.
///
/// Structure:
/// - Every panel owns a `Panel` control holding its tabs proxy.
/// - An edge dock on panel `P` creates child panel `C` and a `Split` control that takes the place
///   of `P`'s tabs proxy; `C` and the proxy go into the two slots of the split.
/// - When `C` loses its last tab the split is removed again and the content of the other slot
///   moves back to where the split was.
#[derive(Debug)]
pub struct DockLayout<W> {
    pub options: DockLayoutOptions,

    panels: BTreeMap<PanelId, DockPanel<W>>,
    controls: BTreeMap<ControlId, Control>,
    windows: ahash::HashMap<W, WindowSlot>,

    master: PanelId,
    master_screen_rect: Rect,
    floating: FloatingManager,

    next_panel_id: u64,
    next_control_id: u64,

    debug_log: VecDeque<String>,
}

impl<W: WindowKey> Default for DockLayout<W> {
    fn default() -> Self {
        Self::new(DockLayoutOptions::default())
    }
}

impl<W: WindowKey> DockLayout<W> {
    pub fn new(options: DockLayoutOptions) -> Self {
        let mut layout = Self {
            options,
            panels: BTreeMap::new(),
            controls: BTreeMap::new(),
            windows: ahash::HashMap::default(),
            master: PanelId(0),
            master_screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(1280.0, 720.0)),
            floating: FloatingManager::default(),
            next_panel_id: 0,
            next_control_id: 0,
            debug_log: VecDeque::new(),
        };
        layout.master = layout.alloc_panel(None, Some(RootKind::Master));
        layout.perform_layout();
        layout
    }

    /// The root panel of the main window.
    pub fn master(&self) -> PanelId {
        self.master
    }

    pub fn panel(&self, id: PanelId) -> Option<&DockPanel<W>> {
        self.panels.get(&id)
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(&id)
    }

    /// All live panels, in creation order.
    pub fn panel_ids(&self) -> impl Iterator<Item = PanelId> + '_ {
        self.panels.keys().copied()
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Number of live split containers.
    pub fn split_count(&self) -> usize {
        self.controls
            .values()
            .filter(|c| matches!(c.kind, ControlKind::Split(_)))
            .count()
    }

    /// The panel `window` is a tab of, if it is docked anywhere.
    pub fn window_panel(&self, window: &W) -> Option<PanelId> {
        match self.windows.get(window) {
            Some(WindowSlot::Docked(panel)) => Some(*panel),
            Some(WindowSlot::Hidden) | None => None,
        }
    }

    /// Screen rect of the main window's dock area.
    pub fn master_screen_rect(&self) -> Rect {
        self.master_screen_rect
    }

    /// Move or resize the main window's dock area and lay everything out again.
    pub fn set_master_rect(&mut self, screen_rect: Rect) {
        self.master_screen_rect = screen_rect;
        self.perform_layout();
    }

    /// Drop every panel except the master and forget every window.
    ///
    /// Views currently shown are detached through `host`.
    pub fn clear(&mut self, host: &mut impl DockHost<W>) {
        for (&id, panel) in &self.panels {
            if let TabSurface::Showing(window) = &panel.surface {
                host.detach_view(id, window);
            }
            for window in &panel.tabs {
                host.window_undocked(window, id);
            }
        }
        for &id in self.floating.windows.keys() {
            host.floating_window_closed(id);
        }

        self.panels.clear();
        self.controls.clear();
        self.windows.clear();
        self.floating = FloatingManager::default();
        self.master = self.alloc_panel(None, Some(RootKind::Master));
        self.perform_layout();
        self.after_edit("clear".to_owned());
    }

    pub(crate) fn panel_checked(&self, id: PanelId) -> Result<&DockPanel<W>, DockError> {
        self.panels.get(&id).ok_or(DockError::UnknownPanel(id))
    }

    pub(crate) fn panel_mut(&mut self, id: PanelId) -> Result<&mut DockPanel<W>, DockError> {
        self.panels.get_mut(&id).ok_or(DockError::UnknownPanel(id))
    }

    /// Create a panel record with its `Panel` control and tabs proxy. The panel control is left
    /// without a parent.
    pub(crate) fn alloc_panel(
        &mut self,
        parent_panel: Option<PanelId>,
        root: Option<RootKind>,
    ) -> PanelId {
        let id = PanelId(self.next_panel_id);
        self.next_panel_id = self.next_panel_id.saturating_add(1);

        let control = self.alloc_control(ControlKind::Panel(id));
        let tabs_proxy = self.alloc_control(ControlKind::TabsProxy(id));
        self.attach_control(tabs_proxy, control, 0);

        self.panels.insert(
            id,
            DockPanel {
                tabs: Vec::new(),
                selected: None,
                child_panels: Vec::new(),
                parent_panel,
                control,
                tabs_proxy,
                surface: TabSurface::Empty,
                root,
            },
        );
        id
    }

    /// Walk `parent_panel` links up to the root panel of `panel`'s tree.
    pub(crate) fn root_of(&self, panel: PanelId) -> Option<PanelId> {
        let mut current = panel;
        loop {
            let p = self.panels.get(&current)?;
            match p.parent_panel {
                Some(parent) => current = parent,
                None => return Some(current),
            }
        }
    }

    /// Is `panel` equal to `ancestor` or nested anywhere below it?
    pub(crate) fn is_within(&self, panel: PanelId, ancestor: PanelId) -> bool {
        let mut current = Some(panel);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.panels.get(&id).and_then(|p| p.parent_panel);
        }
        false
    }

    /// The outermost panel that disappears when the only tab of `panel` is removed.
    pub(crate) fn removed_with_last_tab(&self, panel: PanelId) -> Option<PanelId> {
        let dock_panel = self.panels.get(&panel)?;
        if !dock_panel.vanishes_without_tabs() {
            return None;
        }
        if let Some(parent_id) = dock_panel.parent_panel
            && let Some(parent) = self.panels.get(&parent_id)
            && parent.is_floating()
            && parent.tabs.is_empty()
            && parent.child_panels.len() == 1
        {
            return Some(parent_id);
        }
        Some(panel)
    }

    /// Every panel strictly below `panel`, children before their parents.
    pub(crate) fn descendants_post_order(&self, panel: PanelId) -> Vec<PanelId> {
        let mut pre_order = Vec::new();
        let mut stack: Vec<PanelId> = self
            .panels
            .get(&panel)
            .map(|p| p.child_panels.clone())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            pre_order.push(id);
            if let Some(p) = self.panels.get(&id) {
                stack.extend(p.child_panels.iter().copied());
            }
        }
        pre_order.reverse();
        pre_order
    }

    /// Root panels: master first, then floating roots back to front.
    pub(crate) fn roots(&self) -> Vec<PanelId> {
        std::iter::once(self.master)
            .chain(self.floating.z_order.iter().copied())
            .collect()
    }
}
