use std::path::Path;

use ahash::HashSet;
use egui::Rect;

use super::DockLayout;
use super::error::DockError;
use super::host::DockHost;
use super::options::DockLayoutOptions;
use super::types::{DockState, PanelId, WindowKey};

pub const LAYOUT_SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug)]
pub enum LayoutPersistenceError {
    UnsupportedVersion { found: u32, expected: u32 },
    RonSerialize(ron::Error),
    RonDeserialize(ron::error::SpannedError),
    Io(std::io::Error),
    Dock(DockError),
}

impl std::fmt::Display for LayoutPersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported layout snapshot version: {found} (expected {expected})"
                )
            }
            Self::RonSerialize(err) => write!(f, "ron serialize error: {err}"),
            Self::RonDeserialize(err) => write!(f, "ron deserialize error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Dock(err) => write!(f, "dock error while restoring layout: {err}"),
        }
    }
}

impl std::error::Error for LayoutPersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedVersion { .. } => None,
            Self::RonSerialize(err) => Some(err),
            Self::RonDeserialize(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Dock(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LayoutPersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ron::Error> for LayoutPersistenceError {
    fn from(err: ron::Error) -> Self {
        Self::RonSerialize(err)
    }
}

impl From<ron::error::SpannedError> for LayoutPersistenceError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::RonDeserialize(err)
    }
}

impl From<DockError> for LayoutPersistenceError {
    fn from(err: DockError) -> Self {
        Self::Dock(err)
    }
}

/// A saved dock layout. Windows are stored as ids chosen by the app, never as window values.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct LayoutSnapshot<WindowId> {
    pub version: u32,
    pub master: PanelSnapshot<WindowId>,
    pub floating: Vec<FloatingSnapshot<WindowId>>,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct PanelSnapshot<WindowId> {
    pub tabs: Vec<WindowId>,
    pub selected: Option<usize>,

    /// In creation order; replaying the docks in this order rebuilds the same nesting.
    pub children: Vec<ChildPanelSnapshot<WindowId>>,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct ChildPanelSnapshot<WindowId> {
    pub state: DockState,

    /// Near-side ratio, as reported by [`DockLayout::try_get_dock_state`].
    pub ratio: f32,

    pub panel: PanelSnapshot<WindowId>,
}

/// Floating roots are stored back to front.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct FloatingSnapshot<WindowId> {
    pub screen_rect: Rect,
    pub panel: PanelSnapshot<WindowId>,
}

/// A snapshot panel with its windows resolved, ready to be replayed.
struct ResolvedPanel<W> {
    tabs: Vec<W>,
    selected: Option<usize>,
    children: Vec<(DockState, f32, ResolvedPanel<W>)>,
}

/// A resolved panel waiting for its remaining tabs and children during restore.
struct PendingPanel<W> {
    panel: PanelId,
    tabs: Vec<W>,
    selected: Option<usize>,
    children: Vec<(DockState, f32, ResolvedPanel<W>)>,
}

/// Resolves window ids and drops everything the replay could not rebuild.
///
/// A window keeps only its first occurrence. Children with a non-edge state, an invalid ratio or
/// no remaining window are skipped together with their subtree.
fn resolve_panel<W: WindowKey, WindowId>(
    snapshot: PanelSnapshot<WindowId>,
    id_to_window: &mut impl FnMut(WindowId) -> Option<W>,
    seen: &mut HashSet<W>,
) -> ResolvedPanel<W> {
    let tabs = snapshot
        .tabs
        .into_iter()
        .filter_map(&mut *id_to_window)
        .filter(|window| seen.insert(window.clone()))
        .collect();

    let mut children = Vec::with_capacity(snapshot.children.len());
    for child in snapshot.children {
        if !child.state.is_directional() {
            log::warn!("dropping child panel with non-edge state {:?}", child.state);
            continue;
        }
        if let Err(err) = DockLayoutOptions::validate_split_ratio(child.ratio) {
            log::warn!("dropping {:?} child panel: {err}", child.state);
            continue;
        }
        let resolved = resolve_panel(child.panel, id_to_window, seen);
        if resolved.tabs.is_empty() {
            log::warn!(
                "dropping {:?} child panel: none of its windows exist",
                child.state
            );
            continue;
        }
        children.push((child.state, child.ratio, resolved));
    }

    ResolvedPanel {
        tabs,
        selected: snapshot.selected,
        children,
    }
}

fn pretty_ron_config() -> ron::ser::PrettyConfig {
    ron::ser::PrettyConfig::new()
        .depth_limit(32)
        .separate_tuple_members(true)
        .enumerate_arrays(false)
}

impl<W: WindowKey> DockLayout<W> {
    /// Capture the layout of the master panel and every floating root.
    ///
    /// Hidden windows aren't part of the snapshot.
    pub fn snapshot_layout<WindowId>(
        &self,
        mut window_to_id: impl FnMut(&W) -> WindowId,
    ) -> LayoutSnapshot<WindowId> {
        let master = self.snapshot_panel(self.master, &mut window_to_id);
        let floating = self
            .floating
            .z_order
            .iter()
            .filter_map(|&root| {
                Some(FloatingSnapshot {
                    screen_rect: self.root_screen_rect(root)?,
                    panel: self.snapshot_panel(root, &mut window_to_id),
                })
            })
            .collect();

        LayoutSnapshot {
            version: LAYOUT_SNAPSHOT_VERSION,
            master,
            floating,
        }
    }

    fn snapshot_panel<WindowId>(
        &self,
        panel: PanelId,
        window_to_id: &mut impl FnMut(&W) -> WindowId,
    ) -> PanelSnapshot<WindowId> {
        let Some(dock_panel) = self.panels.get(&panel) else {
            return PanelSnapshot {
                tabs: Vec::new(),
                selected: None,
                children: Vec::new(),
            };
        };
        let children = dock_panel
            .child_panels
            .iter()
            .map(|&child| {
                let (state, ratio) = self.try_get_dock_state(child);
                ChildPanelSnapshot {
                    state,
                    ratio,
                    panel: self.snapshot_panel(child, window_to_id),
                }
            })
            .collect();

        PanelSnapshot {
            tabs: dock_panel.tabs.iter().map(&mut *window_to_id).collect(),
            selected: dock_panel.selected,
            children,
        }
    }

    /// Replace the whole layout with `snapshot`.
    ///
    /// `id_to_window` may return `None` for windows that no longer exist: they are dropped, and a
    /// child panel left without any window is skipped together with everything split off it.
    /// Windows listed more than once keep their first place. Child panels with a non-edge state
    /// or an out-of-range ratio are skipped with their subtree.
    ///
    /// # Errors
    /// [`LayoutPersistenceError::UnsupportedVersion`] before anything is changed, or
    /// [`LayoutPersistenceError::Dock`] if replaying a dock fails.
    pub fn load_layout_snapshot<WindowId>(
        &mut self,
        host: &mut impl DockHost<W>,
        snapshot: LayoutSnapshot<WindowId>,
        mut id_to_window: impl FnMut(WindowId) -> Option<W>,
    ) -> Result<(), LayoutPersistenceError> {
        if snapshot.version != LAYOUT_SNAPSHOT_VERSION {
            return Err(LayoutPersistenceError::UnsupportedVersion {
                found: snapshot.version,
                expected: LAYOUT_SNAPSHOT_VERSION,
            });
        }

        // Everything that could make the replay fail is filtered out here, before the current
        // layout is cleared.
        let mut seen = HashSet::default();
        let master = resolve_panel(snapshot.master, &mut id_to_window, &mut seen);
        let mut floating = Vec::with_capacity(snapshot.floating.len());
        for root in snapshot.floating {
            let resolved = resolve_panel(root.panel, &mut id_to_window, &mut seen);
            if resolved.tabs.is_empty() {
                log::warn!(
                    "dropping floating window at {:?}: none of its windows exist",
                    root.screen_rect
                );
                continue;
            }
            floating.push((root.screen_rect, resolved));
        }

        self.clear(host);

        let mut pending = vec![PendingPanel {
            panel: self.master,
            tabs: master.tabs,
            selected: master.selected,
            children: master.children,
        }];
        for (screen_rect, resolved) in floating {
            let mut tabs = resolved.tabs.into_iter();
            let Some(first) = tabs.next() else {
                continue;
            };
            let root = self.float_window(host, first, screen_rect)?;
            pending.push(PendingPanel {
                panel: root,
                tabs: tabs.collect(),
                selected: resolved.selected,
                children: resolved.children,
            });
        }

        // Each panel gets its tabs, then its children in creation order; the children's own
        // content is handled when they come off the stack.
        while let Some(item) = pending.pop() {
            for window in item.tabs {
                self.dock_window(host, item.panel, DockState::DockFill, window)?;
            }
            let tab_count = self.panel_checked(item.panel)?.tab_count();
            let selected = item
                .selected
                .filter(|_| tab_count > 0)
                .map(|i| i.min(tab_count - 1));
            self.select_tab(host, item.panel, selected)?;

            for (state, ratio, child) in item.children {
                let mut tabs = child.tabs.into_iter();
                let Some(first) = tabs.next() else {
                    continue;
                };
                let child_panel =
                    self.dock_window_with_ratio(host, item.panel, state, first, ratio)?;
                pending.push(PendingPanel {
                    panel: child_panel,
                    tabs: tabs.collect(),
                    selected: child.selected,
                    children: child.children,
                });
            }
        }

        self.perform_layout();
        self.after_edit("load layout snapshot");
        Ok(())
    }

    /// # Errors
    /// RON serialization errors.
    pub fn snapshot_layout_to_ron_string<WindowId>(
        &self,
        window_to_id: impl FnMut(&W) -> WindowId,
    ) -> Result<String, LayoutPersistenceError>
    where
        WindowId: serde::Serialize,
    {
        let snapshot = self.snapshot_layout(window_to_id);
        Ok(ron::ser::to_string_pretty(&snapshot, pretty_ron_config())?)
    }

    /// # Errors
    /// RON parse errors, plus everything [`Self::load_layout_snapshot`] can return.
    pub fn load_layout_from_ron_str<WindowId>(
        &mut self,
        host: &mut impl DockHost<W>,
        source: &str,
        id_to_window: impl FnMut(WindowId) -> Option<W>,
    ) -> Result<(), LayoutPersistenceError>
    where
        WindowId: for<'de> serde::Deserialize<'de>,
    {
        let snapshot: LayoutSnapshot<WindowId> = ron::from_str(source)?;
        self.load_layout_snapshot(host, snapshot, id_to_window)
    }

    /// # Errors
    /// RON serialization and IO errors.
    pub fn save_layout_to_ron_file<WindowId>(
        &self,
        path: impl AsRef<Path>,
        window_to_id: impl FnMut(&W) -> WindowId,
    ) -> Result<(), LayoutPersistenceError>
    where
        WindowId: serde::Serialize,
    {
        let text = self.snapshot_layout_to_ron_string(window_to_id)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// # Errors
    /// IO errors, plus everything [`Self::load_layout_from_ron_str`] can return.
    pub fn load_layout_from_ron_file<WindowId>(
        &mut self,
        host: &mut impl DockHost<W>,
        path: impl AsRef<Path>,
        id_to_window: impl FnMut(WindowId) -> Option<W>,
    ) -> Result<(), LayoutPersistenceError>
    where
        WindowId: for<'de> serde::Deserialize<'de>,
    {
        let source = std::fs::read_to_string(path)?;
        self.load_layout_from_ron_str(host, &source, id_to_window)
    }
}
