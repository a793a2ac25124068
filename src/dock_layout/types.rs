use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

use egui::Rect;

/// Anything the host uses to identify a dock window (tab content).
///
/// The layout only stores keys: window lifetime is owned by the host's window registry.
pub trait WindowKey: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> WindowKey for T {}

/// Stable handle of a [`DockPanel`] inside a [`super::DockLayout`]. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PanelId(pub(crate) u64);

/// Stable handle of a [`Control`] inside a [`super::DockLayout`]. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlId(pub(crate) u64);

/// How a window is (or was) docked.
///
/// Only `Float` and `Hidden` are window states of their own; the directional variants are
/// derived from the panel's position in the split tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DockState {
    Unknown,
    Float,
    DockFill,
    DockTop,
    DockLeft,
    DockBottom,
    DockRight,
    Hidden,
}

impl DockState {
    /// True for the four edge docks.
    pub fn is_directional(self) -> bool {
        self.split_placement().is_some()
    }

    /// Splitter orientation for an edge dock, and whether the new panel takes the first slot.
    pub(crate) fn split_placement(self) -> Option<(Orientation, bool)> {
        match self {
            Self::DockTop => Some((Orientation::Vertical, true)),
            Self::DockBottom => Some((Orientation::Vertical, false)),
            Self::DockLeft => Some((Orientation::Horizontal, true)),
            Self::DockRight => Some((Orientation::Horizontal, false)),
            Self::Unknown | Self::Float | Self::DockFill | Self::Hidden => None,
        }
    }

    /// Inverse of [`Self::split_placement`].
    pub(crate) fn from_split_slot(orientation: Orientation, slot: usize) -> Self {
        match (orientation, slot) {
            (Orientation::Horizontal, 0) => Self::DockLeft,
            (Orientation::Vertical, 0) => Self::DockTop,
            (Orientation::Horizontal, _) => Self::DockRight,
            (Orientation::Vertical, _) => Self::DockBottom,
        }
    }
}

/// Split axis: `Horizontal` puts the slots side by side (left/right docks),
/// `Vertical` stacks them (top/bottom docks).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Which kind of tree root a panel is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootKind {
    /// The panel of the main editor window. Always exists and never collapses.
    Master,

    /// The panel of a floating window. Destroyed together with its window once empty.
    Floating,
}

/// What the shared tab content slot of a panel is currently showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TabSurface<W> {
    #[default]
    Empty,
    Showing(W),
}

/// A node of the panel tree: owns its tabs and the panels split off from it.
#[derive(Clone, Debug)]
pub struct DockPanel<W> {
    pub(crate) tabs: Vec<W>,
    pub(crate) selected: Option<usize>,
    pub(crate) child_panels: Vec<PanelId>,
    pub(crate) parent_panel: Option<PanelId>,
    pub(crate) control: ControlId,
    pub(crate) tabs_proxy: ControlId,
    pub(crate) surface: TabSurface<W>,
    pub(crate) root: Option<RootKind>,
}

impl<W: WindowKey> DockPanel<W> {
    pub fn tabs(&self) -> &[W] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tab(&self, index: usize) -> Option<&W> {
        self.tabs.get(index)
    }

    /// `None` means no tab is selected.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_tab(&self) -> Option<&W> {
        self.selected.and_then(|i| self.tabs.get(i))
    }

    pub fn tab_index(&self, window: &W) -> Option<usize> {
        self.tabs.iter().position(|w| w == window)
    }

    pub fn contains_tab(&self, window: &W) -> bool {
        self.tab_index(window).is_some()
    }

    /// Panels created by edge docks on this panel, in creation order.
    pub fn child_panels(&self) -> &[PanelId] {
        &self.child_panels
    }

    pub fn parent_panel(&self) -> Option<PanelId> {
        self.parent_panel
    }

    /// The container control representing this panel.
    pub fn control(&self) -> ControlId {
        self.control
    }

    /// The control hosting the selected tab's view.
    pub fn tabs_proxy(&self) -> ControlId {
        self.tabs_proxy
    }

    pub fn surface(&self) -> &TabSurface<W> {
        &self.surface
    }

    pub fn root_kind(&self) -> Option<RootKind> {
        self.root
    }

    pub fn is_master(&self) -> bool {
        self.root == Some(RootKind::Master)
    }

    pub fn is_floating(&self) -> bool {
        self.root == Some(RootKind::Floating)
    }

    /// Would removing the only tab of this panel remove the panel itself?
    pub(crate) fn vanishes_without_tabs(&self) -> bool {
        match self.root {
            Some(RootKind::Master) => false,
            Some(RootKind::Floating) => self.child_panels.is_empty(),
            None => true,
        }
    }
}

/// A two-slot container dividing its rect along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitPanel {
    pub orientation: Orientation,

    /// Fraction of the split given to the first slot, in `(0, 1)`.
    pub ratio: f32,

    pub slots: [ControlId; 2],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlKind {
    Panel(PanelId),
    TabsProxy(PanelId),
    Split(SplitPanel),
    SplitSlot,
}

/// A container in the visual tree. Rects are in the local space of the owning root window.
#[derive(Clone, Debug)]
pub struct Control {
    pub kind: ControlKind,
    pub parent: Option<ControlId>,
    pub children: Vec<ControlId>,
    pub rect: Rect,
}

impl Control {
    pub(crate) fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            rect: Rect::NOTHING,
        }
    }
}

/// Where the layout currently keeps a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WindowSlot {
    Docked(PanelId),
    Hidden,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct FloatingRoot {
    pub(crate) screen_rect: Rect,
}

#[derive(Debug, Default)]
pub(crate) struct FloatingManager {
    pub(crate) windows: BTreeMap<PanelId, FloatingRoot>,

    /// Back to front.
    pub(crate) z_order: Vec<PanelId>,
}

impl FloatingManager {
    pub(crate) fn bring_to_front(&mut self, id: PanelId) {
        self.z_order.retain(|&x| x != id);
        self.z_order.push(id);
    }

    pub(crate) fn remove(&mut self, id: PanelId) -> Option<FloatingRoot> {
        self.z_order.retain(|&x| x != id);
        self.windows.remove(&id)
    }
}
