#![forbid(unsafe_code)]

//! Docking layout for editor-style UIs: tabbed dock panels, edge splits, floating windows.
//!
//! [`DockLayout`] owns the panel tree; the host UI is reached through [`DockHost`].
//! [`DockBuilder`] scripts default layouts.

pub mod dock_builder;
pub mod dock_layout;

pub use dock_builder::{DockBuilder, DockNodeId, SplitDirection};
pub use dock_layout::{
    Control, ControlId, ControlKind, DockError, DockHost, DockLayout, DockLayoutOptions, DockPanel,
    DockState, NoopHost, Orientation, PanelId, RootKind, SplitPanel, TabSurface, WindowKey,
};

#[cfg(feature = "persistence")]
pub use dock_layout::{
    ChildPanelSnapshot, FloatingSnapshot, LAYOUT_SNAPSHOT_VERSION, LayoutPersistenceError,
    LayoutSnapshot, PanelSnapshot,
};
