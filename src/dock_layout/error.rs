use super::types::{DockState, PanelId};

/// Contract violations of the dock operations.
///
/// None of these are transient: the same call on the same layout fails the same way.
#[derive(Clone, Debug, PartialEq)]
pub enum DockError {
    /// Docking accepts only `DockFill` and the four edge states.
    InvalidDockState(DockState),

    /// Split ratios must be finite and strictly between 0 and 1.
    InvalidSplitRatio(f32),

    /// The window is not a tab of the panel.
    TabNotFound { panel: PanelId },

    /// Selecting an index outside `[None, tab_count)`.
    TabIndexOutOfRange {
        panel: PanelId,
        index: usize,
        count: usize,
    },

    /// A non-root panel that does not sit in a splitter slot.
    PanelNotInSplitter(PanelId),

    /// The dock would first have to collapse the target panel.
    DockOntoSelf(PanelId),

    /// Stale or foreign panel handle.
    UnknownPanel(PanelId),
}

impl std::fmt::Display for DockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDockState(state) => {
                write!(f, "cannot dock a window with state {state:?}")
            }
            Self::InvalidSplitRatio(ratio) => {
                write!(f, "split ratio {ratio} is outside (0, 1)")
            }
            Self::TabNotFound { panel } => write!(f, "window is not a tab of {panel:?}"),
            Self::TabIndexOutOfRange {
                panel,
                index,
                count,
            } => write!(
                f,
                "tab index {index} out of range for {panel:?} with {count} tabs"
            ),
            Self::PanelNotInSplitter(panel) => {
                write!(f, "{panel:?} is neither a root panel nor inside a splitter")
            }
            Self::DockOntoSelf(panel) => {
                write!(f, "docking would collapse the target panel {panel:?}")
            }
            Self::UnknownPanel(panel) => write!(f, "unknown dock panel {panel:?}"),
        }
    }
}

impl std::error::Error for DockError {}
