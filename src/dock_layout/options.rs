use egui::Vec2;

use super::error::DockError;

/// Options for [`super::DockLayout`].
#[derive(Clone, Debug)]
pub struct DockLayoutOptions {
    /// Split ratio used by edge docks that don't specify one.
    ///
    /// Always read as "fraction given to the newly docked side".
    pub default_split_ratio: f32,

    /// Thickness (in points) of the splitter bar between the two slots of a split.
    pub splitter_size: f32,

    /// Height (in points) of the tab strip at the top of every tabs proxy.
    ///
    /// The selected window's view gets the rest of the proxy rect.
    pub tab_strip_height: f32,

    /// If true, every tab docked with `DockFill` becomes the selected tab.
    ///
    /// If false, only the first tab of an empty panel is selected automatically.
    pub auto_select_new_tabs: bool,

    /// Smallest size a floating window may be created with.
    pub min_floating_size: Vec2,

    /// Keep a short in-memory log of structural edits (see [`super::DockLayout::debug_log_lines`]).
    pub debug_event_log: bool,

    /// Maximum number of lines kept by the debug event log.
    pub debug_event_log_capacity: usize,

    /// Run the integrity checker after every structural edit and log what it finds.
    pub debug_integrity: bool,

    /// With `debug_integrity`: panic on the first integrity issue instead of logging it.
    pub debug_integrity_panic: bool,
}

impl Default for DockLayoutOptions {
    fn default() -> Self {
        Self {
            default_split_ratio: 0.5,
            splitter_size: 4.0,
            tab_strip_height: 20.0,
            auto_select_new_tabs: true,
            min_floating_size: Vec2::new(200.0, 120.0),
            debug_event_log: false,
            debug_event_log_capacity: 200,
            debug_integrity: false,
            debug_integrity_panic: false,
        }
    }
}

impl DockLayoutOptions {
    pub(crate) fn validate_split_ratio(ratio: f32) -> Result<f32, DockError> {
        if ratio.is_finite() && ratio > 0.0 && ratio < 1.0 {
            Ok(ratio)
        } else {
            Err(DockError::InvalidSplitRatio(ratio))
        }
    }

    pub(crate) fn debug_log_capacity(&self) -> usize {
        self.debug_event_log_capacity.clamp(1, 10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_ratio_must_be_strictly_inside_unit_interval() {
        assert_eq!(DockLayoutOptions::validate_split_ratio(0.25), Ok(0.25));
        assert!(DockLayoutOptions::validate_split_ratio(0.0).is_err());
        assert!(DockLayoutOptions::validate_split_ratio(1.0).is_err());
        assert!(DockLayoutOptions::validate_split_ratio(-0.5).is_err());
        assert!(DockLayoutOptions::validate_split_ratio(f32::NAN).is_err());
    }

    #[test]
    fn default_ratio_is_valid() {
        let opt = DockLayoutOptions::default();
        assert!(DockLayoutOptions::validate_split_ratio(opt.default_split_ratio).is_ok());
    }

    #[test]
    fn debug_log_capacity_is_clamped() {
        let opt = DockLayoutOptions {
            debug_event_log_capacity: 0,
            ..Default::default()
        };
        assert_eq!(opt.debug_log_capacity(), 1);
    }
}
