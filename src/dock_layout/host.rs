use super::types::PanelId;

/// The host UI framework, as seen by the dock layout.
///
/// Passed explicitly into every operation that changes what is on screen, so the layout never
/// reaches into global editor state. All methods default to doing nothing.
pub trait DockHost<W> {
    /// Put `window`'s view into the tab content slot of `panel`.
    fn attach_view(&mut self, _panel: PanelId, _window: &W) {}

    /// Take `window`'s view out of the tab content slot of `panel`.
    fn detach_view(&mut self, _panel: PanelId, _window: &W) {}

    /// Allow interaction with the nested content of a freshly shown window.
    fn unlock_content(&mut self, _window: &W) {}

    /// Give `window` input focus.
    fn focus(&mut self, _window: &W) {}

    /// `window` is no longer a tab of `panel` (closed, moved, floated or hidden).
    fn window_undocked(&mut self, _window: &W, _panel: PanelId) {}

    /// The floating window hosting the root `panel` should close.
    fn floating_window_closed(&mut self, _panel: PanelId) {}
}

/// A host that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHost;

impl<W> DockHost<W> for NoopHost {}
