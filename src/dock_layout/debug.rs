use itertools::Itertools as _;

use super::DockLayout;
use super::integrity;
use super::types::{ControlId, ControlKind, WindowKey};

impl<W: WindowKey> DockLayout<W> {
    /// Lines of the in-memory debug event log, oldest first.
    ///
    /// Only filled while [`super::DockLayoutOptions::debug_event_log`] is on.
    pub fn debug_log_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.debug_log.iter().map(String::as_str)
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }

    /// Problems found by the integrity checker; empty for a healthy layout.
    pub fn integrity_issues(&self) -> Vec<String> {
        integrity::layout_integrity_issues(self)
    }

    /// One line per control, depth-first from every root. Stops after `max_nodes` lines.
    pub fn debug_tree_summary(&self, max_nodes: usize) -> String {
        let mut lines: Vec<String> = Vec::new();
        for root in self.roots() {
            let Some(panel) = self.panels.get(&root) else {
                lines.push(format!("{root:?} MISSING"));
                continue;
            };
            let mut stack: Vec<(ControlId, usize)> = vec![(panel.control, 0)];
            while let Some((id, depth)) = stack.pop() {
                if lines.len() >= max_nodes {
                    break;
                }
                let indent = "  ".repeat(depth);
                let Some(control) = self.controls.get(&id) else {
                    lines.push(format!("{indent}{id:?} MISSING"));
                    continue;
                };
                let line = match control.kind {
                    ControlKind::Panel(p) => match self.panels.get(&p) {
                        Some(dock_panel) => format!(
                            "{indent}{p:?} tabs=[{}] selected={:?} children={:?}",
                            dock_panel.tabs.iter().map(|w| format!("{w:?}")).join(", "),
                            dock_panel.selected,
                            dock_panel.child_panels,
                        ),
                        None => format!("{indent}{p:?} (no record)"),
                    },
                    ControlKind::TabsProxy(p) => format!("{indent}proxy of {p:?}"),
                    ControlKind::Split(split) => format!(
                        "{indent}split {:?} ratio={:.3}",
                        split.orientation, split.ratio
                    ),
                    ControlKind::SplitSlot => format!("{indent}slot"),
                };
                lines.push(line);
                stack.extend(control.children.iter().rev().map(|&c| (c, depth + 1)));
            }
        }
        format!(
            "panels={} controls={} floating={}\n{}",
            self.panels.len(),
            self.controls.len(),
            self.floating.z_order.len(),
            lines.join("\n")
        )
    }

    /// Bookkeeping after every structural edit: log it, and check integrity if asked to.
    pub(crate) fn after_edit(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("{message}");
        self.debug_log_event(message);

        if !self.options.debug_integrity {
            return;
        }
        let issues = integrity::layout_integrity_issues(self);
        if issues.is_empty() {
            return;
        }
        for issue in &issues {
            log::warn!("{issue}");
            self.push_debug_log_line(issue.clone());
        }
        if self.options.debug_integrity_panic && cfg!(debug_assertions) {
            panic!(
                "dock layout integrity failed:\n{}\n{}",
                issues.join("\n"),
                self.debug_tree_summary(64)
            );
        }
    }

    fn debug_log_event(&mut self, message: String) {
        if !self.options.debug_event_log {
            return;
        }
        self.push_debug_log_line(message);
    }

    fn push_debug_log_line(&mut self, message: String) {
        let cap = self.options.debug_log_capacity();
        while self.debug_log.len() >= cap {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(message);
    }
}

#[cfg(test)]
mod tests {
    use super::super::{DockLayoutOptions, DockState, NoopHost};
    use super::*;

    #[test]
    fn event_log_is_bounded() {
        let mut layout: DockLayout<u32> = DockLayout::new(DockLayoutOptions {
            debug_event_log: true,
            debug_event_log_capacity: 3,
            ..Default::default()
        });
        let master = layout.master();
        for w in 0..5 {
            layout
                .dock_window(&mut NoopHost, master, DockState::DockFill, w)
                .unwrap();
        }
        assert_eq!(layout.debug_log_lines().count(), 3);

        layout.debug_log_clear();
        assert_eq!(layout.debug_log_lines().count(), 0);
    }

    #[test]
    fn event_log_is_off_by_default() {
        let mut layout: DockLayout<u32> = DockLayout::default();
        let master = layout.master();
        layout
            .dock_window(&mut NoopHost, master, DockState::DockFill, 1)
            .unwrap();
        assert_eq!(layout.debug_log_lines().count(), 0);
    }

    fn layout_with_bad_selection(panic: bool) -> DockLayout<u32> {
        let mut layout: DockLayout<u32> = DockLayout::new(DockLayoutOptions {
            debug_integrity: true,
            debug_integrity_panic: panic,
            ..Default::default()
        });
        let master = layout.master();
        layout
            .dock_window(&mut NoopHost, master, DockState::DockFill, 1)
            .unwrap();
        layout.panels.get_mut(&master).unwrap().selected = Some(5);
        layout
    }

    #[test]
    fn integrity_issues_are_logged_without_panic_flag() {
        let mut layout = layout_with_bad_selection(false);
        layout.after_edit("corrupted selection");
        assert!(
            layout.debug_log_lines().any(|line| line.contains("selected 5")),
            "{:?}",
            layout.debug_log_lines().collect::<Vec<_>>()
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "dock layout integrity failed")]
    fn integrity_panic_flag_panics_in_debug_builds() {
        let mut layout = layout_with_bad_selection(true);
        layout.after_edit("corrupted selection");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn integrity_panic_flag_only_logs_in_release_builds() {
        let mut layout = layout_with_bad_selection(true);
        layout.after_edit("corrupted selection");
        assert!(layout.debug_log_lines().any(|line| line.contains("selected 5")));
    }

    #[test]
    fn tree_summary_lists_tabs_and_splits() {
        let mut layout: DockLayout<&str> = DockLayout::default();
        let master = layout.master();
        layout
            .dock_window(&mut NoopHost, master, DockState::DockFill, "scene")
            .unwrap();
        layout
            .dock_window(&mut NoopHost, master, DockState::DockLeft, "outliner")
            .unwrap();

        let summary = layout.debug_tree_summary(100);
        assert!(summary.starts_with("panels=2"), "{summary}");
        assert!(summary.contains("\"outliner\""), "{summary}");
        assert!(summary.contains("split Horizontal"), "{summary}");
    }
}
