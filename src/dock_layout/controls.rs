use super::DockLayout;
use super::types::{Control, ControlId, ControlKind, PanelId, SplitPanel, WindowKey};

impl<W: WindowKey> DockLayout<W> {
    pub(crate) fn alloc_control(&mut self, kind: ControlKind) -> ControlId {
        let id = ControlId(self.next_control_id);
        self.next_control_id = self.next_control_id.saturating_add(1);
        self.controls.insert(id, Control::new(kind));
        id
    }

    /// Insert `child` into `parent`'s children at `index` (clamped).
    pub(crate) fn attach_control(&mut self, child: ControlId, parent: ControlId, index: usize) {
        if let Some(parent_control) = self.controls.get_mut(&parent) {
            let index = index.min(parent_control.children.len());
            parent_control.children.insert(index, child);
        }
        if let Some(child_control) = self.controls.get_mut(&child) {
            child_control.parent = Some(parent);
        }
    }

    /// Unlink `child` from its parent; returns the former parent and index.
    pub(crate) fn detach_control(&mut self, child: ControlId) -> Option<(ControlId, usize)> {
        let parent = self.controls.get_mut(&child)?.parent.take()?;
        let siblings = &mut self.controls.get_mut(&parent)?.children;
        let index = siblings.iter().position(|&c| c == child)?;
        siblings.remove(index);
        Some((parent, index))
    }

    /// Remove `root` and everything below it from the arena.
    pub(crate) fn remove_control_subtree(&mut self, root: ControlId) {
        self.detach_control(root);
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(control) = self.controls.remove(&id) {
                stack.extend(control.children);
            }
        }
    }

    /// The split whose slot directly holds `panel`'s control, and the slot index.
    ///
    /// This is the "parent's parent is a splitter" relation every non-root panel must satisfy.
    pub(crate) fn split_of_panel(&self, panel: PanelId) -> Option<(ControlId, SplitPanel, usize)> {
        let control = self.panels.get(&panel)?.control;
        let slot = self.controls.get(&control)?.parent?;
        let split_id = self.controls.get(&slot)?.parent?;
        let ControlKind::Split(split) = self.controls.get(&split_id)?.kind else {
            return None;
        };
        let slot_index = split.slots.iter().position(|&s| s == slot)?;
        Some((split_id, split, slot_index))
    }
}
