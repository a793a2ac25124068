use std::collections::{HashMap, HashSet};

use super::DockLayout;
use super::types::{
    ControlId, ControlKind, DockPanel, PanelId, RootKind, TabSurface, WindowKey, WindowSlot,
};

pub(super) fn layout_integrity_issues<W: WindowKey>(layout: &DockLayout<W>) -> Vec<String> {
    let mut issues: Vec<String> = Vec::new();
    check_master(layout, &mut issues);
    check_controls(layout, &mut issues);
    for (&id, panel) in &layout.panels {
        check_panel(layout, id, panel, &mut issues);
    }
    check_window_registry(layout, &mut issues);
    issues
}

fn check_master<W: WindowKey>(layout: &DockLayout<W>, issues: &mut Vec<String>) {
    match layout.panels.get(&layout.master) {
        Some(master) if master.root == Some(RootKind::Master) => {}
        Some(_) => issues.push(format!("integrity: master {:?} not marked master", layout.master)),
        None => issues.push(format!("integrity: master {:?} missing", layout.master)),
    }
}

/// Walk from every root panel control, checking parent links on the way.
fn check_controls<W: WindowKey>(layout: &DockLayout<W>, issues: &mut Vec<String>) {
    let mut visited: HashSet<ControlId> = HashSet::new();
    for root in layout.roots() {
        let Some(panel) = layout.panels.get(&root) else {
            issues.push(format!("integrity: root {root:?} missing"));
            continue;
        };
        if panel.parent_panel.is_some() {
            issues.push(format!("integrity: root {root:?} has a parent panel"));
        }
        if layout
            .controls
            .get(&panel.control)
            .is_some_and(|c| c.parent.is_some())
        {
            issues.push(format!("integrity: root {root:?} control has a parent"));
        }

        let mut stack = vec![panel.control];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                issues.push(format!("integrity: control {id:?} reachable twice"));
                continue;
            }
            let Some(control) = layout.controls.get(&id) else {
                issues.push(format!("integrity: missing control {id:?} (reachable)"));
                continue;
            };
            for &child in &control.children {
                if let Some(c) = layout.controls.get(&child)
                    && c.parent != Some(id)
                {
                    issues.push(format!(
                        "integrity: {child:?} listed under {id:?} but parent={:?}",
                        c.parent
                    ));
                }
            }
            if let ControlKind::Split(split) = control.kind {
                if control.children != split.slots {
                    issues.push(format!(
                        "integrity: split {id:?} children {:?} != slots {:?}",
                        control.children, split.slots
                    ));
                }
                if !(split.ratio > 0.0 && split.ratio < 1.0) {
                    issues.push(format!("integrity: split {id:?} ratio {}", split.ratio));
                }
            }
            stack.extend(control.children.iter().copied());
        }
    }
    if visited.len() != layout.controls.len() {
        issues.push(format!(
            "integrity: unreachable controls {} of {}",
            layout.controls.len().saturating_sub(visited.len()),
            layout.controls.len()
        ));
    }
}

fn check_panel<W: WindowKey>(
    layout: &DockLayout<W>,
    id: PanelId,
    panel: &DockPanel<W>,
    issues: &mut Vec<String>,
) {
    if let Some(selected) = panel.selected
        && selected >= panel.tabs.len()
    {
        issues.push(format!(
            "integrity: {id:?} selected {selected} with {} tabs",
            panel.tabs.len()
        ));
    }
    let expected_surface = panel.selected_tab().cloned();
    let shown = match &panel.surface {
        TabSurface::Empty => None,
        TabSurface::Showing(w) => Some(w.clone()),
    };
    if shown != expected_surface {
        issues.push(format!(
            "integrity: {id:?} shows {shown:?} but selected tab is {expected_surface:?}"
        ));
    }

    match layout.controls.get(&panel.control).map(|c| c.kind) {
        Some(ControlKind::Panel(p)) if p == id => {}
        other => issues.push(format!("integrity: {id:?} control kind {other:?}")),
    }
    match layout.controls.get(&panel.tabs_proxy).map(|c| c.kind) {
        Some(ControlKind::TabsProxy(p)) if p == id => {}
        other => issues.push(format!("integrity: {id:?} proxy kind {other:?}")),
    }

    if panel.root.is_none() {
        if panel.tabs.is_empty() {
            issues.push(format!("integrity: non-root {id:?} has no tabs"));
        }
        if layout.split_of_panel(id).is_none() {
            issues.push(format!("integrity: non-root {id:?} is not inside a split"));
        }
        match panel.parent_panel.and_then(|p| layout.panels.get(&p)) {
            Some(parent) if parent.child_panels.contains(&id) => {}
            _ => issues.push(format!(
                "integrity: {id:?} not listed by parent {:?}",
                panel.parent_panel
            )),
        }
    }
    if panel.root == Some(RootKind::Floating)
        && panel.tabs.is_empty()
        && panel.child_panels.is_empty()
    {
        issues.push(format!("integrity: empty floating root {id:?} still alive"));
    }

    for child in &panel.child_panels {
        match layout.panels.get(child) {
            Some(c) if c.parent_panel == Some(id) => {}
            Some(c) => issues.push(format!(
                "integrity: child {child:?} of {id:?} points at {:?}",
                c.parent_panel
            )),
            None => issues.push(format!("integrity: {id:?} lists missing child {child:?}")),
        }
    }
}

/// Every tab has exactly one owner, and the window registry agrees with the tabs.
fn check_window_registry<W: WindowKey>(layout: &DockLayout<W>, issues: &mut Vec<String>) {
    let mut tab_owner: HashMap<&W, PanelId> = HashMap::new();
    for (&id, panel) in &layout.panels {
        for window in &panel.tabs {
            if let Some(other) = tab_owner.insert(window, id) {
                issues.push(format!(
                    "integrity: {window:?} is a tab of both {other:?} and {id:?}"
                ));
            }
            if layout.windows.get(window) != Some(&WindowSlot::Docked(id)) {
                issues.push(format!(
                    "integrity: {window:?} in {id:?} recorded as {:?}",
                    layout.windows.get(window)
                ));
            }
        }
    }

    let docked_records = layout
        .windows
        .values()
        .filter(|slot| matches!(slot, WindowSlot::Docked(_)))
        .count();
    if docked_records != tab_owner.len() {
        issues.push(format!(
            "integrity: {docked_records} windows recorded docked, {} tabs",
            tab_owner.len()
        ));
    }
}
