use egui::{Pos2, Rect, Vec2};

use super::{ControlId, ControlKind, DockLayout, DockState, NoopHost, Orientation, PanelId};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_layout_ok<W: super::WindowKey>(layout: &DockLayout<W>) {
    let issues = layout.integrity_issues();
    assert!(
        issues.is_empty(),
        "layout integrity failed:\n{}\n{}",
        issues.join("\n"),
        layout.debug_tree_summary(64)
    );
}

/// The control tree below `control`, with panels and proxies named by panel handle.
fn control_shape<W: super::WindowKey>(layout: &DockLayout<W>, control: ControlId) -> String {
    let c = layout.control(control).unwrap();
    let children: Vec<String> = c
        .children
        .iter()
        .map(|&child| control_shape(layout, child))
        .collect();
    let name = match c.kind {
        ControlKind::Panel(p) => format!("panel{}", p.0),
        ControlKind::TabsProxy(p) => format!("proxy{}", p.0),
        ControlKind::Split(split) => format!("split{:?}", split.orientation),
        ControlKind::SplitSlot => "slot".to_owned(),
    };
    if children.is_empty() {
        name
    } else {
        format!("{name}({})", children.join(" "))
    }
}

fn master_shape<W: super::WindowKey>(layout: &DockLayout<W>) -> String {
    let master = layout.panel(layout.master()).unwrap();
    control_shape(layout, master.control())
}

#[test]
fn selected_index_stays_valid_through_tab_churn() {
    init_logger();
    let mut layout: DockLayout<u32> = DockLayout::default();
    let master = layout.master();
    for w in 0..6 {
        layout
            .dock_window(&mut NoopHost, master, DockState::DockFill, w)
            .unwrap();
    }
    for (select, remove) in [(Some(5), 5), (Some(0), 3), (None, 0), (Some(1), 1), (Some(0), 2)] {
        layout.select_tab(&mut NoopHost, master, select).unwrap();
        layout.undock_window(&mut NoopHost, master, &remove).unwrap();

        let panel = layout.panel(master).unwrap();
        if let Some(selected) = panel.selected_index() {
            assert!(selected < panel.tab_count());
        }
        assert_layout_ok(&layout);
    }
}

#[test]
fn top_dock_creates_one_vertical_split_and_one_child() {
    init_logger();
    let mut layout: DockLayout<&str> = DockLayout::default();
    let master = layout.master();
    layout
        .dock_window(&mut NoopHost, master, DockState::DockFill, "viewport")
        .unwrap();
    let panels_before = layout.panel_count();

    let child = layout
        .dock_window(&mut NoopHost, master, DockState::DockTop, "toolbar")
        .unwrap();

    assert_eq!(layout.split_count(), 1);
    assert_eq!(layout.panel_count(), panels_before + 1);
    let (_, split, _) = layout.split_of_panel(child).unwrap();
    assert_eq!(split.orientation, Orientation::Vertical);
    assert_eq!(layout.panel(child).unwrap().selected_tab(), Some(&"toolbar"));
    assert_layout_ok(&layout);
}

#[test]
fn left_dock_then_undock_restores_previous_shape() {
    init_logger();
    let mut layout: DockLayout<&str> = DockLayout::default();
    let master = layout.master();
    layout
        .dock_window(&mut NoopHost, master, DockState::DockFill, "scene")
        .unwrap();
    let right = layout
        .dock_window(&mut NoopHost, master, DockState::DockRight, "inspector")
        .unwrap();
    let before = master_shape(&layout);

    let left = layout
        .dock_window(&mut NoopHost, master, DockState::DockLeft, "outliner")
        .unwrap();
    assert_ne!(master_shape(&layout), before);

    layout.undock_window(&mut NoopHost, left, &"outliner").unwrap();
    assert_eq!(master_shape(&layout), before);
    assert_eq!(layout.panel(master).unwrap().child_panels(), &[right]);
    assert_layout_ok(&layout);
}

#[test]
fn round_trip_on_inner_panel_restores_sibling_order() {
    init_logger();
    let mut layout: DockLayout<u32> = DockLayout::default();
    let master = layout.master();
    let bottom = layout
        .dock_window(&mut NoopHost, master, DockState::DockBottom, 1)
        .unwrap();
    layout
        .dock_window(&mut NoopHost, bottom, DockState::DockRight, 2)
        .unwrap();
    let before = master_shape(&layout);

    let c = layout
        .dock_window(&mut NoopHost, bottom, DockState::DockLeft, 3)
        .unwrap();
    layout.undock_window(&mut NoopHost, c, &3).unwrap();
    assert_eq!(master_shape(&layout), before);
    assert_layout_ok(&layout);
}

#[test]
fn emptied_panel_is_unreachable() {
    init_logger();
    let mut layout: DockLayout<u32> = DockLayout::default();
    let master = layout.master();
    let right = layout
        .dock_window(&mut NoopHost, master, DockState::DockRight, 1)
        .unwrap();
    let right_control = layout.panel(right).unwrap().control();
    layout.undock_window(&mut NoopHost, right, &1).unwrap();

    assert!(layout.panel(right).is_none());
    assert!(layout.control(right_control).is_none());
    assert!(!layout.panel_ids().any(|p| p == right));
    assert!(layout.hit_test_screen(Pos2::new(1200.0, 300.0)) == Some(master));
    assert_layout_ok(&layout);
}

#[test]
fn three_nested_docks_unwind_to_bare_master() {
    init_logger();
    let mut layout: DockLayout<u32> = DockLayout::default();
    let master = layout.master();

    let a = layout
        .dock_window(&mut NoopHost, master, DockState::DockLeft, 1)
        .unwrap();
    let b = layout
        .dock_window(&mut NoopHost, a, DockState::DockTop, 2)
        .unwrap();
    let c = layout
        .dock_window(&mut NoopHost, b, DockState::DockRight, 3)
        .unwrap();
    assert_eq!(layout.split_count(), 3);
    assert_layout_ok(&layout);

    for (panel, window) in [(c, 3), (b, 2), (a, 1)] {
        layout.undock_window(&mut NoopHost, panel, &window).unwrap();
        assert_layout_ok(&layout);
    }

    let master_panel = layout.panel(master).unwrap();
    assert_eq!(master_panel.tab_count(), 0);
    assert!(master_panel.child_panels().is_empty());
    assert_eq!(layout.panel_count(), 1);
    assert_eq!(layout.split_count(), 0);
    assert_eq!(
        master_shape(&layout),
        format!("panel{}(proxy{})", master.0, master.0)
    );
}

#[test]
fn hit_test_picks_smallest_of_overlapping_children() {
    init_logger();
    let mut layout: DockLayout<u32> = DockLayout::default();
    layout.set_master_rect(Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 1000.0)));
    let master = layout.master();
    let left = layout
        .dock_window_with_ratio(&mut NoopHost, master, DockState::DockLeft, 1, 0.5)
        .unwrap();
    let small = layout
        .dock_window_with_ratio(&mut NoopHost, left, DockState::DockTop, 2, 0.1)
        .unwrap();

    assert_eq!(layout.hit_test(master, Pos2::new(100.0, 20.0)), Some(small));
    assert_eq!(layout.hit_test(master, Pos2::new(100.0, 500.0)), Some(left));
    assert_eq!(layout.hit_test(master, Pos2::new(900.0, 500.0)), Some(master));
    assert_eq!(layout.hit_test(master, Pos2::new(-1.0, 500.0)), None);
    assert_eq!(layout.hit_test(PanelId(999), Pos2::new(1.0, 1.0)), None);
}

#[test]
fn collapse_precondition_violation_leaves_layout_untouched() {
    init_logger();
    let mut layout: DockLayout<u32> = DockLayout::default();
    let master = layout.master();
    let right = layout
        .dock_window(&mut NoopHost, master, DockState::DockRight, 1)
        .unwrap();

    // Pull the panel out of its split by hand, which no public operation can do.
    let right_control = layout.panel(right).unwrap().control();
    let (slot, _) = layout.detach_control(right_control).unwrap();
    layout.attach_control(right_control, layout.panel(master).unwrap().control(), 1);

    assert_eq!(
        layout.undock_window(&mut NoopHost, right, &1),
        Err(super::DockError::PanelNotInSplitter(right))
    );
    assert_eq!(layout.panel(right).unwrap().tabs(), &[1]);
    assert_eq!(layout.window_panel(&1), Some(right));
    assert!(layout.control(slot).unwrap().children.is_empty());
}

#[test]
fn integrity_checking_option_stays_quiet_on_valid_edits() {
    init_logger();
    let mut layout: DockLayout<u32> = DockLayout::new(super::DockLayoutOptions {
        debug_integrity: true,
        debug_integrity_panic: true,
        ..Default::default()
    });
    let master = layout.master();
    let left = layout
        .dock_window(&mut NoopHost, master, DockState::DockLeft, 1)
        .unwrap();
    layout
        .dock_window(&mut NoopHost, left, DockState::DockBottom, 2)
        .unwrap();
    layout.close_all(&mut NoopHost, left).unwrap();
    assert_eq!(layout.panel_count(), 1);
}

#[test]
fn only_non_master_panels_vanish_with_their_last_tab() {
    let mut layout: DockLayout<u32> = DockLayout::default();
    let master = layout.master();
    let left = layout
        .dock_window(&mut NoopHost, master, DockState::DockLeft, 1)
        .unwrap();
    let rect = Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(300.0, 200.0));
    let floating = layout.float_window(&mut NoopHost, 2, rect).unwrap();

    assert!(!layout.panel(master).unwrap().vanishes_without_tabs());
    assert!(layout.panel(left).unwrap().vanishes_without_tabs());
    assert!(layout.panel(floating).unwrap().vanishes_without_tabs());

    layout
        .dock_window(&mut NoopHost, floating, DockState::DockTop, 3)
        .unwrap();
    assert!(!layout.panel(floating).unwrap().vanishes_without_tabs());
    assert_layout_ok(&layout);
}
