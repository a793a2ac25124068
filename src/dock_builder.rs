use std::collections::BTreeMap;

use crate::dock_layout::{DockError, DockHost, DockLayout, DockState, PanelId, WindowKey};

/// Split direction with the semantics of imgui's `DockBuilder::SplitNode`.
///
/// The direction indicates where the *side* node is placed relative to the *main* node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SplitDirection {
    /// The edge dock that puts a new panel on this side.
    pub fn dock_state(self) -> DockState {
        match self {
            Self::Left => DockState::DockLeft,
            Self::Right => DockState::DockRight,
            Self::Up => DockState::DockTop,
            Self::Down => DockState::DockBottom,
        }
    }
}

/// A logical node id used by [`DockBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DockNodeId(u64);

#[derive(Clone, Debug)]
enum Node<W> {
    Tabs {
        windows: Vec<W>,
    },
    Split {
        dir: SplitDirection,
        side_fraction: f32,
        main: DockNodeId,
        side: DockNodeId,
    },
}

/// Scripted layouts, in the style of imgui's `DockBuilder`:
/// create empty nodes, split them, dock windows into leaf nodes, and finally `finish()` onto a
/// [`DockLayout`].
///
/// The node graph is realized as edge docks: the root node becomes the master panel, and every
/// split docks its side as a child panel of the panel realizing its main node. Child panels need
/// at least one tab, so side branches without any window are dropped and the main node keeps the
/// whole area.
pub struct DockBuilder<W> {
    next_node_id: u64,
    nodes: BTreeMap<DockNodeId, Node<W>>,
}

impl<W> Default for DockBuilder<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> DockBuilder<W> {
    pub fn new() -> Self {
        Self {
            next_node_id: 1,
            nodes: BTreeMap::new(),
        }
    }

    fn alloc_node_id(&mut self) -> DockNodeId {
        let id = DockNodeId(self.next_node_id);
        self.next_node_id = self.next_node_id.saturating_add(1);
        id
    }

    /// Create an empty leaf node.
    #[must_use]
    pub fn add_node(&mut self) -> DockNodeId {
        let id = self.alloc_node_id();
        self.nodes.insert(id, Node::Tabs { windows: Vec::new() });
        id
    }

    /// Split an existing node and return `(side, main)`, as imgui does.
    ///
    /// The `node` itself becomes the split, and its original content is moved into the returned
    /// `main` child node. `side_fraction` is the share of `node` given to `side`.
    #[must_use]
    pub fn split_node(
        &mut self,
        node: DockNodeId,
        dir: SplitDirection,
        side_fraction: f32,
    ) -> (DockNodeId, DockNodeId) {
        let old = self
            .nodes
            .remove(&node)
            .unwrap_or(Node::Tabs { windows: Vec::new() });
        let main = self.alloc_node_id();
        self.nodes.insert(main, old);

        let side = self.add_node();

        self.nodes.insert(
            node,
            Node::Split {
                dir,
                side_fraction,
                main,
                side,
            },
        );

        (side, main)
    }

    /// Dock a window into a leaf node, as its last tab.
    pub fn dock_window(&mut self, window: W, node: DockNodeId) {
        match self.nodes.get_mut(&node) {
            Some(Node::Tabs { windows }) => windows.push(window),
            Some(Node::Split { .. }) => {
                panic!("dock_window: node {node:?} is not a leaf node");
            }
            None => {
                panic!("dock_window: node {node:?} does not exist");
            }
        }
    }

    /// Dock multiple windows into a leaf node (tabbed together).
    pub fn dock_windows(&mut self, windows: impl IntoIterator<Item = W>, node: DockNodeId) {
        for window in windows {
            self.dock_window(window, node);
        }
    }

    /// Clear `layout` and rebuild it from the node graph below `root`.
    ///
    /// `root` is typically the `DockNodeId` returned by the first `add_node()` and then mutated
    /// by splits.
    ///
    /// # Errors
    /// Errors of the dock operations used to realize the graph, e.g.
    /// [`DockError::InvalidSplitRatio`] for a side fraction outside `(0, 1)`.
    pub fn finish(
        self,
        layout: &mut DockLayout<W>,
        host: &mut impl DockHost<W>,
        root: DockNodeId,
    ) -> Result<(), DockError>
    where
        W: WindowKey,
    {
        self.finish_map(layout, host, root, Some)
    }

    /// Like [`Self::finish`], mapping docked items along the way.
    ///
    /// Useful when the scripted layout is written in terms of stable ids (tool names, say) and
    /// some of them may not exist right now. Returning `None` drops that item.
    ///
    /// # Errors
    /// See [`Self::finish`].
    pub fn finish_map<Out: WindowKey>(
        self,
        layout: &mut DockLayout<Out>,
        host: &mut impl DockHost<Out>,
        root: DockNodeId,
        mut map: impl FnMut(W) -> Option<Out>,
    ) -> Result<(), DockError> {
        let mut nodes: BTreeMap<DockNodeId, Node<Out>> = self
            .nodes
            .into_iter()
            .map(|(id, node)| {
                let node = match node {
                    Node::Tabs { windows } => Node::Tabs {
                        windows: windows.into_iter().filter_map(&mut map).collect(),
                    },
                    Node::Split {
                        dir,
                        side_fraction,
                        main,
                        side,
                    } => Node::Split {
                        dir,
                        side_fraction,
                        main,
                        side,
                    },
                };
                (id, node)
            })
            .collect();

        layout.clear(host);
        let master = layout.master();
        realize(root, &mut nodes, layout, host, master)?;
        log::debug!(
            "dock builder: realized {} panels, {} splits",
            layout.panel_count(),
            layout.split_count()
        );
        Ok(())
    }
}

/// Realize `node` inside the existing `panel`.
fn realize<W: WindowKey>(
    node: DockNodeId,
    nodes: &mut BTreeMap<DockNodeId, Node<W>>,
    layout: &mut DockLayout<W>,
    host: &mut impl DockHost<W>,
    panel: PanelId,
) -> Result<(), DockError> {
    match nodes.remove(&node) {
        Some(Node::Tabs { windows }) => {
            for window in windows {
                layout.dock_window(host, panel, DockState::DockFill, window)?;
            }
        }
        Some(Node::Split {
            dir,
            side_fraction,
            main,
            side,
        }) => {
            // Outer split first: later docks on `panel` nest inside what is left of it.
            if let Some(side) = prune(side, nodes)
                && let Some(anchor) = take_anchor(side, nodes)
            {
                let state = dir.dock_state();
                let child =
                    layout.dock_window_with_ratio(host, panel, state, anchor, side_fraction)?;
                realize(side, nodes, layout, host, child)?;
            }
            realize(main, nodes, layout, host, panel)?;
        }
        None => {}
    }
    Ok(())
}

/// Drop branches holding no window. Returns the node standing for `node` afterwards, if any.
fn prune<W>(node: DockNodeId, nodes: &mut BTreeMap<DockNodeId, Node<W>>) -> Option<DockNodeId> {
    let (main, side) = match nodes.get(&node)? {
        Node::Tabs { windows } => return (!windows.is_empty()).then_some(node),
        Node::Split { main, side, .. } => (*main, *side),
    };
    match (prune(main, nodes), prune(side, nodes)) {
        (Some(new_main), Some(new_side)) => {
            if let Some(Node::Split { main, side, .. }) = nodes.get_mut(&node) {
                *main = new_main;
                *side = new_side;
            }
            Some(node)
        }
        (Some(only), None) | (None, Some(only)) => {
            nodes.remove(&node);
            Some(only)
        }
        (None, None) => {
            nodes.remove(&node);
            None
        }
    }
}

/// Take the first window of the leaf reached by following `main` links from a pruned `node`.
///
/// That leaf becomes the tabs of the panel realizing `node`.
fn take_anchor<W>(node: DockNodeId, nodes: &mut BTreeMap<DockNodeId, Node<W>>) -> Option<W> {
    let mut current = node;
    loop {
        match nodes.get_mut(&current)? {
            Node::Split { main, .. } => current = *main,
            Node::Tabs { windows } => {
                return (!windows.is_empty()).then(|| windows.remove(0));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock_layout::{NoopHost, Orientation};

    #[test]
    fn split_node_semantics_match_imgui() {
        let mut b = DockBuilder::new();
        let dockspace = b.add_node();

        let (right, main) = b.split_node(dockspace, SplitDirection::Right, 0.25);
        b.dock_window(1u8, main);
        b.dock_window(2u8, right);

        let mut layout = DockLayout::default();
        b.finish(&mut layout, &mut NoopHost, dockspace).unwrap();

        let master = layout.master();
        assert_eq!(layout.panel(master).unwrap().tabs(), &[1]);
        assert_eq!(layout.split_count(), 1);

        let side = layout.window_panel(&2).unwrap();
        assert_eq!(layout.panel(side).unwrap().parent_panel(), Some(master));
        let (state, ratio) = layout.try_get_dock_state(side);
        assert_eq!(state, DockState::DockRight);
        assert!((ratio - 0.25).abs() < 1e-6);
    }

    #[test]
    fn nested_splits_realize_outer_first() {
        // +------+-----------+
        // |      |  scene    |
        // | tree +-----------+
        // |      |  console  |
        // +------+-----------+
        let mut b = DockBuilder::new();
        let dockspace = b.add_node();
        let (left, main) = b.split_node(dockspace, SplitDirection::Left, 0.2);
        let (bottom, center) = b.split_node(main, SplitDirection::Down, 0.3);
        b.dock_window("tree", left);
        b.dock_windows(["scene", "game"], center);
        b.dock_window("console", bottom);

        let mut layout = DockLayout::default();
        b.finish(&mut layout, &mut NoopHost, dockspace).unwrap();
        assert!(layout.integrity_issues().is_empty());

        let master = layout.master();
        assert_eq!(layout.panel(master).unwrap().tabs(), &["scene", "game"]);
        let tree = layout.window_panel(&"tree").unwrap();
        let console = layout.window_panel(&"console").unwrap();
        assert_eq!(layout.panel(master).unwrap().child_panels(), &[tree, console]);

        let tree_rect = layout.panel_rect(tree).unwrap();
        let console_rect = layout.panel_rect(console).unwrap();
        assert!(tree_rect.height() > console_rect.height());
        assert!(console_rect.min.x > tree_rect.max.x);
        let (_, split, _) = layout.split_of_panel(console).unwrap();
        assert_eq!(split.orientation, Orientation::Vertical);
    }

    #[test]
    fn side_branch_with_nested_split_gets_its_own_children() {
        let mut b = DockBuilder::new();
        let dockspace = b.add_node();
        let (right, _main) = b.split_node(dockspace, SplitDirection::Right, 0.3);
        let (right_bottom, right_top) = b.split_node(right, SplitDirection::Down, 0.5);
        b.dock_window(1u32, right_top);
        b.dock_window(2u32, right_bottom);

        let mut layout = DockLayout::default();
        b.finish(&mut layout, &mut NoopHost, dockspace).unwrap();

        let top = layout.window_panel(&1).unwrap();
        let bottom = layout.window_panel(&2).unwrap();
        assert_eq!(layout.panel(top).unwrap().parent_panel(), Some(layout.master()));
        assert_eq!(layout.panel(bottom).unwrap().parent_panel(), Some(top));
        assert_eq!(layout.panel(layout.master()).unwrap().tab_count(), 0);
    }

    #[test]
    fn empty_branches_are_dropped() {
        let mut b = DockBuilder::new();
        let dockspace = b.add_node();
        let (left, main) = b.split_node(dockspace, SplitDirection::Left, 0.25);
        let (left_bottom, _left_top) = b.split_node(left, SplitDirection::Down, 0.5);
        let (_right, _rest) = b.split_node(main, SplitDirection::Right, 0.25);
        // The main leaf of the left branch stays empty: the bottom leaf takes its place.
        b.dock_window(1u32, left_bottom);

        let mut layout = DockLayout::default();
        b.finish(&mut layout, &mut NoopHost, dockspace).unwrap();

        assert_eq!(layout.panel_count(), 2);
        let left = layout.window_panel(&1).unwrap();
        assert_eq!(layout.try_get_dock_state(left).0, DockState::DockLeft);
        assert!(layout.integrity_issues().is_empty());
    }

    #[test]
    fn finish_map_skips_missing_windows() {
        let mut b = DockBuilder::new();
        let dockspace = b.add_node();
        let (right, main) = b.split_node(dockspace, SplitDirection::Right, 0.25);
        b.dock_windows(["scene", "missing"], main);
        b.dock_window("gone", right);

        let mut layout: DockLayout<u32> = DockLayout::default();
        b.finish_map(&mut layout, &mut NoopHost, dockspace, |name| match name {
            "scene" => Some(10),
            _ => None,
        })
        .unwrap();

        assert_eq!(layout.panel(layout.master()).unwrap().tabs(), &[10]);
        assert_eq!(layout.panel_count(), 1);
    }

    #[test]
    fn finish_replaces_previous_layout() {
        let mut layout = DockLayout::default();
        let master = layout.master();
        layout
            .dock_window(&mut NoopHost, master, DockState::DockLeft, 99u32)
            .unwrap();

        let mut b = DockBuilder::new();
        let dockspace = b.add_node();
        b.dock_window(1u32, dockspace);
        b.finish(&mut layout, &mut NoopHost, dockspace).unwrap();

        assert_eq!(layout.window_panel(&99), None);
        assert_eq!(layout.panel_count(), 1);
        assert_eq!(layout.panel(layout.master()).unwrap().tabs(), &[1]);
    }

    #[test]
    fn bad_side_fraction_is_reported() {
        let mut b = DockBuilder::new();
        let dockspace = b.add_node();
        let (side, _main) = b.split_node(dockspace, SplitDirection::Up, 1.0);
        b.dock_window(1u32, side);

        let mut layout = DockLayout::default();
        assert_eq!(
            b.finish(&mut layout, &mut NoopHost, dockspace),
            Err(DockError::InvalidSplitRatio(1.0))
        );
    }

    #[test]
    #[should_panic]
    fn dock_window_into_non_leaf_panics() {
        let mut b = DockBuilder::new();
        let dockspace = b.add_node();
        let (_side, _main) = b.split_node(dockspace, SplitDirection::Left, 0.5);
        b.dock_window(1u8, dockspace);
    }
}
