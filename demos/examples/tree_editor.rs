// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless tree editor session: load, lay out, drag, rename, collapse, delete.
//!
//! This example shows how a host wires pointer events into
//! `arbor_interaction::TreeView`:
//! - hit testing is the host's job; here it is a plain scan over the layout boxes,
//! - every accepted change hands back a snapshot to "save",
//! - toggling a folder changes only what is shown.
//!
//! Run:
//! - `cargo run -p arbor_demos --example tree_editor`

use arbor_interaction::TreeView;
use arbor_layout::{Layout, LayoutConfig};
use arbor_tree::{Edit, ExpandState, NodeId, Tree, TreeNode};
use kurbo::Point;

const SRC: NodeId = NodeId(1);
const COMPONENTS: NodeId = NodeId(2);
const HEADER: NodeId = NodeId(3);
const FOOTER: NodeId = NodeId(4);
const UI: NodeId = NodeId(5);
const BUTTON: NodeId = NodeId(6);
const PAGES: NodeId = NodeId(7);

fn load() -> Tree {
    let header = TreeNode::file(HEADER, "Header.tsx").with_path("src/components/Header.tsx");
    let footer = TreeNode::file(FOOTER, "Footer.tsx").with_path("src/components/Footer.tsx");
    let ui = TreeNode::folder(UI, "ui", [TreeNode::file(BUTTON, "Button.tsx")])
        .with_expanded_hint(Some(false));
    let components = TreeNode::folder(COMPONENTS, "components", [header, footer, ui]);
    let pages = TreeNode::folder(PAGES, "pages", []);
    Tree::new(TreeNode::folder(SRC, "src", [components, pages]))
}

/// Topmost node whose box contains `pt`.
fn hit(layout: &Layout, pt: Point) -> Option<NodeId> {
    layout
        .positions()
        .iter()
        .rev()
        .find(|p| p.rect.contains(pt))
        .map(|p| p.id())
}

fn print_layout(title: &str, view: &TreeView) {
    println!("== {title}");
    for p in view.layout().positions() {
        let indent = "  ".repeat(p.depth);
        let o = p.origin();
        let name = p.node.name();
        println!("{indent}{name:<12} at ({:>6.1}, {:>5.1})", o.x, o.y);
    }
    for c in view.layout().connectors() {
        println!(
            "  edge {:?} -> {:?}: ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            c.parent, c.child, c.from.x, c.from.y, c.to.x, c.to.y
        );
    }
    if let Some(bounds) = view.layout().bounds() {
        println!("  canvas {:.1} x {:.1}", bounds.width(), bounds.height());
    }
}

fn save(tree: &Tree) {
    println!("  saved snapshot with {} nodes", tree.len());
}

fn main() {
    let mut view = TreeView::new(load(), LayoutConfig::default());
    print_layout("loaded", &view);

    // Press on `Header.tsx`, move over `pages`, release.
    let header = view.layout().position(HEADER).map(|p| p.center());
    let pages = view.layout().position(PAGES).map(|p| p.center());
    if let (Some(from), Some(to)) = (header, pages) {
        if let Some(pressed) = hit(view.layout(), from) {
            view.drag_start(pressed);
        }
        if let Some(hovered) = hit(view.layout(), to) {
            let allowed = view.drag_over(hovered);
            println!("hover {hovered:?}: drop allowed = {allowed}");
            if let Some(tree) = view.drop_on(hovered) {
                save(&tree);
            }
        }
    }
    print_layout("after drag", &view);

    // Dragging a folder into its own subfolder is refused.
    view.drag_start(COMPONENTS);
    println!("hover ui: drop allowed = {}", view.drag_over(UI));
    assert!(view.drop_on(UI).is_none());

    // Inline rename with surrounding whitespace.
    view.begin_rename(PAGES);
    view.update_rename("  routes ");
    if let Some(tree) = view.commit_rename() {
        save(&tree);
    }

    // Open `ui` on screen only, then close `components` and record it.
    view.toggle(UI);
    if let Some(tree) = view.apply(&Edit::SetExpanded {
        ids: vec![COMPONENTS],
        state: ExpandState::Collapsed,
    }) {
        save(&tree);
    }
    print_layout("after rename and collapse", &view);

    // A selection that includes the root is refused as a whole.
    assert!(view.delete([FOOTER, SRC]).is_none());
    // Unknown ids in a selection are ignored.
    if let Some(tree) = view.delete([FOOTER, NodeId(99)]) {
        save(&tree);
    }
    if let Some(stats) = view.stats(SRC) {
        println!(
            "src: {} files, {} folders, depth {}",
            stats.files, stats.folders, stats.depth
        );
    }
}
