//! Depth-first traversal of annotation XML trees.
//!
//! The walker only borrows the parsed document; nodes are handed out in
//! document (pre-order) order, which is the order features and `.rbox`
//! lines are written in.

use roxmltree::Node;

/// Box element names recognized in annotation files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxKind {
    /// Axis-aligned `<bndbox>` with `xmin ymin xmax ymax`.
    #[default]
    Bndbox,
    /// Rotated `<robndbox>` with `cx cy w h angle`.
    Robndbox,
}

impl BoxKind {
    pub fn tag_name(&self) -> &'static str {
        match self {
            BoxKind::Bndbox => "bndbox",
            BoxKind::Robndbox => "robndbox",
        }
    }
}

/// Collect every element named `tag` under (and including) `root`, pre-order.
pub fn find_boxes<'a, 'input>(root: Node<'a, 'input>, tag: &str) -> Vec<Node<'a, 'input>> {
    root.descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == tag)
        .collect()
}

/// Apply `visit` to every element under (and including) `root`, pre-order.
///
/// Stops at the first error.
pub fn visit_preorder<'a, 'input, E>(
    root: Node<'a, 'input>,
    visit: &mut impl FnMut(Node<'a, 'input>) -> Result<(), E>,
) -> Result<(), E> {
    for node in root.descendants().filter(Node::is_element) {
        visit(node)?;
    }
    Ok(())
}
