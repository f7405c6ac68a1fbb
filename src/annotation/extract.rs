//! Turning located box elements into geometry or `.rbox` records.

use std::path::Path;

use roxmltree::Node;

use super::walker::{find_boxes, visit_preorder, BoxKind};
use crate::error::GeolabelError;
use crate::ir::{normalize_angle, BBoxXYXY, Coord, Pixel, Polygon, RingClosure, RotatedBox};
use crate::output::RboxRecord;

/// How boxes are turned into polygon rings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolygonOptions {
    /// Which box element to read.
    pub kind: BoxKind,
    /// Open four-point or closed five-point rings.
    pub closure: RingClosure,
    /// Rotate `robndbox` corners by their stored angle. Off by default:
    /// the corners are those of the un-rotated box.
    pub apply_rotation: bool,
}

/// Read a `<bndbox>` from its first four element children, in the fixed
/// order `xmin ymin xmax ymax`.
pub fn read_bndbox(node: Node<'_, '_>, path: &Path) -> Result<BBoxXYXY<Pixel>, GeolabelError> {
    let children: Vec<Node<'_, '_>> = node.children().filter(Node::is_element).take(4).collect();
    if children.len() < 4 {
        return Err(GeolabelError::extraction(
            path,
            format!(
                "<bndbox> has {} coordinate element(s); expected xmin, ymin, xmax, ymax",
                children.len()
            ),
        ));
    }

    let xmin = parse_leaf_f64(children[0], path)?;
    let ymin = parse_leaf_f64(children[1], path)?;
    let xmax = parse_leaf_f64(children[2], path)?;
    let ymax = parse_leaf_f64(children[3], path)?;

    Ok(BBoxXYXY::from_xyxy(xmin, ymin, xmax, ymax))
}

/// Read a `<robndbox>` by tag name. A missing `<angle>` reads as zero.
pub fn read_robndbox(node: Node<'_, '_>, path: &Path) -> Result<RotatedBox<Pixel>, GeolabelError> {
    let cx = parse_required_f64(node, "cx", path)?;
    let cy = parse_required_f64(node, "cy", path)?;
    let w = parse_required_f64(node, "w", path)?;
    let h = parse_required_f64(node, "h", path)?;
    let angle = match child_element(node, "angle") {
        Some(leaf) => parse_leaf_f64(leaf, path)?,
        None => 0.0,
    };

    Ok(RotatedBox::new(cx, cy, w, h, angle))
}

/// Extract one pixel-space ring per box element, in document order.
pub fn extract_polygons(
    root: Node<'_, '_>,
    options: &PolygonOptions,
    path: &Path,
) -> Result<Vec<Polygon<Pixel>>, GeolabelError> {
    find_boxes(root, options.kind.tag_name())
        .into_iter()
        .map(|node| -> Result<Polygon<Pixel>, GeolabelError> {
            let corners = match options.kind {
                BoxKind::Bndbox => read_bndbox(node, path)?.corners(),
                BoxKind::Robndbox => {
                    let rbox = read_robndbox(node, path)?;
                    if options.apply_rotation {
                        rbox.corners_rotated()
                    } else {
                        rbox.corners_unrotated()
                    }
                }
            };
            if !corners.iter().all(Coord::is_finite) {
                return Err(GeolabelError::extraction(
                    path,
                    format!(
                        "<{}> has a non-finite coordinate",
                        options.kind.tag_name()
                    ),
                ));
            }
            Ok(Polygon::from_corners(corners, options.closure))
        })
        .collect()
}

/// Per-file accumulator for the rbox pipeline.
///
/// Fed every element of the tree in pre-order. `cx`, `cy`, `w` and `h`
/// leaves fill a pending record; an `angle` leaf completes it. Any other
/// element is ignored.
#[derive(Debug)]
pub struct RboxAccumulator<'p> {
    path: &'p Path,
    pending: PendingRbox,
    records: Vec<RboxRecord>,
}

#[derive(Debug, Default)]
struct PendingRbox {
    cx: Option<String>,
    cy: Option<String>,
    w: Option<String>,
    h: Option<String>,
}

impl PendingRbox {
    fn is_empty(&self) -> bool {
        self.cx.is_none() && self.cy.is_none() && self.w.is_none() && self.h.is_none()
    }

    fn slot(&mut self, tag: &str) -> Option<&mut Option<String>> {
        match tag {
            "cx" => Some(&mut self.cx),
            "cy" => Some(&mut self.cy),
            "w" => Some(&mut self.w),
            "h" => Some(&mut self.h),
            _ => None,
        }
    }
}

impl<'p> RboxAccumulator<'p> {
    pub fn new(path: &'p Path) -> Self {
        Self {
            path,
            pending: PendingRbox::default(),
            records: Vec::new(),
        }
    }

    /// Fold one element into the accumulator.
    pub fn visit(&mut self, node: Node<'_, '_>) -> Result<(), GeolabelError> {
        let tag = node.tag_name().name();

        if tag == "angle" {
            let angle_rad = parse_leaf_f64(node, self.path)?;
            let pending = std::mem::take(&mut self.pending);
            let record = RboxRecord {
                cx: self.require(pending.cx, "cx")?,
                cy: self.require(pending.cy, "cy")?,
                w: self.require(pending.w, "w")?,
                h: self.require(pending.h, "h")?,
                angle_deg: normalize_angle(angle_rad),
            };
            self.records.push(record);
            return Ok(());
        }

        let path = self.path;
        if let Some(slot) = self.pending.slot(tag) {
            let (token, _) = numeric_leaf(node, path)?;
            if slot.replace(token.to_string()).is_some() {
                return Err(GeolabelError::extraction(
                    path,
                    format!("<{tag}> appears twice before <angle>"),
                ));
            }
        }
        Ok(())
    }

    /// Finish the walk and hand back the records in encounter order.
    pub fn finish(self) -> Result<Vec<RboxRecord>, GeolabelError> {
        if !self.pending.is_empty() {
            return Err(GeolabelError::extraction(
                self.path,
                "rotated box is missing its <angle>",
            ));
        }
        Ok(self.records)
    }

    fn require(&self, value: Option<String>, tag: &str) -> Result<String, GeolabelError> {
        value.ok_or_else(|| {
            GeolabelError::extraction(self.path, format!("<angle> found without a preceding <{tag}>"))
        })
    }
}

/// Run the rbox accumulator over the whole tree.
pub fn extract_rbox_records(
    root: Node<'_, '_>,
    path: &Path,
) -> Result<Vec<RboxRecord>, GeolabelError> {
    let mut accumulator = RboxAccumulator::new(path);
    visit_preorder(root, &mut |node| accumulator.visit(node))?;
    accumulator.finish()
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn parse_required_f64(node: Node<'_, '_>, tag: &str, path: &Path) -> Result<f64, GeolabelError> {
    let leaf = child_element(node, tag).ok_or_else(|| {
        GeolabelError::extraction(
            path,
            format!("missing <{tag}> in <{}>", node.tag_name().name()),
        )
    })?;
    parse_leaf_f64(leaf, path)
}

/// Trimmed text of a leaf and its value as a floating-point number.
fn numeric_leaf<'a>(leaf: Node<'a, '_>, path: &Path) -> Result<(&'a str, f64), GeolabelError> {
    let tag = leaf.tag_name().name();
    let raw = leaf
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| GeolabelError::extraction(path, format!("<{tag}> has no value")))?;

    let value = raw.parse::<f64>().map_err(|_| {
        GeolabelError::extraction(
            path,
            format!("invalid <{tag}> value '{raw}'; expected floating-point number"),
        )
    })?;
    Ok((raw, value))
}

fn parse_leaf_f64(leaf: Node<'_, '_>, path: &Path) -> Result<f64, GeolabelError> {
    numeric_leaf(leaf, path).map(|(_, value)| value)
}
