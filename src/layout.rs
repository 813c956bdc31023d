//! Partition layout: flattens a [`TreeNode`] hierarchy into pre-order [`LayoutNode`]s,
//! each owning an angular slice (radians) and a radial band (unit radius).
//!
//! Leaf weight is its `size` (missing = 0); an internal node weighs the sum of its
//! children. A sibling group whose total weight is zero splits its parent's slice
//! evenly so no span ever becomes NaN.

use std::f64::consts::TAU;

use serde::Deserialize;

use crate::error::LayoutError;
use crate::model::TreeNode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChildOrder {
    /// Children keep their input order.
    #[default]
    Preserve,
    /// Heaviest sibling first (stable for ties).
    WeightDescending,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
    pub name: String,
    /// Raw `size` from the input, shown in the tooltip.
    pub size: Option<f64>,
    pub depth: usize,
    pub angle_start: f64,
    pub angle_span: f64,
    pub radius_start: f64,
    pub radius_span: f64,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Child indices leading from the root of the laid-out tree to this node.
    pub path: Vec<usize>,
}

impl LayoutNode {
    pub fn angle_end(&self) -> f64 {
        self.angle_start + self.angle_span
    }

    pub fn radius_end(&self) -> f64 {
        self.radius_start + self.radius_span
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub max_depth: usize,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, idx: usize) -> Option<&LayoutNode> {
        self.nodes.get(idx)
    }

    /// Name used for color lookup: branches color by their own name, leaves by their parent's.
    pub fn color_key(&self, idx: usize) -> &str {
        let node = &self.nodes[idx];
        match node.parent {
            Some(p) if !node.has_children() => &self.nodes[p].name,
            _ => &node.name,
        }
    }

    pub fn is_in_window(&self, idx: usize, focus: &LayoutNode) -> bool {
        let a = self.nodes[idx].angle_start;
        a >= focus.angle_start && a < focus.angle_end()
    }
}

struct Weighed {
    weight: f64,
    depth: usize,
    children: Vec<Weighed>,
}

fn weigh(node: &TreeNode) -> Result<Weighed, LayoutError> {
    if node.children.is_empty() {
        let size = node.size.unwrap_or(0.0);
        if !size.is_finite() || size < 0.0 {
            return Err(LayoutError::InvalidWeight {
                name: node.name.clone(),
                size,
            });
        }
        return Ok(Weighed { weight: size, depth: 0, children: Vec::new() });
    }
    let children = node.children.iter().map(weigh).collect::<Result<Vec<_>, _>>()?;
    let weight = children.iter().map(|c| c.weight).sum();
    let depth = 1 + children.iter().map(|c| c.depth).max().unwrap_or(0);
    Ok(Weighed { weight, depth, children })
}

struct Partitioner {
    order: ChildOrder,
    band: f64,
    nodes: Vec<LayoutNode>,
}

impl Partitioner {
    fn place(
        &mut self,
        node: &TreeNode,
        weighed: &Weighed,
        parent: Option<usize>,
        path: Vec<usize>,
        angle_start: f64,
        angle_span: f64,
    ) -> usize {
        let depth = path.len();
        let idx = self.nodes.len();
        self.nodes.push(LayoutNode {
            name: node.name.clone(),
            size: node.size,
            depth,
            angle_start,
            angle_span,
            radius_start: depth as f64 * self.band,
            radius_span: self.band,
            parent,
            children: Vec::new(),
            path: path.clone(),
        });

        let mut order: Vec<usize> = (0..node.children.len()).collect();
        if self.order == ChildOrder::WeightDescending {
            order.sort_by(|&a, &b| {
                weighed.children[b]
                    .weight
                    .partial_cmp(&weighed.children[a].weight)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        let total = weighed.weight;
        let even = angle_span / node.children.len().max(1) as f64;
        let mut cursor = angle_start;
        let mut child_ids = Vec::with_capacity(order.len());
        for i in order {
            let w = weighed.children[i].weight;
            let span = if total > 0.0 { angle_span * w / total } else { even };
            let mut child_path = path.clone();
            child_path.push(i);
            let start = cursor.min(TAU);
            child_ids.push(self.place(&node.children[i], &weighed.children[i], Some(idx), child_path, start, span));
            cursor += span;
        }
        self.nodes[idx].children = child_ids;
        idx
    }
}

/// Lays out `root` over the full circle. Pure: equal input gives bit-identical output.
pub fn partition(root: &TreeNode, order: ChildOrder) -> Result<Layout, LayoutError> {
    let weighed = weigh(root)?;
    let max_depth = weighed.depth;
    let mut p = Partitioner {
        order,
        band: 1.0 / (max_depth + 1) as f64,
        nodes: Vec::new(),
    };
    p.place(root, &weighed, None, Vec::new(), 0.0, TAU);
    Ok(Layout { nodes: p.nodes, max_depth })
}
