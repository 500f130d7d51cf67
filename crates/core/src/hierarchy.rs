use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::model::*;

/// Arena-backed tree built from a [`DatasetNode`] document. Node ids index
/// into `nodes`; parents always precede their children.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Hierarchy {
    pub root: NodeId,
    pub nodes: Vec<TreeNode>,
}

impl Hierarchy {
    /// Builds the tree, sums leaf values upward and orders siblings by
    /// height, then value (both descending, stable on ties).
    pub fn build(doc: &DatasetNode) -> Result<Self> {
        if doc.children.as_ref().map_or(true, Vec::is_empty) && doc.value.is_none() {
            return Err(ChartError::Empty);
        }
        let mut nodes: Vec<TreeNode> = Vec::with_capacity(128);
        push_node(&mut nodes, doc, None, 0);

        // Pre-order arena: walking backwards visits every child before its parent.
        for idx in (0..nodes.len()).rev() {
            if nodes[idx].is_leaf() {
                nodes[idx].aggregate = nodes[idx].value.unwrap_or(0.0);
                nodes[idx].height = 0;
                continue;
            }
            let (sum, height) = nodes[idx]
                .children
                .iter()
                .map(|c| &nodes[c.0 as usize])
                .fold((0.0, 0), |(s, h), c| (s + c.aggregate, h.max(c.height + 1)));
            nodes[idx].aggregate = sum;
            nodes[idx].height = height;
        }

        for idx in 0..nodes.len() {
            let mut children = std::mem::take(&mut nodes[idx].children);
            children.sort_by(|a, b| {
                let (a, b) = (&nodes[a.0 as usize], &nodes[b.0 as usize]);
                b.height
                    .cmp(&a.height)
                    .then_with(|| b.aggregate.total_cmp(&a.aggregate))
            });
            nodes[idx].children = children;
        }

        tracing::debug!(nodes = nodes.len(), total = nodes[0].aggregate, "built hierarchy");
        Ok(Self {
            root: NodeId(0),
            nodes,
        })
    }

    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0 as usize]
    }

    pub fn root(&self) -> &TreeNode {
        self.get(self.root)
    }

    pub fn total(&self) -> f64 {
        self.root().aggregate
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &TreeNode> + '_ {
        self.get(id).children.iter().map(move |c| self.get(*c))
    }

    /// Pre-order traversal honouring sibling order.
    pub fn each_before(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.get(id).children.iter().rev().copied());
        }
        out
    }

    pub fn leaves(&self) -> Vec<&TreeNode> {
        self.each_before()
            .into_iter()
            .map(|id| self.get(id))
            .filter(|n| n.is_leaf())
            .collect()
    }
}

fn push_node(nodes: &mut Vec<TreeNode>, node: &DatasetNode, parent: Option<NodeId>, depth: u32) {
    let id = NodeId(nodes.len() as u64);
    let path_id = match parent {
        Some(pid) => format!("{}.{}", nodes[pid.0 as usize].path_id, node.name),
        None => node.name.clone(),
    };
    nodes.push(TreeNode {
        id,
        parent,
        path_id,
        name: node.name.clone(),
        category: node.category.clone(),
        value: node.value,
        aggregate: 0.0,
        height: 0,
        depth,
        children: Vec::new(),
        rect: Rect::default(),
    });
    if let Some(pid) = parent {
        nodes[pid.0 as usize].children.push(id);
    }
    for child in node.children.iter().flatten() {
        push_node(nodes, child, Some(id), depth + 1);
    }
}
