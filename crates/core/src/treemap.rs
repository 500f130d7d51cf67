use crate::hierarchy::Hierarchy;
use crate::model::{NodeId, Rect};

/// Assigns every node of a sorted hierarchy a rectangle inside
/// `width × height`. Leaf rectangles partition the area proportionally to
/// their aggregate value, separated by `padding_inner` between siblings.
pub trait Tiling {
    fn tile(&self, tree: &mut Hierarchy, width: f64, height: f64, padding_inner: f64);
}

/// Squarified treemap (Bruls, Huizing, van Wijk) with the golden ratio as
/// target aspect.
#[derive(Clone, Copy, Debug)]
pub struct Squarify {
    pub ratio: f64,
}

impl Default for Squarify {
    fn default() -> Self {
        Self {
            ratio: (1.0 + 5f64.sqrt()) / 2.0,
        }
    }
}

impl Tiling for Squarify {
    fn tile(&self, tree: &mut Hierarchy, width: f64, height: f64, padding_inner: f64) {
        if tree.nodes.is_empty() {
            return;
        }
        let root = tree.root;
        tree.get_mut(root).rect = Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0));

        // padding[d] is the inset applied to nodes at depth d.
        let mut padding = vec![0.0f64];
        for id in tree.each_before() {
            let depth = tree.get(id).depth as usize;
            if padding.len() <= depth + 1 {
                padding.resize(depth + 2, 0.0);
            }
            let p = padding[depth];
            let r = tree.get(id).rect;
            let rect = collapse(Rect::new(r.x0 + p, r.y0 + p, r.x1 - p, r.y1 - p));
            tree.get_mut(id).rect = rect;

            if tree.get(id).is_leaf() {
                continue;
            }
            let p = padding_inner / 2.0;
            padding[depth + 1] = p;
            let inner = collapse(Rect::new(rect.x0 - p, rect.y0 - p, rect.x1 + p, rect.y1 + p));
            self.squarify(tree, id, inner);
        }
    }
}

fn collapse(mut r: Rect) -> Rect {
    if r.x1 < r.x0 {
        r.x0 = (r.x0 + r.x1) / 2.0;
        r.x1 = r.x0;
    }
    if r.y1 < r.y0 {
        r.y0 = (r.y0 + r.y1) / 2.0;
        r.y1 = r.y0;
    }
    r
}

impl Squarify {
    fn squarify(&self, tree: &mut Hierarchy, parent: NodeId, area: Rect) {
        let children = tree.get(parent).children.clone();
        let n = children.len();
        let Rect {
            mut x0,
            mut y0,
            x1,
            y1,
        } = area;
        let mut value = tree.get(parent).aggregate;
        let mut i0 = 0;
        let mut i1 = 0;

        while i0 < n {
            let dx = x1 - x0;
            let dy = y1 - y0;

            // Skip leading zero-valued nodes into the row.
            let mut sum = tree.get(children[i1]).aggregate;
            i1 += 1;
            while sum == 0.0 && i1 < n {
                sum = tree.get(children[i1]).aggregate;
                i1 += 1;
            }
            let mut min_value = sum;
            let mut max_value = sum;
            let alpha = (dy / dx).max(dx / dy) / (value * self.ratio);
            let mut beta = sum * sum * alpha;
            let mut min_ratio = (max_value / beta).max(beta / min_value);

            // Grow the row while the worst aspect ratio keeps improving.
            while i1 < n {
                let v = tree.get(children[i1]).aggregate;
                sum += v;
                min_value = min_value.min(v);
                max_value = max_value.max(v);
                beta = sum * sum * alpha;
                let ratio = (max_value / beta).max(beta / min_value);
                if ratio > min_ratio {
                    sum -= v;
                    break;
                }
                min_ratio = ratio;
                i1 += 1;
            }

            let row = &children[i0..i1];
            if dx < dy {
                let y2 = if value > 0.0 { y0 + dy * sum / value } else { y1 };
                dice(tree, row, sum, Rect::new(x0, y0, x1, y2));
                y0 = y2;
            } else {
                let x2 = if value > 0.0 { x0 + dx * sum / value } else { x1 };
                slice(tree, row, sum, Rect::new(x0, y0, x2, y1));
                x0 = x2;
            }
            value -= sum;
            i0 = i1;
        }
    }
}

/// Lays the row out left to right across `r`.
fn dice(tree: &mut Hierarchy, row: &[NodeId], row_value: f64, r: Rect) {
    let k = if row_value > 0.0 { (r.x1 - r.x0) / row_value } else { 0.0 };
    let mut x = r.x0;
    for id in row {
        let node = tree.get_mut(*id);
        let x_next = x + node.aggregate * k;
        node.rect = Rect::new(x, r.y0, x_next, r.y1);
        x = x_next;
    }
}

/// Lays the row out top to bottom across `r`.
fn slice(tree: &mut Hierarchy, row: &[NodeId], row_value: f64, r: Rect) {
    let k = if row_value > 0.0 { (r.y1 - r.y0) / row_value } else { 0.0 };
    let mut y = r.y0;
    for id in row {
        let node = tree.get_mut(*id);
        let y_next = y + node.aggregate * k;
        node.rect = Rect::new(r.x0, y, r.x1, y_next);
        y = y_next;
    }
}
