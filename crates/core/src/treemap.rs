use crate::model::{Hierarchy, NodeId, Rect};

/// Compute the treemap layout over a `width` x `height` canvas area.
///
/// The root receives the full area; each internal node's rectangle is then
/// partitioned among its children proportional to aggregate value using the
/// squarified algorithm (Bruls et al.): keep adding items to the current row
/// while the worst aspect ratio improves, lay each row along the shorter
/// remaining side, and absorb floating-point remainder into the final strip
/// so siblings tile their parent without gaps or overlaps.
pub fn layout(hierarchy: &mut Hierarchy, width: f64, height: f64) {
    let root = hierarchy.root;
    hierarchy.get_mut(root).rect = Some(Rect::new(0.0, 0.0, width, height));
    tracing::info!(
        "laying out {} leaves in {:.0}x{:.0} area",
        hierarchy.leaves().count(),
        width,
        height
    );
    layout_children(hierarchy, root);
}

fn layout_children(hierarchy: &mut Hierarchy, parent: NodeId) {
    let parent_rect = match hierarchy.get(parent).rect {
        Some(r) => r,
        None => return,
    };
    if hierarchy.get(parent).children.is_empty() {
        return;
    }
    let parent_aggregate = hierarchy.get(parent).aggregate;
    if parent_aggregate <= 0.0 || parent_rect.area() <= 0.0 {
        tracing::debug!(
            "skipping layout under {:?} (aggregate {}, area {})",
            hierarchy.get(parent).name,
            parent_aggregate,
            parent_rect.area()
        );
        return;
    }

    let total_area = parent_rect.area();
    let mut items: Vec<(NodeId, f64)> = hierarchy
        .get(parent)
        .children
        .iter()
        .map(|&id| {
            let area = hierarchy.get(id).aggregate / parent_aggregate * total_area;
            (id, area)
        })
        .filter(|&(_, area)| area.is_finite() && area > 0.0)
        .collect();
    let dropped = hierarchy.get(parent).children.len() - items.len();
    if dropped > 0 {
        tracing::debug!(
            "dropped {} zero-weight children under {:?}",
            dropped,
            hierarchy.get(parent).name
        );
    }
    if items.is_empty() {
        return;
    }
    // Largest-first gives squarify its best aspect ratios.
    items.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (id, rect) in squarify(&items, parent_rect) {
        hierarchy.get_mut(id).rect = Some(rect);
        layout_children(hierarchy, id);
    }
}

fn squarify(items: &[(NodeId, f64)], within: Rect) -> Vec<(NodeId, Rect)> {
    let mut out = Vec::with_capacity(items.len());
    let mut x = within.x0;
    let mut y = within.y0;
    let mut w = within.width();
    let mut h = within.height();

    let mut idx = 0usize;
    let mut row_start = 0usize;
    let mut row_sum = 0.0;
    let mut row_min = f64::INFINITY;
    let mut row_max = 0.0_f64;

    while idx < items.len() {
        if w <= 1e-9 || h <= 1e-9 {
            break;
        }
        let area = items[idx].1;
        let side = w.min(h);
        let current = if row_sum > 0.0 {
            worst_aspect(row_min, row_max, row_sum, side)
        } else {
            f64::INFINITY
        };
        let next = worst_aspect(row_min.min(area), row_max.max(area), row_sum + area, side);

        // Grow the row while its worst aspect ratio improves.
        if row_sum <= 0.0 || next <= current {
            row_sum += area;
            row_min = row_min.min(area);
            row_max = row_max.max(area);
            idx += 1;
            continue;
        }

        layout_row(
            &items[row_start..idx],
            row_sum,
            &mut x,
            &mut y,
            &mut w,
            &mut h,
            &mut out,
        );
        row_start = idx;
        row_sum = 0.0;
        row_min = f64::INFINITY;
        row_max = 0.0;
    }

    if row_sum > 0.0 && row_start < idx {
        layout_row(
            &items[row_start..idx],
            row_sum,
            &mut x,
            &mut y,
            &mut w,
            &mut h,
            &mut out,
        );
    }

    out
}

fn layout_row(
    row: &[(NodeId, f64)],
    row_sum: f64,
    x: &mut f64,
    y: &mut f64,
    w: &mut f64,
    h: &mut f64,
    out: &mut Vec<(NodeId, Rect)>,
) {
    if row.is_empty() || row_sum <= 0.0 || *w <= 1e-9 || *h <= 1e-9 {
        return;
    }

    // Lay the strip along the shorter remaining side.
    let horizontal = *w <= *h;
    let short = if horizontal { *w } else { *h };
    let thickness = row_sum / short;
    if !thickness.is_finite() || thickness <= 0.0 {
        return;
    }

    let mut offset = 0.0;
    for (i, &(id, area)) in row.iter().enumerate() {
        let mut length = area / thickness;
        if !length.is_finite() || length <= 0.0 {
            continue;
        }
        // Absorb floating-point error into the final rect of the strip.
        if i == row.len() - 1 {
            let remaining = if horizontal {
                (*w - offset).max(0.0)
            } else {
                (*h - offset).max(0.0)
            };
            if remaining.is_finite() && remaining > 0.0 {
                length = remaining;
            }
        }

        let rect = if horizontal {
            Rect::new(*x + offset, *y, *x + offset + length, *y + thickness)
        } else {
            Rect::new(*x, *y + offset, *x + thickness, *y + offset + length)
        };
        out.push((id, rect));
        offset += length;
    }

    if horizontal {
        *y += thickness;
        *h = (*h - thickness).max(0.0);
    } else {
        *x += thickness;
        *w = (*w - thickness).max(0.0);
    }
}

fn worst_aspect(min_area: f64, max_area: f64, sum: f64, side: f64) -> f64 {
    if sum <= 0.0 || side <= 0.0 || min_area <= 0.0 || max_area <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let a = (side_sq * max_area) / sum_sq;
    let b = sum_sq / (side_sq * min_area);
    a.max(b)
}
