//! Iterative separation of overlapping table boxes.
//!
//! Runs only after state transitions that can change box sizes (expanding
//! a table), never on every frame.

use crate::geometry::{Point, Rect};
use crate::model::TableKey;
use std::collections::HashMap;

pub const MAX_ITERATIONS: usize = 20;
const PUSH_STEP: f64 = 50.0;

/// A table box participating in overlap resolution.
#[derive(Debug, Clone)]
pub struct TableBox {
    pub key: TableKey,
    pub width: f64,
    pub height: f64,
}

/// Push every overlapping pair apart along the vector between their
/// centers by a fixed step, until no pair overlaps or the iteration
/// bound is hit. Returns the number of iterations performed; an
/// already-clean configuration performs zero and moves nothing.
pub fn spread(boxes: &[TableBox], positions: &mut HashMap<TableKey, Point>) -> usize {
    for iteration in 0..MAX_ITERATIONS {
        let rects: Vec<(usize, Rect)> = boxes
            .iter()
            .enumerate()
            .filter_map(|(i, b)| {
                positions
                    .get(&b.key)
                    .map(|p| (i, Rect::new(p.x, p.y, b.width, b.height)))
            })
            .collect();

        let mut moved = false;
        for i in 0..rects.len() {
            for j in (i + 1)..rects.len() {
                let (ai, a) = rects[i];
                let (bi, b) = rects[j];
                if !a.overlaps(&b) {
                    continue;
                }
                let dx = a.center().x - b.center().x;
                let dy = a.center().y - b.center().y;
                let dist = (dx * dx + dy * dy).sqrt();
                // Coincident centers have no direction to push along;
                // fall back to a unit push on the x axis.
                let (offset_x, offset_y) = if dist < f64::EPSILON {
                    (PUSH_STEP, 0.0)
                } else {
                    let dist = dist.max(1.0);
                    (dx / dist * PUSH_STEP, dy / dist * PUSH_STEP)
                };

                if let Some(pos) = positions.get_mut(&boxes[ai].key) {
                    pos.x += offset_x;
                    pos.y += offset_y;
                }
                if let Some(pos) = positions.get_mut(&boxes[bi].key) {
                    pos.x -= offset_x;
                    pos.y -= offset_y;
                }
                moved = true;
            }
        }

        if !moved {
            return iteration;
        }
    }
    MAX_ITERATIONS
}
