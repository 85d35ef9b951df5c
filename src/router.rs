//! Connector routing between related tables.
//!
//! Each visible relationship becomes a cubic curve from a source anchor
//! to a target anchor, with a label at the midpoint nudged downward when
//! it would collide with an already-placed label.

use crate::geometry::{BoxMetrics, Point};
use crate::model::{ErdDocument, Relationship, TableKey};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

const CONTROL_OFFSET_CAP: f64 = 80.0;
const LABEL_WINDOW_X: f64 = 40.0;
const LABEL_WINDOW_Y: f64 = 14.0;
const LABEL_STEP: f64 = 14.0;
const LABEL_MAX_OFFSET: f64 = 70.0;

/// A routed connector: cubic curve endpoints and control points plus the
/// de-overlapped label position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub name: String,
    pub source: Point,
    pub target: Point,
    pub control1: Point,
    pub control2: Point,
    pub label: String,
    pub label_at: Point,
}

pub struct ConnectorRouter {
    pub metrics: BoxMetrics,
}

impl Default for ConnectorRouter {
    fn default() -> Self {
        Self {
            metrics: BoxMetrics::default(),
        }
    }
}

impl ConnectorRouter {
    /// Route every relationship whose endpoint schemas are visible and
    /// endpoint tables are positioned; everything else is omitted.
    pub fn route(
        &self,
        doc: &ErdDocument,
        visible_schemas: &HashSet<String>,
        collapsed: &HashSet<TableKey>,
        positions: &HashMap<TableKey, Point>,
    ) -> Vec<Connector> {
        let mut placed_labels: Vec<Point> = Vec::new();
        doc.relationships
            .iter()
            .filter(|rel| {
                visible_schemas.contains(&rel.source_schema)
                    && visible_schemas.contains(&rel.target_schema)
            })
            .filter_map(|rel| self.route_one(rel, doc, collapsed, positions, &mut placed_labels))
            .collect()
    }

    fn route_one(
        &self,
        rel: &Relationship,
        doc: &ErdDocument,
        collapsed: &HashSet<TableKey>,
        positions: &HashMap<TableKey, Point>,
        placed_labels: &mut Vec<Point>,
    ) -> Option<Connector> {
        let source_key = rel.source_key();
        let target_key = rel.target_key();
        let source_pos = positions.get(&source_key)?;
        let target_pos = positions.get(&target_key)?;

        let width = self.metrics.table_width;
        let border = self.metrics.border_offset;

        // Header centers decide the attachment sides.
        let source_center = Point::new(
            source_pos.x + width / 2.0,
            source_pos.y + self.metrics.header_height / 2.0,
        );
        let target_center = Point::new(
            target_pos.x + width / 2.0,
            target_pos.y + self.metrics.header_height / 2.0,
        );
        let dx = target_center.x - source_center.x;
        let dy = target_center.y - source_center.y;

        // Horizontal sides are used either way; the vertical-dominant case
        // only changes the tie-break so the choice stays deterministic.
        let (source_x, target_x) = if dx.abs() > dy.abs() {
            if dx > 0.0 {
                (source_pos.x + width + border, target_pos.x - border)
            } else {
                (source_pos.x - border, target_pos.x + width + border)
            }
        } else if dx >= 0.0 {
            (source_pos.x + width + border, target_pos.x - border)
        } else {
            (source_pos.x - border, target_pos.x + width + border)
        };

        let source_row = doc.column_row(&rel.source_schema, &rel.source_table, &rel.source_column);
        let target_row = doc.column_row(&rel.target_schema, &rel.target_table, &rel.target_column);
        let source_y =
            self.metrics
                .anchor_y(source_pos.y, collapsed.contains(&source_key), source_row);
        let target_y =
            self.metrics
                .anchor_y(target_pos.y, collapsed.contains(&target_key), target_row);

        // Cosmetic S-curve: control points offset away from the other
        // table. Same tie-break as the side selection, so the curve
        // always leaves on the attached side.
        let control_offset = ((target_x - source_x).abs() * 0.3).min(CONTROL_OFFSET_CAP);
        let (control1_x, control2_x) = if dx >= 0.0 {
            (source_x + control_offset, target_x - control_offset)
        } else {
            (source_x - control_offset, target_x + control_offset)
        };

        let label_at = place_label(
            Point::new((source_x + target_x) / 2.0, (source_y + target_y) / 2.0),
            placed_labels,
        );

        Some(Connector {
            name: rel.name.clone(),
            source: Point::new(source_x, source_y),
            target: Point::new(target_x, target_y),
            control1: Point::new(control1_x, source_y),
            control2: Point::new(control2_x, target_y),
            label: format!("{} → {}", rel.source_column, rel.target_column),
            label_at,
        })
    }
}

/// Offset a label downward in fixed increments while it sits within the
/// collision window of an already-placed label, up to a bounded distance.
fn place_label(midpoint: Point, placed: &mut Vec<Point>) -> Point {
    let x = midpoint.x;
    let base_y = midpoint.y - 2.0;
    let mut y = base_y;
    let mut offset = 0.0;

    while placed
        .iter()
        .any(|p| (p.x - x).abs() < LABEL_WINDOW_X && (p.y - y).abs() < LABEL_WINDOW_Y)
        && offset < LABEL_MAX_OFFSET
    {
        offset += LABEL_STEP;
        y = base_y + offset;
    }

    let at = Point::new(x, y);
    placed.push(at);
    at
}
