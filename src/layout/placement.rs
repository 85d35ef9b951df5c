//! Placement algorithms: grid, circular, tree and the fallback ring.
//!
//! All algorithms center their arrangement on the virtual canvas center
//! and never touch keys in the manually-positioned set.

use super::{LayoutEngine, VisibleTable};
use crate::geometry::{canvas_center, Point};
use crate::hierarchy::Hierarchy;
use crate::model::TableKey;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::f64::consts::PI;

/// `ceil(sqrt(N))` columns, fixed spacing, whole grid centered.
pub(super) fn grid(
    engine: &LayoutEngine,
    tables: &[VisibleTable],
    pinned: &HashSet<TableKey>,
    positions: &mut HashMap<TableKey, Point>,
) {
    let center = canvas_center();
    let count = tables.len();
    let cols = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);

    let total_width = (cols - 1) as f64 * engine.grid_spacing_x;
    let total_height = (rows - 1) as f64 * engine.grid_spacing_y;
    let start_x = center.x - total_width / 2.0;
    let start_y = center.y - total_height / 2.0;

    for (index, table) in tables.iter().enumerate() {
        if pinned.contains(&table.key) {
            continue;
        }
        let row = index / cols;
        let col = index % cols;
        positions.insert(
            table.key.clone(),
            Point::new(
                start_x + col as f64 * engine.grid_spacing_x,
                start_y + row as f64 * engine.grid_spacing_y,
            ),
        );
    }
}

/// Evenly spaced around a circle whose radius is derived from the tallest
/// rendered table, so expanded tables never overlap their neighbors.
pub(super) fn circular(
    engine: &LayoutEngine,
    tables: &[VisibleTable],
    pinned: &HashSet<TableKey>,
    positions: &mut HashMap<TableKey, Point>,
) {
    let center = canvas_center();
    let count = tables.len();
    let width = engine.metrics.table_width;

    let tallest = tables
        .iter()
        .map(|t| t.height)
        .fold(engine.metrics.min_height, f64::max);

    let max_dim = width.max(tallest);
    let circumference = count as f64 * max_dim * engine.circle_margin;
    let radius = (circumference / (2.0 * PI)).max(engine.min_radius);

    for (index, table) in tables.iter().enumerate() {
        if pinned.contains(&table.key) {
            continue;
        }
        let angle = index as f64 / count as f64 * 2.0 * PI;
        positions.insert(
            table.key.clone(),
            Point::new(
                center.x + radius * angle.cos() - width / 2.0,
                center.y + radius * angle.sin() - tallest / 2.0,
            ),
        );
    }
}

/// One horizontal row per hierarchy level, rows stacked vertically, each
/// row and the whole stack centered on the canvas center.
pub(super) fn tree(
    engine: &LayoutEngine,
    tables: &[VisibleTable],
    hierarchy: &Hierarchy,
    pinned: &HashSet<TableKey>,
    positions: &mut HashMap<TableKey, Point>,
) {
    let center = canvas_center();

    let mut level_groups: BTreeMap<u32, Vec<&TableKey>> = BTreeMap::new();
    for table in tables {
        level_groups
            .entry(hierarchy.level(&table.key))
            .or_default()
            .push(&table.key);
    }

    let max_level = level_groups.keys().last().copied().unwrap_or(0);
    let total_height = max_level as f64 * engine.tree_level_height;
    let start_y = center.y - total_height / 2.0;

    for (level, keys) in &level_groups {
        let row_y = start_y + *level as f64 * engine.tree_level_height;
        let total_width = (keys.len() - 1) as f64 * engine.tree_table_spacing;
        let start_x = center.x - total_width / 2.0;

        for (index, key) in keys.iter().enumerate() {
            if pinned.contains(key) {
                continue;
            }
            positions.insert(
                (*key).clone(),
                Point::new(start_x + index as f64 * engine.tree_table_spacing, row_y),
            );
        }
    }
}

/// Fallback for an unrecognized mode: a fixed-radius ring sized from the
/// canvas half-dimensions.
pub(super) fn fallback_ring(
    engine: &LayoutEngine,
    tables: &[VisibleTable],
    pinned: &HashSet<TableKey>,
    positions: &mut HashMap<TableKey, Point>,
) {
    let center = canvas_center();
    let count = tables.len();
    let radius = center.x.min(center.y) * 0.6;
    let half_width = engine.metrics.table_width / 2.0;

    for (index, table) in tables.iter().enumerate() {
        if pinned.contains(&table.key) {
            continue;
        }
        let angle = index as f64 / count as f64 * 2.0 * PI;
        positions.insert(
            table.key.clone(),
            Point::new(
                center.x + radius * angle.cos() - half_width,
                center.y + radius * angle.sin() - half_width,
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy;
    use crate::model::Relationship;

    fn table(name: &str, height: f64) -> VisibleTable {
        VisibleTable {
            key: TableKey::new("app", name),
            height,
        }
    }

    #[test]
    fn test_grid_rows_and_columns() {
        let engine = LayoutEngine::default();
        let tables: Vec<VisibleTable> =
            (0..5).map(|i| table(&format!("t{i}"), 60.0)).collect();
        let mut positions = HashMap::new();
        grid(&engine, &tables, &HashSet::new(), &mut positions);

        // 5 tables -> ceil(sqrt(5)) = 3 columns, so t3 starts row 1.
        let t0 = positions[&TableKey::new("app", "t0")];
        let t1 = positions[&TableKey::new("app", "t1")];
        let t3 = positions[&TableKey::new("app", "t3")];
        assert_eq!(t1.x - t0.x, engine.grid_spacing_x);
        assert_eq!(t1.y, t0.y);
        assert_eq!(t3.x, t0.x);
        assert_eq!(t3.y - t0.y, engine.grid_spacing_y);
    }

    #[test]
    fn test_grid_is_centered_on_canvas() {
        let engine = LayoutEngine::default();
        let tables: Vec<VisibleTable> =
            (0..4).map(|i| table(&format!("t{i}"), 60.0)).collect();
        let mut positions = HashMap::new();
        grid(&engine, &tables, &HashSet::new(), &mut positions);

        let xs: Vec<f64> = positions.values().map(|p| p.x).collect();
        let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(((min + max) / 2.0 - canvas_center().x).abs() < 1e-6);
    }

    #[test]
    fn test_circular_radius_grows_with_expanded_tables() {
        let engine = LayoutEngine::default();
        let collapsed: Vec<VisibleTable> =
            (0..12).map(|i| table(&format!("t{i}"), 60.0)).collect();
        let expanded: Vec<VisibleTable> =
            (0..12).map(|i| table(&format!("t{i}"), 350.0)).collect();

        let mut small = HashMap::new();
        circular(&engine, &collapsed, &HashSet::new(), &mut small);
        let mut large = HashMap::new();
        circular(&engine, &expanded, &HashSet::new(), &mut large);

        let spread = |m: &HashMap<TableKey, Point>| {
            let xs: Vec<f64> = m.values().map(|p| p.x).collect();
            xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
                - xs.iter().cloned().fold(f64::INFINITY, f64::min)
        };
        assert!(spread(&large) > spread(&small));
    }

    #[test]
    fn test_circular_enforces_minimum_radius() {
        let engine = LayoutEngine::default();
        let tables = vec![table("only", 60.0)];
        let mut positions = HashMap::new();
        circular(&engine, &tables, &HashSet::new(), &mut positions);

        let p = positions[&TableKey::new("app", "only")];
        // angle 0: the box sits min_radius to the right of center.
        assert_eq!(
            p.x,
            canvas_center().x + engine.min_radius - engine.metrics.table_width / 2.0
        );
    }

    #[test]
    fn test_tree_stacks_levels_one_height_apart() {
        let engine = LayoutEngine::default();
        let tables = vec![table("customers", 60.0), table("orders", 60.0)];
        let keys: Vec<TableKey> = tables.iter().map(|t| t.key.clone()).collect();
        let rels = vec![Relationship {
            name: "fk_orders_customer".to_string(),
            source_schema: "app".to_string(),
            source_table: "orders".to_string(),
            source_column: "customer_id".to_string(),
            target_schema: "app".to_string(),
            target_table: "customers".to_string(),
            target_column: "id".to_string(),
        }];
        let h = hierarchy::build(&keys, &rels);

        let mut positions = HashMap::new();
        tree(&engine, &tables, &h, &HashSet::new(), &mut positions);

        let customers = positions[&TableKey::new("app", "customers")];
        let orders = positions[&TableKey::new("app", "orders")];
        assert_eq!(orders.y - customers.y, engine.tree_level_height);
        // Single-table rows are centered under the canvas center.
        assert_eq!(customers.x, canvas_center().x);
        assert_eq!(orders.x, canvas_center().x);
    }

    #[test]
    fn test_fallback_ring_uses_fixed_radius() {
        let engine = LayoutEngine::default();
        let tables = vec![table("a", 60.0), table("b", 60.0)];
        let mut positions = HashMap::new();
        fallback_ring(&engine, &tables, &HashSet::new(), &mut positions);

        let center = canvas_center();
        let radius = center.x.min(center.y) * 0.6;
        let a = positions[&TableKey::new("app", "a")];
        assert_eq!(a.x, center.x + radius - engine.metrics.table_width / 2.0);
    }
}
