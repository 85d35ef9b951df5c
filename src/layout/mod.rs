//! Position computation for visible tables.

pub mod overlap;
pub mod placement;

use crate::geometry::{BoxMetrics, Point};
use crate::hierarchy::Hierarchy;
use crate::model::TableKey;
use std::collections::{HashMap, HashSet};

/// Layout algorithms selectable by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Grid,
    Circular,
    Tree,
}

impl LayoutMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "grid" => Some(Self::Grid),
            "circular" => Some(Self::Circular),
            "tree" => Some(Self::Tree),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Circular => "circular",
            Self::Tree => "tree",
        }
    }
}

/// A visible table with the inputs the placement algorithms need.
#[derive(Debug, Clone)]
pub struct VisibleTable {
    pub key: TableKey,
    /// Rendered height, collapse-aware.
    pub height: f64,
}

/// Layout engine configuration and dispatch.
pub struct LayoutEngine {
    pub metrics: BoxMetrics,
    pub grid_spacing_x: f64,
    pub grid_spacing_y: f64,
    pub tree_level_height: f64,
    pub tree_table_spacing: f64,
    /// Extra circumference factor so expanded tables keep clear of each
    /// other on the circle.
    pub circle_margin: f64,
    pub min_radius: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        let metrics = BoxMetrics::default();
        Self {
            metrics,
            // table width plus tight padding
            grid_spacing_x: metrics.table_width + 10.0,
            grid_spacing_y: 80.0,
            tree_level_height: 50.0,
            tree_table_spacing: 80.0,
            circle_margin: 1.1,
            min_radius: 150.0,
        }
    }
}

impl LayoutEngine {
    /// Produce or update a position for every visible table under the
    /// active mode, skipping keys in the manually-positioned set. An
    /// unrecognized mode (`None`) falls back to a fixed-radius ring.
    pub fn layout(
        &self,
        mode: Option<LayoutMode>,
        tables: &[VisibleTable],
        hierarchy: &Hierarchy,
        pinned: &HashSet<TableKey>,
        positions: &mut HashMap<TableKey, Point>,
    ) {
        if tables.is_empty() {
            return;
        }
        match mode {
            Some(LayoutMode::Grid) => placement::grid(self, tables, pinned, positions),
            Some(LayoutMode::Circular) => placement::circular(self, tables, pinned, positions),
            Some(LayoutMode::Tree) => {
                placement::tree(self, tables, hierarchy, pinned, positions)
            }
            None => placement::fallback_ring(self, tables, pinned, positions),
        }
        log::debug!(
            "layout: {} tables placed ({} pinned) under {:?}",
            tables.len(),
            pinned.len(),
            mode
        );
    }
}
