//! Interactive view-model tying the document, hierarchy, layout engine,
//! viewport, connector router and search together.
//!
//! All mutation happens through the entry points below, synchronously on
//! the caller's thread. The rendering shell feeds pointer events tagged
//! with an explicit [`PointerTarget`] and signals `geometry_settled` once
//! a size-changing state transition has been committed on screen; the
//! core never inspects rendered elements and never waits on timers.

use crate::geometry::{BoxMetrics, Point, Rect};
use crate::hierarchy;
use crate::layout::overlap::{self, TableBox};
use crate::layout::{LayoutEngine, LayoutMode, VisibleTable};
use crate::model::{ColumnKey, ErdDocument, TableKey};
use crate::router::{Connector, ConnectorRouter};
use crate::search::{self, SearchHit, VISIBLE_RESULTS};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Host-supplied static configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    /// Initial layout mode; unrecognized names select the fallback ring.
    pub layout: Option<String>,
    /// Allow-list of schema names; empty means all schemas.
    pub schemas: Vec<String>,
    /// Allow-list of table names; empty means all tables.
    pub tables: Vec<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Interactive region hit by a pointer event, tagged by the renderer.
/// Pan-vs-drag is decided from this tag alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    Table(TableKey),
    Canvas,
    Controls,
    SchemaFilter,
    SearchPanel,
}

#[derive(Debug, Clone)]
enum Drag {
    Table {
        key: TableKey,
        anchor: Point,
        origin: Point,
    },
    Pan {
        anchor: Point,
        origin: Point,
    },
}

/// Work queued until the renderer reports the last size-changing state
/// transition has been committed.
#[derive(Debug, Clone, Copy, Default)]
struct Pending {
    relayout: bool,
    spread: bool,
    fit: bool,
}

pub struct ErdView {
    doc: ErdDocument,
    table_filter: Vec<String>,
    mode: Option<LayoutMode>,
    engine: LayoutEngine,
    router: ConnectorRouter,

    positions: HashMap<TableKey, Point>,
    manually_positioned: HashSet<TableKey>,
    collapsed: HashSet<TableKey>,
    visible_schemas: HashSet<String>,

    highlighted_tables: HashSet<TableKey>,
    highlighted_columns: HashSet<ColumnKey>,
    highlighted_relations: HashSet<String>,
    selected: Option<TableKey>,

    viewport: Viewport,
    drag: Option<Drag>,
    initialized: bool,
    pending: Pending,

    query: String,
    results: Vec<SearchHit>,
    show_all_results: bool,
}

impl ErdView {
    pub fn new(doc: ErdDocument, config: ViewConfig) -> Self {
        let visible_schemas: HashSet<String> = if config.schemas.is_empty() {
            doc.schemas.iter().map(|s| s.name.clone()).collect()
        } else {
            config.schemas.iter().cloned().collect()
        };

        // None means "unrecognized mode"; an absent config falls back to
        // the circular default.
        let mode = match config.layout.as_deref() {
            None => Some(LayoutMode::Circular),
            Some(name) => LayoutMode::from_str(name),
        };

        // Every table starts collapsed.
        let collapsed: HashSet<TableKey> = doc
            .schemas
            .iter()
            .flat_map(|s| s.tables.iter().map(move |t| TableKey::new(&s.name, &t.name)))
            .collect();

        let mut view = Self {
            doc,
            table_filter: config.tables,
            mode,
            engine: LayoutEngine::default(),
            router: ConnectorRouter::default(),
            positions: HashMap::new(),
            manually_positioned: HashSet::new(),
            collapsed,
            visible_schemas,
            highlighted_tables: HashSet::new(),
            highlighted_columns: HashSet::new(),
            highlighted_relations: HashSet::new(),
            selected: None,
            viewport: Viewport::new(
                config.width.unwrap_or(1200.0),
                config.height.unwrap_or(800.0),
            ),
            drag: None,
            initialized: false,
            pending: Pending::default(),
            query: String::new(),
            results: Vec::new(),
            show_all_results: false,
        };

        view.recompute_layout();
        // Auto-fit exactly once after the first successful layout, so it
        // never fights later user pan/zoom.
        if !view.initialized {
            view.auto_fit();
            view.initialized = true;
        }
        view
    }

    fn metrics(&self) -> &BoxMetrics {
        &self.engine.metrics
    }

    fn table_visible(&self, table_name: &str) -> bool {
        self.table_filter.is_empty() || self.table_filter.iter().any(|t| t == table_name)
    }

    /// Visible tables in document encounter order, with collapse-aware
    /// heights and column counts.
    fn visible_tables(&self) -> Vec<(TableKey, usize)> {
        let mut out = Vec::new();
        for schema in &self.doc.schemas {
            if !self.visible_schemas.contains(&schema.name) {
                continue;
            }
            for table in &schema.tables {
                if !self.table_visible(&table.name) {
                    continue;
                }
                out.push((
                    TableKey::new(&schema.name, &table.name),
                    table.columns.len(),
                ));
            }
        }
        out
    }

    fn layout_inputs(&self) -> Vec<VisibleTable> {
        self.visible_tables()
            .into_iter()
            .map(|(key, columns)| {
                let height = self.metrics().height(self.collapsed.contains(&key), columns);
                VisibleTable { key, height }
            })
            .collect()
    }

    fn table_boxes(&self) -> Vec<TableBox> {
        let width = self.metrics().table_width;
        self.visible_tables()
            .into_iter()
            .map(|(key, columns)| {
                let height = self.metrics().height(self.collapsed.contains(&key), columns);
                TableBox { key, width, height }
            })
            .collect()
    }

    /// Bounding box of all positioned visible tables using their actual
    /// rendered sizes. `None` until layout has run.
    fn bounds(&self) -> Option<Rect> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut any = false;

        for b in self.table_boxes() {
            let Some(pos) = self.positions.get(&b.key) else {
                continue;
            };
            any = true;
            min_x = min_x.min(pos.x);
            min_y = min_y.min(pos.y);
            max_x = max_x.max(pos.x + b.width);
            max_y = max_y.max(pos.y + b.height);
        }

        any.then(|| Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Run the layout engine for the current visible set. Positions of
    /// hidden tables are dropped unless manually placed, so re-showing a
    /// pinned table restores it where the user left it.
    fn recompute_layout(&mut self) {
        let tables = self.layout_inputs();
        let keys: Vec<TableKey> = tables.iter().map(|t| t.key.clone()).collect();
        let visible: HashSet<&TableKey> = keys.iter().collect();
        self.positions
            .retain(|key, _| visible.contains(key) || self.manually_positioned.contains(key));

        if tables.is_empty() {
            return;
        }
        let hierarchy = hierarchy::build(&keys, &self.doc.relationships);
        self.engine.layout(
            self.mode,
            &tables,
            &hierarchy,
            &self.manually_positioned,
            &mut self.positions,
        );
    }

    // --- explicit mutation entry points ---

    pub fn set_layout_mode(&mut self, mode: &str) {
        self.mode = LayoutMode::from_str(mode);
        self.recompute_layout();
    }

    pub fn layout_mode(&self) -> Option<LayoutMode> {
        self.mode
    }

    pub fn toggle_schema(&mut self, name: &str) {
        if !self.visible_schemas.remove(name) {
            self.visible_schemas.insert(name.to_string());
        }
        self.recompute_layout();
        self.auto_fit();
    }

    pub fn toggle_table_collapse(&mut self, key: &TableKey) {
        if self.collapsed.remove(key) {
            // Expansion can newly cause overlap; resolve once the renderer
            // confirms the new box size is committed.
            self.pending.spread = true;
        } else {
            self.collapsed.insert(key.clone());
        }
    }

    pub fn all_collapsed(&self) -> bool {
        self.visible_tables()
            .iter()
            .all(|(key, _)| self.collapsed.contains(key))
    }

    pub fn toggle_all_tables(&mut self) {
        if self.all_collapsed() {
            self.collapsed.clear();
            self.pending.relayout = true;
            self.pending.spread = true;
            self.pending.fit = true;
        } else {
            for (key, _) in self.visible_tables() {
                self.collapsed.insert(key);
            }
            // Collapsing preserves the current framing.
        }
    }

    /// Completion signal from the renderer: the last size-changing state
    /// transition is committed, queued follow-up work can run.
    pub fn geometry_settled(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if pending.relayout {
            self.recompute_layout();
        }
        if pending.spread {
            self.spread_overlapping();
        }
        if pending.fit {
            self.auto_fit();
        }
    }

    /// Separate colliding table boxes; returns iterations performed.
    pub fn spread_overlapping(&mut self) -> usize {
        let boxes = self.table_boxes();
        let iterations = overlap::spread(&boxes, &mut self.positions);
        if iterations > 0 {
            log::debug!("overlap spread converged after {iterations} iterations");
        }
        iterations
    }

    pub fn auto_fit(&mut self) {
        if let Some(bounds) = self.bounds() {
            self.viewport.fit(bounds);
        }
    }

    pub fn center(&mut self) {
        if let Some(bounds) = self.bounds() {
            self.viewport.center_on(bounds);
        }
    }

    /// Clear manual placement, relayout and reframe.
    pub fn reset_view(&mut self) {
        self.drag = None;
        self.manually_positioned.clear();
        self.recompute_layout();
        self.auto_fit();
    }

    pub fn auto_arrange(&mut self) {
        self.manually_positioned.clear();
        self.recompute_layout();
        self.auto_fit();
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn navigate_to_table(&mut self, key: &TableKey) {
        let Some(pos) = self.positions.get(key) else {
            return;
        };
        let columns = self.column_count(key);
        let rect =
            self.metrics()
                .table_rect(*pos, self.collapsed.contains(key), columns);
        self.viewport.navigate_to(rect.center());
    }

    fn column_count(&self, key: &TableKey) -> usize {
        self.visible_tables()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, columns)| *columns)
            .unwrap_or(0)
    }

    // --- pointer state machine ---

    /// Start a table drag or a canvas pan depending on the hit tag.
    /// Control, filter and search surfaces never start either.
    pub fn pointer_down(&mut self, target: PointerTarget, at: Point) {
        match target {
            PointerTarget::Table(key) => {
                let origin = self.positions.get(&key).copied().unwrap_or_default();
                self.drag = Some(Drag::Table {
                    key,
                    anchor: at,
                    origin,
                });
            }
            PointerTarget::Canvas => {
                self.drag = Some(Drag::Pan {
                    anchor: at,
                    origin: self.viewport.pan,
                });
            }
            PointerTarget::Controls
            | PointerTarget::SchemaFilter
            | PointerTarget::SearchPanel => {}
        }
    }

    /// Apply a pointer movement to the active drag. Table deltas are in
    /// screen pixels and divided by zoom to land in canvas coordinates.
    pub fn pointer_move(&mut self, at: Point) {
        match &self.drag {
            Some(Drag::Table {
                key,
                anchor,
                origin,
            }) => {
                let zoom = self.viewport.zoom;
                let next = Point::new(
                    origin.x + (at.x - anchor.x) / zoom,
                    origin.y + (at.y - anchor.y) / zoom,
                );
                self.positions.insert(key.clone(), next);
            }
            Some(Drag::Pan { anchor, origin }) => {
                self.viewport.pan =
                    Point::new(origin.x + (at.x - anchor.x), origin.y + (at.y - anchor.y));
            }
            None => {}
        }
    }

    /// End the active drag. A dragged table joins the manually-positioned
    /// set so relayout leaves it alone. Idempotent.
    pub fn pointer_up(&mut self) {
        if let Some(Drag::Table { key, .. }) = self.drag.take() {
            self.manually_positioned.insert(key);
        }
    }

    pub fn dragging(&self) -> bool {
        self.drag.is_some()
    }

    // --- hover and selection ---

    /// Highlight every relationship touching the hovered table; `None`
    /// clears the highlight.
    pub fn hover_table(&mut self, key: Option<&TableKey>) {
        self.highlighted_relations.clear();
        let Some(key) = key else {
            return;
        };
        for rel in &self.doc.relationships {
            if rel.source_key() == *key || rel.target_key() == *key {
                self.highlighted_relations.insert(rel.name.clone());
            }
        }
    }

    pub fn select_table(&mut self, key: &TableKey) {
        if self.selected.as_ref() == Some(key) {
            self.selected = None;
        } else {
            self.selected = Some(key.clone());
        }
    }

    // --- search ---

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.highlighted_tables.clear();
        self.highlighted_columns.clear();
        self.show_all_results = false;
        self.results = search::search(&self.doc, &self.visible_schemas, query);
    }

    pub fn results(&self) -> &[SearchHit] {
        &self.results
    }

    /// Results visible in the list: capped unless show-all is active.
    pub fn visible_results(&self) -> &[SearchHit] {
        if self.show_all_results {
            &self.results
        } else {
            &self.results[..self.results.len().min(VISIBLE_RESULTS)]
        }
    }

    pub fn toggle_show_all_results(&mut self) {
        self.show_all_results = !self.show_all_results;
    }

    /// Act on a chosen result: expand its table, highlight it exclusively
    /// (and the column for a column hit), bring it into view, and clear
    /// the query.
    pub fn select_result(&mut self, index: usize) -> bool {
        let Some(hit) = self.results.get(index).cloned() else {
            return false;
        };
        let key = hit.table_key();

        self.collapsed.remove(&key);

        self.highlighted_columns.clear();
        if let Some(column) = &hit.column {
            self.highlighted_columns
                .insert(ColumnKey::new(&hit.schema, &hit.table, column));
        }
        self.highlighted_tables.clear();
        self.highlighted_tables.insert(key.clone());

        self.navigate_to_table(&key);

        self.query.clear();
        self.results.clear();
        self.show_all_results = false;
        true
    }

    // --- scene snapshot ---

    /// Drawable snapshot for the rendering shell. Tables without a
    /// position are skipped; they are simply not ready yet.
    pub fn scene(&self) -> Scene {
        let mut tables = Vec::new();
        for schema in &self.doc.schemas {
            if !self.visible_schemas.contains(&schema.name) {
                continue;
            }
            for table in &schema.tables {
                if !self.table_visible(&table.name) {
                    continue;
                }
                let key = TableKey::new(&schema.name, &table.name);
                let Some(pos) = self.positions.get(&key) else {
                    continue;
                };
                let is_collapsed = self.collapsed.contains(&key);

                let columns = if is_collapsed {
                    Vec::new()
                } else {
                    table
                        .columns
                        .iter()
                        .map(|c| SceneColumn {
                            name: c.name.clone(),
                            data_type: c.data_type.clone(),
                            max_length: c.max_length,
                            nullable: c.nullable,
                            is_primary_key: c.is_primary_key,
                            is_foreign_key: self
                                .doc
                                .is_foreign_key(&schema.name, &table.name, &c.name),
                            is_referenced: self
                                .doc
                                .is_referenced(&schema.name, &table.name, &c.name),
                            highlighted: self.highlighted_columns.contains(&ColumnKey::new(
                                &schema.name,
                                &table.name,
                                &c.name,
                            )),
                        })
                        .collect()
                };

                tables.push(SceneTable {
                    key: key.as_str().to_string(),
                    schema: schema.name.clone(),
                    name: table.name.clone(),
                    x: pos.x,
                    y: pos.y,
                    width: self.metrics().table_width,
                    height: self.metrics().height(is_collapsed, table.columns.len()),
                    collapsed: is_collapsed,
                    selected: self.selected.as_ref() == Some(&key),
                    highlighted: self.highlighted_tables.contains(&key),
                    columns,
                });
            }
        }

        let connectors = self
            .router
            .route(
                &self.doc,
                &self.visible_schemas,
                &self.collapsed,
                &self.positions,
            )
            .into_iter()
            .map(|connector| SceneConnector {
                highlighted: self.highlighted_relations.contains(&connector.name),
                connector,
            })
            .collect();

        Scene {
            tables,
            connectors,
            zoom: self.viewport.zoom,
            pan: self.viewport.pan,
            all_collapsed: self.all_collapsed(),
            results: self.visible_results().to_vec(),
            total_results: self.results.len(),
            show_all_results: self.show_all_results,
        }
    }

    // test-facing accessors

    pub fn positions(&self) -> &HashMap<TableKey, Point> {
        &self.positions
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_collapsed(&self, key: &TableKey) -> bool {
        self.collapsed.contains(key)
    }

    pub fn is_highlighted(&self, key: &TableKey) -> bool {
        self.highlighted_tables.contains(key)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub tables: Vec<SceneTable>,
    pub connectors: Vec<SceneConnector>,
    pub zoom: f64,
    pub pan: Point,
    pub all_collapsed: bool,
    pub results: Vec<SearchHit>,
    pub total_results: usize,
    pub show_all_results: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneTable {
    pub key: String,
    pub schema: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub collapsed: bool,
    pub selected: bool,
    pub highlighted: bool,
    pub columns: Vec<SceneColumn>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneColumn {
    pub name: String,
    pub data_type: String,
    pub max_length: Option<u32>,
    pub nullable: bool,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    pub is_referenced: bool,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneConnector {
    #[serde(flatten)]
    pub connector: Connector,
    pub highlighted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_document;
    use crate::viewport::{ZOOM_MAX, ZOOM_MIN};

    fn view() -> ErdView {
        ErdView::new(sample_document(), ViewConfig::default())
    }

    fn view_with_layout(layout: &str) -> ErdView {
        ErdView::new(
            sample_document(),
            ViewConfig {
                layout: Some(layout.to_string()),
                ..ViewConfig::default()
            },
        )
    }

    #[test]
    fn test_initial_layout_positions_every_table() {
        let v = view();
        assert_eq!(v.positions().len(), 3);
    }

    #[test]
    fn test_tree_layout_places_child_one_level_below_parent() {
        let v = view_with_layout("tree");
        let customers = v.positions()[&TableKey::new("sales", "customers")];
        let orders = v.positions()[&TableKey::new("sales", "orders")];
        let invoices = v.positions()[&TableKey::new("billing", "invoices")];

        assert_eq!(orders.y - customers.y, 50.0);
        assert_eq!(invoices.y - orders.y, 50.0);
        // Single-table rows sit centered on the canvas center line.
        assert_eq!(customers.x, 2000.0);
        assert_eq!(orders.x, 2000.0);
    }

    #[test]
    fn test_schema_toggle_removes_positions_and_connectors() {
        let mut v = view();
        v.toggle_schema("billing");

        assert!(!v
            .positions()
            .contains_key(&TableKey::new("billing", "invoices")));
        let scene = v.scene();
        assert_eq!(scene.tables.len(), 2);
        assert!(scene
            .connectors
            .iter()
            .all(|c| c.connector.name != "fk_invoices_order"));
        assert_eq!(scene.connectors.len(), 1);
    }

    #[test]
    fn test_drag_pins_table_across_relayout() {
        let mut v = view();
        let key = TableKey::new("sales", "orders");

        v.pointer_down(PointerTarget::Table(key.clone()), Point::new(10.0, 10.0));
        v.pointer_move(Point::new(110.0, 60.0));
        v.pointer_up();

        let dragged = v.positions()[&key];
        v.set_layout_mode("grid");
        assert_eq!(v.positions()[&key], dragged);

        // Reset clears the pin and relayout moves the table again.
        v.reset_view();
        assert_ne!(v.positions()[&key], dragged);
    }

    #[test]
    fn test_drag_delta_is_scaled_by_zoom() {
        let mut v = view();
        let key = TableKey::new("sales", "orders");
        let start = v.positions()[&key];
        let zoom = v.viewport().zoom;

        v.pointer_down(PointerTarget::Table(key.clone()), Point::new(0.0, 0.0));
        v.pointer_move(Point::new(100.0, 0.0));
        v.pointer_up();

        let end = v.positions()[&key];
        assert!((end.x - start.x - 100.0 / zoom).abs() < 1e-9);
    }

    #[test]
    fn test_control_surfaces_never_start_a_drag() {
        let mut v = view();
        for target in [
            PointerTarget::Controls,
            PointerTarget::SchemaFilter,
            PointerTarget::SearchPanel,
        ] {
            v.pointer_down(target, Point::new(0.0, 0.0));
            assert!(!v.dragging());
        }
    }

    #[test]
    fn test_canvas_drag_pans_viewport() {
        let mut v = view();
        let pan = v.viewport().pan;

        v.pointer_down(PointerTarget::Canvas, Point::new(0.0, 0.0));
        v.pointer_move(Point::new(30.0, -20.0));
        v.pointer_up();

        assert_eq!(v.viewport().pan, Point::new(pan.x + 30.0, pan.y - 20.0));
    }

    #[test]
    fn test_zoom_actions_respect_clamp() {
        let mut v = view();
        for _ in 0..100 {
            v.zoom_in();
        }
        assert!((v.viewport().zoom - ZOOM_MAX).abs() < 1e-9);
        for _ in 0..100 {
            v.zoom_out();
        }
        assert!((v.viewport().zoom - ZOOM_MIN).abs() < 1e-9);
    }

    #[test]
    fn test_expand_queues_overlap_spread_until_settled() {
        let mut v = view();
        let a = TableKey::new("sales", "orders");
        let b = TableKey::new("sales", "customers");

        // Force a guaranteed overlap, then expand one table.
        v.positions.insert(a.clone(), Point::new(1000.0, 1000.0));
        v.positions.insert(b.clone(), Point::new(1000.0, 1000.0));
        v.toggle_table_collapse(&a);
        assert!(!v.is_collapsed(&a));
        // Nothing moves before the renderer settles.
        assert_eq!(v.positions[&a], Point::new(1000.0, 1000.0));

        v.geometry_settled();
        assert_ne!(v.positions[&a], v.positions[&b]);
    }

    #[test]
    fn test_toggle_all_expands_and_collapses() {
        let mut v = view();
        assert!(v.all_collapsed());

        v.toggle_all_tables();
        v.geometry_settled();
        assert!(!v.all_collapsed());

        v.toggle_all_tables();
        assert!(v.all_collapsed());
    }

    #[test]
    fn test_search_result_selection_expands_highlights_and_clears() {
        let mut v = view();
        v.set_query("customer_id");
        assert!(!v.results().is_empty());

        assert!(v.select_result(0));
        let key = TableKey::new("sales", "orders");
        assert!(!v.is_collapsed(&key));
        assert!(v.is_highlighted(&key));
        assert!(v.results().is_empty());

        // Highlighting is exclusive: a later selection replaces it.
        v.set_query("customers");
        assert!(v.select_result(0));
        assert!(!v.is_highlighted(&key));
        assert!(v.is_highlighted(&TableKey::new("sales", "customers")));
    }

    #[test]
    fn test_visible_results_are_capped() {
        // Seven tables whose primary keys all contain "id".
        let doc = ErdDocument::from_json(
            r#"{
                "schemas": [{"name": "app", "tables": [
                    {"name": "users", "columns": [{"name": "user_id", "dataType": "integer"}]},
                    {"name": "roles", "columns": [{"name": "role_id", "dataType": "integer"}]},
                    {"name": "teams", "columns": [{"name": "team_id", "dataType": "integer"}]},
                    {"name": "tasks", "columns": [{"name": "task_id", "dataType": "integer"}]},
                    {"name": "notes", "columns": [{"name": "note_id", "dataType": "integer"}]},
                    {"name": "tags", "columns": [{"name": "tag_id", "dataType": "integer"}]},
                    {"name": "files", "columns": [{"name": "file_id", "dataType": "integer"}]}
                ]}]
            }"#,
        )
        .unwrap();
        let mut v = ErdView::new(doc, ViewConfig::default());

        v.set_query("id");
        assert!(v.results().len() > VISIBLE_RESULTS);
        assert_eq!(v.visible_results().len(), VISIBLE_RESULTS);

        v.toggle_show_all_results();
        assert_eq!(v.visible_results().len(), v.results().len());
    }

    #[test]
    fn test_hover_highlights_touching_relationships() {
        let mut v = view();
        v.hover_table(Some(&TableKey::new("sales", "orders")));
        let scene = v.scene();
        assert!(scene.connectors.iter().all(|c| c.highlighted));

        v.hover_table(None);
        let scene = v.scene();
        assert!(scene.connectors.iter().all(|c| !c.highlighted));
    }

    #[test]
    fn test_unrecognized_layout_mode_falls_back() {
        let v = view_with_layout("hexagonal");
        assert_eq!(v.layout_mode(), None);
        // The fallback ring still positions everything.
        assert_eq!(v.positions().len(), 3);
    }

    #[test]
    fn test_scene_skips_collapsed_columns() {
        let v = view();
        let scene = v.scene();
        assert!(scene.tables.iter().all(|t| t.columns.is_empty()));
        assert!(scene.tables.iter().all(|t| t.height == 60.0));
    }
}
