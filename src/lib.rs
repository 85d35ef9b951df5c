pub mod acronym;
pub mod geometry;
pub mod hierarchy;
pub mod layout;
pub mod model;
pub mod router;
pub mod search;
pub mod view;
pub mod viewport;

use wasm_bindgen::prelude::*;

use geometry::Point;
use model::{ErdDocument, TableKey};
use view::{ErdView, PointerTarget, ViewConfig};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// JS-facing handle around the interactive view. Commands mutate state;
/// `scene` returns the full drawable snapshot as JSON.
#[wasm_bindgen]
pub struct ErdWidget {
    view: ErdView,
}

#[wasm_bindgen]
impl ErdWidget {
    /// Build a widget from a metadata document and a configuration
    /// object, both JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(document: &str, config: &str) -> Result<ErdWidget, String> {
        let doc = ErdDocument::from_json(document).map_err(|e| e.to_string())?;
        let config: ViewConfig = serde_json::from_str(config).map_err(|e| e.to_string())?;
        Ok(Self {
            view: ErdView::new(doc, config),
        })
    }

    pub fn scene(&self) -> Result<String, String> {
        serde_json::to_string(&self.view.scene()).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "setLayoutMode")]
    pub fn set_layout_mode(&mut self, mode: &str) {
        self.view.set_layout_mode(mode);
    }

    #[wasm_bindgen(js_name = "toggleSchema")]
    pub fn toggle_schema(&mut self, name: &str) {
        self.view.toggle_schema(name);
    }

    #[wasm_bindgen(js_name = "toggleTable")]
    pub fn toggle_table(&mut self, key: &str) {
        self.view.toggle_table_collapse(&TableKey::from_raw(key));
    }

    #[wasm_bindgen(js_name = "toggleAllTables")]
    pub fn toggle_all_tables(&mut self) {
        self.view.toggle_all_tables();
    }

    /// Renderer callback: the last size-changing update is on screen.
    #[wasm_bindgen(js_name = "geometrySettled")]
    pub fn geometry_settled(&mut self) {
        self.view.geometry_settled();
    }

    #[wasm_bindgen(js_name = "zoomIn")]
    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
    }

    #[wasm_bindgen(js_name = "zoomOut")]
    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
    }

    /// Re-center the diagram without changing zoom.
    pub fn center(&mut self) {
        self.view.center();
    }

    #[wasm_bindgen(js_name = "resetView")]
    pub fn reset_view(&mut self) {
        self.view.reset_view();
    }

    #[wasm_bindgen(js_name = "autoArrange")]
    pub fn auto_arrange(&mut self) {
        self.view.auto_arrange();
    }

    /// `target` names the hit region ("table", "canvas", "controls",
    /// "schema-filter", "search-panel"); `key` is required for "table".
    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(
        &mut self,
        target: &str,
        key: Option<String>,
        x: f64,
        y: f64,
    ) -> Result<(), String> {
        let target = match target {
            "table" => {
                let key = key.ok_or("table pointer event without a table key")?;
                PointerTarget::Table(TableKey::from_raw(key))
            }
            "canvas" => PointerTarget::Canvas,
            "controls" => PointerTarget::Controls,
            "schema-filter" => PointerTarget::SchemaFilter,
            "search-panel" => PointerTarget::SearchPanel,
            other => return Err(format!("unknown pointer target: {other}")),
        };
        self.view.pointer_down(target, Point::new(x, y));
        Ok(())
    }

    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.view.pointer_move(Point::new(x, y));
    }

    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self) {
        self.view.pointer_up();
    }

    /// Empty key clears the hover highlight.
    #[wasm_bindgen(js_name = "hoverTable")]
    pub fn hover_table(&mut self, key: &str) {
        if key.is_empty() {
            self.view.hover_table(None);
        } else {
            self.view.hover_table(Some(&TableKey::from_raw(key)));
        }
    }

    #[wasm_bindgen(js_name = "selectTable")]
    pub fn select_table(&mut self, key: &str) {
        self.view.select_table(&TableKey::from_raw(key));
    }

    #[wasm_bindgen(js_name = "setQuery")]
    pub fn set_query(&mut self, query: &str) {
        self.view.set_query(query);
    }

    #[wasm_bindgen(js_name = "selectResult")]
    pub fn select_result(&mut self, index: usize) -> bool {
        self.view.select_result(index)
    }

    #[wasm_bindgen(js_name = "toggleShowAllResults")]
    pub fn toggle_show_all_results(&mut self) {
        self.view.toggle_show_all_results();
    }
}
