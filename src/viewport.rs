//! Zoom and pan state with fit, center and navigate math.
//!
//! Interactive zoom is clamped to [`ZOOM_MIN`, `ZOOM_MAX`]; auto-fit uses
//! the tighter [`FIT_ZOOM_MIN`, `FIT_ZOOM_MAX`] range for legible initial
//! framing. Pan is unconstrained.

use crate::geometry::{Point, Rect};
use serde::Serialize;

pub const ZOOM_MIN: f64 = 0.1;
pub const ZOOM_MAX: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.1;

pub const FIT_ZOOM_MIN: f64 = 0.6;
pub const FIT_ZOOM_MAX: f64 = 2.0;
const FIT_PADDING: f64 = 40.0;

/// Reserved chrome around the drawable area: controls strip on top,
/// search bar at the bottom, schema filter panel on the right.
#[derive(Debug, Clone, Copy)]
pub struct ChromeMargins {
    pub top: f64,
    pub bottom: f64,
    pub right: f64,
    pub left: f64,
}

impl Default for ChromeMargins {
    fn default() -> Self {
        Self {
            top: 80.0,
            bottom: 80.0,
            right: 220.0,
            left: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Viewport {
    pub zoom: f64,
    pub pan: Point,
    #[serde(skip)]
    pub container_width: f64,
    #[serde(skip)]
    pub container_height: f64,
    #[serde(skip)]
    pub margins: ChromeMargins,
}

impl Viewport {
    pub fn new(container_width: f64, container_height: f64) -> Self {
        Self {
            zoom: 1.0,
            // Start with the large canvas roughly centered in the viewport.
            pan: Point::new(-1500.0, -1500.0),
            container_width,
            container_height,
            margins: ChromeMargins::default(),
        }
    }

    fn available_size(&self) -> (f64, f64) {
        (
            self.container_width - self.margins.right - self.margins.left,
            self.container_height - self.margins.top - self.margins.bottom,
        )
    }

    fn available_center(&self) -> Point {
        let (width, height) = self.available_size();
        Point::new(
            self.margins.left + width / 2.0,
            self.margins.top + height / 2.0,
        )
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(-ZOOM_STEP);
    }

    /// Step the zoom, keeping the canvas point at the viewport center
    /// stationary on screen.
    pub fn zoom_by(&mut self, delta: f64) {
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom + delta).clamp(ZOOM_MIN, ZOOM_MAX);

        let view_center = Point::new(self.container_width / 2.0, self.container_height / 2.0);
        let canvas_x = (view_center.x - self.pan.x) / old_zoom;
        let canvas_y = (view_center.y - self.pan.y) / old_zoom;

        self.pan = Point::new(
            view_center.x - canvas_x * new_zoom,
            view_center.y - canvas_y * new_zoom,
        );
        self.zoom = new_zoom;
    }

    /// Fit the given canvas bounds plus padding into the available area,
    /// then center them.
    pub fn fit(&mut self, bounds: Rect) {
        let (available_width, available_height) = self.available_size();
        let required_width = bounds.width + FIT_PADDING * 2.0;
        let required_height = bounds.height + FIT_PADDING * 2.0;

        let zoom_x = available_width / required_width;
        let zoom_y = available_height / required_height;
        self.zoom = zoom_x.min(zoom_y).clamp(FIT_ZOOM_MIN, FIT_ZOOM_MAX);

        self.center_on(bounds);
    }

    /// Center the bounds on the available area without changing zoom.
    pub fn center_on(&mut self, bounds: Rect) {
        let content = bounds.center();
        let target = self.available_center();
        self.pan = Point::new(
            target.x - content.x * self.zoom,
            target.y - content.y * self.zoom,
        );
    }

    /// Pan so the given canvas point (a table's box center) lands on the
    /// available-area center; zoom is untouched.
    pub fn navigate_to(&mut self, canvas_point: Point) {
        let target = self.available_center();
        self.pan = Point::new(
            target.x - canvas_point.x * self.zoom,
            target.y - canvas_point.y * self.zoom,
        );
    }
}
