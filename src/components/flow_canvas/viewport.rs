//! Pan/zoom state for the flow canvas.
//!
//! Screen position of a content point `c` is `pan + c * zoom`. Every public
//! operation leaves `zoom` in `[min_zoom, max_zoom]` and `pan` inside the
//! bounds computed by [`clamp_pan`], so some content always stays on screen.

pub const MIN_ZOOM: f64 = 0.4;
pub const MAX_ZOOM: f64 = 2.5;
pub const ZOOM_STEP: f64 = 0.2;
pub const BOUNDS_PADDING: f64 = 200.0;
/// Logical size of the full three-lane layout.
pub const CONTENT_WIDTH: f64 = 1500.0;
pub const CONTENT_HEIGHT: f64 = 800.0;
/// Pan used on an axis where the viewport is smaller than the content.
pub const MIN_CENTER_OFFSET: f64 = 50.0;

const ZOOM_EPSILON: f64 = 1e-4;
const WHEEL_SENSITIVITY: f64 = 0.001;
const PINCH_SENSITIVITY: f64 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub zoom_step: f64,
	pub bounds_padding: f64,
	pub content_width: f64,
	pub content_height: f64,
	pub min_center_offset: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_zoom: MIN_ZOOM,
			max_zoom: MAX_ZOOM,
			zoom_step: ZOOM_STEP,
			bounds_padding: BOUNDS_PADDING,
			content_width: CONTENT_WIDTH,
			content_height: CONTENT_HEIGHT,
			min_center_offset: MIN_CENTER_OFFSET,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanState {
	pub active: bool,
	pub last_x: f64,
	pub last_y: f64,
}

/// Clamp a pan offset so at least `bounds_padding` pixels of the scaled
/// content remain inside a `viewport_w` x `viewport_h` viewport.
///
/// When the range is inverted (a viewport narrower than twice the padding
/// with small content) the axis is pinned to its lower bound.
pub fn clamp_pan(
	x: f64,
	y: f64,
	zoom: f64,
	viewport_w: f64,
	viewport_h: f64,
	config: &ViewportConfig,
) -> Point {
	let pad = config.bounds_padding;
	let min_x = pad - config.content_width * zoom;
	let max_x = viewport_w - pad;
	let min_y = pad - config.content_height * zoom;
	let max_y = viewport_h - pad;
	Point {
		x: clamp_axis(x, min_x, max_x),
		y: clamp_axis(y, min_y, max_y),
	}
}

fn clamp_axis(v: f64, min: f64, max: f64) -> f64 {
	if min > max { min } else { v.clamp(min, max) }
}

fn valid_size(w: f64, h: f64) -> bool {
	w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
}

/// Fields are private: only the methods below may move `zoom` and `pan`,
/// and each of them re-clamps.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
	zoom: f64,
	pan: Point,
	drag: PanState,
	width: f64,
	height: f64,
	config: ViewportConfig,
}

impl Default for ViewportState {
	fn default() -> Self {
		Self::new(ViewportConfig::default())
	}
}

impl ViewportState {
	pub fn new(config: ViewportConfig) -> Self {
		Self {
			zoom: 1.0,
			pan: Point::default(),
			drag: PanState::default(),
			width: 0.0,
			height: 0.0,
			config,
		}
	}

	pub fn zoom(&self) -> f64 {
		self.zoom
	}

	pub fn pan(&self) -> Point {
		self.pan
	}

	#[cfg(test)]
	fn config(&self) -> &ViewportConfig {
		&self.config
	}

	/// Whether a usable viewport size has been measured.
	pub fn has_size(&self) -> bool {
		valid_size(self.width, self.height)
	}

	/// Record the measured viewport and center the content at zoom 1.
	pub fn initialize(&mut self, width: f64, height: f64) {
		if !valid_size(width, height) {
			return;
		}
		self.width = width;
		self.height = height;
		self.recenter();
	}

	/// Track a new viewport size, keeping zoom and re-clamping pan.
	pub fn resize(&mut self, width: f64, height: f64) {
		if !valid_size(width, height) {
			return;
		}
		if !self.has_size() {
			self.initialize(width, height);
			return;
		}
		self.width = width;
		self.height = height;
		self.pan = self.clamped(self.pan.x, self.pan.y, self.zoom);
	}

	/// Back to zoom 1 at the centered pan. On viewports too small to hold
	/// the center offset inside the bounds the centered pan is clamped.
	pub fn reset(&mut self) {
		if !self.has_size() {
			return;
		}
		self.drag.active = false;
		self.recenter();
	}

	pub fn centered_pan(&self) -> Point {
		let axis = |viewport: f64, content: f64| {
			let offset = (viewport - content) / 2.0;
			if offset > 0.0 { offset } else { self.config.min_center_offset }
		};
		Point {
			x: axis(self.width, self.config.content_width),
			y: axis(self.height, self.config.content_height),
		}
	}

	fn recenter(&mut self) {
		self.zoom = 1.0;
		let c = self.centered_pan();
		self.pan = self.clamped(c.x, c.y, self.zoom);
	}

	fn clamped(&self, x: f64, y: f64, zoom: f64) -> Point {
		clamp_pan(x, y, zoom, self.width, self.height, &self.config)
	}

	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	pub fn zoom_in(&mut self) -> bool {
		let center = self.center();
		self.zoom_to(center, self.zoom + self.config.zoom_step)
	}

	pub fn zoom_out(&mut self) -> bool {
		let center = self.center();
		self.zoom_to(center, self.zoom - self.config.zoom_step)
	}

	/// Zoom by `delta` keeping the content point under `(px, py)` fixed.
	pub fn zoom_at_point(&mut self, px: f64, py: f64, delta: f64) -> bool {
		if !delta.is_finite() {
			return false;
		}
		self.zoom_to(Point::new(px, py), self.zoom + delta)
	}

	/// Wheel handler: converts a scroll delta into a zoom step at the pointer.
	pub fn wheel(&mut self, px: f64, py: f64, delta_y: f64, pinch: bool) -> bool {
		let sensitivity = if pinch {
			PINCH_SENSITIVITY
		} else {
			WHEEL_SENSITIVITY
		};
		self.zoom_at_point(px, py, -delta_y * sensitivity)
	}

	/// Returns false, leaving state untouched, when the clamped zoom differs
	/// from the current one by no more than epsilon.
	fn zoom_to(&mut self, anchor: Point, requested: f64) -> bool {
		if !self.has_size() || !anchor.x.is_finite() || !anchor.y.is_finite() {
			return false;
		}
		let new_zoom = requested.clamp(self.config.min_zoom, self.config.max_zoom);
		if (new_zoom - self.zoom).abs() <= ZOOM_EPSILON {
			return false;
		}
		let ratio = new_zoom / self.zoom;
		let x = anchor.x - (anchor.x - self.pan.x) * ratio;
		let y = anchor.y - (anchor.y - self.pan.y) * ratio;
		self.pan = self.clamped(x, y, new_zoom);
		self.zoom = new_zoom;
		true
	}

	pub fn begin_drag(&mut self, px: f64, py: f64) {
		if !px.is_finite() || !py.is_finite() {
			return;
		}
		self.drag = PanState {
			active: true,
			last_x: px,
			last_y: py,
		};
	}

	pub fn drag_to(&mut self, px: f64, py: f64) -> bool {
		if !self.drag.active || !self.has_size() || !px.is_finite() || !py.is_finite() {
			return false;
		}
		let (dx, dy) = (px - self.drag.last_x, py - self.drag.last_y);
		self.pan = self.clamped(self.pan.x + dx, self.pan.y + dy, self.zoom);
		self.drag.last_x = px;
		self.drag.last_y = py;
		true
	}

	pub fn end_drag(&mut self) {
		self.drag.active = false;
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.active
	}

	/// Content-space point shown at screen position `(px, py)`.
	#[cfg(test)]
	fn content_point_at(&self, px: f64, py: f64) -> Point {
		Point::new((px - self.pan.x) / self.zoom, (py - self.pan.y) / self.zoom)
	}

	pub fn transform_css(&self) -> String {
		format!(
			"translate({}px, {}px) scale({})",
			self.pan.x, self.pan.y, self.zoom
		)
	}

	/// Footer readout, e.g. `CANVAS: -80,-60 @ 1.20x`.
	pub fn readout(&self) -> String {
		format!(
			"CANVAS: {},{} @ {:.2}x",
			self.pan.x.round(),
			self.pan.y.round(),
			self.zoom
		)
	}

	pub fn zoom_percent(&self) -> u32 {
		(self.zoom * 100.0).round() as u32
	}

	/// Test hook: place pan/zoom directly, bypassing clamping.
	#[cfg(test)]
	fn set_raw(&mut self, zoom: f64, x: f64, y: f64) {
		self.zoom = zoom;
		self.pan = Point::new(x, y);
	}
}
