use super::layout::{NODE_HEIGHT, NODE_WIDTH};
use super::selection::Selection;
use super::types::{GraphNode, RenderGraph, TopologySnapshot};
use super::view;

const FIT_MARGIN: f64 = 40.0;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Everything the canvas needs between frames: the current render-ready
/// graph, the pan/zoom transform and the selection. Rebuilding the graph
/// goes through [`TopologyState::replace_graph`] so the selection policy
/// is applied in exactly one place.
pub struct TopologyState {
	pub graph: RenderGraph,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub selection: Selection,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl TopologyState {
	pub fn new(snapshot: &TopologySnapshot, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: view::build(&snapshot.nodes, &snapshot.edges),
			transform: ViewTransform { x: 0.0, y: 0.0, k: 1.0 },
			pan: PanState::default(),
			selection: Selection::default(),
			width,
			height,
			flow_time: 0.0,
		};
		state.fit_view();
		state
	}

	/// Swap in a fresh snapshot. The previous graph is discarded wholesale;
	/// the selection survives only if its node id still exists.
	pub fn replace_graph(&mut self, snapshot: &TopologySnapshot) {
		self.graph = view::build(&snapshot.nodes, &snapshot.edges);
		self.selection.retain(&self.graph.nodes);
		self.fit_view();
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen position. Later nodes draw over earlier
	/// ones, so scan back to front.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<&GraphNode> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.graph.nodes.iter().rev().find(|node| {
			gx >= node.position.x
				&& gx <= node.position.x + NODE_WIDTH
				&& gy >= node.position.y
				&& gy <= node.position.y + NODE_HEIGHT
		})
	}

	/// Scale and center the whole graph inside the canvas, never zooming in
	/// past 1:1.
	pub fn fit_view(&mut self) {
		let Some(first) = self.graph.nodes.first() else {
			self.transform = ViewTransform { x: 0.0, y: 0.0, k: 1.0 };
			return;
		};

		let (mut min_x, mut min_y) = (first.position.x, first.position.y);
		let (mut max_x, mut max_y) = (min_x + NODE_WIDTH, min_y + NODE_HEIGHT);
		for node in &self.graph.nodes {
			min_x = min_x.min(node.position.x);
			min_y = min_y.min(node.position.y);
			max_x = max_x.max(node.position.x + NODE_WIDTH);
			max_y = max_y.max(node.position.y + NODE_HEIGHT);
		}

		let (bw, bh) = (max_x - min_x, max_y - min_y);
		let k = ((self.width - 2.0 * FIT_MARGIN) / bw)
			.min((self.height - 2.0 * FIT_MARGIN) / bh)
			.clamp(0.1, 1.0);
		self.transform.k = k;
		self.transform.x = (self.width - bw * k) / 2.0 - min_x * k;
		self.transform.y = (self.height - bh * k) / 2.0 - min_y * k;
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
