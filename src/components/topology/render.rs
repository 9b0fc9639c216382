use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::{NODE_HEIGHT, NODE_WIDTH};
use super::state::TopologyState;
use super::style;
use super::types::GraphNode;

const GRID_GAP: f64 = 14.0;
const CORNER_RADIUS: f64 = 6.0;

pub fn render(state: &TopologyState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_grid(state: &TopologyState, ctx: &CanvasRenderingContext2d) {
	let gap = GRID_GAP * state.transform.k;
	// Skip the lattice once dots would blur together.
	if gap < 6.0 {
		return;
	}
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.1)");
	let mut x = state.transform.x.rem_euclid(gap);
	while x < state.width {
		let mut y = state.transform.y.rem_euclid(gap);
		while y < state.height {
			ctx.fill_rect(x - 0.75, y - 0.75, 1.5, 1.5);
			y += gap;
		}
		x += gap;
	}
}

fn draw_edges(state: &TopologyState, ctx: &CanvasRenderingContext2d) {
	let node_of: HashMap<&str, &GraphNode> = state
		.graph
		.nodes
		.iter()
		.map(|node| (node.id.as_str(), node))
		.collect();

	let k = state.transform.k;
	let (dash, gap, arrow_size) = (8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	for edge in &state.graph.edges {
		let (Some(source), Some(target)) = (
			node_of.get(edge.source.as_str()),
			node_of.get(edge.target.as_str()),
		) else {
			continue;
		};

		// Left-to-right flow: leave the source box on the right, enter the
		// target box on the left.
		let (x1, y1) = (
			source.position.x + NODE_WIDTH,
			source.position.y + NODE_HEIGHT / 2.0,
		);
		let (x2, y2) = (target.position.x, target.position.y + NODE_HEIGHT / 2.0);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str(edge.visual.stroke);
		ctx.set_line_width(edge.visual.width / k);
		if edge.visual.animated {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2 - ux * arrow_size, y2 - uy * arrow_size);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(edge.visual.stroke);
		let (back_x, back_y) = (x2 - ux * arrow_size, y2 - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(x2, y2);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(state: &TopologyState, ctx: &CanvasRenderingContext2d) {
	let selected_id = state.selection.current().map(|device| device.id.as_str());

	for node in &state.graph.nodes {
		let (x, y) = (node.position.x, node.position.y);

		trace_round_rect(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, CORNER_RADIUS);
		ctx.set_fill_style_str(node.visual.background);
		ctx.fill();

		if selected_id == Some(node.id.as_str()) {
			trace_round_rect(
				ctx,
				x - 3.0,
				y - 3.0,
				NODE_WIDTH + 6.0,
				NODE_HEIGHT + 6.0,
				CORNER_RADIUS + 3.0,
			);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.9)");
			ctx.set_line_width(2.5);
			ctx.stroke();
		}

		ctx.set_fill_style_str("#000");
		ctx.set_font("500 13px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(
			&style::display_label(node),
			x + NODE_WIDTH / 2.0,
			y + NODE_HEIGHT / 2.0,
		);
	}
}

fn trace_round_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}
