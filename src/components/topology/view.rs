use super::types::{RawDevice, RawLink, RenderGraph};
use super::{layout, model, style};

/// Run the full pipeline over one inventory snapshot: normalize the records,
/// style every node and edge, then position the nodes. Pure; holds nothing
/// between calls.
pub fn build(devices: &[RawDevice], links: &[RawLink]) -> RenderGraph {
	let (mut nodes, mut edges) = model::normalize(devices, links);
	for node in &mut nodes {
		node.visual = style::node_visual(node);
	}
	for edge in &mut edges {
		edge.visual = style::edge_visual(edge.degraded);
	}
	layout::layout(&mut nodes, &edges);
	RenderGraph { nodes, edges }
}
