use std::collections::{HashMap, VecDeque};

use super::types::{GraphEdge, GraphNode, Point};

/// Every node occupies the same fixed box; spacing works in these units.
pub const NODE_WIDTH: f64 = 180.0;
pub const NODE_HEIGHT: f64 = 50.0;

const RANK_GAP: f64 = 80.0;
const ROW_GAP: f64 = 30.0;

/// Assign a position to every node, left-to-right by rank.
///
/// Ranks come from the longest path out of the source nodes, computed over
/// the edge set with back-edges removed, so cycles cannot stall the sweep.
/// Nodes without edges rank as sources and stack inside rank zero. The
/// whole computation is rebuilt per call and is deterministic for a fixed
/// input order.
pub fn layout(nodes: &mut [GraphNode], edges: &[GraphEdge]) {
	if nodes.is_empty() {
		return;
	}
	match assign_ranks(nodes, edges) {
		Some(ranks) => place_ranked(nodes, &ranks),
		None => {
			// Should be unreachable once back-edges are gone; a grid still
			// beats a blank screen.
			log::warn!("rank assignment stalled on {} nodes, using grid placement", nodes.len());
			place_grid(nodes);
		}
	}
}

/// Longest-path rank per node, or `None` if the topological sweep fails to
/// drain every node.
fn assign_ranks(nodes: &[GraphNode], edges: &[GraphEdge]) -> Option<Vec<usize>> {
	let slot_of: HashMap<&str, usize> = nodes
		.iter()
		.enumerate()
		.map(|(slot, node)| (node.id.as_str(), slot))
		.collect();

	// Self-loops say nothing about rank order.
	let pairs: Vec<(usize, usize)> = edges
		.iter()
		.filter_map(|edge| {
			let source = *slot_of.get(edge.source.as_str())?;
			let target = *slot_of.get(edge.target.as_str())?;
			(source != target).then_some((source, target))
		})
		.collect();

	let forward = drop_back_edges(nodes.len(), &pairs);

	let mut indegree = vec![0usize; nodes.len()];
	let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
	for &(source, target) in &forward {
		outgoing[source].push(target);
		indegree[target] += 1;
	}

	let mut rank = vec![0usize; nodes.len()];
	let mut ready: VecDeque<usize> = (0..nodes.len()).filter(|&slot| indegree[slot] == 0).collect();
	let mut drained = 0usize;
	while let Some(slot) = ready.pop_front() {
		drained += 1;
		for &target in &outgoing[slot] {
			rank[target] = rank[target].max(rank[slot] + 1);
			indegree[target] -= 1;
			if indegree[target] == 0 {
				ready.push_back(target);
			}
		}
	}

	(drained == nodes.len()).then_some(rank)
}

/// Depth-first sweep in input order; edges into a node still on the stack
/// are back-edges and are excluded from ranking. Rendering keeps them in
/// their stated direction.
fn drop_back_edges(node_count: usize, pairs: &[(usize, usize)]) -> Vec<(usize, usize)> {
	#[derive(Clone, Copy, PartialEq)]
	enum Mark {
		New,
		Active,
		Done,
	}

	let mut outgoing: Vec<Vec<(usize, usize)>> = vec![Vec::new(); node_count];
	for (index, &(source, target)) in pairs.iter().enumerate() {
		outgoing[source].push((target, index));
	}

	let mut mark = vec![Mark::New; node_count];
	let mut is_back = vec![false; pairs.len()];

	for root in 0..node_count {
		if mark[root] != Mark::New {
			continue;
		}
		mark[root] = Mark::Active;
		// (node, cursor into its out-edges)
		let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
		while let Some(&mut (node, ref mut cursor)) = stack.last_mut() {
			if let Some(&(target, index)) = outgoing[node].get(*cursor) {
				*cursor += 1;
				match mark[target] {
					Mark::New => {
						mark[target] = Mark::Active;
						stack.push((target, 0));
					}
					Mark::Active => is_back[index] = true,
					Mark::Done => {}
				}
			} else {
				mark[node] = Mark::Done;
				stack.pop();
			}
		}
	}

	pairs
		.iter()
		.enumerate()
		.filter_map(|(index, &pair)| (!is_back[index]).then_some(pair))
		.collect()
}

fn place_ranked(nodes: &mut [GraphNode], ranks: &[usize]) {
	let max_rank = ranks.iter().copied().max().unwrap_or(0);
	let mut rows: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
	for (slot, &rank) in ranks.iter().enumerate() {
		rows[rank].push(slot);
	}

	let tallest = rows.iter().map(Vec::len).max().unwrap_or(0);
	for (rank, row) in rows.iter().enumerate() {
		// Center each rank against the tallest one.
		let top = (tallest - row.len()) as f64 * (NODE_HEIGHT + ROW_GAP) / 2.0;
		for (row_slot, &slot) in row.iter().enumerate() {
			nodes[slot].position = Point {
				x: rank as f64 * (NODE_WIDTH + RANK_GAP),
				y: top + row_slot as f64 * (NODE_HEIGHT + ROW_GAP),
			};
		}
	}
}

fn place_grid(nodes: &mut [GraphNode]) {
	let columns = (nodes.len() as f64).sqrt().ceil().max(1.0) as usize;
	for (index, node) in nodes.iter_mut().enumerate() {
		node.position = Point {
			x: (index % columns) as f64 * (NODE_WIDTH + RANK_GAP),
			y: (index / columns) as f64 * (NODE_HEIGHT + ROW_GAP),
		};
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::model::normalize;
	use crate::components::topology::types::{RawDevice, RawLink};

	fn graph(ids: &[&str], links: &[(&str, &str)]) -> (Vec<GraphNode>, Vec<GraphEdge>) {
		let devices: Vec<RawDevice> = ids
			.iter()
			.map(|id| RawDevice {
				id: (*id).into(),
				..RawDevice::default()
			})
			.collect();
		let links: Vec<RawLink> = links
			.iter()
			.map(|(source, target)| RawLink {
				source: (*source).into(),
				target: (*target).into(),
				degraded: false,
			})
			.collect();
		normalize(&devices, &links)
	}

	fn positions(nodes: &[GraphNode]) -> Vec<Point> {
		nodes.iter().map(|node| node.position).collect()
	}

	fn assert_no_overlap(nodes: &[GraphNode]) {
		for (i, a) in nodes.iter().enumerate() {
			for b in &nodes[i + 1..] {
				assert_ne!(a.position, b.position, "{} and {} overlap", a.id, b.id);
			}
		}
	}

	#[test]
	fn empty_graph_is_a_no_op() {
		let (mut nodes, edges) = graph(&[], &[]);
		layout(&mut nodes, &edges);
		assert!(nodes.is_empty());
	}

	#[test]
	fn chain_ranks_advance_left_to_right() {
		let (mut nodes, edges) = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
		layout(&mut nodes, &edges);
		assert!(nodes[0].position.x < nodes[1].position.x);
		assert!(nodes[1].position.x < nodes[2].position.x);
		assert_no_overlap(&nodes);
	}

	#[test]
	fn rank_follows_the_longest_path() {
		// d is reachable both directly and through b-c; the long way wins.
		let (mut nodes, edges) = graph(
			&["a", "b", "c", "d"],
			&[("a", "b"), ("b", "c"), ("c", "d"), ("a", "d")],
		);
		layout(&mut nodes, &edges);
		let x_of = |id: &str| nodes.iter().find(|n| n.id == id).map(|n| n.position.x);
		assert_eq!(x_of("d"), Some(3.0 * (NODE_WIDTH + RANK_GAP)));
	}

	#[test]
	fn isolated_nodes_get_valid_distinct_positions() {
		let (mut nodes, edges) = graph(&["a", "b", "c"], &[("a", "b")]);
		layout(&mut nodes, &edges);
		assert_eq!(nodes.len(), 3);
		assert_no_overlap(&nodes);
	}

	#[test]
	fn cycles_terminate_and_place_every_node() {
		let (mut nodes, edges) = graph(
			&["a", "b", "c", "d"],
			&[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")],
		);
		layout(&mut nodes, &edges);
		assert_eq!(nodes.len(), 4);
		assert_no_overlap(&nodes);
		// The back-edge c->a must not drag a past b.
		let x_of = |id: &str| nodes.iter().find(|n| n.id == id).map(|n| n.position.x);
		assert!(x_of("a") < x_of("b"));
	}

	#[test]
	fn two_node_cycle_terminates() {
		let (mut nodes, edges) = graph(&["a", "b"], &[("a", "b"), ("b", "a")]);
		layout(&mut nodes, &edges);
		assert_no_overlap(&nodes);
	}

	#[test]
	fn layout_is_deterministic() {
		let (mut first, edges) = graph(&["a", "b", "c", "d"], &[("a", "b"), ("a", "c"), ("c", "d")]);
		let (mut second, _) = graph(&["a", "b", "c", "d"], &[("a", "b"), ("a", "c"), ("c", "d")]);
		layout(&mut first, &edges);
		layout(&mut second, &edges);
		assert_eq!(positions(&first), positions(&second));
	}

	#[test]
	fn node_count_is_preserved() {
		let (mut nodes, edges) = graph(&["a", "b", "c", "d", "e"], &[("a", "b"), ("c", "d")]);
		let before = nodes.len();
		layout(&mut nodes, &edges);
		assert_eq!(nodes.len(), before);
	}

	#[test]
	fn grid_fallback_places_without_overlap() {
		let (mut nodes, _) = graph(&["a", "b", "c", "d", "e"], &[]);
		place_grid(&mut nodes);
		assert_no_overlap(&nodes);
		// 5 nodes on a 3-wide grid wrap to a second row.
		assert_eq!(nodes[3].position.y, NODE_HEIGHT + ROW_GAP);
	}
}
