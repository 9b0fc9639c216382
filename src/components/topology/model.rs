use std::collections::HashMap;

use super::types::{EdgeVisual, GraphEdge, GraphNode, NodeVisual, Point, RawDevice, RawLink};

/// Turn one inventory snapshot into bare graph nodes and edges. Visuals and
/// positions are filled in by the later pipeline stages.
///
/// Duplicate device ids collapse into a single node (last record wins, first
/// occurrence keeps its slot). Links whose endpoints are unknown are dropped;
/// partial inventories produce them routinely and they are not an error.
pub fn normalize(devices: &[RawDevice], links: &[RawLink]) -> (Vec<GraphNode>, Vec<GraphEdge>) {
	let mut nodes: Vec<GraphNode> = Vec::with_capacity(devices.len());
	let mut slot_of: HashMap<&str, usize> = HashMap::with_capacity(devices.len());

	for device in devices {
		let node = GraphNode {
			id: device.id.clone(),
			label: device.label.clone(),
			kind: device.kind,
			status: device.status,
			signal: device.signal,
			position: Point::default(),
			visual: NodeVisual::default(),
			source: device.clone(),
		};
		match slot_of.get(device.id.as_str()) {
			Some(&slot) => nodes[slot] = node,
			None => {
				slot_of.insert(device.id.as_str(), nodes.len());
				nodes.push(node);
			}
		}
	}

	let mut edges: Vec<GraphEdge> = Vec::with_capacity(links.len());
	let mut pair_count: HashMap<(&str, &str), usize> = HashMap::new();

	for link in links {
		if !slot_of.contains_key(link.source.as_str()) || !slot_of.contains_key(link.target.as_str()) {
			continue;
		}
		let seen = pair_count
			.entry((link.source.as_str(), link.target.as_str()))
			.or_insert(0);
		*seen += 1;
		// Parallel links between the same pair get an ordinal suffix so they
		// keep distinct identities.
		let id = if *seen == 1 {
			format!("{}-{}", link.source, link.target)
		} else {
			format!("{}-{}#{}", link.source, link.target, seen)
		};
		edges.push(GraphEdge {
			id,
			source: link.source.clone(),
			target: link.target.clone(),
			degraded: link.degraded,
			visual: EdgeVisual::default(),
		});
	}

	(nodes, edges)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::types::DeviceKind;

	fn device(id: &str, kind: DeviceKind) -> RawDevice {
		RawDevice {
			id: id.into(),
			label: id.to_uppercase(),
			kind,
			..RawDevice::default()
		}
	}

	fn link(source: &str, target: &str) -> RawLink {
		RawLink {
			source: source.into(),
			target: target.into(),
			degraded: false,
		}
	}

	#[test]
	fn empty_inventory_yields_empty_graph() {
		let (nodes, edges) = normalize(&[], &[]);
		assert!(nodes.is_empty() && edges.is_empty());
	}

	#[test]
	fn dangling_edges_are_dropped() {
		let devices = [device("a", DeviceKind::Ap)];
		let links = [link("x", "a"), link("a", "x"), link("a", "a")];
		let (nodes, edges) = normalize(&devices, &links);
		assert_eq!(nodes.len(), 1);
		assert_eq!(edges.len(), 1);
		assert_eq!(edges[0].id, "a-a");
	}

	#[test]
	fn duplicate_device_ids_collapse_last_write_wins() {
		let mut second = device("a", DeviceKind::Switch);
		second.label = "newer".into();
		let devices = [device("a", DeviceKind::Router), device("b", DeviceKind::Ap), second];
		let (nodes, _) = normalize(&devices, &[]);

		assert_eq!(nodes.len(), 2);
		assert_eq!(nodes[0].id, "a");
		assert_eq!(nodes[0].kind, DeviceKind::Switch);
		assert_eq!(nodes[0].label, "newer");
	}

	#[test]
	fn parallel_links_keep_distinct_ids() {
		let devices = [device("a", DeviceKind::Router), device("b", DeviceKind::Switch)];
		let links = [link("a", "b"), link("a", "b"), link("b", "a")];
		let (_, edges) = normalize(&devices, &links);

		let ids: Vec<&str> = edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids, ["a-b", "a-b#2", "b-a"]);
	}
}
