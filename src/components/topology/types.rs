use serde::Deserialize;
use serde_json::Value;

/// Device categories reported by the inventory. Anything the inventory
/// invents beyond these collapses into `Other`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
	Router,
	Ap,
	Switch,
	#[default]
	#[serde(other)]
	Other,
}

impl DeviceKind {
	/// Inventory wire name; `Other` covers anything unrecognized.
	pub const fn name(self) -> &'static str {
		match self {
			DeviceKind::Router => "router",
			DeviceKind::Ap => "ap",
			DeviceKind::Switch => "switch",
			DeviceKind::Other => "other",
		}
	}
}

/// One device record as delivered by the monitoring backend. Fields the
/// graph does not interpret (`port`, `link_speed`, MAC, ...) are kept in
/// `extra` so the detail panel can show them verbatim.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawDevice {
	pub id: String,
	#[serde(default)]
	pub label: String,
	#[serde(rename = "type", default)]
	pub kind: DeviceKind,
	#[serde(default)]
	pub status: bool,
	#[serde(default)]
	pub signal: Option<f64>,
	#[serde(flatten)]
	pub extra: serde_json::Map<String, Value>,
}

/// One directed link between two device ids.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawLink {
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub degraded: bool,
}

/// A complete inventory fetch result. Both collections decode leniently:
/// a missing, null or non-array field becomes empty, and a malformed
/// element is skipped instead of poisoning the whole snapshot.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TopologySnapshot {
	#[serde(default, deserialize_with = "lenient_seq")]
	pub nodes: Vec<RawDevice>,
	#[serde(default, deserialize_with = "lenient_seq")]
	pub edges: Vec<RawLink>,
}

pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: serde::Deserializer<'de>,
	T: serde::de::DeserializeOwned,
{
	let Value::Array(items) = Value::deserialize(deserializer)? else {
		return Ok(Vec::new());
	};
	Ok(items
		.into_iter()
		.filter_map(|item| serde_json::from_value(item).ok())
		.collect())
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeVisual {
	pub background: &'static str,
	pub glyph: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeVisual {
	pub stroke: &'static str,
	pub width: f64,
	pub animated: bool,
}

/// A positioned, styled device node. `source` is a read-only copy of the
/// originating record, carried along for the detail panel.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub kind: DeviceKind,
	pub status: bool,
	pub signal: Option<f64>,
	pub position: Point,
	pub visual: NodeVisual,
	pub source: RawDevice,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub degraded: bool,
	pub visual: EdgeVisual,
}

/// The render-ready output of one pipeline run, rebuilt from scratch on
/// every snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderGraph {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn snapshot_decodes_typical_payload() {
		let snap: TopologySnapshot = serde_json::from_value(json!({
			"nodes": [
				{"id": "r1", "label": "Core", "type": "router", "status": true, "port": "ether1"},
				{"id": "c1", "label": "Client", "type": "client", "signal": -61.4},
			],
			"edges": [{"source": "r1", "target": "c1", "degraded": true}],
		}))
		.unwrap();

		assert_eq!(snap.nodes.len(), 2);
		assert_eq!(snap.nodes[0].kind, DeviceKind::Router);
		assert!(snap.nodes[0].status);
		assert_eq!(snap.nodes[0].extra["port"], json!("ether1"));
		// "client" is not a first-class kind
		assert_eq!(snap.nodes[1].kind, DeviceKind::Other);
		assert_eq!(snap.nodes[1].signal, Some(-61.4));
		assert!(snap.edges[0].degraded);
	}

	#[test]
	fn missing_or_null_collections_become_empty() {
		let missing: TopologySnapshot = serde_json::from_value(json!({})).unwrap();
		assert_eq!(missing, TopologySnapshot::default());

		let null: TopologySnapshot =
			serde_json::from_value(json!({"nodes": null, "edges": null})).unwrap();
		assert!(null.nodes.is_empty() && null.edges.is_empty());
	}

	#[test]
	fn non_array_collections_become_empty() {
		let snap: TopologySnapshot =
			serde_json::from_value(json!({"nodes": "oops", "edges": {"a": 1}})).unwrap();
		assert!(snap.nodes.is_empty() && snap.edges.is_empty());
	}

	#[test]
	fn malformed_elements_are_skipped_individually() {
		let snap: TopologySnapshot = serde_json::from_value(json!({
			"nodes": [{"id": "ok"}, 42, {"label": "no id"}],
			"edges": [{"source": "a", "target": "b"}, {"source": "a"}],
		}))
		.unwrap();

		assert_eq!(snap.nodes.len(), 1);
		assert_eq!(snap.nodes[0].id, "ok");
		assert_eq!(snap.edges.len(), 1);
	}
}
