use super::types::{DeviceKind, EdgeVisual, GraphNode, NodeVisual};

/// Per-kind visual recipe. One entry per `DeviceKind` variant; adding a
/// device kind means adding a variant and its entry here, the compiler
/// refuses anything less.
pub struct KindStyle {
	pub background: &'static str,
	glyph: Glyph,
}

enum Glyph {
	/// Online/offline indicator derived from the device status flag.
	StatusLight,
	Fixed(&'static str),
	/// Rounded dBm readout when the device reports a signal, else nothing.
	SignalReadout,
}

impl DeviceKind {
	pub const fn style(self) -> KindStyle {
		match self {
			DeviceKind::Router => KindStyle {
				background: "#ffeb3b",
				glyph: Glyph::StatusLight,
			},
			DeviceKind::Ap => KindStyle {
				background: "#4caf50",
				glyph: Glyph::Fixed("\u{1f4e1}"),
			},
			DeviceKind::Switch => KindStyle {
				background: "#9c27b0",
				glyph: Glyph::Fixed("\u{1f500}"),
			},
			DeviceKind::Other => KindStyle {
				background: "#03a9f4",
				glyph: Glyph::SignalReadout,
			},
		}
	}
}

pub fn node_visual(node: &GraphNode) -> NodeVisual {
	let style = node.kind.style();
	let glyph = match style.glyph {
		Glyph::StatusLight => if node.status { "\u{1f7e2}" } else { "\u{1f534}" }.to_string(),
		Glyph::Fixed(glyph) => glyph.to_string(),
		Glyph::SignalReadout => node
			.signal
			.map(|dbm| format!("{}dBm", dbm.round()))
			.unwrap_or_default(),
	};
	NodeVisual {
		background: style.background,
		glyph,
	}
}

/// Label shown inside the node box: glyph prefix plus the device label,
/// with incidental whitespace trimmed off.
pub fn display_label(node: &GraphNode) -> String {
	format!("{} {}", node.visual.glyph, node.label).trim().to_string()
}

pub fn edge_visual(degraded: bool) -> EdgeVisual {
	// Every edge animates in its flow direction; only the stroke carries
	// the degraded/healthy distinction.
	if degraded {
		EdgeVisual {
			stroke: "#f44336",
			width: 3.0,
			animated: true,
		}
	} else {
		EdgeVisual {
			stroke: "#555",
			width: 1.5,
			animated: true,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::types::{Point, RawDevice};

	fn node(kind: DeviceKind, status: bool, signal: Option<f64>) -> GraphNode {
		GraphNode {
			id: "n".into(),
			label: "Device".into(),
			kind,
			status,
			signal,
			position: Point::default(),
			visual: NodeVisual::default(),
			source: RawDevice::default(),
		}
	}

	#[test]
	fn router_glyph_tracks_status() {
		let up = node_visual(&node(DeviceKind::Router, true, None));
		let down = node_visual(&node(DeviceKind::Router, false, None));
		assert_eq!(up.background, "#ffeb3b");
		assert_eq!(up.glyph, "\u{1f7e2}");
		assert_eq!(down.glyph, "\u{1f534}");
		assert_ne!(up.glyph, down.glyph);
	}

	#[test]
	fn fixed_glyph_kinds() {
		assert_eq!(node_visual(&node(DeviceKind::Ap, false, None)).glyph, "\u{1f4e1}");
		assert_eq!(node_visual(&node(DeviceKind::Switch, false, None)).glyph, "\u{1f500}");
	}

	#[test]
	fn unknown_kind_reads_out_signal() {
		let with_signal = node_visual(&node(DeviceKind::Other, false, Some(-61.4)));
		assert_eq!(with_signal.background, "#03a9f4");
		assert_eq!(with_signal.glyph, "-61dBm");

		let without = node_visual(&node(DeviceKind::Other, false, None));
		assert_eq!(without.glyph, "");
	}

	#[test]
	fn display_label_is_trimmed() {
		let mut silent = node(DeviceKind::Other, false, None);
		silent.visual = node_visual(&silent);
		assert_eq!(display_label(&silent), "Device");

		let mut ap = node(DeviceKind::Ap, false, None);
		ap.visual = node_visual(&ap);
		assert_eq!(display_label(&ap), "\u{1f4e1} Device");
	}

	#[test]
	fn styling_is_pure() {
		let sample = node(DeviceKind::Router, true, Some(-40.0));
		assert_eq!(node_visual(&sample), node_visual(&sample));
		assert_eq!(edge_visual(true), edge_visual(true));
	}

	#[test]
	fn degraded_edges_get_the_warning_stroke() {
		let warn = edge_visual(true);
		let calm = edge_visual(false);
		assert_eq!(warn.stroke, "#f44336");
		assert_eq!(warn.width, 3.0);
		assert_eq!(calm.stroke, "#555");
		assert!(warn.animated && calm.animated);
	}
}
