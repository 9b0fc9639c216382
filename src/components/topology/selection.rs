use super::types::{GraphNode, RawDevice};

/// Single-selection state backing the device detail panel. At most one
/// device is selected at a time.
#[derive(Clone, Debug, Default)]
pub struct Selection {
	current: Option<RawDevice>,
}

impl Selection {
	/// Replace whatever is selected with `device`.
	pub fn select(&mut self, device: RawDevice) {
		self.current = Some(device);
	}

	/// Drop the selection. Calling with nothing selected is a no-op.
	pub fn clear(&mut self) {
		self.current = None;
	}

	pub fn current(&self) -> Option<&RawDevice> {
		self.current.as_ref()
	}

	/// Carry the selection across a snapshot refresh. It survives only while
	/// its id still exists, and is re-pointed at the new snapshot's record so
	/// the panel never shows attributes from a stale fetch.
	pub fn retain(&mut self, nodes: &[GraphNode]) {
		self.current = self.current.take().and_then(|old| {
			nodes
				.iter()
				.find(|node| node.id == old.id)
				.map(|node| node.source.clone())
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::model::normalize;

	fn device(id: &str, label: &str) -> RawDevice {
		RawDevice {
			id: id.into(),
			label: label.into(),
			..RawDevice::default()
		}
	}

	#[test]
	fn select_replaces_unconditionally() {
		let mut selection = Selection::default();
		assert!(selection.current().is_none());

		selection.select(device("a", "A"));
		selection.select(device("b", "B"));
		assert_eq!(selection.current().map(|d| d.id.as_str()), Some("b"));
	}

	#[test]
	fn clear_is_idempotent() {
		let mut selection = Selection::default();
		selection.clear();
		assert!(selection.current().is_none());

		selection.select(device("a", "A"));
		selection.clear();
		selection.clear();
		assert!(selection.current().is_none());
	}

	#[test]
	fn retain_follows_the_surviving_id() {
		let mut selection = Selection::default();
		selection.select(device("a", "old label"));

		let (nodes, _) = normalize(&[device("a", "new label"), device("b", "B")], &[]);
		selection.retain(&nodes);

		// Still selected, but showing the refreshed record.
		assert_eq!(selection.current().map(|d| d.label.as_str()), Some("new label"));
	}

	#[test]
	fn retain_drops_a_vanished_id() {
		let mut selection = Selection::default();
		selection.select(device("gone", "X"));

		let (nodes, _) = normalize(&[device("a", "A")], &[]);
		selection.retain(&nodes);
		assert!(selection.current().is_none());
	}
}
