use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::topology::{TopologyCanvas, TopologySnapshot};
use crate::components::ui::{Alert, Severity, Spinner, SpinnerSize};
use crate::pages::Phase;

/// Topology page: fetches the inventory and hands it to the canvas. The
/// canvas stays mounted across refreshes so the selection can survive them.
#[component]
pub fn Home() -> impl IntoView {
	let snapshot = RwSignal::new(TopologySnapshot::default());
	let phase = RwSignal::new(Phase::Loading);
	// Monotonic fetch id; a slow response must never clobber a newer one.
	let epoch = StoredValue::new(0u64);

	let load = move || {
		let seq = epoch.get_value() + 1;
		epoch.set_value(seq);
		phase.set(Phase::Loading);
		spawn_local(async move {
			let result = api::fetch_topology(api::DEFAULT_API_BASE, api::DEFAULT_SEED_IPS).await;
			if epoch.get_value() != seq {
				return;
			}
			match result {
				Ok(snap) => {
					snapshot.set(snap);
					phase.set(Phase::Ready);
				}
				Err(err) => {
					log::warn!("topology fetch failed: {err}");
					phase.set(Phase::Failed(err.to_string()));
				}
			}
		});
	};
	load();

	view! {
		<div class="fullscreen-graph">
			<TopologyCanvas data=snapshot fullscreen=true />
			<div class="graph-overlay">
				<h1>"Network Topology"</h1>
				<p class="subtitle">
					"Click a device for details. Scroll to zoom. Drag the background to pan."
				</p>
				<button class="refresh-button" on:click=move |_| load()>
					"Refresh"
				</button>
			</div>
			{move || match phase.get() {
				Phase::Loading => {
					view! {
						<div class="page-center">
							<Spinner size=SpinnerSize::Xl />
						</div>
					}
						.into_any()
				}
				Phase::Failed(message) => {
					view! {
						<div class="page-center">
							<Alert severity=Severity::Error>
								"Could not load the topology: " {message}
							</Alert>
						</div>
					}
						.into_any()
				}
				Phase::Ready if snapshot.with(|snap| snap.nodes.is_empty()) => {
					view! {
						<div class="page-center">
							<Alert severity=Severity::Warning>
								"The topology is empty or unavailable."
							</Alert>
						</div>
					}
						.into_any()
				}
				Phase::Ready => ().into_any(),
			}}
		</div>
	}
}
