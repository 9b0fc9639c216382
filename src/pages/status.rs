use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, StatusReport};
use crate::components::ui::{Alert, Severity, Spinner, SpinnerSize};
use crate::pages::Phase;

/// Status page: MikroTik reachability and the UISP device inventory.
#[component]
pub fn Status() -> impl IntoView {
	let report = RwSignal::new(StatusReport::default());
	let phase = RwSignal::new(Phase::Loading);

	spawn_local(async move {
		match api::fetch_status(api::DEFAULT_API_BASE, api::DEFAULT_SEED_IPS).await {
			Ok(data) => {
				report.set(data);
				phase.set(Phase::Ready);
			}
			Err(err) => {
				log::warn!("status fetch failed: {err}");
				phase.set(Phase::Failed(err.to_string()));
			}
		}
	});

	view! {
		<main class="status-page">
			<h1>"Network Status"</h1>
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
						<Alert severity=Severity::Error>"Could not load the status: " {message}</Alert>
					}
						.into_any()
				}
				Phase::Ready if report.with(|r| r.mikrotik.is_empty() && r.uisp.is_empty()) => {
					view! { <Alert severity=Severity::Warning>"No status data available."</Alert> }
						.into_any()
				}
				Phase::Ready => report.with(tables).into_any(),
			}}
		</main>
	}
}

fn tables(report: &StatusReport) -> impl IntoView + use<> {
	let mikrotik_rows = report
		.mikrotik
		.iter()
		.map(|row| {
			view! {
				<tr>
					<td>{row.ip.clone()}</td>
					<td>{if row.online { "\u{2714}" } else { "\u{274c}" }}</td>
					<td>{row.latency.map_or_else(|| "-".to_string(), |ms| format!("{ms}"))}</td>
				</tr>
			}
		})
		.collect_view();

	let uisp_rows = report
		.uisp
		.iter()
		.map(|device| {
			view! {
				<tr>
					<td>{field_text(device, &[&["identification", "id"]])}</td>
					<td>{field_text(device, &[&["identification", "name"]])}</td>
					<td>{field_text(device, &[&["ipAddress"]])}</td>
					<td>{field_text(device, &[&["mac"], &["identification", "mac"]])}</td>
				</tr>
			}
		})
		.collect_view();

	view! {
		<section>
			<h2>"MikroTik"</h2>
			<table>
				<thead>
					<tr>
						<th>"IP"</th>
						<th>"Online"</th>
						<th>"Latency (ms)"</th>
					</tr>
				</thead>
				<tbody>{mikrotik_rows}</tbody>
			</table>
		</section>
		<section>
			<h2>"UISP Devices"</h2>
			<table>
				<thead>
					<tr>
						<th>"ID"</th>
						<th>"Name"</th>
						<th>"IP"</th>
						<th>"MAC"</th>
					</tr>
				</thead>
				<tbody>{uisp_rows}</tbody>
			</table>
		</section>
	}
}

fn field<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
	path.iter().try_fold(value, |cur, key| cur.get(*key))
}

/// First matching path rendered as text, `-` when nothing matches. The UISP
/// payload is irregular, so fields are read opportunistically.
fn field_text(value: &Value, paths: &[&[&str]]) -> String {
	paths
		.iter()
		.find_map(|path| field(value, path))
		.and_then(|found| match found {
			Value::String(text) => Some(text.clone()),
			Value::Number(number) => Some(number.to_string()),
			_ => None,
		})
		.unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn field_text_walks_fallback_paths() {
		let device = json!({"identification": {"id": "abc", "mac": "aa:bb"}, "ipAddress": "10.0.0.1"});
		assert_eq!(field_text(&device, &[&["identification", "id"]]), "abc");
		assert_eq!(field_text(&device, &[&["mac"], &["identification", "mac"]]), "aa:bb");
		assert_eq!(field_text(&device, &[&["missing"]]), "-");
	}
}
