//! HTTP collaborators: thin wrappers over the monitoring backend endpoints.
//! All graph construction stays out of here; this module only fetches and
//! decodes snapshots.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::components::topology::{TopologySnapshot, lenient_seq};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/monitoring";

/// Seed routers the backend walks to discover the rest of the network.
pub const DEFAULT_SEED_IPS: &[&str] = &["45.172.141.122", "45.172.141.35"];

#[derive(Debug, Error)]
pub enum ApiError {
	#[error("request failed: {0}")]
	Network(#[from] gloo_net::Error),
	#[error("backend returned HTTP {0}")]
	Status(u16),
}

#[derive(Serialize)]
struct SeedRequest<'a> {
	ip_list: &'a [&'a str],
}

/// Connectivity report for the status page. Like the topology snapshot,
/// both collections decode leniently.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StatusReport {
	#[serde(default, deserialize_with = "lenient_seq")]
	pub mikrotik: Vec<MikrotikStatus>,
	#[serde(default, deserialize_with = "lenient_seq")]
	pub uisp: Vec<Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MikrotikStatus {
	pub ip: String,
	#[serde(default)]
	pub online: bool,
	#[serde(default)]
	pub latency: Option<f64>,
}

pub async fn fetch_topology(base: &str, seed_ips: &[&str]) -> Result<TopologySnapshot, ApiError> {
	let snapshot: TopologySnapshot = post_json(&format!("{base}/topology"), seed_ips).await?;
	log::info!(
		"topology snapshot: {} devices, {} links",
		snapshot.nodes.len(),
		snapshot.edges.len()
	);
	Ok(snapshot)
}

pub async fn fetch_status(base: &str, seed_ips: &[&str]) -> Result<StatusReport, ApiError> {
	post_json(&format!("{base}/status"), seed_ips).await
}

async fn post_json<T>(url: &str, seed_ips: &[&str]) -> Result<T, ApiError>
where
	T: serde::de::DeserializeOwned,
{
	let response = Request::post(url)
		.json(&SeedRequest { ip_list: seed_ips })?
		.send()
		.await?;
	if !response.ok() {
		return Err(ApiError::Status(response.status()));
	}
	Ok(response.json().await?)
}
