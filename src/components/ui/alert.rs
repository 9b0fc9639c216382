use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
	#[default]
	Info,
	Warning,
	Error,
	Success,
}

impl Severity {
	const fn class(self) -> &'static str {
		match self {
			Severity::Info => "alert-info",
			Severity::Warning => "alert-warning",
			Severity::Error => "alert-error",
			Severity::Success => "alert-success",
		}
	}
}

/// Severity-colored message banner.
#[component]
pub fn Alert(#[prop(default = Severity::Info)] severity: Severity, children: Children) -> impl IntoView {
	view! { <div class=format!("alert {}", severity.class())>{children()}</div> }
}
