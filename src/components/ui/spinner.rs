use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinnerSize {
	Sm,
	#[default]
	Md,
	Lg,
	Xl,
}

impl SpinnerSize {
	const fn pixels(self) -> u32 {
		match self {
			SpinnerSize::Sm => 16,
			SpinnerSize::Md => 24,
			SpinnerSize::Lg => 32,
			SpinnerSize::Xl => 40,
		}
	}
}

/// Indeterminate loading indicator.
#[component]
pub fn Spinner(
	#[prop(default = SpinnerSize::Md)] size: SpinnerSize,
	#[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
	let px = size.pixels();

	view! {
		<div class="spinner">
			<svg width=px height=px viewBox="0 0 24 24" fill="none">
				<circle cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4" opacity=".25" />
				<path d="M22 12a10 10 0 0 1-10 10" stroke="currentColor" stroke-width="4" />
			</svg>
			{label.map(|text| view! { <span>{text}</span> })}
		</div>
	}
}
