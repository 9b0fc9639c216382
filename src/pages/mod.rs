pub mod home;
pub mod not_found;
pub mod status;

/// Fetch lifecycle shared by the pages.
#[derive(Clone, PartialEq)]
pub(crate) enum Phase {
	Loading,
	Ready,
	Failed(String),
}
