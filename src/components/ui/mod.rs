mod alert;
mod spinner;

pub use alert::{Alert, Severity};
pub use spinner::{Spinner, SpinnerSize};
