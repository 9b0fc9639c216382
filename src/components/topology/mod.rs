mod component;
mod layout;
mod model;
mod render;
mod selection;
mod state;
mod style;
mod types;
mod view;

pub use component::TopologyCanvas;
pub use types::{DeviceKind, RawDevice, RawLink, TopologySnapshot};
pub(crate) use types::lenient_seq;
