use std::collections::BTreeMap;

pub use backend::{MemoryBackend, SliderBackend};
pub use error::{Result, SliderError};
pub use hsv::{build_hsv_panel, hsv_bounds, HsvTriple};
pub use slider_panel::{LoadOutcome, SliderPanel};

mod backend;
mod error;
mod hsv;
mod named_range;
mod slider_panel;
mod state_file;
mod test_slider_panel_persistence;

/// Slider name to current position. Sorted by name, which keeps saved files stable.
pub type SliderValues = BTreeMap<String, i32>;
