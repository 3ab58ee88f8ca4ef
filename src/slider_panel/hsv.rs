use crate::slider_panel::backend::SliderBackend;
use crate::slider_panel::error::{Result, SliderError};
use crate::slider_panel::slider_panel::SliderPanel;
use crate::slider_panel::SliderValues;

pub const HSV_PANEL_TITLE: &str = "HSV Controls";

pub const LOW_H: &str = "LowH";
pub const HIGH_H: &str = "HighH";
pub const LOW_S: &str = "LowS";
pub const HIGH_S: &str = "HighS";
pub const LOW_V: &str = "LowV";
pub const HIGH_V: &str = "HighV";

// Hue runs 0-179 on the OpenCV scale, saturation and value 0-255.
const MAX_HUE: i32 = 179;
const MAX_SATURATION: i32 = 255;
const MAX_VALUE: i32 = 255;

/// `(name, initial, max)` of every HSV slider, in panel order.
pub const HSV_SLIDERS: [(&str, i32, i32); 6] = [
    (LOW_H, 0, MAX_HUE),
    (HIGH_H, MAX_HUE, MAX_HUE),
    (LOW_S, 0, MAX_SATURATION),
    (HIGH_S, MAX_SATURATION, MAX_SATURATION),
    (LOW_V, 0, MAX_VALUE),
    (HIGH_V, MAX_VALUE, MAX_VALUE),
];

/// Hue, saturation and value, in that order.
pub type HsvTriple = [i32; 3];

pub fn build_hsv_panel<B: SliderBackend>(backend: B) -> Result<SliderPanel<B>> {
    let mut panel = SliderPanel::create(HSV_PANEL_TITLE, backend)?;

    for (name, initial, max) in HSV_SLIDERS.iter() {
        panel.add_slider(name, *initial, *max)?;
    }

    Ok(panel)
}

pub fn lower_bound_hsv(values: &SliderValues) -> Result<HsvTriple> {
    project(values, [LOW_H, LOW_S, LOW_V])
}

pub fn upper_bound_hsv(values: &SliderValues) -> Result<HsvTriple> {
    project(values, [HIGH_H, HIGH_S, HIGH_V])
}

/// Lower and upper bound at once.
pub fn hsv_bounds(values: &SliderValues) -> Result<(HsvTriple, HsvTriple)> {
    Ok((lower_bound_hsv(values)?, upper_bound_hsv(values)?))
}

fn project(values: &SliderValues, names: [&str; 3]) -> Result<HsvTriple> {
    let mut triple = [0; 3];

    for (slot, name) in triple.iter_mut().zip(names.iter()) {
        *slot = *values
            .get(*name)
            .ok_or_else(|| SliderError::MissingKey((*name).to_owned()))?;
    }

    Ok(triple)
}
