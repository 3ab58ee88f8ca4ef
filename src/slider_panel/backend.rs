use std::collections::HashMap;

use log::trace;

use crate::slider_panel::error::{Result, SliderError};

/// The UI surface a `SliderPanel` drives.
///
/// A backend is owned by exactly one panel, so several panels can exist side by side
/// without sharing any global window state.
pub trait SliderBackend {
    fn open_panel(&mut self, title: &str) -> Result<()>;

    /// Only called with ranges that were already validated by the panel.
    fn create_slider(&mut self, name: &str, initial: i32, max: i32) -> Result<()>;

    /// Live position of the slider, `None` if the backend does not know it.
    fn position(&self, name: &str) -> Option<i32>;

    fn set_position(&mut self, name: &str, value: i32) -> Result<()>;

    fn close_panel(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct MemorySlider {
    value: i32,
    max: i32,
}

/// Headless backend. Sliders only move through `set_position` (or `drag` in tests).
#[derive(Debug, Default)]
pub struct MemoryBackend {
    title: Option<String>,
    sliders: HashMap<String, MemorySlider>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    #[cfg(test)]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.title.is_some()
    }

    /// Stands in for a user moving the slider by hand.
    #[cfg(test)]
    pub fn drag(&mut self, name: &str, value: i32) {
        if let Some(slider) = self.sliders.get_mut(name) {
            slider.value = value.clamp(0, slider.max);
        }
    }
}

impl SliderBackend for MemoryBackend {
    fn open_panel(&mut self, title: &str) -> Result<()> {
        self.title = Some(title.to_owned());
        Ok(())
    }

    fn create_slider(&mut self, name: &str, initial: i32, max: i32) -> Result<()> {
        trace!(
            "Memory slider '{}' created on '{}' at {} (max {}).",
            name,
            self.title.as_deref().unwrap_or_default(),
            initial,
            max
        );
        self.sliders.insert(
            name.to_owned(),
            MemorySlider {
                value: initial,
                max,
            },
        );
        Ok(())
    }

    fn position(&self, name: &str) -> Option<i32> {
        self.sliders.get(name).map(|slider| slider.value)
    }

    fn set_position(&mut self, name: &str, value: i32) -> Result<()> {
        let slider = self
            .sliders
            .get_mut(name)
            .ok_or_else(|| SliderError::MissingKey(name.to_owned()))?;

        // Real slider widgets never leave their range, whatever is asked of them.
        slider.value = value.clamp(0, slider.max);
        Ok(())
    }

    fn close_panel(&mut self) -> Result<()> {
        self.title = None;
        self.sliders.clear();
        Ok(())
    }
}
