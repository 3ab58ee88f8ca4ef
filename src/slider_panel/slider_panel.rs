use std::path::Path;

use log::{debug, info, warn};

use crate::slider_panel::backend::SliderBackend;
use crate::slider_panel::error::{Result, SliderError};
use crate::slider_panel::named_range::NamedRange;
use crate::slider_panel::state_file;
use crate::slider_panel::SliderValues;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoadOutcome {
    /// This many values were restored from the file.
    Loaded(usize),
    /// There was no file, nothing changed.
    NotFound,
}

/// A titled panel of named integer sliders.
#[derive(Debug)]
pub struct SliderPanel<B: SliderBackend> {
    name: String,
    backend: B,
    ranges: Vec<NamedRange>,
    values: SliderValues,
}

impl<B: SliderBackend> SliderPanel<B> {
    pub fn create(name: &str, mut backend: B) -> Result<Self> {
        backend.open_panel(name)?;

        Ok(SliderPanel {
            name: name.to_owned(),
            backend,
            ranges: vec![],
            values: SliderValues::new(),
        })
    }

    pub fn add_slider(&mut self, name: &str, initial: i32, max: i32) -> Result<()> {
        self.add_range(NamedRange::new(name, initial, max)?)
    }

    pub fn add_range(&mut self, range: NamedRange) -> Result<()> {
        if self.range(&range.name).is_some() {
            return Err(SliderError::DuplicateSlider(range.name));
        }

        self.backend
            .create_slider(&range.name, range.initial, range.max)?;

        debug!(
            "Added slider '{}' to '{}' at {} (max {}).",
            range.name, self.name, range.initial, range.max
        );

        self.values.insert(range.name.clone(), range.initial);
        self.ranges.push(range);

        Ok(())
    }

    /// Polls every slider and returns the refreshed values.
    pub fn get_values(&mut self) -> Result<&SliderValues> {
        for range in self.ranges.iter() {
            let position = self
                .backend
                .position(&range.name)
                .ok_or_else(|| SliderError::MissingKey(range.name.clone()))?;

            self.values.insert(range.name.clone(), position);
        }

        Ok(&self.values)
    }

    /// Values as of the last `get_values` or `load_values`.
    #[cfg(test)]
    pub fn values(&self) -> &SliderValues {
        &self.values
    }

    pub fn save_values<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        state_file::write(path, &self.values)?;

        info!(
            "Saved {} slider values of '{}' to '{}'.",
            self.values.len(),
            self.name,
            path.display()
        );

        Ok(())
    }

    /// Restores saved values into the mapping and the live sliders.
    ///
    /// Nothing is applied unless every saved name belongs to a slider of this panel and every
    /// value fits that slider's range. Sliders missing from the file keep their current value.
    pub fn load_values<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadOutcome> {
        let path = path.as_ref();

        let loaded = match state_file::read(path)? {
            Some(loaded) => loaded,
            None => {
                warn!(
                    "File '{}' not found. Using default values.",
                    path.display()
                );
                return Ok(LoadOutcome::NotFound);
            }
        };

        for (name, value) in loaded.iter() {
            let range = self
                .range(name)
                .ok_or_else(|| SliderError::MissingKey(name.clone()))?;

            if !range.contains(*value) {
                return Err(SliderError::CorruptState {
                    path: path.to_owned(),
                    reason: format!(
                        "value {} of slider '{}' is outside 0..={}",
                        value, name, range.max
                    ),
                });
            }
        }

        for (name, value) in loaded.iter() {
            self.backend.set_position(name, *value)?;
            self.values.insert(name.clone(), *value);
        }

        for range in self.ranges.iter() {
            if !loaded.contains_key(&range.name) {
                debug!(
                    "Slider '{}' is not in '{}', keeping its current value.",
                    range.name,
                    path.display()
                );
            }
        }

        info!(
            "Loaded {} slider values for '{}' from '{}'.",
            loaded.len(),
            self.name,
            path.display()
        );

        Ok(LoadOutcome::Loaded(loaded.len()))
    }

    /// Closes the panel on the backend. Call once, when done with the panel.
    pub fn destroy(mut self) -> Result<()> {
        debug!("Closing slider panel '{}'.", self.name);
        self.backend.close_panel()
    }

    #[cfg(test)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sliders in the order they were added.
    #[cfg(test)]
    pub fn ranges(&self) -> &[NamedRange] {
        &self.ranges
    }

    pub fn range(&self, name: &str) -> Option<&NamedRange> {
        self.ranges.iter().find(|range| range.name == name)
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
