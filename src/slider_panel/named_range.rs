use crate::slider_panel::error::{Result, SliderError};

/// A slider name together with its starting position and ceiling.
/// The floor is always 0.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NamedRange {
    pub name: String,
    pub initial: i32,
    pub max: i32,
}

impl NamedRange {
    pub fn new(name: &str, initial: i32, max: i32) -> Result<Self> {
        if initial < 0 || initial > max {
            return Err(SliderError::InvalidRange {
                name: name.to_owned(),
                initial,
                max,
            });
        }

        Ok(NamedRange {
            name: name.to_owned(),
            initial,
            max,
        })
    }

    pub fn contains(&self, value: i32) -> bool {
        (0..=self.max).contains(&value)
    }
}
