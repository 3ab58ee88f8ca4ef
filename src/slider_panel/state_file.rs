use std::collections::BTreeMap;
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::Path;

use log::debug;

use crate::slider_panel::error::{Result, SliderError};
use crate::slider_panel::SliderValues;

/// Writes `values` as a flat json5 object, replacing whatever was at `path`.
pub fn write(path: &Path, values: &SliderValues) -> Result<()> {
    let serialized = json5::to_string(values).map_err(|e| SliderError::CorruptState {
        path: path.to_owned(),
        reason: e.to_string(),
    })?;

    let io_error = |source| SliderError::Io {
        path: path.to_owned(),
        source,
    };

    let mut file = File::create(path).map_err(io_error)?;
    file.write_all(serialized.as_bytes()).map_err(io_error)?;
    file.write_all(b"\n").map_err(io_error)?;

    debug!("Wrote {} slider values to '{}'.", values.len(), path.display());

    Ok(())
}

/// Returns `None` when there is no file at `path`.
pub fn read(path: &Path) -> Result<Option<SliderValues>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(SliderError::CorruptState {
                path: path.to_owned(),
                reason: "file is not valid utf-8".to_owned(),
            })
        }
        Err(source) => {
            return Err(SliderError::Io {
                path: path.to_owned(),
                source,
            })
        }
    };

    // json5 casts numbers straight into integer types, so read them as floats and check them.
    let numbers: BTreeMap<String, f64> =
        json5::from_str(&contents).map_err(|e| SliderError::CorruptState {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;

    let mut values = SliderValues::new();
    for (name, number) in numbers {
        let value = exact_i32(number).ok_or_else(|| SliderError::CorruptState {
            path: path.to_owned(),
            reason: format!("value {} of slider '{}' is not a whole number", number, name),
        })?;
        values.insert(name, value);
    }

    Ok(Some(values))
}

fn exact_i32(number: f64) -> Option<i32> {
    let in_range = number >= f64::from(i32::MIN) && number <= f64::from(i32::MAX);
    if number.is_finite() && number.fract() == 0.0 && in_range {
        Some(number as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::tempdir;

    use crate::slider_panel::error::SliderError;
    use crate::slider_panel::state_file::{read, write};
    use crate::slider_panel::SliderValues;

    #[test]
    fn read_missing_file_is_none() {
        let temp = tempdir().unwrap();

        let result = read(&temp.path().join("does_not_exist.json5")).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn written_file_is_flat_object() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("values.json5");

        let mut values = SliderValues::new();
        values.insert("LowH".to_string(), 12);
        values.insert("HighH".to_string(), 170);
        write(&path, &values).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.trim().starts_with('{'));
        assert!(contents.trim().ends_with('}'));
        assert!(contents.find("HighH").unwrap() < contents.find("LowH").unwrap());
        assert_eq!(read(&path).unwrap(), Some(values));
    }

    #[test]
    fn write_overwrites_existing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("values.json5");
        fs::write(&path, "something that was here before, and is much longer").unwrap();

        let mut values = SliderValues::new();
        values.insert("a".to_string(), 1);
        write(&path, &values).unwrap();

        assert_eq!(read(&path).unwrap(), Some(values));
    }

    #[test]
    fn read_accepts_hand_edited_json5() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("values.json5");
        fs::write(
            &path,
            "{\n  // picked for the green ball\n  LowH: 40,\n  HighH: 90,\n}\n",
        )
        .unwrap();

        let values = read(&path).unwrap().unwrap();

        assert_eq!(values.len(), 2);
        assert_eq!(values["LowH"], 40);
        assert_eq!(values["HighH"], 90);
    }

    #[test]
    fn read_garbage_is_corrupt_state() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("values.json5");
        fs::write(&path, "definitely { not json").unwrap();

        assert!(matches!(read(&path), Err(SliderError::CorruptState { .. })));
    }

    #[test]
    fn read_non_integer_value_is_corrupt_state() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("values.json5");
        fs::write(&path, r#"{"LowH": "zero"}"#).unwrap();

        assert!(matches!(read(&path), Err(SliderError::CorruptState { .. })));
    }

    #[test]
    fn read_rejects_numbers_that_are_not_exact_integers() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("values.json5");

        for number in ["1.5", "NaN", "Infinity", "-Infinity", "2147483648", "99999999999999999999"]
            .iter()
        {
            fs::write(&path, format!("{{LowH: {}}}", number)).unwrap();

            match read(&path) {
                Err(SliderError::CorruptState { reason, .. }) => {
                    assert!(reason.contains("LowH"), "{} gave reason '{}'", number, reason)
                }
                other => panic!("{} should be corrupt, got {:?}", number, other),
            }
        }
    }

    #[test]
    fn read_accepts_whole_numbers_written_as_floats() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("values.json5");
        fs::write(&path, "{LowH: 12.0, HighH: -0, LowS: 2147483647}").unwrap();

        let values = read(&path).unwrap().unwrap();

        assert_eq!(values["LowH"], 12);
        assert_eq!(values["HighH"], 0);
        assert_eq!(values["LowS"], i32::MAX);
    }
}
