#![cfg(test)]

use std::fs;

use tempfile::tempdir;

use crate::slider_panel::backend::{MemoryBackend, SliderBackend};
use crate::slider_panel::error::SliderError;
use crate::slider_panel::hsv::{build_hsv_panel, hsv_bounds};
use crate::slider_panel::slider_panel::{LoadOutcome, SliderPanel};

#[test]
fn test_save_and_load_values() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("values.json5");

    let mut slider = SliderPanel::create("Test Window", MemoryBackend::new()).unwrap();
    slider.add_slider("TestSlider", 50, 100).unwrap();
    slider.save_values(&path).unwrap();

    let mut new_slider = SliderPanel::create("New Test Window", MemoryBackend::new()).unwrap();
    new_slider.add_slider("TestSlider", 0, 100).unwrap();
    let outcome = new_slider.load_values(&path).unwrap();

    assert_eq!(outcome, LoadOutcome::Loaded(1));
    assert_eq!(slider.values(), new_slider.values());
}

#[test]
fn hsv_session_survives_restart() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("hsv_values.json5");

    let mut first = build_hsv_panel(MemoryBackend::new()).unwrap();
    assert_eq!(first.load_values(&path).unwrap(), LoadOutcome::NotFound);

    first.backend_mut().drag("LowH", 35);
    first.backend_mut().drag("HighH", 85);
    first.backend_mut().drag("LowS", 120);
    let before_restart = first.get_values().unwrap().clone();
    first.save_values(&path).unwrap();
    first.destroy().unwrap();

    let mut second = build_hsv_panel(MemoryBackend::new()).unwrap();
    assert_eq!(second.load_values(&path).unwrap(), LoadOutcome::Loaded(6));

    assert_eq!(second.backend().position("LowS"), Some(120));
    let after_restart = second.get_values().unwrap();
    assert_eq!(&before_restart, after_restart);

    let (lower, upper) = hsv_bounds(after_restart).unwrap();
    assert_eq!(lower, [35, 120, 0]);
    assert_eq!(upper, [85, 255, 255]);
}

#[test]
fn save_overwrites_previous_session() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("hsv_values.json5");

    let mut panel = build_hsv_panel(MemoryBackend::new()).unwrap();
    panel.backend_mut().drag("HighV", 10);
    panel.get_values().unwrap();
    panel.save_values(&path).unwrap();

    panel.backend_mut().drag("HighV", 200);
    panel.get_values().unwrap();
    panel.save_values(&path).unwrap();

    let mut restored = build_hsv_panel(MemoryBackend::new()).unwrap();
    restored.load_values(&path).unwrap();
    assert_eq!(restored.values()["HighV"], 200);
}

#[test]
fn corrupt_file_does_not_disturb_panel() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("hsv_values.json5");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x12]).unwrap();

    let mut panel = build_hsv_panel(MemoryBackend::new()).unwrap();
    let before = panel.values().clone();

    assert!(panel.load_values(&path).is_err());
    assert_eq!(panel.values(), &before);
    assert_eq!(panel.backend().position("HighH"), Some(179));
}

#[test]
fn fractional_and_nan_values_are_not_restored() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("hsv_values.json5");
    fs::write(&path, "{LowH: 12.9, HighS: NaN}").unwrap();

    let mut panel = build_hsv_panel(MemoryBackend::new()).unwrap();

    assert!(matches!(
        panel.load_values(&path),
        Err(SliderError::CorruptState { .. })
    ));
    assert_eq!(panel.backend().position("LowH"), Some(0));
    assert_eq!(panel.backend().position("HighS"), Some(255));
}
