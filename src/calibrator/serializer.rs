//! Calibration document persistence and export
//!
//! JSON round-trip for the settings document (normalized on both paths),
//! plus export as a paste-ready block of Rust constant definitions.
//! Persisted to LocalStorage on the web build; native builds are stubs.

use glam::Vec3;

use super::types::{CAMERA_FAR, CAMERA_NEAR, CAMERA_ROLL, CalibrationSettings};

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "mobius_harvest_calibration";

/// Serialize a normalized settings document as pretty JSON
pub fn serialize_settings(settings: &CalibrationSettings) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&settings.clone().normalized())
}

/// Parse a settings document, normalizing every field into range
pub fn parse_settings(raw: &str) -> serde_json::Result<CalibrationSettings> {
    let settings: CalibrationSettings = serde_json::from_str(raw)?;
    Ok(settings.normalized())
}

/// Format a float as a valid f32 literal, trimmed to six decimals
fn format_literal(value: f32) -> String {
    let rounded = (value as f64 * 1e6).round() / 1e6;
    let mut text = format!("{rounded}");
    if !text.contains('.') && !text.contains('e') {
        text.push_str(".0");
    }
    text
}

fn format_vec3(value: Vec3) -> String {
    format!(
        "Vec3::new({}, {}, {})",
        format_literal(value.x),
        format_literal(value.y),
        format_literal(value.z)
    )
}

/// Render the tuned values as constant definitions ready to paste into
/// `calibrator::types`
pub fn export_constants_patch(settings: &CalibrationSettings) -> String {
    let s = settings.clone().normalized();
    [
        "// Paste these values into src/calibrator/types.rs".to_string(),
        format!("pub const WORLD_SCALE: Vec3 = {};", format_vec3(s.world_scale)),
        String::new(),
        format!("pub const CAMERA_FOV: f32 = {};", format_literal(s.camera.fov)),
        format!("pub const CAMERA_NEAR: f32 = {};", format_literal(CAMERA_NEAR)),
        format!("pub const CAMERA_FAR: f32 = {};", format_literal(CAMERA_FAR)),
        format!(
            "pub const CAMERA_POSITION: Vec3 = {};",
            format_vec3(s.camera.position)
        ),
        format!(
            "pub const CAMERA_LOOK_AT: Vec3 = {};",
            format_vec3(s.camera.look_at)
        ),
        format!("pub const CAMERA_ROLL: f32 = {};", format_literal(CAMERA_ROLL)),
        String::new(),
        format!(
            "pub const HEMISPHERE_INTENSITY: f32 = {};",
            format_literal(s.lighting.hemi)
        ),
        format!(
            "pub const KEY_INTENSITY: f32 = {};",
            format_literal(s.lighting.key)
        ),
        format!(
            "pub const BACK_INTENSITY: f32 = {};",
            format_literal(s.lighting.back)
        ),
        format!(
            "pub const AMBIENT_INTENSITY: f32 = {};",
            format_literal(s.lighting.ambient)
        ),
    ]
    .join("\n")
}

impl CalibrationSettings {
    /// Load the calibration document from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(STORAGE_KEY) {
                if let Ok(settings) = parse_settings(&json) {
                    log::info!("Loaded calibration from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default calibration");
        Self::default()
    }

    /// Save the calibration document to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serialize_settings(self) {
                let _ = storage.set_item(STORAGE_KEY, &json);
                log::info!("Calibration saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibrator::types::{ApplePlacement, PREVIEW_APPLE_COUNT};
    use crate::sim::ApplePolarity;

    #[test]
    fn test_json_roundtrip_preserves_document() {
        let mut settings = CalibrationSettings::default();
        settings.seed = 1234;
        settings.camera.fov = 55.0;
        settings.lighting.key = 2.0;
        settings.apple_placements = vec![ApplePlacement {
            u: 1.5,
            lane_index: 4,
            polarity: ApplePolarity::Poison,
        }];

        let json = serialize_settings(&settings).unwrap();
        let back = parse_settings(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_parse_normalizes_wild_values() {
        let raw = r#"{
            "world_scale": [900.0, 1.0, 1.0],
            "camera": {"position": [10.0, 8.2, 2.0], "look_at": [0.0, 0.0, 0.0], "fov": 4.0},
            "lighting": {"hemi": 2.3, "key": 1.45, "back": 0.5, "ambient": 99.0},
            "seed": 9,
            "apple_placements": []
        }"#;
        let settings = parse_settings(raw).unwrap();
        assert_eq!(settings.world_scale.x, 20.0);
        assert_eq!(settings.camera.fov, 10.0);
        assert_eq!(settings.lighting.ambient, 10.0);
        assert_eq!(settings.seed, 9);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(parse_settings("not json").is_err());
        assert!(parse_settings(r#"{"seed": 1}"#).is_err());
    }

    #[test]
    fn test_constants_patch_is_paste_ready() {
        let patch = export_constants_patch(&CalibrationSettings::default());
        assert!(patch.contains("pub const WORLD_SCALE: Vec3 = Vec3::new(1.0, 1.0, 1.0);"));
        assert!(patch.contains("pub const CAMERA_FOV: f32 = 42.0;"));
        assert!(patch.contains("pub const CAMERA_POSITION: Vec3 = Vec3::new(10.0, 8.2, 2.0);"));
        assert!(patch.contains("pub const KEY_INTENSITY: f32 = 1.45;"));
        // Every emitted literal must parse as f32 source
        assert!(patch.contains("pub const BACK_INTENSITY: f32 = 0.5;"));
    }

    #[test]
    fn test_format_literal_always_valid_f32_source() {
        assert_eq!(format_literal(1.0), "1.0");
        assert_eq!(format_literal(8.2), "8.2");
        assert_eq!(format_literal(0.53), "0.53");
        assert_eq!(format_literal(1.570796), "1.570796");
        assert_eq!(format_literal(-3.0), "-3.0");
    }

    #[test]
    fn test_native_load_returns_defaults() {
        let settings = CalibrationSettings::load();
        assert_eq!(settings, CalibrationSettings::default());
        assert_eq!(settings.apple_placements.len(), PREVIEW_APPLE_COUNT);
        settings.save();
    }
}
