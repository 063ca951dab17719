//! Device fingerprint contract.
//!
//! Stored `device_auth.cpu_id` values were computed in the browser as the
//! SHA-256 of six navigator/screen properties joined by `|`. Any change to the
//! inputs, their order, or their rendering invalidates every approved device,
//! so this module reproduces the exact byte string.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Separator between fingerprint components.
const SEPARATOR: &str = "|";

/// Client-reported device properties submitted with a login request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub user_agent: String,
    pub platform: String,
    /// `navigator.hardwareConcurrency`; browsers may omit it.
    #[serde(default)]
    pub cpu_cores: Option<u32>,
    pub language: String,
    /// Screen size rendered as `"<width>x<height>"`.
    pub screen: String,
    /// `screen.colorDepth`; may be omitted.
    #[serde(default)]
    pub color_depth: Option<u32>,
}

impl DeviceInfo {
    /// The raw string that is hashed.
    ///
    /// Missing numbers render as the empty string, which is what
    /// `Array.prototype.join` produces for `undefined`.
    pub fn canonical_string(&self) -> String {
        let cpu = self.cpu_cores.map(|c| c.to_string()).unwrap_or_default();
        let depth = self.color_depth.map(|d| d.to_string()).unwrap_or_default();
        [
            self.user_agent.as_str(),
            self.platform.as_str(),
            cpu.as_str(),
            self.language.as_str(),
            self.screen.as_str(),
            depth.as_str(),
        ]
        .join(SEPARATOR)
    }
}

/// Compute the lowercase hex SHA-256 fingerprint of a device.
pub fn fingerprint(info: &DeviceInfo) -> String {
    let mut hasher = Sha256::new();
    hasher.update(info.canonical_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DeviceInfo {
        DeviceInfo {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
            platform: "Linux x86_64".to_string(),
            cpu_cores: Some(8),
            language: "fr-FR".to_string(),
            screen: "1920x1080".to_string(),
            color_depth: Some(24),
        }
    }

    #[test]
    fn canonical_string_joins_in_contract_order() {
        assert_eq!(
            sample().canonical_string(),
            "Mozilla/5.0 (X11; Linux x86_64)|Linux x86_64|8|fr-FR|1920x1080|24"
        );
    }

    #[test]
    fn missing_numbers_render_empty() {
        let info = DeviceInfo {
            cpu_cores: None,
            color_depth: None,
            ..sample()
        };
        assert_eq!(
            info.canonical_string(),
            "Mozilla/5.0 (X11; Linux x86_64)|Linux x86_64||fr-FR|1920x1080|"
        );
    }

    #[test]
    fn fingerprint_of_empty_input_matches_known_digest() {
        // Six empty components joined by '|' hash to the digest of "|||||".
        let mut hasher = Sha256::new();
        hasher.update(b"|||||");
        let expected = format!("{:x}", hasher.finalize());
        assert_eq!(fingerprint(&DeviceInfo::default()), expected);
    }

    #[test]
    fn fingerprint_is_stable_lowercase_hex() {
        let a = fingerprint(&sample());
        let b = fingerprint(&sample());
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn every_component_changes_the_fingerprint() {
        let base = fingerprint(&sample());
        let variants = [
            DeviceInfo { user_agent: "other".into(), ..sample() },
            DeviceInfo { platform: "Win32".into(), ..sample() },
            DeviceInfo { cpu_cores: Some(4), ..sample() },
            DeviceInfo { language: "en-US".into(), ..sample() },
            DeviceInfo { screen: "1366x768".into(), ..sample() },
            DeviceInfo { color_depth: Some(30), ..sample() },
        ];
        for variant in variants {
            assert_ne!(fingerprint(&variant), base, "{variant:?} should differ");
        }
    }

    #[test]
    fn deserializes_without_optional_numbers() {
        let json = r#"{"user_agent":"ua","platform":"p","language":"en","screen":"1x1"}"#;
        let info: DeviceInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.cpu_cores, None);
        assert_eq!(info.color_depth, None);
    }
}
