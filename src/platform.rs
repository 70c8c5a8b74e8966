//! Platform classification for OS-specific keybindings
//!
//! Bindings are tagged Mac, non-Mac or any. The [`Platform`] value answers
//! "is this a Mac?" for the whole key handler, and can be overridden so the
//! same bindings can be exercised as either platform.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which platform a key combination applies to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsClass {
    Mac,
    NonMac,
    /// Active on every platform
    #[default]
    Any,
}

impl OsClass {
    /// Mac and non-Mac can never both be active on one running platform
    pub const fn is_exclusive_with(self, other: OsClass) -> bool {
        matches!(
            (self, other),
            (OsClass::Mac, OsClass::NonMac) | (OsClass::NonMac, OsClass::Mac)
        )
    }
}

impl fmt::Display for OsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsClass::Mac => write!(f, "mac"),
            OsClass::NonMac => write!(f, "non-mac"),
            OsClass::Any => write!(f, "any"),
        }
    }
}

/// Classifies the running platform as Mac-like or not
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Platform {
    os_name: String,
    override_os: Option<OsClass>,
}

impl Platform {
    /// Probe the platform this binary was built for
    pub fn detect() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Classify an arbitrary OS name (e.g. "macos", "Mac OS X", "linux")
    pub fn from_os_name(name: impl Into<String>) -> Self {
        Self {
            os_name: name.into(),
            override_os: None,
        }
    }

    /// A platform that always reports Mac
    pub fn mac() -> Self {
        Self::detect().with_override(Some(OsClass::Mac))
    }

    /// A platform that always reports non-Mac
    pub fn non_mac() -> Self {
        Self::detect().with_override(Some(OsClass::NonMac))
    }

    /// Set the override (builder pattern)
    pub fn with_override(mut self, os: Option<OsClass>) -> Self {
        self.set_override(os);
        self
    }

    /// Replace the platform probe until cleared with `None`.
    ///
    /// `Some(OsClass::Any)` is treated as no override.
    pub fn set_override(&mut self, os: Option<OsClass>) {
        self.override_os = match os {
            Some(OsClass::Any) | None => None,
            concrete => concrete,
        };
        tracing::debug!(os_name = %self.os_name, override_os = ?self.override_os, "platform override set");
    }

    /// The active override, if any
    pub fn override_os(&self) -> Option<OsClass> {
        self.override_os
    }

    /// The probed OS name
    pub fn os_name(&self) -> &str {
        &self.os_name
    }

    /// Whether the current platform is Mac-like
    pub fn is_mac(&self) -> bool {
        match self.override_os {
            Some(OsClass::Mac) => true,
            Some(OsClass::NonMac) => false,
            _ => self.os_name.to_ascii_lowercase().contains("mac"),
        }
    }

    /// The concrete class of the current platform (never `Any`)
    pub fn os_class(&self) -> OsClass {
        if self.is_mac() {
            OsClass::Mac
        } else {
            OsClass::NonMac
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_names_detected() {
        assert!(Platform::from_os_name("macos").is_mac());
        assert!(Platform::from_os_name("Mac OS X").is_mac());
        assert!(Platform::from_os_name("MACOS").is_mac());
    }

    #[test]
    fn test_non_mac_names() {
        assert!(!Platform::from_os_name("linux").is_mac());
        assert!(!Platform::from_os_name("windows").is_mac());
        assert!(!Platform::from_os_name("").is_mac());
    }

    #[test]
    fn test_override_replaces_probe() {
        let mut platform = Platform::from_os_name("linux");
        platform.set_override(Some(OsClass::Mac));
        assert!(platform.is_mac());
        assert_eq!(platform.os_class(), OsClass::Mac);

        platform.set_override(None);
        assert!(!platform.is_mac());
    }

    #[test]
    fn test_override_non_mac_on_mac() {
        let platform = Platform::from_os_name("macos").with_override(Some(OsClass::NonMac));
        assert!(!platform.is_mac());
        assert_eq!(platform.os_class(), OsClass::NonMac);
    }

    #[test]
    fn test_any_override_means_probe() {
        let platform = Platform::from_os_name("macos").with_override(Some(OsClass::Any));
        assert_eq!(platform.override_os(), None);
        assert!(platform.is_mac());
    }

    #[test]
    fn test_exclusivity() {
        assert!(OsClass::Mac.is_exclusive_with(OsClass::NonMac));
        assert!(OsClass::NonMac.is_exclusive_with(OsClass::Mac));
        assert!(!OsClass::Mac.is_exclusive_with(OsClass::Mac));
        assert!(!OsClass::Any.is_exclusive_with(OsClass::Mac));
        assert!(!OsClass::Any.is_exclusive_with(OsClass::NonMac));
        assert!(!OsClass::Any.is_exclusive_with(OsClass::Any));
    }

    #[test]
    fn test_os_class_serde_names() {
        let os: OsClass = serde_yaml::from_str("non_mac").unwrap();
        assert_eq!(os, OsClass::NonMac);
        assert_eq!(serde_yaml::to_string(&OsClass::Mac).unwrap().trim(), "mac");
    }
}
