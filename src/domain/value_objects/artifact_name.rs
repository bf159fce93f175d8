//! Artifact File Name Value Object
//!
//! Final on-disk name of an uploaded artifact:
//! `<package>-<version>-<channel>-<millis>.apk`. The millisecond stamp keeps
//! repeated uploads of the same version/channel apart.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName(String);

impl ArtifactName {
    pub const EXTENSION: &'static str = "apk";

    pub fn new(package_name: &str, version: &str, channel: &str, stamp: i64) -> Self {
        Self(format!(
            "{}-{}-{}-{}.{}",
            sanitize(package_name),
            sanitize(version),
            sanitize(channel),
            stamp,
            Self::EXTENSION
        ))
    }

    /// First name derived from `stamp` (counting upward) that `taken` rejects.
    pub fn unique(
        package_name: &str,
        version: &str,
        channel: &str,
        stamp: i64,
        taken: impl Fn(&str) -> bool,
    ) -> Self {
        let mut stamp = stamp;
        loop {
            let candidate = Self::new(package_name, version, channel, stamp);
            if !taken(candidate.as_str()) {
                return candidate;
            }
            stamp += 1;
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArtifactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Keep only characters that are safe in a single path segment and a URL.
fn sanitize(part: &str) -> String {
    let cleaned: String = part
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    // ".." must never survive as a segment of its own
    cleaned.replace("..", "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_combines_all_parts() {
        let name = ArtifactName::new("com.example.app", "1.0", "beta", 100);
        assert_eq!(name.as_str(), "com.example.app-1.0-beta-100.apk");
    }

    #[test]
    fn unsafe_characters_are_replaced() {
        let name = ArtifactName::new("com.example.app", "1.0 (rc/2)", "内测", 7);
        assert_eq!(name.as_str(), "com.example.app-1.0__rc_2_-__-7.apk");
        assert!(!name.as_str().contains('/'));
    }

    #[test]
    fn parent_segments_are_neutralised() {
        let name = ArtifactName::new("..", "..", "..", 1);
        assert!(!name.as_str().contains(".."));
    }

    #[test]
    fn unique_skips_taken_names() {
        let taken = ["com.a-1-beta-5.apk", "com.a-1-beta-6.apk"];
        let name = ArtifactName::unique("com.a", "1", "beta", 5, |n| taken.contains(&n));
        assert_eq!(name.as_str(), "com.a-1-beta-7.apk");
    }
}
