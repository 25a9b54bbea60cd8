use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// ASCII digits only; `\d` would also accept other Unicode digit classes.
static VALID_RELEASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$").expect("release pattern is valid")
});

const SENTINEL_SUFFIX: &str = ".999.999";

/// A validated agent release version (`major.minor.patch`, each 0-999)
///
/// The candidate string is kept verbatim so that `01.2.3` stays `01.2.3`
/// in the version file, the tag lookup and the branch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    raw: String,
    major: u16,
    minor: u16,
    patch: u16,
}

impl ReleaseVersion {
    /// Validate a candidate version string
    ///
    /// # Returns
    /// * `Ok(ReleaseVersion)` - The candidate matches `<major>.<minor>.<patch>`
    /// * `Err(InvalidVersionFormat)` - Wrong shape, non-digits, or more than 3 digits per level
    /// * `Err(ReservedVersion)` - The candidate is the `*.999.999` sentinel
    pub fn validate(candidate: &str) -> Result<Self> {
        if !VALID_RELEASE_RE.is_match(candidate) {
            return Err(ReleaseError::InvalidVersionFormat(candidate.to_string()));
        }
        if candidate.ends_with(SENTINEL_SUFFIX) {
            return Err(ReleaseError::ReservedVersion(candidate.to_string()));
        }

        let levels = candidate
            .split('.')
            .map(str::parse::<u16>)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| ReleaseError::InvalidVersionFormat(candidate.to_string()))?;

        match levels.as_slice() {
            &[major, minor, patch] => Ok(ReleaseVersion {
                raw: candidate.to_string(),
                major,
                minor,
                patch,
            }),
            _ => Err(ReleaseError::InvalidVersionFormat(candidate.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn major(&self) -> u16 {
        self.major
    }

    pub fn minor(&self) -> u16 {
        self.minor
    }

    pub fn patch(&self) -> u16 {
        self.patch
    }

    /// Upstream tag name for this version (e.g., "v2.150.0")
    pub fn tag_name(&self) -> String {
        format!("v{}", self.raw)
    }

    /// Numeric view used for ordering against other releases
    pub fn as_semver(&self) -> semver::Version {
        semver::Version::new(self.major.into(), self.minor.into(), self.patch.into())
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for ReleaseVersion {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        ReleaseVersion::validate(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_simple() {
        let v = ReleaseVersion::validate("1.2.3").unwrap();
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), 2);
        assert_eq!(v.patch(), 3);
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn test_validate_bounds() {
        assert!(ReleaseVersion::validate("0.0.0").is_ok());
        assert!(ReleaseVersion::validate("999.998.999").is_ok());
        assert!(ReleaseVersion::validate("999.999.998").is_ok());
        assert!(ReleaseVersion::validate("1.999.0").is_ok());
    }

    #[test]
    fn test_validate_every_level_in_range() {
        for level in [0u16, 7, 42, 100, 500, 998, 999] {
            let candidate = format!("{}.{}.{}", level, level, 0);
            assert!(
                ReleaseVersion::validate(&candidate).is_ok(),
                "{} should validate",
                candidate
            );
        }
    }

    #[test]
    fn test_validate_sentinel_rejected_for_any_major() {
        for candidate in ["1.999.999", "0.999.999", "999.999.999", "42.999.999"] {
            let err = ReleaseVersion::validate(candidate).unwrap_err();
            assert!(
                matches!(err, ReleaseError::ReservedVersion(ref v) if v == candidate),
                "{} should be reserved, got {:?}",
                candidate,
                err
            );
        }
    }

    #[test]
    fn test_validate_malformed() {
        for candidate in [
            "", "1.2", "v1.2.3", "1.2.3.4", "1000.0.0", "1.2.3-rc1", " 1.2.3", "1.2.3\n", "a.b.c",
            "1..3", "1.2.", "١.٢.٣",
        ] {
            let err = ReleaseVersion::validate(candidate).unwrap_err();
            assert!(
                matches!(err, ReleaseError::InvalidVersionFormat(_)),
                "{:?} should be malformed, got {:?}",
                candidate,
                err
            );
        }
    }

    #[test]
    fn test_leading_zeros_kept_verbatim() {
        let v = ReleaseVersion::validate("01.2.003").unwrap();
        assert_eq!(v.as_str(), "01.2.003");
        assert_eq!(v.tag_name(), "v01.2.003");
        assert_eq!(v.as_semver(), semver::Version::new(1, 2, 3));
    }

    #[test]
    fn test_tag_name() {
        let v = ReleaseVersion::validate("2.150.0").unwrap();
        assert_eq!(v.tag_name(), "v2.150.0");
    }

    #[test]
    fn test_from_str() {
        let v: ReleaseVersion = "3.4.5".parse().unwrap();
        assert_eq!(v.as_semver(), semver::Version::new(3, 4, 5));
        assert!("3.4".parse::<ReleaseVersion>().is_err());
    }
}
