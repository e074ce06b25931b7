use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CompatError, Result};

/// A three-component API module version.
///
/// Ordering is lexicographic on `(major, minor, patch)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `major.minor.patch`. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| CompatError::InvalidVersion {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty version"));
        }

        let mut parts = [0u32; 3];
        let mut count = 0usize;
        for component in trimmed.split('.') {
            if count == 3 {
                return Err(invalid("expected exactly three components"));
            }
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("components must be non-negative integers"));
            }
            parts[count] = component
                .parse()
                .map_err(|_| invalid("component out of range"))?;
            count += 1;
        }
        if count != 3 {
            return Err(invalid("expected exactly three components"));
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl FromStr for Version {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl From<(u32, u32, u32)> for Version {
    fn from((major, minor, patch): (u32, u32, u32)) -> Self {
        Self::new(major, minor, patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let v: Version = "3.12.0".parse().unwrap();
        assert_eq!(v, Version::new(3, 12, 0));
        assert_eq!(v.to_string(), "3.12.0");
        assert_eq!(Version::parse(" 1.0.1 ").unwrap(), Version::new(1, 0, 1));
    }

    #[test]
    fn ordering_is_numeric_not_lexical() {
        assert!(Version::new(1, 10, 0) > Version::new(1, 9, 9));
        assert!(Version::new(2, 0, 0) > Version::new(1, 99, 99));
        assert!(Version::new(1, 0, 2) < Version::new(1, 0, 10));
    }

    #[test]
    fn rejects_malformed_versions() {
        for bad in ["", "1", "1.2", "1.2.3.4", "1.x.3", "-1.0.0", "1..3", "1.2.99999999999"] {
            assert!(
                matches!(Version::parse(bad), Err(CompatError::InvalidVersion { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
