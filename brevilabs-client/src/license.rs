use std::fmt;

/// Outcome of a license validation round-trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseStatus {
    /// The backend accepted the key; plus mode was turned on
    Valid,
    /// The backend rejected the key; plus mode was turned off
    Invalid,
    /// Validity could not be determined; plus mode is untouched
    Indeterminate,
}

impl LicenseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Indeterminate => "indeterminate",
        }
    }

    /// `Some(true)` / `Some(false)` when known, `None` otherwise.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Valid => Some(true),
            Self::Invalid => Some(false),
            Self::Indeterminate => None,
        }
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
