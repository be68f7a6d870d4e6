/// Read access to the host's stored plugin settings.
pub trait SettingsSource: Send + Sync {
    /// The stored (possibly encrypted) license key, if any.
    fn license_key(&self) -> Option<String>;

    /// Whether plus mode is currently active.
    fn is_plus_user(&self) -> bool;

    /// True when a non-empty license key is stored. Whitespace counts as
    /// content; the backend decides whether such a key is valid.
    fn has_license_key(&self) -> bool {
        self.license_key().is_some_and(|key| !key.is_empty())
    }
}

/// Process-wide switch for plus mode.
pub trait PlusToggle: Send + Sync {
    fn turn_on_plus(&self);

    fn turn_off_plus(&self);
}
