//! In-memory adapters for the collaborator traits.

use parking_lot::{Mutex, RwLock};

use crate::notice::NoticeSink;
use crate::settings::{PlusToggle, SettingsSource};

/// Settings held entirely in memory.
#[derive(Debug, Default)]
pub struct MemorySettings {
    license_key: RwLock<Option<String>>,
    plus_user: RwLock<bool>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_license_key(key: impl Into<String>) -> Self {
        let settings = Self::new();
        settings.set_license_key(Some(key.into()));
        settings
    }

    pub fn set_license_key(&self, key: Option<String>) {
        *self.license_key.write() = key;
    }

    pub fn set_plus_user(&self, enabled: bool) {
        *self.plus_user.write() = enabled;
    }
}

impl SettingsSource for MemorySettings {
    fn license_key(&self) -> Option<String> {
        self.license_key.read().clone()
    }

    fn is_plus_user(&self) -> bool {
        *self.plus_user.read()
    }
}

impl PlusToggle for MemorySettings {
    fn turn_on_plus(&self) {
        self.set_plus_user(true);
    }

    fn turn_off_plus(&self) {
        self.set_plus_user(false);
    }
}

/// Notice sink that records every message for later inspection.
#[derive(Debug, Default)]
pub struct MemoryNoticeSink {
    notices: Mutex<Vec<String>>,
}

impl MemoryNoticeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.notices.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.lock().is_empty()
    }
}

impl NoticeSink for MemoryNoticeSink {
    fn notice(&self, message: &str) {
        self.notices.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_settings_track_plus_toggle() {
        let settings = MemorySettings::with_license_key("enc_abc");
        assert!(settings.has_license_key());
        assert!(!settings.is_plus_user());

        settings.turn_on_plus();
        assert!(settings.is_plus_user());

        settings.turn_off_plus();
        assert!(!settings.is_plus_user());
    }

    #[test]
    fn empty_license_key_counts_as_missing() {
        let settings = MemorySettings::with_license_key("");
        assert!(!settings.has_license_key());

        settings.set_license_key(Some("   ".to_string()));
        assert!(settings.has_license_key());

        settings.set_license_key(None);
        assert!(!settings.has_license_key());
    }

    #[test]
    fn memory_notice_sink_records_messages() {
        let sink = MemoryNoticeSink::new();
        assert!(sink.is_empty());
        sink.notice("first");
        sink.notice("second");
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.notices(), vec!["first", "second"]);
    }
}
