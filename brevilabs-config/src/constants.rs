/// Backend defaults and wire constants
pub mod api {
    pub const BREVILABS_API_BASE_URL: &str = "https://api.brevilabs.com/v1";
    pub const CLIENT_VERSION_HEADER: &str = "X-Client-Version";
    pub const UNKNOWN_CLIENT_VERSION: &str = "Unknown";
    pub const RERANK_MODEL: &str = "rerank-2";
}

/// License gating
pub mod license {
    pub const LICENSE_KEY_MISSING_NOTICE: &str =
        "Copilot Plus license key not found. Please enter your license key in the settings.";
    pub const INVALID_LICENSE_REASON: &str = "Invalid license key";
    pub const LICENSE_KEY_ENV: &str = "BREVILABS_LICENSE_KEY";
}

/// Config file discovery
pub mod files {
    pub const CONFIG_FILE_NAME: &str = "brevilabs.toml";
    pub const CONFIG_DIR_NAME: &str = "brevilabs";
    pub const CONFIG_PATH_ENV: &str = "BREVILABS_CONFIG";
}
