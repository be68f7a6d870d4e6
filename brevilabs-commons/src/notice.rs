/// Surfaces a short message to the user (a toast in the plugin host, stderr
/// in the CLI).
pub trait NoticeSink: Send + Sync {
    fn notice(&self, message: &str);
}

/// Notice sink that drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNoticeSink;

impl NoticeSink for NoopNoticeSink {
    fn notice(&self, _message: &str) {}
}

/// Notice sink that forwards messages to the `tracing` pipeline at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNoticeSink;

impl NoticeSink for TracingNoticeSink {
    fn notice(&self, message: &str) {
        tracing::warn!(target: "brevilabs::notice", "{message}");
    }
}
