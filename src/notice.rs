use brevilabs_commons::NoticeSink;

/// Prints notices to stderr so they never mix with JSON on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNoticeSink;

impl NoticeSink for StderrNoticeSink {
    fn notice(&self, message: &str) {
        eprintln!("Notice: {message}");
    }
}
