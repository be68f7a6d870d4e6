use std::fmt;

/// Remote capabilities exposed by the Brevilabs backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    License,
    Broca,
    Rerank,
    Url4llm,
    Pdf4llm,
    WebSearch,
    Youtube4llm,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::License,
        Endpoint::Broca,
        Endpoint::Rerank,
        Endpoint::Url4llm,
        Endpoint::Pdf4llm,
        Endpoint::WebSearch,
        Endpoint::Youtube4llm,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::License => "/license",
            Self::Broca => "/broca",
            Self::Rerank => "/rerank",
            Self::Url4llm => "/url4llm",
            Self::Pdf4llm => "/pdf4llm",
            Self::WebSearch => "/websearch",
            Self::Youtube4llm => "/youtube4llm",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// How a payload travels to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMethod {
    /// Payload fields become query parameters
    Get,
    /// Payload is the JSON body
    #[default]
    Post,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_unique_and_rooted() {
        let mut paths: Vec<_> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        assert!(paths.iter().all(|p| p.starts_with('/')));
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), Endpoint::ALL.len());
    }

    #[test]
    fn display_is_path() {
        assert_eq!(Endpoint::WebSearch.to_string(), "/websearch");
    }
}
