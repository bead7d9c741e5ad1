/// Readiness of the remote index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    #[default]
    Unknown,
    NoDocuments,
    Ready,
}

/// Last known backend status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackendStatus {
    pub readiness: Readiness,
    pub index_exists: bool,
}

impl BackendStatus {
    pub fn ready() -> Self {
        Self {
            readiness: Readiness::Ready,
            index_exists: true,
        }
    }

    /// State right after the index has been wiped.
    pub fn no_documents() -> Self {
        Self {
            readiness: Readiness::NoDocuments,
            index_exists: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }
}
