use super::models::DirectoryLedger;

impl DirectoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `path` as attempted on `server`; false when it already was.
    ///
    /// Callers claim before awaiting the create call so a concurrent
    /// claimant never issues a second request for the same path.
    pub fn claim(&self, server: &str, path: &str) -> bool {
        self.attempted.insert((server.to_string(), path.to_string()))
    }

    pub fn len(&self) -> usize {
        self.attempted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempted.is_empty()
    }
}
