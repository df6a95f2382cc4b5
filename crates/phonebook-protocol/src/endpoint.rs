/// HTTP endpoint paths.
pub mod endpoints {
    pub const ENTRIES: &str = "/api/entries";
    /// Route pattern for a single entry.
    pub const ENTRY: &str = "/api/entries/:id";
    pub const INFO: &str = "/info";
    pub const HEALTH: &str = "/health";
}

/// Concrete path of a single entry.
pub fn entry_path(id: &str) -> String {
    format!("{}/{id}", endpoints::ENTRIES)
}

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_defaults() {
        let h = HealthResponse::default();
        assert_eq!(h.status, "ok");
        assert!(!h.version.is_empty());
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(endpoints::ENTRIES, "/api/entries");
        assert_eq!(endpoints::INFO, "/info");
        assert_eq!(entry_path("abc"), "/api/entries/abc");
    }
}
