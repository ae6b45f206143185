// ============================================================================
// Service Configuration
// ============================================================================
//
// Settings are read from environment variables once at startup. The storage
// backend is fixed for the life of the process; there is no runtime
// switching.
//
//   STORE_BACKEND  "memory" | "postgres"          (default: memory)
//   DATABASE_URL   Postgres connection string      (required for postgres)
//   HTTP_HOST      bind address                    (default: 0.0.0.0)
//   HTTP_PORT      bind port                       (default: 8080)
//
// ============================================================================

/// Which storage-port implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Process-local store for demos and tests.
    #[default]
    Memory,
    /// Postgres-backed store.
    Postgres,
}

impl StoreBackend {
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "postgres" => Self::Postgres,
            _ => Self::Memory,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub http_host: String,
    pub http_port: u16,
}

impl Settings {
    pub fn from_env() -> Self {
        let backend = std::env::var("STORE_BACKEND")
            .map(|s| StoreBackend::from_str_case_insensitive(&s))
            .unwrap_or_default();

        let database_url = std::env::var("DATABASE_URL").ok();

        let http_host = std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            backend,
            database_url,
            http_host,
            http_port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!(
            StoreBackend::from_str_case_insensitive("POSTGRES"),
            StoreBackend::Postgres
        );
        assert_eq!(
            StoreBackend::from_str_case_insensitive("Memory"),
            StoreBackend::Memory
        );
    }

    #[test]
    fn unknown_backend_falls_back_to_memory() {
        assert_eq!(
            StoreBackend::from_str_case_insensitive("mongodb"),
            StoreBackend::Memory
        );
    }

    #[test]
    fn backend_names_round_trip() {
        for backend in [StoreBackend::Memory, StoreBackend::Postgres] {
            assert_eq!(
                StoreBackend::from_str_case_insensitive(backend.as_str()),
                backend
            );
        }
    }
}
