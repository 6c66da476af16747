//! Panel Configuration
//!
//! Endpoint, polling cadence and urgency thresholds.

use std::time::Duration;

/// Where ticket data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiMode {
    /// Real HTTP backend
    #[default]
    Live,
    /// In-memory sample tickets
    Mock,
}

impl ApiMode {
    /// Unknown values fall back to `Live`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => ApiMode::Mock,
            _ => ApiMode::Live,
        }
    }
}

/// Age thresholds, in whole minutes since the order was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrgencyThresholds {
    /// First minute rendered as `warn`
    pub warn_after: i64,
    /// First minute rendered as `danger`
    pub danger_after: i64,
}

impl UrgencyThresholds {
    pub const DEFAULT: UrgencyThresholds = UrgencyThresholds {
        warn_after: 10,
        danger_after: 20,
    };
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Who operates this panel. Only `Admin` may trigger a manual sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    /// `OPERARIO` on the wire; the fallback when no role is configured
    #[default]
    Operator,
}

impl Role {
    /// Unknown values fall back to `Operator`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Role::Admin,
            _ => Role::Operator,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Operator => "OPERARIO",
        }
    }

    pub fn can_run_sync(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:8000`
    pub base_url: String,
    pub mode: ApiMode,
    /// Bearer token forwarded as-is; issued by the auth backend
    pub token: Option<String>,
    /// Ticket list refresh
    pub list_interval: Duration,
    /// Selected ticket refresh
    pub detail_interval: Duration,
    pub urgency: UrgencyThresholds,
    pub role: Role,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            mode: ApiMode::Live,
            token: None,
            list_interval: Duration::from_secs(5),
            detail_interval: Duration::from_secs(2),
            urgency: UrgencyThresholds::DEFAULT,
            role: Role::Operator,
        }
    }
}

impl ApiConfig {
    /// Build from optional raw values (build-time env on the web side).
    ///
    /// Blank values are treated as unset.
    pub fn from_values(base_url: Option<&str>, mode: Option<&str>, token: Option<&str>) -> Self {
        fn non_blank(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }
        let defaults = Self::default();
        Self {
            base_url: non_blank(base_url)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            mode: non_blank(mode).map(ApiMode::parse).unwrap_or_default(),
            token: non_blank(token).map(str::to_string),
            ..defaults
        }
    }

    /// Blank or missing keeps the current role
    pub fn with_role(mut self, role: Option<&str>) -> Self {
        if let Some(raw) = role.map(str::trim).filter(|v| !v.is_empty()) {
            self.role = Role::parse(raw);
        }
        self
    }
}
