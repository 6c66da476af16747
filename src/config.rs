//! Build-time Configuration
//!
//! Values are baked in by trunk from the environment:
//! `COMANDA_API_BASE`, `COMANDA_API_MODE` (`live` | `mock`),
//! `COMANDA_API_TOKEN`, `COMANDA_ROLE` (`ADMIN` | `OPERARIO`) and
//! `COMANDA_LOG_LEVEL`.

use comanda_core::ApiConfig;
use log::LevelFilter;

pub fn api_config() -> ApiConfig {
    ApiConfig::from_values(
        option_env!("COMANDA_API_BASE"),
        option_env!("COMANDA_API_MODE"),
        option_env!("COMANDA_API_TOKEN"),
    )
    .with_role(option_env!("COMANDA_ROLE"))
}

pub fn log_level() -> LevelFilter {
    parse_level(option_env!("COMANDA_LOG_LEVEL"))
}

fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|l| l.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_level(None), LevelFilter::Info);
        assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_level(Some(" WARN ")), LevelFilter::Warn);
        assert_eq!(parse_level(Some("chatty")), LevelFilter::Info);
    }
}
