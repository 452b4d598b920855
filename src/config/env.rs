use std::time::Duration;
use crate::config::redact::redact_token;
use crate::errors::ProbeError;
use tracing::debug;

/// Environment variable holding the API base URL, e.g. `https://my.cloud.example`.
pub const ENV_BASE_URL: &str = "BASE_URL";
/// Environment variable holding the organization identifier.
pub const ENV_ORGANIZATION_ID: &str = "ORGANIZATION_ID";
/// Environment variable holding the bearer token.
pub const ENV_AUTH_TOKEN: &str = "AUTH_TOKEN";
/// Optional request timeout override in seconds.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved probe configuration. All fields are fixed for the process
/// lifetime; the endpoint URL is derived, never stored.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub base_url: String,
    pub organization_id: String,
    pub auth_token: String,
    pub timeout: Duration,
}

/// CLI-provided values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub organization_id: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ProbeConfig {
    /// Resolve configuration from CLI overrides and the process environment.
    /// Every missing required value is reported in a single error so a bare
    /// environment produces one actionable message, not three round trips.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, ProbeError> {
        Self::resolve_from(overrides, |name| std::env::var(name).ok())
    }

    /// Same as [`resolve`](Self::resolve) with an explicit environment lookup.
    pub fn resolve_from<F>(overrides: &ConfigOverrides, env: F) -> Result<Self, ProbeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();

        let base_url = pick(&overrides.base_url, ENV_BASE_URL, &env)
            .unwrap_or_else(|| {
                missing.push(ENV_BASE_URL);
                String::new()
            });
        let organization_id = pick(&overrides.organization_id, ENV_ORGANIZATION_ID, &env)
            .unwrap_or_else(|| {
                missing.push(ENV_ORGANIZATION_ID);
                String::new()
            });
        let auth_token = pick(&overrides.token, ENV_AUTH_TOKEN, &env)
            .unwrap_or_else(|| {
                missing.push(ENV_AUTH_TOKEN);
                String::new()
            });

        if !missing.is_empty() {
            return Err(ProbeError::Config(format!(
                "missing required configuration: {}",
                missing.join(", ")
            )));
        }

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => match env(ENV_REQUEST_TIMEOUT_SECS) {
                Some(raw) if !raw.trim().is_empty() => parse_timeout_secs(raw.trim())?,
                _ => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs == 0 {
            return Err(ProbeError::Config(
                "request timeout must be greater than zero seconds".into(),
            ));
        }

        debug!(
            base_url = %base_url,
            organization_id = %organization_id,
            token = %redact_token(&auth_token),
            timeout_secs,
            "Resolved probe configuration"
        );

        Ok(Self {
            base_url,
            organization_id,
            auth_token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// The single endpoint this probe targets.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/restapi/v2/organizations/{}/optimizations?overview=true",
            self.base_url.trim_end_matches('/'),
            self.organization_id,
        )
    }
}

/// CLI value wins over the environment; blank values count as absent.
fn pick<F>(flag: &Option<String>, env_name: &str, env: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    flag.clone()
        .or_else(|| env(env_name))
        .filter(|value| !value.trim().is_empty())
}

fn parse_timeout_secs(raw: &str) -> Result<u64, ProbeError> {
    raw.parse().map_err(|_| {
        ProbeError::Config(format!(
            "{} must be a positive integer number of seconds, got '{}'",
            ENV_REQUEST_TIMEOUT_SECS, raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_resolve_all_from_env() {
        let env = env_of(&[
            (ENV_BASE_URL, "https://api.example.com"),
            (ENV_ORGANIZATION_ID, "org-123"),
            (ENV_AUTH_TOKEN, "secret-token"),
        ]);
        let config = ProbeConfig::resolve_from(&ConfigOverrides::default(), env).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.organization_id, "org-123");
        assert_eq!(config.auth_token, "secret-token");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_resolve_missing_everything_names_all_vars() {
        let err = ProbeConfig::resolve_from(&ConfigOverrides::default(), |_| None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(ENV_BASE_URL), "missing BASE_URL in: {}", msg);
        assert!(msg.contains(ENV_ORGANIZATION_ID), "missing ORGANIZATION_ID in: {}", msg);
        assert!(msg.contains(ENV_AUTH_TOKEN), "missing AUTH_TOKEN in: {}", msg);
    }

    #[test]
    fn test_resolve_missing_single_var() {
        let env = env_of(&[
            (ENV_BASE_URL, "https://api.example.com"),
            (ENV_AUTH_TOKEN, "secret-token"),
        ]);
        let err = ProbeConfig::resolve_from(&ConfigOverrides::default(), env).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(ENV_ORGANIZATION_ID));
        assert!(!msg.contains(ENV_BASE_URL));
    }

    #[test]
    fn test_blank_env_value_counts_as_missing() {
        let env = env_of(&[
            (ENV_BASE_URL, "   "),
            (ENV_ORGANIZATION_ID, "org-123"),
            (ENV_AUTH_TOKEN, "secret-token"),
        ]);
        let err = ProbeConfig::resolve_from(&ConfigOverrides::default(), env).unwrap_err();
        assert!(err.to_string().contains(ENV_BASE_URL));
    }

    #[test]
    fn test_cli_override_wins_over_env() {
        let env = env_of(&[
            (ENV_BASE_URL, "https://from-env.example.com"),
            (ENV_ORGANIZATION_ID, "org-env"),
            (ENV_AUTH_TOKEN, "env-token"),
        ]);
        let overrides = ConfigOverrides {
            base_url: Some("https://from-cli.example.com".into()),
            ..Default::default()
        };
        let config = ProbeConfig::resolve_from(&overrides, env).unwrap();
        assert_eq!(config.base_url, "https://from-cli.example.com");
        assert_eq!(config.organization_id, "org-env");
    }

    #[test]
    fn test_timeout_from_env() {
        let env = env_of(&[
            (ENV_BASE_URL, "https://api.example.com"),
            (ENV_ORGANIZATION_ID, "org-123"),
            (ENV_AUTH_TOKEN, "secret-token"),
            (ENV_REQUEST_TIMEOUT_SECS, "5"),
        ]);
        let config = ProbeConfig::resolve_from(&ConfigOverrides::default(), env).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_zero_rejected() {
        let env = env_of(&[
            (ENV_BASE_URL, "https://api.example.com"),
            (ENV_ORGANIZATION_ID, "org-123"),
            (ENV_AUTH_TOKEN, "secret-token"),
        ]);
        let overrides = ConfigOverrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let err = ProbeConfig::resolve_from(&overrides, env).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_timeout_garbage_rejected() {
        let env = env_of(&[
            (ENV_BASE_URL, "https://api.example.com"),
            (ENV_ORGANIZATION_ID, "org-123"),
            (ENV_AUTH_TOKEN, "secret-token"),
            (ENV_REQUEST_TIMEOUT_SECS, "soon"),
        ]);
        let err = ProbeConfig::resolve_from(&ConfigOverrides::default(), env).unwrap_err();
        assert!(err.to_string().contains(ENV_REQUEST_TIMEOUT_SECS));
    }

    #[test]
    fn test_endpoint_url_composition() {
        let config = ProbeConfig {
            base_url: "https://api.example.com".into(),
            organization_id: "org-123".into(),
            auth_token: "secret".into(),
            timeout: Duration::from_secs(30),
        };
        assert_eq!(
            config.endpoint_url(),
            "https://api.example.com/restapi/v2/organizations/org-123/optimizations?overview=true"
        );
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let config = ProbeConfig {
            base_url: "https://api.example.com/".into(),
            organization_id: "org-123".into(),
            auth_token: "secret".into(),
            timeout: Duration::from_secs(30),
        };
        assert!(!config.endpoint_url().contains("com//restapi"));
    }
}
