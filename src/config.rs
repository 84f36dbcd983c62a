use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_acquire_timeout_secs: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub bcrypt_cost: u32,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. `DATABASE_URL`
    /// and `JWT_SECRET` are required; everything else falls back to a default
    /// when absent or unparseable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or(env::VarError::NotPresent);

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            database_acquire_timeout_secs: lookup("DATABASE_ACQUIRE_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiry_hours: lookup("JWT_EXPIRY_HOURS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            bcrypt_cost: lookup("BCRYPT_COST")
                .and_then(|v| v.parse().ok())
                .filter(|cost| (4..=31).contains(cost))
                .unwrap_or(bcrypt::DEFAULT_COST),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(3000),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000,http://localhost:5173".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/board"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.jwt_expiry_hours, 24);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.database_max_connections, 20);
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    fn missing_jwt_secret_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/board",
        )]));
        assert_eq!(result.unwrap_err(), env::VarError::NotPresent);
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/board"),
            ("JWT_SECRET", "secret"),
            ("PORT", "not-a-port"),
            ("BCRYPT_COST", "6"),
            ("ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.bcrypt_cost, 6);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn out_of_range_bcrypt_cost_falls_back_to_default() {
        for cost in ["3", "32", "0"] {
            let config = Config::from_lookup(lookup_from(&[
                ("DATABASE_URL", "postgres://localhost/board"),
                ("JWT_SECRET", "secret"),
                ("BCRYPT_COST", cost),
            ]))
            .unwrap();
            assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        }

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/board"),
            ("JWT_SECRET", "secret"),
            ("BCRYPT_COST", "31"),
        ]))
        .unwrap();
        assert_eq!(config.bcrypt_cost, 31);
    }
}
