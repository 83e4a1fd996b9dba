use std::path::Path;

/// Deployment environment, read from `APP_ENV`
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Local,
    Development,
    Production,
    Testing,
    Custom(String),
}

impl Environment {
    /// Detect environment from APP_ENV or default to Local
    pub fn detect() -> Self {
        Self::parse(std::env::var("APP_ENV").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            Some("development") => Self::Development,
            Some("testing") => Self::Testing,
            Some("local") | Some("") | None => Self::Local,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    /// Suffix used for `.env.<suffix>` files
    pub fn env_file_suffix(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
            Self::Custom(name) => name.as_str(),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.env_file_suffix())
    }
}

/// Load environment variables from .env files with proper precedence
///
/// Precedence (later overrides earlier):
/// 1. .env
/// 2. .env.local
/// 3. .env.{environment}
/// 4. .env.{environment}.local
/// 5. Actual process environment
pub fn load_dotenv(project_root: &Path) -> Environment {
    let env = Environment::detect();
    let suffix = env.env_file_suffix();

    // dotenvy never overwrites a variable that is already set, so the most
    // specific file is loaded first.
    let files = [
        format!(".env.{}.local", suffix),
        format!(".env.{}", suffix),
        ".env.local".to_string(),
        ".env".to_string(),
    ];
    for file in files {
        match dotenvy::from_path(project_root.join(&file)) {
            Ok(()) => tracing::debug!(file = %file, "loaded env file"),
            Err(err) if err.not_found() => {}
            Err(err) => tracing::warn!(file = %file, error = %err, "failed to load env file"),
        }
    }

    env
}

/// Get an environment variable with a default value
///
/// Unset or unparseable values fall back to `default`.
///
/// ```
/// use userhub_kit::config::env;
///
/// let port: u16 = env("KIT_DOC_UNSET_PORT", 8080);
/// assert_eq!(port, 8080);
/// ```
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_optional(key).unwrap_or(default)
}

/// Get an optional environment variable
pub fn env_optional<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse(None), Environment::Local);
        assert_eq!(Environment::parse(Some("production")), Environment::Production);
        assert_eq!(
            Environment::parse(Some("qa")),
            Environment::Custom("qa".to_string())
        );
        assert_eq!(Environment::Testing.to_string(), "testing");
    }

    #[test]
    fn test_env_falls_back_on_unparseable() {
        std::env::set_var("KIT_TEST_ENV_BAD_PORT", "eighty");
        assert_eq!(env("KIT_TEST_ENV_BAD_PORT", 8080u16), 8080);

        std::env::set_var("KIT_TEST_ENV_GOOD_PORT", " 9090 ");
        assert_eq!(env("KIT_TEST_ENV_GOOD_PORT", 8080u16), 9090);
        assert_eq!(env_optional::<bool>("KIT_TEST_ENV_UNSET"), None);
    }
}
