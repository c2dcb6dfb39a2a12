use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for a scoring run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub lexicons: LexiconPaths,
    pub output: OutputConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("DOLPHIN_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let lexicons = LexiconPaths {
            self_words: path_var("DOLPHIN_SELF_WEIGHTS", "test_input/settings/selfWeight.txt")?,
            concept_words: path_var(
                "DOLPHIN_CONCEPT_WEIGHTS",
                "test_input/settings/conceptWeight.txt",
            )?,
            adjusted_words: path_var(
                "DOLPHIN_ADJUST_WEIGHTS",
                "test_input/settings/adjustedWeight.txt",
            )?,
        };

        let output = OutputConfig {
            report_dir: path_var("DOLPHIN_OUTPUT_DIR", "test_output")?,
            results_path: path_var("DOLPHIN_RESULTS_PATH", "test_output/results.json")?,
        };

        let log_level = env::var("DOLPHIN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            lexicons,
            output,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn path_var(variable: &'static str, default: &str) -> Result<PathBuf, ConfigError> {
    match env::var(variable) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyPath { variable }),
        Ok(value) => Ok(PathBuf::from(value)),
        Err(_) => Ok(PathBuf::from(default)),
    }
}

/// Locations of the three weighted word tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconPaths {
    pub self_words: PathBuf,
    pub concept_words: PathBuf,
    pub adjusted_words: PathBuf,
}

/// Where rendered reports and stored result records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub report_dir: PathBuf,
    pub results_path: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyPath { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPath { variable } => {
                write!(f, "{variable} must not be empty when set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for variable in [
            "DOLPHIN_ENV",
            "DOLPHIN_SELF_WEIGHTS",
            "DOLPHIN_CONCEPT_WEIGHTS",
            "DOLPHIN_ADJUST_WEIGHTS",
            "DOLPHIN_OUTPUT_DIR",
            "DOLPHIN_RESULTS_PATH",
            "DOLPHIN_LOG_LEVEL",
        ] {
            env::remove_var(variable);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(
            config.lexicons.self_words,
            PathBuf::from("test_input/settings/selfWeight.txt")
        );
        assert_eq!(
            config.lexicons.adjusted_words,
            PathBuf::from("test_input/settings/adjustedWeight.txt")
        );
        assert_eq!(config.output.report_dir, PathBuf::from("test_output"));
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn env_overrides_paths_and_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DOLPHIN_ENV", "prod");
        env::set_var("DOLPHIN_CONCEPT_WEIGHTS", "/srv/lexicons/concept.txt");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(
            config.lexicons.concept_words,
            PathBuf::from("/srv/lexicons/concept.txt")
        );
        reset_env();
    }

    #[test]
    fn empty_path_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DOLPHIN_RESULTS_PATH", "  ");
        let error = AppConfig::load().expect_err("empty path rejected");
        assert!(matches!(
            error,
            ConfigError::EmptyPath {
                variable: "DOLPHIN_RESULTS_PATH"
            }
        ));
        reset_env();
    }
}
