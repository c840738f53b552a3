//! Resolver configuration, loaded from TOML.
//!
//! ```toml
//! supertype_search = "direct"
//! max_depth = 32
//!
//! [logging]
//! level = "reify.resolve=trace"
//! ```

use std::io;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How far the resolver looks for a type variable's binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SupertypeSearch {
    /// Only the holder's declared supertypes are inspected, and only when they name the
    /// variable's declaring class directly (`class Holder extends Base<Integer>`).
    Direct,
    /// Walk up through every declared supertype, composing type argument substitutions
    /// level by level. Supertypes declared without type arguments stop the walk.
    #[default]
    Transitive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct ResolverConfig {
    pub supertype_search: SupertypeSearch,
    /// Maximum number of nested type variable resolutions (and supertype levels walked)
    /// before giving up.
    pub max_depth: usize,
    pub logging: LoggingConfig,
}

impl ResolverConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 64;
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            supertype_search: SupertypeSearch::default(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn normalize_level_directives(level: &str) -> String {
        let trimmed = level.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => "info".to_owned(),
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            // Anything else is treated as an `EnvFilter` directive string.
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// The effective `EnvFilter`: the configured directives, with `RUST_LOG` merged in
    /// when it is set.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let config_directives = Self::normalize_level_directives(&self.level);

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }

    /// Install a global stderr subscriber for this config.
    ///
    /// Returns `false` if a global subscriber was already installed; the existing one is
    /// left in place.
    pub fn init_tracing(&self) -> bool {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(io::stderr);
        if self.json {
            builder.json().try_init().is_ok()
        } else {
            builder.try_init().is_ok()
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Toml(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Strip user-provided values out of a `toml`/`serde` error message.
///
/// `toml::de::Error::message()` can still quote scalar values (`invalid type: string
/// "abc", expected usize`) and unknown keys (`unknown field `abc``).
fn sanitize_toml_error_message(message: &str) -> String {
    static QUOTED_STRING_RE: OnceLock<Regex> = OnceLock::new();
    static BACKTICKED_USER_VALUE_RE: OnceLock<Regex> = OnceLock::new();

    // Escaped quotes (`\"`) stay inside the match.
    let quoted = QUOTED_STRING_RE.get_or_init(|| {
        Regex::new(r#""(?:\\.|[^"\\])*""#).expect("quoted-string regex should compile")
    });
    let out = quoted.replace_all(message, r#""<redacted>""#);

    // `missing field `foo`` names a schema key and is kept.
    let backticked = BACKTICKED_USER_VALUE_RE.get_or_init(|| {
        Regex::new(r"(unknown field|unknown variant|invalid type: [a-z ]+|invalid value: [a-z ]+) `[^`]*`")
            .expect("backticked-value regex should compile")
    });
    backticked
        .replace_all(&out, "$1 `<redacted>`")
        .into_owned()
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` includes a snippet of the input; keep just the message.
        ConfigError::Toml(sanitize_toml_error_message(err.message()))
    }
}

impl ResolverConfig {
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config: ResolverConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "`max_depth` must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// JSON schema of the TOML config file.
pub fn json_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(ResolverConfig)
}
