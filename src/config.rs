use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub upload: UploadSettings,
    pub classifier: ClassifierSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub dir: PathBuf,
    /// Extension used when the uploaded filename has none (leading dot included)
    pub default_extension: String,
    pub max_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

pub const DEFAULT_CLASSIFIER_URL: &str = "https://ecoscan1.onrender.com/classify_image";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_EXTENSION: &str = ".jpg";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ECOSCAN__)
    /// 5. `ML_SERVICE_URL` / `UPLOAD_DIR`
    pub fn load() -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ECOSCAN__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("ECOSCAN")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("upload.dir", DEFAULT_UPLOAD_DIR)?
        .set_default("upload.default_extension", DEFAULT_EXTENSION)?
        .set_default("upload.max_bytes", DEFAULT_MAX_UPLOAD_BYTES as i64)?
        .set_default("classifier.url", DEFAULT_CLASSIFIER_URL)?
        .set_default("classifier.timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
        .set_default("logging.level", default_log_level())?
        .set_default("logging.format", default_log_format())
}

/// Short, unprefixed variables used by the deployment scripts
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("ML_SERVICE_URL") {
        builder = builder.set_override("classifier.url", url)?;
    }
    if let Ok(dir) = env::var("UPLOAD_DIR") {
        builder = builder.set_override("upload.dir", dir)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9100

[classifier]
url = "http://classifier.test/classify_image"
timeout_secs = 5
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.classifier.url, "http://classifier.test/classify_image");
        assert_eq!(settings.classifier.timeout_secs, 5);
        assert_eq!(settings.upload.dir, PathBuf::from(DEFAULT_UPLOAD_DIR));
        assert_eq!(settings.upload.default_extension, ".jpg");
        assert_eq!(settings.upload.max_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(settings.logging.level, "info");
    }
}
