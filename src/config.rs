use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "onam-arcade.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory with the same layout as the built-in `content/`.
    pub content_dir: Option<PathBuf>,
    /// Logging is disabled unless this is set.
    pub log_file: Option<PathBuf>,
    pub timing: Timing,
    pub hunt: HuntRules,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Timing {
    pub greeting_delay_ms: u64,
    pub menu_delay_ms: u64,
    pub demo_interval_ms: u64,
    pub success_delay_ms: u64,
    pub assist_delay_ms: u64,
    pub tick_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            greeting_delay_ms: 500,
            menu_delay_ms: 2000,
            demo_interval_ms: 4000,
            success_delay_ms: 1500,
            assist_delay_ms: 3000,
            tick_ms: 1000,
        }
    }
}

impl Timing {
    pub fn greeting_delay(&self) -> Duration {
        Duration::from_millis(self.greeting_delay_ms)
    }

    pub fn menu_delay(&self) -> Duration {
        Duration::from_millis(self.menu_delay_ms)
    }

    pub fn demo_interval(&self) -> Duration {
        Duration::from_millis(self.demo_interval_ms)
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }

    pub fn assist_delay(&self) -> Duration {
        Duration::from_millis(self.assist_delay_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HuntRules {
    pub duration_seconds: u32,
}

impl Default for HuntRules {
    fn default() -> Self {
        HuntRules {
            duration_seconds: 60,
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Like `load`, but a missing file means "use the defaults".
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    fn validate(&self) -> Result<()> {
        let t = &self.timing;
        for (name, value) in [
            ("greeting_delay_ms", t.greeting_delay_ms),
            ("menu_delay_ms", t.menu_delay_ms),
            ("demo_interval_ms", t.demo_interval_ms),
            ("success_delay_ms", t.success_delay_ms),
            ("assist_delay_ms", t.assist_delay_ms),
            ("tick_ms", t.tick_ms),
        ] {
            ensure!(value > 0, "timing.{} must be greater than zero", name);
        }
        ensure!(
            self.hunt.duration_seconds > 0,
            "hunt.duration_seconds must be greater than zero"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.timing, Timing::default());
        assert_eq!(config.hunt.duration_seconds, 60);
        assert!(config.content_dir.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = Config::parse(
            "log_file = \"arcade.log\"\n\n[timing]\ntick_ms = 250\n\n[hunt]\nduration_seconds = 30\n",
        )
        .unwrap();
        assert_eq!(config.timing.tick(), Duration::from_millis(250));
        assert_eq!(config.timing.success_delay(), Duration::from_millis(1500));
        assert_eq!(config.hunt.duration_seconds, 30);
        assert_eq!(config.log_file, Some(PathBuf::from("arcade.log")));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = Config::parse("[timing]\ndemo_interval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("demo_interval_ms"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("[timing]\ntik_ms = 5\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.hunt, HuntRules::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("arcade.toml");
        std::fs::write(&path, "content_dir = \"my-content\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.content_dir, Some(PathBuf::from("my-content")));
    }
}
