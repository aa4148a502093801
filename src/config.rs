use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::inflow::{IprMethod, DEFAULT_CURVE_RESOLUTION};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 입력 프롬프트에 보여줄 기본 시험점 값.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WellDefaults {
    pub q_test_bpd: f64,
    pub pwf_test_psia: f64,
    pub pr_psia: f64,
    pub pb_psia: f64,
    pub ef: f64,
}

impl Default for WellDefaults {
    fn default() -> Self {
        Self {
            q_test_bpd: 500.0,
            pwf_test_psia: 3000.0,
            pr_psia: 4000.0,
            pb_psia: 2500.0,
            ef: 1.0,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/en/es)
    pub language: String,
    /// 외부 언어팩 디렉터리 (없으면 locales/ 후 내장 문자열)
    pub language_pack_dir: Option<String>,
    /// IPR 곡선 재표본 점 수
    pub curve_resolution: usize,
    pub default_method: IprMethod,
    /// 한 번에 입력받는 pwf 값의 최대 개수
    pub max_pwf_samples: usize,
    pub defaults: WellDefaults,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            curve_resolution: DEFAULT_CURVE_RESOLUTION,
            default_method: IprMethod::Composite,
            max_pwf_samples: 5,
            defaults: WellDefaults::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성해 저장한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "config loaded");
        cfg
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        info!(path = %path.display(), "default config written");
        cfg
    };
    cfg.validate()?;
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 로드했던 파일(없으면 기본 경로)에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        save_config(self, &path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.curve_resolution < 2 {
            return Err(ConfigError::Invalid(format!(
                "curve_resolution must be at least 2 (got {})",
                self.curve_resolution
            )));
        }
        if self.max_pwf_samples == 0 {
            return Err(ConfigError::Invalid(
                "max_pwf_samples must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = load_or_default(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.curve_resolution, DEFAULT_CURVE_RESOLUTION);
        assert_eq!(cfg.default_method, IprMethod::Composite);
    }

    #[test]
    fn saved_changes_are_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = load_or_default(&path).unwrap();
        cfg.default_method = IprMethod::Standing;
        cfg.defaults.pb_psia = 2100.0;
        cfg.save().unwrap();

        let reloaded = load_or_default(&path).unwrap();
        assert_eq!(reloaded.default_method, IprMethod::Standing);
        assert_eq!(reloaded.defaults.pb_psia, 2100.0);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = \"es\"\n").unwrap();
        let cfg = load_or_default(&path).unwrap();
        assert_eq!(cfg.language, "es");
        assert_eq!(cfg.max_pwf_samples, 5);
    }

    #[test]
    fn too_small_resolution_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "curve_resolution = 1\n").unwrap();
        assert!(matches!(
            load_or_default(&path),
            Err(ConfigError::Invalid(_))
        ));
    }
}
