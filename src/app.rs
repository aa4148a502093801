use thiserror::Error;
use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::inflow::InflowError;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("inflow calculation error: {0}")]
    Inflow(#[from] InflowError),
}

/// 명령줄에서 받은 이번 실행 한정 설정. 설정 파일에는 저장하지 않는다.
#[derive(Debug, Clone, Default)]
pub struct SessionOverrides {
    /// `--lang` 값 (auto 면 설정 파일 값을 따른다)
    lang: String,
    curve_resolution: Option<usize>,
}

impl SessionOverrides {
    pub fn new(lang: &str, curve_resolution: Option<usize>) -> Result<Self, ConfigError> {
        if let Some(n) = curve_resolution.filter(|&n| n < 2) {
            return Err(ConfigError::Invalid(format!(
                "curve_resolution must be at least 2 (got {n})"
            )));
        }
        Ok(Self {
            lang: lang.to_string(),
            curve_resolution,
        })
    }

    /// 명령줄 값이 있으면 그것을, 없으면 설정 파일 값을 쓴다.
    pub fn curve_resolution(&self, config: &Config) -> usize {
        self.curve_resolution.unwrap_or(config.curve_resolution)
    }

    pub fn language(&self, config: &Config) -> String {
        i18n::resolve_language(&self.lang, Some(config.language.as_str()))
    }

    pub fn translator(&self, config: &Config) -> Translator {
        Translator::new_with_pack(&self.language(config), config.language_pack_dir.as_deref())
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 계산 오류는 메뉴 단위로 출력하고 루프를 계속한다. 입출력/설정 오류만 상위로 전파한다.
pub fn run(
    config: &mut Config,
    session: &SessionOverrides,
    tr: &mut Translator,
) -> Result<(), AppError> {
    loop {
        let choice = ui_cli::main_menu(tr)?;
        debug!(?choice, "menu selected");
        let outcome = match choice {
            MenuChoice::ProductivityIndex => ui_cli::handle_productivity_index(tr, config),
            MenuChoice::AbsoluteOpenFlow => ui_cli::handle_absolute_open_flow(tr, config),
            MenuChoice::IprCurve => {
                ui_cli::handle_ipr_curve(tr, config, session.curve_resolution(config))
            }
            MenuChoice::SinglePhase => ui_cli::handle_single_phase(tr),
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
                *tr = session.translator(config);
                Ok(())
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        match outcome {
            Ok(()) => {}
            Err(AppError::Inflow(e)) => {
                println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    #[test]
    fn resolution_override_stays_out_of_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = config::load_or_default(&path).unwrap();
        let session = SessionOverrides::new("auto", Some(17)).unwrap();
        assert_eq!(session.curve_resolution(&cfg), 17);

        cfg.save().unwrap();
        let reloaded = config::load_or_default(&path).unwrap();
        assert_eq!(reloaded.curve_resolution, cfg.curve_resolution);
        assert_ne!(reloaded.curve_resolution, 17);
    }

    #[test]
    fn without_override_file_resolution_is_used() {
        let cfg = Config::default();
        let session = SessionOverrides::new("auto", None).unwrap();
        assert_eq!(session.curve_resolution(&cfg), cfg.curve_resolution);
    }

    #[test]
    fn too_small_override_is_rejected() {
        assert!(matches!(
            SessionOverrides::new("auto", Some(1)),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn explicit_lang_wins_over_config_after_settings_change() {
        let mut cfg = Config::default();
        cfg.language = "en".to_string();
        let session = SessionOverrides::new("es", None).unwrap();
        assert_eq!(session.language(&cfg), "es");

        cfg.language = "en-US".to_string();
        assert_eq!(session.language(&cfg), "es");
        assert_eq!(session.translator(&cfg).language(), i18n::Language::Es);
    }

    #[test]
    fn auto_lang_follows_config() {
        let mut cfg = Config::default();
        cfg.language = "es".to_string();
        let session = SessionOverrides::new("auto", None).unwrap();
        assert_eq!(session.language(&cfg), "es");
    }
}
