use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::format::{ResultFormatter, ResultLabels};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/en/ko)
    pub language: String,
    /// 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// 금액 앞에 붙는 통화 기호
    pub currency_symbol: String,
    /// 천 단위 구분 기호 사용 여부
    pub group_thousands: bool,
    /// CLI 막대 그래프 칸 수
    pub bar_width: usize,
    pub window_alpha: f32,
    pub ui_scale: f32,
    pub always_on_top: bool,
    /// 사용자 지정 폰트(.ttf/.ttc)
    pub custom_font_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            currency_symbol: "₹".into(),
            group_thousands: true,
            bar_width: 40,
            window_alpha: 1.0,
            ui_scale: 1.0,
            always_on_top: false,
            custom_font_path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(DEFAULT_CONFIG_PATH)
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값을 저장하고 반환한다.
pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        tracing::info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(DEFAULT_CONFIG_PATH)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 설정값과 라벨로 결과 포매터를 만든다.
    pub fn formatter(&self, labels: ResultLabels) -> ResultFormatter {
        ResultFormatter {
            currency_symbol: self.currency_symbol.clone(),
            group_thousands: self.group_thousands,
            labels,
        }
    }
}
