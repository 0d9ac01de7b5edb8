//! 설정 결정.
//!
//! 설정 파일 → CLI 오버라이드 → 검증 순서로 최종 설정을 만든다.

use pagebeacon_core::config::BeaconConfig;
use pagebeacon_core::config_manager::ConfigManager;
use pagebeacon_core::error::CoreError;
use std::path::PathBuf;
use tracing::{info, warn};

/// 설정 출처
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// 내장 기본값 (파일 없음)
    Defaults,
    /// 플랫폼별 설정 디렉토리의 `config.json`
    Platform,
    /// 지정 경로
    File(PathBuf),
}

/// CLI에서 넘어온 설정 오버라이드
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// 보고 대상 URL
    pub report_url: Option<String>,
    /// 활동 보고 주기 (초)
    pub interval_secs: Option<u64>,
}

impl ConfigOverrides {
    /// 오버라이드 적용
    pub fn apply(&self, config: &mut BeaconConfig) {
        if let Some(url) = &self.report_url {
            config.report.url = url.trim().to_string();
        }
        if let Some(secs) = self.interval_secs {
            config.report.interval_secs = secs;
        }
    }
}

/// 최종 설정 결정
///
/// 설정 파일이 없으면 기본값으로 생성된다. 플랫폼 경로를 쓸 수 없으면
/// 경고 후 내장 기본값을 사용하지만, 이미 있는 설정 파일이 잘못되었으면 에러다.
pub fn resolve_config(
    source: &ConfigSource,
    overrides: &ConfigOverrides,
) -> Result<BeaconConfig, CoreError> {
    let mut config = match source {
        ConfigSource::Defaults => BeaconConfig::default(),
        ConfigSource::Platform => platform_config(ConfigManager::default_config_path())?,
        ConfigSource::File(path) => {
            let manager = ConfigManager::with_path(path.clone())?;
            info!("설정 파일: {}", manager.config_path().display());
            manager.get()
        }
    };

    overrides.apply(&mut config);
    config.validate()?;

    if config.is_disabled() {
        warn!("보고 대상 URL 미설정, 이벤트는 전송되지 않음");
    }
    Ok(config)
}

/// 플랫폼 경로의 설정 로드
fn platform_config(path: Result<PathBuf, CoreError>) -> Result<BeaconConfig, CoreError> {
    let path = match path {
        Ok(path) => path,
        Err(e) => {
            warn!("설정 경로 확인 실패, 기본 설정 사용: {e}");
            return Ok(BeaconConfig::default());
        }
    };

    // 기존 파일의 파싱/검증 실패는 그대로 전파
    if path.exists() {
        let manager = ConfigManager::with_path(path)?;
        info!("설정 파일: {}", manager.config_path().display());
        return Ok(manager.get());
    }

    match ConfigManager::with_path(path) {
        Ok(manager) => {
            info!("설정 파일: {}", manager.config_path().display());
            Ok(manager.get())
        }
        Err(e) => {
            warn!("설정 파일 생성 실패, 기본 설정 사용: {e}");
            Ok(BeaconConfig::default())
        }
    }
}
