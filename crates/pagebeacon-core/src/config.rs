//! 클라이언트 설정 구조체.
//!
//! 수집 엔드포인트, 활동 보고 주기, 자동 계측 마커 클래스, 바이탈 구독 여부.
//! `ConfigManager`를 통해 JSON 파일에서 로드하고 CLI 인자로 덮어쓴다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;

/// 활동 보고 최소 주기 (초). 이보다 짧은 값은 조용히 올려진다.
pub const MIN_REPORT_INTERVAL_SECS: u64 = 20;

/// 보고 주기 하한 적용
pub fn effective_report_interval_secs(requested_secs: u64) -> u64 {
    requested_secs.max(MIN_REPORT_INTERVAL_SECS)
}

/// 최상위 클라이언트 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeaconConfig {
    /// 보고 대상 설정
    #[serde(default)]
    pub report: ReportConfig,
    /// 자동 계측 설정
    #[serde(default)]
    pub instrumentation: InstrumentationConfig,
    /// 웹 바이탈 설정
    #[serde(default)]
    pub vitals: VitalsConfig,
}

// ============================================================
// 보고 대상 설정
// ============================================================

/// 보고 대상 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 수집 엔드포인트 URL. 비어 있으면 모든 전송을 생략 (비활성 모드)
    #[serde(default)]
    pub url: String,
    /// 활동 보고 주기 (초, 최소 20)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            interval_secs: default_interval_secs(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

// ============================================================
// 자동 계측 설정
// ============================================================

/// 자동 계측 마커 클래스
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentationConfig {
    /// 클릭을 보고할 요소의 클래스
    #[serde(default = "default_click_class")]
    pub click_class: String,
    /// 값 변경을 보고할 요소의 클래스
    #[serde(default = "default_change_class")]
    pub change_class: String,
}

impl Default for InstrumentationConfig {
    fn default() -> Self {
        Self {
            click_class: default_click_class(),
            change_class: default_change_class(),
        }
    }
}

/// 웹 바이탈 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsConfig {
    /// CLS/FID/LCP 콜백 구독 여부
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_interval_secs() -> u64 {
    30
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_click_class() -> String {
    "notify-click".to_string()
}

fn default_change_class() -> String {
    "notify-change".to_string()
}

fn default_true() -> bool {
    true
}

// ============================================================
// BeaconConfig impl
// ============================================================

impl BeaconConfig {
    /// 보고 URL과 주기만 지정한 설정
    pub fn with_report(url: &str, interval_secs: u64) -> Self {
        let mut config = Self::default();
        config.report.url = url.to_string();
        config.report.interval_secs = interval_secs;
        config
    }

    /// 하한이 적용된 활동 보고 주기
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(effective_report_interval_secs(self.report.interval_secs))
    }

    /// 요청 타임아웃 Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.report.request_timeout_ms)
    }

    /// 보고가 꺼져 있는지 (URL 미설정)
    pub fn is_disabled(&self) -> bool {
        self.report.url.trim().is_empty()
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.report.url.trim();
        if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::Validation {
                field: "report.url".to_string(),
                message: format!("http(s) URL이 아님: {url}"),
            });
        }
        if self.report.request_timeout_ms == 0 {
            return Err(CoreError::Validation {
                field: "report.request_timeout_ms".to_string(),
                message: "0보다 커야 함".to_string(),
            });
        }
        for (field, class) in [
            ("instrumentation.click_class", &self.instrumentation.click_class),
            ("instrumentation.change_class", &self.instrumentation.change_class),
        ] {
            if class.trim().is_empty() || class.contains(char::is_whitespace) {
                return Err(CoreError::Validation {
                    field: field.to_string(),
                    message: format!("단일 클래스 이름이어야 함: {class:?}"),
                });
            }
        }
        Ok(())
    }
}
