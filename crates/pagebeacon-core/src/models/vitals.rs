//! 웹 바이탈 모델.
//!
//! 외부 측정 라이브러리가 콜백으로 전달하는 CLS/FID/LCP 값.

use serde::{Deserialize, Serialize};

/// 구독하는 웹 바이탈 지표
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VitalName {
    /// Cumulative Layout Shift
    #[serde(rename = "CLS")]
    Cls,
    /// First Input Delay
    #[serde(rename = "FID")]
    Fid,
    /// Largest Contentful Paint
    #[serde(rename = "LCP")]
    Lcp,
}

impl VitalName {
    /// 구독 대상 전체
    pub const ALL: [VitalName; 3] = [VitalName::Cls, VitalName::Fid, VitalName::Lcp];

    /// 이벤트 필드 이름으로 쓰이는 지표 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            VitalName::Cls => "CLS",
            VitalName::Fid => "FID",
            VitalName::Lcp => "LCP",
        }
    }
}

/// 바이탈 콜백 1회분
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalMetric {
    /// 지표 이름
    pub name: VitalName,
    /// 측정값 (CLS는 무단위, FID/LCP는 밀리초)
    pub value: f64,
    /// 측정 라이브러리가 부여한 고유 ID
    #[serde(default)]
    pub id: String,
    /// 내비게이션 유형 (navigate, reload, back-forward, prerender 등)
    #[serde(default)]
    pub navigation_type: String,
}
