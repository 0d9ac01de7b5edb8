//! 메트릭 이벤트 모델.
//!
//! 수집 엔드포인트로 POST되는 평면(flat) JSON 객체.
//! 스키마는 강제하지 않으며 `Event`, `SessionId` 두 필드만 항상 포함된다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::page::PageView;
use crate::models::session::SessionId;
use crate::models::vitals::VitalMetric;

/// 이벤트 종류 필드
pub const FIELD_EVENT: &str = "Event";
/// 세션 ID 필드
pub const FIELD_SESSION_ID: &str = "SessionId";
/// 대상 요소 ID 필드 (click)
pub const FIELD_TARGET: &str = "Target";
/// 입력값 필드 (change)
pub const FIELD_VALUE: &str = "Value";
/// 스크롤 비율 필드 (activity)
pub const FIELD_SCROLL_PERC: &str = "ScrollPerc";
/// 페이지 URL 필드 (pageview)
pub const FIELD_PAGE: &str = "Page";
/// 유입 경로 필드 (pageview)
pub const FIELD_REFERER: &str = "Referer";
/// 로드 시간 필드 (pageview)
pub const FIELD_LOAD_TIME: &str = "LoadTime";
/// 클라이언트 버전 필드 (pageview)
pub const FIELD_CLIENT_VERSION: &str = "JSVersion";
/// 내비게이션 유형 필드 (vitals)
pub const FIELD_NAVIGATION_TYPE: &str = "navigationType";

/// 수집 엔드포인트가 아는 이벤트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// 페이지 로드 완료
    Pageview,
    /// 요소 클릭 (값 변경 포함)
    Click,
    /// 주기적 활동 보고
    Activity,
    /// 컨텍스트 정보
    Context,
    /// 웹 바이탈
    Vitals,
    /// 이메일 관련
    Email,
}

impl EventType {
    /// 와이어 포맷 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Pageview => "pageview",
            EventType::Click => "click",
            EventType::Activity => "activity",
            EventType::Context => "context",
            EventType::Vitals => "vitals",
            EventType::Email => "email",
        }
    }

    /// 문자열에서 변환 (모르는 종류는 None)
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "pageview" => Some(EventType::Pageview),
            "click" => Some(EventType::Click),
            "activity" => Some(EventType::Activity),
            "context" => Some(EventType::Context),
            "vitals" => Some(EventType::Vitals),
            "email" => Some(EventType::Email),
            _ => None,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 이벤트 필드 값: 문자열 또는 숫자
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// 숫자 (LoadTime, 바이탈 값)
    Number(f64),
    /// 문자열
    Text(String),
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

/// 메트릭 이벤트: 필드 이름 → 값 평면 매핑
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricEvent {
    fields: BTreeMap<String, MetricValue>,
}

impl MetricEvent {
    /// 임의 종류의 이벤트 생성
    ///
    /// 종류 문자열은 검증하지 않는다.
    pub fn new(kind: impl Into<String>, session: &SessionId) -> Self {
        Self::default()
            .with(FIELD_EVENT, kind.into())
            .with(FIELD_SESSION_ID, session.as_str())
    }

    /// 알려진 종류로 이벤트 생성
    pub fn of_type(kind: EventType, session: &SessionId) -> Self {
        Self::new(kind.as_str(), session)
    }

    /// 필드 추가 (같은 이름이면 덮어씀)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// 클릭 이벤트
    pub fn click(session: &SessionId, target: &str) -> Self {
        Self::of_type(EventType::Click, session).with(FIELD_TARGET, target)
    }

    /// 값 변경 이벤트
    ///
    /// 수집 측 호환을 위해 종류는 `click`으로 보낸다. 값이 없는 요소는 `Value` 필드를 생략한다.
    pub fn change(session: &SessionId, target: &str, value: Option<&str>) -> Self {
        let event = Self::click(session, target);
        match value {
            Some(value) => event.with(FIELD_VALUE, value),
            None => event,
        }
    }

    /// 주기적 활동 이벤트 (스크롤 비율은 문자열로 전송)
    pub fn activity(session: &SessionId, scroll_perc: i64) -> Self {
        Self::of_type(EventType::Activity, session)
            .with(FIELD_SCROLL_PERC, scroll_perc.to_string())
    }

    /// 페이지뷰 이벤트
    pub fn pageview(session: &SessionId, view: &PageView) -> Self {
        Self::of_type(EventType::Pageview, session)
            .with(FIELD_PAGE, view.page.as_str())
            .with(FIELD_REFERER, view.referer.as_str())
            .with(FIELD_LOAD_TIME, view.load_time)
            .with(FIELD_CLIENT_VERSION, view.client_version.as_str())
    }

    /// 웹 바이탈 이벤트: 지표 이름을 필드 키로 사용
    pub fn vitals(session: &SessionId, metric: &VitalMetric) -> Self {
        Self::of_type(EventType::Vitals, session)
            .with(metric.name.as_str(), metric.value)
            .with(FIELD_NAVIGATION_TYPE, metric.navigation_type.as_str())
    }

    /// 문자열 필드 조회
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(MetricValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// 숫자 필드 조회
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.fields.get(key) {
            Some(MetricValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// `Event` 필드 원문
    pub fn kind(&self) -> Option<&str> {
        self.text(FIELD_EVENT)
    }

    /// `Event` 필드를 알려진 종류로 해석
    pub fn event_type(&self) -> Option<EventType> {
        self.kind().and_then(EventType::from_kind)
    }

    /// `SessionId` 필드
    pub fn session_id(&self) -> Option<&str> {
        self.text(FIELD_SESSION_ID)
    }
}
