//! # pagebeacon-core
//!
//! PageBeacon 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 메트릭 이벤트, 세션 ID, 페이지 신호, 웹 바이탈
//! - [`ports`] — Hexagonal Architecture 포트 인터페이스 (호스트 페이지, 전송)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 클라이언트 설정 구조체
//! - [`config_manager`] — 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::event::{EventType, MetricEvent};
    use crate::models::session::SessionId;

    #[test]
    fn every_event_carries_session_id() {
        let session = SessionId::generate();
        let events = [
            MetricEvent::click(&session, "submit-btn"),
            MetricEvent::change(&session, "email", Some("a@b.com")),
            MetricEvent::activity(&session, 40),
        ];

        for event in &events {
            assert_eq!(event.session_id(), Some(session.as_str()));
            assert!(event.event_type().is_some());
        }
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::BeaconConfig::default();
        assert!(config.report.url.is_empty());
        assert_eq!(config.report.interval_secs, 30);
        assert_eq!(config.instrumentation.click_class, "notify-click");
        assert_eq!(config.instrumentation.change_class, "notify-change");
        assert!(config.vitals.enabled);
        assert_eq!(EventType::Click.as_str(), "click");
    }
}
