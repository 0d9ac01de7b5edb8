//! # pagebeacon-app
//!
//! PageBeacon 메트릭 클라이언트 와이어링.
//!
//! - [`client`] — `MetricsClient`: 설정(`setup`), 전송(`send_metric`), 호스트 신호 처리
//! - [`reporter`] — 주기적 활동 보고 타이머
//! - [`config_loader`] — 설정 파일 + CLI 오버라이드 결정
//! - [`lifecycle`] — 종료 신호 (페이지 언로드, OS 시그널)
//! - [`scripted_page`] — 녹화된 페이지 세션을 재생하는 `PageHost` 구현
//! - [`replay`] — 스크립트 파싱 및 재생

pub mod client;
pub mod config_loader;
pub mod lifecycle;
pub mod replay;
pub mod reporter;
pub mod scripted_page;

pub use client::MetricsClient;
