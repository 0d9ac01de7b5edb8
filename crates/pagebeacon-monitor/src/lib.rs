//! # pagebeacon-monitor
//!
//! 호스트 페이지 신호 추적기.
//! 스크롤/마우스 활동 집계, 마커 클래스 요소 계측, 1회성 내비게이션 타이밍
//! 관찰, 웹 바이탈 구독 필터를 제공한다.
//!
//! 모든 추적기는 `&self`로 호출 가능하며 내부 상태를 명시적으로 직렬화한다.

pub mod activity;
pub mod instrumentation;
pub mod navigation;
pub mod vitals;
