//! PageBeacon 도메인 모델.
//!
//! 수집 엔드포인트로 전송되는 메트릭 이벤트와, 호스트 페이지가 전달하는
//! 신호(DOM 이벤트, 내비게이션 타이밍, 웹 바이탈)를 정의한다.

pub mod event;
pub mod page;
pub mod session;
pub mod vitals;
