//! 호스트 페이지 포트.
//!
//! 구현: 브라우저 바인딩, 또는 `pagebeacon-app`의 스크립트 재생 호스트

use crate::models::page::PageElement;

/// 클라이언트가 문서에서 읽어오는 정보
///
/// 호출은 짧고 동기적이어야 한다 (UI 스레드에서 호출됨).
pub trait PageHost: Send + Sync {
    /// 현재 문서 URL
    fn document_url(&self) -> String;

    /// 유입 경로 (없으면 빈 문자열)
    fn referrer(&self) -> String;

    /// 지정 클래스를 가진 요소 목록 (호출 시점 스냅샷)
    fn elements_by_class(&self, class_name: &str) -> Vec<PageElement>;
}
