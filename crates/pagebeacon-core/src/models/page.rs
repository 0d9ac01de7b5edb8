//! 호스트 페이지 신호 모델.
//!
//! 호스트(브라우저 또는 재생 하네스)가 클라이언트에 전달하는 DOM 이벤트,
//! 스크롤 위치, 내비게이션 타이밍 엔트리.

use serde::{Deserialize, Serialize};

/// 호스트가 부여한 DOM 노드 식별자
///
/// 같은 노드는 페이지 수명 동안 같은 값을 가진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// DOM 요소 스냅샷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageElement {
    /// 노드 식별자
    pub node: NodeId,
    /// 요소의 `id` 속성 (없으면 빈 문자열)
    #[serde(default)]
    pub id: String,
    /// 클래스 목록
    #[serde(default)]
    pub classes: Vec<String>,
    /// 입력 요소의 현재 값
    #[serde(default)]
    pub value: Option<String>,
}

impl PageElement {
    /// 클래스 보유 여부
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.iter().any(|c| c == class_name)
    }
}

/// 문서 스크롤 위치
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollPosition {
    /// 세로 스크롤 위치 (px)
    pub scroll_y: f64,
    /// 문서 전체 스크롤 높이 (px)
    pub scroll_height: f64,
}

/// 호스트가 전달하는 DOM 신호
#[derive(Debug, Clone, PartialEq)]
pub enum DomEvent {
    /// 요소 클릭
    Click(PageElement),
    /// 입력 요소 값 변경
    Change(PageElement),
    /// 문서 스크롤
    Scroll(ScrollPosition),
    /// 마우스 이동
    MouseMove,
}

/// 내비게이션 타이밍 엔트리 (Performance Timeline `navigation` 타입)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// 문서 URL
    #[serde(default)]
    pub name: String,
    /// 로드 소요 시간 (ms). 로드가 끝나기 전에는 0
    pub duration: f64,
}

/// 페이지뷰 이벤트 내용
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// 현재 문서 URL
    pub page: String,
    /// 유입 경로 (document.referrer)
    pub referer: String,
    /// 로드 시간 (ms)
    pub load_time: f64,
    /// 클라이언트 버전
    pub client_version: String,
}
