//! 재생용 페이지 호스트.
//!
//! 녹화된 세션 스크립트가 기술한 문서(URL, 유입 경로, 요소 목록)를
//! 메모리에 들고 `PageHost`로 노출한다.

use pagebeacon_core::models::page::{NodeId, PageElement};
use pagebeacon_core::ports::page_host::PageHost;
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct PageState {
    url: String,
    referrer: String,
    elements: Vec<PageElement>,
}

/// 스크립트 기반 페이지
#[derive(Debug, Default)]
pub struct ScriptedPage {
    state: RwLock<PageState>,
}

impl ScriptedPage {
    /// 새 페이지 생성
    pub fn new(
        url: impl Into<String>,
        referrer: impl Into<String>,
        elements: Vec<PageElement>,
    ) -> Self {
        Self {
            state: RwLock::new(PageState {
                url: url.into(),
                referrer: referrer.into(),
                elements,
            }),
        }
    }

    /// 노드로 요소 조회
    pub fn element(&self, node: NodeId) -> Option<PageElement> {
        self.state
            .read()
            .elements
            .iter()
            .find(|el| el.node == node)
            .cloned()
    }

    /// 입력 요소 값 변경. 변경된 요소 스냅샷 반환
    pub fn set_value(&self, node: NodeId, value: &str) -> Option<PageElement> {
        let mut state = self.state.write();
        let element = state.elements.iter_mut().find(|el| el.node == node)?;
        element.value = Some(value.to_string());
        Some(element.clone())
    }

    /// 요소 추가 (같은 노드가 있으면 교체)
    pub fn add_element(&self, element: PageElement) {
        let mut state = self.state.write();
        match state.elements.iter_mut().find(|el| el.node == element.node) {
            Some(existing) => *existing = element,
            None => state.elements.push(element),
        }
    }
}

impl PageHost for ScriptedPage {
    fn document_url(&self) -> String {
        self.state.read().url.clone()
    }

    fn referrer(&self) -> String {
        self.state.read().referrer.clone()
    }

    fn elements_by_class(&self, class_name: &str) -> Vec<PageElement> {
        self.state
            .read()
            .elements
            .iter()
            .filter(|el| el.has_class(class_name))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(node: u64, id: &str, classes: &[&str]) -> PageElement {
        PageElement {
            node: NodeId(node),
            id: id.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            value: None,
        }
    }

    #[test]
    fn elements_by_class_filters() {
        let page = ScriptedPage::new(
            "https://a.example/",
            "",
            vec![
                el(1, "buy", &["btn", "notify-click"]),
                el(2, "name", &["notify-change"]),
                el(3, "logo", &[]),
            ],
        );

        let clicks = page.elements_by_class("notify-click");
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].id, "buy");
        assert!(page.elements_by_class("missing").is_empty());
    }

    #[test]
    fn set_value_updates_snapshot() {
        let page = ScriptedPage::new(
            "https://a.example/",
            "",
            vec![el(2, "name", &["notify-change"])],
        );

        let changed = page.set_value(NodeId(2), "Kim").unwrap();
        assert_eq!(changed.value.as_deref(), Some("Kim"));
        assert_eq!(page.element(NodeId(2)).unwrap().value.as_deref(), Some("Kim"));
        assert!(page.set_value(NodeId(9), "x").is_none());
    }

    #[test]
    fn add_element_replaces_same_node() {
        let page = ScriptedPage::new("https://a.example/", "", vec![el(1, "a", &["x"])]);
        page.add_element(el(1, "b", &["x"]));
        page.add_element(el(2, "c", &["x"]));

        assert_eq!(page.elements_by_class("x").len(), 2);
        assert_eq!(page.element(NodeId(1)).unwrap().id, "b");
    }
}
