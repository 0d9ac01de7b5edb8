//! 마커 클래스 자동 계측.
//!
//! 설정 시점에 한 번만 문서를 스캔하여 `notify-click` / `notify-change`
//! 클래스를 가진 요소에 리스너를 붙인다. 이후 추가된 요소는 계측되지 않는다.

use pagebeacon_core::config::InstrumentationConfig;
use pagebeacon_core::models::page::{DomEvent, NodeId};
use pagebeacon_core::ports::page_host::PageHost;
use std::collections::HashSet;
use tracing::debug;

/// 계측된 요소에서 발생한 상호작용
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// 클릭: 요소 id
    Click { target: String },
    /// 값 변경: 요소 id와 현재 값 (값이 없는 요소는 None)
    Change {
        target: String,
        value: Option<String>,
    },
}

/// 리스너가 붙은 요소 목록 (스캔 이후 불변)
#[derive(Debug, Default)]
pub struct ElementRegistry {
    click_nodes: HashSet<NodeId>,
    change_nodes: HashSet<NodeId>,
}

impl ElementRegistry {
    /// 호스트 문서를 1회 스캔하여 레지스트리 생성
    pub fn scan(host: &dyn PageHost, config: &InstrumentationConfig) -> Self {
        let click_nodes: HashSet<NodeId> = host
            .elements_by_class(&config.click_class)
            .into_iter()
            .map(|el| el.node)
            .collect();
        let change_nodes: HashSet<NodeId> = host
            .elements_by_class(&config.change_class)
            .into_iter()
            .map(|el| el.node)
            .collect();

        debug!(
            "요소 계측: {}={}개, {}={}개",
            config.click_class,
            click_nodes.len(),
            config.change_class,
            change_nodes.len()
        );

        Self {
            click_nodes,
            change_nodes,
        }
    }

    /// 클릭 리스너가 붙은 요소 수
    pub fn click_count(&self) -> usize {
        self.click_nodes.len()
    }

    /// 변경 리스너가 붙은 요소 수
    pub fn change_count(&self) -> usize {
        self.change_nodes.len()
    }

    /// DOM 이벤트를 상호작용으로 해석
    ///
    /// 계측되지 않은 요소나 클릭/변경 이외의 이벤트는 None.
    pub fn resolve(&self, event: &DomEvent) -> Option<Interaction> {
        match event {
            DomEvent::Click(el) if self.click_nodes.contains(&el.node) => {
                Some(Interaction::Click {
                    target: el.id.clone(),
                })
            }
            DomEvent::Change(el) if self.change_nodes.contains(&el.node) => {
                Some(Interaction::Change {
                    target: el.id.clone(),
                    value: el.value.clone(),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebeacon_core::models::page::{PageElement, ScrollPosition};
    use parking_lot::Mutex;

    struct FakePage {
        elements: Mutex<Vec<PageElement>>,
    }

    impl FakePage {
        fn new(elements: Vec<PageElement>) -> Self {
            Self {
                elements: Mutex::new(elements),
            }
        }
    }

    impl PageHost for FakePage {
        fn document_url(&self) -> String {
            "https://example.com/".to_string()
        }

        fn referrer(&self) -> String {
            String::new()
        }

        fn elements_by_class(&self, class_name: &str) -> Vec<PageElement> {
            self.elements
                .lock()
                .iter()
                .filter(|el| el.has_class(class_name))
                .cloned()
                .collect()
        }
    }

    fn element(node: u64, id: &str, classes: &[&str]) -> PageElement {
        PageElement {
            node: NodeId(node),
            id: id.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            value: None,
        }
    }

    fn registry(page: &FakePage) -> ElementRegistry {
        ElementRegistry::scan(page, &InstrumentationConfig::default())
    }

    #[test]
    fn click_on_marked_element() {
        let page = FakePage::new(vec![element(1, "submit-btn", &["btn", "notify-click"])]);
        let reg = registry(&page);

        let event = DomEvent::Click(element(1, "submit-btn", &["btn", "notify-click"]));
        assert_eq!(
            reg.resolve(&event),
            Some(Interaction::Click {
                target: "submit-btn".to_string()
            })
        );
    }

    #[test]
    fn change_carries_current_value() {
        let page = FakePage::new(vec![element(2, "email", &["notify-change"])]);
        let reg = registry(&page);

        let mut changed = element(2, "email", &["notify-change"]);
        changed.value = Some("a@b.com".to_string());
        assert_eq!(
            reg.resolve(&DomEvent::Change(changed)),
            Some(Interaction::Change {
                target: "email".to_string(),
                value: Some("a@b.com".to_string())
            })
        );
    }

    #[test]
    fn change_without_value_keeps_none() {
        let page = FakePage::new(vec![element(3, "agree", &["notify-change"])]);
        let reg = registry(&page);

        assert_eq!(
            reg.resolve(&DomEvent::Change(element(3, "agree", &["notify-change"]))),
            Some(Interaction::Change {
                target: "agree".to_string(),
                value: None
            })
        );
    }

    #[test]
    fn unmarked_element_is_ignored() {
        let page = FakePage::new(vec![element(1, "a", &["notify-click"])]);
        let reg = registry(&page);
        assert_eq!(reg.resolve(&DomEvent::Click(element(9, "other", &[]))), None);
    }

    #[test]
    fn click_listener_does_not_fire_on_change() {
        let page = FakePage::new(vec![element(1, "a", &["notify-click"])]);
        let reg = registry(&page);
        assert_eq!(
            reg.resolve(&DomEvent::Change(element(1, "a", &["notify-click"]))),
            None
        );
    }

    #[test]
    fn elements_added_after_scan_are_not_instrumented() {
        let page = FakePage::new(vec![]);
        let reg = registry(&page);
        page.elements
            .lock()
            .push(element(5, "late", &["notify-click"]));

        assert_eq!(reg.click_count(), 0);
        assert_eq!(
            reg.resolve(&DomEvent::Click(element(5, "late", &["notify-click"]))),
            None
        );
    }

    #[test]
    fn element_with_both_classes_gets_both_listeners() {
        let page = FakePage::new(vec![element(3, "both", &["notify-click", "notify-change"])]);
        let reg = registry(&page);
        assert_eq!(reg.click_count(), 1);
        assert_eq!(reg.change_count(), 1);
    }

    #[test]
    fn non_interaction_events_resolve_to_none() {
        let reg = registry(&FakePage::new(vec![]));
        assert_eq!(reg.resolve(&DomEvent::MouseMove), None);
        assert_eq!(
            reg.resolve(&DomEvent::Scroll(ScrollPosition {
                scroll_y: 1.0,
                scroll_height: 2.0
            })),
            None
        );
    }
}
