//! 녹화된 페이지 세션 재생.
//!
//! 스크립트는 JSON lines 형식이다. 한 줄에 한 단계, 빈 줄과 `#` 주석은
//! 무시한다. 첫 단계는 반드시 `page`여야 한다.
//!
//! ```text
//! {"type":"page","url":"https://shop.example/","referrer":"","elements":[{"node":1,"id":"buy","classes":["notify-click"]}]}
//! {"type":"navigation","entries":[{"duration":412.5}]}
//! {"type":"click","node":1}
//! {"type":"wait","millis":500}
//! ```

use pagebeacon_core::config::BeaconConfig;
use pagebeacon_core::models::page::{DomEvent, NavigationEntry, NodeId, PageElement, ScrollPosition};
use pagebeacon_core::models::vitals::VitalMetric;
use pagebeacon_core::ports::transport::MetricTransport;
use serde::Deserialize;
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::MetricsClient;
use crate::scripted_page::ScriptedPage;

/// 재생 에러
#[derive(Debug, Error)]
pub enum ReplayError {
    /// 스크립트 읽기 실패
    #[error("스크립트 읽기 실패: {0}")]
    Io(#[from] std::io::Error),

    /// 단계 파싱 실패
    #[error("{line}번째 줄 파싱 실패: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// 스크립트 구조 오류
    #[error("잘못된 스크립트: {0}")]
    Invalid(String),
}

/// 문서 기술
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageSpec {
    /// 문서 URL
    pub url: String,
    /// 유입 경로
    #[serde(default)]
    pub referrer: String,
    /// 로드 시점의 요소 목록
    #[serde(default)]
    pub elements: Vec<PageElement>,
}

/// 스크립트 단계
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptStep {
    /// 페이지 로드
    Page(PageSpec),
    /// 내비게이션 타이밍 엔트리 전달
    Navigation { entries: Vec<NavigationEntry> },
    /// 요소 클릭
    Click { node: NodeId },
    /// 입력 요소 값 변경
    Change { node: NodeId, value: String },
    /// 문서 스크롤
    Scroll { scroll_y: f64, scroll_height: f64 },
    /// 마우스 이동
    MouseMove,
    /// 웹 바이탈 콜백
    Vital(VitalMetric),
    /// 대기
    Wait { millis: u64 },
    /// 로드 이후 요소 추가 (계측되지 않음)
    AddElement { element: PageElement },
}

/// 파싱된 스크립트
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    /// 첫 `page` 단계
    pub page: PageSpec,
    /// 나머지 단계
    pub steps: Vec<ScriptStep>,
}

/// JSON lines 스크립트 파싱
pub fn parse_script<R: BufRead>(reader: R) -> Result<Script, ReplayError> {
    let mut page = None;
    let mut steps = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let step: ScriptStep = serde_json::from_str(trimmed).map_err(|source| ReplayError::Parse {
            line: idx + 1,
            source,
        })?;

        match (step, page.is_some()) {
            (ScriptStep::Page(spec), false) => page = Some(spec),
            (ScriptStep::Page(_), true) => {
                return Err(ReplayError::Invalid(format!(
                    "{}번째 줄: page 단계는 한 번만 올 수 있습니다",
                    idx + 1
                )));
            }
            (_, false) => {
                return Err(ReplayError::Invalid(format!(
                    "{}번째 줄: 첫 단계는 page여야 합니다",
                    idx + 1
                )));
            }
            (step, true) => steps.push(step),
        }
    }

    let page = page.ok_or_else(|| ReplayError::Invalid("page 단계가 없습니다".to_string()))?;
    Ok(Script { page, steps })
}

/// 재생 결과 요약
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// 적용된 단계 수
    pub applied: usize,
    /// 존재하지 않는 노드를 가리켜 건너뛴 단계 수
    pub skipped: usize,
}

/// 스크립트 재생기
///
/// `page` 단계로 문서를 만들고 그 위에 실제 `MetricsClient`를 설정한 뒤
/// 나머지 단계를 순서대로 호스트 신호로 전달한다.
pub struct ScriptReplayer {
    page: Arc<ScriptedPage>,
    client: Arc<MetricsClient>,
}

impl ScriptReplayer {
    /// 문서 로드 + 클라이언트 설정
    pub fn new(
        config: &BeaconConfig,
        spec: &PageSpec,
        transport: Arc<dyn MetricTransport>,
    ) -> Self {
        let page = Arc::new(ScriptedPage::new(
            spec.url.clone(),
            spec.referrer.clone(),
            spec.elements.clone(),
        ));
        let client = MetricsClient::setup(config, page.clone(), transport);
        Self { page, client }
    }

    /// 클라이언트
    pub fn client(&self) -> &Arc<MetricsClient> {
        &self.client
    }

    /// 문서
    pub fn page(&self) -> &Arc<ScriptedPage> {
        &self.page
    }

    /// 단계 순차 재생
    pub async fn run(&self, steps: &[ScriptStep]) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        for step in steps {
            if self.apply(step).await {
                summary.applied += 1;
            } else {
                summary.skipped += 1;
            }
        }
        info!(
            "스크립트 재생 완료: 적용 {}건, 건너뜀 {}건",
            summary.applied, summary.skipped
        );
        summary
    }

    /// 단계 1건 적용. 대상 노드가 없으면 false
    pub async fn apply(&self, step: &ScriptStep) -> bool {
        debug!("재생 단계: {step:?}");
        match step {
            ScriptStep::Page(_) => {
                warn!("page 단계는 재생 중에 적용할 수 없음");
                return false;
            }
            ScriptStep::Navigation { entries } => self.client.on_navigation_entries(entries),
            ScriptStep::Click { node } => {
                let Some(element) = self.page.element(*node) else {
                    warn!("클릭 대상 노드 없음: {}", node.0);
                    return false;
                };
                self.client.handle_dom_event(DomEvent::Click(element));
            }
            ScriptStep::Change { node, value } => {
                let Some(element) = self.page.set_value(*node, value) else {
                    warn!("변경 대상 노드 없음: {}", node.0);
                    return false;
                };
                self.client.handle_dom_event(DomEvent::Change(element));
            }
            ScriptStep::Scroll {
                scroll_y,
                scroll_height,
            } => self.client.handle_dom_event(DomEvent::Scroll(ScrollPosition {
                scroll_y: *scroll_y,
                scroll_height: *scroll_height,
            })),
            ScriptStep::MouseMove => self.client.handle_dom_event(DomEvent::MouseMove),
            ScriptStep::Vital(metric) => self.client.on_vital(metric),
            ScriptStep::Wait { millis } => tokio::time::sleep(Duration::from_millis(*millis)).await,
            ScriptStep::AddElement { element } => self.page.add_element(element.clone()),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebeacon_core::models::vitals::VitalName;
    use pagebeacon_network::http_client::HttpMetricTransport;

    const SCRIPT: &str = r#"
# 결제 페이지
{"type":"page","url":"https://shop.example/cart","referrer":"https://ads.example/","elements":[{"node":1,"id":"buy","classes":["notify-click"]}]}

{"type":"navigation","entries":[{"name":"https://shop.example/cart","duration":512.0}]}
{"type":"click","node":1}
{"type":"change","node":2,"value":"x"}
{"type":"scroll","scroll_y":120,"scroll_height":600}
{"type":"mouse_move"}
{"type":"vital","name":"LCP","value":1830.5,"navigation_type":"navigate"}
{"type":"wait","millis":250}
{"type":"add_element","element":{"node":7,"id":"late","classes":["notify-click"]}}
"#;

    #[test]
    fn parses_all_step_kinds() {
        let script = parse_script(SCRIPT.as_bytes()).unwrap();

        assert_eq!(script.page.url, "https://shop.example/cart");
        assert_eq!(script.page.elements.len(), 1);
        assert_eq!(script.steps.len(), 8);
        assert_eq!(script.steps[1], ScriptStep::Click { node: NodeId(1) });
        assert_eq!(script.steps[4], ScriptStep::MouseMove);
        match &script.steps[5] {
            ScriptStep::Vital(metric) => {
                assert_eq!(metric.name, VitalName::Lcp);
                assert_eq!(metric.navigation_type, "navigate");
            }
            other => panic!("vital 단계가 아님: {other:?}"),
        }
        assert_eq!(script.steps[6], ScriptStep::Wait { millis: 250 });
    }

    #[test]
    fn parse_error_reports_line() {
        let input = "{\"type\":\"page\",\"url\":\"https://a.example/\"}\n{\"type\":\"jump\"}\n";
        match parse_script(input.as_bytes()) {
            Err(ReplayError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("파싱 에러 기대: {other:?}"),
        }
    }

    #[test]
    fn first_step_must_be_page() {
        let input = "{\"type\":\"mouse_move\"}\n";
        assert!(matches!(
            parse_script(input.as_bytes()),
            Err(ReplayError::Invalid(_))
        ));
        assert!(matches!(parse_script("".as_bytes()), Err(ReplayError::Invalid(_))));
    }

    #[test]
    fn page_step_cannot_be_applied_mid_session() {
        let spec = PageSpec {
            url: "https://a.example/".to_string(),
            referrer: String::new(),
            elements: Vec::new(),
        };
        let transport = Arc::new(HttpMetricTransport::new(Duration::from_secs(1)).unwrap());
        let replayer = ScriptReplayer::new(&BeaconConfig::default(), &spec, transport);

        let summary = tokio_test::block_on(replayer.run(&[
            ScriptStep::Page(spec.clone()),
            ScriptStep::Click { node: NodeId(1) },
            ScriptStep::MouseMove,
        ]));
        assert_eq!(summary, ReplaySummary { applied: 1, skipped: 2 });
        assert!(replayer.client().had_activity());
    }

    #[test]
    fn second_page_is_rejected() {
        let input = "{\"type\":\"page\",\"url\":\"a\"}\n{\"type\":\"page\",\"url\":\"b\"}\n";
        assert!(matches!(
            parse_script(input.as_bytes()),
            Err(ReplayError::Invalid(_))
        ));
    }
}
