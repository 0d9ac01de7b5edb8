//! 메트릭 클라이언트.
//!
//! 페이지 로드당 1개 인스턴스. 세션 ID, 활동 상태, 보고 대상을 보유하고
//! 호스트가 전달하는 신호를 메트릭 이벤트로 바꿔 fire-and-forget 전송한다.

use pagebeacon_core::config::BeaconConfig;
use pagebeacon_core::models::event::MetricEvent;
use pagebeacon_core::models::page::{DomEvent, NavigationEntry, PageView};
use pagebeacon_core::models::session::SessionId;
use pagebeacon_core::models::vitals::VitalMetric;
use pagebeacon_core::ports::page_host::PageHost;
use pagebeacon_core::ports::transport::MetricTransport;
use pagebeacon_monitor::activity::ActivityTracker;
use pagebeacon_monitor::instrumentation::{ElementRegistry, Interaction};
use pagebeacon_monitor::navigation::PageLoadObserver;
use pagebeacon_monitor::vitals::VitalsSubscription;
use pagebeacon_network::dispatcher::MetricDispatcher;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::lifecycle::LifecycleManager;
use crate::reporter::spawn_activity_reporter;

/// 페이지뷰 이벤트에 실리는 클라이언트 버전
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 메트릭 클라이언트
pub struct MetricsClient {
    session_id: SessionId,
    host: Arc<dyn PageHost>,
    dispatcher: MetricDispatcher,
    activity: ActivityTracker,
    registry: ElementRegistry,
    page_load: PageLoadObserver,
    vitals: VitalsSubscription,
    report_interval: Duration,
    lifecycle: LifecycleManager,
}

impl MetricsClient {
    /// 클라이언트 생성 + 활동 보고 타이머 시작
    ///
    /// 보고 대상 설정, 주기 하한(20초) 적용, 내비게이션 관찰자 장착,
    /// 마커 클래스 요소 1회 스캔, 바이탈 구독을 수행한다.
    pub fn setup(
        config: &BeaconConfig,
        host: Arc<dyn PageHost>,
        transport: Arc<dyn MetricTransport>,
    ) -> Arc<Self> {
        let client = Arc::new(Self::new(config, host, transport));
        spawn_activity_reporter(
            Arc::downgrade(&client),
            client.report_interval,
            client.lifecycle.subscribe(),
        );
        client
    }

    /// 타이머 없이 클라이언트 생성
    ///
    /// 활동 보고는 [`MetricsClient::report_activity`]를 직접 호출해야 한다.
    pub fn new(
        config: &BeaconConfig,
        host: Arc<dyn PageHost>,
        transport: Arc<dyn MetricTransport>,
    ) -> Self {
        let session_id = SessionId::generate();
        let dispatcher = MetricDispatcher::new(transport, &config.report.url);
        let registry = ElementRegistry::scan(host.as_ref(), &config.instrumentation);
        let report_interval = config.report_interval();

        if dispatcher.is_enabled() {
            info!(
                "메트릭 클라이언트 시작: session={session_id}, 대상={}, 보고 주기={}초",
                dispatcher.target(),
                report_interval.as_secs()
            );
        } else {
            info!("메트릭 클라이언트 시작 (보고 대상 없음, 전송 비활성): session={session_id}");
        }

        Self {
            session_id,
            host,
            dispatcher,
            activity: ActivityTracker::new(),
            registry,
            page_load: PageLoadObserver::new(),
            vitals: VitalsSubscription::from_enabled(config.vitals.enabled),
            report_interval,
            lifecycle: LifecycleManager::new(),
        }
    }

    /// 세션 ID
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// 하한이 적용된 활동 보고 주기
    pub fn report_interval(&self) -> Duration {
        self.report_interval
    }

    /// 보고 대상 URL (비어 있으면 비활성)
    pub fn report_target(&self) -> &str {
        self.dispatcher.target()
    }

    /// 계측된 요소 레지스트리
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// 이벤트 전송: 즉시 반환, 실패는 로그만 남김
    pub fn send_metric(&self, event: MetricEvent) {
        self.dispatcher.dispatch(event);
    }

    /// DOM 신호 처리
    pub fn handle_dom_event(&self, event: DomEvent) {
        match &event {
            DomEvent::Scroll(position) => {
                self.activity.record_scroll(*position);
            }
            DomEvent::MouseMove => self.activity.record_mouse_move(),
            DomEvent::Click(_) | DomEvent::Change(_) => match self.registry.resolve(&event) {
                Some(Interaction::Click { target }) => {
                    self.send_metric(MetricEvent::click(&self.session_id, &target));
                }
                Some(Interaction::Change { target, value }) => {
                    let event = MetricEvent::change(&self.session_id, &target, value.as_deref());
                    self.send_metric(event);
                }
                None => {}
            },
        }
    }

    /// 내비게이션 타이밍 엔트리 처리: 페이지뷰 최대 1회
    pub fn on_navigation_entries(&self, entries: &[NavigationEntry]) {
        let Some(load_time) = self.page_load.observe(entries) else {
            return;
        };

        let view = PageView {
            page: self.host.document_url(),
            referer: self.host.referrer(),
            load_time,
            client_version: CLIENT_VERSION.to_string(),
        };
        self.send_metric(MetricEvent::pageview(&self.session_id, &view));
    }

    /// 웹 바이탈 콜백 처리
    pub fn on_vital(&self, metric: &VitalMetric) {
        if self.vitals.accepts(metric) {
            self.send_metric(MetricEvent::vitals(&self.session_id, metric));
        }
    }

    /// 활동 보고 (타이머 틱)
    ///
    /// 마지막 틱 이후 활동이 있었을 때만 activity 이벤트 1건을 보낸다.
    pub fn report_activity(&self) {
        if let Some(scroll_perc) = self.activity.take_report() {
            debug!("활동 보고: 스크롤 {scroll_perc}%");
            self.send_metric(MetricEvent::activity(&self.session_id, scroll_perc));
        }
    }

    /// 마지막 보고 이후 활동 여부
    pub fn had_activity(&self) -> bool {
        self.activity.had_activity()
    }

    /// 현재 스크롤 비율
    pub fn scroll_perc(&self) -> i64 {
        self.activity.scroll_perc()
    }

    /// 페이지뷰를 이미 보냈는지 (관찰자 연결 해제 여부)
    pub fn pageview_sent(&self) -> bool {
        self.page_load.is_disconnected()
    }

    /// 페이지 언로드: 활동 보고 타이머 정지
    ///
    /// 진행 중인 전송은 취소하지 않는다.
    pub fn shutdown(&self) {
        self.lifecycle.shutdown();
    }

    /// 진행 중 전송이 끝날 때까지 최대 `timeout` 대기
    pub async fn flush(&self, timeout: Duration) -> bool {
        self.dispatcher.wait_idle(timeout).await
    }
}
