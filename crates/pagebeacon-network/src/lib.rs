//! # pagebeacon-network
//!
//! 메트릭 전송 어댑터.
//! 수집 엔드포인트로 이벤트 1건당 JSON POST 1회를 보내며,
//! 호출자는 결과를 기다리지 않는다 (fire-and-forget).
//!
//! 재시도, 배치, 오프라인 큐는 없다. 실패는 로그만 남기고 버린다.
//!
//! ```rust,ignore
//! use pagebeacon_network::dispatcher::MetricDispatcher;
//! use pagebeacon_network::http_client::HttpMetricTransport;
//!
//! let transport = HttpMetricTransport::new(timeout)?.with_page_url(&page_url);
//! let dispatcher = MetricDispatcher::new(Arc::new(transport), &report_url);
//! dispatcher.dispatch(event);
//! ```

pub mod dispatcher;
pub mod http_client;
pub mod referrer;
