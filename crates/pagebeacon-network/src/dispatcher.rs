//! Fire-and-forget 디스패처.
//!
//! 이벤트 전송을 tokio 태스크로 분리하고 즉시 반환한다.
//! 태스크는 호출자와 디스패처보다 오래 살 수 있다 (keepalive).
//! 전송 결과는 로그로만 소비되며 호출자에게 전달되지 않는다.

use pagebeacon_core::models::event::MetricEvent;
use pagebeacon_core::ports::transport::MetricTransport;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{debug, warn};

/// 진행 중 전송 카운터
#[derive(Debug, Default)]
struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

/// 태스크 종료(정상/패닉) 시 카운터 감소
struct InFlightGuard(Arc<InFlight>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

/// 메트릭 디스패처: 보고 대상 + 전송 계층
pub struct MetricDispatcher {
    transport: Arc<dyn MetricTransport>,
    /// 보고 대상 URL (빈 문자열이면 비활성)
    target: String,
    in_flight: Arc<InFlight>,
}

impl MetricDispatcher {
    /// 새 디스패처 생성
    pub fn new(transport: Arc<dyn MetricTransport>, target: &str) -> Self {
        Self {
            transport,
            target: target.trim().to_string(),
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// 보고 대상 URL
    pub fn target(&self) -> &str {
        &self.target
    }

    /// 보고 대상이 설정되어 있는지
    pub fn is_enabled(&self) -> bool {
        !self.target.is_empty()
    }

    /// 진행 중 전송 수
    pub fn in_flight(&self) -> usize {
        self.in_flight.count.load(Ordering::Acquire)
    }

    /// 이벤트 전송 요청: 즉시 반환
    ///
    /// 보고 대상이 없으면 아무것도 하지 않는다. 비동기 런타임 밖에서
    /// 호출되면 이벤트를 버리고 경고만 남긴다.
    pub fn dispatch(&self, event: MetricEvent) {
        if !self.is_enabled() {
            return;
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(
                    "비동기 런타임 없음, 메트릭 폐기: {}",
                    event.kind().unwrap_or("-")
                );
                return;
            }
        };

        self.in_flight.count.fetch_add(1, Ordering::AcqRel);
        let guard = InFlightGuard(self.in_flight.clone());
        let transport = self.transport.clone();
        let target = self.target.clone();

        handle.spawn(async move {
            let _guard = guard;
            match transport.deliver(&target, &event).await {
                Ok(()) => debug!("메트릭 전송: {}", event.kind().unwrap_or("-")),
                Err(e) => warn!("메트릭 전송 실패 ({target}): {e}"),
            }
        });
    }

    /// 진행 중 전송이 모두 끝날 때까지 최대 `timeout` 대기
    ///
    /// 시간 안에 비워지면 true. 종료 직전 잔여 전송을 흘려보낼 때 사용한다.
    pub async fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let notified = self.in_flight.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.in_flight() == 0 {
                return true;
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return self.in_flight() == 0;
            }
        }
    }
}
