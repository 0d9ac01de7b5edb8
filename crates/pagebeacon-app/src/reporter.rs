//! 주기적 활동 보고 타이머.
//!
//! 설정 후 한 주기가 지난 시점부터 매 주기마다 클라이언트의 활동 보고를
//! 호출한다. 종료 신호를 받거나 클라이언트가 사라지면 멈춘다.

use std::sync::Weak;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::client::MetricsClient;

/// 활동 보고 루프 시작
///
/// 비동기 런타임 밖에서 호출되거나, 주기가 너무 길어 첫 틱 시각을 표현할 수
/// 없으면 타이머 없이 None을 반환한다.
pub fn spawn_activity_reporter(
    client: Weak<MetricsClient>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Option<JoinHandle<()>> {
    let handle = match Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => {
            warn!("비동기 런타임 없음, 활동 보고 타이머 비활성");
            return None;
        }
    };

    // 두 번째 틱 시각까지 Instant 범위 안이어야 tokio interval이 패닉하지 않는다
    let Some(start) = Instant::now()
        .checked_add(period)
        .filter(|first| first.checked_add(period).is_some())
    else {
        warn!(
            "보고 주기가 너무 김 ({}초), 활동 보고 타이머 비활성",
            period.as_secs()
        );
        return None;
    };

    Some(handle.spawn(async move {
        let mut interval = interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!("활동 보고 루프 시작: {}초 주기", period.as_secs());

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let Some(client) = client.upgrade() else {
                        debug!("클라이언트 해제됨, 활동 보고 루프 종료");
                        break;
                    };
                    client.report_activity();
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("활동 보고 루프 종료");
                        break;
                    }
                }
            }
        }
    }))
}
