//! 메트릭 전송 포트.
//!
//! 구현: `pagebeacon-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::event::MetricEvent;

/// 이벤트 1건을 수집 엔드포인트로 보내는 전송 계층
///
/// 재시도하지 않는다. 실패는 그대로 반환하고 로그 처리는 호출자가 한다.
#[async_trait]
pub trait MetricTransport: Send + Sync {
    /// `target`으로 이벤트 1건 POST
    async fn deliver(&self, target: &str, event: &MetricEvent) -> Result<(), CoreError>;
}
