//! HTTP 메트릭 전송.
//!
//! `MetricTransport` 포트 구현. 이벤트 1건을 JSON 본문으로 POST한다.
//! 인증 헤더, 압축, 재시도 없음.

use async_trait::async_trait;
use pagebeacon_core::error::CoreError;
use pagebeacon_core::models::event::MetricEvent;
use pagebeacon_core::ports::transport::MetricTransport;
use reqwest::header::REFERER;
use std::time::Duration;
use tracing::debug;

use crate::referrer::referrer_for;

/// HTTP 전송: `MetricTransport` 포트 구현
pub struct HttpMetricTransport {
    client: reqwest::Client,
    /// 리퍼러 계산에 쓰는 페이지 URL
    page_url: Option<String>,
}

impl HttpMetricTransport {
    /// 새 HTTP 전송 생성
    pub fn new(timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            page_url: None,
        })
    }

    /// 리퍼러로 보낼 페이지 URL 설정
    pub fn with_page_url(mut self, page_url: &str) -> Self {
        self.page_url = Some(page_url.to_string());
        self
    }
}

#[async_trait]
impl MetricTransport for HttpMetricTransport {
    async fn deliver(&self, target: &str, event: &MetricEvent) -> Result<(), CoreError> {
        let mut req = self.client.post(target).json(event);

        if let Some(referrer) = self
            .page_url
            .as_deref()
            .and_then(|page| referrer_for(page, target))
        {
            req = req.header(REFERER, referrer);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("메트릭 POST 실패: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        debug!("메트릭 전송 완료: {} → {target}", event.kind().unwrap_or("-"));
        Ok(())
    }
}
