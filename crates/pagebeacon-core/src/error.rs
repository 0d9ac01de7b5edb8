//! PageBeacon 핵심 에러 타입.
//!
//! 전송/설정 레이어에서만 사용된다. `send_metric`은 에러를 호출자에게 돌려주지 않는다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 수집 엔드포인트가 2xx 이외의 상태를 반환
    #[error("HTTP {status}: {reason}")]
    Http {
        /// 상태 코드
        status: u16,
        /// 상태 문구 (예: "Service Unavailable")
        reason: String,
    },
}
