//! 세션 모델.
//!
//! 페이지 로드 1회당 한 번 생성되는 불투명 세션 토큰.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 세션 토큰 길이 (base36 문자 수)
pub const SESSION_ID_LEN: usize = 10;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 세션 식별자: 같은 페이지 로드에서 나온 모든 이벤트를 묶는다.
///
/// 생성 후 불변이며 디스크에 저장되지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// 새 랜덤 세션 ID 생성 (소문자 base36, 10자)
    pub fn generate() -> Self {
        let mut n = Uuid::new_v4().as_u128();
        let mut token = String::with_capacity(SESSION_ID_LEN);
        for _ in 0..SESSION_ID_LEN {
            token.push(BASE36_DIGITS[(n % 36) as usize] as char);
            n /= 36;
        }
        Self(token)
    }

    /// 문자열 슬라이스로 조회
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
