//! 리퍼러 결정.
//!
//! 요청에 실을 `Referer` 헤더 값을 페이지 URL과 대상 URL로부터 결정한다.
//! https 페이지에서 http 대상으로 보낼 때만 생략한다.

use url::Url;

/// `Referer` 헤더 값 결정
///
/// 페이지 URL의 fragment와 사용자 정보는 제거한다.
/// http(s)가 아닌 페이지, 파싱 불가 URL은 리퍼러 없음.
pub fn referrer_for(page_url: &str, target_url: &str) -> Option<String> {
    let mut page = Url::parse(page_url).ok()?;
    if !matches!(page.scheme(), "http" | "https") {
        return None;
    }

    let target = Url::parse(target_url).ok()?;
    if page.scheme() == "https" && target.scheme() == "http" {
        return None;
    }

    page.set_fragment(None);
    // http(s) URL에서는 실패하지 않는다
    let _ = page.set_username("");
    let _ = page.set_password(None);
    Some(page.into())
}
