//! 내비게이션 타이밍 관찰자.
//!
//! 첫 번째 duration > 0 엔트리에서 로드 시간을 꺼내고 스스로 연결을 끊는다.
//! 페이지 수명 동안 페이지뷰는 최대 1회.

use pagebeacon_core::models::page::NavigationEntry;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// 1회성 페이지 로드 관찰자
#[derive(Debug, Default)]
pub struct PageLoadObserver {
    disconnected: AtomicBool,
}

impl PageLoadObserver {
    /// 새 관찰자 생성 (연결 상태)
    pub fn new() -> Self {
        Self::default()
    }

    /// 엔트리 묶음 처리
    ///
    /// 아직 연결되어 있고 duration이 0이 아닌 엔트리가 있으면 그 로드 시간을
    /// 반환하고 연결을 끊는다. 동시에 호출되어도 한 번만 Some을 반환한다.
    pub fn observe(&self, entries: &[NavigationEntry]) -> Option<f64> {
        if self.is_disconnected() {
            return None;
        }

        let entry = entries.iter().find(|e| e.duration != 0.0)?;
        if self.disconnected.swap(true, Ordering::AcqRel) {
            return None;
        }

        debug!("페이지 로드 타이밍 수신: {}ms, 관찰 종료", entry.duration);
        Some(entry.duration)
    }

    /// 연결이 끊겼는지 확인
    pub fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(duration: f64) -> NavigationEntry {
        NavigationEntry {
            name: "https://example.com/".to_string(),
            duration,
        }
    }

    #[test]
    fn zero_duration_entries_are_skipped() {
        let observer = PageLoadObserver::new();
        assert_eq!(observer.observe(&[entry(0.0)]), None);
        assert!(!observer.is_disconnected());
    }

    #[test]
    fn first_nonzero_entry_disconnects() {
        let observer = PageLoadObserver::new();
        assert_eq!(observer.observe(&[entry(0.0), entry(420.0)]), Some(420.0));
        assert!(observer.is_disconnected());
        assert_eq!(observer.observe(&[entry(510.0)]), None);
    }

    #[test]
    fn multiple_entries_in_one_delivery_yield_once() {
        let observer = PageLoadObserver::new();
        assert_eq!(observer.observe(&[entry(100.0), entry(200.0)]), Some(100.0));
        assert_eq!(observer.observe(&[entry(100.0), entry(200.0)]), None);
    }

    #[test]
    fn concurrent_observers_yield_once() {
        let observer = std::sync::Arc::new(PageLoadObserver::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let observer = observer.clone();
                std::thread::spawn(move || observer.observe(&[entry(300.0)]))
            })
            .collect();

        let hits = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .count();
        assert_eq!(hits, 1);
    }
}
