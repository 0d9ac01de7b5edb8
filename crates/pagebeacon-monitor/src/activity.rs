//! 활동 추적기.
//!
//! 스크롤/마우스 이동으로 활동 플래그를 세우고 스크롤 깊이(%)를 기록한다.
//! 주기 보고 시 플래그를 내리며, 보고 주기당 최대 1건으로 디바운스된다.

use pagebeacon_core::models::page::ScrollPosition;
use parking_lot::Mutex;
use tracing::trace;

/// 스크롤 깊이 (%) 계산
///
/// `scroll_y / scroll_height * 100`을 반올림하며, 절반은 양의 방향으로 올린다
/// (-0.5 → 0, -1.5 → -1). 문서 높이가 0 이하이거나 값이 유한하지 않으면 0.
pub fn scroll_percent(position: ScrollPosition) -> i64 {
    if position.scroll_height <= 0.0 {
        return 0;
    }
    let perc = (position.scroll_y / position.scroll_height * 100.0 + 0.5).floor();
    if perc.is_finite() {
        perc as i64
    } else {
        0
    }
}

#[derive(Debug, Default)]
struct ActivityState {
    had_activity: bool,
    scroll_perc: i64,
}

/// 활동 추적기: 활동 플래그 + 스크롤 비율
///
/// 플래그와 비율은 하나의 락으로 묶여 보고 스냅샷이 항상 일관된다.
#[derive(Debug, Default)]
pub struct ActivityTracker {
    state: Mutex<ActivityState>,
}

impl ActivityTracker {
    /// 새 추적기 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 마우스 이동 기록
    pub fn record_mouse_move(&self) {
        self.state.lock().had_activity = true;
    }

    /// 스크롤 기록
    ///
    /// 비율이 이전 값과 다를 때만 저장하며, 변경 여부를 반환한다.
    pub fn record_scroll(&self, position: ScrollPosition) -> bool {
        let perc = scroll_percent(position);
        let mut state = self.state.lock();
        state.had_activity = true;
        if perc != state.scroll_perc {
            trace!("스크롤 비율 변경: {} → {perc}", state.scroll_perc);
            state.scroll_perc = perc;
            true
        } else {
            false
        }
    }

    /// 보고할 활동이 있으면 스크롤 비율을 반환하고 플래그를 내린다
    pub fn take_report(&self) -> Option<i64> {
        let mut state = self.state.lock();
        if state.had_activity {
            state.had_activity = false;
            Some(state.scroll_perc)
        } else {
            None
        }
    }

    /// 마지막 보고 이후 활동 여부
    pub fn had_activity(&self) -> bool {
        self.state.lock().had_activity
    }

    /// 현재 저장된 스크롤 비율
    pub fn scroll_perc(&self) -> i64 {
        self.state.lock().scroll_perc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(scroll_y: f64, scroll_height: f64) -> ScrollPosition {
        ScrollPosition {
            scroll_y,
            scroll_height,
        }
    }

    #[test]
    fn percent_is_rounded() {
        assert_eq!(scroll_percent(pos(0.0, 1000.0)), 0);
        assert_eq!(scroll_percent(pos(333.0, 1000.0)), 33);
        assert_eq!(scroll_percent(pos(336.0, 1000.0)), 34);
        assert_eq!(scroll_percent(pos(1000.0, 1000.0)), 100);
    }

    #[test]
    fn half_rounds_toward_positive_infinity() {
        assert_eq!(scroll_percent(pos(25.0, 1000.0)), 3);
        assert_eq!(scroll_percent(pos(-5.0, 1000.0)), 0);
        assert_eq!(scroll_percent(pos(-6.0, 1000.0)), -1);
        assert_eq!(scroll_percent(pos(-15.0, 1000.0)), -1);
    }

    #[test]
    fn zero_height_is_zero_percent() {
        assert_eq!(scroll_percent(pos(120.0, 0.0)), 0);
    }

    #[test]
    fn new_tracker_has_nothing_to_report() {
        let tracker = ActivityTracker::new();
        assert!(!tracker.had_activity());
        assert_eq!(tracker.take_report(), None);
    }

    #[test]
    fn mouse_move_flags_activity() {
        let tracker = ActivityTracker::new();
        tracker.record_mouse_move();
        assert!(tracker.had_activity());
        assert_eq!(tracker.take_report(), Some(0));
        assert!(!tracker.had_activity());
    }

    #[test]
    fn scroll_updates_only_on_change() {
        let tracker = ActivityTracker::new();
        assert!(tracker.record_scroll(pos(500.0, 1000.0)));
        assert!(!tracker.record_scroll(pos(502.0, 1000.0)));
        assert_eq!(tracker.scroll_perc(), 50);
        assert!(tracker.record_scroll(pos(100.0, 1000.0)));
        assert_eq!(tracker.scroll_perc(), 10);
    }

    #[test]
    fn report_is_debounced_per_tick() {
        let tracker = ActivityTracker::new();
        for y in [100.0, 200.0, 300.0] {
            tracker.record_scroll(pos(y, 1000.0));
            tracker.record_mouse_move();
        }

        assert_eq!(tracker.take_report(), Some(30));
        assert!(!tracker.had_activity());
        assert_eq!(tracker.take_report(), None);
    }

    #[test]
    fn scroll_perc_survives_report() {
        let tracker = ActivityTracker::new();
        tracker.record_scroll(pos(750.0, 1000.0));
        let _ = tracker.take_report();

        tracker.record_mouse_move();
        assert_eq!(tracker.take_report(), Some(75));
    }
}
