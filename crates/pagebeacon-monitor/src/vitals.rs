//! 웹 바이탈 구독.
//!
//! CLS/FID/LCP 콜백만 받아들인다. 구독이 꺼져 있으면 모두 무시한다.

use pagebeacon_core::models::vitals::{VitalMetric, VitalName};
use std::collections::HashSet;
use tracing::trace;

/// 바이탈 콜백 구독 상태
#[derive(Debug, Clone)]
pub struct VitalsSubscription {
    subscribed: HashSet<VitalName>,
}

impl VitalsSubscription {
    /// CLS, FID, LCP 구독
    pub fn standard() -> Self {
        Self {
            subscribed: VitalName::ALL.into_iter().collect(),
        }
    }

    /// 구독 없음
    pub fn none() -> Self {
        Self {
            subscribed: HashSet::new(),
        }
    }

    /// 설정 플래그에 따라 생성
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::standard()
        } else {
            Self::none()
        }
    }

    /// 콜백 수락 여부
    pub fn accepts(&self, metric: &VitalMetric) -> bool {
        let accepted = self.subscribed.contains(&metric.name);
        if !accepted {
            trace!("구독하지 않은 바이탈 무시: {}", metric.name.as_str());
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(name: VitalName) -> VitalMetric {
        VitalMetric {
            name,
            value: 1.0,
            id: String::new(),
            navigation_type: "navigate".to_string(),
        }
    }

    #[test]
    fn standard_accepts_all_three() {
        let sub = VitalsSubscription::standard();
        for name in VitalName::ALL {
            assert!(sub.accepts(&metric(name)));
        }
    }

    #[test]
    fn disabled_accepts_nothing() {
        let sub = VitalsSubscription::from_enabled(false);
        assert!(!sub.accepts(&metric(VitalName::Lcp)));
    }
}
