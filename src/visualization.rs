//! 원금 대 이자 비율 막대 그래프의 기하 계산.

/// 그래프가 읽는 상태. (0, 0)은 "그릴 것 없음".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisualizationState {
    pub principal: f64,
    pub interest: f64,
}

/// 두 구간의 너비.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSegments {
    pub principal_width: f64,
    pub interest_width: f64,
}

impl VisualizationState {
    pub fn new(principal: f64, interest: f64) -> Self {
        Self {
            principal,
            interest,
        }
    }

    /// 초기/초기화 상태인지.
    pub fn is_empty(&self) -> bool {
        self.principal == 0.0 && self.interest == 0.0
    }

    /// 전체 너비 `width`를 원금/이자 비율로 나눈다. 빈 상태면 None.
    /// 0 이율에서 생기는 미세한 음수 이자는 0으로 본다.
    pub fn segments(&self, width: f64) -> Option<BarSegments> {
        if self.is_empty() || !(width > 0.0) {
            return None;
        }
        let principal = clamp_non_negative(self.principal);
        let interest = clamp_non_negative(self.interest);
        let total = principal + interest;
        if !(total > 0.0) || !total.is_finite() {
            return None;
        }
        Some(BarSegments {
            principal_width: width * (principal / total),
            interest_width: width * (interest / total),
        })
    }
}

fn clamp_non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// 텍스트 막대. 원금은 `#`, 이자는 `=`로 채운다.
pub fn text_bar(state: &VisualizationState, columns: usize) -> Option<String> {
    let seg = state.segments(columns as f64)?;
    let principal_cols = (seg.principal_width.round() as usize).min(columns);
    let interest_cols = columns - principal_cols;
    let mut bar = String::with_capacity(columns + 2);
    bar.push('[');
    bar.extend(std::iter::repeat('#').take(principal_cols));
    bar.extend(std::iter::repeat('=').take(interest_cols));
    bar.push(']');
    Some(bar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_draws_nothing() {
        let state = VisualizationState::default();
        assert!(state.is_empty());
        assert_eq!(state.segments(600.0), None);
        assert_eq!(text_bar(&state, 40), None);
    }

    #[test]
    fn four_to_one_split() {
        let seg = VisualizationState::new(800_000.0, 200_000.0)
            .segments(500.0)
            .expect("segments");
        assert!((seg.principal_width + seg.interest_width - 500.0).abs() < 1e-9);
        assert!((seg.principal_width / seg.interest_width - 4.0).abs() < 1e-9);
    }

    #[test]
    fn negative_residue_interest_is_clamped() {
        let seg = VisualizationState::new(120_000.0, -1e-11)
            .segments(100.0)
            .expect("segments");
        assert_eq!(seg.principal_width, 100.0);
        assert_eq!(seg.interest_width, 0.0);
    }

    #[test]
    fn text_bar_fills_all_columns() {
        let bar = text_bar(&VisualizationState::new(800_000.0, 200_000.0), 10).expect("bar");
        assert_eq!(bar, "[########==]");
    }
}
