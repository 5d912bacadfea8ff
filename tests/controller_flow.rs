//! 계산/초기화 이벤트에 따른 상태 전이와 화면 알림 검증.
use emi_calculator::controller::{
    CalculatorController, CalculatorView, ResultState, INVALID_INPUT_MESSAGE,
};
use emi_calculator::format::ResultLines;
use emi_calculator::visualization::VisualizationState;

#[derive(Default)]
struct RecordingView {
    results: Vec<ResultLines>,
    errors: Vec<String>,
    charts: Vec<VisualizationState>,
}

impl CalculatorView for RecordingView {
    fn show_results(&mut self, lines: &ResultLines) {
        self.results.push(lines.clone());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn render_visualization(&mut self, state: &VisualizationState) {
        self.charts.push(*state);
    }
}

#[test]
fn successful_calculate_populates_state() {
    let mut ctl = CalculatorController::default();
    let mut view = RecordingView::default();
    let res = ctl
        .on_calculate("1000000", "10", "10", &mut view)
        .expect("valid");

    assert_eq!(ctl.state().result(), Some(&res));
    let viz = ctl.state().visualization();
    assert_eq!(viz.principal, 1_000_000.0);
    assert_eq!(viz.interest, res.total_interest);

    let lines = view.results.last().expect("lines");
    assert_eq!(lines.monthly_emi, "Monthly EMI: ₹ 13,215.07");
    assert!(lines.total_payment.starts_with("Total Payment: ₹ 1,585,808."));
    assert_eq!(view.charts, vec![viz]);
    assert!(view.errors.is_empty());
}

#[test]
fn invalid_text_keeps_previous_result() {
    let mut ctl = CalculatorController::default();
    let mut view = RecordingView::default();
    ctl.on_calculate("120000", "0", "1", &mut view).expect("valid");
    let before = *ctl.state();

    assert!(ctl.on_calculate("abc", "10", "5", &mut view).is_err());

    assert_eq!(*ctl.state(), before);
    assert_eq!(view.errors, vec![INVALID_INPUT_MESSAGE.to_string()]);
    // 실패한 시도는 라벨/그래프 알림을 보내지 않는다.
    assert_eq!(view.results.len(), 1);
    assert_eq!(view.charts.len(), 1);
}

#[test]
fn each_failed_attempt_signals_once() {
    let mut ctl = CalculatorController::default();
    let mut view = RecordingView::default();
    for raw in [("", "", ""), ("1000", "-1", "5"), ("1000", "5", "0")] {
        let _ = ctl.on_calculate(raw.0, raw.1, raw.2, &mut view);
    }
    assert_eq!(view.errors.len(), 3);
    assert_eq!(*ctl.state(), ResultState::Empty);
}

#[test]
fn clear_after_populated_resets_everything() {
    let mut ctl = CalculatorController::default();
    let mut view = RecordingView::default();
    ctl.on_calculate("500000", "9", "15", &mut view).expect("valid");
    ctl.on_clear(&mut view);

    assert_eq!(*ctl.state(), ResultState::Empty);
    assert_eq!(view.charts.last(), Some(&VisualizationState::new(0.0, 0.0)));
    let lines = view.results.last().expect("placeholder");
    assert_eq!(lines.monthly_emi, "Monthly EMI: ₹ --");
    assert_eq!(lines.total_interest, "Total Interest: ₹ --");
    assert_eq!(lines.total_payment, "Total Payment: ₹ --");
}

#[test]
fn clear_from_empty_still_signals_placeholders() {
    let mut ctl = CalculatorController::default();
    let mut view = RecordingView::default();
    ctl.on_clear(&mut view);
    assert_eq!(view.results.len(), 1);
    assert!(view.charts[0].is_empty());
}

#[test]
fn recalculate_replaces_values() {
    let mut ctl = CalculatorController::default();
    let mut view = RecordingView::default();
    ctl.on_calculate("100000", "12", "1", &mut view).expect("first");
    let second = ctl.on_calculate("200000", "6", "2", &mut view).expect("second");
    assert_eq!(ctl.state().result(), Some(&second));
    assert_eq!(ctl.state().visualization().principal, 200_000.0);
}

#[test]
fn chart_proportions_four_to_one() {
    let seg = VisualizationState::new(800_000.0, 200_000.0)
        .segments(600.0)
        .expect("segments");
    assert!((seg.principal_width + seg.interest_width - 600.0).abs() < 1e-9);
    assert!((seg.principal_width / seg.interest_width - 4.0).abs() < 1e-9);
}
