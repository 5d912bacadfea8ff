//! 계산/초기화 이벤트를 받아 결과 상태를 갱신하고 화면 협력자에게 알린다.

use crate::emi::{self, EmiError, EmiResult};
use crate::format::{ResultFormatter, ResultLines};
use crate::visualization::VisualizationState;

/// 입력 오류 시 사용자에게 보여줄 일반 메시지.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter valid numbers.";

/// 컨트롤러가 갱신을 알리는 화면 측 인터페이스.
pub trait CalculatorView {
    /// 결과 라벨 세 줄을 표시한다.
    fn show_results(&mut self, lines: &ResultLines);
    /// 입력 오류 알림.
    fn show_error(&mut self, message: &str);
    /// 막대 그래프 상태 갱신.
    fn render_visualization(&mut self, state: &VisualizationState);
}

/// 결과 상태. 결과와 그래프 값은 항상 한 번에 교체된다.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResultState {
    #[default]
    Empty,
    Populated {
        result: EmiResult,
        visualization: VisualizationState,
    },
}

impl ResultState {
    pub fn result(&self) -> Option<&EmiResult> {
        match self {
            ResultState::Empty => None,
            ResultState::Populated { result, .. } => Some(result),
        }
    }

    pub fn visualization(&self) -> VisualizationState {
        match self {
            ResultState::Empty => VisualizationState::default(),
            ResultState::Populated { visualization, .. } => *visualization,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CalculatorController {
    state: ResultState,
    formatter: ResultFormatter,
    error_message: Option<String>,
}

impl CalculatorController {
    pub fn new(formatter: ResultFormatter) -> Self {
        Self {
            state: ResultState::Empty,
            formatter,
            error_message: None,
        }
    }

    /// 오류 알림 문구를 바꾼다(번역용). None이면 기본 영어 문구.
    pub fn with_error_message(mut self, message: Option<String>) -> Self {
        self.error_message = message;
        self
    }

    pub fn set_error_message(&mut self, message: Option<String>) {
        self.error_message = message;
    }

    pub fn state(&self) -> &ResultState {
        &self.state
    }

    pub fn formatter(&self) -> &ResultFormatter {
        &self.formatter
    }

    /// 포매터를 교체하고 현재 상태의 라벨을 다시 그린다.
    pub fn set_formatter(&mut self, formatter: ResultFormatter, view: &mut impl CalculatorView) {
        self.formatter = formatter;
        view.show_results(&self.display_lines());
    }

    /// 현재 상태의 표시 문자열.
    pub fn display_lines(&self) -> ResultLines {
        match &self.state {
            ResultState::Empty => self.formatter.placeholder_lines(),
            ResultState::Populated { result, .. } => self.formatter.lines(result),
        }
    }

    /// "계산" 동작. 실패하면 상태를 건드리지 않고 일반 오류 메시지를 한 번 알린다.
    pub fn on_calculate(
        &mut self,
        raw_principal: &str,
        raw_rate: &str,
        raw_tenure: &str,
        view: &mut impl CalculatorView,
    ) -> Result<EmiResult, EmiError> {
        let outcome = emi::parse_loan_input(raw_principal, raw_rate, raw_tenure)
            .and_then(|input| emi::compute_emi(&input).map(|result| (input, result)));

        match outcome {
            Ok((input, result)) => {
                let visualization = VisualizationState::new(input.principal, result.total_interest);
                self.state = ResultState::Populated {
                    result,
                    visualization,
                };
                tracing::debug!(
                    principal = input.principal,
                    annual_rate = input.annual_rate_percent,
                    tenure_years = input.tenure_years,
                    monthly_emi = result.monthly_emi,
                    "emi calculated"
                );
                view.show_results(&self.formatter.lines(&result));
                view.render_visualization(&visualization);
                Ok(result)
            }
            Err(err) => {
                tracing::debug!(field = %err.field(), "rejected loan input");
                view.show_error(self.error_message.as_deref().unwrap_or(INVALID_INPUT_MESSAGE));
                Err(err)
            }
        }
    }

    /// "초기화" 동작. 이전 상태와 관계없이 Empty로 돌린다.
    pub fn on_clear(&mut self, view: &mut impl CalculatorView) {
        self.state = ResultState::Empty;
        tracing::debug!("result cleared");
        view.show_results(&self.formatter.placeholder_lines());
        view.render_visualization(&VisualizationState::default());
    }
}
