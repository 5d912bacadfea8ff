//! 결과 표시 문자열을 만든다. 반올림은 여기서만 한다.

use crate::emi::EmiResult;

/// 결과 필드 라벨. 번역기에서 채우거나 기본 영어 라벨을 쓴다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLabels {
    pub monthly_emi: String,
    pub total_interest: String,
    pub total_payment: String,
}

impl Default for ResultLabels {
    fn default() -> Self {
        Self {
            monthly_emi: "Monthly EMI".into(),
            total_interest: "Total Interest".into(),
            total_payment: "Total Payment".into(),
        }
    }
}

/// 화면에 표시할 세 줄.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLines {
    pub monthly_emi: String,
    pub total_interest: String,
    pub total_payment: String,
}

impl ResultLines {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            self.monthly_emi.as_str(),
            self.total_interest.as_str(),
            self.total_payment.as_str(),
        ]
        .into_iter()
    }
}

/// 통화 기호와 천 단위 구분 여부를 가진 포매터.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFormatter {
    pub currency_symbol: String,
    pub group_thousands: bool,
    pub labels: ResultLabels,
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".into(),
            group_thousands: true,
            labels: ResultLabels::default(),
        }
    }
}

impl ResultFormatter {
    /// `"<라벨>: <기호> <금액>"` 세 줄을 만든다.
    pub fn lines(&self, result: &EmiResult) -> ResultLines {
        ResultLines {
            monthly_emi: self.line(&self.labels.monthly_emi, result.monthly_emi),
            total_interest: self.line(&self.labels.total_interest, result.total_interest),
            total_payment: self.line(&self.labels.total_payment, result.total_payment),
        }
    }

    /// 초기/초기화 상태의 `"<라벨>: <기호> --"` 세 줄.
    pub fn placeholder_lines(&self) -> ResultLines {
        let sym = &self.currency_symbol;
        ResultLines {
            monthly_emi: format!("{}: {sym} --", self.labels.monthly_emi),
            total_interest: format!("{}: {sym} --", self.labels.total_interest),
            total_payment: format!("{}: {sym} --", self.labels.total_payment),
        }
    }

    /// 소수 둘째 자리 금액 문자열.
    pub fn amount(&self, value: f64) -> String {
        format_amount(value, self.group_thousands)
    }

    /// 막대 캡션용 정수부 금액 (`₹800000`).
    pub fn whole_amount(&self, value: f64) -> String {
        format!("{}{}", self.currency_symbol, value.trunc() as i64)
    }

    fn line(&self, label: &str, value: f64) -> String {
        format!("{label}: {} {}", self.currency_symbol, self.amount(value))
    }
}

/// `#,##0.00` 형식. 0으로 반올림되는 음수는 `-0.00` 대신 `0.00`으로 표시한다.
pub fn format_amount(value: f64, group_thousands: bool) -> String {
    let fixed = format!("{value:.2}");
    let (negative, digits) = match fixed.strip_prefix('-') {
        Some(rest) => (rest.bytes().any(|b| matches!(b, b'1'..=b'9')), rest),
        None => (false, fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));
    let int_part = if group_thousands {
        group_digits(int_part)
    } else {
        int_part.to_string()
    };
    let sign = if negative { "-" } else { "" };
    format!("{sign}{int_part}.{frac_part}")
}

fn group_digits(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(1_585_808.4, true), "1,585,808.40");
        assert_eq!(format_amount(999.999, true), "1,000.00");
        assert_eq!(format_amount(12.5, true), "12.50");
        assert_eq!(format_amount(1_585_808.4, false), "1585808.40");
    }

    #[test]
    fn negative_zero_is_suppressed() {
        assert_eq!(format_amount(-1.4e-11, true), "0.00");
        assert_eq!(format_amount(-0.0, true), "0.00");
        assert_eq!(format_amount(-1234.5, true), "-1,234.50");
    }

    #[test]
    fn lines_use_symbol_and_labels() {
        let fmt = ResultFormatter::default();
        let lines = fmt.lines(&EmiResult {
            monthly_emi: 10_000.0,
            total_interest: 0.0,
            total_payment: 120_000.0,
        });
        assert_eq!(lines.monthly_emi, "Monthly EMI: ₹ 10,000.00");
        assert_eq!(lines.total_interest, "Total Interest: ₹ 0.00");
        assert_eq!(lines.total_payment, "Total Payment: ₹ 120,000.00");

        let empty = fmt.placeholder_lines();
        assert_eq!(
            empty.iter().collect::<Vec<_>>(),
            vec![
                "Monthly EMI: ₹ --",
                "Total Interest: ₹ --",
                "Total Payment: ₹ --"
            ]
        );
    }

    #[test]
    fn whole_amount_truncates() {
        let fmt = ResultFormatter::default();
        assert_eq!(fmt.whole_amount(585_808.99), "₹585808");
    }
}
