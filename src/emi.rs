//! 원리금 균등상환(EMI) 계산 엔진. UI/입출력 의존성이 없는 순수 함수만 둔다.

/// 입력 필드 식별자. 어느 값이 검증에 실패했는지 전달한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanField {
    Principal,
    AnnualRate,
    Tenure,
}

impl std::fmt::Display for LoanField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LoanField::Principal => "principal",
            LoanField::AnnualRate => "annual rate",
            LoanField::Tenure => "tenure",
        };
        f.write_str(name)
    }
}

/// EMI 계산 오류. 입력 오류 한 종류뿐이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmiError {
    /// 숫자 형식이 아니거나 허용 범위를 벗어난 입력
    #[error("invalid input: {0}")]
    InvalidInput(LoanField),
}

impl EmiError {
    /// 실패한 입력 필드.
    pub fn field(&self) -> LoanField {
        match self {
            EmiError::InvalidInput(field) => *field,
        }
    }
}

/// 대출 조건 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanInput {
    /// 원금
    pub principal: f64,
    /// 연이율 [%]
    pub annual_rate_percent: f64,
    /// 상환 기간 [년]
    pub tenure_years: u32,
}

/// EMI 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmiResult {
    /// 월 상환액
    pub monthly_emi: f64,
    /// 총 이자
    pub total_interest: f64,
    /// 총 상환액
    pub total_payment: f64,
}

impl LoanInput {
    /// 총 상환 개월 수. 범위를 넘으면 None.
    pub fn tenure_months(&self) -> Option<u32> {
        self.tenure_years.checked_mul(12)
    }

    /// 월 이율(소수). 연이율 % / 1200.
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / (12.0 * 100.0)
    }

    fn validate(&self) -> Result<u32, EmiError> {
        if !(self.principal.is_finite() && self.principal > 0.0) {
            return Err(EmiError::InvalidInput(LoanField::Principal));
        }
        if !(self.annual_rate_percent.is_finite() && self.annual_rate_percent >= 0.0) {
            return Err(EmiError::InvalidInput(LoanField::AnnualRate));
        }
        match self.tenure_months() {
            Some(n) if n > 0 => Ok(n),
            _ => Err(EmiError::InvalidInput(LoanField::Tenure)),
        }
    }
}

/// 검증된 입력으로 EMI, 총 이자, 총 상환액을 계산한다.
///
/// - r > 0: EMI = P·r·(1+r)^n / ((1+r)^n − 1)
/// - r = 0: EMI = P / n (무이자 대출, 일반식은 0/0)
pub fn compute_emi(input: &LoanInput) -> Result<EmiResult, EmiError> {
    let months = input.validate()?;
    let n = f64::from(months);
    let r = input.monthly_rate();

    let monthly_emi = if r > 0.0 {
        // (1+r)^n / ((1+r)^n - 1) == 1 / (1 - (1+r)^-n); n이 커도 inf/inf가 되지 않는다.
        let discount = -(-n * r.ln_1p()).exp_m1();
        input.principal * r / discount
    } else {
        input.principal / n
    };
    let total_payment = monthly_emi * n;
    let total_interest = total_payment - input.principal;

    if !(monthly_emi.is_finite() && total_payment.is_finite() && total_interest.is_finite()) {
        return Err(EmiError::InvalidInput(LoanField::Principal));
    }
    Ok(EmiResult {
        monthly_emi,
        total_interest,
        total_payment,
    })
}

/// 원시 숫자 값으로 EMI를 계산한다. 기간은 정수 년이며 0 이하이면 오류.
pub fn compute(
    principal: f64,
    annual_rate_percent: f64,
    tenure_years: i64,
) -> Result<EmiResult, EmiError> {
    let tenure_years = u32::try_from(tenure_years)
        .map_err(|_| EmiError::InvalidInput(LoanField::Tenure))?;
    compute_emi(&LoanInput {
        principal,
        annual_rate_percent,
        tenure_years,
    })
}

/// 텍스트 입력 세 개를 LoanInput으로 변환한다.
/// 원금/이율은 실수, 기간은 정수로 해석하며 앞뒤 공백은 무시한다.
pub fn parse_loan_input(
    raw_principal: &str,
    raw_rate: &str,
    raw_tenure: &str,
) -> Result<LoanInput, EmiError> {
    let principal = parse_real(raw_principal, LoanField::Principal)?;
    let annual_rate_percent = parse_real(raw_rate, LoanField::AnnualRate)?;
    let tenure = raw_tenure
        .trim()
        .parse::<i64>()
        .map_err(|_| EmiError::InvalidInput(LoanField::Tenure))?;
    let tenure_years =
        u32::try_from(tenure).map_err(|_| EmiError::InvalidInput(LoanField::Tenure))?;

    let input = LoanInput {
        principal,
        annual_rate_percent,
        tenure_years,
    };
    input.validate()?;
    Ok(input)
}

fn parse_real(raw: &str, field: LoanField) -> Result<f64, EmiError> {
    match raw.trim().parse::<f64>() {
        // "NaN", "inf" 등은 f64 파서가 받아들이지만 금액으로는 무효다.
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(EmiError::InvalidInput(field)),
    }
}
