//! EMI 계산식 회귀 테스트. 알려진 대출 사례 값과 항등식을 확인한다.
use emi_calculator::emi::{compute, compute_emi, LoanInput};
use proptest::prelude::*;

fn assert_close(label: &str, actual: f64, expected: f64, abs_tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= abs_tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {abs_tol})"
    );
}

#[test]
fn zero_rate_loan() {
    let res = compute(120_000.0, 0.0, 1).expect("zero rate");
    assert_close("emi", res.monthly_emi, 10_000.0, 1e-9);
    assert_close("interest", res.total_interest, 0.0, 1e-9);
    assert_close("payment", res.total_payment, 120_000.0, 1e-9);
}

#[test]
fn ten_lakh_at_ten_percent_for_ten_years() {
    // r = 10/1200, n = 120
    let res = compute(1_000_000.0, 10.0, 10).expect("standard");
    assert_close("emi", res.monthly_emi, 13_215.07, 0.01);
    assert_close("payment", res.total_payment, 1_585_808.40, 1.0);
    assert_close("interest", res.total_interest, 585_808.40, 1.0);
}

#[test]
fn home_loan_reference_point() {
    // 5,000,000 @ 8.5% for 20 years -> 43,391.16 / month
    let res = compute(5_000_000.0, 8.5, 20).expect("home loan");
    assert_close("emi", res.monthly_emi, 43_391.16, 0.01);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let input = LoanInput {
        principal: 734_512.33,
        annual_rate_percent: 11.25,
        tenure_years: 7,
    };
    let a = compute_emi(&input).expect("first");
    let b = compute_emi(&input).expect("second");
    assert_eq!(a.monthly_emi.to_bits(), b.monthly_emi.to_bits());
    assert_eq!(a.total_interest.to_bits(), b.total_interest.to_bits());
    assert_eq!(a.total_payment.to_bits(), b.total_payment.to_bits());
}

proptest! {
    #[test]
    fn totals_are_consistent(
        principal in 1.0f64..1.0e9,
        rate in 0.0f64..40.0,
        years in 1i64..=40,
    ) {
        let res = compute(principal, rate, years).expect("valid input");
        let months = (years * 12) as f64;
        let rel = |a: f64, b: f64| (a - b).abs() <= 1e-6 * b.abs().max(1.0);
        prop_assert!(rel(res.total_payment, res.monthly_emi * months));
        prop_assert!(rel(res.total_interest, res.total_payment - principal));
        // 이자는 음수가 될 수 없다(부동소수 오차 제외).
        prop_assert!(res.total_interest >= -1e-6 * principal);
    }
}
