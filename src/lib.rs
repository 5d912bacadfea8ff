//! EMI 계산 핵심 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 컨트롤러를 쓴다.

pub mod app;
pub mod config;
pub mod controller;
pub mod emi;
pub mod format;
pub mod i18n;
pub mod ui_cli;
pub mod visualization;

/// `RUST_LOG`를 따르는 로그 구독자를 설치한다. 기본 레벨은 info.
/// 로그는 stderr로 보내 stdout의 계산 결과와 섞이지 않게 한다.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // 테스트 등에서 이미 설치된 경우는 무시한다.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
