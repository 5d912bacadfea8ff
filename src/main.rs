use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use emi_calculator::{app, config, init_tracing, ui_cli};

/// EMI 계산기 CLI. 세 값을 모두 주면 한 번 계산하고, 아니면 대화형 메뉴를 띄운다.
#[derive(Debug, Parser)]
#[command(name = "emi_calculator_cli", version, about = "Loan EMI calculator")]
struct Args {
    /// 대출 원금
    #[arg(long, allow_hyphen_values = true, requires_all = ["rate", "tenure"])]
    principal: Option<String>,
    /// 연이율 [%]
    #[arg(long, allow_hyphen_values = true, requires_all = ["principal", "tenure"])]
    rate: Option<String>,
    /// 상환 기간 [년]
    #[arg(long, allow_hyphen_values = true, requires_all = ["principal", "rate"])]
    tenure: Option<String>,
    /// 언어 코드 (auto/en/ko)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    init_tracing();
    match try_run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(app::AppError::Emi(err)) => {
            tracing::debug!("one-shot calculation failed: {err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(args: Args) -> Result<(), app::AppError> {
    let mut cfg = config::load_from(&args.config)?;
    match (&args.principal, &args.rate, &args.tenure) {
        (Some(p), Some(r), Some(t)) => {
            let tr = ui_cli::translator_for(&cfg, &args.lang);
            app::run_once(&cfg, &tr, [p.as_str(), r.as_str(), t.as_str()], std::io::stdout())
        }
        _ => app::run(&mut cfg, &args.config, &args.lang, &mut std::io::stdin().lock()),
    }
}
