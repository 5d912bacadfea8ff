use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::controller::{CalculatorController, CalculatorView};
use crate::emi::EmiError;
use crate::i18n::{keys, Translator};
use crate::ui_cli::{self, CliView, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 대출 입력 오류
    #[error(transparent)]
    Emi(#[from] EmiError),
}

/// 설정과 번역기로 컨트롤러를 만든다.
pub fn build_controller(config: &Config, tr: &Translator) -> CalculatorController {
    CalculatorController::new(config.formatter(tr.result_labels()))
        .with_error_message(Some(tr.t(keys::ERROR_INVALID_NUMBERS)))
}

/// 인자로 받은 값으로 한 번 계산하고 결과를 출력한다.
pub fn run_once<W: Write>(
    config: &Config,
    tr: &Translator,
    raw: [&str; 3],
    out: W,
) -> Result<(), AppError> {
    let mut controller = build_controller(config, tr);
    let mut view = CliView::new(out, config, tr);
    controller.on_calculate(raw[0], raw[1], raw[2], &mut view)?;
    Ok(())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
/// `cli_lang`은 이번 실행에만 적용되며 설정 파일에는 저장하지 않는다.
pub fn run(
    config: &mut Config,
    config_path: &Path,
    cli_lang: &str,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    let mut lang_override = cli_lang;
    let mut tr = ui_cli::translator_for(config, lang_override);
    let mut controller = build_controller(config, &tr);
    let mut view = CliView::new(std::io::stdout(), config, &tr);
    view.show_results(&controller.display_lines());

    loop {
        match ui_cli::main_menu(&tr, input)? {
            MenuChoice::Calculate => {
                let [p, r, t] = ui_cli::read_loan_fields(&tr, &config.currency_symbol, input)?;
                // 오류는 화면에 이미 알렸으므로 메뉴로 돌아간다.
                let _ = controller.on_calculate(&p, &r, &t, &mut view);
            }
            MenuChoice::Clear => {
                controller.on_clear(&mut view);
                println!("{}", tr.t(keys::RESULT_CLEARED));
            }
            MenuChoice::Settings => {
                let previous_language = config.language.clone();
                if ui_cli::handle_settings(&tr, config, input)? {
                    config.save_to(config_path)?;
                    // 메뉴에서 언어를 직접 고르면 명령행 지정보다 우선한다.
                    if config.language != previous_language {
                        lang_override = "auto";
                    }
                    tr = ui_cli::translator_for(config, lang_override);
                    view = CliView::new(std::io::stdout(), config, &tr);
                    controller.set_error_message(Some(tr.t(keys::ERROR_INVALID_NUMBERS)));
                    controller.set_formatter(config.formatter(tr.result_labels()), &mut view);
                }
            }
            MenuChoice::Exit => {
                config.save_to(config_path)?;
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
