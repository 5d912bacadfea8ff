use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::controller::CalculatorView;
use crate::format::{ResultFormatter, ResultLines};
use crate::i18n::{self, keys, Translator};
use crate::visualization::{self, VisualizationState};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate,
    Clear,
    Settings,
    Exit,
}

/// 표준 출력에 결과를 그리는 화면 구현.
pub struct CliView<W: Write> {
    out: W,
    formatter: ResultFormatter,
    bar_width: usize,
    principal_caption: String,
    interest_caption: String,
    error_prefix: String,
}

impl<W: Write> CliView<W> {
    pub fn new(out: W, config: &Config, tr: &Translator) -> Self {
        Self {
            out,
            formatter: config.formatter(tr.result_labels()),
            bar_width: config.bar_width.max(1),
            principal_caption: tr.t(keys::CHART_PRINCIPAL),
            interest_caption: tr.t(keys::CHART_INTEREST),
            error_prefix: tr.t(keys::ERROR_PREFIX),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // 화면 출력 실패는 계산 흐름을 멈출 이유가 아니므로 로그만 남긴다.
    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!("stdout write failed: {e}");
        }
    }
}

impl<W: Write> CalculatorView for CliView<W> {
    fn show_results(&mut self, lines: &ResultLines) {
        for line in lines.iter() {
            self.emit(line);
        }
    }

    fn show_error(&mut self, message: &str) {
        let line = format!("{}: {message}", self.error_prefix);
        self.emit(&line);
    }

    fn render_visualization(&mut self, state: &VisualizationState) {
        let Some(bar) = visualization::text_bar(state, self.bar_width) else {
            return;
        };
        let caption = format!(
            "# {} ({})   = {} ({})",
            self.principal_caption,
            self.formatter.whole_amount(state.principal),
            self.interest_caption,
            self.formatter.whole_amount(state.interest.max(0.0)),
        );
        self.emit(&bar);
        self.emit(&caption);
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다. 입력이 끝나면 종료로 본다.
pub fn main_menu(tr: &Translator, input: &mut impl BufRead) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_CALCULATE));
    println!("{}", tr.t(keys::MAIN_MENU_CLEAR));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = match read_line(input, &tr.t(keys::PROMPT_MENU_SELECT)) {
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                println!();
                return Ok(MenuChoice::Exit);
            }
            other => other?,
        };
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn parse_menu_choice(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::Calculate),
        "2" => Some(MenuChoice::Clear),
        "3" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 대출 정보 세 가지를 원문 그대로 읽는다. 검증은 컨트롤러가 한다.
pub fn read_loan_fields(
    tr: &Translator,
    currency_symbol: &str,
    input: &mut impl BufRead,
) -> Result<[String; 3], AppError> {
    println!("\n-- {} --", tr.t(keys::LOAN_DETAILS));
    let principal = read_line(
        input,
        &format!("{} ({currency_symbol}): ", tr.t(keys::PROMPT_PRINCIPAL)),
    )?;
    let rate = read_line(input, &format!("{}: ", tr.t(keys::PROMPT_RATE)))?;
    let tenure = read_line(input, &format!("{}: ", tr.t(keys::PROMPT_TENURE)))?;
    Ok([principal, rate, tenure])
}

/// 설정 메뉴를 처리한다. 변경이 있으면 true.
pub fn handle_settings(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut impl BufRead,
) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}: {}", tr.t(keys::SETTINGS_CURRENCY), cfg.currency_symbol);
    println!("{}: {}", tr.t(keys::SETTINGS_GROUPING), cfg.group_thousands);
    println!("{}", language_status(tr, cfg));
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(input, &tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let changed = match sel.trim() {
        "" => false,
        "1" => {
            let sym = read_line(input, &format!("{}: ", tr.t(keys::SETTINGS_CURRENCY)))?;
            apply_currency_symbol(cfg, &sym)
        }
        "2" => {
            cfg.group_thousands = !cfg.group_thousands;
            true
        }
        "3" => {
            let lang = read_line(input, &format!("{}: ", tr.t(keys::SETTINGS_LANGUAGE)))?;
            apply_language(cfg, &lang)
        }
        _ => false,
    };
    if changed {
        println!("{}", tr.t(keys::SETTINGS_SAVED));
    } else if !sel.trim().is_empty() {
        println!("{}", tr.t(keys::SETTINGS_INVALID));
    }
    Ok(changed)
}

// 저장된 값과 실제로 쓰이는 언어를 함께 보여준다(auto, --lang 덮어쓰기).
fn language_status(tr: &Translator, cfg: &Config) -> String {
    format!(
        "{}: {} ({})",
        tr.t(keys::SETTINGS_LANGUAGE),
        cfg.language,
        tr.language_code()
    )
}

fn apply_currency_symbol(cfg: &mut Config, raw: &str) -> bool {
    let sym = raw.trim();
    if sym.is_empty() {
        return false;
    }
    cfg.currency_symbol = sym.to_string();
    true
}

fn apply_language(cfg: &mut Config, raw: &str) -> bool {
    let lang = raw.trim().to_lowercase();
    if !matches!(lang.as_str(), "auto" | "en" | "ko") {
        return false;
    }
    cfg.language = lang;
    true
}

/// 설정의 언어로 번역기를 다시 만든다. `cli_lang`이 "auto"가 아니면 설정보다 우선한다.
pub fn translator_for(cfg: &Config, cli_lang: &str) -> Translator {
    let lang = i18n::resolve_language(cli_lang, Some(cfg.language.as_str()));
    Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref())
}

fn read_line(input: &mut impl BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}
