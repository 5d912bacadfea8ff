use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::format::ResultLabels;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const ERROR_PREFIX: &str = "general.error_prefix";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_CALCULATE: &str = "main_menu.calculate";
    pub const MAIN_MENU_CLEAR: &str = "main_menu.clear";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const LOAN_DETAILS: &str = "loan.details";
    pub const PROMPT_PRINCIPAL: &str = "loan.prompt_principal";
    pub const PROMPT_RATE: &str = "loan.prompt_rate";
    pub const PROMPT_TENURE: &str = "loan.prompt_tenure";
    pub const BUTTON_CALCULATE: &str = "loan.button_calculate";
    pub const BUTTON_CLEAR: &str = "loan.button_clear";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_MONTHLY_EMI: &str = "result.monthly_emi";
    pub const RESULT_TOTAL_INTEREST: &str = "result.total_interest";
    pub const RESULT_TOTAL_PAYMENT: &str = "result.total_payment";
    pub const RESULT_CLEARED: &str = "result.cleared";

    pub const CHART_PRINCIPAL: &str = "chart.principal";
    pub const CHART_INTEREST: &str = "chart.interest";

    pub const ERROR_INVALID_NUMBERS: &str = "error.invalid_numbers";
    pub const ERROR_INPUT_TITLE: &str = "error.input_title";

    pub const SETTINGS_TITLE: &str = "settings.title";
    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENCY: &str = "settings.currency";
    pub const SETTINGS_GROUPING: &str = "settings.grouping";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const HELP_TITLE: &str = "help.title";
    pub const HELP_CALCULATE: &str = "help.calculate";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        if overrides.is_some() {
            tracing::info!(lang = lang_code, "language pack loaded");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 → 키 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.clone();
        }
        let built_in = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        built_in.unwrap_or(key).to_string()
    }

    /// 결과 라벨 세 개.
    pub fn result_labels(&self) -> ResultLabels {
        ResultLabels {
            monthly_emi: self.t(keys::RESULT_MONTHLY_EMI),
            total_interest: self.t(keys::RESULT_TOTAL_INTEREST),
            total_payment: self.t(keys::RESULT_TOTAL_PAYMENT),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 플랫 맵 또는 [section] 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Table = match toml::from_str(src) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("language pack parse error: {e}");
            return None;
        }
    };
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    walk(&format!("{prefix}.{k}"), v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in &value {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "EMI Calculator",
        APP_EXIT => "Exiting.",
        ERROR_PREFIX => "Error",
        MAIN_MENU_TITLE => "\n=== EMI Calculator ===",
        MAIN_MENU_CALCULATE => "1) Calculate EMI",
        MAIN_MENU_CLEAR => "2) Clear",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid selection. Try again.",
        LOAN_DETAILS => "Loan Details",
        PROMPT_PRINCIPAL => "Loan Amount",
        PROMPT_RATE => "Interest Rate (%)",
        PROMPT_TENURE => "Tenure (Years)",
        BUTTON_CALCULATE => "Calculate EMI",
        BUTTON_CLEAR => "Clear",
        RESULT_HEADING => "EMI Result",
        RESULT_MONTHLY_EMI => "Monthly EMI",
        RESULT_TOTAL_INTEREST => "Total Interest",
        RESULT_TOTAL_PAYMENT => "Total Payment",
        RESULT_CLEARED => "Cleared.",
        CHART_PRINCIPAL => "Principal",
        CHART_INTEREST => "Interest",
        ERROR_INVALID_NUMBERS => "Please enter valid numbers.",
        ERROR_INPUT_TITLE => "Input Error",
        SETTINGS_TITLE => "Settings",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENCY => "Currency symbol",
        SETTINGS_GROUPING => "Thousands separator",
        SETTINGS_LANGUAGE => "Language",
        SETTINGS_OPTIONS => "1) Currency symbol  2) Thousands separator on/off  3) Language (auto/en/ko)",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        HELP_TITLE => "Help / About",
        HELP_CALCULATE => "EMI = P·r·(1+r)^n / ((1+r)^n − 1), r = annual rate / 1200, n = years × 12. A 0% rate gives P / n.",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "EMI 계산기",
        APP_EXIT => "프로그램을 종료합니다.",
        ERROR_PREFIX => "오류",
        MAIN_MENU_TITLE => "\n=== EMI 계산기 ===",
        MAIN_MENU_CALCULATE => "1) EMI 계산",
        MAIN_MENU_CLEAR => "2) 초기화",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        LOAN_DETAILS => "대출 정보",
        PROMPT_PRINCIPAL => "대출 금액",
        PROMPT_RATE => "연이율 (%)",
        PROMPT_TENURE => "기간 (년)",
        BUTTON_CALCULATE => "EMI 계산",
        BUTTON_CLEAR => "초기화",
        RESULT_HEADING => "EMI 결과",
        RESULT_MONTHLY_EMI => "월 상환액",
        RESULT_TOTAL_INTEREST => "총 이자",
        RESULT_TOTAL_PAYMENT => "총 상환액",
        RESULT_CLEARED => "초기화했습니다.",
        CHART_PRINCIPAL => "원금",
        CHART_INTEREST => "이자",
        ERROR_INVALID_NUMBERS => "올바른 숫자를 입력하세요.",
        ERROR_INPUT_TITLE => "입력 오류",
        SETTINGS_TITLE => "설정",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENCY => "통화 기호",
        SETTINGS_GROUPING => "천 단위 구분",
        SETTINGS_LANGUAGE => "언어",
        SETTINGS_OPTIONS => "1) 통화 기호  2) 천 단위 구분 켜기/끄기  3) 언어 (auto/en/ko)",
        SETTINGS_PROMPT_CHANGE => "변경할 번호 입력(엔터: 취소): ",
        SETTINGS_INVALID => "잘못된 입력입니다. 설정을 유지합니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        HELP_TITLE => "도움말 / 정보",
        HELP_CALCULATE => "EMI = P·r·(1+r)^n / ((1+r)^n − 1), r = 연이율 / 1200, n = 기간(년) × 12. 이율이 0%이면 P / n.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_defaults_match_display_contract() {
        let tr = Translator::new("en");
        assert_eq!(tr.t(keys::ERROR_INVALID_NUMBERS), "Please enter valid numbers.");
        assert_eq!(tr.result_labels(), ResultLabels::default());
    }

    #[test]
    fn korean_table_then_key_fallback() {
        let tr = Translator::new("ko-KR");
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.language_code(), "ko");
        assert_eq!(tr.t(keys::RESULT_MONTHLY_EMI), "월 상환액");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn korean_help_is_translated() {
        let ko = Translator::new("ko").t(keys::HELP_CALCULATE);
        let en = Translator::new("en").t(keys::HELP_CALCULATE);
        assert_ne!(ko, en);
        assert!(ko.starts_with("EMI ="));
        assert!(ko.contains("연이율"));
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-GB")), "en");
    }

    #[test]
    fn nested_pack_flattens_keys() {
        let map = parse_toml_to_map("[result]\nmonthly_emi = \"EMI/month\"\n").expect("pack");
        assert_eq!(map.get("result.monthly_emi").map(String::as_str), Some("EMI/month"));
    }
}
