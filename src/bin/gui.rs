#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use emi_calculator::{
    config,
    controller::{CalculatorController, CalculatorView},
    format::{ResultFormatter, ResultLines},
    i18n::{self, keys},
    init_tracing, ui_cli,
    visualization::VisualizationState,
};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

const BAR_MARGIN: f32 = 50.0;
const BAR_TOP: f32 = 80.0;
const BAR_HEIGHT: f32 = 30.0;
const PRINCIPAL_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 149, 237);
const INTEREST_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 99, 71);
const CALCULATE_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 139, 87);
const CLEAR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 20, 60);
const INPUT_PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(240, 248, 255);

fn main() -> Result<(), eframe::Error> {
    init_tracing();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("config load failed, using defaults: {e}");
            config::Config::default()
        }
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([700.0, 500.0])
        .with_min_inner_size([520.0, 380.0])
        .with_transparent(true);
    if app_cfg.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "EMI Calculator",
        options,
        Box::new(move |cc| {
            let mut app = GuiApp::new(app_cfg.clone(), cli_lang.clone());
            if let Err(e) = setup_fonts(&cc.egui_ctx, app_cfg.custom_font_path.as_deref()) {
                tracing::warn!("font setup: {e}");
                app.font_load_error = Some(e);
            }
            Box::new(app)
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 통화 기호(₹)와 한글을 표시할 폰트를 적용한다.
/// 1) 설정의 사용자 지정 폰트
/// 2) 시스템 폰트(Windows Fonts, 일반적인 Linux/macOS 경로)
/// 3) 모두 실패 시 Err를 반환해 사용자 지정 폰트 선택을 유도한다.
fn setup_fonts(ctx: &egui::Context, custom: Option<&str>) -> Result<(), String> {
    if let Some(path) = custom.filter(|p| !p.is_empty()) {
        return load_custom_font(ctx, path);
    }

    let mut candidates = Vec::new();
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for name in ["malgun.ttf", "Nirmala.ttf", "segoeui.ttf"] {
            candidates.push(fonts.join(name));
        }
    }
    for p in [
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    ] {
        candidates.push(Path::new(p).to_path_buf());
    }

    if let Some(p) = candidates.iter().find(|p| p.exists()) {
        let bytes = fs::read(p)
            .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
        apply_font_bytes(ctx, bytes, "system_font");
        tracing::debug!(font = %p.display(), "system font applied");
        return Ok(());
    }

    Err("Font not found. Please set a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

/// 컨트롤러가 갱신하는 화면 상태. 매 프레임 이 값을 그린다.
struct GuiView {
    lines: ResultLines,
    visualization: VisualizationState,
    error: Option<String>,
}

impl CalculatorView for GuiView {
    fn show_results(&mut self, lines: &ResultLines) {
        self.lines = lines.clone();
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn render_visualization(&mut self, state: &VisualizationState) {
        self.visualization = *state;
    }
}

struct GuiApp {
    config: config::Config,
    // --lang 값. 실행 중에만 적용하고 설정 파일에는 쓰지 않는다.
    lang_override: Option<String>,
    tr: i18n::Translator,
    controller: CalculatorController,
    view: GuiView,
    principal_input: String,
    rate_input: String,
    tenure_input: String,
    // 설정
    lang_input: String,
    currency_input: String,
    font_path_input: String,
    settings_status: Option<String>,
    font_load_error: Option<String>,
    show_settings_modal: bool,
    show_help_modal: bool,
    scale_applied: bool,
}

impl GuiApp {
    fn new(config: config::Config, lang_override: Option<String>) -> Self {
        let tr = ui_cli::translator_for(&config, lang_override.as_deref().unwrap_or("auto"));
        let controller = emi_calculator::app::build_controller(&config, &tr);
        let view = GuiView {
            lines: controller.display_lines(),
            visualization: controller.state().visualization(),
            error: None,
        };
        Self {
            lang_input: config.language.clone(),
            currency_input: config.currency_symbol.clone(),
            font_path_input: config.custom_font_path.clone().unwrap_or_default(),
            config,
            lang_override,
            tr,
            controller,
            view,
            principal_input: String::new(),
            rate_input: String::new(),
            tenure_input: String::new(),
            settings_status: None,
            font_load_error: None,
            show_settings_modal: false,
            show_help_modal: false,
            scale_applied: false,
        }
    }

    fn calculate(&mut self) {
        // 실패 시 view.error에 알림이 남고 이전 결과는 그대로 보인다.
        let _ = self.controller.on_calculate(
            &self.principal_input,
            &self.rate_input,
            &self.tenure_input,
            &mut self.view,
        );
    }

    fn clear(&mut self) {
        self.principal_input.clear();
        self.rate_input.clear();
        self.tenure_input.clear();
        self.controller.on_clear(&mut self.view);
    }

    /// 설정 모달의 입력을 반영하고 저장한다.
    fn apply_settings(&mut self) {
        let symbol = self.currency_input.trim();
        if !symbol.is_empty() {
            self.config.currency_symbol = symbol.to_string();
        }
        if self.lang_input != self.config.language {
            self.lang_override = None;
            self.config.language = self.lang_input.clone();
        }
        let font = self.font_path_input.trim();
        self.config.custom_font_path = (!font.is_empty()).then(|| font.to_string());

        self.tr = ui_cli::translator_for(
            &self.config,
            self.lang_override.as_deref().unwrap_or("auto"),
        );
        self.controller
            .set_error_message(Some(self.tr.t(keys::ERROR_INVALID_NUMBERS)));
        let formatter: ResultFormatter = self.config.formatter(self.tr.result_labels());
        self.controller.set_formatter(formatter, &mut self.view);

        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED).trim().to_string(),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    /// 좌측 대출 정보 입력 패널.
    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::LOAN_DETAILS));
        ui.add_space(12.0);

        let mut submit = false;
        let fields = [
            (
                format!("{} ({}):", tr.t(keys::PROMPT_PRINCIPAL), self.config.currency_symbol),
                &mut self.principal_input,
            ),
            (format!("{}:", tr.t(keys::PROMPT_RATE)), &mut self.rate_input),
            (format!("{}:", tr.t(keys::PROMPT_TENURE)), &mut self.tenure_input),
        ];
        for (label, value) in fields {
            ui.label(label);
            let resp = ui.add(
                egui::TextEdit::singleline(value).desired_width(ui.available_width()),
            );
            if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            ui.add_space(12.0);
        }

        let calc_btn = egui::Button::new(
            egui::RichText::new(tr.t(keys::BUTTON_CALCULATE)).color(egui::Color32::WHITE),
        )
        .fill(CALCULATE_COLOR)
        .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add(calc_btn).clicked() {
            submit = true;
        }
        ui.add_space(8.0);
        let clear_btn = egui::Button::new(
            egui::RichText::new(tr.t(keys::BUTTON_CLEAR)).color(egui::Color32::WHITE),
        )
        .fill(CLEAR_COLOR)
        .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add(clear_btn).clicked() {
            self.clear();
        } else if submit {
            self.calculate();
        }
    }

    /// 결과 라벨 세 줄.
    fn ui_results(&self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::RESULT_HEADING));
        ui.separator();
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(&self.view.lines.monthly_emi).size(18.0).strong());
            ui.label(egui::RichText::new(&self.view.lines.total_interest).size(16.0));
            ui.label(egui::RichText::new(&self.view.lines.total_payment).size(16.0));
        });
        ui.add_space(8.0);
    }

    /// 원금/이자 막대. 빈 상태면 배경만 그린다.
    fn ui_chart(&self, ui: &mut egui::Ui) {
        let size = egui::vec2(ui.available_width(), ui.available_height().max(250.0));
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::WHITE);

        let state = self.view.visualization;
        let drawable = (rect.width() - 2.0 * BAR_MARGIN).max(0.0);
        let Some(seg) = state.segments(f64::from(drawable)) else {
            return;
        };

        let formatter = self.controller.formatter();
        let font = egui::FontId::proportional(14.0);
        let left = rect.left() + BAR_MARGIN;
        let top = rect.top() + BAR_TOP;
        let p_width = seg.principal_width as f32;
        let i_width = seg.interest_width as f32;

        painter.rect_filled(
            egui::Rect::from_min_size(egui::pos2(left, top), egui::vec2(p_width, BAR_HEIGHT)),
            0.0,
            PRINCIPAL_COLOR,
        );
        painter.text(
            egui::pos2(left, top - 5.0),
            egui::Align2::LEFT_BOTTOM,
            format!(
                "{} ({})",
                self.tr.t(keys::CHART_PRINCIPAL),
                formatter.whole_amount(state.principal)
            ),
            font.clone(),
            egui::Color32::BLACK,
        );

        painter.rect_filled(
            egui::Rect::from_min_size(
                egui::pos2(left + p_width, top),
                egui::vec2(i_width, BAR_HEIGHT),
            ),
            0.0,
            INTEREST_COLOR,
        );
        // 이자 캡션이 원금 캡션과 겹치지 않도록 막대 아래로 내린다.
        painter.text(
            egui::pos2(left + p_width, top + BAR_HEIGHT + 5.0),
            egui::Align2::LEFT_TOP,
            format!(
                "{} ({})",
                self.tr.t(keys::CHART_INTEREST),
                formatter.whole_amount(state.interest.max(0.0))
            ),
            font,
            egui::Color32::BLACK,
        );
    }

    fn ui_error_modal(&mut self, ctx: &egui::Context) {
        let Some(message) = self.view.error.clone() else {
            return;
        };
        let mut open = true;
        let mut acknowledged = false;
        egui::Window::new(self.tr.t(keys::ERROR_INPUT_TITLE))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        if !open || acknowledged {
            self.view.error = None;
        }
    }

    fn ui_settings_modal(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let mut save_clicked = false;
        let mut browse_clicked = false;
        egui::Window::new(tr.t(keys::SETTINGS_TITLE))
            .collapsible(false)
            .resizable(true)
            .open(&mut self.show_settings_modal)
            .show(ctx, |ui| {
                ui.label(tr.t(keys::SETTINGS_LANGUAGE));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(&self.lang_input)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), "System");
                        ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                        ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                    });
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(tr.t(keys::SETTINGS_CURRENCY));
                    ui.add(egui::TextEdit::singleline(&mut self.currency_input).desired_width(60.0));
                });
                ui.checkbox(&mut self.config.group_thousands, tr.t(keys::SETTINGS_GROUPING));
                ui.separator();
                ui.label("UI scale");
                ui.add(egui::Slider::new(&mut self.config.ui_scale, 0.8..=1.6).suffix(" x"));
                ui.checkbox(&mut self.config.always_on_top, "Always on top");
                ui.label("Window transparency");
                ui.add(egui::Slider::new(&mut self.config.window_alpha, 0.3..=1.0).text("alpha"));
                ui.separator();
                ui.label("Font (.ttf/.ttc)");
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.font_path_input);
                    if ui.button("...").clicked() {
                        browse_clicked = true;
                    }
                });
                if let Some(err) = &self.font_load_error {
                    ui.colored_label(egui::Color32::RED, err);
                }
                ui.separator();
                if ui.button("Save").clicked() {
                    save_clicked = true;
                }
                if let Some(msg) = &self.settings_status {
                    ui.label(msg);
                }
            });

        if browse_clicked {
            if let Some(path) = FileDialog::new()
                .add_filter("Font", &["ttf", "ttc", "otf"])
                .pick_file()
            {
                self.font_path_input = path.display().to_string();
            }
        }
        if save_clicked {
            let font = self.font_path_input.trim().to_string();
            let changed_font = Some(font.as_str()) != self.config.custom_font_path.as_deref();
            if changed_font && !font.is_empty() {
                self.font_load_error = load_custom_font(ctx, &font).err();
            }
            ctx.set_pixels_per_point(self.config.ui_scale);
            self.apply_settings();
        }
    }

    fn ui_help_modal(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        egui::Window::new(tr.t(keys::HELP_TITLE))
            .collapsible(false)
            .resizable(true)
            .open(&mut self.show_help_modal)
            .show(ctx, |ui| {
                ui.style_mut().wrap = Some(true);
                ui.heading(tr.t(keys::APP_TITLE));
                ui.label(format!("Version: {}", env!("CARGO_PKG_VERSION")));
                ui.separator();
                ui.label(tr.t(keys::HELP_CALCULATE));
            });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if !self.scale_applied {
            ctx.set_pixels_per_point(self.config.ui_scale);
            self.scale_applied = true;
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.config.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        // 투명도 적용 + 라벨 복사 방지 스타일
        let alpha = self.config.window_alpha;
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(alpha);
        ctx.set_style(style);

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(self.tr.t(keys::SETTINGS_TITLE)).clicked() {
                    self.settings_status = None;
                    self.show_settings_modal = true;
                }
                if ui.button(self.tr.t(keys::HELP_TITLE)).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings_modal(ctx);
        }
        if self.show_help_modal {
            self.ui_help_modal(ctx);
        }
        self.ui_error_modal(ctx);
        let idle = self.view.error.is_none();

        egui::SidePanel::left("loan_details")
            .resizable(false)
            .exact_width(280.0)
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(INPUT_PANEL_FILL))
            .show(ctx, |ui| {
                ui.add_enabled_ui(idle, |ui| self.ui_inputs(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui_results(ui);
            self.ui_chart(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english_app() -> GuiApp {
        GuiApp::new(
            config::Config {
                language: "en".into(),
                ..config::Config::default()
            },
            None,
        )
    }

    fn fill(app: &mut GuiApp, p: &str, r: &str, t: &str) {
        app.principal_input = p.into();
        app.rate_input = r.into();
        app.tenure_input = t.into();
    }

    #[test]
    fn starts_with_placeholders_and_empty_chart() {
        let app = english_app();
        assert_eq!(app.view.lines.monthly_emi, "Monthly EMI: ₹ --");
        assert!(app.view.visualization.is_empty());
        assert!(app.view.error.is_none());
    }

    #[test]
    fn calculate_updates_labels_and_chart() {
        let mut app = english_app();
        fill(&mut app, "1000000", "10", "10");
        app.calculate();
        assert_eq!(app.view.lines.monthly_emi, "Monthly EMI: ₹ 13,215.07");
        assert_eq!(app.view.visualization.principal, 1_000_000.0);
        assert!((app.view.visualization.interest - 585_808.0).abs() < 1.0);
    }

    #[test]
    fn invalid_input_opens_error_and_keeps_previous_result() {
        let mut app = english_app();
        fill(&mut app, "120000", "0", "1");
        app.calculate();
        let before = app.view.lines.clone();
        fill(&mut app, "abc", "10", "5");
        app.calculate();
        assert_eq!(app.view.error.as_deref(), Some("Please enter valid numbers."));
        assert_eq!(app.view.lines, before);
        assert_eq!(app.view.visualization.principal, 120_000.0);
    }

    #[test]
    fn lang_flag_applies_without_touching_config() {
        let cfg = config::Config {
            language: "en".into(),
            ..config::Config::default()
        };
        let app = GuiApp::new(cfg, Some("ko".into()));
        assert_eq!(app.tr.language_code(), "ko");
        assert_eq!(app.view.lines.monthly_emi, "월 상환액: ₹ --");
        assert_eq!(app.config.language, "en");
        assert_eq!(app.lang_input, "en");
    }

    #[test]
    fn clear_empties_inputs_and_result() {
        let mut app = english_app();
        fill(&mut app, "500000", "8", "5");
        app.calculate();
        app.clear();
        assert!(app.principal_input.is_empty());
        assert!(app.rate_input.is_empty());
        assert!(app.tenure_input.is_empty());
        assert_eq!(app.view.lines.total_payment, "Total Payment: ₹ --");
        assert!(app.view.visualization.is_empty());
    }
}
