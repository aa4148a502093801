use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::inflow::{self, IprMethod, WellTest};
use crate::single_phase::{self, FlowRegime, RadialFlowInput};

/// 평활 곡선을 출력할 때 보여줄 최대 행 수.
const SMOOTHED_ROWS: usize = 10;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ProductivityIndex,
    AbsoluteOpenFlow,
    IprCurve,
    SinglePhase,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_PRODUCTIVITY,
        keys::MAIN_MENU_AOF,
        keys::MAIN_MENU_IPR,
        keys::MAIN_MENU_SINGLE_PHASE,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    select_menu(&mut io::stdin().lock(), tr)
}

/// 입력이 끝나면(EOF) 종료를 선택한 것으로 본다.
fn select_menu(input: &mut impl BufRead, tr: &Translator) -> Result<MenuChoice, AppError> {
    loop {
        let sel = match read_line_from(input, tr.t(keys::PROMPT_MENU_SELECT)) {
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(MenuChoice::Exit)
            }
            other => other?,
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::ProductivityIndex),
            "2" => return Ok(MenuChoice::AbsoluteOpenFlow),
            "3" => return Ok(MenuChoice::IprCurve),
            "4" => return Ok(MenuChoice::SinglePhase),
            "5" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 생산성 지수 메뉴를 처리한다.
pub fn handle_productivity_index(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PRODUCTIVITY_HEADING));
    let well = read_well_test(tr, cfg)?;
    let j = inflow::productivity_index(&well)?;
    println!("{} {:.4} stb/d/psi", tr.t(keys::RESULT_J), j);
    Ok(())
}

/// AOF 및 Qb 메뉴를 처리한다.
pub fn handle_absolute_open_flow(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::AOF_HEADING));
    let well = read_well_test(tr, cfg)?;
    let aof = inflow::absolute_open_flow(&well)?;
    let qb = inflow::bubble_point_rate(&well)?;
    println!("{} {:.2} bpd", tr.t(keys::RESULT_AOF), aof);
    println!("{} {:.2} bpd", tr.t(keys::RESULT_QB), qb);
    Ok(())
}

/// pwf 별 Qo 계산 후 IPR 곡선 표를 출력한다.
pub fn handle_ipr_curve(
    tr: &Translator,
    cfg: &Config,
    resolution: usize,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::IPR_HEADING));
    let well = read_well_test(tr, cfg)?;
    let method = read_method(tr, cfg.default_method)?;
    let count = loop {
        let n = read_f64_or(tr, keys::PROMPT_PWF_COUNT, 3.0)?;
        if n >= 1.0 && n <= cfg.max_pwf_samples as f64 && n.fract() == 0.0 {
            break n as usize;
        }
        println!("1..={}", cfg.max_pwf_samples);
    };
    let mut pwf_values = Vec::with_capacity(count);
    for i in 0..count {
        let label = format!("{}{} [psia]: ", tr.t(keys::PROMPT_PWF_VALUE), i + 1);
        pwf_values.push(read_f64(&label, tr)?);
    }

    for &pwf in &pwf_values {
        let q = inflow::rate_at_pressure(method, &well, pwf)?;
        println!("{} = {:.2} psia: {:.2} bpd", tr.t(keys::RESULT_QO_AT), pwf, q);
    }

    let curve = inflow::ipr_curve(&well, &pwf_values, method, resolution)?;
    println!("\n[{}] {}", curve.method.label(), tr.t(keys::RESULT_CURVE_POINTS));
    println!("{:>12} {:>12}", "Qo(bpd)", "Pwf(psia)");
    for p in &curve.points {
        println!("{:>12.2} {:>12.2}", p.rate_bpd, p.pwf_psia);
    }
    println!("{}", tr.t(keys::RESULT_CURVE_SMOOTHED));
    let stride = (curve.smoothed.len() / SMOOTHED_ROWS).max(1);
    for p in curve.smoothed.iter().step_by(stride) {
        println!("{:>12.2} {:>12.2}", p.rate_bpd, p.pwf_psia);
    }
    if let Some(bp) = curve.bubble_point {
        println!(
            "{} Qb={:.2} bpd, pb={:.2} psia",
            tr.t(keys::RESULT_BUBBLE_POINT),
            bp.rate_bpd,
            bp.pwf_psia
        );
    }
    Ok(())
}

/// 단상 Darcy 방사류 메뉴를 처리한다.
pub fn handle_single_phase(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SINGLE_PHASE_HEADING));
    let ko_md = read_f64(&prompt(tr, keys::PROMPT_KO), tr)?;
    let h_ft = read_f64(&prompt(tr, keys::PROMPT_H), tr)?;
    let bo = read_f64(&prompt(tr, keys::PROMPT_BO), tr)?;
    let uo_cp = read_f64(&prompt(tr, keys::PROMPT_UO), tr)?;
    let re_ft = read_f64(&prompt(tr, keys::PROMPT_RE), tr)?;
    let rw_ft = read_f64(&prompt(tr, keys::PROMPT_RW), tr)?;
    let skin = read_f64(&prompt(tr, keys::PROMPT_SKIN), tr)?;
    println!("{}", tr.t(keys::PROMPT_REGIME));
    let regime = match read_line(tr.t(keys::PROMPT_MENU_SELECT))?.trim() {
        "2" => FlowRegime::Steady,
        _ => FlowRegime::PseudoSteady,
    };
    let input = RadialFlowInput {
        ko_md,
        h_ft,
        bo,
        uo_cp,
        re_ft,
        rw_ft,
        skin,
        regime,
    };
    let j = single_phase::single_phase_j(&input);
    println!(
        "{} {:.2} bbl/d/psi ({})",
        tr.t(keys::RESULT_J_DARCY),
        j,
        regime.label()
    );

    let pr = read_f64(&prompt(tr, keys::PROMPT_PR), tr)?;
    let pwf = read_f64(&prompt(tr, keys::PROMPT_PWF), tr)?;
    let q = single_phase::single_phase_q(&input, pr, pwf);
    println!("{} {:.2} bbl/d", tr.t(keys::RESULT_Q_DARCY), q);
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} language={}, curve_resolution={}, default_method={}",
        tr.t(keys::SETTINGS_CURRENT),
        cfg.language,
        cfg.curve_resolution,
        cfg.default_method.label()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
    match sel.trim() {
        "1" => {
            let lang = read_line(&prompt(tr, keys::SETTINGS_PROMPT_LANGUAGE))?;
            match lang.trim() {
                code @ ("auto" | "en" | "es") => cfg.language = code.to_string(),
                _ => {
                    println!("{}", tr.t(keys::SETTINGS_INVALID));
                    return Ok(());
                }
            }
        }
        "2" => {
            let n = read_f64(&prompt(tr, keys::SETTINGS_PROMPT_RESOLUTION), tr)?;
            if n < 2.0 || n.fract() != 0.0 {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(());
            }
            cfg.curve_resolution = n as usize;
        }
        "3" => cfg.default_method = read_method(tr, cfg.default_method)?,
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

fn read_well_test(tr: &Translator, cfg: &Config) -> Result<WellTest, AppError> {
    let d = &cfg.defaults;
    let q_test = read_f64_or(tr, keys::PROMPT_Q_TEST, d.q_test_bpd)?;
    let pwf_test = read_f64_or(tr, keys::PROMPT_PWF_TEST, d.pwf_test_psia)?;
    let pr = read_f64_or(tr, keys::PROMPT_PR, d.pr_psia)?;
    let pb = read_f64_or(tr, keys::PROMPT_PB, d.pb_psia)?;
    let ef = read_f64_or(tr, keys::PROMPT_EF, d.ef)?;
    let ef2 = read_optional_f64(tr, keys::PROMPT_EF2)?;
    Ok(WellTest::new(q_test, pwf_test, pr, pb).with_efficiency(ef, ef2))
}

fn read_method(tr: &Translator, default: IprMethod) -> Result<IprMethod, AppError> {
    println!("{}", tr.t(keys::PROMPT_METHOD));
    let sel = read_line(&format!(
        "{} ({}: {}) ",
        tr.t(keys::PROMPT_MENU_SELECT).trim_end(),
        tr.t(keys::DEFAULT_HINT),
        default.label()
    ))?;
    let method = match sel.trim() {
        "1" => IprMethod::Darcy,
        "2" => IprMethod::Vogel,
        "3" => IprMethod::Standing,
        "4" => IprMethod::Composite,
        _ => default,
    };
    Ok(method)
}

fn prompt(tr: &Translator, key: &str) -> String {
    format!("{}: ", tr.t(key))
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    read_line_from(&mut io::stdin().lock(), prompt)
}

/// 한 줄을 읽는다. 읽은 바이트가 0 이면 `UnexpectedEof` 로 끝낸다.
fn read_line_from(input: &mut impl BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

fn read_f64(prompt: &str, tr: &Translator) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::INVALID_NUMBER)),
        }
    }
}

/// 빈 입력이면 기본값을 사용한다.
fn read_f64_or(tr: &Translator, key: &str, default: f64) -> Result<f64, AppError> {
    let text = format!("{} [{}: {default}]: ", tr.t(key), tr.t(keys::DEFAULT_HINT));
    loop {
        let s = read_line(&text)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::INVALID_NUMBER)),
        }
    }
}

fn read_optional_f64(tr: &Translator, key: &str) -> Result<Option<f64>, AppError> {
    let text = prompt(tr, key);
    loop {
        let s = read_line(&text)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::INVALID_NUMBER)),
        }
    }
}
