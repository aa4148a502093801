use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const DEFAULT_HINT: &str = "general.default_hint";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_PRODUCTIVITY: &str = "main_menu.productivity";
    pub const MAIN_MENU_AOF: &str = "main_menu.aof";
    pub const MAIN_MENU_IPR: &str = "main_menu.ipr";
    pub const MAIN_MENU_SINGLE_PHASE: &str = "main_menu.single_phase";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const INVALID_NUMBER: &str = "error.invalid_number";

    pub const PRODUCTIVITY_HEADING: &str = "productivity.heading";
    pub const AOF_HEADING: &str = "aof.heading";
    pub const IPR_HEADING: &str = "ipr.heading";
    pub const SINGLE_PHASE_HEADING: &str = "single_phase.heading";

    pub const PROMPT_Q_TEST: &str = "prompt.q_test";
    pub const PROMPT_PWF_TEST: &str = "prompt.pwf_test";
    pub const PROMPT_PR: &str = "prompt.pr";
    pub const PROMPT_PB: &str = "prompt.pb";
    pub const PROMPT_EF: &str = "prompt.ef";
    pub const PROMPT_EF2: &str = "prompt.ef2";
    pub const PROMPT_METHOD: &str = "prompt.method";
    pub const PROMPT_PWF_COUNT: &str = "prompt.pwf_count";
    pub const PROMPT_PWF_VALUE: &str = "prompt.pwf_value";
    pub const PROMPT_KO: &str = "prompt.ko";
    pub const PROMPT_H: &str = "prompt.h";
    pub const PROMPT_BO: &str = "prompt.bo";
    pub const PROMPT_UO: &str = "prompt.uo";
    pub const PROMPT_RE: &str = "prompt.re";
    pub const PROMPT_RW: &str = "prompt.rw";
    pub const PROMPT_SKIN: &str = "prompt.skin";
    pub const PROMPT_REGIME: &str = "prompt.regime";
    pub const PROMPT_PWF: &str = "prompt.pwf";

    pub const RESULT_J: &str = "result.j";
    pub const RESULT_AOF: &str = "result.aof";
    pub const RESULT_QB: &str = "result.qb";
    pub const RESULT_QO_AT: &str = "result.qo_at";
    pub const RESULT_CURVE_POINTS: &str = "result.curve_points";
    pub const RESULT_CURVE_SMOOTHED: &str = "result.curve_smoothed";
    pub const RESULT_BUBBLE_POINT: &str = "result.bubble_point";
    pub const RESULT_J_DARCY: &str = "result.j_darcy";
    pub const RESULT_Q_DARCY: &str = "result.q_darcy";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_RESOLUTION: &str = "settings.prompt_resolution";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Es,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("es") {
            Language::Es
        } else {
            Language::En
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
    /// 언어 코드(en/es)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 locales/ 를 찾고, 그래도 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn has_overrides(&self) -> bool {
        self.overrides.is_some()
    }

    /// 번역을 가져온다. 언어팩 → 해당 언어 내장 문자열 → 영어 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        let built_in = match self.lang {
            Language::Es => es(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        built_in.unwrap_or(key)
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
        other if other.starts_with("en") => Some("en".into()),
        other if other.starts_with("es") => Some("es".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_lang) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|loc| {
            let base = loc.split(['.', '_', '-']).next().unwrap_or_default().to_string();
            normalize_lang(&base)
        })
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
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
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        DEFAULT_HINT => "default",
        MAIN_MENU_TITLE => "\n=== Well Inflow Toolbox ===",
        MAIN_MENU_PRODUCTIVITY => "1) Productivity index (J)",
        MAIN_MENU_AOF => "2) AOF and bubble-point rate (Qb)",
        MAIN_MENU_IPR => "3) Qo and IPR curve",
        MAIN_MENU_SINGLE_PHASE => "4) Single-phase nodal analysis",
        MAIN_MENU_SETTINGS => "5) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid selection, try again.",
        INVALID_NUMBER => "Please enter a number.",
        PRODUCTIVITY_HEADING => "\n-- Productivity index --",
        AOF_HEADING => "\n-- Absolute open flow --",
        IPR_HEADING => "\n-- Qo and IPR curve --",
        SINGLE_PHASE_HEADING => "\n-- Single-phase Darcy radial flow --",
        PROMPT_Q_TEST => "Test rate q_test [bpd]",
        PROMPT_PWF_TEST => "Test flowing pressure pwf_test [psia]",
        PROMPT_PR => "Reservoir pressure pr [psia]",
        PROMPT_PB => "Bubble-point pressure pb [psia]",
        PROMPT_EF => "Flow efficiency ef",
        PROMPT_EF2 => "Second efficiency ef2 (empty = none)",
        PROMPT_METHOD => "Method: 1=Darcy 2=Vogel 3=Standing 4=Composite IPR",
        PROMPT_PWF_COUNT => "Number of pwf values",
        PROMPT_PWF_VALUE => "pwf value #",
        PROMPT_KO => "Permeability ko [mD]",
        PROMPT_H => "Net thickness h [ft]",
        PROMPT_BO => "Oil formation volume factor bo [bbl/stb]",
        PROMPT_UO => "Oil viscosity uo [cp]",
        PROMPT_RE => "Drainage radius re [ft]",
        PROMPT_RW => "Wellbore radius rw [ft]",
        PROMPT_SKIN => "Skin factor s",
        PROMPT_REGIME => "Flow regime: 1=pseudo-steady 2=steady",
        PROMPT_PWF => "Flowing bottomhole pressure pwf [psia]",
        RESULT_J => "Productivity index J:",
        RESULT_AOF => "Absolute open flow (AOF):",
        RESULT_QB => "Rate at bubble point (Qb):",
        RESULT_QO_AT => "Qo at pwf",
        RESULT_CURVE_POINTS => "IPR points (sorted by rate):",
        RESULT_CURVE_SMOOTHED => "Smoothed curve (every n-th sample):",
        RESULT_BUBBLE_POINT => "Bubble point marker:",
        RESULT_J_DARCY => "Darcy productivity index J:",
        RESULT_Q_DARCY => "Darcy rate Q:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current:",
        SETTINGS_OPTIONS => "1) Language  2) Curve resolution  3) Default method",
        SETTINGS_PROMPT_LANGUAGE => "Language (auto/en/es)",
        SETTINGS_PROMPT_RESOLUTION => "Curve resolution (>= 2)",
        SETTINGS_INVALID => "Invalid value, nothing changed.",
        SETTINGS_SAVED => "Settings updated.",
        _ => return None,
    };
    Some(s)
}

fn es(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Saliendo.",
        DEFAULT_HINT => "por defecto",
        MAIN_MENU_TITLE => "\n=== Potencial de producción ===",
        MAIN_MENU_PRODUCTIVITY => "1) Índice de productividad (J)",
        MAIN_MENU_AOF => "2) AOF y caudal a presión de burbuja (Qb)",
        MAIN_MENU_IPR => "3) Qo y curva IPR",
        MAIN_MENU_SINGLE_PHASE => "4) Análisis nodal para flujo monofásico",
        MAIN_MENU_SETTINGS => "5) Configuración",
        MAIN_MENU_EXIT => "0) Salir",
        PROMPT_MENU_SELECT => "Seleccione: ",
        INVALID_SELECTION_RETRY => "Selección inválida, intente de nuevo.",
        INVALID_NUMBER => "Ingrese un número.",
        PRODUCTIVITY_HEADING => "\n-- Índice de productividad --",
        AOF_HEADING => "\n-- Flujo absoluto abierto --",
        IPR_HEADING => "\n-- Qo y curva IPR --",
        SINGLE_PHASE_HEADING => "\n-- Flujo radial monofásico (Darcy) --",
        PROMPT_Q_TEST => "Caudal de prueba q_test [bpd]",
        PROMPT_PWF_TEST => "Presión de fondo fluyente de prueba [psia]",
        PROMPT_PR => "Presión del yacimiento pr [psia]",
        PROMPT_PB => "Presión de burbuja pb [psia]",
        PROMPT_EF => "Factor de eficiencia ef",
        PROMPT_EF2 => "Segundo factor de eficiencia ef2 (vacío = ninguno)",
        PROMPT_METHOD => "Método: 1=Darcy 2=Vogel 3=Standing 4=IPR compuesto",
        PROMPT_PWF_COUNT => "Cantidad de valores de Pwf",
        PROMPT_PWF_VALUE => "Valor de Pwf #",
        PROMPT_KO => "Permeabilidad ko [mD]",
        PROMPT_H => "Espesor h [ft]",
        PROMPT_BO => "Factor volumétrico bo [bbl/stb]",
        PROMPT_UO => "Viscosidad del petróleo uo [cp]",
        PROMPT_RE => "Radio externo re [ft]",
        PROMPT_RW => "Radio del pozo rw [ft]",
        PROMPT_SKIN => "Factor de daño s",
        PROMPT_REGIME => "Régimen: 1=seudocontinuo 2=continuo",
        PROMPT_PWF => "Presión de fondo fluyente pwf [psia]",
        RESULT_J => "Índice de productividad J:",
        RESULT_AOF => "Flujo absoluto abierto (AOF):",
        RESULT_QB => "Caudal a presión de burbuja (Qb):",
        RESULT_QO_AT => "Qo para Pwf",
        RESULT_CURVE_POINTS => "Puntos IPR (ordenados por caudal):",
        RESULT_CURVE_SMOOTHED => "Curva suavizada (cada n-ésima muestra):",
        RESULT_BUBBLE_POINT => "Punto de burbuja:",
        RESULT_J_DARCY => "Índice de productividad Darcy J:",
        RESULT_Q_DARCY => "Caudal Darcy Q:",
        SETTINGS_HEADING => "\n-- Configuración --",
        SETTINGS_CURRENT => "Actual:",
        SETTINGS_OPTIONS => "1) Idioma  2) Resolución de curva  3) Método por defecto",
        SETTINGS_PROMPT_LANGUAGE => "Idioma (auto/en/es)",
        SETTINGS_PROMPT_RESOLUTION => "Resolución de curva (>= 2)",
        SETTINGS_INVALID => "Valor inválido, sin cambios.",
        SETTINGS_SAVED => "Configuración actualizada.",
        _ => return None,
    };
    Some(s)
}
