// i18n.rs - runtime string tables for window title, menus and HUD
//
// - Strings live in either:
//   A) assets/i18n/<lang>.json
//   B) assets/i18n.json (single file, format: { "<lang>": { "key": "value" } })
// - Load order: selected lang -> fallback en
// - Lookup: tr("key") / tr_with("key", &[("name", ...)]) with {name} placeholders
//
// Language selection:
// - CLI: --lang <code>
// - Env: ANGLE_VIEWER_LANG
// - Default: en

use log::{info, warn};
use once_cell::sync::OnceCell;
use std::{collections::HashMap, path::Path, sync::RwLock};

use crate::config::find_asset;

pub const FALLBACK_LANG: &str = "en";

/// Languages offered in the language menu: (code, native name).
pub const LANGUAGES: [(&str, &str); 3] = [("en", "English"), ("zh-Hans", "简体中文"), ("fr", "Français")];

#[derive(Debug, Clone)]
struct I18n {
    map: HashMap<String, String>,
    fallback_map: HashMap<String, String>,
}

static I18N: OnceCell<RwLock<I18n>> = OnceCell::new();

fn load_json_map(path: &Path) -> Option<HashMap<String, String>> {
    let text = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&text) {
        Ok(map) => Some(map),
        Err(e) => {
            warn!("bad string table {}: {}", path.display(), e);
            None
        }
    }
}

fn load_multi_lang_json(path: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let text = std::fs::read_to_string(path).ok()?;
    let mut all: HashMap<String, HashMap<String, String>> = match serde_json::from_str(&text) {
        Ok(all) => all,
        Err(e) => {
            warn!("bad string table {}: {}", path.display(), e);
            return None;
        }
    };
    all.remove(lang)
}

fn load_lang(lang: &str) -> HashMap<String, String> {
    if let Some(p) = find_asset(&format!("i18n/{}.json", lang)) {
        if let Some(m) = load_json_map(&p) {
            return m;
        }
    }

    if let Some(p) = find_asset("i18n.json") {
        if let Some(m) = load_multi_lang_json(&p, lang) {
            return m;
        }
    }

    warn!("no strings found for language {:?}", lang);
    HashMap::new()
}

/// Initialize global i18n. Later calls replace the current tables.
pub fn init(lang: &str) {
    info!("language: {}", lang);
    let map = load_lang(lang);
    let fallback_map = if lang == FALLBACK_LANG {
        map.clone()
    } else {
        load_lang(FALLBACK_LANG)
    };

    let i = I18n { map, fallback_map };

    if let Some(lock) = I18N.get() {
        if let Ok(mut w) = lock.write() {
            *w = i;
        }
    } else {
        let _ = I18N.set(RwLock::new(i));
    }
}

/// Get localized text by key. If key missing, returns key itself.
pub fn tr(key: &str) -> String {
    let Some(i) = I18N.get().and_then(|l| l.read().ok()) else {
        return key.to_string();
    };

    i.map
        .get(key)
        .or_else(|| i.fallback_map.get(key))
        .cloned()
        .unwrap_or_else(|| key.to_string())
}

/// Get localized text and substitute `{name}` placeholders.
pub fn tr_with(key: &str, args: &[(&str, String)]) -> String {
    substitute(tr(key), args)
}

/// Replaces `{name}` placeholders. Placeholders without an argument are kept.
pub fn substitute(mut s: String, args: &[(&str, String)]) -> String {
    for (k, v) in args {
        let placeholder = format!("{{{}}}", k);
        s = s.replace(&placeholder, v);
    }
    s
}

/// Choose language from CLI/env.
pub fn resolve_lang_from_args() -> String {
    let mut it = std::env::args();
    while let Some(a) = it.next() {
        if a == "--lang" {
            if let Some(v) = it.next() {
                return v;
            }
        }
    }

    if let Ok(v) = std::env::var("ANGLE_VIEWER_LANG") {
        if !v.trim().is_empty() {
            return v;
        }
    }

    FALLBACK_LANG.to_string()
}
