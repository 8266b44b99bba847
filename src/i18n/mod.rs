// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Localized UI text.
//!
//! Message ids are the English text itself, so a missing translation falls
//! back to readable output. Catalogs are JSON objects embedded at build time.

use std::collections::HashMap;

/// Languages with an embedded catalog. The first one is the fallback.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "zh-CN"];

const EN_MESSAGES: &str = include_str!("en.json");
const ZH_CN_MESSAGES: &str = include_str!("zh-CN.json");

/// A loaded message catalog for one language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    language: String,
    messages: HashMap<String, String>,
}

/// Map a requested language (`zh-CN`, `zh_CN.UTF-8`, `en_US`) onto a supported one.
pub fn resolve_language(requested: &str) -> &'static str {
    let tag = requested
        .split('.')
        .next()
        .unwrap_or_default()
        .replace('_', "-");
    SUPPORTED_LANGUAGES
        .iter()
        .copied()
        .find(|lang| lang.eq_ignore_ascii_case(&tag))
        .unwrap_or(SUPPORTED_LANGUAGES[0])
}

impl Catalog {
    /// Load the catalog for `language`, falling back to English.
    pub fn load(language: &str) -> Self {
        let language = resolve_language(language);
        let source = match language {
            "zh-CN" => ZH_CN_MESSAGES,
            _ => EN_MESSAGES,
        };
        let messages = match serde_json::from_str(source) {
            Ok(messages) => messages,
            Err(e) => {
                log::warn!("Failed to parse message catalog for {}: {}", language, e);
                HashMap::new()
            }
        };
        log::debug!("Loaded {} messages for {}", messages.len(), language);
        Self {
            language: language.to_string(),
            messages,
        }
    }

    pub fn english() -> Self {
        Self::load("en")
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translated text for `id`, or `id` itself.
    pub fn text(&self, id: &str) -> String {
        self.messages.get(id).cloned().unwrap_or_else(|| id.to_string())
    }

    /// Translate `id` and substitute `{name}` placeholders.
    pub fn format(&self, id: &str, args: &[(&str, &str)]) -> String {
        self.format_or(id, id, args)
    }

    /// Like [`Catalog::format`], but with an explicit default when `id` has no translation.
    pub fn format_or(&self, id: &str, default: &str, args: &[(&str, &str)]) -> String {
        let template = self.messages.get(id).map(String::as_str).unwrap_or(default);
        args.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_language() {
        assert_eq!(resolve_language("zh-CN"), "zh-CN");
        assert_eq!(resolve_language("zh_CN.UTF-8"), "zh-CN");
        assert_eq!(resolve_language("en_US.UTF-8"), "en");
        assert_eq!(resolve_language("fr"), "en");
        assert_eq!(resolve_language(""), "en");
    }

    #[test]
    fn test_english_falls_back_to_id() {
        let catalog = Catalog::english();
        assert_eq!(catalog.text("Motion masks"), "Motion masks");
        assert_eq!(
            catalog.format("Add to {name}", &[("name", "person")]),
            "Add to person"
        );
    }

    #[test]
    fn test_chinese_catalog_translates() {
        let catalog = Catalog::load("zh-CN");
        assert_eq!(catalog.language(), "zh-CN");
        assert_eq!(catalog.text("Save"), "保存");
        assert_eq!(catalog.format("Add to {name}", &[("name", "car")]), "添加到 car");
        assert_eq!(catalog.text("not in catalog"), "not in catalog");
    }

    #[test]
    fn test_format_or_uses_default() {
        let catalog = Catalog::english();
        assert_eq!(
            catalog.format_or("minute_ago", "{amount} minutes ago", &[("amount", "4")]),
            "4 minutes ago"
        );
    }
}
