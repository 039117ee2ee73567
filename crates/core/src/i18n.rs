//! Localized business messages.
//!
//! Messages are keyed by their English text. Each business crate publishes a
//! table of translations; the API layer assembles them into a [`Catalog`] and
//! renders errors and notifications in the caller's locale.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Supported UI locales.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// Parse a language tag such as `fr`, `fr-FR` or `fr_FR`.
    ///
    /// Unknown languages fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        let lang = tag
            .split(|c| c == '-' || c == '_' || c == ',' || c == ';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match lang.as_str() {
            "fr" => Locale::Fr,
            _ => Locale::En,
        }
    }
}

/// A translatable message: an English key plus positional `{}` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    key: Cow<'static, str>,
    args: Vec<String>,
}

impl Message {
    pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: key.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl ToString) -> Self {
        self.args.push(value.to_string());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Render in the given locale, falling back to the English key.
    pub fn render(&self, catalog: &Catalog, locale: Locale) -> String {
        format_positional(catalog.translate(locale, &self.key), &self.args)
    }
}

impl core::fmt::Display for Message {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&format_positional(&self.key, &self.args))
    }
}

impl From<&'static str> for Message {
    fn from(value: &'static str) -> Self {
        Message::new(value)
    }
}

impl From<String> for Message {
    fn from(value: String) -> Self {
        Message::new(value)
    }
}

/// Translation tables, one per non-English locale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<Locale, HashMap<&'static str, &'static str>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table of `(english key, translation)` pairs for a locale.
    pub fn with(mut self, locale: Locale, entries: &[(&'static str, &'static str)]) -> Self {
        let table = self.tables.entry(locale).or_default();
        for (key, value) in entries {
            table.insert(*key, *value);
        }
        self
    }

    pub fn translate<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        if locale == Locale::En {
            return key;
        }
        self.tables
            .get(&locale)
            .and_then(|t| t.get(key).copied())
            .unwrap_or(key)
    }
}

fn format_positional(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(a) => out.push_str(a),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
