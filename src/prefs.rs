//! Theme and language preference flags, their persistence, and the
//! translation pass.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::dom::{Dom, Role};

pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    Th,
    En,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Th => "th",
            Language::En => "en",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Language::Th => Language::En,
            Language::En => Language::Th,
        }
    }

    /// Attribute holding this language's text on translatable elements.
    pub fn text_attribute(self) -> &'static str {
        match self {
            Language::Th => "data-th",
            Language::En => "data-en",
        }
    }

    /// Label shown on the toggle: the code of the language it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Language::Th => "EN",
            Language::En => "TH",
        }
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "th" => Ok(Language::Th),
            "en" => Ok(Language::En),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistence capability for preference flags. Writes are fire-and-forget.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

/// Session-only store; also the fallback when browser storage is blocked.
/// Clones share the same map so tests can inspect what was written.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    fn save(&mut self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

/// Current flags plus the store they persist to.
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
    store: Box<dyn PreferenceStore>,
}

impl Preferences {
    /// Reads both flags; absent or unrecognised values fall back to defaults.
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let theme = read_flag(store.as_ref(), THEME_KEY);
        let language = read_flag(store.as_ref(), LANGUAGE_KEY);
        Self {
            theme,
            language,
            store,
        }
    }

    pub fn apply_theme<D: Dom>(&self, dom: &mut D) {
        if let Some(root) = dom.query(Role::Root) {
            dom.set_attribute(&root, "data-theme", self.theme.as_str());
        }
    }

    pub fn toggle_theme<D: Dom>(&mut self, dom: &mut D) -> Theme {
        self.theme = self.theme.flipped();
        self.apply_theme(dom);
        self.store.save(THEME_KEY, self.theme.as_str());
        log::debug!("theme -> {}", self.theme);
        self.theme
    }

    pub fn toggle_language<D: Dom>(&mut self, dom: &mut D) -> Language {
        self.language = self.language.flipped();
        translate(dom, self.language);
        self.store.save(LANGUAGE_KEY, self.language.as_str());
        log::debug!("language -> {}", self.language);
        self.language
    }
}

fn read_flag<T: FromStr + Default>(store: &dyn PreferenceStore, key: &str) -> T {
    match store.load(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("ignoring unrecognised {key} preference {raw:?}");
            T::default()
        }),
        None => T::default(),
    }
}

/// Renders every translatable element in `lang`, relabels the language
/// toggle and sets the root `lang` attribute.
pub fn translate<D: Dom>(dom: &mut D, lang: Language) {
    let attr = lang.text_attribute();
    for el in dom.query_all(Role::Translatable) {
        if let Some(text) = dom.attribute(&el, attr) {
            dom.set_text(&el, &text);
        }
    }
    if let Some(toggle) = dom.query(Role::LanguageToggle) {
        for label in dom.query_within(&toggle, Role::LanguageLabel) {
            dom.set_text(&label, lang.toggle_label());
        }
    }
    if let Some(root) = dom.query(Role::Root) {
        dom.set_attribute(&root, "lang", lang.as_str());
    }
}
