// src/common/i18n.rs

use std::{collections::HashMap, sync::{Arc, LazyLock}};

pub const DEFAULT_LANG: &str = "en";

// Os catálogos vão embutidos no binário.
const CATALOGS: [(&str, &str); 2] = [
    ("en", include_str!("../../locales/en.json")),
    ("id", include_str!("../../locales/id.json")),
];

static FALLBACK: LazyLock<I18nStore> = LazyLock::new(|| {
    I18nStore::load().unwrap_or_else(|e| {
        tracing::error!("Falha ao carregar os catálogos de mensagens: {}", e);
        I18nStore::default()
    })
});

/// Mensagens de erro por idioma, indexadas pela chave de `AppError::message_key`.
#[derive(Debug, Clone, Default)]
pub struct I18nStore {
    catalogs: Arc<HashMap<String, HashMap<String, String>>>,
}

impl I18nStore {
    pub fn load() -> Result<Self, serde_json::Error> {
        let mut catalogs = HashMap::new();
        for (lang, raw) in CATALOGS {
            let messages: HashMap<String, String> = serde_json::from_str(raw)?;
            catalogs.insert(lang.to_string(), messages);
        }
        Ok(Self {
            catalogs: Arc::new(catalogs),
        })
    }

    pub fn fallback() -> &'static I18nStore {
        &FALLBACK
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.catalogs.contains_key(lang)
    }

    // Procura no idioma pedido e cai para o inglês.
    pub fn translate(&self, lang: &str, key: &str) -> Option<&str> {
        self.translate_exact(lang, key)
            .or_else(|| self.translate_exact(DEFAULT_LANG, key))
    }

    // Mensagens de sucesso: sem tradução, devolve a própria chave.
    pub fn message(&self, lang: &str, key: &str) -> String {
        self.translate(lang, key).unwrap_or(key).to_string()
    }

    pub fn translate_exact(&self, lang: &str, key: &str) -> Option<&str> {
        self.catalogs
            .get(lang)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }
}
