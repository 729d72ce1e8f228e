use crate::domain::ports::Translate;
use std::collections::HashMap;

/// Looks keys up in a fixed catalog, falling back to the key itself.
///
/// An empty catalog is the untranslated (source language) UI.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    catalog: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn new(catalog: HashMap<String, String>) -> Self {
        Self { catalog }
    }
}

impl Translate for CatalogTranslator {
    fn translate(&self, key: &str) -> String {
        self.catalog
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
