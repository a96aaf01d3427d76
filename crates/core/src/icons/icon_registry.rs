use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Glyphs available on a fresh install and after a reset.
pub const DEFAULT_ICONS: [&str; 16] = [
    "📱", "💻", "🎧", "⌚", "📷", "🎮", "👟", "👜", "👔", "💄", "🛋️", "🛏️", "🚲", "🎸", "📚", "📦",
];

/// Ordered set of distinct glyphs. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", from = "Vec<String>")]
pub struct IconRegistry {
    icons: Vec<String>,
}

impl Default for IconRegistry {
    fn default() -> Self {
        Self {
            icons: DEFAULT_ICONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IconRegistry {
    /// Builds a registry from stored glyphs, dropping blanks and duplicates.
    /// Falls back to the defaults when nothing usable remains.
    pub fn from_glyphs<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut icons: Vec<String> = Vec::new();
        for glyph in glyphs {
            let glyph = glyph.as_ref().trim();
            if !glyph.is_empty() && !icons.iter().any(|i| i == glyph) {
                icons.push(glyph.to_string());
            }
        }
        if icons.is_empty() {
            return Self::default();
        }
        Self { icons }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.icons
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn contains(&self, glyph: &str) -> bool {
        self.icons.iter().any(|i| i == glyph.trim())
    }

    /// First glyph, used as the picker's preselection.
    pub fn first(&self) -> &str {
        self.icons.first().map(String::as_str).unwrap_or(DEFAULT_ICONS[0])
    }

    pub fn add(&mut self, glyph: &str) -> Result<(), ValidationError> {
        let glyph = glyph.trim();
        if glyph.is_empty() {
            return Err(ValidationError::EmptyIcon);
        }
        if self.contains(glyph) {
            return Err(ValidationError::DuplicateIcon(glyph.to_string()));
        }
        self.icons.push(glyph.to_string());
        Ok(())
    }

    pub fn remove(&mut self, glyph: &str) -> Result<(), ValidationError> {
        let glyph = glyph.trim();
        let position = self
            .icons
            .iter()
            .position(|i| i == glyph)
            .ok_or_else(|| ValidationError::IconNotFound(glyph.to_string()))?;
        if self.icons.len() <= 1 {
            return Err(ValidationError::LastIcon);
        }
        self.icons.remove(position);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl From<Vec<String>> for IconRegistry {
    fn from(glyphs: Vec<String>) -> Self {
        Self::from_glyphs(glyphs)
    }
}

impl From<IconRegistry> for Vec<String> {
    fn from(registry: IconRegistry) -> Self {
        registry.icons
    }
}
