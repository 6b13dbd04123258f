//! Serde-Helfer für Felder, die als Zahl oder als numerischer String ankommen.
//!
//! Marker-Eigenschaften stammen aus deklarativen Property-Sets, in denen
//! `"12.5"` und `12.5` gleichwertig sind. Leere Strings gelten als "nicht gesetzt".

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Parst einen numerischen String. Leer → `Ok(None)`.
pub(crate) fn parse_lenient(text: &str) -> Result<Option<f64>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        Ok(_) => Err(format!("Wert '{}' ist nicht endlich", trimmed)),
        Err(_) => Err(format!("Wert '{}' ist keine gueltige Zahl", trimmed)),
    }
}

/// Optionales numerisches Feld (`null`, leerer String → `None`).
pub(crate) fn opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(value)) => Ok(Some(value)),
        Some(NumberOrString::Text(text)) => parse_lenient(&text).map_err(serde::de::Error::custom),
    }
}

/// Pflichtfeld: muss eine Zahl oder ein nicht-leerer numerischer String sein.
pub(crate) fn required<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => parse_lenient(&text)
            .map_err(serde::de::Error::custom)?
            .ok_or_else(|| serde::de::Error::custom("Pflichtfeld ist leer")),
    }
}
