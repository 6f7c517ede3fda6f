use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

use crate::utils::validation::validate_category_key;

pub const DEFAULT_CATEGORIES: &str = "cats:Cats 🐱,dogs:Dogs 🐶,landscapes:Landscapes 🏞";
const DEFAULT_STATS_FILE: &str = "stats.json";

/// A curated image folder offered in the main menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: String,
    pub label: String,
}

/// Ordered catalog of the curated categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories(Vec<Category>);

impl Categories {
    pub fn new(categories: Vec<Category>) -> Self {
        Self(categories)
    }

    /// Parses `key:Label,key:Label`. A missing label falls back to the key.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut categories: Vec<Category> = Vec::new();

        for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, label) = match item.split_once(':') {
                Some((key, label)) => (key.trim(), label.trim()),
                None => (item, ""),
            };
            validate_category_key(key).map_err(|e| anyhow!("Invalid CATEGORIES entry '{item}': {e}"))?;
            if categories.iter().any(|c| c.key == key) {
                return Err(anyhow!("Duplicate category '{key}' in CATEGORIES"));
            }
            categories.push(Category {
                key: key.to_string(),
                label: if label.is_empty() { key.to_string() } else { label.to_string() },
            });
        }

        if categories.is_empty() {
            return Err(anyhow!("CATEGORIES must name at least one category"));
        }

        Ok(Self(categories))
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.0.iter().find(|c| c.key == key)
    }

    /// Display label for a key, or the key itself when unknown.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).map_or(key, |c| c.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self::parse(DEFAULT_CATEGORIES).unwrap_or_else(|_| Self(Vec::new()))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub images_root: PathBuf,
    pub uploads_root: PathBuf,
    pub stats_file: PathBuf,
    pub http_port: u16,
    pub max_gallery_photos: usize,
    pub categories: Categories,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let images_root = PathBuf::from(env_or_default("IMAGES_ROOT", "images"));
        let uploads_root = PathBuf::from(env_or_default("UPLOADS_ROOT", "uploads"));
        let stats_file = stats_file_from_env();

        let port_str = env_or_default("HTTP_PORT", "3000");
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let max_str = env_or_default("MAX_GALLERY_PHOTOS", "100");
        let max_gallery_photos: usize = max_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid MAX_GALLERY_PHOTOS"))?;
        if max_gallery_photos < 2 {
            return Err(anyhow!("MAX_GALLERY_PHOTOS must allow at least 2 photos"));
        }

        let categories = Categories::parse(&env_or_default("CATEGORIES", DEFAULT_CATEGORIES))?;

        Ok(Config {
            telegram_bot_token: token,
            images_root,
            uploads_root,
            stats_file,
            http_port,
            max_gallery_photos,
            categories,
        })
    }
}

/// Location of the stats file, shared with the `stats-admin` tool.
pub fn stats_file_from_env() -> PathBuf {
    PathBuf::from(env_or_default("STATS_FILE", DEFAULT_STATS_FILE))
}

fn env_or_default(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_categories_with_labels() {
        let categories = Categories::parse("cats:Cats 🐱, dogs").unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories.label("cats"), "Cats 🐱");
        assert_eq!(categories.label("dogs"), "dogs");
        assert_eq!(categories.label("birds"), "birds");
    }

    #[test]
    fn test_parse_categories_rejects_bad_keys() {
        assert!(Categories::parse("../etc:Oops").is_err());
        assert!(Categories::parse("cats:A,cats:B").is_err());
        assert!(Categories::parse(" , ").is_err());
    }

    #[test]
    fn test_default_categories() {
        let categories = Categories::default();
        assert_eq!(categories.len(), 3);
        assert!(categories.get("landscapes").is_some());
    }
}
