use anyhow::{anyhow, Result};
use std::path::Path;

/// Image file extensions a tournament can show.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn validate_category_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(anyhow!("Category key cannot be empty"));
    }

    if key.len() > 32 {
        return Err(anyhow!("Category key cannot be longer than 32 characters"));
    }

    // Keys double as directory names and callback payloads
    if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(anyhow!("Category key can only contain letters, numbers, '_' and '-'"));
    }

    if key.starts_with('-') {
        return Err(anyhow!("Category key must start with a letter or number"));
    }

    Ok(())
}

/// Lowercased extension of `path` if it is one of the supported image types.
pub fn image_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

pub fn is_supported_image(path: &Path) -> bool {
    image_extension(path).is_some()
}

/// A bare file name inside a gallery: no separators, no dot files, image extension.
pub fn validate_gallery_file_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow!("File name cannot be empty"));
    }

    if name.len() > 64 {
        return Err(anyhow!("File name cannot be longer than 64 characters"));
    }

    if name.contains('/') || name.contains('\\') || name.starts_with('.') {
        return Err(anyhow!("File name cannot contain path separators or start with a dot"));
    }

    if !is_supported_image(Path::new(name)) {
        return Err(anyhow!("File must be a .jpg, .jpeg or .png image"));
    }

    Ok(())
}

/// Name shown in stats: full name, then `@username`, then the numeric id.
pub fn display_name(full_name: &str, username: Option<&str>, user_id: u64) -> String {
    let full_name = full_name.trim();
    if !full_name.is_empty() {
        return full_name.to_string();
    }

    match username.map(str::trim).filter(|u| !u.is_empty()) {
        Some(username) => format!("@{username}"),
        None => user_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_category_key_valid() {
        assert!(validate_category_key("cats").is_ok());
        assert!(validate_category_key("sea_views").is_ok());
        assert!(validate_category_key("top-10").is_ok());
        assert!(validate_category_key("2024").is_ok());
    }

    #[test]
    fn test_validate_category_key_invalid() {
        assert!(validate_category_key("").is_err());
        assert!(validate_category_key("../secret").is_err());
        assert!(validate_category_key("a b").is_err());
        assert!(validate_category_key("-cats").is_err());
        assert!(validate_category_key("кошки").is_err());
        assert!(validate_category_key(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_image_extension_is_case_insensitive() {
        assert_eq!(image_extension(Path::new("a/b.JPG")), Some("jpg".to_string()));
        assert_eq!(image_extension(Path::new("b.Jpeg")), Some("jpeg".to_string()));
        assert_eq!(image_extension(Path::new("b.png")), Some("png".to_string()));
        assert_eq!(image_extension(Path::new("b.gif")), None);
        assert_eq!(image_extension(Path::new("png")), None);
    }

    #[test]
    fn test_validate_gallery_file_name() {
        assert!(validate_gallery_file_name("1700000000000_abc.jpg").is_ok());
        assert!(validate_gallery_file_name("photo.PNG").is_ok());

        assert!(validate_gallery_file_name("").is_err());
        assert!(validate_gallery_file_name("../other/1.jpg").is_err());
        assert!(validate_gallery_file_name("dir\\1.jpg").is_err());
        assert!(validate_gallery_file_name(".hidden.jpg").is_err());
        assert!(validate_gallery_file_name("notes.txt").is_err());
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(display_name("Ann Lee", Some("ann"), 1), "Ann Lee");
        assert_eq!(display_name("  ", Some("ann"), 1), "@ann");
        assert_eq!(display_name("", None, 42), "42");
        assert_eq!(display_name("", Some(""), 42), "42");
    }
}
