use std::path::Path;
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 10;

/// Extension of a client-supplied filename, leading dot included
///
/// Only the final component is considered and it must be a short ASCII
/// alphanumeric token; anything else yields `None`.
pub fn file_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?;

    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }

    Some(format!(".{}", ext))
}

/// Generate a unique storage name of the form `<uuid><ext>`
pub fn storage_name(original: Option<&str>, default_extension: &str) -> String {
    let ext = original
        .and_then(file_extension)
        .unwrap_or_else(|| default_extension.to_string());

    format!("{}{}", Uuid::new_v4(), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_preserved() {
        assert_eq!(file_extension("photo.png").as_deref(), Some(".png"));
        assert_eq!(file_extension("archive.tar.gz").as_deref(), Some(".gz"));
        assert_eq!(file_extension("IMG_0001.JPEG").as_deref(), Some(".JPEG"));
    }

    #[test]
    fn test_missing_or_unsafe_extension() {
        assert_eq!(file_extension("photo"), None);
        assert_eq!(file_extension(".bashrc"), None);
        assert_eq!(file_extension("photo."), None);
        assert_eq!(file_extension("photo.p g"), None);
        assert_eq!(file_extension("photo.averyveryverylongext"), None);
    }

    #[test]
    fn test_storage_name_shape() {
        let name = storage_name(Some("bottle.png"), ".jpg");
        let (stem, ext) = name.split_at(36);

        assert!(Uuid::parse_str(stem).is_ok());
        assert_eq!(ext, ".png");

        let name = storage_name(None, ".jpg");
        assert!(name.ends_with(".jpg"));
        assert_eq!(name.len(), 36 + 4);
    }

    #[test]
    fn test_storage_names_are_unique() {
        let a = storage_name(Some("same.png"), ".jpg");
        let b = storage_name(Some("same.png"), ".jpg");
        assert_ne!(a, b);
    }
}
