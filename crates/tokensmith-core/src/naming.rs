//! Case conversion for emitted identifiers
//!
//! Source paths are lowercase-kebab segments; each platform target
//! re-cases them. Everything funnels through a word split so a segment
//! like `primary-dark` cases the same way everywhere.

/// Split path segments into lowercase words. Hyphens inside a segment are
/// word boundaries too.
pub fn words(segments: &[impl AsRef<str>]) -> Vec<String> {
    segments
        .iter()
        .flat_map(|seg| {
            seg.as_ref()
                .split('-')
                .filter(|w| !w.is_empty())
                .map(|w| w.to_lowercase())
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn to_kebab_case(segments: &[impl AsRef<str>]) -> String {
    words(segments).join("-")
}

pub fn to_snake_case(segments: &[impl AsRef<str>]) -> String {
    words(segments).join("_")
}

pub fn to_pascal_case(segments: &[impl AsRef<str>]) -> String {
    words(segments).iter().map(|w| capitalize(w)).collect()
}

pub fn to_camel_case(segments: &[impl AsRef<str>]) -> String {
    let words = words(segments);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Uppercase words joined by underscores, for Kotlin-style constants.
pub fn to_screaming_snake_case(segments: &[impl AsRef<str>]) -> String {
    words(segments)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// True when a segment already follows the lowercase-kebab convention the
/// governance naming rule enforces.
pub fn is_kebab_segment(segment: &str) -> bool {
    if segment.is_empty() || segment.starts_with('-') || segment.ends_with('-') {
        return false;
    }
    if segment.contains("--") {
        return false;
    }
    segment
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_transforms() {
        let segments = ["color", "primary-dark", "500"];
        assert_eq!(to_kebab_case(&segments), "color-primary-dark-500");
        assert_eq!(to_snake_case(&segments), "color_primary_dark_500");
        assert_eq!(to_pascal_case(&segments), "ColorPrimaryDark500");
        assert_eq!(to_camel_case(&segments), "colorPrimaryDark500");
        assert_eq!(to_screaming_snake_case(&segments), "COLOR_PRIMARY_DARK_500");
    }

    #[test]
    fn test_single_segment() {
        assert_eq!(to_camel_case(&["spacing"]), "spacing");
        assert_eq!(to_pascal_case(&["spacing"]), "Spacing");
    }

    #[test]
    fn test_is_kebab_segment() {
        assert!(is_kebab_segment("primary"));
        assert!(is_kebab_segment("primary-dark"));
        assert!(is_kebab_segment("500"));
        assert!(!is_kebab_segment("Primary"));
        assert!(!is_kebab_segment("primary_dark"));
        assert!(!is_kebab_segment("-primary"));
        assert!(!is_kebab_segment("primary--dark"));
        assert!(!is_kebab_segment(""));
    }
}
