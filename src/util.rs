//! Shared utility functions.

/// Upper-case the first character, leaving the rest untouched.
///
/// "hello" -> "Hello"
/// "über" -> "Über"
/// "README" -> "README"
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("hello"), "Hello");
        assert_eq!(capitalize_first("Note"), "Note");
        assert_eq!(capitalize_first("getting-started"), "Getting-started");
        assert_eq!(capitalize_first("README"), "README");
        assert_eq!(capitalize_first("über"), "Über");
        assert_eq!(capitalize_first(""), "");
    }
}
