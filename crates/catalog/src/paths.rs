//! Parsing of slash-delimited category paths from import rows.

/// Splits a raw path like `"Books / Fantasy /Short Stories"` into ordered,
/// trimmed segment names. Empty segments (doubled, leading or trailing
/// slashes, whitespace-only parts) are dropped, so a row contributing only
/// empty segments yields nothing.
pub fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_chain() {
        assert_eq!(
            split_segments("Books/Fantasy/Short Stories"),
            vec!["Books", "Fantasy", "Short Stories"]
        );
    }

    #[test]
    fn test_split_trims_whitespace() {
        assert_eq!(
            split_segments("  Books / Fantasy  /  Epic "),
            vec!["Books", "Fantasy", "Epic"]
        );
    }

    #[test]
    fn test_split_drops_empty_segments() {
        assert_eq!(
            split_segments("/Books//Fantasy/"),
            vec!["Books", "Fantasy"]
        );
    }

    #[test]
    fn test_split_all_empty_yields_nothing() {
        assert!(split_segments("").is_empty());
        assert!(split_segments("   ").is_empty());
        assert!(split_segments("/ // /").is_empty());
    }

    #[test]
    fn test_split_single_segment() {
        assert_eq!(split_segments("Books"), vec!["Books"]);
    }
}
