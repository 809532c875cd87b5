//! Class-name merging for the console components.

/// Join class fragments, skipping empty ones. Repeated tokens keep their
/// last position so later fragments take precedence.
pub fn merge_classes<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens: Vec<&str> = parts.into_iter().flat_map(str::split_whitespace).collect();

    let mut merged: Vec<&str> = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        if !tokens[i + 1..].contains(token) {
            merged.push(token);
        }
    }
    merged.join(" ")
}

/// `class` when `condition` holds, empty otherwise.
pub fn class_if(condition: bool, class: &str) -> &str {
    if condition {
        class
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_skips_empty() {
        assert_eq!(merge_classes(["px-4", "", "  ", "py-2"]), "px-4 py-2");
    }

    #[test]
    fn test_merge_dedupes_keeping_last() {
        assert_eq!(
            merge_classes(["rounded border", "text-white border"]),
            "rounded text-white border"
        );
    }

    #[test]
    fn test_class_if() {
        let dragging = true;
        assert_eq!(
            merge_classes([
                "border-2",
                class_if(dragging, "border-blue-500"),
                class_if(!dragging, "border-gray-600"),
            ]),
            "border-2 border-blue-500"
        );
    }
}
