use listmerge_core::SearchCriteria;

/// Normalizes a field value for comparison.
///
/// Lower-cases unless `case_sensitive`, then strips every whitespace
/// character when `ignore_spaces`. Total over any input.
pub fn normalize_field(value: &str, case_sensitive: bool, ignore_spaces: bool) -> String {
    let folded = if case_sensitive {
        value.to_string()
    } else {
        value.to_lowercase()
    };

    if ignore_spaces {
        folded.chars().filter(|c| !c.is_whitespace()).collect()
    } else {
        folded
    }
}

/// [`normalize_field`] with the flags taken from `criteria`.
pub fn normalize_for(value: &str, criteria: &SearchCriteria) -> String {
    normalize_field(value, criteria.case_sensitive, criteria.ignore_spaces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_when_case_insensitive() {
        assert_eq!(normalize_field("JOHN", false, false), "john");
        assert_eq!(normalize_field("JOHN", true, false), "JOHN");
    }

    #[test]
    fn strips_all_whitespace_kinds() {
        assert_eq!(normalize_field(" 12 Main\tSt\n", false, true), "12mainst");
        assert_eq!(normalize_field(" 12 Main St", false, false), " 12 main st");
    }

    #[test]
    fn empty_and_blank_inputs_normalize_to_empty() {
        assert_eq!(normalize_field("", false, true), "");
        assert_eq!(normalize_field(" \t ", true, true), "");
    }
}
