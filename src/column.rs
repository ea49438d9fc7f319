//! Spreadsheet column letter resolution
//!
//! Column labels use bijective base-26: A=1 .. Z=26, AA=27, AZ=52, BA=53.

/// Convert a spreadsheet column letter to a 1-based column index.
///
/// Input is case-insensitive and trimmed. Returns `None` (the "invalid"
/// sentinel) for empty input or input containing anything other than
/// ASCII letters.
///
/// # Example
///
/// ```
/// use pdf_certificates::column::column_index;
///
/// assert_eq!(column_index("A"), Some(1));
/// assert_eq!(column_index("aa"), Some(27));
/// assert_eq!(column_index("A1"), None);
/// ```
pub fn column_index(letter: &str) -> Option<u32> {
    let letter = letter.trim();
    if letter.is_empty() {
        return None;
    }

    let mut index: u32 = 0;
    for ch in letter.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let value = ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        index = index.checked_mul(26)?.checked_add(value)?;
    }

    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters() {
        assert_eq!(column_index("A"), Some(1));
        assert_eq!(column_index("B"), Some(2));
        assert_eq!(column_index("Z"), Some(26));
    }

    #[test]
    fn test_double_letters() {
        assert_eq!(column_index("AA"), Some(27));
        assert_eq!(column_index("AZ"), Some(52));
        assert_eq!(column_index("BA"), Some(53));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(column_index("c"), Some(3));
        assert_eq!(column_index("aB"), Some(28));
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(column_index("  C "), Some(3));
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("   "), None);
        assert_eq!(column_index("A1"), None);
        assert_eq!(column_index("1"), None);
        assert_eq!(column_index("A-B"), None);
        assert_eq!(column_index("É"), None);
    }
}
