//! Cursor normalization.
//!
//! Editors report the cursor as a character count into the selection; the
//! engine works with byte offsets into the UTF-8 fragment.

/// Convert a character count into a byte offset into `fragment`.
///
/// Counts at or below zero map to the start of the fragment. A count past the
/// last character is clamped to `fragment.len()`, so the cursor sits just after
/// the final character rather than pointing outside the fragment.
pub fn byte_offset(fragment: &str, chars: i64) -> usize {
    if chars <= 0 {
        return 0;
    }

    let Ok(chars) = usize::try_from(chars) else {
        return fragment.len();
    };

    fragment.char_indices().nth(chars).map(|(index, _)| index).unwrap_or(fragment.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_counts_are_byte_offsets() {
        assert_eq!(byte_offset("foo bar baz", 0), 0);
        assert_eq!(byte_offset("foo bar baz", 4), 4);
        assert_eq!(byte_offset("foo bar baz", 10), 10);
    }

    #[test]
    fn multibyte_characters_are_skipped_whole() {
        // 'é' is two bytes, '日' is three.
        let s = "é日x";
        assert_eq!(byte_offset(s, 1), 2);
        assert_eq!(byte_offset(s, 2), 5);
        assert_eq!(byte_offset(s, 3), 6);
    }

    #[test]
    fn negative_counts_start_at_zero() {
        assert_eq!(byte_offset("abc", -3), 0);
    }

    #[test]
    fn overlong_counts_clamp_to_end() {
        assert_eq!(byte_offset("abc", 3), 3);
        assert_eq!(byte_offset("abc", 42), 3);
        assert_eq!(byte_offset("日本", i64::MAX), 6);
    }
}
