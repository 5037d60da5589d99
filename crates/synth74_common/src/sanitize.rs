//! Net-name sanitization shared by the parser, expression compiler, and
//! hierarchy flattener.
//!
//! A bit-selected or range-selected signal reference (`a[3]`, `a[3:0]`) is
//! never carried as a structured reference once it reaches gate-level IR —
//! it is flattened to a single sanitized identifier (`a_3`, `a_3_0`) by pure
//! text substitution.

/// Sanitizes a signal reference into a flat identifier: `[` and `:` become
/// `_`, `]` is dropped.
///
/// ```
/// assert_eq!(synth74_common::sanitize::sanitize_signal_name("a[3]"), "a_3");
/// assert_eq!(synth74_common::sanitize::sanitize_signal_name("a[3:0]"), "a_3_0");
/// assert_eq!(synth74_common::sanitize::sanitize_signal_name("clk"), "clk");
/// ```
pub fn sanitize_signal_name(name: &str) -> String {
    name.replace('[', "_").replace(']', "").replace(':', "_")
}

/// Returns `true` if `name` contains a range select (`a[3:0]`) rather than
/// at most a single bit select (`a[3]`).
pub fn is_range_select(name: &str) -> bool {
    name.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifier_unchanged() {
        assert_eq!(sanitize_signal_name("clk"), "clk");
    }

    #[test]
    fn bit_select_sanitized() {
        assert_eq!(sanitize_signal_name("a[3]"), "a_3");
    }

    #[test]
    fn range_select_sanitized() {
        assert_eq!(sanitize_signal_name("a[3:0]"), "a_3_0");
    }

    #[test]
    fn range_select_detected() {
        assert!(is_range_select("a[3:0]"));
        assert!(!is_range_select("a[3]"));
        assert!(!is_range_select("a"));
    }
}
