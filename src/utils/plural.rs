//! Pluralization for log messages.

/// `""` for one, `"s"` otherwise
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, e.g. `plural_count(3, "record")` -> `"3 records"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "record"), "0 records");
        assert_eq!(plural_count(1, "record"), "1 record");
        assert_eq!(plural_count(12, "record"), "12 records");
    }
}
