pub const BAR_GLYPH: char = '─';

/// Format a number of seconds as `MM:SS`. There is no hour field, so long tracks produce minutes above 59.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Split a bar of `width` glyphs into `(empty, filled)` runs, where `filled` is proportional to `current / total`.
///
/// An unknown duration (`total == 0`) renders as a completely empty bar.
/// Callers must not pass `current > total`.
pub fn build_progress_bar(current: u64, total: u64, width: usize) -> (String, String) {
    if total == 0 {
        return (glyphs(width), String::new());
    }
    let filled = (width as u128 * current as u128 / total as u128) as usize;
    let empty = width.saturating_sub(filled);
    (glyphs(empty), glyphs(filled))
}

fn glyphs(count: usize) -> String {
    std::iter::repeat(BAR_GLYPH).take(count).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(125), "02:05");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(3661), "61:01");
        assert_eq!(format_time(7507), "125:07");
    }

    #[test]
    fn test_progress_bar_halfway() {
        let (empty, filled) = build_progress_bar(5, 10, 20);
        assert_eq!(empty.chars().count(), 10);
        assert_eq!(filled.chars().count(), 10);
    }

    #[test]
    fn test_progress_bar_unknown_length() {
        for current in [0, 1, 500] {
            let (empty, filled) = build_progress_bar(current, 0, 20);
            assert_eq!(empty.chars().count(), 20);
            assert!(filled.is_empty());
        }
    }

    #[test]
    fn test_progress_bar_rounds_down() {
        let (empty, filled) = build_progress_bar(60, 383, 10);
        assert_eq!((empty.chars().count(), filled.chars().count()), (9, 1));

        let (empty, filled) = build_progress_bar(383, 383, 10);
        assert_eq!((empty.chars().count(), filled.chars().count()), (0, 10));
    }

    #[test]
    fn test_progress_bar_uses_bar_glyph() {
        let (empty, filled) = build_progress_bar(1, 4, 4);
        assert_eq!(empty, "───");
        assert_eq!(filled, "─");
    }
}
