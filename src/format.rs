use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Cut `s` to at most `max_width` terminal columns. No ellipsis is added, the
/// table columns are fixed width and a marker would eat into them.
pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Binary-prefix scaling with two decimals: `1536.0` becomes `"1.50 KB"`.
pub fn format_bytes(bytes: f64) -> String {
    let mut value = bytes.max(0.0);
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}

pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_scale_through_binary_prefixes() {
        assert_eq!(format_bytes(0.0), "0.00 B");
        assert_eq!(format_bytes(1023.0), "1023.00 B");
        assert_eq!(format_bytes(1536.0), "1.50 KB");
        assert_eq!(format_bytes(1_048_576.0), "1.00 MB");
        assert_eq!(format_bytes(1_073_741_824.0), "1.00 GB");
        assert_eq!(format_bytes(1024f64.powi(4)), "1.00 TB");
        assert_eq!(format_bytes(1024f64.powi(5) * 3.0), "3.00 PB");
    }

    #[test]
    fn rates_carry_per_second_suffix() {
        assert_eq!(format_rate(1536.0), "1.50 KB/s");
        assert_eq!(format_rate(0.0), "0.00 B/s");
        assert_eq!(format_rate(1_073_741_824.0), "1.00 GB/s");
        assert_eq!(format_rate(10240.0), "10.00 KB/s");
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_unicode("short", 20), "short");
        assert_eq!(truncate_unicode("abcdefghij", 4), "abcd");
        // Wide glyphs take two columns each.
        assert_eq!(truncate_unicode("日本語テキスト", 5), "日本");
    }
}
