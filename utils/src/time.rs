//! Elapsed-time formatting for log lines.

use std::time::Duration;

/// Format a duration compactly: `850µs`, `12.3ms`, `1.20s`, `2m 5s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let micros = elapsed.as_micros();
    if micros < 1_000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1_000.0)
    } else if elapsed.as_secs() < 60 {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else {
        let secs = elapsed.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_range() {
        assert_eq!(format_elapsed(Duration::from_micros(850)), "850µs");
        assert_eq!(format_elapsed(Duration::from_micros(12_300)), "12.3ms");
        assert_eq!(format_elapsed(Duration::from_millis(1_200)), "1.20s");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m 5s");
    }
}
