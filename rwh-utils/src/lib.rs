//! Shared utility functions for RWH crates.

/// Number formatting for human-readable output
pub mod format {
    /// Format a number with a fixed number of decimals and comma thousands
    /// separators, e.g. `61370.4` with 0 decimals -> `"61,370"`.
    pub fn grouped(value: f64, decimals: usize) -> String {
        let fixed = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
        // "-0" is not worth printing
        if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            out.push('-');
        }
        let len = int_part.len();
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }

    /// Format a number with a fixed number of decimals, dropping a trailing
    /// ".0" so whole numbers print the way they were entered.
    pub fn trimmed(value: f64, decimals: usize) -> String {
        let fixed = format!("{:.*}", decimals, value);
        if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            fixed
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_grouped_whole_numbers() {
            assert_eq!(grouped(0.0, 0), "0");
            assert_eq!(grouped(999.0, 0), "999");
            assert_eq!(grouped(1000.0, 0), "1,000");
            assert_eq!(grouped(61370.4, 0), "61,370");
            assert_eq!(grouped(1234567.0, 0), "1,234,567");
        }

        #[test]
        fn test_grouped_decimals_and_sign() {
            assert_eq!(grouped(1234.567, 1), "1,234.6");
            assert_eq!(grouped(-25000.0, 0), "-25,000");
            assert_eq!(grouped(-0.2, 0), "0");
        }

        #[test]
        fn test_trimmed() {
            assert_eq!(trimmed(100.0, 2), "100");
            assert_eq!(trimmed(120.5, 2), "120.5");
            assert_eq!(trimmed(2.0, 1), "2");
        }
    }
}

/// Rounding helpers applied when results leave the engine
pub mod rounding {
    /// Round to a number of decimal places.
    pub fn round_to(value: f64, places: i32) -> f64 {
        let factor = 10f64.powi(places);
        (value * factor).round() / factor
    }

}
