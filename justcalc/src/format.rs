//! Number-to-text formatting for the display

/// Magnitude from which results switch to scientific notation.
const SCIENTIFIC_ABOVE: f64 = 1e15;
/// Non-zero magnitudes below this use scientific notation too.
const SCIENTIFIC_BELOW: f64 = 1e-9;
/// Upper bound for `max_decimals`; f64 carries about 15-17 significant digits.
pub const MAX_DECIMALS: usize = 15;

/// Display formatting policy.
///
/// Whole numbers print without a fraction, very large or very small values
/// use scientific notation, everything else is rounded to `max_decimals` with
/// trailing zeros removed. Every string produced parses back through the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    max_decimals: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self { max_decimals: 10 }
    }
}

impl NumberFormat {
    pub fn new(max_decimals: usize) -> Self {
        Self {
            max_decimals: max_decimals.min(MAX_DECIMALS),
        }
    }

    pub fn max_decimals(&self) -> usize {
        self.max_decimals
    }

    /// Formats a finite value; the engine rejects NaN and infinite results
    /// before they get here.
    pub fn format(&self, n: f64) -> String {
        if n == 0.0 {
            return "0".to_string();
        }

        let magnitude = n.abs();
        if magnitude >= SCIENTIFIC_ABOVE || magnitude < SCIENTIFIC_BELOW {
            return self.scientific(n);
        }
        if n.fract() == 0.0 {
            return format!("{}", n as i64);
        }

        let fixed = format!("{:.*}", self.max_decimals, n);
        let trimmed = trim_fraction(&fixed);
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn scientific(&self, n: f64) -> String {
        let s = format!("{:.*e}", self.max_decimals, n);
        match s.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{}", trim_fraction(mantissa), exponent),
            None => s,
        }
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
