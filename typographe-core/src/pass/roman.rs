//! Roman numeral conversion helpers

const DIGITS: &[(u32, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Uppercase Roman numeral for `value`; zero yields an empty string
pub(crate) fn to_roman(mut value: u32) -> String {
    let mut out = String::new();
    for (weight, digits) in DIGITS {
        while value >= *weight {
            out.push_str(digits);
            value -= weight;
        }
    }
    out
}

/// Parses a canonical Roman numeral, case-insensitively.
///
/// Only well-formed numerals parse: "IIII" and "VX" return `None`, so a
/// letter run that merely uses Roman letters is not mistaken for a number.
pub(crate) fn from_roman(text: &str) -> Option<u32> {
    if text.is_empty() {
        return None;
    }
    let upper = text.to_uppercase();
    let mut rest = upper.as_str();
    let mut value = 0;
    for (weight, digits) in DIGITS {
        let mut seen = 0;
        while let Some(stripped) = rest.strip_prefix(digits) {
            rest = stripped;
            value += weight;
            seen += 1;
            // A subtractive pair or V/L/D appears at most once.
            if digits.len() == 2 || matches!(*digits, "V" | "L" | "D") {
                break;
            }
            // I, X, C and M repeat up to three times.
            if seen == 3 {
                break;
            }
        }
    }
    if rest.is_empty() && to_roman(value) == upper {
        Some(value)
    } else {
        None
    }
}
