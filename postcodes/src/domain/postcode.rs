//! Postcode normalization.

use std::fmt;

/// A postcode in canonical lookup form: spaces removed, lowercase.
///
/// Any string normalizes, so construction cannot fail. Two raw inputs that
/// differ only in case or spacing produce equal values, which makes
/// `Postcode` directly usable as a cache key.
///
/// # Examples
///
/// ```
/// use postcodes::domain::Postcode;
///
/// let a = Postcode::normalize("F0 0BA");
/// let b = Postcode::normalize("f00b a");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "f00ba");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Postcode(String);

impl Postcode {
    /// Strip spaces and lowercase the whole string.
    ///
    /// Only U+0020 is removed; tabs and other whitespace are kept and
    /// percent-encoded into the request like any other character.
    pub fn normalize(raw: &str) -> Self {
        let normalized = raw
            .chars()
            .filter(|&c| c != ' ')
            .flat_map(char::to_lowercase)
            .collect();
        Postcode(normalized)
    }

    /// Returns the normalized postcode.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Postcode({})", self.0)
    }
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_spaces_and_lowercases() {
        assert_eq!(Postcode::normalize("SW1A 1AA").as_str(), "sw1a1aa");
        assert_eq!(Postcode::normalize("  W1 1 ").as_str(), "w11");
        assert_eq!(Postcode::normalize("EC1A\t1BB").as_str(), "ec1a\t1bb");
    }

    #[test]
    fn only_spaces_are_stripped() {
        assert_ne!(
            Postcode::normalize("EC1A\t1BB"),
            Postcode::normalize("EC1A1BB")
        );
        assert_ne!(
            Postcode::normalize("EC1A\u{a0}1BB"),
            Postcode::normalize("EC1A 1BB")
        );
    }

    #[test]
    fn equivalent_inputs_are_equal() {
        let a = Postcode::normalize("F0 0BA");
        let b = Postcode::normalize("F00BA");
        let c = Postcode::normalize("f00b a");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn empty_input_normalizes_to_empty() {
        assert_eq!(Postcode::normalize("").as_str(), "");
        assert_eq!(Postcode::normalize("   ").as_str(), "");
    }

    #[test]
    fn display_and_debug() {
        let pc = Postcode::normalize("M1 1AE");
        assert_eq!(format!("{}", pc), "m11ae");
        assert_eq!(format!("{:?}", pc), "Postcode(m11ae)");
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Postcode::normalize("B1 1BB"));
        assert!(set.contains(&Postcode::normalize("b11bb")));
        assert!(!set.contains(&Postcode::normalize("B1 1BC")));
    }
}
