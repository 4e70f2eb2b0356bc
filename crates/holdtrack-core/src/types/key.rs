//! Composite identity of a position across filings.

use super::PutCall;
use serde::{Deserialize, Serialize};

/// Identity used to align a position across two filing periods.
///
/// The same issuer can carry several share classes and independent option
/// positions, so the CUSIP alone is not enough.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchingKey {
    /// 9-character CUSIP.
    pub cusip: String,
    /// Title of class.
    pub title_of_class: String,
    /// Option flag, `None` for plain shares.
    pub put_call: Option<PutCall>,
}

impl MatchingKey {
    /// Creates a new matching key.
    #[must_use]
    pub fn new(cusip: &str, title_of_class: &str, put_call: Option<PutCall>) -> Self {
        Self {
            cusip: cusip.to_string(),
            title_of_class: title_of_class.to_string(),
            put_call,
        }
    }
}

impl std::fmt::Display for MatchingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let put_call = self.put_call.map_or("NONE", |pc| pc.name());
        write!(f, "{}|{}|{}", self.cusip, self.title_of_class, put_call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let key = MatchingKey::new("67066G104", "COM", None);
        assert_eq!(key.to_string(), "67066G104|COM|NONE");

        let key = MatchingKey::new("67066G104", "COM", Some(PutCall::Put));
        assert_eq!(key.to_string(), "67066G104|COM|Put");
    }

    #[test]
    fn test_class_is_part_of_identity() {
        let class_a = MatchingKey::new("02079K305", "CAP STK CL A", None);
        let class_c = MatchingKey::new("02079K107", "CAP STK CL C", None);
        let class_a_again = MatchingKey::new("02079K305", "CAP STK CL C", None);

        assert_ne!(class_a, class_c);
        assert_ne!(class_a, class_a_again);
    }
}
