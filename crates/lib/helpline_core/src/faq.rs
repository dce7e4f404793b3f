//! Built-in FAQ table.
//!
//! Questions are matched exactly (case and punctuation included) against the
//! trimmed user message. The table is fixed at compile time.

const ENTRIES: &[(&str, &str)] = &[
    (
        "What are your business hours?",
        "Our business hours are from 9 AM to 6 PM, Monday to Friday.",
    ),
    (
        "How can I reset my password?",
        "To reset your password, go to the login page and click on 'Forgot Password'.",
    ),
    (
        "How do I contact customer support?",
        "You can reach our customer support at support@example.com or call us at +123456789.",
    ),
];

/// Immutable question → answer mapping.
#[derive(Debug, Clone, Copy)]
pub struct FaqTable {
    entries: &'static [(&'static str, &'static str)],
}

impl FaqTable {
    /// The table shipped with the service.
    pub const fn builtin() -> Self {
        Self { entries: ENTRIES }
    }

    /// Look up a canned answer by exact question text.
    pub fn lookup(&self, question: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(q, _)| *q == question)
            .map(|(_, a)| *a)
    }

    /// All entries, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FaqTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_hours_answer() {
        let faq = FaqTable::builtin();
        assert_eq!(
            faq.lookup("What are your business hours?"),
            Some("Our business hours are from 9 AM to 6 PM, Monday to Friday.")
        );
    }

    #[test]
    fn lookup_is_exact_match() {
        let faq = FaqTable::builtin();
        assert!(faq.lookup("what are your business hours?").is_none());
        assert!(faq.lookup("What are your business hours").is_none());
        assert!(faq.lookup(" What are your business hours?").is_none());
        assert!(faq.lookup("").is_none());
    }

    #[test]
    fn every_entry_resolves_to_itself() {
        let faq = FaqTable::builtin();
        assert_eq!(faq.len(), 3);
        for (q, a) in faq.entries() {
            assert_eq!(faq.lookup(q), Some(a));
        }
    }
}
