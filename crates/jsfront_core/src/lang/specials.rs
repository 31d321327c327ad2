//! Special literal words: `true`, `false`, `null`.
//!
//! These are not keywords (the tokenizer gives them their own `Special` token kind) but they are reserved in the
//! same way: they can never be used as identifiers.

/// Stable identifier for the special literal words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialId {
    True,
    False,
    Null,
}

/// Metadata for a special literal word.
#[derive(Debug, Clone, Copy)]
pub struct SpecialInfo {
    pub id: SpecialId,
    pub canonical: &'static str,
}

/// Registry of all special literal words.
pub const SPECIALS: &[SpecialInfo] = &[
    SpecialInfo {
        id: SpecialId::True,
        canonical: "true",
    },
    SpecialInfo {
        id: SpecialId::False,
        canonical: "false",
    },
    SpecialInfo {
        id: SpecialId::Null,
        canonical: "null",
    },
];

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<SpecialId> {
    SPECIALS.iter().find(|sp| sp.canonical == s).map(|sp| sp.id)
}

/// Canonical spelling.
pub fn as_str(id: SpecialId) -> &'static str {
    match id {
        SpecialId::True => "true",
        SpecialId::False => "false",
        SpecialId::Null => "null",
    }
}
