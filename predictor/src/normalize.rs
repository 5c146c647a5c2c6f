//! Canonical form shared by the vocabulary and incoming symptom names.
//!
//! The vocabulary was built from column names like `skin_rash`, so request
//! strings are trimmed, lowercased and have spaces turned into underscores.
//! Nothing else is rewritten: a mismatch here silently zeroes a feature.

/// Canonical token for a free-text symptom name.
pub fn canonical_symptom(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// True when `token` is already in canonical form.
pub fn is_canonical(token: &str) -> bool {
    canonical_symptom(token) == token
}
