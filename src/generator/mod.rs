//! Random password generation from a character-class policy.
//!
//! Each position is drawn uniformly from the union of the enabled
//! classes via `SliceRandom::choose` over the OS RNG, which maps the
//! raw random value into the alphabet without modulo bias.
//!
//! Per-position sampling is independent, so the output is *not*
//! guaranteed to contain a character from every enabled class — only
//! to contain nothing outside them.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;

use crate::errors::{PassVaultError, Result};

/// Uppercase class: A–Z.
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lowercase class: a–z.
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Digit class: 0–9.
const DIGITS: &[u8] = b"0123456789";

/// Symbol class.
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Which character classes to draw from, and how many characters.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub length: usize,
    pub upper: bool,
    pub lower: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: 20,
            upper: true,
            lower: true,
            digits: true,
            symbols: true,
        }
    }
}

impl PasswordPolicy {
    /// Build the alphabet from the enabled classes.
    fn alphabet(&self) -> Vec<u8> {
        let mut chars = Vec::new();
        if self.upper {
            chars.extend_from_slice(UPPER);
        }
        if self.lower {
            chars.extend_from_slice(LOWER);
        }
        if self.digits {
            chars.extend_from_slice(DIGITS);
        }
        if self.symbols {
            chars.extend_from_slice(SYMBOLS);
        }
        chars
    }
}

/// Generate a password matching `policy`.
///
/// Fails with a validation error if the length is zero or no class is
/// enabled — there is no silent fallback to a default class.
pub fn generate(policy: &PasswordPolicy) -> Result<String> {
    if policy.length == 0 {
        return Err(PassVaultError::Validation(
            "password length must be at least 1".into(),
        ));
    }

    let alphabet = policy.alphabet();
    if alphabet.is_empty() {
        return Err(PassVaultError::Validation(
            "at least one character class must be enabled".into(),
        ));
    }

    let mut rng = OsRng;
    let password: String = (0..policy.length)
        .map(|_| {
            // `choose` cannot fail here — the alphabet is non-empty.
            *alphabet.choose(&mut rng).unwrap_or(&b'?') as char
        })
        .collect();

    Ok(password)
}
