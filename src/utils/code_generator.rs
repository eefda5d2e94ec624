//! Short code generation and base-62 id encoding.
//!
//! Two unrelated strategies share one alphabet here:
//!
//! - [`generate_code`] draws random codes from the OS CSPRNG. This is what the
//!   link service uses.
//! - [`encode_id`] / [`decode_id`] map integers to codes and back, most
//!   significant digit first.

use thiserror::Error;

/// Alphabet for generated codes: digits, lowercase letters, uppercase letters.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = ALPHABET.len() as u64;

/// Largest multiple of 62 that fits in a byte. Bytes at or above it are
/// discarded so that `byte % 62` is uniform over the alphabet.
const REJECTION_THRESHOLD: u8 = 248;

/// Errors returned by [`decode_id`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("code is empty")]
    Empty,

    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("code does not fit in a 64-bit integer")]
    Overflow,
}

/// Generates a random code of exactly `length` characters from [`ALPHABET`].
///
/// Every character is drawn independently and uniformly using rejection
/// sampling over bytes from `getrandom`.
///
/// # Errors
///
/// Returns the underlying [`getrandom::Error`] if the OS randomness source
/// fails. The call is not retried.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6)?;
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> Result<String, getrandom::Error> {
    let mut code = String::with_capacity(length);
    let mut buffer = [0u8; 64];

    while code.len() < length {
        getrandom::fill(&mut buffer)?;

        for &byte in buffer.iter().filter(|&&b| b < REJECTION_THRESHOLD) {
            code.push(ALPHABET[(byte % 62) as usize] as char);

            if code.len() == length {
                break;
            }
        }
    }

    Ok(code)
}

/// Encodes a non-negative integer as a base-62 code.
///
/// `encode_id(0)` is `"0"`, the first alphabet symbol.
pub fn encode_id(mut id: u64) -> String {
    if id == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut digits = Vec::with_capacity(11);
    while id > 0 {
        digits.push(ALPHABET[(id % BASE) as usize]);
        id /= BASE;
    }

    digits.iter().rev().map(|&b| b as char).collect()
}

/// Decodes a base-62 code produced by [`encode_id`].
///
/// # Errors
///
/// - [`DecodeError::Empty`] for an empty input
/// - [`DecodeError::InvalidCharacter`] for any symbol outside [`ALPHABET`]
/// - [`DecodeError::Overflow`] if the value exceeds `u64::MAX`
pub fn decode_id(code: &str) -> Result<u64, DecodeError> {
    if code.is_empty() {
        return Err(DecodeError::Empty);
    }

    code.chars()
        .enumerate()
        .try_fold(0u64, |acc, (position, character)| {
            let digit =
                alphabet_index(character).ok_or(DecodeError::InvalidCharacter { character, position })?;

            acc.checked_mul(BASE)
                .and_then(|v| v.checked_add(digit))
                .ok_or(DecodeError::Overflow)
        })
}

fn alphabet_index(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        'a'..='z' => Some(c as u64 - 'a' as u64 + 10),
        'A'..='Z' => Some(c as u64 - 'A' as u64 + 36),
        _ => None,
    }
}
