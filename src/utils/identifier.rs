//! Redirect identifier generation.
//!
//! Identifiers are the short public tokens embedded in shareable links,
//! distinct from a rule's internal id.

use base64::Engine as _;

/// Length of the public-facing redirect identifier in characters.
pub const IDENTIFIER_LENGTH: usize = 8;

/// Random bytes per identifier. Six bytes encode to exactly eight
/// URL-safe base64 characters, giving 48 bits of entropy.
const IDENTIFIER_BYTES: usize = 6;

/// Generates a random 8-character redirect identifier.
///
/// Uses `getrandom` for entropy and URL-safe base64 without padding, so the
/// result is safe to embed in a path segment. Generation is a pure draw from
/// the random source and is callable concurrently without coordination; it
/// does not guarantee uniqueness — the store's unique constraint does, and
/// callers retry on collision.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_identifier() -> String {
    let mut buffer = [0u8; IDENTIFIER_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}
