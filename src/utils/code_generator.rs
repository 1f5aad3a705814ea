//! Short code generation.
//!
//! Codes are drawn uniformly at random from the 62-symbol alphanumeric
//! alphabet. Generation makes no global-uniqueness promise on its own;
//! collision handling belongs to the caller (see
//! [`crate::application::services::LinkService`], which retries on a
//! storage uniqueness conflict).

use rand::distr::{Alphanumeric, SampleString};

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 6;

/// Generates a random short code.
///
/// Samples [`CODE_LENGTH`] characters uniformly from `[a-zA-Z0-9]` using the
/// thread-local CSPRNG. Independent across calls.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), CODE_LENGTH)
}
