//! Deterministic avatar URL derivation.
//!
//! Gravatar scheme: md5 of the trimmed, lowercased email, with fixed size,
//! rating and fallback-image parameters. Same email always maps to the same
//! URL, so the value stored at registration never needs recomputing.

use md5::{Digest, Md5};

const AVATAR_SIZE: u32 = 200;
const AVATAR_RATING: &str = "pg";
const AVATAR_DEFAULT: &str = "mm";

pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Md5::digest(normalized.as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?s={}&r={}&d={}",
        hex::encode(digest),
        AVATAR_SIZE,
        AVATAR_RATING,
        AVATAR_DEFAULT
    )
}
