//! Shared-secret MAC derivation.
//!
//! Synapse verifies shared-secret registrations with HMAC-SHA1 over the
//! username. The digest is fixed by the homeserver, not chosen here.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Derive the registration MAC for `username` as lowercase hex.
///
/// The password is not part of the MAC input.
pub fn authenticate(username: &str, secret: &SecretString) -> String {
    let mut mac = HmacSha1::new_from_slice(secret.expose_secret().as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(username.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
