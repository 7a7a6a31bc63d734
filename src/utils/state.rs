use base64::{self, prelude::BASE64_URL_SAFE_NO_PAD, Engine};
use rand_core::RngCore;

/// Fresh anti-CSRF state token for one authorization redirect. The value is
/// round-tripped through the provider; the host stores and verifies it on
/// the callback leg.
pub fn generate_login_state() -> String {
    let mut bytes = [0u8; 32]; // 256-bit token
    rand_core::OsRng.fill_bytes(&mut bytes);
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}
