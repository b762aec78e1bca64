use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Signs and checks email verification links.
///
/// A link is `{uid}/{token}` where `uid` is the customer id and `token` an
/// HMAC over the id and email, both URL-safe base64 without padding. Changing
/// the email invalidates outstanding links.
#[derive(Clone)]
pub struct VerificationTokens {
    secret: Vec<u8>,
}

impl VerificationTokens {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    pub fn encode_uid(id: Uuid) -> String {
        URL_SAFE_NO_PAD.encode(id.to_string())
    }

    pub fn decode_uid(uid: &str) -> Option<Uuid> {
        let bytes = URL_SAFE_NO_PAD.decode(uid).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        Uuid::parse_str(&text).ok()
    }

    fn mac(&self, id: Uuid, email: &str) -> Option<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        mac.update(id.to_string().as_bytes());
        mac.update(b":");
        mac.update(email.as_bytes());
        Some(mac)
    }

    pub fn make_token(&self, id: Uuid, email: &str) -> String {
        self.mac(id, email)
            .map(|mac| URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
            .unwrap_or_default()
    }

    pub fn check_token(&self, id: Uuid, email: &str, token: &str) -> bool {
        let Ok(provided) = URL_SAFE_NO_PAD.decode(token) else {
            return false;
        };
        self.mac(id, email)
            .is_some_and(|mac| mac.verify_slice(&provided).is_ok())
    }
}
