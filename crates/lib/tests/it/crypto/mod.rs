pub mod cipher;
pub mod verifier;

/// Blob sealed by the browser extension (WebCrypto) for "two sum approach"
/// under "abc123", with salt `00..0f` and IV `64..6f`.
pub const BROWSER_BLOB: &str =
    "AAECAwQFBgcICQoLDA0OD2RlZmdoaWprbG1ub9KcfDrsdH5Jc7xVW1Hrw6MyWDG5+9kHcON4148um9Aq";

/// Verification salt of sixteen `0x07` bytes, base64.
pub const BROWSER_VERIFY_SALT: &str = "BwcHBwcHBwcHBwcHBwcHBw==";

/// PBKDF2-SHA256("abc123", BROWSER_VERIFY_SALT, 100000) as lowercase hex.
pub const BROWSER_VERIFY_HASH: &str =
    "bdc35c35fb14ec1e0f8eb24457f8dea60e778ced2432b538c01de1a50d268c6e";
