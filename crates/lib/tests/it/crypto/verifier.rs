use notelock::crypto::{BlobParts, hash_password, verify_password};

use super::{BROWSER_BLOB, BROWSER_VERIFY_HASH, BROWSER_VERIFY_SALT};

#[test]
fn test_verifies_browser_hash() {
    assert!(verify_password("abc123", BROWSER_VERIFY_HASH, BROWSER_VERIFY_SALT));
    assert!(!verify_password("abc1234", BROWSER_VERIFY_HASH, BROWSER_VERIFY_SALT));
}

#[test]
fn test_hash_then_verify() {
    let hashed = hash_password("abc123");
    assert!(verify_password("abc123", &hashed.hash, &hashed.salt));
    assert!(!verify_password("ABC123", &hashed.hash, &hashed.salt));
    assert!(!verify_password("", &hashed.hash, &hashed.salt));
}

#[test]
fn test_malformed_material_never_verifies() {
    // Bad base64, short salt, empty salt, and a truncated hash.
    assert!(!verify_password("abc123", BROWSER_VERIFY_HASH, "%%%"));
    assert!(!verify_password("abc123", BROWSER_VERIFY_HASH, "BwcH"));
    assert!(!verify_password("abc123", BROWSER_VERIFY_HASH, ""));
    assert!(!verify_password(
        "abc123",
        &BROWSER_VERIFY_HASH[..10],
        BROWSER_VERIFY_SALT
    ));
}

#[test]
fn test_hash_salt_independent_of_blob_salt() {
    // Verifying with the blob's own salt must not match a hash made under a fresh salt.
    let parts = BlobParts::decode(BROWSER_BLOB).unwrap();
    let hashed = hash_password("abc123");
    let blob_salt = <base64ct::Base64 as base64ct::Encoding>::encode_string(&parts.salt);
    assert_ne!(hashed.salt, blob_salt);
    assert!(!verify_password("abc123", &hashed.hash, &blob_salt));
}
