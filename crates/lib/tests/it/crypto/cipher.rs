use notelock::crypto::{BlobParts, decrypt, encrypt};

use super::BROWSER_BLOB;

#[test]
fn test_decrypts_browser_blob() {
    assert_eq!(decrypt(BROWSER_BLOB, "abc123").unwrap(), "two sum approach");
}

#[test]
fn test_browser_blob_layout() {
    let parts = BlobParts::decode(BROWSER_BLOB).unwrap();
    assert_eq!(parts.salt, core::array::from_fn::<u8, 16, _>(|i| i as u8));
    assert_eq!(parts.iv, core::array::from_fn::<u8, 12, _>(|i| 100 + i as u8));
    // 16 bytes of plaintext plus the 16-byte tag
    assert_eq!(parts.ciphertext.len(), 32);
    assert_eq!(parts.encode(), BROWSER_BLOB);
}

#[test]
fn test_browser_blob_wrong_password() {
    let err = decrypt(BROWSER_BLOB, "abc124").unwrap_err();
    assert!(err.is_decryption_error());
}

#[test]
fn test_relock_produces_distinct_blobs() {
    let first = encrypt("same content", "pw").unwrap();
    let second = encrypt("same content", "pw").unwrap();
    assert_ne!(first, second);

    let a = BlobParts::decode(&first).unwrap();
    let b = BlobParts::decode(&second).unwrap();
    assert_ne!(a.salt, b.salt);
    assert_ne!(a.iv, b.iv);

    assert_eq!(decrypt(&first, "pw").unwrap(), "same content");
    assert_eq!(decrypt(&second, "pw").unwrap(), "same content");
}

#[test]
fn test_multiline_markdown_round_trip() {
    let note = "## Approach\n\n- sort\n- two pointers: O(n²)\n\n```py\nreturn []\n```\n";
    let blob = encrypt(note, "correct horse battery staple").unwrap();
    assert_eq!(decrypt(blob, "correct horse battery staple").unwrap(), note);
}

#[test]
fn test_truncated_blob_is_malformed() {
    let truncated = &BROWSER_BLOB[..40];
    let err = decrypt(truncated, "abc123").unwrap_err();
    assert!(err.is_decryption_error());
    assert_eq!(err.module(), "crypto");
}
