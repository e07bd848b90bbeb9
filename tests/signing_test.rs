//! Signing subsystem properties, exercised over the library API.
//!
//! The contract under test: sign/verify round-trips for any content,
//! verification is a predicate that never errors (garbage, truncated, and
//! tampered signatures all come back `false`), and the exported public key
//! is stable for the process lifetime of a keypair.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use newstrust::signing::{KeyManager, SignatureService};

fn fixture() -> (KeyManager, SignatureService) {
    let keys = KeyManager::generate().unwrap();
    let service = SignatureService::new(&keys);
    (keys, service)
}

#[test]
fn roundtrip_holds_for_varied_content() {
    let (_keys, service) = fixture();

    for content in ["", "hello world", "line\nbreaks\tand tabs", "données signées 署名"] {
        let signature = service.sign(content).unwrap();
        assert!(service.verify(content, &signature), "content: {content:?}");
    }
}

#[test]
fn verification_fails_across_different_content() {
    let (_keys, service) = fixture();

    let signature = service.sign("first message").unwrap();
    assert!(!service.verify("second message", &signature));
}

#[test]
fn hello_world_scenario() {
    let (_keys, service) = fixture();

    let signature = service.sign("hello world").unwrap();
    assert!(service.verify("hello world", &signature));
    assert!(!service.verify("HELLO WORLD", &signature));

    let mut flipped = signature.clone();
    let last = flipped.len() - 1;
    flipped[last] ^= 0x01;
    assert!(!service.verify("hello world", &flipped));
}

#[test]
fn garbage_signatures_normalize_to_false() {
    let (_keys, service) = fixture();
    let signature = service.sign("content").unwrap();

    // Empty, truncated, over-long, and patterned garbage: none may panic or
    // error, all must simply fail verification.
    assert!(!service.verify("content", &[]));
    assert!(!service.verify("content", &signature[..10]));
    assert!(!service.verify("content", &[signature.clone(), vec![0u8; 64]].concat()));
    assert!(!service.verify("content", &[0xffu8; 256]));
    assert!(!service.verify("content", &[0u8; 256]));
    assert!(!service.verify("content", b"not a signature at all"));
}

#[test]
fn signature_length_matches_modulus() {
    let (_keys, service) = fixture();
    // 2048-bit modulus -> 256-byte signatures
    assert_eq!(service.sign("x").unwrap().len(), 256);
}

#[test]
fn public_key_export_is_stable() {
    let (keys, _service) = fixture();

    let first = keys.public_key_pem().to_string();
    let second = keys.public_key_pem().to_string();
    assert_eq!(first, second);
    assert!(first.contains("BEGIN PUBLIC KEY"));
}

#[test]
fn base64_transport_round_trip_preserves_validity() {
    let (_keys, service) = fixture();

    let signature = service.sign("over the wire").unwrap();
    let encoded = B64.encode(&signature);
    let decoded = B64.decode(&encoded).unwrap();
    assert!(service.verify("over the wire", &decoded));
}
