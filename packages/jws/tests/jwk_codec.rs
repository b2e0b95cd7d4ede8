//! JWK export and import: exact shape, fixed-width coordinates, strict import

mod common;

use common::*;
use serde_json::json;
use trustsig_jws::compact::{base64_url_decode, base64_url_encode};
use trustsig_jws::{export_public_jwk, import_jwk, Algorithm, JwsError, Jwk};

const SIGNER_THUMBPRINT: &str = "DOvxvJiAdIqVWIkFt5hDtCunXLF0BV4-JGv4f-ALSm0";
const SIGNER_JWK_D: &str = "ya-p2EW6dRZrXCFXZ7HWk05Qw9s26JsSe4piKxIPZyE";

fn signer_jwk() -> Jwk {
    signer_public().to_jwk("k1")
}

fn assert_key_format<T: std::fmt::Debug>(result: Result<T, JwsError>) {
    assert!(
        matches!(result, Err(JwsError::KeyFormat(_))),
        "expected a key format error, got {result:?}"
    );
}

#[test]
fn test_export_matches_wire_format() {
    let json = signer_jwk().to_json().expect("JWK should serialize");
    let expected = format!(
        r#"{{"kty":"EC","crv":"P-256","x":"{SIGNER_JWK_X}","y":"{SIGNER_JWK_Y}","kid":"k1","use":"sig","alg":"ES256"}}"#
    );
    assert_eq!(json, expected);
}

#[test]
fn test_export_optional_members() {
    let bare = export_public_jwk(&signer_public(), None, None, None);
    assert_eq!(
        serde_json::to_value(&bare).expect("JWK should serialize"),
        json!({"kty": "EC", "crv": "P-256", "x": SIGNER_JWK_X, "y": SIGNER_JWK_Y})
    );

    let full = export_public_jwk(
        &signer_public(),
        Some("k1"),
        Some("sig"),
        Some(Algorithm::Es256),
    );
    assert_eq!(full, signer_jwk());
}

#[test]
fn test_import_round_trips() {
    let jwk = Jwk::from_json(&signer_jwk().to_json().expect("serialize")).expect("parse");
    assert_eq!(import_jwk(&jwk).expect("valid JWK"), signer_public());
}

#[test]
fn test_leading_zero_coordinates_are_padded() {
    for (scalar, coordinate) in [(LEADING_ZERO_X_SCALAR, "x"), (LEADING_ZERO_Y_SCALAR, "y")] {
        let public = key_from_small_scalar(scalar).public_key();
        let jwk = Jwk::from_public_key(&public);
        let encoded = if coordinate == "x" { &jwk.x } else { &jwk.y };

        let decoded = base64_url_decode(encoded).expect("coordinate should be base64url");
        assert_eq!(decoded.len(), 32, "{coordinate} must stay 32 bytes");
        assert_eq!(decoded[0], 0, "{coordinate} should keep its leading zero");
        assert_eq!(encoded.len(), 43);

        assert_eq!(import_jwk(&jwk).expect("padded JWK imports"), public);
    }
}

#[test]
fn test_import_rejects_stripped_coordinate() {
    let public = key_from_small_scalar(LEADING_ZERO_X_SCALAR).public_key();
    let mut jwk = Jwk::from_public_key(&public);
    let x = base64_url_decode(&jwk.x).expect("coordinate should be base64url");
    jwk.x = base64_url_encode(&x[1..]);
    assert_key_format(import_jwk(&jwk));
}

#[test]
fn test_import_rejects_wrong_type_or_curve() {
    let mut jwk = signer_jwk();
    jwk.kty = "RSA".to_string();
    assert_key_format(import_jwk(&jwk));

    let mut jwk = signer_jwk();
    jwk.crv = "P-384".to_string();
    assert_key_format(import_jwk(&jwk));

    let mut jwk = signer_jwk();
    jwk.crv = "p-256".to_string();
    assert_key_format(import_jwk(&jwk));
}

#[test]
fn test_import_rejects_foreign_alg_or_use() {
    let mut jwk = signer_jwk();
    jwk.alg = Some("ES384".to_string());
    assert_key_format(import_jwk(&jwk));

    let mut jwk = signer_jwk();
    jwk.key_use = Some("enc".to_string());
    assert_key_format(import_jwk(&jwk));
}

#[test]
fn test_import_rejects_bad_coordinates() {
    let mut jwk = signer_jwk();
    jwk.y = format!("{SIGNER_JWK_Y}=");
    assert_key_format(import_jwk(&jwk));

    let mut jwk = signer_jwk();
    jwk.x = base64_url_encode(&[0u8; 33]);
    assert_key_format(import_jwk(&jwk));

    // Valid lengths, but not a point on the curve
    let mut jwk = signer_jwk();
    jwk.x = base64_url_encode(&[0u8; 32]);
    assert_key_format(import_jwk(&jwk));
}

#[test]
fn test_from_json_accepts_webcrypto_members() {
    let json = format!(
        r#"{{"kty":"EC","crv":"P-256","x":"{SIGNER_JWK_X}","y":"{SIGNER_JWK_Y}","ext":true,"key_ops":["verify"]}}"#
    );
    let jwk = Jwk::from_json(&json).expect("extra members are ignored");
    assert_eq!(import_jwk(&jwk).expect("valid JWK"), signer_public());
    assert!(jwk.kid.is_none());
}

#[test]
fn test_from_json_rejects_non_jwk() {
    assert_key_format(Jwk::from_json("[]"));
    assert_key_format(Jwk::from_json(r#"{"kty":"EC","crv":"P-256"}"#));
}

#[test]
fn test_private_jwk_import() {
    let json = format!(
        r#"{{"kty":"EC","crv":"P-256","x":"{SIGNER_JWK_X}","y":"{SIGNER_JWK_Y}","d":"{SIGNER_JWK_D}"}}"#
    );
    let jwk = Jwk::from_json(&json).expect("private JWK parses");
    assert!(jwk.is_private());
    assert_eq!(
        jwk.to_key_pair().expect("matching private JWK").public_key(),
        signer_public()
    );

    // The scalar is never written back out, nor shown by Debug
    let reserialized = jwk.to_json().expect("serialize");
    assert!(!reserialized.contains(SIGNER_JWK_D));
    assert!(!reserialized.contains("\"d\""));
    assert!(!format!("{jwk:?}").contains(SIGNER_JWK_D));
}

#[test]
fn test_private_jwk_must_match_public_coordinates() {
    let mut jwk = signer_jwk();
    jwk.d = Some(base64_url_encode(&OTHER_SCALAR));
    assert_key_format(jwk.to_key_pair());

    assert_key_format(signer_jwk().to_key_pair());
}

#[test]
fn test_thumbprint() {
    let jwk = signer_jwk();
    assert_eq!(jwk.thumbprint().expect("valid JWK"), SIGNER_THUMBPRINT);

    // Optional members do not take part
    let bare = Jwk::from_public_key(&signer_public());
    assert_eq!(bare.thumbprint().expect("valid JWK"), SIGNER_THUMBPRINT);

    let other = Jwk::from_public_key(&other_signer().public_key());
    assert_ne!(other.thumbprint().expect("valid JWK"), SIGNER_THUMBPRINT);
}
