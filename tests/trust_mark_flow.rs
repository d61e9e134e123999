//! Integration test: full trust mark lifecycle.
//!
//! Walks the complete flow:
//! 1. Owner delegates issuance to an issuer
//! 2. Issuer builds a trust mark embedding the delegation
//! 3. A relying party verifies the mark and its delegation chain
//! 4. Binding violations, expiry, and type confusion are rejected

use serde_json::Value;

use trustmark::time::now_secs;
use trustmark::{
    verify, Ed25519JwsSigner, StaticKeyProvider, TrustMark, TrustMarkDelegation, TrustMarkError,
    VerifyOptions, TRUST_MARK_DELEGATION_JWT_TYPE, TRUST_MARK_JWT_TYPE,
};

const MARK_ID: &str = "https://marks.example/mark-1";
const OWNER: &str = "https://owner.example";
const ISSUER: &str = "https://issuer.example";
const SUBJECT: &str = "https://subject.example";

const DAY_SECS: i64 = 24 * 3600;

#[test]
fn full_delegated_trust_mark_lifecycle() {
    let owner = Ed25519JwsSigner::generate();
    let issuer = Ed25519JwsSigner::generate();

    // ── Step 1: Owner signs a delegation to the issuer ──────────────────
    let delegation = TrustMarkDelegation::builder()
        .issuer(OWNER)
        .subject(ISSUER)
        .id(MARK_ID)
        .issue_time(now_secs() - 10 * DAY_SECS)
        .expiration_time(now_secs() + 30 * DAY_SECS)
        .build(&owner)
        .expect("owner should be able to sign a delegation");

    assert_eq!(delegation.header().typ, TRUST_MARK_DELEGATION_JWT_TYPE);
    let jti = delegation
        .payload()
        .get("jti")
        .and_then(Value::as_str)
        .unwrap();
    assert!(jti.len() > 30, "delegation jti should exceed 30 chars");

    // ── Step 2: Issuer builds the trust mark with the delegation ────────
    let mark = TrustMark::builder()
        .id(MARK_ID)
        .issuer(ISSUER)
        .subject(SUBJECT)
        .expiration_time(now_secs() + 30 * DAY_SECS)
        .logo_uri("https://issuer.example/logo")
        .reference("https://issuer.example/information")
        .claim("organization_name", "Trust Mark issuer organization")
        .unwrap()
        .claim("organization_name#sv", "Utfärdare av tillitsmärke AB")
        .unwrap()
        .delegation(&delegation)
        .build(&issuer)
        .expect("issuer should be able to sign the mark");

    assert_eq!(mark.header().typ, TRUST_MARK_JWT_TYPE);
    assert_eq!(mark.delegation(), Some(delegation.as_str()));

    // iat lands at build wall-clock time; exp sits in the requested
    // 30-day window (29-day lower / 31-day upper bound)
    let iat = mark.payload().get("iat").and_then(Value::as_i64).unwrap();
    assert!((iat - now_secs()).abs() <= 2);
    let exp = mark.payload().get("exp").and_then(Value::as_i64).unwrap();
    assert!(exp > now_secs() + 29 * DAY_SECS);
    assert!(exp < now_secs() + 31 * DAY_SECS);

    // ── Step 3: Relying party verifies mark + delegation chain ──────────
    let provider = StaticKeyProvider::new()
        .with_key(ISSUER, *issuer.verifying_key())
        .with_key(OWNER, *owner.verifying_key());

    let claims = verify(
        mark.as_str(),
        TRUST_MARK_JWT_TYPE,
        &provider,
        now_secs(),
        &VerifyOptions::default(),
    )
    .expect("delegated mark should verify");

    assert_eq!(claims.issuer(), ISSUER);
    assert_eq!(claims.subject(), SUBJECT);
    assert_eq!(claims.id(), MARK_ID);
    assert_eq!(
        claims.claim_str("organization_name#sv"),
        Some("Utfärdare av tillitsmärke AB")
    );

    // The delegation also verifies standalone as its own artifact kind
    let delegation_claims = verify(
        delegation.as_str(),
        TRUST_MARK_DELEGATION_JWT_TYPE,
        &provider,
        now_secs(),
        &VerifyOptions::default(),
    )
    .expect("delegation should verify standalone");
    assert_eq!(delegation_claims.issuer(), OWNER);
    assert_eq!(delegation_claims.subject(), ISSUER);
}

#[test]
fn delegation_bound_to_other_issuer_is_rejected() {
    let owner = Ed25519JwsSigner::generate();
    let other_issuer = Ed25519JwsSigner::generate();

    let delegation = TrustMarkDelegation::builder()
        .issuer(OWNER)
        .subject(ISSUER)
        .id(MARK_ID)
        .build(&owner)
        .unwrap();

    // Someone other than the delegated issuer tries to use the delegation
    let err = TrustMark::builder()
        .id(MARK_ID)
        .issuer("https://other.example")
        .subject(SUBJECT)
        .delegation(&delegation)
        .build(&other_issuer)
        .unwrap_err();

    assert!(matches!(err, TrustMarkError::DelegationBinding(_)));
}

#[test]
fn mismatched_delegation_caught_at_verify() {
    use trustmark::jws::{encode_compact, JwsHeader, JwsSigner};

    let owner = Ed25519JwsSigner::generate();
    let issuer = Ed25519JwsSigner::generate();

    // Delegation authorizes a different mark id than the one issued
    let delegation = TrustMarkDelegation::builder()
        .issuer(OWNER)
        .subject(ISSUER)
        .id("https://marks.example/other-mark")
        .build(&owner)
        .unwrap();

    // The TrustMark builder refuses this combination, so play a hostile
    // issuer: assemble the mark payload by hand over the raw envelope
    // layer. The signature is genuine; only the binding is wrong.
    let mut payload = serde_json::Map::new();
    payload.insert("sub".into(), Value::String(SUBJECT.into()));
    payload.insert("iss".into(), Value::String(ISSUER.into()));
    payload.insert("id".into(), Value::String(MARK_ID.into()));
    payload.insert("iat".into(), Value::from(now_secs()));
    payload.insert(
        "delegation".into(),
        Value::String(delegation.as_str().to_string()),
    );
    let header = JwsHeader::new(issuer.algorithm(), TRUST_MARK_JWT_TYPE, None);
    let hostile_mark = encode_compact(&header, &payload, &issuer).unwrap();

    let provider = StaticKeyProvider::new()
        .with_key(ISSUER, *issuer.verifying_key())
        .with_key(OWNER, *owner.verifying_key());

    let err = verify(
        &hostile_mark,
        TRUST_MARK_JWT_TYPE,
        &provider,
        now_secs(),
        &VerifyOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TrustMarkError::DelegationBinding(_)));
}

#[test]
fn expired_mark_rejected_despite_valid_signature() {
    let issuer = Ed25519JwsSigner::generate();
    let past = now_secs() - 10 * DAY_SECS;

    let mark = TrustMark::builder()
        .id(MARK_ID)
        .issuer(ISSUER)
        .subject(SUBJECT)
        .issue_time(past)
        .expiration_time(past + DAY_SECS)
        .build(&issuer)
        .unwrap();

    let provider = StaticKeyProvider::new().with_key(ISSUER, *issuer.verifying_key());

    let err = verify(
        mark.as_str(),
        TRUST_MARK_JWT_TYPE,
        &provider,
        now_secs(),
        &VerifyOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TrustMarkError::Expired { .. }));
}

#[test]
fn artifact_kind_confusion_rejected_before_signature_work() {
    let owner = Ed25519JwsSigner::generate();

    let delegation = TrustMarkDelegation::builder()
        .issuer(OWNER)
        .subject(ISSUER)
        .id(MARK_ID)
        .build(&owner)
        .unwrap();

    // Empty provider: reaching key lookup would produce UntrustedIssuer,
    // so the UnsupportedMediaType error proves the check order
    let provider = StaticKeyProvider::new();

    let err = verify(
        delegation.as_str(),
        TRUST_MARK_JWT_TYPE,
        &provider,
        now_secs(),
        &VerifyOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TrustMarkError::UnsupportedMediaType { .. }));
}

#[test]
fn concurrent_builds_are_independent() {
    use std::sync::Arc;

    let issuer = Arc::new(Ed25519JwsSigner::generate());
    let mut handles = Vec::new();

    for i in 0..8 {
        let issuer = Arc::clone(&issuer);
        handles.push(std::thread::spawn(move || {
            TrustMark::builder()
                .id(MARK_ID)
                .issuer(ISSUER)
                .subject(format!("https://subject-{i}.example"))
                .build(issuer.as_ref())
                .unwrap()
        }));
    }

    let marks: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Every build produced a fresh identifier
    let mut jtis: Vec<&str> = marks
        .iter()
        .map(|m| m.payload().get("jti").and_then(Value::as_str).unwrap())
        .collect();
    jtis.sort_unstable();
    jtis.dedup();
    assert_eq!(jtis.len(), marks.len());
}
