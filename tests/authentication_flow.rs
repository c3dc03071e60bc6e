use std::sync::Arc;
use std::thread;

use challenge_gate::auth::{
    AuthError, AuthService, ChallengeIssuer, ChallengeMessage, Identity, InMemoryReplayRegistry,
    ManualClock, MessageHash, Nonce, RegistryError, ReplayRegistry, generate_keypair,
    sign_challenge,
};
use challenge_gate::compute_hash; // re-exported canonical hash

/// Helper to build a challenge with an explicit validity window
fn challenge(subject: Identity, issued_at: u64, expires_at: u64) -> ChallengeMessage {
    ChallengeMessage {
        domain: "example.com".to_string(),
        subject,
        statement: "Sign in to Example".to_string(),
        resource: "https://example.com/login".to_string(),
        scope_id: 31337,
        nonce: Nonce::from_bytes([0x42; 32]),
        issued_at,
        expires_at,
    }
}

/// Helper: verifier over a manual clock pinned at `now`
fn verifier_at(now: u64) -> (AuthService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(now));
    let service = AuthService::builder().clock(clock.clone()).build();
    (service, clock)
}

#[test]
fn full_round_trip_then_replay_rejected() {
    let (service, _) = verifier_at(1_100);
    let (signing_key, subject) = generate_keypair();

    let message = challenge(subject, 1_000, 1_300);
    let envelope = sign_challenge(&signing_key, &compute_hash(&message));

    let record = service
        .authenticate(&message, &envelope)
        .expect("first use of a valid signed challenge must be accepted");
    assert_eq!(record.subject, subject);
    assert_eq!(record.message_hash, compute_hash(&message));
    assert_eq!(record.accepted_at, 1_100);

    assert!(
        matches!(
            service.authenticate(&message, &envelope),
            Err(AuthError::MessageAlreadyUsed)
        ),
        "second use of the same pair must be a replay rejection"
    );
}

#[test]
fn issued_challenge_signs_verifies_and_broadcasts() {
    // End to end through the issuer instead of a hand-built message.
    let clock = Arc::new(ManualClock::new(50_000));
    let service = AuthService::builder().clock(clock.clone()).build();
    let issuer = ChallengeIssuer::new(
        "example.com",
        "Sign in to Example",
        "https://example.com/login",
        31337,
        clock,
    )
    .with_ttl(120);

    let mut events = service.subscribe();
    let (signing_key, subject) = generate_keypair();

    let message = issuer.issue(subject).expect("manual clock cannot fail");
    assert_eq!(message.expires_at, 50_120);

    let envelope = sign_challenge(&signing_key, &compute_hash(&message));
    let record = service.authenticate(&message, &envelope).unwrap();

    assert_eq!(
        events.try_recv().expect("success must be broadcast"),
        record
    );
}

#[test]
fn wrong_signer_rejected() {
    let (service, _) = verifier_at(1_100);
    let (_, subject) = generate_keypair();
    let (impostor_key, _) = generate_keypair();

    let message = challenge(subject, 1_000, 1_300);
    let envelope = sign_challenge(&impostor_key, &compute_hash(&message));

    assert!(matches!(
        service.authenticate(&message, &envelope),
        Err(AuthError::InvalidSignature)
    ));
}

#[test]
fn any_field_change_invalidates_the_signature() {
    let (service, _) = verifier_at(1_100);
    let (signing_key, subject) = generate_keypair();

    let original = challenge(subject, 1_000, 1_300);
    let envelope = sign_challenge(&signing_key, &compute_hash(&original));

    let mut statement_swapped = original.clone();
    statement_swapped.statement = "Sign in as admin".to_string();

    let mut scope_swapped = original.clone();
    scope_swapped.scope_id = 1;

    let mut window_stretched = original.clone();
    window_stretched.expires_at = 9_999_999;

    for tampered in [statement_swapped, scope_swapped, window_stretched] {
        assert!(
            matches!(
                service.authenticate(&tampered, &envelope),
                Err(AuthError::InvalidSignature)
            ),
            "a signature over the original must not cover a mutated message"
        );
    }
}

#[test]
fn truncated_envelope_rejected() {
    let (service, _) = verifier_at(1_100);
    let (signing_key, subject) = generate_keypair();

    let message = challenge(subject, 1_000, 1_300);
    let envelope = sign_challenge(&signing_key, &compute_hash(&message));

    assert!(matches!(
        service.authenticate(&message, &envelope[..64]),
        Err(AuthError::InvalidSignature)
    ));
    assert!(matches!(
        service.authenticate(&message, &[]),
        Err(AuthError::InvalidSignature)
    ));
}

#[test]
fn signing_the_bare_hash_rejected() {
    // A client that forgets the signing context produces a structurally
    // valid envelope that must still fail verification.
    use ed25519_dalek::Signer;

    let (service, _) = verifier_at(1_100);
    let (signing_key, subject) = generate_keypair();

    let message = challenge(subject, 1_000, 1_300);
    let hash = compute_hash(&message);

    let signature = signing_key.sign(hash.as_bytes());
    let mut envelope = Vec::with_capacity(96);
    envelope.extend_from_slice(&signature.to_bytes());
    envelope.extend_from_slice(signing_key.verifying_key().as_bytes());

    assert!(matches!(
        service.authenticate(&message, &envelope),
        Err(AuthError::InvalidSignature)
    ));
}

#[test]
fn expiry_boundary_is_inclusive() {
    let (service, clock) = verifier_at(1_300);
    let (signing_key, subject) = generate_keypair();

    let message = challenge(subject, 1_000, 1_300);
    let envelope = sign_challenge(&signing_key, &compute_hash(&message));

    // now == expires_at: still valid
    let record = service.authenticate(&message, &envelope).unwrap();
    assert_eq!(record.accepted_at, 1_300);

    // one second later a fresh equivalent message would be expired
    let late = challenge(subject, 1_000, 1_299);
    let late_envelope = sign_challenge(&signing_key, &compute_hash(&late));
    clock.set(1_300);
    assert!(matches!(
        service.authenticate(&late, &late_envelope),
        Err(AuthError::MessageExpired)
    ));
}

#[test]
fn future_validity_window_is_accepted() {
    // Only the upper bound is enforced; a not-yet-opened window passes.
    let (service, _) = verifier_at(1_000);
    let (signing_key, subject) = generate_keypair();

    let message = challenge(subject, 5_000, 5_300);
    let envelope = sign_challenge(&signing_key, &compute_hash(&message));

    assert!(service.authenticate(&message, &envelope).is_ok());
}

#[test]
fn concurrent_replay_admits_exactly_one_winner() {
    let clock = Arc::new(ManualClock::new(1_100));
    let service = Arc::new(AuthService::builder().clock(clock).build());
    let (signing_key, subject) = generate_keypair();

    let message = challenge(subject, 1_000, 1_300);
    let envelope = sign_challenge(&signing_key, &compute_hash(&message));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            let message = message.clone();
            let envelope = envelope.clone();
            thread::spawn(move || service.authenticate(&message, &envelope))
        })
        .collect();

    let mut accepted = 0;
    let mut replays = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(_) => accepted += 1,
            Err(AuthError::MessageAlreadyUsed) => replays += 1,
            Err(other) => panic!("unexpected rejection under contention: {other}"),
        }
    }

    assert_eq!(accepted, 1, "exactly one concurrent attempt may win");
    assert_eq!(replays, 7);
}

#[test]
fn invalid_signature_masks_expiry_and_replay() {
    // A message that is expired AND replayed AND badly signed reports
    // the signature failure: checks run in pipeline order.
    let (service, clock) = verifier_at(1_100);
    let (signing_key, subject) = generate_keypair();

    let message = challenge(subject, 1_000, 1_300);
    let envelope = sign_challenge(&signing_key, &compute_hash(&message));
    service.authenticate(&message, &envelope).unwrap();
    clock.set(9_000);

    let mut garbled = envelope.clone();
    garbled[0] ^= 0x80;
    assert!(matches!(
        service.authenticate(&message, &garbled),
        Err(AuthError::InvalidSignature)
    ));
}

#[test]
fn expiry_masks_replay() {
    let (service, clock) = verifier_at(1_100);
    let (signing_key, subject) = generate_keypair();

    let message = challenge(subject, 1_000, 1_300);
    let envelope = sign_challenge(&signing_key, &compute_hash(&message));
    service.authenticate(&message, &envelope).unwrap();
    clock.set(9_000);

    assert!(matches!(
        service.authenticate(&message, &envelope),
        Err(AuthError::MessageExpired)
    ));
}

#[test]
fn failed_attempts_leave_the_message_spendable() {
    let registry = Arc::new(InMemoryReplayRegistry::new());
    let clock = Arc::new(ManualClock::new(1_100));
    let service = AuthService::builder()
        .registry(registry.clone())
        .clock(clock)
        .build();

    let (signing_key, subject) = generate_keypair();
    let (impostor_key, _) = generate_keypair();
    let message = challenge(subject, 1_000, 1_300);
    let hash = compute_hash(&message);

    // Impostor attempt fails and must not consume the hash.
    let forged = sign_challenge(&impostor_key, &hash);
    assert!(service.authenticate(&message, &forged).is_err());
    assert!(!registry.is_consumed(&hash).unwrap());

    // The legitimate signer still gets through afterwards.
    let envelope = sign_challenge(&signing_key, &hash);
    assert!(service.authenticate(&message, &envelope).is_ok());
    assert!(registry.is_consumed(&hash).unwrap());
}

#[test]
fn scope_binding_is_opt_in() {
    let (signing_key, subject) = generate_keypair();
    let message = challenge(subject, 1_000, 1_300); // scope_id 31337
    let envelope = sign_challenge(&signing_key, &compute_hash(&message));

    // Unset: any scope passes.
    let lenient = AuthService::builder()
        .clock(Arc::new(ManualClock::new(1_100)))
        .build();
    assert!(lenient.authenticate(&message, &envelope).is_ok());

    // Set to a different scope: rejected with both scopes named.
    let strict = AuthService::builder()
        .clock(Arc::new(ManualClock::new(1_100)))
        .expected_scope(Some(7))
        .build();
    match strict.authenticate(&message, &envelope) {
        Err(AuthError::ScopeMismatch { expected, actual }) => {
            assert_eq!(expected, 7);
            assert_eq!(actual, 31337);
        }
        other => panic!("expected scope mismatch, got {other:?}"),
    }

    // Set to the matching scope: accepted.
    let matching = AuthService::builder()
        .clock(Arc::new(ManualClock::new(1_100)))
        .expected_scope(Some(31337))
        .build();
    assert!(matching.authenticate(&message, &envelope).is_ok());
}

/// Registry double whose backend is permanently down
struct DownRegistry;

impl ReplayRegistry for DownRegistry {
    fn try_consume(&self, _hash: &MessageHash) -> Result<bool, RegistryError> {
        Err(RegistryError::Unavailable("backend offline".to_string()))
    }

    fn is_consumed(&self, _hash: &MessageHash) -> Result<bool, RegistryError> {
        Err(RegistryError::Unavailable("backend offline".to_string()))
    }
}

#[test]
fn registry_outage_is_infrastructure_not_rejection() {
    let clock = Arc::new(ManualClock::new(1_100));
    let service = AuthService::builder()
        .registry(Arc::new(DownRegistry))
        .clock(clock)
        .build();

    let (signing_key, subject) = generate_keypair();
    let message = challenge(subject, 1_000, 1_300);
    let envelope = sign_challenge(&signing_key, &compute_hash(&message));

    let err = service.authenticate(&message, &envelope).unwrap_err();
    assert!(matches!(err, AuthError::Infrastructure(_)));
    assert!(
        !err.is_protocol_rejection(),
        "an unavailable registry is not a verdict on the message"
    );
}
