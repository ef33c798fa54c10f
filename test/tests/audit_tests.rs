//! Audit channel tests.
//!
//! The gate's boolean contract never distinguishes why a session holds
//! nothing; the audit channel does.


use common::{basic_artifacts, corrupted_store, seeded_store};
use session_gate_core::session::audit::{AuditLogger, InMemoryEventStore, SessionEventType};
use session_gate_core::session::{authority, AuthorizationGate, MemorySessionStore};

fn audited_gate<S: session_gate_core::session::SessionStore>(
    store: S,
) -> (AuthorizationGate<S>, InMemoryEventStore) {
    let events = InMemoryEventStore::new();
    let gate =
        AuthorizationGate::new(store).with_audit(AuditLogger::new().add_handler(events.clone()));
    (gate, events)
}

#[test]
fn test_corrupted_data_is_distinguishable_on_the_audit_channel() {
    let corrupted = corrupted_store();
    let (gate, events) = audited_gate(&corrupted);

    assert!(!gate.has_any_role(&[authority::ROLE_BASIC]));
    assert_eq!(
        events
            .events_by_type(&SessionEventType::MalformedAuthorityData)
            .len(),
        1
    );

    let anonymous = MemorySessionStore::new();
    let (gate, events) = audited_gate(&anonymous);

    // Same boolean outcome, no corruption diagnostic.
    assert!(!gate.has_any_role(&[authority::ROLE_BASIC]));
    assert!(events
        .events_by_type(&SessionEventType::MalformedAuthorityData)
        .is_empty());
}

#[test]
fn test_gate_outcomes_are_reported_per_evaluation() {
    let store = seeded_store(&basic_artifacts());
    let (gate, events) = audited_gate(&store);

    assert!(gate.has_any_role(&[authority::ROLE_BASIC]));
    assert!(!gate.has_any_role(&[authority::ROLE_ADMIN]));

    assert_eq!(
        events.events_by_type(&SessionEventType::AccessGranted).len(),
        1
    );
    let denied = events.events_by_type(&SessionEventType::AccessDenied);
    assert_eq!(denied.len(), 1);
    assert_eq!(
        denied[0].details.get("required").map(String::as_str),
        Some("ROLE_ADMIN")
    );
}

#[test]
fn test_unrestricted_evaluations_emit_nothing() {
    let store = seeded_store(&basic_artifacts());
    let (gate, events) = audited_gate(&store);

    assert!(gate.is_authorized(None::<&[&str]>));
    assert!(gate.is_authorized(Some(&[] as &[&str])));
    assert!(events.events().is_empty());
}
