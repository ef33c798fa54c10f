//! Authorization gate tests.
//!
//! Exercises the visibility predicate over seeded, cleared, and
//! corrupted stores.


use common::{basic_artifacts, corrupted_store, guest_artifacts, seeded_store, unprivileged_artifacts};
use session_gate_core::session::{authority, AuthSession, AuthorizationGate, MemorySessionStore};

// =============================================================================
// Unrestricted Features
// =============================================================================

#[test]
fn test_absent_requirement_is_visible_to_everyone() {
    let anonymous = MemorySessionStore::new();
    assert!(AuthorizationGate::new(&anonymous).is_authorized(None::<&[&str]>));

    let admin = seeded_store(&common::admin_artifacts());
    assert!(AuthorizationGate::new(&admin).is_authorized(None::<&[&str]>));
}

#[test]
fn test_empty_requirement_is_visible_to_everyone() {
    let anonymous = MemorySessionStore::new();
    assert!(AuthorizationGate::new(&anonymous).is_authorized(Some(&[] as &[&str])));

    let admin = seeded_store(&common::admin_artifacts());
    assert!(AuthorizationGate::new(&admin).is_authorized(Some(&[] as &[&str])));
}

// =============================================================================
// Intersection
// =============================================================================

#[test]
fn test_basic_user_unlocks_basic_or_admin_feature() {
    let store = seeded_store(&basic_artifacts());
    let gate = AuthorizationGate::new(&store);
    assert!(gate.has_any_role(&[authority::ROLE_BASIC, authority::ROLE_ADMIN]));
}

#[test]
fn test_guest_denied_admin_feature() {
    let store = seeded_store(&guest_artifacts());
    let gate = AuthorizationGate::new(&store);
    assert!(!gate.has_any_role(&[authority::ROLE_ADMIN]));
}

#[test]
fn test_unprivileged_user_denied_everything_guarded() {
    let store = seeded_store(&unprivileged_artifacts());
    let gate = AuthorizationGate::new(&store);
    assert!(!gate.has_any_role(&[authority::ROLE_BASIC]));
    assert!(!gate.has_any_role(&[authority::ROLE_GUEST]));
    assert!(gate.is_authorized(None::<&[&str]>));
}

#[test]
fn test_order_of_required_roles_is_irrelevant() {
    let store = seeded_store(&basic_artifacts());
    let gate = AuthorizationGate::new(&store);

    let permutations: [[&str; 3]; 6] = [
        [authority::ROLE_BASIC, authority::ROLE_ADMIN, authority::ROLE_GUEST],
        [authority::ROLE_BASIC, authority::ROLE_GUEST, authority::ROLE_ADMIN],
        [authority::ROLE_ADMIN, authority::ROLE_BASIC, authority::ROLE_GUEST],
        [authority::ROLE_ADMIN, authority::ROLE_GUEST, authority::ROLE_BASIC],
        [authority::ROLE_GUEST, authority::ROLE_BASIC, authority::ROLE_ADMIN],
        [authority::ROLE_GUEST, authority::ROLE_ADMIN, authority::ROLE_BASIC],
    ];
    for permutation in &permutations {
        assert!(gate.has_any_role(permutation));
    }
}

#[test]
fn test_order_of_held_authorities_is_irrelevant() {
    use session_gate_core::session::{GrantedAuthority, SessionKey, SessionStore};

    let forward = MemorySessionStore::new();
    forward
        .write_json(
            SessionKey::Authorities,
            &vec![
                GrantedAuthority::new(authority::ROLE_GUEST),
                GrantedAuthority::new(authority::ROLE_BASIC),
            ],
        )
        .unwrap();

    let reversed = MemorySessionStore::new();
    reversed
        .write_json(
            SessionKey::Authorities,
            &vec![
                GrantedAuthority::new(authority::ROLE_BASIC),
                GrantedAuthority::new(authority::ROLE_GUEST),
            ],
        )
        .unwrap();

    for store in [&forward, &reversed] {
        let gate = AuthorizationGate::new(store);
        assert!(gate.has_any_role(&[authority::ROLE_BASIC]));
        assert!(gate.has_any_role(&[authority::ROLE_GUEST]));
        assert!(!gate.has_any_role(&[authority::ROLE_ADMIN]));
    }
}

#[test]
fn test_matching_is_exact_and_case_sensitive() {
    let store = seeded_store(&basic_artifacts());
    let gate = AuthorizationGate::new(&store);
    assert!(!gate.has_any_role(&["role_basic"]));
    assert!(!gate.has_any_role(&["ROLE_BASIC "]));
    assert!(!gate.has_any_role(&["ROLE_BASIC2"]));
}

// =============================================================================
// Fail-Closed
// =============================================================================

#[test]
fn test_never_authenticated_store_denies_guarded_features() {
    let store = MemorySessionStore::new();
    let gate = AuthorizationGate::new(&store);
    assert!(!gate.has_any_role(&[authority::ROLE_BASIC]));
}

#[test]
fn test_logout_denies_immediately_without_notifying_the_gate() {
    let store = seeded_store(&basic_artifacts());
    let gate = AuthorizationGate::new(&store);
    assert!(gate.has_any_role(&[authority::ROLE_BASIC]));

    AuthSession::logout(&store);
    assert!(!gate.has_any_role(&[authority::ROLE_BASIC]));
}

#[test]
fn test_corrupted_authorities_deny_like_never_authenticated() {
    let corrupted = corrupted_store();
    let fresh = MemorySessionStore::new();

    for required in [
        vec![authority::ROLE_BASIC],
        vec![authority::ROLE_ADMIN, authority::ROLE_BASIC],
    ] {
        let from_corrupted =
            AuthorizationGate::new(&corrupted).is_authorized(Some(&required[..]));
        let from_fresh = AuthorizationGate::new(&fresh).is_authorized(Some(&required[..]));
        assert_eq!(from_corrupted, from_fresh);
        assert!(!from_corrupted);
    }

    // Unrestricted features stay visible either way.
    assert!(AuthorizationGate::new(&corrupted).is_authorized(None::<&[&str]>));
}

// =============================================================================
// Concrete Scenarios
// =============================================================================

#[test]
fn test_scenario_basic_holder_against_basic_or_admin() {
    let store = seeded_store(&basic_artifacts());
    assert!(AuthorizationGate::new(&store)
        .has_any_role(&[authority::ROLE_BASIC, authority::ROLE_ADMIN]));
}

#[test]
fn test_scenario_guest_holder_against_admin() {
    let store = seeded_store(&guest_artifacts());
    assert!(!AuthorizationGate::new(&store).has_any_role(&[authority::ROLE_ADMIN]));
}

#[test]
fn test_scenario_empty_holder_against_absent_requirement() {
    let store = seeded_store(&unprivileged_artifacts());
    assert!(AuthorizationGate::new(&store).is_authorized(None::<&[&str]>));
}

#[test]
fn test_scenario_admin_holder_against_empty_requirement() {
    let store = seeded_store(&common::admin_artifacts());
    assert!(AuthorizationGate::new(&store).is_authorized(Some(&[] as &[&str])));
}

#[test]
fn test_scenario_cleared_store_against_basic_requirement() {
    let store = seeded_store(&basic_artifacts());
    AuthSession::logout(&store);
    assert!(!AuthorizationGate::new(&store).has_any_role(&[authority::ROLE_BASIC]));
}
