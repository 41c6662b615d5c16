//! Tests for the authentication collaborator

use fraudsift::auth::{AuthError, Authenticator, MemoryAuthenticator};

#[test]
fn test_valid_credentials_yield_a_principal() {
    let auth = MemoryAuthenticator::new().with_user("admin", "admin123");

    let principal = auth.authenticate("admin", "admin123").unwrap();
    assert_eq!(principal.username, "admin");
    assert_eq!(principal.id, 1);
}

#[test]
fn test_wrong_password_is_rejected() {
    let auth = MemoryAuthenticator::new().with_user("admin", "admin123");

    assert_eq!(
        auth.authenticate("admin", "nope"),
        Err(AuthError::InvalidCredentials)
    );
}

#[test]
fn test_unknown_user_is_indistinguishable_from_wrong_password() {
    let auth = MemoryAuthenticator::new().with_user("admin", "admin123");

    assert_eq!(
        auth.authenticate("ghost", "admin123"),
        Err(AuthError::InvalidCredentials)
    );
}

#[test]
fn test_ids_follow_insertion_order() {
    let auth = MemoryAuthenticator::new()
        .with_user("first", "pw1")
        .with_user("second", "pw2");

    assert_eq!(auth.authenticate("first", "pw1").unwrap().id, 1);
    assert_eq!(auth.authenticate("second", "pw2").unwrap().id, 2);
}
