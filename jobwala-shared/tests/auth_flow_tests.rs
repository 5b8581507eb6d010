/// Integration tests for the authentication building blocks
///
/// Exercises the password hashing and JWT modules together, the way the API
/// server's register/login/refresh handlers compose them. No database needed.

use jobwala_shared::auth::jwt::{
    create_token, refresh_access_token, validate_access_token, validate_refresh_token, Claims,
    TokenType,
};
use jobwala_shared::auth::password::{hash_password, validate_password_strength, verify_password};
use jobwala_shared::models::user::UserRole;
use uuid::Uuid;

const SECRET: &str = "auth-flow-test-secret-at-least-32-bytes";

#[test]
fn test_register_login_token_flow() {
    // Register: strength check, then hash
    let password = "jobwala123";
    validate_password_strength(password).expect("password should pass strength check");
    let hash = hash_password(password).expect("hash should succeed");

    // Login: verify, then issue both tokens
    assert!(verify_password(password, &hash).expect("verify should succeed"));
    assert!(!verify_password("wrong-password1", &hash).expect("verify should succeed"));

    let user_id = Uuid::new_v4();
    let access = create_token(
        &Claims::new(user_id, UserRole::Employer, TokenType::Access),
        SECRET,
    )
    .expect("access token");
    let refresh = create_token(
        &Claims::new(user_id, UserRole::Employer, TokenType::Refresh),
        SECRET,
    )
    .expect("refresh token");

    // The access token authenticates requests and carries the role
    let claims = validate_access_token(&access, SECRET).expect("access token validates");
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.role, UserRole::Employer);

    // The refresh token is only good for refreshing
    assert!(validate_access_token(&refresh, SECRET).is_err());
    assert!(validate_refresh_token(&refresh, SECRET).is_ok());

    // Refresh produces a fresh, valid access token with the same identity
    let new_access = refresh_access_token(&refresh, SECRET).expect("refresh succeeds");
    let new_claims = validate_access_token(&new_access, SECRET).expect("new access validates");
    assert_eq!(new_claims.sub, user_id);
    assert_eq!(new_claims.role, UserRole::Employer);
}

#[test]
fn test_token_rejected_with_wrong_secret() {
    let claims = Claims::new(Uuid::new_v4(), UserRole::Jobseeker, TokenType::Access);
    let token = create_token(&claims, SECRET).unwrap();

    assert!(validate_access_token(&token, "a-completely-different-secret-32b!").is_err());
}
