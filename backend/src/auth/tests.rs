use super::*;
use jsonwebtoken::{EncodingKey, Header, encode};

const SECRET: &str = "test-secret";

fn token_for(claims: &Claims) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn claims(role: &str) -> Claims {
    Claims {
        sub: Uuid::new_v4().to_string(),
        role: role.to_string(),
        email: Some("mobile@shearbook.test".to_string()),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    }
}

#[test]
fn accepts_a_valid_token() {
    let claims = claims("user");
    let token = token_for(&claims);

    let decoded = validate_jwt(&token, SECRET).unwrap();

    assert_eq!(decoded.sub, claims.sub);
    assert_eq!(decoded.role, "user");
}

#[test]
fn rejects_a_token_signed_with_another_secret() {
    let token = token_for(&claims("user"));

    assert!(validate_jwt(&token, "other-secret").is_err());
}

#[test]
fn rejects_an_expired_token() {
    let mut expired = claims("user");
    expired.exp = (chrono::Utc::now().timestamp() - 3600) as usize;
    let token = token_for(&expired);

    assert!(validate_jwt(&token, SECRET).is_err());
}

#[test]
fn super_admin_role_maps_to_a_super_admin_principal() {
    let user_id = Uuid::new_v4();
    let auth = AuthUser {
        user_id,
        email: None,
        role: SUPER_ADMIN_ROLE.to_string(),
    };

    assert!(auth.is_super_admin());
    let principal = auth.principal();
    assert!(principal.super_admin);
    assert_eq!(principal.user_id, user_id);
}

#[test]
fn plain_user_role_maps_to_a_regular_principal() {
    let auth = AuthUser {
        user_id: Uuid::new_v4(),
        email: None,
        role: "user".to_string(),
    };

    assert!(!auth.is_super_admin());
    assert!(!auth.principal().super_admin);
}
