//! Unit tests for token service

use chrono::Utc;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service_with_secret(secret: &str) -> TokenService {
    TokenService::new(TokenServiceConfig {
        jwt_secret: secret.to_string(),
        expiry_seconds: 3600,
    })
}

#[test]
fn test_generate_and_verify() {
    let service = service_with_secret("test-secret");

    let issued = service.generate(42).unwrap();
    assert_eq!(issued.expires_in, 3600);

    let claims = service.verify(&issued.token).unwrap();
    assert_eq!(claims.id, 42);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_expired_token() {
    let service = service_with_secret("test-secret");
    let now = Utc::now().timestamp();
    let claims = Claims {
        id: 7,
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = service.sign(&claims).unwrap();

    let result = service.verify(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[test]
fn test_token_signed_with_other_secret() {
    let issuer = service_with_secret("secret-a");
    let verifier = service_with_secret("secret-b");

    let issued = issuer.generate(1).unwrap();
    let result = verifier.verify(&issued.token);

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[test]
fn test_garbage_token() {
    let service = service_with_secret("test-secret");

    for token in ["", "not-a-jwt", "a.b.c"] {
        let result = service.verify(token);
        assert!(
            matches!(result, Err(DomainError::Token(TokenError::InvalidTokenFormat))),
            "token {:?} gave {:?}",
            token,
            result
        );
    }
}
