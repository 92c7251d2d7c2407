use std::time::{SystemTime, UNIX_EPOCH};

use fixoo_auth::error::AuthServiceError;
use fixoo_auth::usecase::token::{LoginInput, LoginUseCase, RefreshTokenUseCase, issue_token_pair};
use fixoo_auth_types::token::{
    ACCESS_TOKEN_EXP, AuthError, TokenType, validate_access_token, validate_refresh_token,
};
use fixoo_domain::user::UserRole;

use crate::helpers::{MockStore, TEST_JWT_SECRET, TEST_PASSWORD, TEST_PHONE, test_user};

// ── issue_token_pair ─────────────────────────────────────────────────────────

#[test]
fn should_issue_access_token_carrying_identity() {
    let user = test_user(TEST_PHONE, UserRole::Mentor);
    let pair = issue_token_pair(&user, TEST_JWT_SECRET).unwrap();

    let info = validate_access_token(&pair.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
    assert_eq!(info.role, UserRole::Mentor);
    assert_eq!(info.phone, TEST_PHONE);
    assert_eq!(info.exp, pair.access_token_exp);
}

#[test]
fn should_keep_access_tokens_short_lived() {
    let user = test_user(TEST_PHONE, UserRole::Admin);
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();

    let pair = issue_token_pair(&user, TEST_JWT_SECRET).unwrap();

    assert!(pair.access_token_exp >= now + ACCESS_TOKEN_EXP);
    assert!(pair.access_token_exp <= now + 15 * 60 + 1);
}

#[test]
fn should_not_accept_refresh_token_as_access_token() {
    let user = test_user(TEST_PHONE, UserRole::Student);
    let pair = issue_token_pair(&user, TEST_JWT_SECRET).unwrap();

    let err = validate_access_token(&pair.refresh_token, TEST_JWT_SECRET).unwrap_err();
    assert!(matches!(err, AuthError::WrongType));

    let claims = validate_refresh_token(&pair.refresh_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.typ, TokenType::Refresh);
    assert!(claims.exp > pair.access_token_exp);
}

// ── LoginUseCase ─────────────────────────────────────────────────────────────

fn login_usecase(store: MockStore) -> LoginUseCase<MockStore> {
    LoginUseCase {
        users: store,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

#[tokio::test]
async fn should_login_with_phone_and_password() {
    let user = test_user(TEST_PHONE, UserRole::Admin);
    let usecase = login_usecase(MockStore::with_users(vec![user.clone()]));

    let out = usecase
        .execute(LoginInput {
            phone: TEST_PHONE.to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(out.user.id, user.id);
    let info = validate_access_token(&out.tokens.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.role, UserRole::Admin);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let usecase = login_usecase(MockStore::with_users(vec![test_user(
        TEST_PHONE,
        UserRole::Student,
    )]));

    let err = usecase
        .execute(LoginInput {
            phone: TEST_PHONE.to_owned(),
            password: "wrong-password".to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthServiceError::InvalidCredentials));
}

#[tokio::test]
async fn should_reject_unknown_phone_like_wrong_password() {
    let usecase = login_usecase(MockStore::default());

    let err = usecase
        .execute(LoginInput {
            phone: TEST_PHONE.to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthServiceError::InvalidCredentials));
}

#[tokio::test]
async fn should_reject_login_of_deactivated_account() {
    let mut user = test_user(TEST_PHONE, UserRole::Student);
    user.is_active = false;
    let usecase = login_usecase(MockStore::with_users(vec![user]));

    let err = usecase
        .execute(LoginInput {
            phone: TEST_PHONE.to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthServiceError::InvalidCredentials));
}

// ── RefreshTokenUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_rotate_tokens_with_current_role() {
    let user = test_user(TEST_PHONE, UserRole::Student);
    let store = MockStore::with_users(vec![user.clone()]);
    let pair = issue_token_pair(&user, TEST_JWT_SECRET).unwrap();

    // Promoted after the tokens were issued.
    store.users.lock().unwrap()[0].role = UserRole::Assistant;

    let usecase = RefreshTokenUseCase {
        users: store,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let rotated = usecase.execute(&pair.refresh_token).await.unwrap();

    let info = validate_access_token(&rotated.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
    assert_eq!(info.role, UserRole::Assistant);
}

#[tokio::test]
async fn should_reject_access_token_on_refresh() {
    let user = test_user(TEST_PHONE, UserRole::Student);
    let pair = issue_token_pair(&user, TEST_JWT_SECRET).unwrap();
    let usecase = RefreshTokenUseCase {
        users: MockStore::with_users(vec![user]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let err = usecase.execute(&pair.access_token).await.unwrap_err();
    assert!(matches!(err, AuthServiceError::InvalidRefreshToken));
}

#[tokio::test]
async fn should_reject_refresh_for_missing_user() {
    let user = test_user(TEST_PHONE, UserRole::Student);
    let pair = issue_token_pair(&user, TEST_JWT_SECRET).unwrap();
    let usecase = RefreshTokenUseCase {
        users: MockStore::default(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let err = usecase.execute(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, AuthServiceError::InvalidRefreshToken));
}

#[tokio::test]
async fn should_reject_refresh_token_signed_with_other_secret() {
    let user = test_user(TEST_PHONE, UserRole::Student);
    let pair = issue_token_pair(&user, "another-secret").unwrap();
    let usecase = RefreshTokenUseCase {
        users: MockStore::with_users(vec![user]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let err = usecase.execute(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, AuthServiceError::InvalidRefreshToken));
}
