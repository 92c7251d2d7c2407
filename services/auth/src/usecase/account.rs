use tracing::info;

use fixoo_domain::id::UserId;
use fixoo_domain::phone::Phone;
use fixoo_domain::user::UserRole;
use fixoo_domain::verification::{OtpCode, OtpPurpose};

use crate::domain::repository::{AccountRepository, Clock, OtpRepository, UserRepository};
use crate::domain::types::{NewUser, PublicUser, TokenPair};
use crate::error::AuthServiceError;
use crate::usecase::password::{
    hash_password_off_thread, validate_password, verify_password_off_thread,
};
use crate::usecase::token::issue_token_pair;
use crate::usecase::verification::find_live_code;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub phone: String,
    pub code: String,
    pub full_name: String,
    pub password: String,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub user: PublicUser,
    pub tokens: TokenPair,
}

pub struct RegisterUseCase<U, O, A, C>
where
    U: UserRepository,
    O: OtpRepository,
    A: AccountRepository,
    C: Clock,
{
    pub users: U,
    pub otps: O,
    pub accounts: A,
    pub clock: C,
    pub jwt_secret: String,
}

impl<U, O, A, C> RegisterUseCase<U, O, A, C>
where
    U: UserRepository,
    O: OtpRepository,
    A: AccountRepository,
    C: Clock,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<RegisterOutput, AuthServiceError> {
        let phone = Phone::parse(&input.phone)?;
        let code = OtpCode::parse(&input.code)?;
        let full_name = input.full_name.trim();
        if full_name.is_empty() {
            return Err(AuthServiceError::Validation("full_name is required".to_owned()));
        }
        validate_password(&input.password)?;

        let now = self.clock.now();
        let record =
            find_live_code(&self.otps, now, &phone, OtpPurpose::Registration, &code).await?;

        if self.users.find_active_by_phone(phone.as_str()).await?.is_some() {
            return Err(AuthServiceError::PhoneAlreadyRegistered);
        }

        let new_user = NewUser {
            id: UserId::new(),
            phone,
            full_name: full_name.to_owned(),
            password_hash: hash_password_off_thread(&input.password).await?,
            role: UserRole::Student,
            created_at: now,
        };
        let user = self.accounts.register(record.id, &new_user).await?;
        info!(user_id = %user.id, phone = %user.phone, "user registered");

        let tokens = issue_token_pair(&user, &self.jwt_secret)?;
        Ok(RegisterOutput {
            user: user.to_public(),
            tokens,
        })
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub phone: String,
    pub code: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<U, O, A, C>
where
    U: UserRepository,
    O: OtpRepository,
    A: AccountRepository,
    C: Clock,
{
    pub users: U,
    pub otps: O,
    pub accounts: A,
    pub clock: C,
}

impl<U, O, A, C> ResetPasswordUseCase<U, O, A, C>
where
    U: UserRepository,
    O: OtpRepository,
    A: AccountRepository,
    C: Clock,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AuthServiceError> {
        let phone = Phone::parse(&input.phone)?;
        let code = OtpCode::parse(&input.code)?;
        validate_password(&input.new_password)?;

        let record = find_live_code(
            &self.otps,
            self.clock.now(),
            &phone,
            OtpPurpose::PasswordReset,
            &code,
        )
        .await?;

        let user = self
            .users
            .find_active_by_phone(phone.as_str())
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        let hash = hash_password_off_thread(&input.new_password).await?;
        self.accounts.reset_password(record.id, user.id, &hash).await?;
        info!(user_id = %user.id, "password reset");
        Ok(())
    }
}

// ── ChangePhone ──────────────────────────────────────────────────────────────

pub struct ChangePhoneInput {
    pub user_id: UserId,
    pub new_phone: String,
    pub code: String,
}

pub struct ChangePhoneUseCase<U, O, A, C>
where
    U: UserRepository,
    O: OtpRepository,
    A: AccountRepository,
    C: Clock,
{
    pub users: U,
    pub otps: O,
    pub accounts: A,
    pub clock: C,
}

impl<U, O, A, C> ChangePhoneUseCase<U, O, A, C>
where
    U: UserRepository,
    O: OtpRepository,
    A: AccountRepository,
    C: Clock,
{
    /// The code must have been issued to the new phone.
    pub async fn execute(&self, input: ChangePhoneInput) -> Result<PublicUser, AuthServiceError> {
        let new_phone = Phone::parse(&input.new_phone)?;
        let code = OtpCode::parse(&input.code)?;

        let record = find_live_code(
            &self.otps,
            self.clock.now(),
            &new_phone,
            OtpPurpose::PhoneChange,
            &code,
        )
        .await?;

        let user = self
            .users
            .find_by_id(input.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(AuthServiceError::UserNotFound)?;

        let holder = self.users.find_active_by_phone(new_phone.as_str()).await?;
        if holder.is_some_and(|h| h.id != user.id) {
            return Err(AuthServiceError::PhoneAlreadyRegistered);
        }

        let updated = self
            .accounts
            .change_phone(record.id, user.id, &new_phone)
            .await?;
        info!(user_id = %updated.id, "phone changed");
        Ok(updated.to_public())
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

pub struct ChangePasswordUseCase<U, A>
where
    U: UserRepository,
    A: AccountRepository,
{
    pub users: U,
    pub accounts: A,
}

impl<U, A> ChangePasswordUseCase<U, A>
where
    U: UserRepository,
    A: AccountRepository,
{
    pub async fn execute(&self, input: ChangePasswordInput) -> Result<(), AuthServiceError> {
        if input.new_password != input.confirm_password {
            return Err(AuthServiceError::Validation("passwords do not match".to_owned()));
        }
        validate_password(&input.new_password)?;

        let user = self
            .users
            .find_by_id(input.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(AuthServiceError::UserNotFound)?;
        if !verify_password_off_thread(&input.current_password, &user.password_hash).await? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let hash = hash_password_off_thread(&input.new_password).await?;
        self.accounts.change_password(user.id, &hash).await?;
        info!(user_id = %user.id, "password changed");
        Ok(())
    }
}

// ── Me ───────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetMeUseCase<U> {
    pub async fn execute(&self, user_id: UserId) -> Result<PublicUser, AuthServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .filter(|u| u.is_active)
            .map(|u| u.to_public())
            .ok_or(AuthServiceError::UserNotFound)
    }
}
