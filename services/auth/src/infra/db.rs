use anyhow::Context as _;
use chrono::Duration;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, SqlErr, Statement, TransactionTrait,
    sea_query::Expr,
};

use fixoo_auth_schema::{otp_codes, users};
use fixoo_domain::id::{OtpId, UserId};
use fixoo_domain::phone::Phone;
use fixoo_domain::user::UserRole;
use fixoo_domain::verification::{OtpCode, OtpPurpose};

use crate::domain::repository::{AccountRepository, OtpRepository, UserRepository};
use crate::domain::types::{AuthUser, IssueOutcome, NewUser, OneTimeCode};
use crate::error::AuthServiceError;

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn replace_if_cooled_down(
        &self,
        code: &OneTimeCode,
        cooldown: Duration,
    ) -> Result<IssueOutcome, AuthServiceError> {
        let txn = self.db.begin().await.context("begin otp issue")?;

        // Serializes concurrent issuers of the same (phone, purpose) until commit.
        let lock_key = format!("otp:{}:{}", code.purpose, code.phone);
        txn.execute(Statement::from_sql_and_values(
            txn.get_database_backend(),
            "SELECT pg_advisory_xact_lock(hashtext($1))",
            [lock_key.into()],
        ))
        .await
        .context("lock otp key")?;

        let newest = otp_codes::Entity::find()
            .filter(otp_codes::Column::Phone.eq(code.phone.as_str()))
            .filter(otp_codes::Column::Purpose.eq(code.purpose.as_str()))
            .order_by_desc(otp_codes::Column::CreatedAt)
            .one(&txn)
            .await
            .context("find newest otp")?;

        let cooling = newest.filter(|n| n.created_at > code.created_at - cooldown);
        if let Some(newest) = cooling {
            txn.rollback().await.context("rollback otp issue")?;
            return Ok(IssueOutcome::CoolingDown {
                last_issued_at: newest.created_at,
            });
        }

        otp_codes::Entity::delete_many()
            .filter(otp_codes::Column::Phone.eq(code.phone.as_str()))
            .filter(otp_codes::Column::Purpose.eq(code.purpose.as_str()))
            .exec(&txn)
            .await
            .context("delete superseded otps")?;

        otp_codes::ActiveModel {
            id: Set(code.id.0),
            phone: Set(code.phone.as_str().to_owned()),
            purpose: Set(code.purpose.as_str().to_owned()),
            code: Set(code.code.as_str().to_owned()),
            expires_at: Set(code.expires_at),
            used: Set(false),
            created_at: Set(code.created_at),
        }
        .insert(&txn)
        .await
        .context("insert otp")?;

        txn.commit().await.context("commit otp issue")?;
        Ok(IssueOutcome::Issued)
    }

    async fn delete(&self, id: OtpId) -> Result<(), AuthServiceError> {
        otp_codes::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete otp")?;
        Ok(())
    }

    async fn find_unused(
        &self,
        phone: &Phone,
        purpose: OtpPurpose,
        code: &OtpCode,
    ) -> Result<Option<OneTimeCode>, AuthServiceError> {
        let model = otp_codes::Entity::find()
            .filter(otp_codes::Column::Phone.eq(phone.as_str()))
            .filter(otp_codes::Column::Purpose.eq(purpose.as_str()))
            .filter(otp_codes::Column::Code.eq(code.as_str()))
            .filter(otp_codes::Column::Used.eq(false))
            .order_by_desc(otp_codes::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find unused otp")?;
        model.map(otp_from_model).transpose()
    }

    async fn consume(&self, id: OtpId) -> Result<bool, AuthServiceError> {
        Ok(consume_otp(&self.db, id).await.context("consume otp")?)
    }
}

/// `UPDATE otp_codes SET used = true WHERE id = ? AND used = false`.
async fn consume_otp<C: ConnectionTrait>(conn: &C, id: OtpId) -> Result<bool, DbErr> {
    let result = otp_codes::Entity::update_many()
        .col_expr(otp_codes::Column::Used, Expr::value(true))
        .filter(otp_codes::Column::Id.eq(id.0))
        .filter(otp_codes::Column::Used.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected == 1)
}

fn otp_from_model(model: otp_codes::Model) -> Result<OneTimeCode, AuthServiceError> {
    Ok(OneTimeCode {
        id: OtpId(model.id),
        phone: Phone::parse(&model.phone).context("stored otp phone")?,
        purpose: model.purpose.parse::<OtpPurpose>().context("stored otp purpose")?,
        code: OtpCode::parse(&model.code).context("stored otp code")?,
        created_at: model.created_at,
        expires_at: model.expires_at,
        used: model.used,
    })
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_active_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Phone.eq(phone))
            .filter(users::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find user by phone")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }
}

fn user_from_model(model: users::Model) -> Result<AuthUser, AuthServiceError> {
    let role = model
        .role
        .parse::<UserRole>()
        .with_context(|| format!("stored role of user {}", model.id))?;
    Ok(AuthUser {
        id: UserId(model.id),
        phone: model.phone,
        email: model.email,
        full_name: model.full_name,
        password_hash: model.password_hash,
        role,
        is_active: model.is_active,
        created_at: model.created_at,
    })
}

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

/// Unique violations on `users` can only come from the phone or email index.
fn map_user_write(err: DbErr, what: &'static str) -> AuthServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AuthServiceError::PhoneAlreadyRegistered,
        _ => AuthServiceError::Internal(anyhow::Error::new(err).context(what)),
    }
}

impl AccountRepository for DbAccountRepository {
    async fn register(&self, otp_id: OtpId, user: &NewUser) -> Result<AuthUser, AuthServiceError> {
        let txn = self.db.begin().await.context("begin register")?;
        if !consume_otp(&txn, otp_id).await.context("consume otp")? {
            return Err(AuthServiceError::InvalidCode);
        }

        let model = users::ActiveModel {
            id: Set(user.id.0),
            phone: Set(user.phone.as_str().to_owned()),
            email: Set(None),
            full_name: Set(user.full_name.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            is_active: Set(true),
            created_at: Set(user.created_at),
        }
        .insert(&txn)
        .await
        .map_err(|e| map_user_write(e, "insert user"))?;

        txn.commit().await.context("commit register")?;
        user_from_model(model)
    }

    async fn reset_password(
        &self,
        otp_id: OtpId,
        user_id: UserId,
        password_hash: &str,
    ) -> Result<(), AuthServiceError> {
        let txn = self.db.begin().await.context("begin password reset")?;
        if !consume_otp(&txn, otp_id).await.context("consume otp")? {
            return Err(AuthServiceError::InvalidCode);
        }

        let result = users::Entity::update_many()
            .col_expr(users::Column::PasswordHash, Expr::value(password_hash))
            .filter(users::Column::Id.eq(user_id.0))
            .exec(&txn)
            .await
            .context("update password hash")?;
        if result.rows_affected == 0 {
            return Err(AuthServiceError::UserNotFound);
        }

        txn.commit().await.context("commit password reset")?;
        Ok(())
    }

    async fn change_phone(
        &self,
        otp_id: OtpId,
        user_id: UserId,
        new_phone: &Phone,
    ) -> Result<AuthUser, AuthServiceError> {
        let txn = self.db.begin().await.context("begin phone change")?;
        if !consume_otp(&txn, otp_id).await.context("consume otp")? {
            return Err(AuthServiceError::InvalidCode);
        }

        let model = users::ActiveModel {
            id: Set(user_id.0),
            phone: Set(new_phone.as_str().to_owned()),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => AuthServiceError::UserNotFound,
            other => map_user_write(other, "update phone"),
        })?;

        txn.commit().await.context("commit phone change")?;
        user_from_model(model)
    }

    async fn change_password(
        &self,
        user_id: UserId,
        password_hash: &str,
    ) -> Result<(), AuthServiceError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::PasswordHash, Expr::value(password_hash))
            .filter(users::Column::Id.eq(user_id.0))
            .filter(users::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .context("update password hash")?;
        if result.rows_affected == 0 {
            return Err(AuthServiceError::UserNotFound);
        }
        Ok(())
    }
}
