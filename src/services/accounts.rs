use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::models::User;
use crate::domain::types::UserRole;
use crate::repositories;
use crate::services::errors::DomainError;
use crate::services::rules;
use crate::store::RecordStore;

pub(crate) async fn register(
    store: &dyn RecordStore,
    name: &str,
    email: &str,
    role: UserRole,
) -> Result<User, DomainError> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() {
        return Err(DomainError::validation("Name must not be empty"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation("A valid email address is required"));
    }
    if repositories::users::find_by_email(store, email).await?.is_some() {
        return Err(DomainError::EmailInUse);
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        last_login: None,
        login_streak: 0,
        badges: Vec::new(),
    };
    repositories::users::insert(store, &user).await?;

    tracing::info!(user_id = %user.id, role = ?role, action = "user_register", "User registered");
    Ok(user)
}

pub(crate) async fn update_profile(
    store: &dyn RecordStore,
    user_id: &str,
    name: &str,
    email: &str,
) -> Result<User, DomainError> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() {
        return Err(DomainError::validation("Name must not be empty"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation("A valid email address is required"));
    }

    let user = repositories::users::find_by_id(store, user_id)
        .await?
        .ok_or(DomainError::NotFound("User"))?;

    if let Some(existing) = repositories::users::find_by_email(store, email).await? {
        if existing.id != user.id {
            return Err(DomainError::EmailInUse);
        }
    }

    repositories::users::update_profile(store, &user.id, name, email).await?;

    let updated = repositories::users::find_by_id(store, user_id)
        .await?
        .ok_or(DomainError::NotFound("User"))?;
    tracing::info!(user_id = %updated.id, action = "profile_update", "Profile updated");
    Ok(updated)
}

/// Streak and badge bookkeeping for a login at `now`. Students only; for
/// teachers this is a plain lookup.
pub(crate) async fn record_login(
    store: &dyn RecordStore,
    user_id: &str,
    now: OffsetDateTime,
) -> Result<User, DomainError> {
    let user = repositories::users::find_by_id(store, user_id)
        .await?
        .ok_or(DomainError::NotFound("User"))?;

    if user.role != UserRole::Student {
        return Ok(user);
    }

    let update = rules::advance_login_streak(user.last_login, user.login_streak, &user.badges, now);
    let mut badges = user.badges.clone();
    badges.extend(update.newly_earned);

    repositories::users::update_login(store, &user.id, now, update.login_streak, &badges).await?;

    let updated = repositories::users::find_by_id(store, user_id)
        .await?
        .ok_or(DomainError::NotFound("User"))?;
    tracing::info!(
        user_id = %updated.id,
        login_streak = updated.login_streak,
        action = "login_recorded",
        "Login recorded"
    );
    Ok(updated)
}
