use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use crate::{
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest, UserList, UserProfile},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Role, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<UserProfile>> {
    let RegisterRequest {
        email,
        password,
        name,
        role,
        restaurant_type,
        location,
        phone,
    } = payload;

    if role == Role::Admin {
        return Err(AppError::BadRequest("Cannot register as admin".into()));
    }

    let password_hash = hash_password(&password)?;

    let user = state.store.write(|c| {
        if c.user_by_email(&email).is_some() {
            return Err(AppError::BadRequest("Email is already taken".into()));
        }
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            role,
            restaurant_type,
            location,
            phone,
            rating: None,
            reward_points: (role == Role::Restaurant).then_some(0),
            created_at: Utc::now(),
        };
        c.users.push(user.clone());
        Ok(user)
    })?;

    tracing::info!(user_id = %user.id, role = ?user.role, "user registered");
    Ok(ApiResponse::success("User created", user.into(), None))
}

pub fn login_user(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;

    let user = state
        .store
        .read(|c| c.user_by_email(&email).cloned())
        .ok_or_else(|| AppError::BadRequest("Invalid email or password".into()))?;

    if !verify_password(&password, &user.password_hash)? {
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    let resp = LoginResponse {
        token: format!("Bearer {token}"),
        user: user.into(),
    };

    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

pub fn list_users(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let items = state.store.read(|c| {
        c.users
            .iter()
            .cloned()
            .map(UserProfile::from)
            .collect::<Vec<_>>()
    });
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Users",
        UserList { items },
        Some(Meta::new(1, total, total)),
    ))
}
