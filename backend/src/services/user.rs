//! User and role administration service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::User;
use shared::Role;

const BCRYPT_COST: u32 = 10;

/// User service for account and role management
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// Input for creating a user account
#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: Option<String>,
    first_name: String,
    last_name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, roles: Vec<Role>) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            is_active: self.is_active,
            roles,
            created_at: self.created_at,
        }
    }
}

const USER_SELECT: &str = r#"
    SELECT id, username, email, first_name, last_name, is_active, created_at
    FROM users
"#;

fn parse_roles(names: &[String]) -> AppResult<Vec<Role>> {
    names
        .iter()
        .map(|name| {
            Role::parse(name).ok_or_else(|| AppError::Validation {
                field: "roles".to_string(),
                message: format!("Unknown role: {}", name),
                message_fr: format!("Rôle inconnu: {}", name),
            })
        })
        .collect()
}

/// Insert the built-in roles if missing. Safe to run at every startup.
pub async fn seed_default_roles(db: &PgPool) -> AppResult<()> {
    for role in Role::ALL {
        sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(role.as_str())
            .execute(db)
            .await?;
    }
    Ok(())
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn roles_by_user(&self) -> AppResult<HashMap<Uuid, Vec<Role>>> {
        let rows = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT ur.user_id, r.name
            FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let mut map: HashMap<Uuid, Vec<Role>> = HashMap::new();
        for (user_id, name) in rows {
            // Unknown names in the roles table are skipped, not fatal
            if let Some(role) = Role::parse(&name) {
                map.entry(user_id).or_default().push(role);
            }
        }
        Ok(map)
    }

    async fn roles_for_user(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, (String,)>(
            r#"
            SELECT r.name
            FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            WHERE ur.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(name,)| Role::parse(&name))
            .collect())
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let sql = format!("{} ORDER BY username", USER_SELECT);
        let rows = sqlx::query_as::<_, UserRow>(&sql).fetch_all(&self.db).await?;
        let mut roles = self.roles_by_user().await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let user_roles = roles.remove(&row.id).unwrap_or_default();
                row.into_user(user_roles)
            })
            .collect())
    }

    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        let sql = format!("{} WHERE id = $1", USER_SELECT);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        let roles = self.roles_for_user(user_id).await?;
        Ok(row.into_user(roles))
    }

    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<User> {
        if input.password.len() < 8 {
            return Err(AppError::Validation {
                field: "password".to_string(),
                message: "Password must be at least 8 characters".to_string(),
                message_fr: "Le mot de passe doit contenir au moins 8 caractères".to_string(),
            });
        }

        let roles = parse_roles(input.roles.as_deref().unwrap_or_default())?;

        let duplicate =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = $1")
                .bind(&input.username)
                .fetch_one(&self.db)
                .await?;
        if duplicate > 0 {
            return Err(AppError::DuplicateEntry("username".to_string()));
        }

        let password_hash =
            bcrypt::hash(&input.password, BCRYPT_COST).map_err(anyhow::Error::from)?;

        let mut tx = self.db.begin().await?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (username, email, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(input.first_name.unwrap_or_default())
        .bind(input.last_name.unwrap_or_default())
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await?;

        for role in &roles {
            sqlx::query(
                r#"
                INSERT INTO user_roles (user_id, role_id)
                SELECT $1, id FROM roles WHERE name = $2
                "#,
            )
            .bind(user_id)
            .bind(role.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_user(user_id).await
    }

    /// Replace a user's role set
    pub async fn assign_roles(&self, user_id: Uuid, role_names: Vec<String>) -> AppResult<User> {
        let roles = parse_roles(&role_names)?;

        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.db)
            .await?;
        if !exists {
            return Err(AppError::NotFound("User".to_string()));
        }

        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for role in &roles {
            sqlx::query(
                r#"
                INSERT INTO user_roles (user_id, role_id)
                SELECT $1, id FROM roles WHERE name = $2
                "#,
            )
            .bind(user_id)
            .bind(role.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_user(user_id).await
    }

    /// Delete a user; accounts holding the admin role are protected
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        let roles = self.roles_for_user(user_id).await?;
        if roles.contains(&Role::Admin) {
            return Err(AppError::Forbidden(
                "admin accounts cannot be deleted".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }

    /// Users holding the supplier role
    pub async fn list_suppliers(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.username, u.email, u.first_name, u.last_name, u.is_active, u.created_at
            FROM users u
            JOIN user_roles ur ON ur.user_id = u.id
            JOIN roles r ON r.id = ur.role_id
            WHERE r.name = $1
            ORDER BY u.username
            "#,
        )
        .bind(Role::Fournisseur.as_str())
        .fetch_all(&self.db)
        .await?;

        let mut roles = self.roles_by_user().await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let user_roles = roles.remove(&row.id).unwrap_or_default();
                row.into_user(user_roles)
            })
            .collect())
    }

    pub async fn list_roles(&self) -> AppResult<Vec<String>> {
        let rows = sqlx::query_as::<_, (String,)>("SELECT name FROM roles ORDER BY name")
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
