//! Experimenter account repository.

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::entities::users;
use crate::errors::domain::DomainError;

/// Experimenter domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub sub: String,
    pub email: String,
    pub username: Option<String>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<User>, DomainError> {
    Ok(users_adapter::find_by_id(conn, id).await?.map(User::from))
}

pub async fn find_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<User>, DomainError> {
    Ok(users_adapter::find_by_sub(conn, sub).await?.map(User::from))
}

/// Raw row, so a repeat login can be touched without a second lookup.
pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, DomainError> {
    Ok(users_adapter::find_by_email(conn, email).await?)
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
    email: &str,
    username: Option<String>,
) -> Result<User, DomainError> {
    let dto = users_adapter::UserCreate {
        sub: sub.to_string(),
        email: email.to_string(),
        username,
    };
    Ok(users_adapter::create_user(conn, dto).await?.into())
}

/// Record a repeat login.
pub async fn touch<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    model: users::Model,
) -> Result<User, DomainError> {
    Ok(users_adapter::touch(conn, model).await?.into())
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            sub: model.sub,
            email: model.email,
            username: model.username,
        }
    }
}
