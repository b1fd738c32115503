use crate::data::models::user::{UpdateUser, User};
use crate::data::repos::implementors::user_repo::UserRepo;
use crate::data::repos::traits::repository::Repository;
use crate::services::errors::UserServiceError;

/// Admin-facing user management: the storefront user list and ban/unban.
pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        UserService
    }

    pub async fn get_storefront_users(&self) -> Result<Vec<User>, UserServiceError> {
        let repo = UserRepo::new();
        Ok(repo
            .get_non_admins()
            .await
            .map_err(|_| UserServiceError::DatabaseError)?
            .unwrap_or_default())
    }

    pub async fn set_user_active(
        &self,
        user_id: i32,
        is_active: bool,
    ) -> Result<(), UserServiceError> {
        let repo = UserRepo::new();

        repo.get_by_id(user_id)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?
            .ok_or(UserServiceError::UserNotFound)?;

        let update = UpdateUser {
            name: None,
            email: None,
            is_active: Some(is_active),
        };

        repo.update(user_id, update)
            .await
            .map_err(|_| UserServiceError::DatabaseError)
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}
