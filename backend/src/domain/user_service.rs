use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::commands::users::{
    ChangePasswordCommand, ChangePasswordResult, CreateUserCommand, CreateUserResult,
    DeleteUserResult, ListUsersCommand, ListUsersResult, UpdateUserCommand, UpdateUserResult,
};
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::User;
use crate::domain::ownership::OwnershipService;
use crate::domain::validation::{check_id_param, UserValidator, Violations};
use crate::domain::{ids, pagination, password};
use crate::storage::traits::UserStore;

/// Service for managing user records.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    validator: UserValidator,
    ownership: OwnershipService,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, ownership: OwnershipService) -> Self {
        let validator = UserValidator::new(users.clone());
        Self {
            users,
            validator,
            ownership,
        }
    }

    /// Create a new user with a freshly hashed password.
    pub async fn create_user(&self, cmd: CreateUserCommand) -> ServiceResult<CreateUserResult> {
        info!(username = ?cmd.username, "creating user");

        let violations = self.validator.validate_create(&cmd).await?;
        ServiceError::check(violations)?;

        let password_hash = password::hash_password(cmd.password.as_deref().unwrap_or_default())?;

        let now = Utc::now();
        let user = User {
            id: ids::generate_record_id(),
            name: cmd.name.unwrap_or_default().trim().to_string(),
            username: cmd.username.unwrap_or_default(),
            email: cmd.email.unwrap_or_default(),
            password_hash,
            books: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.users.insert_user(&user).await?;

        info!(user_id = %user.id, "created user");
        Ok(CreateUserResult { user })
    }

    /// Get a user by id.
    pub async fn get_user(&self, user_id: &str) -> ServiceResult<User> {
        let mut v = Violations::new();
        check_id_param(&mut v, user_id);
        ServiceError::check(v.into_vec())?;

        match self.users.get_user(user_id).await? {
            Some(user) => Ok(user),
            None => {
                warn!(user_id, "user not found");
                Err(ServiceError::NotFound("user"))
            }
        }
    }

    /// List users with free-text filtering, name sort, and pagination.
    pub async fn list_users(&self, cmd: ListUsersCommand) -> ServiceResult<ListUsersResult> {
        let users = self.users.list_users().await?;

        let page = pagination::paginate(
            users,
            &cmd.list,
            |u| vec![u.name.clone(), u.username.clone(), u.email.clone()],
            |u| u.name.clone(),
        );

        info!(total = page.total_docs, page = page.page, "listed users");
        Ok(ListUsersResult { page })
    }

    /// Edit a user's profile fields.
    pub async fn update_user(&self, cmd: UpdateUserCommand) -> ServiceResult<UpdateUserResult> {
        info!(user_id = %cmd.user_id, "updating user");

        let violations = self.validator.validate_update(&cmd).await?;
        ServiceError::check(violations)?;

        let mut user = self
            .users
            .get_user(&cmd.user_id)
            .await?
            .ok_or(ServiceError::NotFound("user"))?;

        if let Some(name) = cmd.name {
            user.name = name.trim().to_string();
        }
        if let Some(username) = cmd.username {
            user.username = username;
        }
        if let Some(email) = cmd.email {
            user.email = email;
        }
        user.updated_at = Utc::now();

        self.users.update_user(&user).await?;

        info!(user_id = %user.id, "updated user");
        Ok(UpdateUserResult { user })
    }

    /// Change a user's password after verifying the current one.
    pub async fn change_password(
        &self,
        cmd: ChangePasswordCommand,
    ) -> ServiceResult<ChangePasswordResult> {
        info!(user_id = %cmd.user_id, "changing user password");

        let violations = self.validator.validate_change_password(&cmd);
        ServiceError::check(violations)?;

        let mut user = self
            .users
            .get_user(&cmd.user_id)
            .await?
            .ok_or(ServiceError::NotFound("user"))?;

        let old_password = cmd.old_password.as_deref().unwrap_or_default();
        if !password::verify_password(old_password, &user.password_hash)? {
            warn!(user_id = %user.id, "old password mismatch");
            return Err(ServiceError::OldPasswordMismatch);
        }

        user.password_hash =
            password::hash_password(cmd.password.as_deref().unwrap_or_default())?;
        user.updated_at = Utc::now();

        self.users.update_user(&user).await?;

        info!(user_id = %user.id, "updated user password");
        Ok(ChangePasswordResult { user })
    }

    /// Delete a user and orphan every book they owned.
    pub async fn delete_user(&self, user_id: &str) -> ServiceResult<DeleteUserResult> {
        info!(user_id, "deleting user");

        let mut v = Violations::new();
        check_id_param(&mut v, user_id);
        ServiceError::check(v.into_vec())?;

        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or(ServiceError::NotFound("user"))?;

        self.users.delete_user(user_id).await?;
        self.ownership.release_owned_books(&user).await?;

        info!(user_id, books = user.books.len(), "deleted user");
        Ok(DeleteUserResult { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::ListCommand;
    use crate::domain::models::Book;
    use crate::storage::sqlite::{BookRepository, DbConnection, UserRepository};
    use crate::storage::traits::BookStore;

    struct Fixture {
        service: UserService,
        books: Arc<dyn BookStore>,
    }

    async fn setup_test() -> Fixture {
        let db = DbConnection::init_test()
            .await
            .expect("failed to create test database");
        let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(db.clone()));
        let books: Arc<dyn BookStore> = Arc::new(BookRepository::new(db));
        let ownership = OwnershipService::new(users.clone(), books.clone());
        Fixture {
            service: UserService::new(users, ownership),
            books,
        }
    }

    fn ann() -> CreateUserCommand {
        CreateUserCommand {
            name: Some("Ann".to_string()),
            username: Some("ann1".to_string()),
            email: Some("ann@x.io".to_string()),
            password: Some("Passw0rd".to_string()),
            confirm_password: Some("Passw0rd".to_string()),
        }
    }

    #[tokio::test]
    async fn create_then_fetch_round_trips() {
        let fixture = setup_test().await;
        let created = fixture.service.create_user(ann()).await.unwrap().user;

        assert_eq!(created.name, "Ann");
        assert!(created.books.is_empty());
        assert!(crate::domain::ids::is_record_id(&created.id));

        let fetched = fixture.service.get_user(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn password_is_stored_hashed() {
        let fixture = setup_test().await;
        let created = fixture.service.create_user(ann()).await.unwrap().user;

        assert_ne!(created.password_hash, "Passw0rd");
        assert!(password::verify_password("Passw0rd", &created.password_hash).unwrap());
    }

    #[tokio::test]
    async fn duplicate_username_fails_validation() {
        let fixture = setup_test().await;
        fixture.service.create_user(ann()).await.unwrap();

        let mut cmd = ann();
        cmd.email = Some("other@x.io".to_string());
        match fixture.service.create_user(cmd).await {
            Err(ServiceError::Invalid(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].msg, "username already used");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_with_unknown_id_is_soft_not_found() {
        let fixture = setup_test().await;
        match fixture.service.get_user("aaaaaaaaaaaaaaaaaaaaaaa9").await {
            Err(ServiceError::NotFound(entity)) => assert_eq!(entity, "user"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_with_malformed_id_is_invalid() {
        let fixture = setup_test().await;
        match fixture.service.get_user("nope").await {
            Err(ServiceError::Invalid(errors)) => assert_eq!(errors[0].msg, "id is not valid"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_keeps_own_unique_fields() {
        let fixture = setup_test().await;
        let created = fixture.service.create_user(ann()).await.unwrap().user;

        let updated = fixture
            .service
            .update_user(UpdateUserCommand {
                user_id: created.id.clone(),
                name: Some("Ann Renamed".to_string()),
                username: Some("ann1".to_string()),
                email: Some("ann@x.io".to_string()),
            })
            .await
            .unwrap()
            .user;

        assert_eq!(updated.name, "Ann Renamed");
        assert_eq!(updated.username, "ann1");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let fixture = setup_test().await;
        let result = fixture
            .service
            .update_user(UpdateUserCommand {
                user_id: "aaaaaaaaaaaaaaaaaaaaaaa9".to_string(),
                name: Some("Ghost".to_string()),
                username: Some("ghost".to_string()),
                email: Some("ghost@x.io".to_string()),
            })
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound("user"))));
    }

    #[tokio::test]
    async fn change_password_verifies_the_old_one() {
        let fixture = setup_test().await;
        let created = fixture.service.create_user(ann()).await.unwrap().user;

        let wrong = fixture
            .service
            .change_password(ChangePasswordCommand {
                user_id: created.id.clone(),
                old_password: Some("WrongOld1".to_string()),
                password: Some("NewPassw0rd".to_string()),
                confirm_password: Some("NewPassw0rd".to_string()),
            })
            .await;
        assert!(matches!(wrong, Err(ServiceError::OldPasswordMismatch)));

        let changed = fixture
            .service
            .change_password(ChangePasswordCommand {
                user_id: created.id.clone(),
                old_password: Some("Passw0rd".to_string()),
                password: Some("NewPassw0rd".to_string()),
                confirm_password: Some("NewPassw0rd".to_string()),
            })
            .await
            .unwrap()
            .user;

        assert!(password::verify_password("NewPassw0rd", &changed.password_hash).unwrap());
        assert!(!password::verify_password("Passw0rd", &changed.password_hash).unwrap());
    }

    #[tokio::test]
    async fn delete_orphans_owned_books() {
        let fixture = setup_test().await;
        let created = fixture.service.create_user(ann()).await.unwrap().user;

        // Give Ann two books, wired on both sides.
        let now = Utc::now();
        for book_id in ["bbbbbbbbbbbbbbbbbbbbbbb1", "bbbbbbbbbbbbbbbbbbbbbbb2"] {
            fixture
                .books
                .insert_book(&Book {
                    id: book_id.to_string(),
                    title: format!("Book {book_id}"),
                    slug: format!("book-{book_id}"),
                    year: 2015,
                    author: Some(created.id.clone()),
                    created_at: now,
                    updated_at: now,
                })
                .await
                .unwrap();
        }
        let mut owner = created.clone();
        owner.books = vec![
            "bbbbbbbbbbbbbbbbbbbbbbb1".to_string(),
            "bbbbbbbbbbbbbbbbbbbbbbb2".to_string(),
        ];
        fixture.service.users.update_user(&owner).await.unwrap();

        let deleted = fixture.service.delete_user(&created.id).await.unwrap().user;
        assert_eq!(deleted.books.len(), 2);

        // The user is gone, the books are orphaned but alive.
        assert!(matches!(
            fixture.service.get_user(&created.id).await,
            Err(ServiceError::NotFound("user"))
        ));
        for book_id in ["bbbbbbbbbbbbbbbbbbbbbbb1", "bbbbbbbbbbbbbbbbbbbbbbb2"] {
            let book = fixture.books.get_book(book_id).await.unwrap().unwrap();
            assert!(book.author.is_none());
        }
    }

    #[tokio::test]
    async fn list_filters_sorts_and_pages() {
        let fixture = setup_test().await;
        for (name, username, email) in [
            ("Charlie", "charlie1", "charlie@x.io"),
            ("Ann", "ann1", "ann@x.io"),
            ("Bob", "bob1", "bob@x.io"),
        ] {
            fixture
                .service
                .create_user(CreateUserCommand {
                    name: Some(name.to_string()),
                    username: Some(username.to_string()),
                    email: Some(email.to_string()),
                    password: Some("Passw0rd".to_string()),
                    confirm_password: Some("Passw0rd".to_string()),
                })
                .await
                .unwrap();
        }

        let result = fixture
            .service
            .list_users(ListUsersCommand::default())
            .await
            .unwrap();
        let names: Vec<&str> = result.page.docs.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob", "Charlie"]);

        let result = fixture
            .service
            .list_users(ListUsersCommand {
                list: ListCommand {
                    query: Some("bob@".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(result.page.total_docs, 1);
        assert_eq!(result.page.docs[0].name, "Bob");
    }
}
