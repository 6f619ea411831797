use crate::constants::{SQL_INSERT_USER, SQL_SELECT_USER_BY_ID};
use crate::core::errors::UsersError;
use crate::core::models::PublicUser;
use crate::core::services::UserService;
use crate::infrastructure::storage::UserStore;
use crate::tests::{FailOn, FailingStore, create_test_service, user_input};

#[tokio::test]
async fn test_create_user() {
    let service = create_test_service();
    let user = service
        .create_user(user_input("a@b.co", "longenough", "Ann"))
        .await
        .unwrap();
    assert_eq!(
        user,
        PublicUser {
            id: 1,
            email: "a@b.co".to_string(),
            name: "Ann".to_string(),
        }
    );

    let stored = service.list_users().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].password, "longenough");
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let service = create_test_service();
    service
        .create_user(user_input("a@b.co", "longenough", "Ann"))
        .await
        .unwrap();

    let result = service
        .create_user(user_input("a@b.co", "otherpass", "Annette"))
        .await;
    assert!(matches!(result, Err(UsersError::EmailAlreadyExists)));
    assert_eq!(service.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_store() {
    let service = UserService::new(FailingStore::new(FailOn::List));

    let result = service.create_user(user_input("nope", "short", "A")).await;
    match result {
        Err(UsersError::Validation(errors)) => assert_eq!(errors.len(), 3),
        other => panic!("expected validation error, got {:?}", other.map(|u| u.id)),
    }
    let result = service.update_user(1, user_input("a@b.co", "short", "Ann")).await;
    assert!(matches!(result, Err(UsersError::Validation(ref errors)) if errors.len() == 1));

    assert_eq!(service.storage().write_count(), 0);
}

#[tokio::test]
async fn test_update_user() {
    let service = create_test_service();
    let created = service
        .create_user(user_input("a@b.co", "longenough", "Ann"))
        .await
        .unwrap();

    let updated = service
        .update_user(created.id, user_input("ann@b.co", "longenough2", "Annie"))
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.email, "ann@b.co");
    assert_eq!(updated.name, "Annie");

    let stored = service.storage().find_user(created.id).await.unwrap().unwrap();
    assert_eq!(stored.password, "longenough2");

    // The old email is free again
    service
        .create_user(user_input("a@b.co", "longenough", "Another Ann"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let service = create_test_service();
    let result = service
        .update_user(7, user_input("a@b.co", "longenough", "Ann"))
        .await;
    assert!(matches!(result, Err(UsersError::UserNotFound(7))));
    assert!(service.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_to_taken_email_conflicts() {
    let service = create_test_service();
    service
        .create_user(user_input("a@b.co", "longenough", "Ann"))
        .await
        .unwrap();
    let bob = service
        .create_user(user_input("bob@b.co", "longenough", "Bob"))
        .await
        .unwrap();

    let result = service
        .update_user(bob.id, user_input("a@b.co", "longenough", "Bob"))
        .await;
    assert!(matches!(result, Err(UsersError::EmailAlreadyExists)));
}

#[tokio::test]
async fn test_write_failure_surfaces_statement() {
    let service = UserService::new(FailingStore::new(FailOn::Write));
    let result = service
        .create_user(user_input("a@b.co", "longenough", "Ann"))
        .await;
    match result {
        Err(UsersError::Store(err)) => {
            assert_eq!(err.message, "database is locked");
            assert_eq!(err.sql, SQL_INSERT_USER);
        }
        other => panic!("expected store error, got {:?}", other.map(|u| u.id)),
    }
}

#[tokio::test]
async fn test_refetch_failure_keeps_written_row() {
    let service = UserService::new(FailingStore::new(FailOn::Refetch));
    let result = service
        .create_user(user_input("a@b.co", "longenough", "Ann"))
        .await;
    assert!(matches!(result, Err(UsersError::Store(ref err)) if err.sql == SQL_SELECT_USER_BY_ID));

    // No transaction: the insert is still visible
    assert_eq!(service.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_row_after_insert_is_store_error() {
    let service = UserService::new(FailingStore::new(FailOn::MissingRow));
    let result = service
        .create_user(user_input("a@b.co", "longenough", "Ann"))
        .await;
    match result {
        Err(UsersError::Store(err)) => {
            assert_eq!(err.message, "User 1 missing after insert");
            assert_eq!(err.sql, SQL_SELECT_USER_BY_ID);
        }
        other => panic!("expected store error, got {:?}", other.map(|u| u.id)),
    }
}
