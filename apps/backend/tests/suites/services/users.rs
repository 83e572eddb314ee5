use backend_test_support::unique_helpers::{unique_email, unique_str};
use decisions_backend::errors::ErrorCode;
use decisions_backend::repos::users as users_repo;
use decisions_backend::services::users::ensure_user;

use crate::support::test_state::build_test_state;

#[tokio::test]
async fn first_login_creates_and_repeat_login_reuses() {
    let state = build_test_state().await;
    let db = state.db().unwrap();
    let email = unique_email("pi");
    let sub = unique_str("google");

    let created = ensure_user(db, &email, Some("Ada"), &sub).await.unwrap();
    assert_eq!(created.email, email.to_lowercase());
    assert_eq!(created.username.as_deref(), Some("Ada"));

    let again = ensure_user(db, &format!("  {}  ", email.to_uppercase()), None, &sub)
        .await
        .unwrap();
    assert_eq!(again.id, created.id);

    let by_sub = users_repo::find_by_sub(db, &sub).await.unwrap().unwrap();
    assert_eq!(by_sub.id, created.id);
}

#[tokio::test]
async fn username_falls_back_to_local_part() {
    let state = build_test_state().await;
    let db = state.db().unwrap();

    let user = ensure_user(db, "grace@lab.example.org", None, "sub-grace")
        .await
        .unwrap();
    assert_eq!(user.username.as_deref(), Some("grace"));
}

#[tokio::test]
async fn different_sub_for_known_email_conflicts() {
    let state = build_test_state().await;
    let db = state.db().unwrap();

    ensure_user(db, "pi@lab.example.org", None, "sub-a").await.unwrap();
    let err = ensure_user(db, "pi@lab.example.org", None, "sub-b")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GoogleSubMismatch);
}
