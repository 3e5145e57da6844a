use chrono::Utc;

use crate::server::{model::issue::deleted_reporter, service::user::DeletionOutcome};

use super::*;

/// Tests deleting account u1, who reported 2 issues.
///
/// Expected: no profile row and both issues attributed to the deleted-user sentinel
#[tokio::test]
async fn removes_profile_and_anonymizes_issues() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_civic_tables()
        .with_user(factory::user("u1"))
        .with_user(factory::user("u2"))
        .with_issue(factory::issue("u1"))
        .with_issue(factory::issue("u1"))
        .with_issue(factory::issue("u2"))
        .build()
        .await?;
    let auth = RecordingAuthProvider::new();

    let service = UserService::new(&test.db, &auth);
    let result = service.handle_user_deleted("u1", Utc::now()).await;

    assert_eq!(
        result.unwrap(),
        DeletionOutcome {
            profile_deleted: true,
            issues_anonymized: 2
        }
    );
    assert!(test.user().get("u1").await?.is_none());
    let anonymized = test.issue().by_reporter(deleted_reporter::ID).await?;
    assert_eq!(anonymized.len(), 2);
    assert!(anonymized.iter().all(|issue| issue.reporter_name == deleted_reporter::NAME));
    assert_eq!(test.issue().by_reporter("u2").await?.len(), 1);
    assert!(test.user().get("u2").await?.is_some());

    Ok(())
}

/// Expect Ok reporting nothing removed for an account without data
#[tokio::test]
async fn tolerates_unknown_account() -> Result<(), TestError> {
    let test = TestBuilder::new().with_civic_tables().build().await?;
    let auth = RecordingAuthProvider::new();

    let service = UserService::new(&test.db, &auth);
    let result = service.handle_user_deleted("ghost", Utc::now()).await;

    assert_eq!(
        result.unwrap(),
        DeletionOutcome {
            profile_deleted: false,
            issues_anonymized: 0
        }
    );

    Ok(())
}

/// Tests that the profile delete is rolled back when anonymizing fails.
///
/// Expected: Err and the profile still present
#[tokio::test]
async fn rolls_back_when_issue_update_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::CivicUser)
        .with_user(factory::user("u1"))
        .build()
        .await?;
    let auth = RecordingAuthProvider::new();

    let service = UserService::new(&test.db, &auth);
    let result = service.handle_user_deleted("u1", Utc::now()).await;

    assert!(result.is_err());
    assert!(test.user().get("u1").await?.is_some());

    Ok(())
}
