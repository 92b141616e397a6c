//! Tests for the user cache synchronisation service.

use std::sync::Arc;

use mockall::Sequence;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::Major;
use crate::domain::ports::{MockUserCacheSlot, MockUserDirectory};

type Service = UserCacheSync<MockUserDirectory, MockUserCacheSlot>;

fn record(value: Value) -> UserRecord {
    serde_json::from_value(value).expect("test records are JSON objects")
}

fn make_service(directory: MockUserDirectory, cache: MockUserCacheSlot) -> Service {
    UserCacheSync::new(Arc::new(directory), Arc::new(cache))
}

#[fixture]
fn catalogue() -> MajorCatalogue {
    MajorCatalogue::new(vec![Major::new(5, "CS"), Major::new(6, "Math")])
}

fn cache_holding(cached: Option<UserRecord>) -> MockUserCacheSlot {
    let mut cache = MockUserCacheSlot::new();
    let present = cached.is_some();
    cache.expect_is_present().return_const(Ok(present));
    cache.expect_read().return_const(Ok(cached));
    cache
}

#[rstest]
#[tokio::test]
async fn resolve_serves_cached_record_without_directory_call() {
    let cached = record(json!({"id": 1, "majorId": 5}));
    let mut directory = MockUserDirectory::new();
    directory.expect_current_user().times(0);

    let service = make_service(directory, cache_holding(Some(cached.clone())));
    let resolved = service.resolve_current_user().await.expect("cache hit");

    assert_eq!(resolved.source, UserSource::Cache);
    assert_eq!(resolved.record, cached);
}

#[rstest]
#[tokio::test]
async fn resolve_fetches_from_directory_without_writing_cache() {
    let fresh = record(json!({"userId": "u-1"}));
    let returned = fresh.clone();
    let mut directory = MockUserDirectory::new();
    directory
        .expect_current_user()
        .times(1)
        .return_once(move || Ok(returned));
    let mut cache = cache_holding(None);
    cache.expect_write().times(0);

    let service = make_service(directory, cache);
    let resolved = service.resolve_current_user().await.expect("directory hit");

    assert_eq!(resolved.source, UserSource::Directory);
    assert_eq!(resolved.record, fresh);
}

#[rstest]
#[case::transport(UserDirectoryError::transport("connection refused"), USER_FETCH_FAILED)]
#[case::status(UserDirectoryError::unsuccessful(401_u16), USER_FETCH_FAILED)]
#[case::decode(UserDirectoryError::decode("missing result"), USER_PAYLOAD_INVALID)]
#[tokio::test]
async fn resolve_failure_redirects_to_landing(
    #[case] failure: UserDirectoryError,
    #[case] expected_message: &str,
) {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_current_user()
        .times(1)
        .return_once(move || Err(failure));

    let service = make_service(directory, cache_holding(None));
    let error = service.resolve_current_user().await.expect_err("lookup fails");

    assert_eq!(error.code(), ErrorCode::FetchFailure);
    assert_eq!(error.message(), expected_message);
    assert!(error.redirects_to_landing());
}

#[rstest]
#[tokio::test]
async fn resolve_surfaces_cache_failures_without_redirect() {
    let mut cache = MockUserCacheSlot::new();
    cache
        .expect_is_present()
        .return_const(Err(UserCacheError::storage("permission denied")));
    let mut directory = MockUserDirectory::new();
    directory.expect_current_user().times(0);

    let service = make_service(directory, cache);
    let error = service.resolve_current_user().await.expect_err("cache fails");

    assert_eq!(error.code(), ErrorCode::CacheFailure);
    assert!(!error.redirects_to_landing());
}

#[rstest]
#[tokio::test]
async fn selection_without_major_makes_no_update_call(catalogue: MajorCatalogue) {
    let mut directory = MockUserDirectory::new();
    directory.expect_update_major().times(0);
    directory.expect_current_user().times(0);
    let mut cache = MockUserCacheSlot::new();
    cache.expect_write().times(0);

    let service = make_service(directory, cache);
    let user = record(json!({"id": 1}));
    let error = service
        .apply_major_selection(Some(&user), None, &catalogue)
        .await
        .expect_err("validation fails");

    assert_eq!(error.code(), ErrorCode::ValidationFailure);
    assert_eq!(error.message(), NO_MAJOR_SELECTED);
}

#[rstest]
#[case::no_user(None)]
#[case::no_identifier(Some(json!({"nickname": "Ada", "id": null})))]
#[tokio::test]
async fn selection_without_user_identifier_makes_no_update_call(
    catalogue: MajorCatalogue,
    #[case] user: Option<Value>,
) {
    let mut directory = MockUserDirectory::new();
    directory.expect_update_major().times(0);

    let service = make_service(directory, MockUserCacheSlot::new());
    let user = user.map(record);
    let error = service
        .apply_major_selection(user.as_ref(), Some(&Identifier::Number(5)), &catalogue)
        .await
        .expect_err("validation fails");

    assert_eq!(error.code(), ErrorCode::ValidationFailure);
    assert_eq!(error.message(), NO_USER_IDENTIFIER);
}

#[rstest]
#[case::id_wins(json!({"id": 7, "userId": "u-7", "user_id": 70}), Identifier::Number(7))]
#[case::user_id_next(json!({"userId": "u-7", "user_id": 70}), Identifier::from("u-7"))]
#[case::snake_last(json!({"user_id": 70}), Identifier::Number(70))]
#[tokio::test]
async fn selection_uses_first_present_identifier_field(
    catalogue: MajorCatalogue,
    #[case] user: Value,
    #[case] expected: Identifier,
) {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_update_major()
        .withf(move |user_id, major_id| *user_id == expected && *major_id == Identifier::Number(5))
        .times(1)
        .return_once(|_, _| Ok(None));

    let service = make_service(directory, MockUserCacheSlot::new());
    let user = record(user);
    let outcome = service
        .apply_major_selection(Some(&user), Some(&Identifier::Number(5)), &catalogue)
        .await
        .expect("selection confirmed");

    assert_eq!(outcome, CacheReconciliation::Untouched);
}

#[rstest]
#[tokio::test]
async fn refresh_is_merged_over_cached_record(catalogue: MajorCatalogue) {
    let cached = record(json!({"id": 1, "nickname": "Ada", "theme": "dark"}));
    let fresh = record(json!({"id": 1, "nickname": "Ada L.", "majorId": 5}));
    let expected = record(json!({"id": 1, "nickname": "Ada L.", "theme": "dark", "majorId": 5}));

    let mut sequence = Sequence::new();
    let mut directory = MockUserDirectory::new();
    directory
        .expect_update_major()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_, _| Ok(Some(SelectionConfirmation::new(json!({"id": 5})))));
    directory
        .expect_current_user()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(move || Ok(fresh));

    let mut cache = cache_holding(Some(cached.clone()));
    let written = expected.clone();
    cache
        .expect_write()
        .withf(move |record| *record == written)
        .times(1)
        .return_const(Ok(()));

    let service = make_service(directory, cache);
    let outcome = service
        .apply_major_selection(Some(&cached), Some(&Identifier::Number(5)), &catalogue)
        .await
        .expect("selection confirmed");

    assert_eq!(outcome, CacheReconciliation::Refreshed(expected));
}

#[rstest]
#[tokio::test]
async fn refresh_failure_patches_cached_record(catalogue: MajorCatalogue) {
    let cached = record(json!({"id": 1}));
    let confirmation = json!({"id": 5, "name": "CS"});
    let expected = record(json!({
        "id": 1,
        "userCamInfo": {"major": confirmation.clone()},
        "majorName": "CS"
    }));

    let mut directory = MockUserDirectory::new();
    directory
        .expect_update_major()
        .times(1)
        .return_once(move |_, _| Ok(Some(SelectionConfirmation::new(confirmation))));
    directory
        .expect_current_user()
        .times(1)
        .return_once(|| Err(UserDirectoryError::unsuccessful(502_u16)));

    let mut cache = cache_holding(Some(cached.clone()));
    let written = expected.clone();
    cache
        .expect_write()
        .withf(move |record| *record == written)
        .times(1)
        .return_const(Ok(()));

    let service = make_service(directory, cache);
    let outcome = service
        .apply_major_selection(Some(&cached), Some(&Identifier::Number(5)), &catalogue)
        .await
        .expect("selection confirmed");

    assert_eq!(outcome, CacheReconciliation::PartiallyMerged(expected));
}

#[rstest]
#[tokio::test]
async fn partial_update_skips_name_for_unlisted_major(catalogue: MajorCatalogue) {
    let cached = record(json!({"id": 1, "majorName": "Physics"}));

    let mut directory = MockUserDirectory::new();
    directory
        .expect_update_major()
        .return_once(|_, _| Ok(Some(SelectionConfirmation::new(json!({"id": 99})))));
    directory
        .expect_current_user()
        .return_once(|| Err(UserDirectoryError::transport("reset")));

    let mut cache = cache_holding(Some(cached.clone()));
    cache.expect_write().times(1).return_const(Ok(()));

    let service = make_service(directory, cache);
    let outcome = service
        .apply_major_selection(Some(&cached), Some(&Identifier::Number(99)), &catalogue)
        .await
        .expect("selection confirmed");

    let patched = outcome.record().expect("cache was written");
    assert_eq!(patched.current_major_id(), Some(Identifier::Number(99)));
    assert_eq!(patched.major_name(), Some("Physics"));
}

#[rstest]
#[case::server_message(UserDirectoryError::rejected("Major is closed"), "Major is closed")]
#[case::blank_server_message(UserDirectoryError::rejected("  "), MUTATION_FAILED)]
#[case::no_message(UserDirectoryError::unsuccessful(500_u16), MUTATION_FAILED)]
#[case::transport(UserDirectoryError::transport("reset"), MUTATION_FAILED)]
#[tokio::test]
async fn failed_update_leaves_cache_untouched(
    catalogue: MajorCatalogue,
    #[case] failure: UserDirectoryError,
    #[case] expected_message: &str,
) {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_update_major()
        .times(1)
        .return_once(move |_, _| Err(failure));
    directory.expect_current_user().times(0);
    let mut cache = MockUserCacheSlot::new();
    cache.expect_read().times(0);
    cache.expect_write().times(0);

    let service = make_service(directory, cache);
    let user = record(json!({"id": 1}));
    let error = service
        .apply_major_selection(Some(&user), Some(&Identifier::Number(5)), &catalogue)
        .await
        .expect_err("update fails");

    assert_eq!(error.code(), ErrorCode::MutationFailure);
    assert_eq!(error.message(), expected_message);
}

#[rstest]
#[tokio::test]
async fn empty_cache_is_neither_refreshed_nor_written(catalogue: MajorCatalogue) {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_update_major()
        .times(1)
        .return_once(|_, _| Ok(Some(SelectionConfirmation::new(json!({"id": 5})))));
    directory.expect_current_user().times(0);
    let mut cache = cache_holding(None);
    cache.expect_write().times(0);

    let service = make_service(directory, cache);
    let user = record(json!({"id": 1}));
    let error = service
        .apply_major_selection(Some(&user), Some(&Identifier::Number(5)), &catalogue)
        .await
        .expect_err("nothing cached to reconcile");

    assert_eq!(error.code(), ErrorCode::ValidationFailure);
    assert_eq!(error.message(), NO_CACHED_RECORD);
}
