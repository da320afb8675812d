//! Tests for the task service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockTaskRepository;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 9, 15, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn make_service(repo: MockTaskRepository) -> TaskService<MockTaskRepository> {
    TaskService::new(
        Arc::new(repo),
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
    )
}

fn draft(title: &str, description: &str) -> TaskDraft {
    TaskDraft::try_from_parts(Some(title.to_owned()), Some(description.to_owned()))
        .expect("valid draft")
}

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

fn task_for(owner: UserId) -> Task {
    let created = fixture_timestamp() - chrono::Duration::days(1);
    Task::create(owner, draft("Buy milk", "2L"), created)
}

#[rstest]
#[tokio::test]
async fn create_stamps_clock_and_owner(owner: UserId) {
    let mut repo = MockTaskRepository::new();
    repo.expect_insert()
        .withf(move |task: &Task| task.is_owned_by(&owner) && !task.completed())
        .times(1)
        .return_once(|_| Ok(()));

    let task = make_service(repo)
        .create(&owner, draft("Buy milk", "2L"))
        .await
        .expect("create succeeds");
    assert_eq!(task.created_at(), fixture_timestamp());
    assert_eq!(task.title(), "Buy milk");
}

#[rstest]
#[tokio::test]
async fn get_hides_foreign_tasks(owner: UserId) {
    let foreign = task_for(UserId::random());
    let task_id = *foreign.id();
    let mut repo = MockTaskRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(foreign)));

    let err = make_service(repo)
        .get(&owner, &task_id)
        .await
        .expect_err("foreign task is hidden");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "No task found..");
}

#[rstest]
#[tokio::test]
async fn get_returns_own_task(owner: UserId) {
    let own = task_for(owner);
    let task_id = *own.id();
    let mut repo = MockTaskRepository::new();
    repo.expect_find_by_id()
        .withf(move |id: &TaskId| *id == task_id)
        .return_once(move |_| Ok(Some(own)));

    let task = make_service(repo)
        .get(&owner, &task_id)
        .await
        .expect("own task");
    assert_eq!(task.id(), &task_id);
}

#[rstest]
#[tokio::test]
async fn list_delegates_to_owner_scope(owner: UserId) {
    let tasks = vec![task_for(owner), task_for(owner)];
    let mut repo = MockTaskRepository::new();
    repo.expect_list_for_owner()
        .withf(move |id: &UserId| *id == owner)
        .return_once(move |_| Ok(tasks));

    let listed = make_service(repo).list(&owner).await.expect("list");
    assert_eq!(listed.len(), 2);
}

#[rstest]
#[tokio::test]
async fn update_applies_changes_and_bumps_timestamp(owner: UserId) {
    let own = task_for(owner);
    let task_id = *own.id();
    let mut repo = MockTaskRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(own)));
    repo.expect_update()
        .withf(|task: &Task| task.title() == "Buy bread" && task.completed())
        .times(1)
        .return_once(|_| Ok(true));

    let changes = TaskChanges::new(draft("Buy bread", "1 loaf"), Some(true));
    let task = make_service(repo)
        .update(&owner, &task_id, changes)
        .await
        .expect("update succeeds");
    assert_eq!(task.updated_at(), fixture_timestamp());
    assert_eq!(task.description(), "1 loaf");
}

#[rstest]
#[case::update(true, "You can't update task of another user")]
#[case::delete(false, "You can't delete task of another user")]
#[tokio::test]
async fn mutations_on_foreign_tasks_are_forbidden(
    owner: UserId,
    #[case] is_update: bool,
    #[case] expected: &str,
) {
    let foreign = task_for(UserId::random());
    let task_id = *foreign.id();
    let mut repo = MockTaskRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(foreign)));
    repo.expect_update().never();
    repo.expect_delete().never();

    let service = make_service(repo);
    let result = if is_update {
        let changes = TaskChanges::new(draft("x", "y"), None);
        service.update(&owner, &task_id, changes).await.map(|_| ())
    } else {
        service.delete(&owner, &task_id).await
    };
    let err = result.expect_err("foreign task");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.message(), expected);
}

#[rstest]
#[case::update(true)]
#[case::delete(false)]
#[tokio::test]
async fn mutations_on_missing_tasks_are_not_found(owner: UserId, #[case] is_update: bool) {
    let mut repo = MockTaskRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));

    let service = make_service(repo);
    let task_id = TaskId::random();
    let result = if is_update {
        let changes = TaskChanges::new(draft("x", "y"), None);
        service.update(&owner, &task_id, changes).await.map(|_| ())
    } else {
        service.delete(&owner, &task_id).await
    };
    let err = result.expect_err("missing task");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Task with given id not found");
}

#[rstest]
#[tokio::test]
async fn delete_removes_own_task(owner: UserId) {
    let own = task_for(owner);
    let task_id = *own.id();
    let mut repo = MockTaskRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(own)));
    repo.expect_delete()
        .withf(move |id: &TaskId| *id == task_id)
        .times(1)
        .return_once(|_| Ok(true));

    make_service(repo)
        .delete(&owner, &task_id)
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn repository_failures_become_internal_errors(owner: UserId) {
    let mut repo = MockTaskRepository::new();
    repo.expect_list_for_owner()
        .return_once(|_| Err(TaskPersistenceError::query("relation missing")));

    let err = make_service(repo)
        .list(&owner)
        .await
        .expect_err("query failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}
