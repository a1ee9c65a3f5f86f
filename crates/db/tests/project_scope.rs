//! Integration tests for organization-scoped project, user and tag storage.

use sqlx::PgPool;
use adscript_db::models::organization::CreateOrganization;
use adscript_db::models::project::{CreateProject, ProjectListParams, UpdateProject};
use adscript_db::models::tag::CreateTag;
use adscript_db::models::user::UpsertProfile;
use adscript_db::repositories::{OrganizationRepo, ProjectRepo, TagRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_owner(pool: &PgPool, user_id: i64, org_name: &str) -> i64 {
    UserRepo::upsert_profile(
        pool,
        user_id,
        &UpsertProfile {
            email: format!("user{user_id}@example.com"),
            full_name: None,
        },
    )
    .await
    .unwrap();
    let org = OrganizationRepo::create_with_owner(
        pool,
        &CreateOrganization {
            name: org_name.to_string(),
        },
        user_id,
    )
    .await
    .unwrap();
    org.id
}

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
        status: None,
        assigned_to: None,
    }
}

// ---------------------------------------------------------------------------
// Organizations and users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_organization_makes_owner_admin(pool: PgPool) {
    let org_id = seed_owner(&pool, 10, "Acme").await;

    let owner = UserRepo::find_by_id(&pool, 10).await.unwrap().unwrap();
    assert_eq!(owner.organization_id, Some(org_id));
    assert_eq!(owner.role, "admin");

    let members = UserRepo::list_by_organization(&pool, org_id).await.unwrap();
    assert_eq!(members.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_organization_for_unknown_user_rolls_back(pool: PgPool) {
    let result = OrganizationRepo::create_with_owner(
        &pool,
        &CreateOrganization {
            name: "Ghost".to_string(),
        },
        999,
    )
    .await;
    assert!(matches!(result, Err(sqlx::Error::RowNotFound)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM organizations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_profile_keeps_membership(pool: PgPool) {
    let org_id = seed_owner(&pool, 11, "Acme").await;

    let updated = UserRepo::upsert_profile(
        &pool,
        11,
        &UpsertProfile {
            email: "new@example.com".to_string(),
            full_name: Some("山田 太郎".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.email, "new@example.com");
    assert_eq!(updated.organization_id, Some(org_id));
    assert_eq!(updated.role, "admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_remove_member_only_within_organization(pool: PgPool) {
    let org_a = seed_owner(&pool, 1, "A").await;
    let org_b = seed_owner(&pool, 2, "B").await;

    assert!(!UserRepo::remove_from_organization(&pool, org_a, 2).await.unwrap());
    assert!(UserRepo::remove_from_organization(&pool, org_b, 2).await.unwrap());

    let user = UserRepo::find_by_id(&pool, 2).await.unwrap().unwrap();
    assert_eq!(user.organization_id, None);
    assert_eq!(user.role, "member");
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_defaults(pool: PgPool) {
    let org_id = seed_owner(&pool, 1, "Acme").await;
    let project = ProjectRepo::create(&pool, org_id, 1, &new_project("美容サプリ広告"))
        .await
        .unwrap();

    assert_eq!(project.stage, 1);
    assert_eq!(project.status, "未着手");
    assert_eq!(project.created_by, Some(1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_invisible_to_other_organization(pool: PgPool) {
    let org_a = seed_owner(&pool, 1, "A").await;
    let org_b = seed_owner(&pool, 2, "B").await;
    let project = ProjectRepo::create(&pool, org_a, 1, &new_project("P")).await.unwrap();

    assert!(ProjectRepo::find_by_id(&pool, org_b, project.id).await.unwrap().is_none());
    assert!(ProjectRepo::update(&pool, org_b, project.id, &UpdateProject::default())
        .await
        .unwrap()
        .is_none());
    assert!(!ProjectRepo::soft_delete(&pool, org_b, project.id).await.unwrap());
    assert!(ProjectRepo::list(&pool, org_b, &ProjectListParams::default())
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_status_and_stage(pool: PgPool) {
    let org_id = seed_owner(&pool, 1, "Acme").await;
    let first = ProjectRepo::create(&pool, org_id, 1, &new_project("one")).await.unwrap();
    let second = ProjectRepo::create(
        &pool,
        org_id,
        1,
        &CreateProject {
            status: Some("進行中".to_string()),
            ..new_project("two")
        },
    )
    .await
    .unwrap();
    ProjectRepo::advance_stage(&pool, first.id, 3).await.unwrap();

    let by_status = ProjectRepo::list(
        &pool,
        org_id,
        &ProjectListParams {
            status: Some("進行中".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].id, second.id);

    let by_stage = ProjectRepo::list(
        &pool,
        org_id,
        &ProjectListParams {
            stage: Some(3),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_stage.len(), 1);
    assert_eq!(by_stage[0].id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_advance_stage_never_goes_backwards(pool: PgPool) {
    let org_id = seed_owner(&pool, 1, "Acme").await;
    let project = ProjectRepo::create(&pool, org_id, 1, &new_project("P")).await.unwrap();

    let advanced = ProjectRepo::advance_stage(&pool, project.id, 4).await.unwrap().unwrap();
    assert_eq!(advanced.stage, 4);

    let again = ProjectRepo::advance_stage(&pool, project.id, 2).await.unwrap().unwrap();
    assert_eq!(again.stage, 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_project_is_hidden(pool: PgPool) {
    let org_id = seed_owner(&pool, 1, "Acme").await;
    let project = ProjectRepo::create(&pool, org_id, 1, &new_project("P")).await.unwrap();

    assert!(ProjectRepo::soft_delete(&pool, org_id, project.id).await.unwrap());
    assert!(ProjectRepo::find_by_id(&pool, org_id, project.id).await.unwrap().is_none());
    assert!(!ProjectRepo::soft_delete(&pool, org_id, project.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_tag_name_violates_unique_constraint(pool: PgPool) {
    let org_id = seed_owner(&pool, 1, "Acme").await;
    let input = CreateTag {
        name: "美容".to_string(),
        color: Some("#FF5733".to_string()),
    };
    TagRepo::create(&pool, org_id, &input).await.unwrap();

    let err = TagRepo::create(&pool, org_id, &input).await.unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.constraint(), Some("uq_tags_organization_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_project_tags_skips_foreign_tags(pool: PgPool) {
    let org_a = seed_owner(&pool, 1, "A").await;
    let org_b = seed_owner(&pool, 2, "B").await;
    let project = ProjectRepo::create(&pool, org_a, 1, &new_project("P")).await.unwrap();

    let own = TagRepo::create(&pool, org_a, &CreateTag { name: "own".into(), color: None })
        .await
        .unwrap();
    let foreign = TagRepo::create(&pool, org_b, &CreateTag { name: "foreign".into(), color: None })
        .await
        .unwrap();

    let tags = TagRepo::replace_for_project(&pool, org_a, project.id, &[own.id, foreign.id])
        .await
        .unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id, own.id);

    let cleared = TagRepo::replace_for_project(&pool, org_a, project.id, &[]).await.unwrap();
    assert!(cleared.is_empty());
}
