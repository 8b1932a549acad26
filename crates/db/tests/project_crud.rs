//! Integration tests for the project repository.
//!
//! Exercises the repository layer against a real database: insert/read
//! round trips, display ordering, full-field updates, and deletes.

use folio_core::asset::AssetRef;
use folio_db::models::project::{ProjectFields, ProjectStatus};
use folio_db::repositories::ProjectRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn asset(id: &str) -> AssetRef {
    AssetRef::new(format!("https://cdn.example/{id}.jpg"), id)
}

fn new_fields(title: &str) -> ProjectFields {
    ProjectFields {
        title: title.to_string(),
        category: "residential".to_string(),
        location: "Utrecht".to_string(),
        year: "2024".to_string(),
        area: "75 m2".to_string(),
        description: "Kitchen and living room refit.".to_string(),
        tags: vec!["interior".to_string(), "kitchen".to_string()],
        status: ProjectStatus::Draft,
        featured: false,
        before_image: Some(asset(&format!("{title}-before"))),
        after_image: Some(asset(&format!("{title}-after"))),
        gallery: vec![asset(&format!("{title}-g1")), asset(&format!("{title}-g2"))],
    }
}

// ---------------------------------------------------------------------------
// CRUD round trips
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_find_round_trip(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &new_fields("alpha"), 0)
        .await
        .unwrap();
    assert_eq!(created.title, "alpha");
    assert_eq!(created.sort_order, 0);
    assert_eq!(created.status, ProjectStatus::Draft);
    assert_eq!(created.gallery.len(), 2);
    assert_eq!(created.before_image, Some(asset("alpha-before")));

    let found = ProjectRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.tags, vec!["interior", "kitchen"]);
    assert_eq!(found.gallery, created.gallery);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_missing_returns_none(pool: PgPool) {
    assert!(ProjectRepo::find_by_id(&pool, 999_999)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_full_field_set(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &new_fields("beta"), 0)
        .await
        .unwrap();

    let mut fields = new_fields("beta renamed");
    fields.status = ProjectStatus::Published;
    fields.before_image = None;
    let updated = ProjectRepo::update(&pool, created.id, &fields)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "beta renamed");
    assert_eq!(updated.status, ProjectStatus::Published);
    assert_eq!(updated.before_image, None);
    // Display order is not part of the mutable field set.
    assert_eq!(updated.sort_order, created.sort_order);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_returns_none(pool: PgPool) {
    let result = ProjectRepo::update(&pool, 999_999, &new_fields("ghost"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_row_and_reports_absence(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &new_fields("gamma"), 0)
        .await
        .unwrap();

    assert!(ProjectRepo::delete(&pool, created.id).await.unwrap());
    assert!(ProjectRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
    // Second delete reports the row as already gone.
    assert!(!ProjectRepo::delete(&pool, created.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_ordered_follows_sort_order(pool: PgPool) {
    let first = ProjectRepo::create(&pool, &new_fields("first"), 2)
        .await
        .unwrap();
    let second = ProjectRepo::create(&pool, &new_fields("second"), 0)
        .await
        .unwrap();
    let third = ProjectRepo::create(&pool, &new_fields("third"), 1)
        .await
        .unwrap();

    let listed = ProjectRepo::list_ordered(&pool, None).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![second.id, third.id, first.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_sort_order_moves_row(pool: PgPool) {
    let a = ProjectRepo::create(&pool, &new_fields("a"), 0).await.unwrap();
    let b = ProjectRepo::create(&pool, &new_fields("b"), 1).await.unwrap();

    assert!(ProjectRepo::set_sort_order(&pool, a.id, 1).await.unwrap());
    assert!(ProjectRepo::set_sort_order(&pool, b.id, 0).await.unwrap());

    let listed = ProjectRepo::list_ordered(&pool, None).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);

    // A vanished row is reported, not silently skipped.
    assert!(!ProjectRepo::set_sort_order(&pool, 999_999, 5).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_ordered_filters_by_status(pool: PgPool) {
    let mut published = new_fields("published one");
    published.status = ProjectStatus::Published;
    let published = ProjectRepo::create(&pool, &published, 0).await.unwrap();
    ProjectRepo::create(&pool, &new_fields("draft one"), 1)
        .await
        .unwrap();

    let only_published = ProjectRepo::list_ordered(&pool, Some(ProjectStatus::Published))
        .await
        .unwrap();
    assert_eq!(only_published.len(), 1);
    assert_eq!(only_published[0].id, published.id);

    assert_eq!(ProjectRepo::count(&pool).await.unwrap(), 2);
}
