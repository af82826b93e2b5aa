//! Database-backed tests for the catalog schema and the landing page.
//!
//! Each test gets a fresh database with the migrations applied.
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use chrono::{Duration, Local};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use library_catalog::{
    api,
    config::AppConfig,
    models::{
        author::AuthorRequest,
        book::BookRequest,
        enums::LoanStatus,
        genre::GenreRequest,
        instance::{CreateInstance, UpdateInstance},
        review::CreateReview,
        user::CreateUser,
    },
    repository::Repository,
    services::Services,
    AppError, AppState,
};

async fn seed_author(services: &Services, first: &str, last: &str) -> i32 {
    services
        .catalog
        .create_author(&AuthorRequest {
            first_name: first.into(),
            last_name: last.into(),
            bio: String::new(),
        })
        .await
        .expect("Failed to create author")
        .id
}

async fn seed_book(services: &Services, author_id: i32, title: &str, genre_ids: Vec<i32>) -> i32 {
    services
        .catalog
        .create_book(&BookRequest {
            title: title.into(),
            author_id,
            cover: None,
            summary: String::new(),
            genre_ids: Some(genre_ids),
        })
        .await
        .expect("Failed to create book")
        .id
}

async fn seed_genre(services: &Services, name: &str) -> i32 {
    services
        .catalog
        .create_genre(&GenreRequest { name: name.into() })
        .await
        .expect("Failed to create genre")
        .id
}

async fn seed_user(services: &Services, username: &str) -> i32 {
    services
        .users
        .create(&CreateUser {
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: None,
        })
        .await
        .expect("Failed to create user")
        .id
}

async fn seed_instance(services: &Services, book_id: i32, status: LoanStatus) -> i32 {
    services
        .instances
        .create(&CreateInstance {
            book_id,
            due_back: None,
            status,
            reader_id: None,
        })
        .await
        .expect("Failed to create instance")
        .id
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_genres_listed_alphabetically(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    for name in ["Poetry", "Drama", "Mystery"] {
        seed_genre(&services, name).await;
    }

    let names: Vec<String> = services
        .catalog
        .list_genres()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names, ["Drama", "Mystery", "Poetry"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_authors_ordered_by_last_then_first_name(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    seed_author(&services, "Zadie", "Smith").await;
    seed_author(&services, "Ali", "Smith").await;
    seed_author(&services, "Chinua", "Achebe").await;

    let names: Vec<String> = services
        .catalog
        .list_authors()
        .await
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(names, ["Chinua Achebe", "Ali Smith", "Zadie Smith"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_author_display_books_shows_first_three_titles(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let author_id = seed_author(&services, "Italo", "Calvino").await;
    for title in ["The Baron in the Trees", "Invisible Cities", "Cosmicomics", "Mr. Palomar"] {
        seed_book(&services, author_id, title, vec![]).await;
    }

    let details = services.catalog.get_author(author_id).await.unwrap();
    assert_eq!(details.books.len(), 4);
    assert_eq!(
        details.display_books,
        "Cosmicomics, Invisible Cities, Mr. Palomar"
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_book_details_render_author_and_genres(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let author_id = seed_author(&services, "Mary", "Shelley").await;
    let horror = seed_genre(&services, "Horror").await;
    let gothic = seed_genre(&services, "Gothic").await;
    let book_id =
        seed_book(&services, author_id, "Frankenstein", vec![horror, gothic, horror]).await;

    let book = services.catalog.get_book(book_id).await.unwrap();
    assert_eq!(book.to_string(), "Mary Shelley - Frankenstein");
    assert_eq!(book.display_genre, "Gothic, Horror");
    assert_eq!(book.url, format!("/api/v1/books/{}", book_id));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_book_with_unknown_genre_is_rejected(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let author_id = seed_author(&services, "Mary", "Shelley").await;

    let result = services
        .catalog
        .create_book(&BookRequest {
            title: "The Last Man".into(),
            author_id,
            cover: None,
            summary: String::new(),
            genre_ids: Some(vec![999]),
        })
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(services.catalog.list_books().await.unwrap().len(), 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_deleting_book_removes_reviews_and_instances(pool: PgPool) {
    let services = Services::new(Repository::new(pool.clone()));
    let author_id = seed_author(&services, "Jane", "Austen").await;
    let book_id = seed_book(&services, author_id, "Emma", vec![]).await;
    let other_id = seed_book(&services, author_id, "Persuasion", vec![]).await;
    let reader = seed_user(&services, "reader").await;

    services
        .reviews
        .create(
            book_id,
            &CreateReview {
                reviewer_id: reader,
                content: "Witty.".into(),
            },
        )
        .await
        .unwrap();
    seed_instance(&services, book_id, LoanStatus::Available).await;
    seed_instance(&services, book_id, LoanStatus::Taken).await;
    let kept = seed_instance(&services, other_id, LoanStatus::Available).await;

    services.catalog.delete_book(book_id).await.unwrap();

    let reviews: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_reviews WHERE book_id = $1")
        .bind(book_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(reviews, 0);

    let remaining = services.instances.list(None).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_deleting_author_removes_books(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let author_id = seed_author(&services, "Jane", "Austen").await;
    let book_id = seed_book(&services, author_id, "Emma", vec![]).await;
    seed_instance(&services, book_id, LoanStatus::Available).await;

    services.catalog.delete_author(author_id).await.unwrap();

    assert!(matches!(
        services.catalog.get_book(book_id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(services.instances.list(None).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_deleting_genre_keeps_books(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let author_id = seed_author(&services, "Jane", "Austen").await;
    let romance = seed_genre(&services, "Romance").await;
    let book_id = seed_book(&services, author_id, "Emma", vec![romance]).await;

    services.catalog.delete_genre(romance).await.unwrap();

    let book = services.catalog.get_book(book_id).await.unwrap();
    assert!(book.genres.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_reviews_newest_first(pool: PgPool) {
    let services = Services::new(Repository::new(pool.clone()));
    let author_id = seed_author(&services, "Jane", "Austen").await;
    let book_id = seed_book(&services, author_id, "Emma", vec![]).await;
    let reader = seed_user(&services, "reader").await;

    let first = services
        .reviews
        .create(
            book_id,
            &CreateReview {
                reviewer_id: reader,
                content: "First".into(),
            },
        )
        .await
        .unwrap();
    let second = services
        .reviews
        .create(
            book_id,
            &CreateReview {
                reviewer_id: reader,
                content: "Second".into(),
            },
        )
        .await
        .unwrap();

    // Back-to-back inserts may share a timestamp
    sqlx::query("UPDATE book_reviews SET created_at = created_at - INTERVAL '1 hour' WHERE id = $1")
        .bind(first.id)
        .execute(&pool)
        .await
        .unwrap();

    let reviews = services.reviews.list_for_book(book_id).await.unwrap();
    let ids: Vec<i32> = reviews.iter().map(|r| r.id).collect();
    assert_eq!(ids, [second.id, first.id]);
    assert_eq!(reviews[0].to_string(), "Jane Austen - Emma review by reader");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_instance_gets_unique_id_that_survives_updates(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let author_id = seed_author(&services, "Jane", "Austen").await;
    let book_id = seed_book(&services, author_id, "Emma", vec![]).await;
    let reader = seed_user(&services, "reader").await;

    let a_id = seed_instance(&services, book_id, LoanStatus::Available).await;
    let b_id = seed_instance(&services, book_id, LoanStatus::Available).await;
    let a = services.instances.get(a_id).await.unwrap();
    let b = services.instances.get(b_id).await.unwrap();
    assert_ne!(a.unique_id, b.unique_id);

    let yesterday = Local::now().date_naive() - Duration::days(1);
    let updated = services
        .instances
        .update(
            a.id,
            &UpdateInstance {
                due_back: Some(yesterday),
                status: LoanStatus::Taken,
                reader_id: Some(reader),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.unique_id, a.unique_id);
    assert!(updated.is_overdue);
    assert_eq!(
        updated.reader.as_ref().map(|r| r.username.as_str()),
        Some("reader")
    );
    assert!(updated.to_string().starts_with(&format!("UUID:{}, ", a.unique_id)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_instances_ordered_by_due_back(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let author_id = seed_author(&services, "Jane", "Austen").await;
    let book_id = seed_book(&services, author_id, "Emma", vec![]).await;
    let today = Local::now().date_naive();

    let mut expected = Vec::new();
    for offset in [10, 3] {
        let instance = services
            .instances
            .create(&CreateInstance {
                book_id,
                due_back: Some(today + Duration::days(offset)),
                status: LoanStatus::Taken,
                reader_id: None,
            })
            .await
            .unwrap();
        expected.push((offset, instance.id));
    }
    let undated = seed_instance(&services, book_id, LoanStatus::Available).await;

    let ids: Vec<i32> = services
        .instances
        .list(Some(book_id))
        .await
        .unwrap()
        .iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, [expected[1].1, expected[0].1, undated]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_status_outside_range_rejected_by_schema(pool: PgPool) {
    let services = Services::new(Repository::new(pool.clone()));
    let author_id = seed_author(&services, "Jane", "Austen").await;
    let book_id = seed_book(&services, author_id, "Emma", vec![]).await;

    let result = sqlx::query(
        "INSERT INTO book_instances (unique_id, book_id, status) VALUES (gen_random_uuid(), $1, 7)",
    )
    .bind(book_id)
    .execute(&pool)
    .await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_duplicate_username_is_conflict(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    seed_user(&services, "reader").await;

    let result = services
        .users
        .create(&CreateUser {
            username: "reader".into(),
            first_name: String::new(),
            last_name: String::new(),
            email: None,
        })
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_index_summary_counts(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let author_id = seed_author(&services, "Jane", "Austen").await;
    seed_author(&services, "Anne", "Bronte").await;
    seed_genre(&services, "Romance").await;
    seed_genre(&services, "Classic").await;
    let book_id = seed_book(&services, author_id, "Emma", vec![]).await;
    seed_book(&services, author_id, "Persuasion", vec![]).await;
    seed_instance(&services, book_id, LoanStatus::Available).await;
    seed_instance(&services, book_id, LoanStatus::Available).await;
    seed_instance(&services, book_id, LoanStatus::Reserved).await;
    seed_instance(&services, book_id, LoanStatus::Unavailable).await;

    let summary = services.stats.index_summary().await.unwrap();
    assert_eq!(summary.num_books, 2);
    assert_eq!(summary.num_instances, 4);
    assert_eq!(summary.num_available, 2);
    assert_eq!(summary.num_authors, 2);
    let genres: Vec<&str> = summary.genres.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(genres, ["Classic", "Romance"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_index_page_renders_counts(pool: PgPool) {
    let state = AppState::new(AppConfig::default(), pool).unwrap();
    let services = state.services.clone();
    let author_id = seed_author(&services, "Jane", "Austen").await;
    seed_genre(&services, "Romance").await;
    let book_id = seed_book(&services, author_id, "Emma", vec![]).await;
    seed_instance(&services, book_id, LoanStatus::Available).await;
    seed_instance(&services, book_id, LoanStatus::Taken).await;

    let response = api::router(state)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#"<strong id="num-books">1</strong>"#));
    assert!(html.contains(r#"<strong id="num-instances">2</strong>"#));
    assert!(html.contains(r#"<strong id="num-available">1</strong>"#));
    assert!(html.contains(r#"<strong id="num-authors">1</strong>"#));
    assert!(html.contains("<li>Romance</li>"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_api_round_trip_and_errors(pool: PgPool) {
    let app = api::router(AppState::new(AppConfig::default(), pool).unwrap());

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/v1/authors")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"first_name": "Jane", "last_name": "Austen"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let author: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(author["bio"], "");

    let response = app
        .clone()
        .oneshot(Request::get("/api/v1/books/4242").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "NoSuchRecord");

    let response = app
        .oneshot(
            Request::post("/api/v1/genres")
                .header("content-type", "application/json")
                .body(Body::from(json!({"name": ""}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_deleting_user_removes_their_reviews_and_held_copies(pool: PgPool) {
    let services = Services::new(Repository::new(pool.clone()));
    let author_id = seed_author(&services, "Jane", "Austen").await;
    let book_id = seed_book(&services, author_id, "Emma", vec![]).await;
    let reader = seed_user(&services, "reader").await;
    let other = seed_user(&services, "other").await;

    for reviewer_id in [reader, other] {
        services
            .reviews
            .create(
                book_id,
                &CreateReview {
                    reviewer_id,
                    content: "Charming.".into(),
                },
            )
            .await
            .unwrap();
    }
    services
        .instances
        .create(&CreateInstance {
            book_id,
            due_back: None,
            status: LoanStatus::Taken,
            reader_id: Some(reader),
        })
        .await
        .unwrap();
    let shelved = seed_instance(&services, book_id, LoanStatus::Available).await;

    services.users.delete(reader).await.unwrap();

    let reviews: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM book_reviews WHERE reviewer_id = $1")
            .bind(reader)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(reviews, 0);
    assert_eq!(services.reviews.list_for_book(book_id).await.unwrap().len(), 1);

    let remaining = services.instances.list(Some(book_id)).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, shelved);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_book_update_keeps_or_replaces_genres(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let author_id = seed_author(&services, "Jane", "Austen").await;
    let romance = seed_genre(&services, "Romance").await;
    let book_id = seed_book(&services, author_id, "Emma", vec![romance]).await;

    let request = |genre_ids: Option<Vec<i32>>| BookRequest {
        title: "Emma".into(),
        author_id,
        cover: None,
        summary: String::new(),
        genre_ids,
    };

    let kept = services
        .catalog
        .update_book(book_id, &request(None))
        .await
        .unwrap();
    assert_eq!(kept.display_genre, "Romance");

    let cleared = services
        .catalog
        .update_book(book_id, &request(Some(vec![])))
        .await
        .unwrap();
    assert!(cleared.genres.is_empty());
    assert_eq!(cleared.display_genre, "");

    let missing = services
        .catalog
        .update_book(book_id, &request(Some(vec![romance, 999])))
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    // The failed update rolled back
    assert!(services.catalog.get_book(book_id).await.unwrap().genres.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_missing_references_on_create_are_not_found(pool: PgPool) {
    let services = Services::new(Repository::new(pool));
    let author_id = seed_author(&services, "Jane", "Austen").await;
    let book_id = seed_book(&services, author_id, "Emma", vec![]).await;
    let reader = seed_user(&services, "reader").await;

    let instance = |book_id: i32, reader_id: Option<i32>| CreateInstance {
        book_id,
        due_back: None,
        status: LoanStatus::Available,
        reader_id,
    };
    let review = |reviewer_id: i32| CreateReview {
        reviewer_id,
        content: "Lovely.".into(),
    };

    let unknown_book = services.instances.create(&instance(999, None)).await;
    assert!(matches!(unknown_book, Err(AppError::NotFound(_))));

    let unknown_reader = services.instances.create(&instance(book_id, Some(999))).await;
    assert!(matches!(unknown_reader, Err(AppError::NotFound(_))));

    let reviewed_missing_book = services.reviews.create(999, &review(reader)).await;
    assert!(matches!(reviewed_missing_book, Err(AppError::NotFound(_))));

    let unknown_reviewer = services.reviews.create(book_id, &review(999)).await;
    assert!(matches!(unknown_reviewer, Err(AppError::NotFound(_))));

    let unknown_author = services
        .catalog
        .create_book(&BookRequest {
            title: "Sanditon".into(),
            author_id: 999,
            cover: None,
            summary: String::new(),
            genre_ids: None,
        })
        .await;
    assert!(matches!(unknown_author, Err(AppError::NotFound(_))));
}
