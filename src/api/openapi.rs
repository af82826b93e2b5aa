//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, genres, health, instances, reviews, stats, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "1.0.0",
        description = "Books, authors, genres, reviews and loanable copies",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Stats
        stats::get_stats,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Reviews
        reviews::list_book_reviews,
        reviews::create_review,
        reviews::get_review,
        reviews::delete_review,
        // Instances
        instances::list_instances,
        instances::get_instance,
        instances::create_instance,
        instances::update_instance,
        instances::delete_instance,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::delete_user,
    ),
    components(
        schemas(
            crate::models::genre::Genre,
            crate::models::genre::GenreRequest,
            crate::models::author::Author,
            crate::models::author::AuthorDetails,
            crate::models::author::AuthorRequest,
            crate::models::book::Book,
            crate::models::book::BookSummary,
            crate::models::book::BookDetails,
            crate::models::book::BookRequest,
            crate::models::review::ReviewDetails,
            crate::models::review::CreateReview,
            crate::models::instance::InstanceDetails,
            crate::models::instance::CreateInstance,
            crate::models::instance::UpdateInstance,
            crate::models::enums::LoanStatus,
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::CreateUser,
            crate::services::stats::IndexSummary,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "stats", description = "Catalog counts"),
        (name = "genres", description = "Genres"),
        (name = "authors", description = "Authors"),
        (name = "books", description = "Books"),
        (name = "reviews", description = "Book reviews"),
        (name = "instances", description = "Physical book copies"),
        (name = "users", description = "Library users")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
