//! Catalog management service: genres, authors and books

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorDetails, AuthorRequest},
        book::{Book, BookDetails, BookRequest, BookSummary},
        genre::{Genre, GenreRequest},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // =========================================================================
    // GENRES
    // =========================================================================

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create_genre(&self, data: &GenreRequest) -> AppResult<Genre> {
        data.validate()?;
        let genre = self.repository.genres.create(data).await?;
        tracing::info!(genre_id = genre.id, "Created genre {}", genre);
        Ok(genre)
    }

    pub async fn update_genre(&self, id: i32, data: &GenreRequest) -> AppResult<Genre> {
        data.validate()?;
        self.repository.genres.update(id, data).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await?;
        tracing::info!(genre_id = id, "Deleted genre");
        Ok(())
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Author with their books and the short book listing
    pub async fn get_author(&self, id: i32) -> AppResult<AuthorDetails> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.books.list_by_author(id).await?;
        Ok(AuthorDetails::new(author, books))
    }

    pub async fn create_author(&self, data: &AuthorRequest) -> AppResult<Author> {
        data.validate()?;
        let author = self.repository.authors.create(data).await?;
        tracing::info!(author_id = author.id, "Created author {}", author);
        Ok(author)
    }

    pub async fn update_author(&self, id: i32, data: &AuthorRequest) -> AppResult<Author> {
        data.validate()?;
        self.repository.authors.update(id, data).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!(author_id = id, "Deleted author and their books");
        Ok(())
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    pub async fn list_books(&self) -> AppResult<Vec<BookSummary>> {
        self.repository.books.list().await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.repository.books.get_by_id(id).await?;
        self.book_details(book).await
    }

    pub async fn create_book(&self, data: &BookRequest) -> AppResult<BookDetails> {
        data.validate()?;
        let book = self.repository.books.create(data).await?;
        tracing::info!(book_id = book.id, author_id = book.author_id, "Created book");
        self.book_details(book).await
    }

    pub async fn update_book(&self, id: i32, data: &BookRequest) -> AppResult<BookDetails> {
        data.validate()?;
        let book = self.repository.books.update(id, data).await?;
        self.book_details(book).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "Deleted book with its reviews and copies");
        Ok(())
    }

    async fn book_details(&self, book: Book) -> AppResult<BookDetails> {
        let author = self.repository.authors.get_by_id(book.author_id).await?;
        let genres = self.repository.genres.list_for_book(book.id).await?;
        Ok(BookDetails::new(book, author, genres))
    }
}
