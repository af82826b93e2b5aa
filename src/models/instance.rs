//! Book instance (physical, loanable copy) model

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{book::BookSummary, enums::LoanStatus, user::UserShort, API_PREFIX};

/// Instance row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: i32,
    /// Generated once at creation, never reassigned
    pub unique_id: Uuid,
    pub book_id: i32,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub reader_id: Option<i32>,
}

impl BookInstance {
    pub fn is_overdue(&self) -> bool {
        is_overdue_on(self.due_back, today())
    }

    pub fn absolute_url(&self) -> String {
        instance_url(self.id)
    }
}

fn instance_url(id: i32) -> String {
    format!("{}/instances/{}", API_PREFIX, id)
}

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A copy is overdue when it has a due date strictly before `today`.
pub fn is_overdue_on(due_back: Option<NaiveDate>, today: NaiveDate) -> bool {
    matches!(due_back, Some(due) if due < today)
}

/// Instance with book and reader resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InstanceDetails {
    pub id: i32,
    pub unique_id: Uuid,
    pub book: BookSummary,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub reader: Option<UserShort>,
    pub is_overdue: bool,
    pub url: String,
}

impl InstanceDetails {
    pub fn new(instance: BookInstance, book: BookSummary, reader: Option<UserShort>) -> Self {
        Self {
            is_overdue: instance.is_overdue(),
            url: instance.absolute_url(),
            id: instance.id,
            unique_id: instance.unique_id,
            book,
            due_back: instance.due_back,
            status: instance.status,
            reader,
        }
    }

    pub fn absolute_url(&self) -> String {
        instance_url(self.id)
    }
}

impl std::fmt::Display for InstanceDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UUID:{}, {}", self.unique_id, self.book)
    }
}

/// Create a copy of a book
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInstance {
    pub book_id: i32,
    pub due_back: Option<NaiveDate>,
    #[serde(default)]
    pub status: LoanStatus,
    pub reader_id: Option<i32>,
}

/// Replace the mutable fields of a copy. The book and unique id are fixed.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateInstance {
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub reader_id: Option<i32>,
}

/// Optional filter for listing copies
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InstanceQuery {
    /// Only copies of this book
    pub book_id: Option<i32>,
}
