//! HTML templates rendered with Tera
//!
//! Templates are compiled into the binary and parsed once at startup.

use std::sync::Arc;

use tera::{Context, Tera};

use crate::{error::AppResult, services::stats::IndexSummary};

pub const BASE_TEMPLATE: &str = "base.html";
pub const INDEX_TEMPLATE: &str = "index.html";

#[derive(Clone)]
pub struct Templates {
    tera: Arc<Tera>,
}

impl Templates {
    /// Parse the embedded templates
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (BASE_TEMPLATE, include_str!("../templates/base.html")),
            (INDEX_TEMPLATE, include_str!("../templates/index.html")),
        ])?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Landing page with catalog counts and the genre list
    pub fn render_index(&self, summary: &IndexSummary) -> AppResult<String> {
        let context = Context::from_serialize(summary)?;
        Ok(self.tera.render(INDEX_TEMPLATE, &context)?)
    }
}
