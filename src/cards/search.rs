//! Card de resumo da busca social.

use serde::Serialize;

use super::{Card, Render};
use crate::cache::{FreshnessPolicy, Validity};
use crate::types::payloads::{CardInput, DashboardPayload};

/// Totais de posts e autores da busca.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchSnapshot {
    pub total_posts: u64,
    pub media_posts: u64,
    pub normal_posts: u64,
    pub unique_authors: u64,
    pub success: bool,
}

/// A busca traz o próprio indicador de sucesso; zeros sozinhos não decidem nada.
impl Validity for SearchSnapshot {
    fn is_valid(&self, _policy: &FreshnessPolicy) -> bool {
        self.success
    }
}

impl Render for SearchSnapshot {
    fn render_lines(&self) -> Vec<String> {
        vec![
            format!("Total posts: {}", self.total_posts),
            format!(
                "Media posts: {} / Normal posts: {}",
                self.media_posts, self.normal_posts
            ),
            format!("Unique authors: {}", self.unique_authors),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchCard;

impl Card for SearchCard {
    type Output = SearchSnapshot;

    fn name(&self) -> &str {
        "Search"
    }

    fn select<'a>(&self, payload: &'a DashboardPayload) -> &'a CardInput {
        &payload.search
    }

    fn compute(&self, input: &CardInput) -> SearchSnapshot {
        match input.as_search() {
            Some(search) => SearchSnapshot {
                total_posts: search.total_posts_count,
                media_posts: search.total_media_posts_count,
                normal_posts: search.total_normal_posts_count,
                unique_authors: search.unique_authors_count,
                success: search.success,
            },
            None => SearchSnapshot::default(),
        }
    }
}
