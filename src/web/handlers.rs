use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use std::sync::Arc;

use crate::category::CategoryFilter;
use crate::session::SearchSession;

use super::AppState;
use super::pages;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub category: Option<String>,
    /// Present only when the search button was pressed. Example links leave
    /// it out so they fill the form without searching.
    pub submit: Option<String>,
}

pub async fn home_handler() -> Html<String> {
    Html(pages::home_page())
}

pub async fn about_handler() -> Html<String> {
    Html(pages::about_page())
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let session = SearchSession::new(state.client.clone()).with_max_results(state.max_results);

    if let Some(query) = params.query {
        session.set_query(query);
    }
    if let Some(raw) = params.category.as_deref() {
        match raw.parse::<CategoryFilter>() {
            Ok(category) => session.set_category(category),
            Err(e) => tracing::warn!(error = %e, "ignoring category filter"),
        }
    }

    if params.submit.is_some() {
        let outcome = session.submit().await;
        tracing::debug!(?outcome, "search page submission settled");
    }

    let page = pages::search_page(&session.form(), &session.state());
    session.teardown();
    Html(page)
}
