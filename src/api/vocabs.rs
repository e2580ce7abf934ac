//! Vocabulary list handlers / 词汇列表接口
//!
//! Every handler renders HTML. Requests sent by htmx get a fragment
//! (table body rows, a single row, the count); plain requests get full pages.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::is_fragment_request;
use crate::error::VocabError;
use crate::models::CreateVocabRequest;
use crate::service::normalize_query;
use crate::state::AppState;
use crate::views::{self, VOCABS_CHANGED_EVENT};

const HX_TRIGGER: &str = "hx-trigger";
const HX_REDIRECT: &str = "hx-redirect";

#[derive(Debug, Deserialize)]
pub struct ListVocabsQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Ids selected for deletion plus the search term to re-render with
#[derive(Debug, Default, PartialEq)]
pub struct DeleteSelection {
    pub ids: BTreeSet<i64>,
    pub q: Option<String>,
}

impl DeleteSelection {
    /// Collect repeated `id` fields from the query string and the
    /// urlencoded body (htmx puts DELETE params in either, by version)
    pub fn parse(query: Option<&str>, body: &str) -> Result<Self, VocabError> {
        let mut selection = DeleteSelection::default();
        let sources = [query.unwrap_or(""), body];

        for source in sources {
            for (key, value) in url::form_urlencoded::parse(source.as_bytes()) {
                match key.as_ref() {
                    "id" => {
                        let id = value.trim().parse::<i64>().map_err(|_| {
                            VocabError::InvalidInput(format!("Invalid vocab id: {}", value))
                        })?;
                        selection.ids.insert(id);
                    }
                    "q" => {
                        // Rejected here so a bad term never follows a committed delete
                        if normalize_query(Some(value.as_ref()))?.is_some() {
                            selection.q = Some(value.into_owned());
                        }
                    }
                    _ => {}
                }
            }
        }

        if selection.ids.is_empty() {
            return Err(VocabError::InvalidInput("No vocabs selected".to_string()));
        }
        Ok(selection)
    }
}

/// GET / - homepage points at the list
pub async fn index() -> Redirect {
    Redirect::to("/vocabs")
}

/// GET /vocabs?q=
pub async fn list_vocabs(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListVocabsQuery>,
) -> Result<Html<String>, VocabError> {
    let q = query.q.as_deref();
    let vocabs = state.vocabs.list(q).await?;

    if is_fragment_request(&headers) {
        Ok(Html(views::vocab_rows(&vocabs, q)))
    } else {
        Ok(Html(views::vocabs_page(&vocabs, q)))
    }
}

/// DELETE /vocabs - bulk delete / 批量删除
pub async fn delete_vocabs(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    body: String,
) -> Result<Response, VocabError> {
    let selection = DeleteSelection::parse(uri.query(), &body)?;
    state.vocabs.delete(&selection.ids).await?;

    if !is_fragment_request(&headers) {
        return Ok(Redirect::to("/vocabs").into_response());
    }

    let q = selection.q.as_deref();
    let vocabs = state.vocabs.list(q).await?;
    Ok((
        [(HX_TRIGGER, VOCABS_CHANGED_EVENT)],
        Html(views::vocab_rows(&vocabs, q)),
    )
        .into_response())
}

/// DELETE /vocabs/:id - the client swaps the row out with the empty body
pub async fn delete_vocab(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, VocabError> {
    if !state.vocabs.delete_one(id).await? {
        tracing::debug!("Vocab {} already gone", id);
    }
    Ok(([(HX_TRIGGER, VOCABS_CHANGED_EVENT)], Html(String::new())).into_response())
}

/// GET /vocabs/:id - single row fragment
pub async fn get_vocab(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, VocabError> {
    let vocab = state.vocabs.get(id).await?;
    Ok(Html(views::vocab_row(&vocab)))
}

/// GET /vocabs/count - lazily loaded summary
pub async fn count_vocabs(State(state): State<Arc<AppState>>) -> Result<Html<String>, VocabError> {
    let count = state.vocabs.count().await?;
    Ok(Html(views::count_fragment(count)))
}

/// GET /vocabs/new
pub async fn new_vocab_form() -> Html<String> {
    Html(views::new_vocab_page(&CreateVocabRequest::default(), None))
}

/// POST /vocabs - add vocab / 新增词汇
pub async fn create_vocab(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(req): Form<CreateVocabRequest>,
) -> Response {
    match state.vocabs.create(&req).await {
        Ok(_) if is_fragment_request(&headers) => {
            (StatusCode::OK, [(HX_REDIRECT, "/vocabs")]).into_response()
        }
        Ok(_) => Redirect::to("/vocabs").into_response(),
        Err(VocabError::InvalidInput(message)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::new_vocab_page(&req, Some(&message))),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_from_body() {
        let selection = DeleteSelection::parse(None, "id=3&id=1&id=3&q=eph").unwrap();
        assert_eq!(selection.ids, BTreeSet::from([1, 3]));
        assert_eq!(selection.q.as_deref(), Some("eph"));
    }

    #[test]
    fn test_parse_selection_from_query_and_body() {
        let selection = DeleteSelection::parse(Some("id=5&q="), "id=6").unwrap();
        assert_eq!(selection.ids, BTreeSet::from([5, 6]));
        assert_eq!(selection.q, None);
    }

    #[test]
    fn test_parse_selection_rejects_bad_input() {
        assert!(matches!(
            DeleteSelection::parse(None, ""),
            Err(VocabError::InvalidInput(_))
        ));
        assert!(matches!(
            DeleteSelection::parse(Some("q=word"), ""),
            Err(VocabError::InvalidInput(_))
        ));
        assert!(matches!(
            DeleteSelection::parse(None, "id=abc"),
            Err(VocabError::InvalidInput(_))
        ));
        let long_q = format!("id=1&q={}", "x".repeat(201));
        assert!(matches!(
            DeleteSelection::parse(None, &long_q),
            Err(VocabError::InvalidInput(_))
        ));
    }
}
