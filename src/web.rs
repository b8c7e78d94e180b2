use std::sync::Arc;

use askama::Template;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use crate::error::ServerError;
use crate::recipe::{self, Recipe};
use crate::templates::{IndexTemplate, NotFoundTemplate, RecipeTemplate};
use crate::{AppState, SharedAppState};

/// Rescans the recipe directory and publishes the result as a fresh
/// snapshot. Readers holding the previous snapshot are unaffected.
async fn rescan(state: &AppState) -> Arc<Vec<Recipe>> {
    let fresh = Arc::new(recipe::scan_recipes(&state.recipe_dir));
    *state.recipes.write().await = Arc::clone(&fresh);
    fresh
}

pub async fn home(State(state): State<SharedAppState>) -> Result<Response, ServerError> {
    let snapshot = rescan(&state).await;
    let page = IndexTemplate::new(snapshot.as_ref().clone());
    Ok(Html(page.render()?).into_response())
}

#[derive(Deserialize)]
pub struct RecipeParams {
    title: Option<String>,
}

pub async fn recipe_detail(
    State(state): State<SharedAppState>,
    Query(params): Query<RecipeParams>,
) -> Result<Response, ServerError> {
    let mut snapshot = state.recipes.read().await.clone();
    if snapshot.is_empty() {
        snapshot = rescan(&state).await;
    }

    let title = params.title.unwrap_or_default();
    match recipe::find_by_title(&snapshot, &title) {
        Some(found) => {
            let page = RecipeTemplate::new(found);
            Ok(Html(page.render()?).into_response())
        }
        None => {
            log::warn!("recipe not found: {:?}", title);
            let page = NotFoundTemplate::new(&title);
            Ok((StatusCode::NOT_FOUND, Html(page.render()?)).into_response())
        }
    }
}

pub async fn handler_404() -> Response {
    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::fs;
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    fn test_state(dir: &tempfile::TempDir) -> SharedAppState {
        Arc::new(AppState {
            recipe_dir: dir.path().to_path_buf(),
            recipes: RwLock::new(Arc::new(Vec::new())),
        })
    }

    #[tokio::test]
    async fn home_rescans_and_publishes_a_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a"), "one").unwrap();
        fs::write(dir.path().join("b_c"), "two").unwrap();
        let state = test_state(&dir);

        let response = home(State(Arc::clone(&state))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let snapshot = state.recipes.read().await.clone();
        let titles: Vec<&str> = snapshot.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["a", "b_c"]);
    }

    #[tokio::test]
    async fn detail_hit_renders_the_recipe() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stew"), "simmer").unwrap();
        let state = test_state(&dir);

        // Empty snapshot forces the handler to rescan before the lookup.
        let params = RecipeParams {
            title: Some("stew".to_string()),
        };
        let response = recipe_detail(State(Arc::clone(&state)), Query(params))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!state.recipes.read().await.is_empty());
    }

    #[tokio::test]
    async fn detail_miss_is_a_distinct_not_found_page() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stew"), "simmer").unwrap();
        let state = test_state(&dir);

        let params = RecipeParams {
            title: Some("ghost_pie".to_string()),
        };
        let response = recipe_detail(State(state), Query(params)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn static_route_serves_files_but_never_the_root() {
        let recipes = tempfile::tempdir().unwrap();
        let assets = tempfile::tempdir().unwrap();
        fs::write(assets.path().join("style.css"), "body {}").unwrap();
        let app = crate::router(test_state(&recipes), assets.path());

        let hit = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/static/style.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(hit.status(), StatusCode::OK);

        let empty_suffix = app
            .oneshot(Request::builder().uri("/static/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(empty_suffix.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn detail_without_title_param_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let params = RecipeParams { title: None };
        let response = recipe_detail(State(state), Query(params)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
