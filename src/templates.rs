use askama::Template;

use crate::recipe::Recipe;

const STATIC_URL: &str = "/static/";

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    title: String,
    static_url: &'static str,
    recipes: Vec<Recipe>,
}

impl IndexTemplate {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            title: "Recipes".to_string(),
            static_url: STATIC_URL,
            recipes,
        }
    }
}

#[derive(Template)]
#[template(path = "recipe.html")]
pub struct RecipeTemplate {
    title: String,
    static_url: &'static str,
    // Pre-escaped by Recipe::body_html; the template embeds it with |safe.
    body: String,
}

impl RecipeTemplate {
    pub fn new(recipe: &Recipe) -> Self {
        Self {
            title: format!("Recipe: {}", recipe.name()),
            static_url: STATIC_URL,
            body: recipe.body_html(),
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    title: String,
    static_url: &'static str,
    requested: String,
}

impl NotFoundTemplate {
    pub fn new(requested: &str) -> Self {
        Self {
            title: "Recipe Not Found".to_string(),
            static_url: STATIC_URL,
            requested: requested.to_string(),
        }
    }
}
