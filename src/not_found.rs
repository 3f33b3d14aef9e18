//! The page to display when a route does not exist.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{endpoints, html::base};

/// Route handler for unknown routes.
pub async fn get_404_not_found() -> Response {
    let content = html! {
        main
        {
            h1 { "404 Not Found" }
            p
            {
                "The page you are looking for does not exist. "
                a href=(endpoints::ROOT) { "Convert a statement" }
                " instead."
            }
        }
    };

    (StatusCode::NOT_FOUND, base("Not Found", &[], &content)).into_response()
}
