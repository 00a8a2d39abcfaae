//! The `/api/posts` endpoints.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | `POST` | `/api/posts` | 201, full list | 400 missing fields, 415 malformed body |
//! | `GET` | `/api/posts?sort=&direction=` | 200, list | 400 bad or partial sort params |
//! | `GET` | `/api/posts/search?title=&content=` | 200, matches | 404 no matches |
//! | `PUT` | `/api/posts/{id}` | 200, updated post | 400 bad id or body, 404 unknown id |
//! | `DELETE` | `/api/posts/{id}` | 200, `{"message": …}` | 400 bad id, 404 unknown id |
//!
//! Every failure body is `{"error": <message>, "status": <code>}`.

use std::sync::Arc;

use crate::error::StoreError;
use crate::method::Method;
use crate::post::{self, ListParams, PostInput, SearchParams};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::PostStore;

/// All post routes over `store`.
pub fn router(store: PostStore) -> Router<PostStore> {
    Router::new(store)
        .on(Method::Get,    "/api/posts",        list_posts)
        .on(Method::Post,   "/api/posts",        create_post)
        .on(Method::Get,    "/api/posts/search", search_posts)
        .on(Method::Put,    "/api/posts/{id}",   update_post)
        .on(Method::Delete, "/api/posts/{id}",   delete_post)
}

/// A [`StoreError`] paired with the status it is reported under.
#[derive(Debug)]
pub struct ApiError {
    status: Status,
    error: StoreError,
}

impl ApiError {
    fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        let status = match error {
            StoreError::Parse => Status::UnsupportedMediaType,
            StoreError::MissingFields(_)
            | StoreError::InvalidSortField(_)
            | StoreError::InvalidId => Status::BadRequest,
            StoreError::NotFound(_) | StoreError::NoMatches => Status::NotFound,
        };
        Self { status, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Response::error(self.status, &self.error)
    }
}

// POST /api/posts
async fn create_post(store: Arc<PostStore>, req: Request) -> Result<Response, ApiError> {
    let input = PostInput::from_json(req.body())?;
    let posts = store.create(input)?;
    Ok(Response::builder().status(Status::Created).json(&posts))
}

// GET /api/posts
async fn list_posts(store: Arc<PostStore>, req: Request) -> Result<Response, ApiError> {
    let params = ListParams {
        sort: req.query("sort").map(str::to_owned),
        direction: req.query("direction").map(str::to_owned),
    };
    Ok(Response::json(&store.list(&params)?))
}

// GET /api/posts/search
async fn search_posts(store: Arc<PostStore>, req: Request) -> Result<Response, ApiError> {
    let params = SearchParams {
        title: req.query("title").map(str::to_owned),
        content: req.query("content").map(str::to_owned),
    };
    Ok(Response::json(&store.search(&params)?))
}

// PUT /api/posts/{id}
async fn update_post(store: Arc<PostStore>, req: Request) -> Result<Response, ApiError> {
    let id = post::parse_id(req.param("id").unwrap_or_default())?;
    let input = PostInput::from_json(req.body())
        .map_err(|e| ApiError::from(e).with_status(Status::BadRequest))?;
    let post = store.update(id, input)?;
    Ok(Response::json(&post))
}

// DELETE /api/posts/{id}
async fn delete_post(store: Arc<PostStore>, req: Request) -> Result<Response, ApiError> {
    let id = post::parse_id(req.param("id").unwrap_or_default())?;
    let message = store.delete(id)?;
    Ok(Response::json(&serde_json::json!({ "message": message })))
}
