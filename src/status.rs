//! HTTP status codes as a typed enum.
//!
//! Only the codes this service actually emits. Use [`Status`] anywhere a
//! status code is accepted: `Response::status()`, `Response::error()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use postbox::{Response, Status};
//!
//! Response::status(Status::NoContent);
//! Response::error(Status::NotFound, "No post with id 9 exists.");
//! Response::builder()
//!     .status(Status::Created)
//!     .json(&[1, 2, 3]);
//! ```

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                   // 200
    Created,              // 201
    NoContent,            // 204

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,           // 400
    NotFound,             // 404
    MethodNotAllowed,     // 405
    UnsupportedMediaType, // 415

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,  // 500
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok                   => 200,
            Self::Created              => 201,
            Self::NoContent            => 204,
            Self::BadRequest           => 400,
            Self::NotFound             => 404,
            Self::MethodNotAllowed     => 405,
            Self::UnsupportedMediaType => 415,
            Self::InternalServerError  => 500,
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 { s.code() }
}
