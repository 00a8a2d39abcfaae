//! Cross-origin resource sharing.
//!
//! The API is open to every origin: all responses carry
//! `access-control-allow-origin: *`, and `OPTIONS` on a routed path is
//! answered as a preflight.

use crate::method::{Method, join};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

const ALLOW_ORIGIN: &str = "access-control-allow-origin";

pub(crate) fn allow_any_origin(mut response: Response) -> Response {
    response.set_header(ALLOW_ORIGIN, "*");
    response
}

/// `204` listing the methods routed at the path. Requested headers are
/// echoed back as allowed.
pub(crate) fn preflight(req: &Request, allowed: &[Method]) -> Response {
    let mut methods = allowed.to_vec();
    if !methods.contains(&Method::Options) {
        methods.push(Method::Options);
    }

    let mut builder = Response::builder()
        .status(Status::NoContent)
        .header("access-control-allow-methods", &join(&methods));
    if let Some(headers) = req.header("access-control-request-headers") {
        builder = builder.header("access-control-allow-headers", headers);
    }
    builder.no_body()
}
