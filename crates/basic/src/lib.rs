//! Walkthrough controllers for request mapping and argument binding.
//!
//! Each module registers its own routes; [`router`] puts them together in the order
//! they must be matched in.

pub mod hello_data;
pub mod log_test;
pub mod mapping;
pub mod mapping_class;
pub mod request_body_json;
pub mod request_body_string;
pub mod request_header;
pub mod request_param;

use mvc_web::Router;
use mvc_web::error::RouteError;

/// The full route table.
///
/// `/mapping/users` is registered before `/mapping/{userId}` so that the class-level
/// resource wins for that exact path.
pub fn router() -> Result<Router, RouteError> {
    let router = Router::builder();
    let router = mapping_class::routes(router);
    let router = mapping::routes(router);
    let router = request_header::routes(router);
    let router = log_test::routes(router);
    let router = request_param::routes(router);
    let router = request_body_string::routes(router);
    let router = request_body_json::routes(router);
    router.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_table_builds() {
        let router = router().unwrap();
        assert!(!router.is_empty());
    }
}
