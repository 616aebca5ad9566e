//! A resource mapped under one class-level prefix.

use mvc_web::router::{RouterBuilder, Scope, delete, get, patch, post};
use mvc_web::{PathParams, handler_fn};

pub fn routes(router: RouterBuilder) -> RouterBuilder {
    router.scope(
        Scope::new("/mapping/users")
            .route("", get(handler_fn(users)))
            .route("", post(handler_fn(add_users)))
            .route("/{userId}", get(handler_fn(get_user_id)))
            .route("/{userId}", post(handler_fn(add_user_id)))
            .route("/{userId}", patch(handler_fn(update_user_id)))
            .route("/{userId}", delete(handler_fn(delete_user_id))),
    )
}

fn user_id(path_params: &PathParams) -> &str {
    path_params.get("userId").unwrap_or_default()
}

pub async fn users() -> &'static str {
    "getUsers"
}

pub async fn add_users() -> &'static str {
    "addUsers"
}

pub async fn get_user_id(path_params: PathParams) -> String {
    format!("get path userId ={}", user_id(&path_params))
}

pub async fn add_user_id(path_params: PathParams) -> String {
    format!("add path userId={}", user_id(&path_params))
}

pub async fn update_user_id(path_params: PathParams) -> String {
    format!("update path userId={}", user_id(&path_params))
}

pub async fn delete_user_id(path_params: PathParams) -> String {
    format!("delete path userId={}", user_id(&path_params))
}
