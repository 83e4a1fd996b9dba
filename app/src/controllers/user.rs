use kit::{
    route, success, success_message, ApiResponse, App, AppError, FrameworkError, Request,
    Response,
};
use std::sync::Arc;

use crate::models::{CreateUserRequest, UpdateUserRequest};
use crate::store::UserStore;

fn user_store() -> Result<Arc<dyn UserStore>, FrameworkError> {
    App::resolve_make::<dyn UserStore>()
}

/// Parse the `{id}` segment, answering 400 "Invalid user ID" otherwise
fn user_id(req: &Request) -> Result<i64, AppError> {
    req.param_as::<i64>("id")
        .map_err(|_| AppError::bad_request("Invalid user ID"))
}

/// Any method on `/users/` or a path with segments after the ID
pub async fn invalid_id(_req: Request) -> Response {
    Err(AppError::bad_request("Invalid user ID").into())
}

/// `GET /users`
pub async fn index(_req: Request) -> Response {
    let users = user_store()?.list()?;
    success("Users retrieved successfully", users)
}

/// `POST /users`
pub async fn store(req: Request) -> Response {
    let input: CreateUserRequest = req.json()?;
    if !input.is_complete() {
        return Err(AppError::bad_request("Name and email are required").into());
    }

    let user = user_store()?.create(input)?;
    let location = route("users.show", &[("id", &user.id.to_string())]);

    let response = ApiResponse::ok("User created successfully", &user).into_http(201);
    Ok(match location {
        Some(location) => response.header("Location", location),
        None => response,
    })
}

/// `GET /users/{id}`
pub async fn show(req: Request) -> Response {
    let id = user_id(&req)?;
    let user = user_store()?.get(id)?;
    success("User retrieved successfully", user)
}

/// `PUT /users/{id}`
pub async fn update(req: Request) -> Response {
    let id = user_id(&req)?;
    let store = user_store()?;

    // A missing user is reported before the body is looked at
    store.get(id)?;
    let changes: UpdateUserRequest = req.json()?;

    let user = store.update(id, changes)?;
    success("User updated successfully", user)
}

/// `DELETE /users/{id}`
pub async fn destroy(req: Request) -> Response {
    let id = user_id(&req)?;
    user_store()?.delete(id)?;
    tracing::info!(id, "user deleted");
    success_message("User deleted successfully")
}

/// `GET /users/search?name=<q>`
pub async fn search(req: Request) -> Response {
    let query = req
        .query_param("name")
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::bad_request("Name parameter is required"))?;

    let users = user_store()?.search_by_name(&query)?;
    success(format!("Found {} users", users.len()), users)
}
