use chrono::Local;
use kit::{success, App, Request, Response};

use crate::models::UserStats;
use crate::store::UserStore;

/// `GET /stats`
pub async fn index(_req: Request) -> Response {
    let store = App::resolve_make::<dyn UserStore>()?;
    let summary = store.summary()?;
    let server_time = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    success(
        "Statistics retrieved successfully",
        UserStats::new(summary, server_time),
    )
}
