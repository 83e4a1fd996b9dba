use kit::{any, delete, get, group, post, put, routes};

use crate::controllers;

routes! {
    any!("/", controllers::home::index).name("home").describe("Welcome message"),

    group!("/users", {
        get!("/", controllers::user::index).name("users.index").describe("Get all users"),
        post!("/", controllers::user::store).name("users.store").describe("Create new user"),
        get!("/search", controllers::user::search).name("users.search").describe("Search users by name"),
        get!("/{id}", controllers::user::show).name("users.show").describe("Get user by ID"),
        put!("/{id}", controllers::user::update).name("users.update").describe("Update user"),
        delete!("/{id}", controllers::user::destroy).name("users.destroy").describe("Delete user"),
        any!("/{id}/{*rest}", controllers::user::invalid_id).describe("Rejected: not a user ID"),
    }),
    any!("/users/", controllers::user::invalid_id).describe("Rejected: missing user ID"),

    get!("/stats", controllers::stats::index).name("stats").describe("Get statistics"),
}
