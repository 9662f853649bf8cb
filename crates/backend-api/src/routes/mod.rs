pub mod admin;
pub mod auth;
pub mod conversations;
pub mod health;
pub mod models;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod support;
pub mod tutors;
pub mod users;
