pub mod auth;
pub mod menu;
pub mod news;
pub mod pages;
pub mod upload;
pub mod users;
