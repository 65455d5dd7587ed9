mod auth;
mod menu;
mod news;
mod upload;

pub use auth::*;
pub use menu::*;
pub use news::*;
pub use upload::*;
