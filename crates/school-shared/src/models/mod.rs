mod menu;
mod news;
mod user;

pub use menu::*;
pub use news::*;
pub use user::*;
