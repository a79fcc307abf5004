pub mod comment;
pub mod group;
pub mod post;
pub mod user;

pub use comment::{Comment, NewComment};
pub use group::{Group, NewGroup};
pub use post::{NewPost, Post, PostUpdate};
pub use user::User;
