pub mod sqlite;

use crate::app::Result;
use crate::domain::{Comment, Group, NewComment, NewGroup, NewPost, Post, PostUpdate, User};

pub use sqlite::SqliteStore;

pub trait Store {
    // User operations
    fn add_user(&self, user: &User) -> Result<i64>;
    fn get_user(&self, id: i64) -> Result<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    // Group operations
    fn add_group(&self, group: &NewGroup) -> Result<i64>;
    fn get_group_by_slug(&self, slug: &str) -> Result<Option<Group>>;
    fn delete_group(&self, id: i64) -> Result<()>;

    // Post operations
    fn add_post(&self, post: &NewPost) -> Result<i64>;
    fn get_post(&self, id: i64) -> Result<Option<Post>>;
    fn get_all_posts(&self) -> Result<Vec<Post>>;
    fn get_posts_by_group(&self, group_id: i64) -> Result<Vec<Post>>;
    fn get_posts_by_author(&self, author_id: i64) -> Result<Vec<Post>>;
    fn get_posts_by_followed(&self, user_id: i64) -> Result<Vec<Post>>;
    fn count_posts_by_author(&self, author_id: i64) -> Result<i64>;
    fn update_post(&self, id: i64, update: &PostUpdate) -> Result<()>;
    fn delete_post(&self, id: i64) -> Result<()>;

    // Comment operations
    fn add_comment(&self, comment: &NewComment) -> Result<i64>;
    fn get_comments_by_post(&self, post_id: i64) -> Result<Vec<Comment>>;

    // Follow operations
    fn add_follow(&self, user_id: i64, author_id: i64) -> Result<bool>;
    fn delete_follow(&self, user_id: i64, author_id: i64) -> Result<bool>;
    fn follow_exists(&self, user_id: i64, author_id: i64) -> Result<bool>;
}
