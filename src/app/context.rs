use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::app::error::{MurmurError, Result};
use crate::cache::{ResponseCache, INDEX_KEY};
use crate::config::Config;
use crate::domain::{Group, NewComment, NewGroup, NewPost, Post, PostUpdate, User};
use crate::feed::{FeedQuery, GroupFeed, Page, ProfileFeed};
use crate::follow::FollowGraph;
use crate::store::{SqliteStore, Store};

/// Wires the store, feed engine, follow graph and response cache together,
/// and exposes the application's write operations with their validation
/// rules (non-empty text, author-only edits, resolved usernames).
pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub cache: ResponseCache,
    pub config: Config,
}

impl AppContext {
    pub fn new(db_path: Option<PathBuf>, config: Config) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let cache = ResponseCache::new(config.index_ttl());

        Ok(Self {
            store,
            cache,
            config,
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::in_memory_with_config(Config::default())
    }

    pub fn in_memory_with_config(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        let cache = ResponseCache::new(config.index_ttl());

        Ok(Self {
            store,
            cache,
            config,
        })
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| MurmurError::Config("Could not find data directory".into()))?;
        let murmur_dir = data_dir.join("murmur");
        std::fs::create_dir_all(&murmur_dir)?;
        Ok(murmur_dir.join("murmur.db"))
    }

    pub fn feed(&self) -> FeedQuery<'_> {
        FeedQuery::new(&*self.store, self.config.feed.page_size)
    }

    pub fn follow_graph(&self) -> FollowGraph<'_> {
        FollowGraph::new(&*self.store)
    }

    fn resolve_user(&self, username: &str) -> Result<User> {
        self.store
            .get_user_by_username(username)?
            .ok_or_else(|| MurmurError::UserNotFound(username.to_string()))
    }

    fn resolve_group(&self, slug: &str) -> Result<Group> {
        self.store
            .get_group_by_slug(slug)?
            .ok_or_else(|| MurmurError::GroupNotFound(slug.to_string()))
    }

    // Write operations

    pub fn create_user(&self, username: &str) -> Result<i64> {
        if username.trim().is_empty() {
            return Err(MurmurError::EmptyText);
        }
        let id = self.store.add_user(&User::new(username.to_string()))?;
        info!(username, id, "created user");
        Ok(id)
    }

    pub fn create_group(&self, title: &str, slug: &str, description: Option<&str>) -> Result<i64> {
        let mut group = NewGroup::new(title, slug);
        if let Some(description) = description {
            group.description = description.to_string();
        }
        let id = self.store.add_group(&group)?;
        info!(slug, id, "created group");
        Ok(id)
    }

    /// Delete a group. Its posts stay, detached from the group.
    pub fn delete_group(&self, slug: &str) -> Result<()> {
        let group = self.resolve_group(slug)?;
        self.store.delete_group(group.id)?;
        info!(slug, "deleted group");
        Ok(())
    }

    pub fn create_post(
        &self,
        username: &str,
        text: &str,
        group_slug: Option<&str>,
        image: Option<&str>,
    ) -> Result<i64> {
        let author = self.resolve_user(username)?;

        let mut post = NewPost::new(author.id, text)?;
        if let Some(slug) = group_slug {
            post.group_id = Some(self.resolve_group(slug)?.id);
        }
        post.image = image.map(str::to_string);

        let id = self.store.add_post(&post)?;
        info!(username, id, "created post");
        Ok(id)
    }

    /// Apply `update` to a post. Only the post's author may edit it, and
    /// `pub_date` is never touched.
    pub fn edit_post(&self, editor: &str, post_id: i64, update: &PostUpdate) -> Result<()> {
        let editor = self.resolve_user(editor)?;
        let post = self
            .store
            .get_post(post_id)?
            .ok_or(MurmurError::PostNotFound(post_id))?;

        if post.author_id != editor.id {
            return Err(MurmurError::NotPostAuthor(post_id));
        }
        if let Some(ref text) = update.text {
            if text.trim().is_empty() {
                return Err(MurmurError::EmptyText);
            }
        }

        self.store.update_post(post_id, update)?;
        info!(post_id, "edited post");
        Ok(())
    }

    /// Delete a post along with its comments.
    pub fn delete_post(&self, post_id: i64) -> Result<()> {
        if self.store.get_post(post_id)?.is_none() {
            return Err(MurmurError::PostNotFound(post_id));
        }
        self.store.delete_post(post_id)?;
        info!(post_id, "deleted post");
        Ok(())
    }

    pub fn add_comment(&self, username: &str, post_id: i64, text: &str) -> Result<i64> {
        let author = self.resolve_user(username)?;
        if self.store.get_post(post_id)?.is_none() {
            return Err(MurmurError::PostNotFound(post_id));
        }

        let comment = NewComment::new(post_id, author.id, text)?;
        let id = self.store.add_comment(&comment)?;
        info!(username, post_id, "added comment");
        Ok(id)
    }

    pub fn follow(&self, username: &str, author: &str) -> Result<()> {
        let user = self.resolve_user(username)?;
        let author = self.resolve_user(author)?;
        self.follow_graph().follow(user.id, author.id)
    }

    pub fn unfollow(&self, username: &str, author: &str) -> Result<()> {
        let user = self.resolve_user(username)?;
        let author = self.resolve_user(author)?;
        self.follow_graph().unfollow(user.id, author.id)
    }

    pub fn is_following(&self, username: &str, author: &str) -> Result<bool> {
        let user = self.resolve_user(username)?;
        let author = self.resolve_user(author)?;
        self.follow_graph().is_following(user.id, author.id)
    }

    // Read operations

    pub fn index_feed(&self, page: usize) -> Result<Page<Post>> {
        self.feed().index(page)
    }

    /// The first page of the global index, rendered to JSON and cached for
    /// the configured TTL. This is the only cached view; mutations do not
    /// invalidate it.
    pub fn cached_index(&self) -> Result<String> {
        self.cache.get_or_render(INDEX_KEY, || {
            let page = self.feed().index(1)?;
            Ok(serde_json::to_string(&page)?)
        })
    }

    pub fn group_feed(&self, slug: &str, page: usize) -> Result<GroupFeed> {
        self.feed().group(slug, page)
    }

    pub fn profile_feed(&self, username: &str, page: usize) -> Result<ProfileFeed> {
        self.feed().profile(username, page)
    }

    pub fn following_feed(&self, username: &str, page: usize) -> Result<Page<Post>> {
        let user = self.resolve_user(username)?;
        self.feed().following(user.id, page)
    }
}
