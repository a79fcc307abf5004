pub mod pagination;

use serde::Serialize;
use tracing::debug;

use crate::app::{MurmurError, Result};
use crate::domain::{Group, Post, User};
use crate::store::Store;

pub use pagination::{paginate, Page, DEFAULT_PAGE_SIZE};

/// Builds the ordered, paginated post listings for the four view kinds.
///
/// Every query re-runs against the store; nothing is snapshotted between
/// calls. Ordering (newest first, id tiebreak) comes from the store itself.
pub struct FeedQuery<'a> {
    store: &'a dyn Store,
    page_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupFeed {
    pub group: Group,
    pub page: Page<Post>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileFeed {
    pub author: User,
    pub post_count: i64,
    pub page: Page<Post>,
}

impl<'a> FeedQuery<'a> {
    pub fn new(store: &'a dyn Store, page_size: usize) -> Self {
        Self { store, page_size }
    }

    /// The global index: every post, newest first.
    pub fn index(&self, page: usize) -> Result<Page<Post>> {
        let posts = self.store.get_all_posts()?;
        debug!(total = posts.len(), page, "index feed");
        Ok(paginate(posts, self.page_size, page))
    }

    /// Posts belonging to the group with the given slug.
    pub fn group(&self, slug: &str, page: usize) -> Result<GroupFeed> {
        let group = self
            .store
            .get_group_by_slug(slug)?
            .ok_or_else(|| MurmurError::GroupNotFound(slug.to_string()))?;

        let posts = self.store.get_posts_by_group(group.id)?;
        debug!(slug, total = posts.len(), page, "group feed");

        Ok(GroupFeed {
            group,
            page: paginate(posts, self.page_size, page),
        })
    }

    /// An author's posts plus their total post count.
    pub fn profile(&self, username: &str, page: usize) -> Result<ProfileFeed> {
        let author = self
            .store
            .get_user_by_username(username)?
            .ok_or_else(|| MurmurError::UserNotFound(username.to_string()))?;

        let posts = self.store.get_posts_by_author(author.id)?;
        let post_count = self.store.count_posts_by_author(author.id)?;
        debug!(username, post_count, page, "profile feed");

        Ok(ProfileFeed {
            author,
            post_count,
            page: paginate(posts, self.page_size, page),
        })
    }

    /// Posts by every author the given user follows. Empty when the user
    /// follows nobody.
    pub fn following(&self, user_id: i64, page: usize) -> Result<Page<Post>> {
        let posts = self.store.get_posts_by_followed(user_id)?;
        debug!(user_id, total = posts.len(), page, "follower feed");
        Ok(paginate(posts, self.page_size, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewGroup, NewPost, User};
    use crate::store::SqliteStore;
    use chrono::{TimeZone, Utc};

    fn user(store: &SqliteStore, name: &str) -> i64 {
        store.add_user(&User::new(name.into())).unwrap()
    }

    fn post_at(store: &SqliteStore, author_id: i64, text: &str, secs: i64) -> i64 {
        let mut post = NewPost::new(author_id, text).unwrap();
        post.pub_date = Utc.timestamp_opt(secs, 0).unwrap();
        store.add_post(&post).unwrap()
    }

    #[test]
    fn test_index_is_sorted_newest_first() {
        let store = SqliteStore::in_memory().unwrap();
        let author = user(&store, "leo");
        for i in 0..5 {
            post_at(&store, author, &format!("post {i}"), i * 100);
        }

        let feed = FeedQuery::new(&store, 10);
        let page = feed.index(1).unwrap();
        assert_eq!(page.items.len(), 5);
        for pair in page.items.windows(2) {
            assert!(
                (pair[0].pub_date, pair[0].id) > (pair[1].pub_date, pair[1].id),
                "index must be strictly descending"
            );
        }
    }

    #[test]
    fn test_index_paginates_fourteen_posts() {
        let store = SqliteStore::in_memory().unwrap();
        let author = user(&store, "leo");
        for i in 0..14 {
            post_at(&store, author, &format!("post {i}"), i);
        }

        let feed = FeedQuery::new(&store, 10);
        assert_eq!(feed.index(1).unwrap().items.len(), 10);
        assert_eq!(feed.index(2).unwrap().items.len(), 4);
        // Past-the-end clamps to the last page.
        assert_eq!(feed.index(3).unwrap().items, feed.index(2).unwrap().items);
    }

    #[test]
    fn test_group_feed_filters_by_slug() {
        let store = SqliteStore::in_memory().unwrap();
        let author = user(&store, "leo");
        let cats = store.add_group(&NewGroup::new("Cats", "cats")).unwrap();

        let mut grouped = NewPost::new(author, "in group").unwrap();
        grouped.group_id = Some(cats);
        store.add_post(&grouped).unwrap();
        post_at(&store, author, "no group", 50);

        let feed = FeedQuery::new(&store, 10);
        let group_feed = feed.group("cats", 1).unwrap();
        assert_eq!(group_feed.group.title, "Cats");
        assert_eq!(group_feed.page.items.len(), 1);
        assert_eq!(group_feed.page.items[0].text, "in group");
    }

    #[test]
    fn test_group_feed_sees_detached_post_gone() {
        let store = SqliteStore::in_memory().unwrap();
        let author = user(&store, "leo");
        let cats = store.add_group(&NewGroup::new("Cats", "cats")).unwrap();

        let mut grouped = NewPost::new(author, "was in group").unwrap();
        grouped.group_id = Some(cats);
        let post_id = store.add_post(&grouped).unwrap();

        let feed = FeedQuery::new(&store, 10);
        assert_eq!(feed.group("cats", 1).unwrap().page.items.len(), 1);

        let update = crate::domain::PostUpdate {
            group_id: Some(None),
            ..Default::default()
        };
        store.update_post(post_id, &update).unwrap();

        // No snapshot isolation: the next query reflects the change.
        assert!(feed.group("cats", 1).unwrap().page.items.is_empty());
    }

    #[test]
    fn test_group_feed_unknown_slug() {
        let store = SqliteStore::in_memory().unwrap();
        let feed = FeedQuery::new(&store, 10);
        assert!(matches!(
            feed.group("nope", 1),
            Err(MurmurError::GroupNotFound(_))
        ));
    }

    #[test]
    fn test_profile_feed_counts_posts() {
        let store = SqliteStore::in_memory().unwrap();
        let leo = user(&store, "leo");
        let mia = user(&store, "mia");
        for i in 0..3 {
            post_at(&store, leo, &format!("leo {i}"), i);
        }
        post_at(&store, mia, "mia 0", 99);

        let feed = FeedQuery::new(&store, 10);
        let profile = feed.profile("leo", 1).unwrap();
        assert_eq!(profile.post_count, 3);
        assert_eq!(profile.page.items.len(), 3);
        assert!(profile.page.items.iter().all(|p| p.author_id == leo));
    }

    #[test]
    fn test_profile_feed_unknown_user() {
        let store = SqliteStore::in_memory().unwrap();
        let feed = FeedQuery::new(&store, 10);
        assert!(matches!(
            feed.profile("ghost", 1),
            Err(MurmurError::UserNotFound(_))
        ));
    }

    #[test]
    fn test_following_feed_tracks_follow_state() {
        let store = SqliteStore::in_memory().unwrap();
        let reader = user(&store, "reader");
        let writer = user(&store, "writer");
        let other = user(&store, "other");
        post_at(&store, writer, "from writer", 100);
        post_at(&store, other, "from other", 200);

        let feed = FeedQuery::new(&store, 10);
        assert!(feed.following(reader, 1).unwrap().items.is_empty());

        store.add_follow(reader, writer).unwrap();
        let page = feed.following(reader, 1).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].text, "from writer");

        store.delete_follow(reader, writer).unwrap();
        assert!(feed.following(reader, 1).unwrap().items.is_empty());
    }
}
