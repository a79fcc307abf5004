use tracing::debug;

use crate::app::{MurmurError, Result};
use crate::store::Store;

/// Mutates and queries the directed follow graph.
///
/// Both mutations are idempotent. Uniqueness of an edge is enforced by the
/// store's primary key rather than by locking here, so two racing follows of
/// the same pair still leave exactly one edge.
pub struct FollowGraph<'a> {
    store: &'a dyn Store,
}

impl<'a> FollowGraph<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Subscribe `user_id` to `author_id`'s posts. Following someone twice
    /// is a silent no-op; following yourself is rejected.
    pub fn follow(&self, user_id: i64, author_id: i64) -> Result<()> {
        if user_id == author_id {
            return Err(MurmurError::SelfFollow);
        }

        if !self.store.add_follow(user_id, author_id)? {
            debug!(user_id, author_id, "follow edge already present");
        }
        Ok(())
    }

    /// Remove the edge if it exists; succeeds either way.
    pub fn unfollow(&self, user_id: i64, author_id: i64) -> Result<()> {
        if !self.store.delete_follow(user_id, author_id)? {
            debug!(user_id, author_id, "no follow edge to remove");
        }
        Ok(())
    }

    pub fn is_following(&self, user_id: i64, author_id: i64) -> Result<bool> {
        self.store.follow_exists(user_id, author_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::store::SqliteStore;

    fn user(store: &SqliteStore, name: &str) -> i64 {
        store.add_user(&User::new(name.into())).unwrap()
    }

    #[test]
    fn test_follow_is_idempotent() {
        let store = SqliteStore::in_memory().unwrap();
        let u = user(&store, "reader");
        let a = user(&store, "writer");
        let graph = FollowGraph::new(&store);

        graph.follow(u, a).unwrap();
        graph.follow(u, a).unwrap();
        assert!(graph.is_following(u, a).unwrap());

        // One edge means one unfollow clears it completely.
        graph.unfollow(u, a).unwrap();
        assert!(!graph.is_following(u, a).unwrap());
    }

    #[test]
    fn test_unfollow_missing_edge_is_noop() {
        let store = SqliteStore::in_memory().unwrap();
        let u = user(&store, "reader");
        let a = user(&store, "writer");
        let graph = FollowGraph::new(&store);

        graph.unfollow(u, a).unwrap();
        assert!(!graph.is_following(u, a).unwrap());
    }

    #[test]
    fn test_self_follow_rejected() {
        let store = SqliteStore::in_memory().unwrap();
        let u = user(&store, "narcissus");
        let graph = FollowGraph::new(&store);

        assert!(matches!(graph.follow(u, u), Err(MurmurError::SelfFollow)));
        assert!(!graph.is_following(u, u).unwrap());
    }

    #[test]
    fn test_follow_is_directed() {
        let store = SqliteStore::in_memory().unwrap();
        let u = user(&store, "reader");
        let a = user(&store, "writer");
        let graph = FollowGraph::new(&store);

        graph.follow(u, a).unwrap();
        assert!(graph.is_following(u, a).unwrap());
        assert!(!graph.is_following(a, u).unwrap());
    }
}
