use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rusqlite_migration::{Migrations, M};

use crate::app::{MurmurError, Result};
use crate::domain::{Comment, Group, NewComment, NewGroup, NewPost, Post, PostUpdate, User};
use crate::store::Store;

// Posts are always listed newest-first; id breaks pub_date ties so repeated
// queries stay deterministic.
const POST_ORDER: &str = "ORDER BY posts.pub_date DESC, posts.id DESC";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;

        conn.execute("PRAGMA foreign_keys = ON", [])?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| MurmurError::Database(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            MurmurError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }

    fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
        Ok(Post {
            id: row.get(0)?,
            text: row.get(1)?,
            pub_date: row
                .get::<_, String>(2)
                .ok()
                .and_then(|s| Self::parse_datetime(&s))
                .unwrap_or_else(Utc::now),
            author_id: row.get(3)?,
            group_id: row.get(4)?,
            image: row.get(5)?,
        })
    }

    fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            created_at: row
                .get::<_, String>(2)
                .ok()
                .and_then(|s| Self::parse_datetime(&s))
                .unwrap_or_else(Utc::now),
        })
    }
}

impl Store for SqliteStore {
    fn add_user(&self, user: &User) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO users (username, created_at) VALUES (?1, ?2)",
            params![user.username, user.created_at.to_rfc3339()],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;

        let result = conn
            .query_row(
                "SELECT id, username, created_at FROM users WHERE id = ?1",
                params![id],
                Self::user_from_row,
            )
            .optional()?;

        Ok(result)
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn()?;

        let result = conn
            .query_row(
                "SELECT id, username, created_at FROM users WHERE username = ?1",
                params![username],
                Self::user_from_row,
            )
            .optional()?;

        Ok(result)
    }

    fn add_group(&self, group: &NewGroup) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO \"groups\" (title, slug, description) VALUES (?1, ?2, ?3)",
            params![group.title, group.slug, group.description],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn get_group_by_slug(&self, slug: &str) -> Result<Option<Group>> {
        let conn = self.conn()?;

        let result = conn
            .query_row(
                "SELECT id, title, slug, description FROM \"groups\" WHERE slug = ?1",
                params![slug],
                |row| {
                    Ok(Group {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        slug: row.get(2)?,
                        description: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(result)
    }

    fn delete_group(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        // ON DELETE SET NULL detaches the group's posts without removing them.
        conn.execute("DELETE FROM \"groups\" WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn add_post(&self, post: &NewPost) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO posts (text, pub_date, author_id, group_id, image)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                post.text,
                post.pub_date.to_rfc3339(),
                post.author_id,
                post.group_id,
                post.image
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn get_post(&self, id: i64) -> Result<Option<Post>> {
        let conn = self.conn()?;

        let result = conn
            .query_row(
                "SELECT id, text, pub_date, author_id, group_id, image
                 FROM posts WHERE id = ?1",
                params![id],
                Self::post_from_row,
            )
            .optional()?;

        Ok(result)
    }

    fn get_all_posts(&self) -> Result<Vec<Post>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, text, pub_date, author_id, group_id, image
             FROM posts {POST_ORDER}"
        ))?;

        let posts = stmt
            .query_map([], Self::post_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    fn get_posts_by_group(&self, group_id: i64) -> Result<Vec<Post>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, text, pub_date, author_id, group_id, image
             FROM posts WHERE group_id = ?1 {POST_ORDER}"
        ))?;

        let posts = stmt
            .query_map(params![group_id], Self::post_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    fn get_posts_by_author(&self, author_id: i64) -> Result<Vec<Post>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, text, pub_date, author_id, group_id, image
             FROM posts WHERE author_id = ?1 {POST_ORDER}"
        ))?;

        let posts = stmt
            .query_map(params![author_id], Self::post_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    fn get_posts_by_followed(&self, user_id: i64) -> Result<Vec<Post>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT posts.id, posts.text, posts.pub_date, posts.author_id,
                    posts.group_id, posts.image
             FROM posts
             JOIN follows ON follows.author_id = posts.author_id
             WHERE follows.user_id = ?1 {POST_ORDER}"
        ))?;

        let posts = stmt
            .query_map(params![user_id], Self::post_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    fn count_posts_by_author(&self, author_id: i64) -> Result<i64> {
        let conn = self.conn()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM posts WHERE author_id = ?1",
            params![author_id],
            |row| row.get(0),
        )?;

        Ok(count)
    }

    fn update_post(&self, id: i64, update: &PostUpdate) -> Result<()> {
        let conn = self.conn()?;

        if let Some(ref text) = update.text {
            conn.execute("UPDATE posts SET text = ?1 WHERE id = ?2", params![text, id])?;
        }
        if let Some(group_id) = update.group_id {
            conn.execute(
                "UPDATE posts SET group_id = ?1 WHERE id = ?2",
                params![group_id, id],
            )?;
        }
        if let Some(ref image) = update.image {
            conn.execute(
                "UPDATE posts SET image = ?1 WHERE id = ?2",
                params![image, id],
            )?;
        }

        Ok(())
    }

    fn delete_post(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        // Comments go with the post via ON DELETE CASCADE.
        conn.execute("DELETE FROM posts WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn add_comment(&self, comment: &NewComment) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO comments (post_id, author_id, text, created)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                comment.post_id,
                comment.author_id,
                comment.text,
                comment.created.to_rfc3339()
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn get_comments_by_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, post_id, author_id, text, created
             FROM comments WHERE post_id = ?1 ORDER BY created, id",
        )?;

        let comments = stmt
            .query_map(params![post_id], |row| {
                Ok(Comment {
                    id: row.get(0)?,
                    post_id: row.get(1)?,
                    author_id: row.get(2)?,
                    text: row.get(3)?,
                    created: row
                        .get::<_, String>(4)
                        .ok()
                        .and_then(|s| Self::parse_datetime(&s))
                        .unwrap_or_else(Utc::now),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(comments)
    }

    fn add_follow(&self, user_id: i64, author_id: i64) -> Result<bool> {
        let conn = self.conn()?;

        // The primary key on (user_id, author_id) makes the duplicate case a
        // no-op even when two requests race on the same pair.
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO follows (user_id, author_id) VALUES (?1, ?2)",
            params![user_id, author_id],
        )?;

        Ok(inserted > 0)
    }

    fn delete_follow(&self, user_id: i64, author_id: i64) -> Result<bool> {
        let conn = self.conn()?;

        let deleted = conn.execute(
            "DELETE FROM follows WHERE user_id = ?1 AND author_id = ?2",
            params![user_id, author_id],
        )?;

        Ok(deleted > 0)
    }

    fn follow_exists(&self, user_id: i64, author_id: i64) -> Result<bool> {
        let conn = self.conn()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM follows WHERE user_id = ?1 AND author_id = ?2",
            params![user_id, author_id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}
