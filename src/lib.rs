//! # Murmur
//!
//! The domain core of a server-rendered social blogging application:
//! users author posts, organize them into groups, comment, and follow
//! other authors to receive a personalized feed.
//!
//! ## Architecture
//!
//! ```text
//! Store → FeedQuery → paginate → (ResponseCache) → presentation
//!   ↑
//! FollowGraph
//! ```
//!
//! - [`store`]: SQLite persistence with explicit referential actions
//!   (deleting a group detaches its posts, deleting a post removes its
//!   comments)
//! - [`feed`]: ordered post listings for the four views (global index,
//!   group, profile, follower feed) plus pagination
//! - [`follow`]: idempotent directed follow edges
//! - [`cache`]: short-TTL cache for the rendered global index
//!
//! Every listing is ordered newest-first by `pub_date`, ties broken by id,
//! and sliced into fixed-size pages with forgiving clamping of out-of-range
//! page numbers.
//!
//! ## Quick Start
//!
//! ```bash
//! murmur add-user leo
//! murmur add-group "Cats" cats
//! murmur post leo "hello world" --group cats
//! murmur follow mia leo
//! murmur feed --following mia
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires together the store, feed engine,
/// follow graph and response cache, and hosts the write operations with
/// their validation rules.
pub mod app;

/// Short-TTL response cache for the global index view.
pub mod cache;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/murmur/config.toml`: page size and index cache TTL.
pub mod config;

/// Core domain models.
///
/// - [`Post`](domain::Post): a user's publication, optionally grouped
/// - [`Group`](domain::Group): a slug-addressed collection of posts
/// - [`Comment`](domain::Comment): attached to a post for its lifetime
/// - [`User`](domain::User): an author/follower identity
pub mod domain;

/// Feed composition and pagination.
///
/// [`FeedQuery`](feed::FeedQuery) builds the four list views;
/// [`paginate`](feed::paginate) slices them into [`Page`](feed::Page)s.
pub mod feed;

/// The directed follow graph.
pub mod follow;

/// SQLite persistence layer.
///
/// - [`Store`](store::Store): trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;
