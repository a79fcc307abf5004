pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "murmur")]
#[command(about = "A server-rendered social blogging engine", long_about = None)]
pub struct Cli {
    /// Path to the SQLite database (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new user
    AddUser {
        /// Unique username
        username: String,
    },
    /// Create a group
    AddGroup {
        /// Group title
        title: String,
        /// Unique URL-safe identifier
        slug: String,
        /// Group description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a group; its posts stay, ungrouped
    RemoveGroup {
        /// Slug of the group to delete
        slug: String,
    },
    /// Publish a post
    Post {
        /// Author username
        username: String,
        /// Post text
        text: String,
        /// Slug of the group to post into
        #[arg(long)]
        group: Option<String>,
        /// Attachment reference for the post image
        #[arg(long)]
        image: Option<String>,
    },
    /// Edit one of your posts
    EditPost {
        /// Author username
        username: String,
        /// Id of the post to edit
        id: i64,
        /// New post text
        #[arg(long)]
        text: Option<String>,
        /// Move the post into this group
        #[arg(long, conflicts_with = "no_group")]
        group: Option<String>,
        /// Detach the post from its group
        #[arg(long)]
        no_group: bool,
    },
    /// Delete a post and its comments
    RemovePost {
        /// Id of the post to delete
        id: i64,
    },
    /// Comment on a post
    Comment {
        /// Comment author username
        username: String,
        /// Id of the post to comment on
        post_id: i64,
        /// Comment text
        text: String,
    },
    /// Subscribe to an author's posts
    Follow {
        /// Follower username
        user: String,
        /// Author username
        author: String,
    },
    /// Unsubscribe from an author's posts
    Unfollow {
        /// Follower username
        user: String,
        /// Author username
        author: String,
    },
    /// Show a feed (global index by default)
    Feed {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Show a group's feed
        #[arg(long, conflicts_with_all = ["user", "following"])]
        group: Option<String>,
        /// Show an author's profile feed
        #[arg(long, conflicts_with = "following")]
        user: Option<String>,
        /// Show the posts of everyone this user follows
        #[arg(long)]
        following: Option<String>,
        /// Print the feed as JSON
        #[arg(long)]
        json: bool,
    },
}
