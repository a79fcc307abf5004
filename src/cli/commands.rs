use crate::app::{AppContext, Result};
use crate::domain::{Post, PostUpdate};
use crate::feed::Page;

pub fn add_user(ctx: &AppContext, username: &str) -> Result<()> {
    ctx.create_user(username)?;
    println!("Added user: {}", username);
    Ok(())
}

pub fn add_group(
    ctx: &AppContext,
    title: &str,
    slug: &str,
    description: Option<&str>,
) -> Result<()> {
    ctx.create_group(title, slug, description)?;
    println!("Added group: {} ({})", title, slug);
    Ok(())
}

pub fn remove_group(ctx: &AppContext, slug: &str) -> Result<()> {
    ctx.delete_group(slug)?;
    println!("Removed group: {} (its posts are now ungrouped)", slug);
    Ok(())
}

pub fn post(
    ctx: &AppContext,
    username: &str,
    text: &str,
    group: Option<&str>,
    image: Option<&str>,
) -> Result<()> {
    let id = ctx.create_post(username, text, group, image)?;
    println!("Published post #{} by {}", id, username);
    Ok(())
}

pub fn edit_post(
    ctx: &AppContext,
    username: &str,
    id: i64,
    text: Option<&str>,
    group: Option<&str>,
    no_group: bool,
) -> Result<()> {
    let group_id = if no_group {
        Some(None)
    } else {
        match group {
            Some(slug) => Some(Some(ctx.group_feed(slug, 1)?.group.id)),
            None => None,
        }
    };

    let update = PostUpdate {
        text: text.map(str::to_string),
        group_id,
        image: None,
    };
    ctx.edit_post(username, id, &update)?;
    println!("Edited post #{}", id);
    Ok(())
}

pub fn remove_post(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.delete_post(id)?;
    println!("Removed post #{} and its comments", id);
    Ok(())
}

pub fn comment(ctx: &AppContext, username: &str, post_id: i64, text: &str) -> Result<()> {
    ctx.add_comment(username, post_id, text)?;
    println!("Added comment on post #{}", post_id);
    Ok(())
}

pub fn follow(ctx: &AppContext, user: &str, author: &str) -> Result<()> {
    ctx.follow(user, author)?;
    println!("{} now follows {}", user, author);
    Ok(())
}

pub fn unfollow(ctx: &AppContext, user: &str, author: &str) -> Result<()> {
    ctx.unfollow(user, author)?;
    println!("{} no longer follows {}", user, author);
    Ok(())
}

pub fn feed(
    ctx: &AppContext,
    page: usize,
    group: Option<&str>,
    user: Option<&str>,
    following: Option<&str>,
    json: bool,
) -> Result<()> {
    if let Some(slug) = group {
        let group_feed = ctx.group_feed(slug, page)?;
        if json {
            println!("{}", serde_json::to_string(&group_feed)?);
        } else {
            println!("{}: {}", group_feed.group.title, group_feed.group.description);
            print_page(&group_feed.page);
        }
    } else if let Some(username) = user {
        let profile = ctx.profile_feed(username, page)?;
        if json {
            println!("{}", serde_json::to_string(&profile)?);
        } else {
            println!("{} ({} posts)", profile.author.username, profile.post_count);
            print_page(&profile.page);
        }
    } else if let Some(username) = following {
        let feed_page = ctx.following_feed(username, page)?;
        if json {
            println!("{}", serde_json::to_string(&feed_page)?);
        } else {
            print_page(&feed_page);
        }
    } else if json && page == 1 {
        // The first page of the global index is the one cached route.
        println!("{}", ctx.cached_index()?);
    } else {
        let feed_page = ctx.index_feed(page)?;
        if json {
            println!("{}", serde_json::to_string(&feed_page)?);
        } else {
            print_page(&feed_page);
        }
    }

    Ok(())
}

fn print_page(page: &Page<Post>) {
    if page.items.is_empty() {
        println!("No posts");
        return;
    }

    for post in &page.items {
        println!(
            "#{} {} {}",
            post.id,
            post.pub_date.format("%Y-%m-%d %H:%M"),
            post.preview()
        );
    }
    println!(
        "Page {} of {} ({} posts)",
        page.number, page.total_pages, page.total_items
    );
}
