use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use murmur::app::AppContext;
use murmur::cli::{commands, Cli, Commands};
use murmur::config::Config;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(cli.db, config)?;

    match cli.command {
        Commands::AddUser { username } => {
            commands::add_user(&ctx, &username)?;
        }
        Commands::AddGroup {
            title,
            slug,
            description,
        } => {
            commands::add_group(&ctx, &title, &slug, description.as_deref())?;
        }
        Commands::RemoveGroup { slug } => {
            commands::remove_group(&ctx, &slug)?;
        }
        Commands::Post {
            username,
            text,
            group,
            image,
        } => {
            commands::post(&ctx, &username, &text, group.as_deref(), image.as_deref())?;
        }
        Commands::EditPost {
            username,
            id,
            text,
            group,
            no_group,
        } => {
            commands::edit_post(&ctx, &username, id, text.as_deref(), group.as_deref(), no_group)?;
        }
        Commands::RemovePost { id } => {
            commands::remove_post(&ctx, id)?;
        }
        Commands::Comment {
            username,
            post_id,
            text,
        } => {
            commands::comment(&ctx, &username, post_id, &text)?;
        }
        Commands::Follow { user, author } => {
            commands::follow(&ctx, &user, &author)?;
        }
        Commands::Unfollow { user, author } => {
            commands::unfollow(&ctx, &user, &author)?;
        }
        Commands::Feed {
            page,
            group,
            user,
            following,
            json,
        } => {
            commands::feed(
                &ctx,
                page,
                group.as_deref(),
                user.as_deref(),
                following.as_deref(),
                json,
            )?;
        }
    }

    Ok(())
}
