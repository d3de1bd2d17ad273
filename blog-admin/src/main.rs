use anyhow::{Context, Result};
use blog_site::application::EditorService;
use blog_site::data::{PostgresAuthorRepository, PostgresCommentRepository, PostgresPostRepository};
use blog_site::domain::author::NewAuthor;
use blog_site::domain::post::NewPost;
use blog_site::domain::{DomainError, Post, PostStatus};
use blog_site::infrastructure::database::{create_pool, run_migrations};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Overrides DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    AddAuthor {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, default_value = "")]
        email: String,
    },

    CreatePost {
        /// Username of the author
        #[arg(short, long)]
        author: String,

        #[arg(short, long)]
        title: String,

        #[arg(long, default_value = "")]
        subtitle: String,

        /// Derived from the title when omitted
        #[arg(long)]
        slug: Option<String>,

        /// Image path below MEDIA_URL
        #[arg(long, default_value = "")]
        image: String,

        #[arg(short, long, required_unless_present = "body_file", conflicts_with = "body_file")]
        body: Option<String>,

        #[arg(long)]
        body_file: Option<PathBuf>,

        /// RFC 3339 timestamp, defaults to now
        #[arg(long)]
        publish_at: Option<DateTime<Utc>>,

        /// Publish immediately instead of saving a draft
        #[arg(long)]
        published: bool,
    },

    Publish {
        #[arg(short, long)]
        id: i64,
    },

    Unpublish {
        #[arg(short, long)]
        id: i64,
    },

    /// Delete a post and all of its comments
    DeletePost {
        #[arg(short, long)]
        id: i64,
    },

    ListPosts,

    /// All comments of a post, hidden ones included
    ListComments {
        #[arg(short, long)]
        post_id: i64,
    },

    HideComment {
        #[arg(short, long)]
        id: i64,
    },

    ShowComment {
        #[arg(short, long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = match cli.database_url {
        Some(url) => url,
        None => std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
    };

    let pool = create_pool(&database_url, 1).await?;

    if let Commands::Migrate = cli.command {
        run_migrations(&pool).await?;
        println!("{} Migrations applied", "✅".green());
        return Ok(());
    }

    let editor = EditorService::new(
        Arc::new(PostgresAuthorRepository::new(pool.clone())),
        Arc::new(PostgresPostRepository::new(pool.clone())),
        Arc::new(PostgresCommentRepository::new(pool)),
    );

    if let Err(e) = execute(&editor, cli.command).await {
        println!("{} {:#}", "❌".red(), e);
        if let Some(err) = e.downcast_ref::<DomainError>() {
            if err.is_not_found() {
                println!("   Tip: Use 'list-posts' to see available posts");
            }
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn execute(editor: &EditorService, command: Commands) -> Result<()> {
    match command {
        Commands::Migrate => {}

        Commands::AddAuthor { username, email } => {
            let author = editor.register_author(NewAuthor { username, email }).await?;
            println!("{} Author created", "✅".green());
            println!("   ID: {}", author.id);
            println!("   Username: {}", author.username);
        }

        Commands::CreatePost {
            author,
            title,
            subtitle,
            slug,
            image,
            body,
            body_file,
            publish_at,
            published,
        } => {
            let author = editor.find_author(&author).await?;
            let body = read_body(body, body_file)?;
            let status = if published {
                PostStatus::Published
            } else {
                PostStatus::Draft
            };

            let post = editor
                .create_post(NewPost {
                    author_id: author.id,
                    title,
                    subtitle,
                    slug,
                    image,
                    body,
                    publish: publish_at,
                    status,
                })
                .await?;

            println!("{} Post created", "✅".green());
            print_post(&post);
        }

        Commands::Publish { id } => {
            let post = editor.set_status(id, PostStatus::Published).await?;
            println!("{} Post published", "✅".green());
            print_post(&post);
        }

        Commands::Unpublish { id } => {
            let post = editor.set_status(id, PostStatus::Draft).await?;
            println!("{} Post moved back to drafts", "✅".green());
            print_post(&post);
        }

        Commands::DeletePost { id } => {
            editor.delete_post(id).await?;
            println!("{} Post #{} and its comments deleted", "🗑️".green(), id);
        }

        Commands::ListPosts => {
            let posts = editor.list_posts().await?;
            println!("📋 {} posts", posts.len());
            for post in &posts {
                let status = match post.status {
                    PostStatus::Published => post.status.as_str().green(),
                    PostStatus::Draft => post.status.as_str().yellow(),
                };
                println!(
                    "   [{}] {} ({}) {}",
                    post.id,
                    post.title.bold(),
                    status,
                    post.absolute_url()
                );
            }
        }

        Commands::ListComments { post_id } => {
            let comments = editor.list_comments(post_id).await?;
            println!("💬 {} comments on post #{}", comments.len(), post_id);
            for comment in &comments {
                let state = if comment.active {
                    "visible".green()
                } else {
                    "hidden".red()
                };
                println!(
                    "   [{}] {} <{}> ({}) {}",
                    comment.id,
                    comment.name,
                    comment.email,
                    state,
                    truncate(&comment.body, 50)
                );
            }
        }

        Commands::HideComment { id } => {
            editor.set_comment_active(id, false).await?;
            println!("{} Comment #{} hidden", "✅".green(), id);
        }

        Commands::ShowComment { id } => {
            editor.set_comment_active(id, true).await?;
            println!("{} Comment #{} visible", "✅".green(), id);
        }
    }

    Ok(())
}

fn read_body(body: Option<String>, body_file: Option<PathBuf>) -> Result<String> {
    match (body, body_file) {
        (Some(body), _) => Ok(body),
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read body from {:?}", path)),
        (None, None) => anyhow::bail!("Either --body or --body-file is required"),
    }
}

fn print_post(post: &Post) {
    println!("   ID: {}", post.id);
    println!("   Title: {}", post.title);
    println!("   Slug: {}", post.slug);
    println!("   Author: {}", post.author);
    println!("   Status: {}", post.status);
    println!("   Publish: {}", post.publish);
    println!("   URL: {}", post.absolute_url());
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
