use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;

use blog_site::application::BlogService;
use blog_site::data::{PostgresCommentRepository, PostgresPostRepository};
use blog_site::infrastructure::{
    database::{create_pool, run_migrations},
    logging::init_logging,
    AppConfig,
};
use blog_site::presentation::{routes, SiteSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    init_logging();

    let config = AppConfig::from_env()?;
    let http_addr = config.http_addr();

    tracing::info!("Starting blog site...");
    tracing::info!("HTTP server will listen on {}", http_addr);

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let pool = create_pool(&config.database_url, config.database_max_connections).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    run_migrations(&pool).await?;

    // Repositories
    let post_repo = Arc::new(PostgresPostRepository::new(pool.clone()));
    let comment_repo = Arc::new(PostgresCommentRepository::new(pool.clone()));

    // Application services
    let blog_service = Arc::new(BlogService::new(post_repo, comment_repo));
    let settings = SiteSettings {
        media_url: config.media_url.clone(),
    };

    tracing::info!("Services initialized successfully");

    run_http_server(http_addr, blog_service, settings).await?;

    tracing::info!("Shutting down...");
    Ok(())
}

async fn run_http_server(
    addr: String,
    blog_service: Arc<BlogService>,
    settings: SiteSettings,
) -> anyhow::Result<()> {
    use actix_web::middleware::{Logger, NormalizePath, TrailingSlash};
    use actix_web::{web, App, HttpServer};

    tracing::info!("Configuring HTTP server...");

    let server = HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::new(TrailingSlash::Always))
            .wrap(Logger::default())
            .app_data(web::Data::new(blog_service.clone()))
            .app_data(web::Data::new(settings.clone()))
            .configure(routes::configure)
    })
    .bind(&addr)
    .with_context(|| format!("Failed to bind {}", addr))?
    .run();

    tracing::info!("HTTP server running on {}", addr);

    server.await?;

    Ok(())
}
