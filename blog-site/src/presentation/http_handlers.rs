use crate::application::BlogService;
use crate::domain::comment::CommentForm;
use crate::domain::DomainError;
use crate::presentation::pages::{ErrorPage, PostDetailPage, PostListPage, SiteSettings};
use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{web, HttpResponse};
use askama::Template;
use std::sync::Arc;

#[derive(Debug, serde::Deserialize)]
pub struct PostPath {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub slug: String,
}

pub(crate) fn html<T: Template>(status: StatusCode, page: &T) -> HttpResponse {
    match page.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(body),
        Err(e) => {
            tracing::error!("Failed to render template: {}", e);
            HttpResponse::InternalServerError()
                .content_type(ContentType::plaintext())
                .body("Internal server error")
        }
    }
}

// Преобразование DomainError в HTML-страницу ошибки
pub(crate) fn error_to_response(err: DomainError) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.to_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let (title, message) = if status == StatusCode::NOT_FOUND {
        (
            "Page not found",
            "The page you are looking for does not exist.".to_string(),
        )
    } else if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
        (
            "Server error",
            "Something went wrong on our side. Please try again later.".to_string(),
        )
    } else {
        ("Bad request", err.to_string())
    };

    html(
        status,
        &ErrorPage {
            status: status.as_u16(),
            title,
            message: &message,
        },
    )
}

// ============== Post Handlers ==============

pub async fn post_list(blog_service: web::Data<Arc<BlogService>>) -> HttpResponse {
    match blog_service.list_published_posts().await {
        Ok(posts) => {
            tracing::debug!("Listing {} published posts", posts.len());
            html(StatusCode::OK, &PostListPage { posts })
        }
        Err(err) => error_to_response(err),
    }
}

pub async fn post_detail(
    blog_service: web::Data<Arc<BlogService>>,
    settings: web::Data<SiteSettings>,
    path: web::Path<PostPath>,
) -> HttpResponse {
    render_detail(&blog_service, &settings, path.into_inner(), None).await
}

pub async fn post_comment(
    blog_service: web::Data<Arc<BlogService>>,
    settings: web::Data<SiteSettings>,
    path: web::Path<PostPath>,
    form: Result<web::Form<CommentForm>, actix_web::Error>,
) -> HttpResponse {
    let path = path.into_inner();
    match form {
        Ok(form) => render_detail(&blog_service, &settings, path, Some(form.into_inner())).await,
        // Неизвестный пост важнее битого тела запроса
        Err(form_err) => match blog_service
            .find_post(path.year, path.month, path.day, &path.slug)
            .await
        {
            Ok(_) => form_err.error_response(),
            Err(err) => error_to_response(err),
        },
    }
}

async fn render_detail(
    blog_service: &BlogService,
    settings: &SiteSettings,
    path: PostPath,
    submission: Option<CommentForm>,
) -> HttpResponse {
    tracing::info!(
        "Getting post {}/{}/{}/{} (comment submitted: {})",
        path.year,
        path.month,
        path.day,
        path.slug,
        submission.is_some()
    );

    match blog_service
        .post_detail(path.year, path.month, path.day, &path.slug, submission)
        .await
    {
        Ok(detail) => html(StatusCode::OK, &PostDetailPage::new(detail, settings)),
        Err(err) => error_to_response(err),
    }
}

pub async fn not_found() -> HttpResponse {
    error_to_response(DomainError::PostNotFound)
}
