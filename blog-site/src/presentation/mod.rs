pub mod http_handlers;
pub mod pages;
pub mod routes;

pub use pages::SiteSettings;
