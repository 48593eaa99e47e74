//! Presentation layer: pagination and HTML rendering.
//!
//! Consumes posts extracted from an `Envelope`; never sees raw upstream
//! responses.

pub mod pagination;
pub mod render;

pub use pagination::{page_number, paginate, Page};
pub use render::render_posts_page;
