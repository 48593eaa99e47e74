//! Route handlers for the posts page.
//!
//! Handlers only branch on `Envelope::success`; a failed upstream call
//! renders an empty listing instead of an error page.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Html,
    Form,
};
use serde::Deserialize;

use crate::api::posts::{post_from, posts_from, NewPost, Post};
use crate::api::Transport;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::pages::{page_number, paginate, render_posts_page};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

/// Fields of the "New Post" form.
#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub id: String,
}

impl From<PostForm> for NewPost {
    fn from(form: PostForm) -> Self {
        NewPost {
            title: form.title,
            body: form.body,
            id: form.id.trim().parse().ok(),
        }
    }
}

/// `GET /?page=N`
pub async fn list_posts<T: Transport + 'static>(
    State(state): State<AppState<T>>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let page = page_number(query.page.as_deref());
    let listed = state.api.list_posts().await;

    let posts = if listed.success {
        posts_from(&listed.data)
    } else {
        tracing::warn!(
            request_id = %request_id(&headers),
            status = listed.status,
            message = ?listed.message,
            "Could not load posts"
        );
        Vec::new()
    };

    metrics::record_page_render("list", listed.success);
    Html(render_listing(posts, page, state.per_page))
}

/// `POST /` with the new post form.
pub async fn create_post<T: Transport + 'static>(
    State(state): State<AppState<T>>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
    Form(form): Form<PostForm>,
) -> Html<String> {
    let req_id = request_id(&headers);
    let page = page_number(query.page.as_deref());
    let new_post = NewPost::from(form);

    let saved = state.api.save_post(&new_post).await;
    if saved.success {
        tracing::info!(request_id = %req_id, status = saved.status, "Post saved");
    } else {
        tracing::warn!(
            request_id = %req_id,
            status = saved.status,
            message = ?saved.message,
            "Saving post failed"
        );
    }

    let listed = state.api.list_posts().await;
    let mut posts = if listed.success {
        posts_from(&listed.data)
    } else {
        Vec::new()
    };

    if listed.success && saved.success {
        match post_from(&saved.data) {
            Some(post) => posts.push(post),
            None => tracing::debug!(request_id = %req_id, "Saved post payload is not a post"),
        }
    }

    metrics::record_page_render("create", listed.success && saved.success);
    Html(render_listing(posts, page, state.per_page))
}

/// Newest first, then sliced to the requested page.
fn render_listing(mut posts: Vec<Post>, page: usize, per_page: usize) -> String {
    posts.reverse();
    render_posts_page(&paginate(posts, page, per_page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_into_new_post() {
        let post = NewPost::from(PostForm {
            title: "t".into(),
            body: "b".into(),
            id: " 101 ".into(),
        });
        assert_eq!(post.id, Some(101));

        let post = NewPost::from(PostForm::default());
        assert_eq!(post.id, None);
        assert_eq!(post.title, "");
    }

    #[test]
    fn test_render_listing_newest_first() {
        let posts = (1..=3)
            .map(|id| Post {
                id,
                title: format!("post {id}"),
                body: String::new(),
                user_id: None,
            })
            .collect();

        let html = render_listing(posts, 1, 12);
        let third = html.find("Post 3").unwrap();
        let first = html.find("Post 1").unwrap();
        assert!(third < first);
    }
}
