//! Posts resource of the upstream API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::ApiClient;
use crate::api::envelope::Envelope;
use crate::api::transport::{ApiRequest, Transport};

pub const POSTS_PATH: &str = "/posts";

/// A post as returned by the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// A post submitted through the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl<T: Transport> ApiClient<T> {
    /// `GET /posts`
    pub async fn list_posts(&self) -> Envelope {
        self.run(ApiRequest::get(POSTS_PATH)).await
    }

    /// `POST /posts`
    pub async fn save_post(&self, post: &NewPost) -> Envelope {
        let body = serde_json::json!({
            "title": post.title,
            "body": post.body,
            "id": post.id,
        });
        self.run(ApiRequest::post(POSTS_PATH).with_json(body)).await
    }
}

/// Posts held in an envelope payload, in upstream order.
///
/// Arrays yield their items, objects their values. Object values come back
/// in property order: index-like keys ascending, then the remaining keys as
/// received. Entries that are not posts are skipped.
pub fn posts_from(data: &Value) -> Vec<Post> {
    let entries: Vec<&Value> = match data {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => {
            let mut indexed: Vec<(u32, &Value)> = Vec::new();
            let mut named: Vec<&Value> = Vec::new();
            for (key, value) in map {
                match index_key(key) {
                    Some(index) => indexed.push((index, value)),
                    None => named.push(value),
                }
            }
            indexed.sort_by_key(|(index, _)| *index);
            indexed.into_iter().map(|(_, value)| value).chain(named).collect()
        }
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Post>(entry.clone()) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed post entry");
                None
            }
        })
        .collect()
}

/// Canonical array-index key: decimal, no leading zeros, below `u32::MAX`.
fn index_key(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}

/// A single post payload, as returned by a save.
pub fn post_from(data: &Value) -> Option<Post> {
    serde_json::from_value(data.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_posts_from_array() {
        let data = json!([
            {"userId": 1, "id": 1, "title": "first", "body": "a"},
            {"userId": 1, "id": 2, "title": "second", "body": "b"},
        ]);
        let posts = posts_from(&data);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[1].title, "second");
        assert_eq!(posts[0].user_id, Some(1));
    }

    #[test]
    fn test_posts_from_skips_non_posts() {
        let data = json!([{"id": 1, "title": "ok"}, "junk", {"title": "no id"}]);
        let posts = posts_from(&data);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].body, "");
    }

    #[test]
    fn test_posts_from_object_values() {
        let data = json!({"a": {"id": 5, "title": "t", "body": "b"}});
        assert_eq!(posts_from(&data)[0].id, 5);
        assert!(posts_from(&json!("text")).is_empty());
    }

    #[test]
    fn test_posts_from_object_keeps_property_order() {
        let data: Value = serde_json::from_str(
            r#"{"b": {"id": 2}, "a": {"id": 1}, "10": {"id": 10}, "9": {"id": 9}}"#,
        )
        .unwrap();
        let ids: Vec<u64> = posts_from(&data).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9, 10, 2, 1]);
    }

    #[test]
    fn test_index_key() {
        assert_eq!(index_key("0"), Some(0));
        assert_eq!(index_key("42"), Some(42));
        assert_eq!(index_key("007"), None);
        assert_eq!(index_key("-1"), None);
        assert_eq!(index_key("+3"), None);
        assert_eq!(index_key("4294967295"), None);
        assert_eq!(index_key("title"), None);
    }

    #[test]
    fn test_post_from_saved_payload() {
        let saved = post_from(&json!({"id": 101, "title": "hi", "body": "there"})).unwrap();
        assert_eq!(saved.id, 101);
        assert_eq!(saved.user_id, None);
        assert!(post_from(&json!({})).is_none());
    }
}
