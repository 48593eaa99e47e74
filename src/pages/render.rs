//! Server-side HTML for the posts page.

use crate::api::Post;
use crate::pages::pagination::Page;

const PAGE_TITLE: &str = "Posts";

/// Render the full posts listing document.
pub fn render_posts_page(page: &Page<Post>) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!doctype html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>");
    html.push_str(PAGE_TITLE);
    html.push_str("</title>\n");
    html.push_str("<link href=\"/styles.css\" rel=\"stylesheet\">\n");
    html.push_str("<style>#myModal:target { display: flex; }</style>\n");
    html.push_str("</head>\n<body>\n<div id=\"root\" class=\"px-4\">\n");

    html.push_str("<div class=\"text-center mb-8\">\n");
    html.push_str("<h1 class=\"text-3xl font-bold\">");
    html.push_str(PAGE_TITLE);
    html.push_str("</h1>\n");
    html.push_str(
        "<div class=\"my-1\"><a href=\"#myModal\" class=\"p-1 rounded text-blue-500 hover:text-blue-700\">New Post</a></div>\n",
    );
    html.push_str(&format!(
        "<h2 class=\"text-xl text-gray-500\">({} results)</h2>\n",
        page.total_items
    ));
    html.push_str("</div>\n");

    push_new_post_form(&mut html, page.total_items + 1);
    push_pagination(&mut html, page);

    html.push_str("<div class=\"grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4\">\n");
    for post in &page.items {
        push_post_card(&mut html, post);
    }
    html.push_str("</div>\n");

    push_pagination(&mut html, page);

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn push_new_post_form(html: &mut String, next_id: usize) {
    html.push_str("<div id=\"myModal\" class=\"hidden fixed top-0 left-0 w-full h-full flex items-center justify-center bg-black bg-opacity-50\">\n");
    html.push_str("<div class=\"relative\">\n");
    html.push_str("<a href=\"#\" class=\"absolute top-0 right-0 m-6 text-4xl\">&times;</a>\n");
    html.push_str("<form action=\"/\" method=\"POST\" class=\"bg-white p-6 rounded shadow-lg\">\n");
    html.push_str("<h2 class=\"text-xl font-bold mb-4\">New Post</h2>\n");
    html.push_str("<input name=\"title\" class=\"w-full mb-4 p-2 border rounded\" placeholder=\"Title\">\n");
    html.push_str("<textarea name=\"body\" class=\"w-full mb-4 p-2 border rounded\" placeholder=\"Body\"></textarea>\n");
    html.push_str(&format!(
        "<input name=\"id\" type=\"hidden\" value=\"{}\">\n",
        next_id
    ));
    html.push_str("<button type=\"submit\" class=\"w-full p-2 bg-blue-500 text-white rounded\">Submit</button>\n");
    html.push_str("</form>\n</div>\n</div>\n");
}

fn push_pagination(html: &mut String, page: &Page<Post>) {
    html.push_str("<div class=\"flex justify-center my-8\">\n");
    for number in 1..=page.total_pages {
        let active = if number == page.current_page {
            " bg-blue-500 text-white"
        } else {
            ""
        };
        html.push_str(&format!(
            "<a href=\"?page={number}\" class=\"px-3 py-2 mx-1 border rounded text-blue-500{active}\">{number}</a>\n"
        ));
    }
    html.push_str("</div>\n");
}

fn push_post_card(html: &mut String, post: &Post) {
    html.push_str("<div class=\"mb-6 bg-white shadow rounded-lg p-6\">\n");
    html.push_str("<h2 class=\"text-xl font-semibold mb-2\">");
    html.push_str(&format!(
        "<span class=\"inline-block bg-blue-500 text-white text-sm px-2 py-1 mr-2 rounded-full\">{}</span> ",
        post.id
    ));
    html.push_str(&escape_html(&capitalize_first(&post.title)));
    html.push_str("</h2>\n");
    html.push_str("<p class=\"text-gray-700\">");
    html.push_str(&escape_html(&capitalize_first(&post.body)));
    html.push_str("</p>\n</div>\n");
}

fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::pagination::paginate;

    fn post(id: u64, title: &str, body: &str) -> Post {
        Post {
            id,
            title: title.into(),
            body: body.into(),
            user_id: None,
        }
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("hello world"), "Hello world");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("élan"), "Élan");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_listing() {
        let posts = vec![post(2, "second post", "body two"), post(1, "first", "<script>")];
        let html = render_posts_page(&paginate(posts, 1, 1));

        assert!(html.contains("<title>Posts</title>"));
        assert!(html.contains("(2 results)"));
        assert!(html.contains("Second post"));
        // Only the first page's post is rendered
        assert!(!html.contains("&lt;script&gt;"));
        assert!(html.contains("name=\"id\" type=\"hidden\" value=\"3\""));
        assert!(html.contains("href=\"?page=2\""));
        assert_eq!(html.matches("bg-blue-500 text-white\">1</a>").count(), 2);
    }

    #[test]
    fn test_render_escapes_content() {
        let html = render_posts_page(&paginate(vec![post(1, "x", "<script>")], 1, 12));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_empty_listing() {
        let html = render_posts_page(&paginate(Vec::new(), 1, 12));
        assert!(html.contains("(0 results)"));
        assert!(!html.contains("?page="));
    }
}
