use cms_core::{format_publication_date, PostSummary};
use postlist::ListingState;

pub fn escape_html(input: &str) -> String {
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

fn post_entry(post: &PostSummary) -> String {
    let uid = post.uid.as_deref().unwrap_or("");

    let date_item = post
        .first_publication_date
        .as_deref()
        .and_then(format_publication_date)
        .map(|formatted| format!("<li><time>{}</time></li>", escape_html(&formatted)))
        .unwrap_or_default();

    format!(
        r#"<a class="post" href="/post/{uid}">
  <strong>{title}</strong>
  <p>{subtitle}</p>
  <ul>
    <li>{author}</li>
    {date_item}
  </ul>
</a>"#,
        uid = escape_html(uid),
        title = escape_html(&post.title),
        subtitle = escape_html(&post.subtitle),
        author = escape_html(&post.author),
        date_item = date_item,
    )
}

/// Inline pagination control: fetches the mapped page for the current
/// cursor, appends the new entries, and removes itself once the cursor
/// comes back null. Emitted only while a cursor exists.
fn load_more_control(next_page: &str) -> String {
    let cursor = serde_json::to_string(next_page)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c");

    format!(
        r##"<button type="button" id="load-more">Carregar mais posts</button>
<script>
  const months = ["jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez"];
  let nextPage = {cursor};

  function formatDate(raw) {{
    const date = new Date(raw);
    if (isNaN(date)) return null;
    return String(date.getUTCDate()).padStart(2, "0") + " " + months[date.getUTCMonth()] + " " + date.getUTCFullYear();
  }}

  function renderPost(post) {{
    const link = document.createElement("a");
    link.className = "post";
    link.href = "/post/" + (post.uid || "");

    const title = document.createElement("strong");
    title.textContent = post.title;
    const subtitle = document.createElement("p");
    subtitle.textContent = post.subtitle;

    const meta = document.createElement("ul");
    const author = document.createElement("li");
    author.textContent = post.author;
    meta.appendChild(author);

    const formatted = post.first_publication_date ? formatDate(post.first_publication_date) : null;
    if (formatted) {{
      const item = document.createElement("li");
      const time = document.createElement("time");
      time.textContent = formatted;
      item.appendChild(time);
      meta.appendChild(item);
    }}

    link.append(title, subtitle, meta);
    return link;
  }}

  const button = document.getElementById("load-more");
  const list = document.getElementById("posts");

  button.addEventListener("click", () => {{
    fetch("/api/posts/page?next_page=" + encodeURIComponent(nextPage))
      .then((res) => res.json())
      .then((page) => {{
        (page.results || []).forEach((post) => list.appendChild(renderPost(post)));
        nextPage = page.next_page || null;
        if (!nextPage) button.remove();
      }});
  }});
</script>"##
    )
}

pub fn listing_page(state: &ListingState) -> String {
    let entries: Vec<String> = state.posts.iter().map(post_entry).collect();

    let control = state
        .next_page
        .as_deref()
        .map(load_more_control)
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="utf-8">
    <title>space traveling</title>
</head>
<body>
    <main class="post-container">
        <header class="post-header">
            <a href="/"><img src="/images/logo.svg" alt="logo" class="logo"></a>
        </header>
        <div class="posts" id="posts">
{entries}
        </div>
        {control}
    </main>
</body>
</html>
"#,
        entries = entries.join("\n"),
        control = control,
    )
}
