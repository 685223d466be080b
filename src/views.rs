use crate::config::constants::MAX_FILES_PER_UPLOAD;
use crate::models::{CategorizedListing, Category, Notice};
use std::fmt::Write;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem;color:#2c3e50}
h1{font-size:1.6rem}
form{border:2px dashed #bdc3c7;border-radius:8px;padding:1.5rem;margin-bottom:2rem}
.notice{padding:.6rem 1rem;border-radius:6px;margin:.4rem 0}
.success{background:#e8f8f0;color:#1e8449}
.warning{background:#fef5e7;color:#b9770e}
.error{background:#fdedec;color:#c0392b}
section{margin-bottom:1.5rem}
h2{font-size:1.1rem;border-bottom:1px solid #ecf0f1;padding-bottom:.3rem}
ul{list-style:none;padding:0;display:flex;flex-wrap:wrap;gap:.75rem}
li{max-width:180px;word-break:break-all;font-size:.85rem}
img{display:block;max-width:160px;max-height:120px;border-radius:4px}
.empty{color:#95a5a6;font-size:.85rem}";

/// Full page for `GET /`: upload form, pending notices, then one section per
/// category.
pub fn index_page(listing: &CategorizedListing, notices: &[Notice]) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>File upload</title>\n");
    let _ = writeln!(html, "<style>\n{STYLE}\n</style>\n</head>\n<body>");
    html.push_str("<h1>File upload</h1>\n");

    for notice in notices {
        let _ = writeln!(
            html,
            "<div class=\"notice {}\">{}</div>",
            notice.level(),
            escape_html(&notice.message())
        );
    }

    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n\
         <p>Choose up to {MAX_FILES_PER_UPLOAD} files</p>\n\
         <input type=\"file\" name=\"files\" multiple>\n\
         <button type=\"submit\">Upload</button>\n\
         </form>"
    );

    for category in Category::ALL {
        render_bucket(&mut html, category, listing.bucket(category));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_bucket(html: &mut String, category: Category, names: &[String]) {
    let _ = writeln!(
        html,
        "<section id=\"{category}\">\n<h2>{} ({})</h2>",
        category.label(),
        names.len()
    );

    if names.is_empty() {
        html.push_str("<p class=\"empty\">No files</p>\n</section>\n");
        return;
    }

    html.push_str("<ul>\n");
    for name in names {
        let href = format!("/uploads/{}", urlencoding::encode(name));
        let href = escape_html(&href);
        let label = escape_html(name);
        if category == Category::Images {
            let _ = writeln!(
                html,
                "<li><a href=\"{href}\"><img src=\"{href}\" alt=\"{label}\" loading=\"lazy\">{label}</a></li>"
            );
        } else {
            let _ = writeln!(html, "<li><a href=\"{href}\">{label}</a></li>");
        }
    }
    html.push_str("</ul>\n</section>\n");
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">'&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_index_page() {
        let mut listing = CategorizedListing::new();
        listing.push("a.png".to_string());
        listing.push("<b>.txt".to_string());

        let html = index_page(&listing, &[Notice::Uploaded(2)]);

        assert!(html.contains("2 files uploaded successfully"));
        assert!(html.contains("class=\"notice success\""));
        assert!(html.contains("<img src=\"/uploads/a.png\""));
        assert!(html.contains("/uploads/%3Cb%3E.txt"));
        assert!(html.contains("&lt;b&gt;.txt"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("name=\"files\" multiple"));
        for category in Category::ALL {
            assert!(html.contains(&format!("<section id=\"{category}\">")));
        }
    }
}
