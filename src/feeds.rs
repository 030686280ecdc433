//! sitemap.xml and the blog RSS feed.

use crate::config::SiteConfig;
use crate::domain::blog::BlogPost;
use chrono::NaiveDateTime;

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn lastmod(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// RFC 822 date with a fixed GMT offset, as RSS readers expect.
fn rfc822(dt: NaiveDateTime) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
}

fn image_mime(url: &str) -> &'static str {
    match url.rsplit('.').next() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// The whole sitemap: fixed pages first, then listings, neighborhood
/// guides and blog posts with their last-modified dates.
pub fn sitemap_xml(
    cfg: &SiteConfig,
    properties: &[(String, NaiveDateTime)],
    neighborhoods: &[(String, NaiveDateTime)],
    posts: &[(String, NaiveDateTime)],
) -> String {
    let base = &cfg.base_url;
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );

    for path in ["/", "/imoveis", "/bairros", "/blog", "/contato", "/sobre"] {
        out.push_str(&format!(
            "  <url><loc>{}</loc></url>\n",
            xml_escape(&format!("{base}{path}"))
        ));
    }
    for (slug, updated_at) in properties {
        out.push_str(&format!(
            "  <url><loc>{}</loc><lastmod>{}</lastmod></url>\n",
            xml_escape(&format!("{base}/imoveis/{slug}")),
            lastmod(*updated_at)
        ));
    }
    for (slug, updated_at) in neighborhoods {
        out.push_str(&format!(
            "  <url><loc>{}</loc><lastmod>{}</lastmod></url>\n",
            xml_escape(&format!("{base}/bairros/{slug}")),
            lastmod(*updated_at)
        ));
    }
    for (slug, updated_at) in posts {
        out.push_str(&format!(
            "  <url><loc>{}</loc><lastmod>{}</lastmod></url>\n",
            xml_escape(&format!("{base}/blog/{slug}")),
            lastmod(*updated_at)
        ));
    }

    out.push_str("</urlset>\n");
    out
}

/// RSS 2.0 feed of the latest published posts. Excerpts go out as CDATA
/// so the editor can use punctuation freely.
pub fn blog_rss_xml(cfg: &SiteConfig, posts: &[BlogPost]) -> String {
    let base = &cfg.base_url;
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\" xmlns:content=\"http://purl.org/rss/1.0/modules/content/\">\n",
    );
    out.push_str("<channel>\n");
    out.push_str(&format!(
        "  <title>{}</title>\n",
        xml_escape(&format!("Blog | {}", cfg.site_name))
    ));
    out.push_str(&format!("  <link>{}</link>\n", xml_escape(&format!("{base}/blog"))));
    out.push_str(&format!(
        "  <description>{}</description>\n",
        xml_escape(&cfg.site_description)
    ));
    out.push_str("  <language>pt-br</language>\n");
    out.push_str(&format!(
        "  <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        xml_escape(&format!("{base}/blog/rss.xml"))
    ));

    for post in posts {
        let link = format!("{base}/blog/{}", post.slug);
        out.push_str("  <item>\n");
        out.push_str(&format!("    <title>{}</title>\n", xml_escape(&post.title)));
        out.push_str(&format!("    <link>{}</link>\n", xml_escape(&link)));
        out.push_str(&format!(
            "    <guid isPermaLink=\"true\">{}</guid>\n",
            xml_escape(&link)
        ));
        out.push_str(&format!(
            "    <description><![CDATA[{}]]></description>\n",
            post.excerpt.replace("]]>", "]]&gt;")
        ));
        out.push_str(&format!(
            "    <content:encoded><![CDATA[{}]]></content:encoded>\n",
            post.content.replace("]]>", "]]&gt;")
        ));
        out.push_str(&format!("    <author>{}</author>\n", xml_escape(&post.author)));
        out.push_str(&format!(
            "    <category>{}</category>\n",
            xml_escape(post.category.label())
        ));
        if let Some(published_at) = post.published_at {
            out.push_str(&format!("    <pubDate>{}</pubDate>\n", rfc822(published_at)));
        }
        if let Some(cover) = &post.cover_image {
            let url = if cover.starts_with("http") {
                cover.clone()
            } else {
                format!("{base}{cover}")
            };
            out.push_str(&format!(
                "    <enclosure url=\"{}\" type=\"{}\" length=\"0\"/>\n",
                xml_escape(&url),
                image_mime(cover)
            ));
        }
        out.push_str("  </item>\n");
    }

    out.push_str("</channel>\n</rss>\n");
    out
}
