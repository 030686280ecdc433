use crate::domain::blog::{BlogCategory, BlogPost, BlogPostSummary, FaqEntry, NewBlogPost};
use crate::errors::ServerError;
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

fn summary_from_row(row: &Row) -> rusqlite::Result<BlogPostSummary> {
    let category: String = row.get("category")?;
    Ok(BlogPostSummary {
        id: row.get("id")?,
        slug: row.get("slug")?,
        title: row.get("title")?,
        excerpt: row.get("excerpt")?,
        category: BlogCategory::parse(&category).unwrap_or(BlogCategory::MercadoImobiliario),
        cover_image: row.get("cover_image")?,
        author: row.get("author")?,
        reading_time: row.get("reading_time")?,
        published: row.get("published")?,
        published_at: row.get("published_at")?,
    })
}

fn post_from_row(row: &Row) -> rusqlite::Result<BlogPost> {
    let category: String = row.get("category")?;
    let keywords_json: String = row.get("keywords")?;
    let faq_json: String = row.get("faq")?;
    let keywords: Vec<String> = serde_json::from_str(&keywords_json).unwrap_or_default();
    let faq: Vec<FaqEntry> = serde_json::from_str(&faq_json).unwrap_or_default();

    Ok(BlogPost {
        id: row.get("id")?,
        slug: row.get("slug")?,
        title: row.get("title")?,
        excerpt: row.get("excerpt")?,
        content: row.get("content")?,
        category: BlogCategory::parse(&category).unwrap_or(BlogCategory::MercadoImobiliario),
        cover_image: row.get("cover_image")?,
        meta_title: row.get("meta_title")?,
        meta_description: row.get("meta_description")?,
        keywords,
        canonical_url: row.get("canonical_url")?,
        og_image: row.get("og_image")?,
        author: row.get("author")?,
        author_bio: row.get("author_bio")?,
        reading_time: row.get("reading_time")?,
        faq,
        featured: row.get("featured")?,
        published: row.get("published")?,
        published_at: row.get("published_at")?,
        views: row.get("views")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Published posts, newest first, optionally narrowed by category or a
/// title/excerpt search.
pub fn list_published(
    conn: &Connection,
    category: Option<BlogCategory>,
    search: Option<&str>,
) -> Result<Vec<BlogPostSummary>, ServerError> {
    let mut sql = String::from(
        "SELECT id, slug, title, excerpt, category, cover_image, author,
                reading_time, published, published_at
         FROM blog_posts WHERE published = 1",
    );
    let mut values: Vec<Value> = Vec::new();

    if let Some(category) = category {
        sql.push_str(" AND category = ?");
        values.push(Value::from(category.as_str().to_string()));
    }
    if let Some(search) = search {
        sql.push_str(" AND (title LIKE ? OR excerpt LIKE ?)");
        let pattern = format!("%{search}%");
        values.push(Value::from(pattern.clone()));
        values.push(Value::from(pattern));
    }
    sql.push_str(" ORDER BY published_at DESC LIMIT 50");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), summary_from_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

const POST_SELECT: &str =
    "SELECT id, slug, title, excerpt, content, category, cover_image, meta_title,
            meta_description, keywords, canonical_url, og_image, author, author_bio,
            reading_time, faq, featured, published, published_at, views, updated_at
     FROM blog_posts";

pub fn find_published_by_slug(
    conn: &Connection,
    slug: &str,
) -> Result<Option<BlogPost>, ServerError> {
    let sql = format!("{POST_SELECT} WHERE slug = ? AND published = 1");
    Ok(conn.query_row(&sql, params![slug], post_from_row).optional()?)
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<BlogPost>, ServerError> {
    let sql = format!("{POST_SELECT} WHERE id = ?");
    Ok(conn.query_row(&sql, params![id], post_from_row).optional()?)
}

pub fn record_view(conn: &Connection, id: i64) -> Result<(), ServerError> {
    conn.execute("UPDATE blog_posts SET views = views + 1 WHERE id = ?", params![id])?;
    Ok(())
}

fn slug_taken(conn: &Connection, slug: &str, exclude_id: Option<i64>) -> Result<bool, ServerError> {
    let found: Option<i64> = match exclude_id {
        Some(id) => conn
            .query_row(
                "SELECT id FROM blog_posts WHERE slug = ?1 AND id != ?2",
                params![slug, id],
                |r| r.get(0),
            )
            .optional()?,
        None => conn
            .query_row("SELECT id FROM blog_posts WHERE slug = ?", params![slug], |r| r.get(0))
            .optional()?,
    };
    Ok(found.is_some())
}

/// Insert a post. The author supplies the slug; a collision is rejected
/// rather than auto-suffixed so published URLs stay deliberate.
pub fn insert(
    conn: &Connection,
    new: &NewBlogPost,
    now: NaiveDateTime,
) -> Result<i64, ServerError> {
    if slug_taken(conn, &new.slug, None)? {
        return Err(ServerError::BadRequest("Já existe um post com esse slug".into()));
    }

    conn.execute(
        r#"
        INSERT INTO blog_posts (
            slug, title, excerpt, content, category, cover_image, meta_title,
            meta_description, keywords, canonical_url, og_image, author, author_bio,
            reading_time, faq, featured, published, published_at, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                  ?16, ?17, ?18, ?19, ?19)
        "#,
        params![
            new.slug,
            new.title,
            new.excerpt,
            new.content,
            new.category.as_str(),
            new.cover_image,
            new.meta_title,
            new.meta_description,
            serde_json::to_string(&new.keywords).unwrap_or_else(|_| "[]".into()),
            new.canonical_url,
            new.og_image,
            new.author,
            new.author_bio,
            new.reading_time,
            serde_json::to_string(&new.faq).unwrap_or_else(|_| "[]".into()),
            new.featured,
            new.published,
            new.published_at,
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(
    conn: &Connection,
    id: i64,
    new: &NewBlogPost,
    now: NaiveDateTime,
) -> Result<(), ServerError> {
    if slug_taken(conn, &new.slug, Some(id))? {
        return Err(ServerError::BadRequest("Já existe um post com esse slug".into()));
    }

    let changed = conn.execute(
        r#"
        UPDATE blog_posts SET
            slug = ?1, title = ?2, excerpt = ?3, content = ?4, category = ?5,
            cover_image = ?6, meta_title = ?7, meta_description = ?8, keywords = ?9,
            canonical_url = ?10, og_image = ?11, author = ?12, author_bio = ?13,
            reading_time = ?14, faq = ?15, featured = ?16, published = ?17,
            published_at = ?18, updated_at = ?19
        WHERE id = ?20
        "#,
        params![
            new.slug,
            new.title,
            new.excerpt,
            new.content,
            new.category.as_str(),
            new.cover_image,
            new.meta_title,
            new.meta_description,
            serde_json::to_string(&new.keywords).unwrap_or_else(|_| "[]".into()),
            new.canonical_url,
            new.og_image,
            new.author,
            new.author_bio,
            new.reading_time,
            serde_json::to_string(&new.faq).unwrap_or_else(|_| "[]".into()),
            new.featured,
            new.published,
            new.published_at,
            now,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let changed = conn.execute("DELETE FROM blog_posts WHERE id = ?", params![id])?;
    if changed == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

/// Latest published posts for the RSS feed.
pub fn recent_for_feed(conn: &Connection, limit: i64) -> Result<Vec<BlogPost>, ServerError> {
    let sql = format!("{POST_SELECT} WHERE published = 1 ORDER BY published_at DESC LIMIT ?");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![limit], post_from_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// All posts for the back-office table, drafts included.
pub fn admin_list(conn: &Connection) -> Result<Vec<BlogPostSummary>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT id, slug, title, excerpt, category, cover_image, author,
                reading_time, published, published_at
         FROM blog_posts ORDER BY updated_at DESC",
    )?;
    let rows = stmt.query_map([], summary_from_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// (slug, updated_at) pairs for the sitemap.
pub fn sitemap_entries(conn: &Connection) -> Result<Vec<(String, NaiveDateTime)>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT slug, updated_at FROM blog_posts WHERE published = 1 ORDER BY updated_at DESC",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn count(conn: &Connection, published_only: bool) -> Result<i64, ServerError> {
    let sql = if published_only {
        "SELECT COUNT(*) FROM blog_posts WHERE published = 1"
    } else {
        "SELECT COUNT(*) FROM blog_posts"
    };
    Ok(conn.query_row(sql, [], |r| r.get(0))?)
}
