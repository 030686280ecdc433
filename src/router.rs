use crate::auth::{self, magic::MagicLinkConfig, magic::MagicLinkService, sessions};
use crate::config::SiteConfig;
use crate::db::{amenities, blog, leads, locations, properties, Database};
use crate::domain::blog::BlogCategory;
use crate::domain::lead::utm_from_referer;
use crate::errors::ServerError;
use crate::feeds;
use crate::forms::{self, FormData};
use crate::responses::{
    file_response, html_response, json_response, redirect, redirect_with_cookie, xml_response,
    ResultResp,
};
use crate::spreadsheets::export_leads::export_leads_xlsx;
use crate::templates::pages;
use crate::uploads::{self, UploadKind};
use astra::{Body, Request};
use serde_json::json;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

const NEARBY_PROPERTIES_RADIUS_M: f64 = 2_000.0;
const NEARBY_NEIGHBORHOODS_RADIUS_M: f64 = 3_000.0;

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

fn now_naive() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// Read a request body with a hard cap. One byte over the limit aborts
/// instead of buffering an arbitrarily large upload.
fn read_body(mut body: Body, limit: usize) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    body.reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("falha ao ler corpo: {e}")))?;
    if buf.len() > limit {
        return Err(ServerError::BadRequest("corpo da requisição muito grande".into()));
    }
    Ok(buf)
}

fn header<'r>(req: &'r Request, name: &str) -> Option<&'r str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

pub fn handle(req: Request, db: &Database, cfg: &SiteConfig) -> ResultResp {
    let is_admin_path = req.uri().path().starts_with("/admin");

    match route(req, db, cfg) {
        // browser flows land on the login page instead of a bare 401
        Err(ServerError::Unauthorized(_)) if is_admin_path => redirect("/login"),
        other => other,
    }
}

fn route(req: Request, db: &Database, cfg: &SiteConfig) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or("").to_string();

    match (method.as_str(), path.as_str()) {
        // ---- public pages ----
        ("GET", "/") => home(db, cfg),
        ("GET", "/imoveis") => property_list(db, cfg, &query),
        ("GET", p) if p.starts_with("/imoveis/") => {
            property_detail(db, cfg, p.trim_start_matches("/imoveis/"))
        }
        ("GET", "/bairros") => neighborhood_list(db, cfg),
        ("GET", p) if p.starts_with("/bairros/") => {
            neighborhood_detail(db, cfg, p.trim_start_matches("/bairros/"))
        }
        ("GET", "/blog") => blog_list(db, cfg, &query),
        ("GET", "/blog/rss.xml") => blog_rss(db, cfg),
        ("GET", p) if p.starts_with("/blog/") => {
            blog_post(db, cfg, p.trim_start_matches("/blog/"))
        }
        ("GET", "/contato") => {
            let sent = forms::query_param(&query, "enviado").is_some();
            html_response(pages::institutional::contact_page(cfg, sent))
        }
        ("GET", "/sobre") => html_response(pages::institutional::about_page(cfg)),
        ("GET", "/politica-de-privacidade") => {
            html_response(pages::institutional::privacy_page(cfg))
        }
        ("GET", "/sitemap.xml") => sitemap(db, cfg),
        ("GET", "/robots.txt") => robots(cfg),

        // ---- static assets and uploaded images ----
        ("GET", p) if p.starts_with("/static/") => {
            file_response("static", p.trim_start_matches("/static"))
        }
        ("GET", p) if p.starts_with("/uploads/") => {
            file_response(&cfg.upload_dir, p.trim_start_matches("/uploads"))
        }

        // ---- public APIs ----
        ("POST", "/api/leads") => create_lead(req, db),
        ("GET", "/api/localidades") => localidades(db, &query),

        // ---- auth ----
        ("GET", "/login") => html_response(pages::institutional::login_page(None, false)),
        ("POST", "/auth/magic/request") => magic_request(req, db, cfg),
        ("GET", "/auth/magic") => magic_redeem(db, cfg, &query),
        ("POST", "/logout") => logout(req, db),

        // ---- admin ----
        ("GET", "/admin") => admin_dashboard(&req, db),
        ("GET", "/admin/imoveis") => admin_property_list(&req, db),
        ("GET", "/admin/imoveis/novo") => admin_property_new(&req, db),
        ("POST", "/admin/imoveis") => admin_property_create(req, db),
        ("GET", p)
            if p.starts_with("/admin/imoveis/") && p.ends_with("/editar") =>
        {
            let id = admin_id(p, "/admin/imoveis/", "/editar")?;
            admin_property_edit(&req, db, id)
        }
        ("POST", p)
            if p.starts_with("/admin/imoveis/") && p.ends_with("/excluir") =>
        {
            let id = admin_id(p, "/admin/imoveis/", "/excluir")?;
            admin_property_delete(&req, db, id)
        }
        ("POST", p) if p.starts_with("/admin/imoveis/") => {
            let id = admin_id(p, "/admin/imoveis/", "")?;
            admin_property_update(req, db, id)
        }
        ("GET", "/admin/blog") => admin_blog_list(&req, db),
        ("GET", "/admin/blog/novo") => admin_blog_new(&req, db),
        ("POST", "/admin/blog") => admin_blog_create(req, db),
        ("GET", p) if p.starts_with("/admin/blog/") && p.ends_with("/editar") => {
            let id = admin_id(p, "/admin/blog/", "/editar")?;
            admin_blog_edit(&req, db, id)
        }
        ("POST", p) if p.starts_with("/admin/blog/") && p.ends_with("/excluir") => {
            let id = admin_id(p, "/admin/blog/", "/excluir")?;
            admin_blog_delete(&req, db, id)
        }
        ("POST", p) if p.starts_with("/admin/blog/") => {
            let id = admin_id(p, "/admin/blog/", "")?;
            admin_blog_update(req, db, id)
        }
        ("GET", "/admin/leads") => admin_leads(&req, db),
        ("GET", "/admin/leads/export.xlsx") => admin_leads_export(&req, db),
        ("POST", "/api/upload") => upload(req, db, cfg, &query),

        _ => Err(ServerError::NotFound),
    }
}

fn admin_id(path: &str, prefix: &str, suffix: &str) -> Result<i64, ServerError> {
    path.trim_start_matches(prefix)
        .trim_end_matches(suffix)
        .parse::<i64>()
        .map_err(|_| ServerError::NotFound)
}

// ---- public handlers ----

fn home(db: &Database, cfg: &SiteConfig) -> ResultResp {
    let featured = db.with_conn(|conn| properties::featured(conn, 6))?;
    let posts = db.with_conn(|conn| blog::list_published(conn, None, None))?;
    let recent: Vec<_> = posts.into_iter().take(3).collect();
    html_response(pages::home::home_page(cfg, &featured, &recent))
}

fn property_list(db: &Database, cfg: &SiteConfig, query: &str) -> ResultResp {
    let filter = forms::filter_from_query(query);
    let list = db.with_conn(|conn| properties::list_published(conn, &filter))?;
    html_response(pages::properties::property_list_page(cfg, &filter, &list))
}

fn property_detail(db: &Database, cfg: &SiteConfig, slug: &str) -> ResultResp {
    let slug = slug.to_string();
    let prop = db
        .with_conn(|conn| properties::find_published_by_slug(conn, &slug))?
        .ok_or(ServerError::NotFound)?;

    db.with_conn(|conn| properties::record_view(conn, prop.id))?;

    let nearby = match (prop.address.lat, prop.address.lng) {
        (Some(lat), Some(lng)) => db.with_conn(|conn| {
            properties::nearby(conn, lat, lng, NEARBY_PROPERTIES_RADIUS_M, Some(prop.id), 4)
        })?,
        _ => Vec::new(),
    };

    html_response(pages::properties::property_detail_page(cfg, &prop, &nearby))
}

fn neighborhood_list(db: &Database, cfg: &SiteConfig) -> ResultResp {
    let list = db.with_conn(|conn| locations::neighborhoods_published(conn))?;
    html_response(pages::neighborhoods::neighborhood_list_page(cfg, &list))
}

fn neighborhood_detail(db: &Database, cfg: &SiteConfig, slug: &str) -> ResultResp {
    let slug = slug.to_string();
    let nb = db
        .with_conn(|conn| locations::neighborhood_by_slug(conn, &slug))?
        .ok_or(ServerError::NotFound)?;

    let city = db.with_conn(|conn| locations::neighborhood_city_name(conn, nb.city_id))?;
    let props = db.with_conn(|conn| properties::in_neighborhood(conn, nb.id))?;
    let nearby = match (nb.lat, nb.lng) {
        (Some(lat), Some(lng)) => db.with_conn(|conn| {
            locations::nearby_neighborhoods(
                conn,
                lat,
                lng,
                NEARBY_NEIGHBORHOODS_RADIUS_M,
                nb.id,
                6,
            )
        })?,
        _ => Vec::new(),
    };

    html_response(pages::neighborhoods::neighborhood_detail_page(
        cfg, &nb, &city, &props, &nearby,
    ))
}

fn blog_list(db: &Database, cfg: &SiteConfig, query: &str) -> ResultResp {
    let category = forms::query_param(query, "categoria")
        .as_deref()
        .and_then(BlogCategory::parse);
    let search = forms::query_param(query, "busca");
    let posts =
        db.with_conn(|conn| blog::list_published(conn, category, search.as_deref()))?;
    html_response(pages::blog::blog_list_page(cfg, category, search.as_deref(), &posts))
}

fn blog_post(db: &Database, cfg: &SiteConfig, slug: &str) -> ResultResp {
    let slug = slug.to_string();
    let post = db
        .with_conn(|conn| blog::find_published_by_slug(conn, &slug))?
        .ok_or(ServerError::NotFound)?;
    db.with_conn(|conn| blog::record_view(conn, post.id))?;
    html_response(pages::blog::blog_post_page(cfg, &post))
}

fn blog_rss(db: &Database, cfg: &SiteConfig) -> ResultResp {
    let posts = db.with_conn(|conn| blog::recent_for_feed(conn, 20))?;
    xml_response(feeds::blog_rss_xml(cfg, &posts), "application/rss+xml; charset=utf-8")
}

fn sitemap(db: &Database, cfg: &SiteConfig) -> ResultResp {
    let props = db.with_conn(|conn| properties::sitemap_entries(conn))?;
    let neighborhoods = db.with_conn(|conn| locations::sitemap_entries(conn))?;
    let posts = db.with_conn(|conn| blog::sitemap_entries(conn))?;
    xml_response(
        feeds::sitemap_xml(cfg, &props, &neighborhoods, &posts),
        "application/xml; charset=utf-8",
    )
}

fn robots(cfg: &SiteConfig) -> ResultResp {
    let body = format!(
        "User-agent: *\nDisallow: /admin\nDisallow: /login\n\nSitemap: {}/sitemap.xml\n",
        cfg.base_url
    );
    xml_response(body, "text/plain; charset=utf-8")
}

fn create_lead(req: Request, db: &Database) -> ResultResp {
    let referer = header(&req, "referer").map(str::to_string);
    let wants_json = header(&req, "accept")
        .map(|a| a.contains("application/json"))
        .unwrap_or(false);
    let is_json_body = header(&req, "content-type")
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false);

    let body = read_body(req.into_body(), 64 * 1024)?;
    let mut lead = if is_json_body {
        forms::lead_from_json(&body)?
    } else {
        forms::lead_from_form(&FormData::parse(&body))?
    };
    lead.utm = referer.as_deref().and_then(utm_from_referer);

    let now = now_naive();
    let id = db.with_conn(|conn| leads::insert(conn, &lead, "site", now))?;
    tracing::info!(lead_id = id, property_id = ?lead.property_id, "lead received");

    if wants_json || is_json_body {
        return json_response(201, &json!({ "ok": true, "id": id }));
    }
    // back to the page the visitor came from, with a confirmation flag
    let target = referer
        .as_deref()
        .and_then(|r| url::Url::parse(r).ok())
        .map(|u| match u.query() {
            Some(q) => format!("{}?{q}&enviado=1", u.path()),
            None => format!("{}?enviado=1", u.path()),
        })
        .unwrap_or_else(|| "/contato?enviado=1".to_string());
    redirect(&target)
}

/// Cascading location selects for the admin form:
/// tipo=estados | cidades&estado_id=N | regioes&cidade_id=N | bairros&cidade_id=N
fn localidades(db: &Database, query: &str) -> ResultResp {
    let tipo = forms::query_param(query, "tipo").unwrap_or_default();
    let id = |name: &str| -> Result<i64, ServerError> {
        forms::query_param(query, name)
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| ServerError::BadRequest(format!("parâmetro obrigatório: {name}")))
    };

    let value = match tipo.as_str() {
        "estados" => {
            let states = db.with_conn(|conn| locations::states(conn))?;
            json!(states
                .iter()
                .map(|s| json!({ "id": s.id, "nome": s.name, "uf": s.code }))
                .collect::<Vec<_>>())
        }
        "cidades" => {
            let state_id = id("estado_id")?;
            let cities = db.with_conn(|conn| locations::cities_of_state(conn, state_id))?;
            json!(cities
                .iter()
                .map(|c| json!({ "id": c.id, "nome": c.name, "slug": c.slug }))
                .collect::<Vec<_>>())
        }
        "regioes" => {
            let city_id = id("cidade_id")?;
            let regions = db.with_conn(|conn| locations::regions_of_city(conn, city_id))?;
            json!(regions
                .iter()
                .map(|r| json!({ "id": r.id, "nome": r.name, "slug": r.slug }))
                .collect::<Vec<_>>())
        }
        "bairros" => {
            let city_id = id("cidade_id")?;
            let neighborhoods =
                db.with_conn(|conn| locations::neighborhoods_of_city(conn, city_id))?;
            json!(neighborhoods
                .iter()
                .map(|n| json!({ "id": n.id, "nome": n.name, "slug": n.slug }))
                .collect::<Vec<_>>())
        }
        _ => {
            return Err(ServerError::BadRequest(
                "tipo deve ser estados, cidades, regioes ou bairros".into(),
            ))
        }
    };

    json_response(200, &value)
}

// ---- auth handlers ----

fn magic_service(cfg: &SiteConfig) -> MagicLinkService {
    MagicLinkService::new(MagicLinkConfig {
        ttl_secs: cfg.magic_link_ttl_secs,
        magic_path: "/auth/magic".to_string(),
    })
}

fn magic_request(req: Request, db: &Database, cfg: &SiteConfig) -> ResultResp {
    let body = read_body(req.into_body(), 4 * 1024)?;
    let form = FormData::parse(&body);
    let email = form
        .get("email")
        .ok_or_else(|| ServerError::BadRequest("informe o e-mail".into()))?
        .to_string();

    let service = magic_service(cfg);
    let now = now_unix();
    match db.with_conn(|conn| service.request_link(conn, &email, now)) {
        Ok(issued) => {
            // mail delivery is out of band; ops picks the link up from the log
            tracing::info!(email = %issued.email, link = %issued.link, "magic link issued");
        }
        Err(ServerError::Unauthorized(_)) | Err(ServerError::BadRequest(_)) => {
            // same response either way, account existence stays private
            tracing::debug!("magic link request for unknown or non-admin email");
        }
        Err(e) => return Err(e),
    }

    html_response(pages::institutional::login_page(None, true))
}

fn magic_redeem(db: &Database, cfg: &SiteConfig, query: &str) -> ResultResp {
    let token = forms::query_param(query, "token").unwrap_or_default();
    let now = now_unix();
    let service = magic_service(cfg);

    match db.with_conn(|conn| service.redeem(conn, &token, now)) {
        Ok(redeemed) => {
            let session_token =
                db.with_conn(|conn| sessions::create_session(conn, redeemed.user_id, now))?;
            tracing::info!(email = %redeemed.email, "admin logged in");
            redirect_with_cookie("/admin", &sessions::session_cookie(&session_token))
        }
        Err(ServerError::Unauthorized(_)) | Err(ServerError::BadRequest(_)) => html_response(
            pages::institutional::login_page(Some("Link inválido ou expirado."), false),
        ),
        Err(e) => Err(e),
    }
}

fn logout(req: Request, db: &Database) -> ResultResp {
    if let Some(token) = header(&req, "cookie").and_then(sessions::session_token_from_cookies) {
        let token = token.to_string();
        let now = now_unix();
        db.with_conn(|conn| sessions::revoke_session(conn, &token, now))?;
    }
    redirect_with_cookie("/", &sessions::clear_session_cookie())
}

// ---- admin handlers ----

fn admin_dashboard(req: &Request, db: &Database) -> ResultResp {
    let user = auth::require_admin(req, db, now_unix())?;
    let counts = db.with_conn(|conn| {
        Ok(pages::admin_dashboard::DashboardCounts {
            published_properties: properties::count(conn, true)?,
            total_properties: properties::count(conn, false)?,
            published_posts: blog::count(conn, true)?,
            total_posts: blog::count(conn, false)?,
            leads: leads::count(conn)?,
        })
    })?;
    let latest: Vec<_> = db
        .with_conn(|conn| leads::list_with_property(conn))?
        .into_iter()
        .take(5)
        .collect();
    html_response(pages::admin_dashboard::dashboard_page(&user.email, &counts, &latest))
}

fn admin_property_list(req: &Request, db: &Database) -> ResultResp {
    auth::require_admin(req, db, now_unix())?;
    let rows = db.with_conn(|conn| properties::admin_list(conn))?;
    html_response(pages::admin_properties::admin_property_list_page(&rows))
}

fn admin_property_new(req: &Request, db: &Database) -> ResultResp {
    auth::require_admin(req, db, now_unix())?;
    let neighborhoods = db.with_conn(|conn| locations::neighborhood_options(conn))?;
    let all_amenities = db.with_conn(|conn| amenities::all(conn))?;
    html_response(pages::admin_properties::admin_property_form_page(
        None,
        &neighborhoods,
        &all_amenities,
    ))
}

fn admin_property_edit(req: &Request, db: &Database, id: i64) -> ResultResp {
    auth::require_admin(req, db, now_unix())?;
    let prop = db
        .with_conn(|conn| properties::find_by_id(conn, id))?
        .ok_or(ServerError::NotFound)?;
    let checked = db.with_conn(|conn| properties::amenity_ids(conn, id))?;
    let neighborhoods = db.with_conn(|conn| locations::neighborhood_options(conn))?;
    let all_amenities = db.with_conn(|conn| amenities::all(conn))?;
    html_response(pages::admin_properties::admin_property_form_page(
        Some((&prop, &checked)),
        &neighborhoods,
        &all_amenities,
    ))
}

fn admin_property_create(req: Request, db: &Database) -> ResultResp {
    auth::require_admin(&req, db, now_unix())?;
    let body = read_body(req.into_body(), 512 * 1024)?;
    let new = forms::property_from_form(&FormData::parse(&body))?;
    let now = now_naive();
    let (id, slug) = db.with_conn(|conn| properties::insert(conn, &new, now))?;
    tracing::info!(property_id = id, slug = %slug, "listing created");
    redirect("/admin/imoveis")
}

fn admin_property_update(req: Request, db: &Database, id: i64) -> ResultResp {
    auth::require_admin(&req, db, now_unix())?;
    let body = read_body(req.into_body(), 512 * 1024)?;
    let new = forms::property_from_form(&FormData::parse(&body))?;
    let now = now_naive();
    db.with_conn(|conn| properties::update(conn, id, &new, now))?;
    redirect("/admin/imoveis")
}

fn admin_property_delete(req: &Request, db: &Database, id: i64) -> ResultResp {
    auth::require_admin(req, db, now_unix())?;
    db.with_conn(|conn| properties::delete(conn, id))?;
    tracing::info!(property_id = id, "listing deleted");
    redirect("/admin/imoveis")
}

fn admin_blog_list(req: &Request, db: &Database) -> ResultResp {
    auth::require_admin(req, db, now_unix())?;
    let posts = db.with_conn(|conn| blog::admin_list(conn))?;
    html_response(pages::admin_blog::admin_blog_list_page(&posts))
}

fn admin_blog_new(req: &Request, db: &Database) -> ResultResp {
    auth::require_admin(req, db, now_unix())?;
    html_response(pages::admin_blog::admin_blog_form_page(None))
}

fn admin_blog_edit(req: &Request, db: &Database, id: i64) -> ResultResp {
    auth::require_admin(req, db, now_unix())?;
    let post = db
        .with_conn(|conn| blog::find_by_id(conn, id))?
        .ok_or(ServerError::NotFound)?;
    html_response(pages::admin_blog::admin_blog_form_page(Some(&post)))
}

fn admin_blog_create(req: Request, db: &Database) -> ResultResp {
    auth::require_admin(&req, db, now_unix())?;
    let body = read_body(req.into_body(), 512 * 1024)?;
    let now = now_naive();
    let new = forms::blog_post_from_form(&FormData::parse(&body), None, now)?;
    let id = db.with_conn(|conn| blog::insert(conn, &new, now))?;
    tracing::info!(post_id = id, slug = %new.slug, "post created");
    redirect("/admin/blog")
}

fn admin_blog_update(req: Request, db: &Database, id: i64) -> ResultResp {
    auth::require_admin(&req, db, now_unix())?;
    let body = read_body(req.into_body(), 512 * 1024)?;
    let previous = db
        .with_conn(|conn| blog::find_by_id(conn, id))?
        .ok_or(ServerError::NotFound)?;
    let now = now_naive();
    let new =
        forms::blog_post_from_form(&FormData::parse(&body), previous.published_at, now)?;
    db.with_conn(|conn| blog::update(conn, id, &new, now))?;
    redirect("/admin/blog")
}

fn admin_blog_delete(req: &Request, db: &Database, id: i64) -> ResultResp {
    auth::require_admin(req, db, now_unix())?;
    db.with_conn(|conn| blog::delete(conn, id))?;
    tracing::info!(post_id = id, "post deleted");
    redirect("/admin/blog")
}

fn admin_leads(req: &Request, db: &Database) -> ResultResp {
    auth::require_admin(req, db, now_unix())?;
    let list = db.with_conn(|conn| leads::list_with_property(conn))?;
    html_response(pages::admin_leads::admin_leads_page(&list))
}

fn admin_leads_export(req: &Request, db: &Database) -> ResultResp {
    auth::require_admin(req, db, now_unix())?;
    let list = db.with_conn(|conn| leads::list_with_property(conn))?;
    export_leads_xlsx(&list)
}

/// Raw-body image upload: the file bytes come as the request body with
/// its Content-Type, destination selected by ?tipo=properties|posts.
fn upload(req: Request, db: &Database, cfg: &SiteConfig, query: &str) -> ResultResp {
    auth::require_admin(&req, db, now_unix())?;

    let kind = forms::query_param(query, "tipo")
        .as_deref()
        .and_then(UploadKind::parse)
        .ok_or_else(|| ServerError::BadRequest("tipo deve ser properties ou posts".into()))?;
    let content_type = header(&req, "content-type")
        .map(str::to_string)
        .ok_or_else(|| ServerError::UploadError("Content-Type ausente".into()))?;

    let body = read_body(req.into_body(), uploads::MAX_UPLOAD_BYTES)?;
    let stored = uploads::store_image(
        std::path::Path::new(&cfg.upload_dir),
        kind,
        &content_type,
        &body,
    )?;
    tracing::info!(url = %stored.url, "image stored");

    json_response(
        201,
        &json!({ "url": stored.url, "width": stored.width, "height": stored.height }),
    )
}
