use crate::db::properties;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::router_tests::{body_string, get};
use crate::tests::utils::{init_test_db, now, sample_property, seed_location, test_config};

#[test]
fn home_renders_featured_and_site_chrome() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);
    db.with_conn(|conn| properties::insert(conn, &sample_property(nb, "Residencial Aurora"), now()))
        .unwrap();

    let resp = handle(get("/"), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Residencial Aurora"));
    assert!(body.contains("Imovia Imóveis"));
    assert!(body.contains("/blog/rss.xml"));
}

#[test]
fn property_list_filters_by_purpose() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);

    let mut rental = sample_property(nb, "Studio para alugar");
    rental.purpose = crate::domain::property::PropertyPurpose::Aluguel;
    db.with_conn(|conn| properties::insert(conn, &rental, now())).unwrap();
    db.with_conn(|conn| properties::insert(conn, &sample_property(nb, "Casa à venda"), now()))
        .unwrap();

    let resp = handle(get("/imoveis?finalidade=ALUGUEL"), &db, &cfg).unwrap();
    let body = body_string(resp);
    assert!(body.contains("Studio para alugar"));
    assert!(!body.contains("Casa à venda"));
}

#[test]
fn property_detail_shows_listing_and_counts_view() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);
    let (id, slug) = db
        .with_conn(|conn| properties::insert(conn, &sample_property(nb, "Residencial Aurora"), now()))
        .unwrap();

    let resp = handle(get(&format!("/imoveis/{slug}")), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Residencial Aurora"));
    assert!(body.contains("R$ 850.000"));
    assert!(body.contains("Jardins"));
    // JSON-LD block for the listing
    assert!(body.contains("application/ld+json"));
    assert!(body.contains("\"@type\":\"Residence\""));

    let views: i64 = db
        .with_conn(|conn| {
            conn.query_row(
                "select views from properties where id = ?",
                rusqlite::params![id],
                |r| r.get(0),
            )
            .map_err(ServerError::from)
        })
        .unwrap();
    assert_eq!(views, 1);
}

#[test]
fn unpublished_property_is_not_public() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);
    let mut draft = sample_property(nb, "Rascunho interno");
    draft.published = false;
    let (_, slug) = db
        .with_conn(|conn| properties::insert(conn, &draft, now()))
        .unwrap();

    match handle(get(&format!("/imoveis/{slug}")), &db, &cfg) {
        Err(ServerError::NotFound) => {}
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[test]
fn unknown_routes_are_not_found() {
    let db = init_test_db();
    let cfg = test_config();
    match handle(get("/nada-por-aqui"), &db, &cfg) {
        Err(ServerError::NotFound) => {}
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[test]
fn neighborhood_detail_lists_its_properties() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);
    db.with_conn(|conn| properties::insert(conn, &sample_property(nb, "Residencial Aurora"), now()))
        .unwrap();

    let resp = handle(get("/bairros/jardins"), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Jardins"));
    assert!(body.contains("Bairro arborizado"));
    assert!(body.contains("Residencial Aurora"));
}

#[test]
fn sitemap_lists_published_urls() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);
    let (_, slug) = db
        .with_conn(|conn| properties::insert(conn, &sample_property(nb, "Residencial Aurora"), now()))
        .unwrap();

    let resp = handle(get("/sitemap.xml"), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    let ct = resp
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/xml"));
    let body = body_string(resp);
    assert!(body.contains(&format!("https://imovia.test/imoveis/{slug}")));
    assert!(body.contains("https://imovia.test/bairros/jardins"));
}

#[test]
fn robots_points_to_sitemap_and_blocks_admin() {
    let db = init_test_db();
    let cfg = test_config();
    let resp = handle(get("/robots.txt"), &db, &cfg).unwrap();
    let body = body_string(resp);
    assert!(body.contains("Disallow: /admin"));
    assert!(body.contains("Sitemap: https://imovia.test/sitemap.xml"));
}

#[test]
fn blog_rss_is_valid_channel() {
    let db = init_test_db();
    let cfg = test_config();
    let resp = handle(get("/blog/rss.xml"), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("<rss"));
    assert!(body.contains("<channel>"));
}

#[test]
fn localidades_api_cascades() {
    let db = init_test_db();
    let cfg = test_config();
    let (city_id, _) = seed_location(&db);

    let resp = handle(get("/api/localidades?tipo=estados"), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("\"uf\":\"SP\""));

    let resp = handle(
        get(&format!("/api/localidades?tipo=bairros&cidade_id={city_id}")),
        &db,
        &cfg,
    )
    .unwrap();
    let body = body_string(resp);
    assert!(body.contains("\"nome\":\"Jardins\""));

    match handle(get("/api/localidades?tipo=cidades"), &db, &cfg) {
        Err(ServerError::BadRequest(_)) => {}
        other => panic!("expected BadRequest without estado_id, got: {other:?}"),
    }
}

#[test]
fn contact_page_confirms_submission_flag() {
    let db = init_test_db();
    let cfg = test_config();

    let body = body_string(handle(get("/contato"), &db, &cfg).unwrap());
    assert!(!body.contains("Mensagem enviada!"));

    let body = body_string(handle(get("/contato?enviado=1"), &db, &cfg).unwrap());
    assert!(body.contains("Mensagem enviada!"));
}
