use crate::db::{blog, leads, properties};
use crate::domain::lead::NewLead;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::router_tests::{
    body_string, get_with_cookie, location, post_form, post_form_with_cookie,
};
use crate::tests::utils::{
    create_admin_session, init_test_db, now, sample_property, seed_location, test_config,
};

fn property_form_body(neighborhood_id: i64, title: &str) -> String {
    format!(
        "title={}&description=Apartamento+novo&status=LANCAMENTO&purpose=VENDA\
&price=720000&bedrooms=2&neighborhood_id={neighborhood_id}\
&street=Rua+Oscar+Freire&postal_code=01426-001&amenities=1&amenities=2&published=on",
        title.replace(' ', "+")
    )
}

#[test]
fn dashboard_shows_counts() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);
    let (_, session) = create_admin_session(&db, "admin@imovia.test");

    db.with_conn(|conn| properties::insert(conn, &sample_property(nb, "Residencial Aurora"), now()))
        .unwrap();
    let lead = NewLead::validate("Maria Silva", Some("m@x.com"), None, None, None).unwrap();
    db.with_conn(|conn| leads::insert(conn, &lead, "site", now())).unwrap();

    let resp = handle(get_with_cookie("/admin", &session), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("imóveis publicados"));
    assert!(body.contains("admin@imovia.test"));
}

#[test]
fn property_create_inserts_listing_with_relations() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);
    let (_, session) = create_admin_session(&db, "admin@imovia.test");

    let resp = handle(
        post_form_with_cookie("/admin/imoveis", &property_form_body(nb, "Edifício Horizonte"), &session),
        &db,
        &cfg,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin/imoveis");

    let prop = db
        .with_conn(|conn| properties::find_published_by_slug(conn, "edificio-horizonte"))
        .unwrap()
        .expect("created and published");
    assert_eq!(prop.title, "Edifício Horizonte");
    assert_eq!(prop.price, Some(720_000));
    assert_eq!(prop.amenities.len(), 2);
    assert_eq!(prop.address.street, "Rua Oscar Freire");
}

#[test]
fn property_update_keeps_slug() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);
    let (_, session) = create_admin_session(&db, "admin@imovia.test");
    let (id, slug) = db
        .with_conn(|conn| properties::insert(conn, &sample_property(nb, "Residencial Aurora"), now()))
        .unwrap();

    let resp = handle(
        post_form_with_cookie(
            &format!("/admin/imoveis/{id}"),
            &property_form_body(nb, "Residencial Aurora Renovado"),
            &session,
        ),
        &db,
        &cfg,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);

    let prop = db
        .with_conn(|conn| properties::find_by_id(conn, id))
        .unwrap()
        .expect("still there");
    assert_eq!(prop.title, "Residencial Aurora Renovado");
    assert_eq!(prop.slug, slug);
}

#[test]
fn property_edit_form_is_prefilled() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);
    let (_, session) = create_admin_session(&db, "admin@imovia.test");
    let (id, _) = db
        .with_conn(|conn| properties::insert(conn, &sample_property(nb, "Residencial Aurora"), now()))
        .unwrap();

    let resp = handle(
        get_with_cookie(&format!("/admin/imoveis/{id}/editar"), &session),
        &db,
        &cfg,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Residencial Aurora"));
    assert!(body.contains("Rua Augusta"));
    assert!(body.contains("Piscina"));
}

#[test]
fn property_delete_removes_listing() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);
    let (_, session) = create_admin_session(&db, "admin@imovia.test");
    let (id, _) = db
        .with_conn(|conn| properties::insert(conn, &sample_property(nb, "Residencial Aurora"), now()))
        .unwrap();

    let resp = handle(
        post_form_with_cookie(&format!("/admin/imoveis/{id}/excluir"), "", &session),
        &db,
        &cfg,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);

    let gone = db.with_conn(|conn| properties::find_by_id(conn, id)).unwrap();
    assert!(gone.is_none());
}

#[test]
fn blog_create_stamps_published_at() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, session) = create_admin_session(&db, "admin@imovia.test");

    let body = "title=Como+financiar+seu+im%C3%B3vel&content=Um+guia+completo.\
&category=FINANCIAMENTOS&published=on";
    let resp = handle(post_form_with_cookie("/admin/blog", body, &session), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin/blog");

    let post = db
        .with_conn(|conn| blog::find_published_by_slug(conn, "como-financiar-seu-imovel"))
        .unwrap()
        .expect("published post");
    assert!(post.published_at.is_some());
    assert_eq!(post.reading_time, Some(1));
}

#[test]
fn blog_create_rejects_duplicate_slug() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, session) = create_admin_session(&db, "admin@imovia.test");

    let body = "title=Tend%C3%AAncias+2026&content=Texto.&category=TENDENCIAS";
    handle(post_form_with_cookie("/admin/blog", body, &session), &db, &cfg).unwrap();

    match handle(post_form_with_cookie("/admin/blog", body, &session), &db, &cfg) {
        Err(ServerError::BadRequest(msg)) => assert!(msg.contains("slug")),
        other => panic!("expected BadRequest, got: {other:?}"),
    }
}

#[test]
fn leads_export_downloads_a_spreadsheet() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, session) = create_admin_session(&db, "admin@imovia.test");
    let lead = NewLead::validate("Maria Silva", Some("m@x.com"), None, Some("Olá"), None).unwrap();
    db.with_conn(|conn| leads::insert(conn, &lead, "site", now())).unwrap();

    let resp = handle(get_with_cookie("/admin/leads/export.xlsx", &session), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    let ct = resp
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.contains("spreadsheetml"));
    let cd = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(cd.contains("leads.xlsx"));
}

#[test]
fn upload_requires_session_and_valid_kind() {
    let db = init_test_db();
    let cfg = test_config();

    match handle(post_form("/api/upload?tipo=properties", "x"), &db, &cfg) {
        Err(ServerError::Unauthorized(_)) => {}
        other => panic!("expected Unauthorized, got: {other:?}"),
    }

    let (_, session) = create_admin_session(&db, "admin@imovia.test");
    match handle(post_form_with_cookie("/api/upload?tipo=outros", "x", &session), &db, &cfg) {
        Err(ServerError::BadRequest(_)) => {}
        other => panic!("expected BadRequest, got: {other:?}"),
    }
}

#[test]
fn admin_mutations_require_a_session() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);

    let resp = handle(
        post_form("/admin/imoveis", &property_form_body(nb, "Invasor Imóvel")),
        &db,
        &cfg,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");

    let count = db.with_conn(|conn| properties::count(conn, false)).unwrap();
    assert_eq!(count, 0);
}
