use crate::db::properties;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::router_tests::{body_string, location, post_form, post_json};
use crate::tests::utils::{init_test_db, now, sample_property, seed_location, test_config};

#[test]
fn lead_submission_redirects_back_with_flag() {
    let db = init_test_db();
    let cfg = test_config();

    let mut req = post_form("/api/leads", "name=Maria+Silva&email=maria%40email.com&message=Quero+visitar");
    req.headers_mut().insert(
        "referer",
        "https://imovia.test/contato".parse().unwrap(),
    );

    let resp = handle(req, &db, &cfg).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/contato?enviado=1");

    let (name, email): (String, Option<String>) = db
        .with_conn(|conn| {
            conn.query_row("select name, email from leads", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .map_err(ServerError::from)
        })
        .unwrap();
    assert_eq!(name, "Maria Silva");
    assert_eq!(email.as_deref(), Some("maria@email.com"));
}

#[test]
fn lead_submission_returns_json_when_asked() {
    let db = init_test_db();
    let cfg = test_config();

    let mut req = post_form("/api/leads", "name=Maria&phone=11987654321");
    req.headers_mut()
        .insert("accept", "application/json".parse().unwrap());

    let resp = handle(req, &db, &cfg).unwrap();
    assert_eq!(resp.status(), 201);
    let body = body_string(resp);
    assert!(body.contains("\"ok\":true"));
}

#[test]
fn lead_submission_accepts_json_body() {
    let db = init_test_db();
    let cfg = test_config();

    let req = post_json(
        "/api/leads",
        r#"{"name":"Maria Silva","email":"maria@email.com","message":"Quero visitar"}"#,
    );

    let resp = handle(req, &db, &cfg).unwrap();
    assert_eq!(resp.status(), 201);
    let body = body_string(resp);
    assert!(body.contains("\"ok\":true"));

    let (name, email): (String, Option<String>) = db
        .with_conn(|conn| {
            conn.query_row("select name, email from leads", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .map_err(ServerError::from)
        })
        .unwrap();
    assert_eq!(name, "Maria Silva");
    assert_eq!(email.as_deref(), Some("maria@email.com"));
}

#[test]
fn lead_json_body_is_validated_too() {
    let db = init_test_db();
    let cfg = test_config();

    let req = post_json("/api/leads", r#"{"name":"Maria","message":"oi"}"#);
    match handle(req, &db, &cfg) {
        Err(ServerError::BadRequest(msg)) => assert!(msg.contains("e-mail ou telefone")),
        other => panic!("expected BadRequest, got: {other:?}"),
    }
}

#[test]
fn lead_links_to_property_and_captures_utm() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, nb) = seed_location(&db);
    let (prop_id, slug) = db
        .with_conn(|conn| properties::insert(conn, &sample_property(nb, "Residencial Aurora"), now()))
        .unwrap();

    let mut req = post_form(
        "/api/leads",
        &format!("name=Maria&email=m%40x.com&property_id={prop_id}"),
    );
    req.headers_mut().insert(
        "referer",
        format!("https://imovia.test/imoveis/{slug}?utm_source=google&utm_campaign=verao")
            .parse()
            .unwrap(),
    );

    let resp = handle(req, &db, &cfg).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), format!("/imoveis/{slug}?utm_source=google&utm_campaign=verao&enviado=1"));

    let (stored_prop, utm): (Option<i64>, Option<String>) = db
        .with_conn(|conn| {
            conn.query_row("select property_id, utm from leads", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .map_err(ServerError::from)
        })
        .unwrap();
    assert_eq!(stored_prop, Some(prop_id));
    let utm = utm.expect("utm stored");
    assert!(utm.contains("\"utm_source\":\"google\""));
    assert!(utm.contains("\"utm_campaign\":\"verao\""));
    assert!(!utm.contains("enviado"));
}

#[test]
fn lead_without_contact_channel_is_rejected() {
    let db = init_test_db();
    let cfg = test_config();

    match handle(post_form("/api/leads", "name=Maria&message=oi"), &db, &cfg) {
        Err(ServerError::BadRequest(msg)) => {
            assert!(msg.contains("e-mail ou telefone"));
        }
        other => panic!("expected BadRequest, got: {other:?}"),
    }

    let count: i64 = db
        .with_conn(|conn| {
            conn.query_row("select count(*) from leads", [], |r| r.get(0))
                .map_err(ServerError::from)
        })
        .unwrap();
    assert_eq!(count, 0);
}
