use crate::auth::magic::{MagicLinkConfig, MagicLinkService};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::router_tests::{body_string, get, get_with_cookie, location, post_form, post_form_with_cookie};
use crate::tests::utils::{create_admin_session, init_test_db, test_config};
use rusqlite::params;
use std::time::{SystemTime, UNIX_EPOCH};

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

fn insert_admin(db: &crate::db::Database, email: &str) {
    db.with_conn(|conn| {
        conn.execute(
            "insert into users (email, is_admin, created_at) values (?1, 1, ?2)",
            params![email, now_unix()],
        )
        .unwrap();
        Ok(())
    })
    .unwrap();
}

#[test]
fn admin_without_session_redirects_to_login() {
    let db = init_test_db();
    let cfg = test_config();

    let resp = handle(get("/admin"), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");

    let resp = handle(get("/admin/imoveis"), &db, &cfg).unwrap();
    assert_eq!(location(&resp), "/login");
}

#[test]
fn magic_request_response_is_the_same_for_unknown_emails() {
    let db = init_test_db();
    let cfg = test_config();
    insert_admin(&db, "admin@imovia.test");

    let known = body_string(
        handle(post_form("/auth/magic/request", "email=admin%40imovia.test"), &db, &cfg).unwrap(),
    );
    let unknown = body_string(
        handle(post_form("/auth/magic/request", "email=ghost%40imovia.test"), &db, &cfg).unwrap(),
    );
    assert!(known.contains("Se o e-mail estiver cadastrado"));
    assert_eq!(known, unknown);

    // only the real admin got a link
    let count: i64 = db
        .with_conn(|conn| {
            conn.query_row("select count(*) from magic_links", [], |r| r.get(0))
                .map_err(ServerError::from)
        })
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn magic_link_logs_in_and_opens_the_back_office() {
    let db = init_test_db();
    let cfg = test_config();
    insert_admin(&db, "admin@imovia.test");

    let token = db
        .with_conn(|conn| {
            let svc = MagicLinkService::new(MagicLinkConfig::default());
            let issued = svc.request_link(conn, "admin@imovia.test", now_unix())?;
            Ok(issued.token)
        })
        .unwrap();

    let resp = handle(get(&format!("/auth/magic?token={token}")), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin");
    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .expect("session cookie set")
        .to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    let session = cookie
        .trim_start_matches("session=")
        .split(';')
        .next()
        .unwrap()
        .to_string();
    let resp = handle(get_with_cookie("/admin", &session), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("admin@imovia.test"));
}

#[test]
fn magic_link_is_single_use() {
    let db = init_test_db();
    let cfg = test_config();
    insert_admin(&db, "admin@imovia.test");

    let token = db
        .with_conn(|conn| {
            let svc = MagicLinkService::new(MagicLinkConfig::default());
            Ok(svc.request_link(conn, "admin@imovia.test", now_unix())?.token)
        })
        .unwrap();

    let first = handle(get(&format!("/auth/magic?token={token}")), &db, &cfg).unwrap();
    assert_eq!(first.status(), 302);

    let second = handle(get(&format!("/auth/magic?token={token}")), &db, &cfg).unwrap();
    assert_eq!(second.status(), 200);
    assert!(body_string(second).contains("Link inválido ou expirado"));
}

#[test]
fn logout_revokes_the_session() {
    let db = init_test_db();
    let cfg = test_config();
    let (_, session) = create_admin_session(&db, "admin@imovia.test");

    let resp = handle(get_with_cookie("/admin", &session), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);

    let resp = handle(post_form_with_cookie("/logout", "", &session), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");
    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(cookie.contains("Max-Age=0"));

    let resp = handle(get_with_cookie("/admin", &session), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");
}

#[test]
fn login_page_is_public() {
    let db = init_test_db();
    let cfg = test_config();
    let resp = handle(get("/login"), &db, &cfg).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("/auth/magic/request"));
}
