mod integration_db;

use actix_web::http::StatusCode;
use actix_web::{cookie::Cookie, test, web, App};
use ballot_server::auth;
use ballot_server::db::organization::OrgNameCache;
use ballot_server::routes::login::SESSION_COOKIE;
use ballot_server::server;
use integration_db::IntegrationTestDb;
use serde_json::{json, Value};
use sqlx::PgPool;

async fn seed_student(pool: &PgPool, id: i32, password: &str) {
    sqlx::query("INSERT INTO student (id, hashed_password) VALUES ($1, $2)")
        .bind(id)
        .bind(auth::hash_password(password))
        .execute(pool)
        .await
        .expect("seed student");
}

async fn seed_organization(pool: &PgPool, id: i32, name: &str, full_name: &str) {
    sqlx::query("INSERT INTO organization (id, name, full_name) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(name)
        .bind(full_name)
        .execute(pool)
        .await
        .expect("seed organization");
}

async fn seed_admin(pool: &PgPool, username: &str, password: &str) {
    sqlx::query("INSERT INTO admin (username, hashed_password) VALUES ($1, $2)")
        .bind(username)
        .bind(auth::hash_password(password))
        .execute(pool)
        .await
        .expect("seed admin");
}

macro_rules! init_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool))
                .app_data(web::Data::new(OrgNameCache::default()))
                .configure(server::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn second_ballot_for_a_voted_organization_is_rejected_and_rolled_back() {
    let Some(db) = IntegrationTestDb::try_new().await else {
        return;
    };
    let pool = db.pool();
    seed_student(&pool, 1, "password").await;
    seed_organization(&pool, 1, "OSIS", "Student Council").await;
    seed_organization(&pool, 2, "MPK", "Student Representatives").await;

    let app = init_app!(pool.clone());

    let req = test::TestRequest::post()
        .uri("/api/vote")
        .set_json(json!({
            "studentId": 1,
            "organizationPairs": [{ "organizationId": 1, "pairId": 1 }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Second ballot: a fresh organization first, then the one already voted
    // in. The conflict must throw away the whole ballot, including the
    // fresh organization's row.
    let req = test::TestRequest::post()
        .uri("/api/vote")
        .set_json(json!({
            "studentId": 1,
            "organizationPairs": [
                { "organizationId": 2, "pairId": 1 },
                { "organizationId": 1, "pairId": 2 }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Student has already voted" }));

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vote")
        .fetch_one(&pool)
        .await
        .expect("count votes");
    assert_eq!(total, 1);

    let second_organization: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM vote WHERE organization_id = 2")
            .fetch_one(&pool)
            .await
            .expect("count votes for second organization");
    assert_eq!(second_organization, 0);

    db.cleanup().await;
}

#[actix_web::test]
async fn repeated_logins_issue_fresh_session_tokens() {
    let Some(db) = IntegrationTestDb::try_new().await else {
        return;
    };
    let pool = db.pool();
    seed_admin(&pool, "admin", "secret").await;

    let app = init_app!(pool.clone());

    let mut tokens = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "username": "admin", "password": "secret" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let token = resp
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .expect("session cookie should be set")
            .value()
            .to_owned();
        tokens.push(token);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "OK" }));
    }

    assert_ne!(tokens[0], tokens[1]);

    let sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_session")
        .fetch_one(&pool)
        .await
        .expect("count sessions");
    assert_eq!(sessions, 2);

    // Both tokens stay valid; the admin gate accepts either.
    let req = test::TestRequest::get()
        .uri("/api/admin/results")
        .cookie(Cookie::new(SESSION_COOKIE, tokens[0].clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    db.cleanup().await;
}
