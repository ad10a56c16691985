//! Page loaders against a mock API

use axum::{
    Json, Router,
    extract::{Path, RawQuery},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::{get, post},
};
use pier_client::ApiClient;
use pier_client::Redirect;
use pier_client::pages::{
    ActionFailure, PipelinesPage, load_home, load_pipelines, load_project, load_projects, sign_in,
    sign_in_sso,
};
use pier_core::domain::pipeline::Pipeline;
use pier_core::domain::task::TaskKind;
use pier_core::dto::auth::Credentials;
use serde_json::{Value, json};

/// Serve `app` on an ephemeral port and return its base URL
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn ok(payload: Value) -> Json<Value> {
    Json(json!({"code": 0, "msg": "", "payload": payload}))
}

#[tokio::test]
async fn test_load_pipelines_for_project() {
    let app = Router::new().route(
        "/api/pipelines",
        get(|RawQuery(query): RawQuery| async move {
            if query.as_deref() != Some("pid=42") {
                return StatusCode::BAD_REQUEST.into_response();
            }
            ok(json!({"totalCount": 1, "items": [{"id": "p1", "tasks": []}]})).into_response()
        }),
    );
    let client = ApiClient::new(spawn(app).await);

    let page = load_pipelines(&client, "42").await;

    assert_eq!(
        page,
        Ok(PipelinesPage {
            pipelines: vec![Pipeline {
                id: "p1".to_string(),
                ..Default::default()
            }],
        })
    );
}

#[tokio::test]
async fn test_unauthorized_redirects_to_sign_in() {
    let app = Router::new().route("/api/projects", get(|| async { StatusCode::UNAUTHORIZED }));
    let client = ApiClient::new(spawn(app).await);

    let page = load_projects(&client).await;

    assert_eq!(page, Err(Redirect::to(302, "/signin")));
}

#[tokio::test]
async fn test_server_error_yields_empty_page() {
    let app = Router::new().route(
        "/api/pipelines",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable") }),
    );
    let client = ApiClient::new(spawn(app).await);

    let page = load_pipelines(&client, "7").await.unwrap();

    assert!(page.pipelines.is_empty());
}

#[tokio::test]
async fn test_rejected_envelope_yields_empty_page() {
    let app = Router::new().route(
        "/api/projects",
        get(|| async { Json(json!({"code": 1003, "msg": "forbidden"})) }),
    );
    let client = ApiClient::new(spawn(app).await);

    let page = load_projects(&client).await.unwrap();

    assert!(page.projects.is_empty());
}

#[tokio::test]
async fn test_access_token_sent_as_bearer() {
    let app = Router::new().route(
        "/api/user",
        get(|headers: HeaderMap| async move {
            match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
                Some("Bearer tok-1") => {
                    ok(json!({"id": "u1", "email": "ada@example.com"})).into_response()
                }
                _ => StatusCode::UNAUTHORIZED.into_response(),
            }
        }),
    );
    let base_url = spawn(app).await;

    let signed_in = ApiClient::new(&base_url).with_access_token("tok-1");
    let page = load_home(&signed_in).await.unwrap();
    assert_eq!(page.user.map(|u| u.email), Some("ada@example.com".to_string()));

    let anonymous = ApiClient::new(&base_url);
    assert_eq!(load_home(&anonymous).await, Err(Redirect::sign_in()));
}

#[tokio::test]
async fn test_load_project_looks_up_members() {
    let app = Router::new()
        .route(
            "/api/project/{slug}",
            get(|Path(slug): Path<String>| async move {
                ok(json!({
                    "id": slug,
                    "name": "Storefront",
                    "members": [
                        {"userId": "u1", "role": "owner"},
                        {"userId": "u2"}
                    ]
                }))
            }),
        )
        .route(
            "/api/users",
            get(|RawQuery(query): RawQuery| async move {
                assert_eq!(query.as_deref(), Some("uid=u1&uid=u2"));
                ok(json!({
                    "totalCount": 2,
                    "items": [{"id": "u1", "name": "Ada"}, {"id": "u2", "name": "Lin"}]
                }))
            }),
        );
    let client = ApiClient::new(spawn(app).await);

    let page = load_project(&client, "storefront").await.unwrap();

    let project = page.project.expect("project");
    assert_eq!(project.id, "storefront");
    assert_eq!(project.member_ids(), vec!["u1", "u2"]);
    let names: Vec<_> = page.users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Ada", "Lin"]);
}

#[tokio::test]
async fn test_load_project_keeps_project_when_users_fail() {
    let app = Router::new()
        .route(
            "/api/project/{slug}",
            get(|| async { ok(json!({"id": "x", "members": [{"userId": "u1"}]})) }),
        )
        .route(
            "/api/users",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
    let client = ApiClient::new(spawn(app).await);

    let page = load_project(&client, "x").await.unwrap();

    assert!(page.project.is_some());
    assert!(page.users.is_empty());
}

#[tokio::test]
async fn test_pascal_case_response_is_normalized() {
    let app = Router::new().route(
        "/api/projects",
        get(|| async {
            Json(json!({
                "Code": 0,
                "Msg": "",
                "Payload": {
                    "TotalCount": 1,
                    "Items": [{"Id": "pr1", "Name": "Billing", "OwnerUserId": "u9"}]
                }
            }))
        }),
    );
    let client = ApiClient::new(spawn(app).await);

    let page = load_projects(&client).await.unwrap();

    assert_eq!(page.projects.len(), 1);
    assert_eq!(page.projects[0].name, "Billing");
    assert_eq!(page.projects[0].owner_user_id, "u9");
}

#[tokio::test]
async fn test_sign_in() {
    let app = Router::new().route(
        "/api/authenticate",
        post(|Json(body): Json<Value>| async move {
            if body == json!({"email": "ada@example.com", "password": "hunter2"}) {
                ok(json!({"userId": "u1", "accessToken": "at", "refreshToken": "rt"}))
            } else {
                Json(json!({"code": 401, "msg": "bad credentials"}))
            }
        }),
    );
    let client = ApiClient::new(spawn(app).await);

    let signed_in = sign_in(&client, &Credentials::new("ada@example.com", "hunter2"))
        .await
        .unwrap();
    assert_eq!(signed_in.authentication.access_token, "at");
    assert_eq!(signed_in.redirect, Redirect::to(302, "/projects"));

    let failed = sign_in(&client, &Credentials::new("ada@example.com", "wrong")).await;
    assert_eq!(
        failed,
        Err(ActionFailure {
            status: 400,
            invalid: true
        })
    );
}

#[tokio::test]
async fn test_sign_in_sso_sends_id_token() {
    let app = Router::new().route(
        "/api/authenticateSso",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body, json!({"idToken": "jwt"}));
            ok(json!({"userId": "u2", "accessToken": "sso-at"}))
        }),
    );
    let client = ApiClient::new(spawn(app).await);

    let signed_in = sign_in_sso(&client, "jwt").await.unwrap();

    assert_eq!(signed_in.authentication.user_id, "u2");
    assert_eq!(signed_in.authentication.refresh_token, "");
}

#[tokio::test]
async fn test_task_configs_are_normalized() {
    let app = Router::new().route(
        "/api/pipelines",
        get(|| async {
            ok(json!({"items": [{
                "id": "p1",
                "Tasks": [{
                    "Id": "t1",
                    "type": "deploy",
                    "config": {"imageName": "api", "ServiceName": "api-svc", "RestartPolicy": "always"}
                }]
            }]}))
        }),
    );
    let client = ApiClient::new(spawn(app).await);

    let page = load_pipelines(&client, "42").await.unwrap();

    let task = page.pipelines[0].task("t1").expect("task t1");
    let TaskKind::Deploy(config) = &task.kind else {
        panic!("expected deploy task, got {:?}", task.kind);
    };
    assert_eq!(config.image_name, "api");
    assert_eq!(config.service_name, "api-svc");
    assert_eq!(config.restart_policy.as_deref(), Some("always"));
}

#[tokio::test]
async fn test_odd_tasks_do_not_empty_the_page() {
    let app = Router::new().route(
        "/api/pipelines",
        get(|| async {
            ok(json!({"items": [
                {"id": "p1", "tasks": []},
                {"id": "p2", "tasks": [
                    {"id": "t1", "type": "test", "config": {"suite": "smoke"}},
                    {"id": "t2", "type": "build", "config": null}
                ]}
            ]}))
        }),
    );
    let client = ApiClient::new(spawn(app).await);

    let page = load_pipelines(&client, "42").await.unwrap();

    assert_eq!(page.pipelines.len(), 2);
    let tasks = &page.pipelines[1].tasks;
    assert_eq!(tasks[0].kind.type_name(), "test");
    assert!(matches!(tasks[0].kind, TaskKind::Unrecognized { .. }));
    assert!(matches!(tasks[1].kind, TaskKind::Build(_)));
}
