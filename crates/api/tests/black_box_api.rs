use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use materials_api::app::{AppServices, build_router};
use materials_auth::{JwtClaims, PrincipalId, Role};
use reqwest::StatusCode;
use serde_json::{Value, json};

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod over in-memory stores, bound to an ephemeral port.
        let services = AppServices::in_memory(&["Supplier 1".to_string()]).expect("seed suppliers");
        let app = build_router(&services, JWT_SECRET);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(secret: &str, roles: Vec<Role>) -> String {
    let claims = JwtClaims::new(PrincipalId::new(), roles, Utc::now(), ChronoDuration::minutes(10));

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

async fn post(client: &reqwest::Client, url: String, token: &str, body: Value) -> Value {
    let res = client.post(url).bearer_auth(token).json(&body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

async fn get(client: &reqwest::Client, url: String, token: &str) -> Value {
    let res = client.get(url).bearer_auth(token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

fn single_key(body: &Value) -> &str {
    let obj = body.as_object().expect("envelope is an object");
    assert_eq!(obj.len(), 1, "envelope must have exactly one key: {body}");
    obj.keys().next().unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/materials")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let forged = mint_jwt("other-secret", vec![Role::new("admin")]);
    let res = client.get(srv.url("/materials")).bearer_auth(forged).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn whoami_reflects_token_roles() {
    let srv = TestServer::spawn().await;
    let token = mint_jwt(JWT_SECRET, vec![Role::new("admin")]);

    let body = get(&reqwest::Client::new(), srv.url("/whoami"), &token).await;
    assert!(body["roles"].as_array().unwrap().iter().any(|r| r == "admin"));
    assert!(body["principal_id"].as_str().is_some());
}

#[tokio::test]
async fn material_lifecycle_over_http() {
    let srv = TestServer::spawn().await;
    let token = mint_jwt(JWT_SECRET, vec![Role::new("user")]);
    let client = reqwest::Client::new();

    // Create M001 (valid) and M005 (below the price floor).
    let created = post(
        &client,
        srv.url("/materials/create"),
        &token,
        json!({ "code": "M001", "name": "Material 1", "type": "fabric", "buy_price": 200, "supplier_id": 1 }),
    )
    .await;
    assert_eq!(single_key(&created), "material");
    let id = created["material"]["id"].as_u64().unwrap();
    assert_eq!(created["material"]["type"], "fabric");
    assert_eq!(created["material"]["buy_price"].as_f64(), Some(200.0));

    let rejected = post(
        &client,
        srv.url("/materials/create"),
        &token,
        json!({ "code": "M005", "name": "Material 5", "type": "jeans", "buy_price": 50, "supplier_id": 1 }),
    )
    .await;
    assert_eq!(rejected, json!({ "error": "Material Buy Price cannot be less than 100" }));

    // List and filter.
    let listed = get(&client, srv.url("/materials"), &token).await;
    let codes: Vec<_> = listed["materials"].as_array().unwrap().iter().map(|m| m["code"].clone()).collect();
    assert_eq!(codes, vec![json!("M001")]);

    let fabric = post(&client, srv.url("/materials/filter"), &token, json!({ "type": "fabric" })).await;
    assert_eq!(fabric["materials"].as_array().unwrap().len(), 1);
    let cotton = post(&client, srv.url("/materials/filter"), &token, json!({ "type": "cotton" })).await;
    assert_eq!(cotton, json!({ "materials": [] }));

    // Update, then read back.
    let updated = post(
        &client,
        srv.url(&format!("/materials/{id}/update")),
        &token,
        json!({ "buy_price": 300 }),
    )
    .await;
    assert_eq!(updated["material"]["buy_price"].as_f64(), Some(300.0));
    let fetched = get(&client, srv.url(&format!("/materials/{id}")), &token).await;
    assert_eq!(fetched["material"]["buy_price"].as_f64(), Some(300.0));

    // Delete, then it is gone.
    let deleted = post(&client, srv.url(&format!("/materials/{id}/delete")), &token, json!({})).await;
    assert_eq!(deleted, json!({ "message": "Material deleted successfully" }));
    let missing = get(&client, srv.url(&format!("/materials/{id}")), &token).await;
    assert_eq!(missing, json!({ "error": "Material not found" }));
}

#[tokio::test]
async fn malformed_requests_get_error_envelopes() {
    let srv = TestServer::spawn().await;
    let token = mint_jwt(JWT_SECRET, vec![Role::new("user")]);
    let client = reqwest::Client::new();

    let bad_id = get(&client, srv.url("/materials/abc"), &token).await;
    assert_eq!(single_key(&bad_id), "error");

    let unknown_field = post(
        &client,
        srv.url("/materials/create"),
        &token,
        json!({ "code": "M1", "name": "n", "type": "fabric", "buy_price": 150, "colour": "red" }),
    )
    .await;
    assert_eq!(single_key(&unknown_field), "error");

    let unknown_type = post(
        &client,
        srv.url("/materials/create"),
        &token,
        json!({ "code": "M1", "name": "n", "type": "silk", "buy_price": 150 }),
    )
    .await;
    assert_eq!(single_key(&unknown_type), "error");
}

#[tokio::test]
async fn types_and_suppliers_endpoints() {
    let srv = TestServer::spawn().await;
    let token = mint_jwt(JWT_SECRET, vec![Role::new("user")]);
    let client = reqwest::Client::new();

    let types = get(&client, srv.url("/materials/available_types"), &token).await;
    assert_eq!(
        types,
        json!({ "types": [["fabric", "Fabric"], ["jeans", "Jeans"], ["cotton", "Cotton"]] })
    );

    let suppliers = get(&client, srv.url("/materials/suppliers"), &token).await;
    assert_eq!(suppliers, json!({ "suppliers": [{ "id": 1, "name": "Supplier 1" }] }));
}

#[tokio::test]
async fn callers_without_permission_get_forbidden_envelope() {
    let srv = TestServer::spawn().await;
    let token = mint_jwt(JWT_SECRET, vec![Role::new("viewer")]);
    let client = reqwest::Client::new();

    let body = get(&client, srv.url("/materials"), &token).await;
    assert_eq!(body, json!({ "error": "forbidden: missing permission 'materials.read'" }));

    // Types need authentication only.
    let types = get(&client, srv.url("/materials/available_types"), &token).await;
    assert_eq!(single_key(&types), "types");
}
