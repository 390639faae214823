#![allow(dead_code)]
//! In-process fixture backend for the console's integration tests. Serves
//! the same endpoints and envelopes as the real catalog API over an
//! in-memory store, plus a token endpoint for the acquisition tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use url::Url;

use birdworld_console::api::birds::BirdsApi;
use birdworld_console::api::client::ApiClient;
use birdworld_console::api::habitats::HabitatsApi;
use birdworld_console::api::regions::RegionsApi;
use birdworld_console::services::auth::claims::OWNER_PERMISSIONS;
use birdworld_console::services::auth::provider::{AcquiredToken, TokenError, TokenProvider};
use birdworld_console::session::SessionManager;

const ITEMS_PER_PAGE: usize = 10;

pub struct Fixture {
    pub birds: Mutex<Vec<Value>>,
    pub habitats: Mutex<Vec<Value>>,
    pub regions: Vec<Value>,
    next_bird_id: AtomicU64,
    next_habitat_id: AtomicU64,
    pub bird_list_hits: AtomicUsize,
    pub last_authorization: Mutex<Option<String>>,
    pub fail_search: AtomicBool,
    pub deny_token: AtomicBool,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            birds: Mutex::new(Vec::new()),
            habitats: Mutex::new(vec![
                json!({ "id": 1, "name": "Wetland", "region_id": 1 }),
                json!({ "id": 2, "name": "Savanna", "region_id": 2 }),
            ]),
            regions: vec![
                json!({ "id": 1, "name": "Africa", "image_link": "https://maps.test/africa.png" }),
                json!({ "id": 2, "name": "Europe", "image_link": "https://maps.test/europe.png" }),
            ],
            next_bird_id: AtomicU64::new(1),
            next_habitat_id: AtomicU64::new(3),
            bird_list_hits: AtomicUsize::new(0),
            last_authorization: Mutex::new(None),
            fail_search: AtomicBool::new(false),
            deny_token: AtomicBool::new(false),
        }
    }

    pub fn seed_birds(&self, count: usize) {
        let mut birds = self.birds.lock().unwrap();
        for _ in 0..count {
            let id = self.next_bird_id.fetch_add(1, Ordering::SeqCst);
            birds.push(json!({
                "id": id,
                "common_name": format!("Bird {id}"),
                "species": format!("Species {id}"),
                "image_link": "",
                "habitats": [{ "id": 1, "name": "Wetland" }],
                "regions": [{ "name": "Africa", "image": "https://maps.test/africa.png" }],
            }));
        }
    }
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": 404, "message": "resource not found" })),
    )
}

fn bad_request() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": 400, "message": "bad request" })),
    )
}

fn page_param(query: &HashMap<String, String>) -> usize {
    query
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
        .max(1)
}

async fn list_birds(
    State(fixture): State<Arc<Fixture>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    fixture.bird_list_hits.fetch_add(1, Ordering::SeqCst);
    *fixture.last_authorization.lock().unwrap() = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let page = page_param(&query);
    let birds = fixture.birds.lock().unwrap();
    let start = (page - 1) * ITEMS_PER_PAGE;
    if start >= birds.len() {
        return not_found();
    }
    let slice = &birds[start..(start + ITEMS_PER_PAGE).min(birds.len())];
    (
        StatusCode::OK,
        Json(json!({ "success": true, "birds": slice, "total_birds": birds.len() })),
    )
}

async fn get_bird(
    State(fixture): State<Arc<Fixture>>,
    Path(id): Path<u64>,
) -> (StatusCode, Json<Value>) {
    let birds = fixture.birds.lock().unwrap();
    match birds.iter().find(|b| b["id"] == json!(id)) {
        Some(bird) => (StatusCode::OK, Json(json!({ "success": true, "bird": bird }))),
        None => not_found(),
    }
}

fn habitat_refs(fixture: &Fixture, ids: &[u64]) -> Option<(Vec<Value>, Vec<Value>)> {
    let habitats = fixture.habitats.lock().unwrap();
    let mut refs = Vec::new();
    let mut regions = Vec::new();
    for id in ids {
        let habitat = habitats.iter().find(|h| h["id"] == json!(id))?;
        refs.push(json!({ "id": habitat["id"], "name": habitat["name"] }));
        if let Some(region) = fixture
            .regions
            .iter()
            .find(|r| r["id"] == habitat["region_id"])
        {
            let entry = json!({ "name": region["name"], "image": region["image_link"] });
            if !regions.contains(&entry) {
                regions.push(entry);
            }
        }
    }
    Some((refs, regions))
}

async fn create_bird(
    State(fixture): State<Arc<Fixture>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let common_name = body["common_name"].as_str().unwrap_or_default().to_string();
    let species = body["species"].as_str().unwrap_or_default().to_string();
    let habitat_ids: Vec<u64> = body["habitats"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_u64).collect())
        .unwrap_or_default();

    if common_name.is_empty() || species.is_empty() || habitat_ids.is_empty() {
        return bad_request();
    }
    let Some((refs, regions)) = habitat_refs(&fixture, &habitat_ids) else {
        return not_found();
    };

    let mut birds = fixture.birds.lock().unwrap();
    if birds
        .iter()
        .any(|b| b["common_name"] == json!(common_name.as_str()))
    {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "success": false, "error": 422, "message": "duplicate bird resource" })),
        );
    }

    let id = fixture.next_bird_id.fetch_add(1, Ordering::SeqCst);
    birds.push(json!({
        "id": id,
        "common_name": common_name,
        "species": species,
        "image_link": body["image_link"].as_str().unwrap_or_default(),
        "habitats": refs,
        "regions": regions,
    }));
    (StatusCode::OK, Json(json!({ "success": true, "bird": id })))
}

async fn patch_bird(
    State(fixture): State<Arc<Fixture>>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let habitat_ids: Vec<u64> = body["habitats"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_u64).collect())
        .unwrap_or_default();
    let resolved = if habitat_ids.is_empty() {
        None
    } else {
        match habitat_refs(&fixture, &habitat_ids) {
            Some(resolved) => Some(resolved),
            None => return not_found(),
        }
    };

    let mut birds = fixture.birds.lock().unwrap();
    let Some(bird) = birds.iter_mut().find(|b| b["id"] == json!(id)) else {
        return not_found();
    };
    for field in ["common_name", "species", "image_link"] {
        if let Some(value) = body[field].as_str() {
            bird[field] = json!(value);
        }
    }
    if let Some((refs, regions)) = resolved {
        bird["habitats"] = json!(refs);
        bird["regions"] = json!(regions);
    }
    (StatusCode::OK, Json(json!({ "success": true, "bird": id })))
}

async fn delete_bird(
    State(fixture): State<Arc<Fixture>>,
    Path(id): Path<u64>,
) -> (StatusCode, Json<Value>) {
    let mut birds = fixture.birds.lock().unwrap();
    let before = birds.len();
    birds.retain(|b| b["id"] != json!(id));
    if birds.len() == before {
        return not_found();
    }
    (StatusCode::OK, Json(json!({ "success": true, "deleted": id })))
}

async fn list_habitats(
    State(fixture): State<Arc<Fixture>>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let page = page_param(&query);
    let habitats = fixture.habitats.lock().unwrap();
    let start = (page - 1) * ITEMS_PER_PAGE;
    if start >= habitats.len() {
        return not_found();
    }
    let slice = &habitats[start..(start + ITEMS_PER_PAGE).min(habitats.len())];
    (
        StatusCode::OK,
        Json(json!({ "success": true, "habitats": slice, "total_habitats": habitats.len() })),
    )
}

async fn get_habitat(
    State(fixture): State<Arc<Fixture>>,
    Path(id): Path<u64>,
) -> (StatusCode, Json<Value>) {
    let habitats = fixture.habitats.lock().unwrap();
    match habitats.iter().find(|h| h["id"] == json!(id)) {
        Some(habitat) => (
            StatusCode::OK,
            Json(json!({ "success": true, "habitat": habitat })),
        ),
        None => not_found(),
    }
}

/// The collection endpoint doubles as search when the body carries a
/// `search` key, exactly like the real backend.
async fn post_habitats(
    State(fixture): State<Arc<Fixture>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some(search) = body["search"].as_str() {
        if fixture.fail_search.load(Ordering::SeqCst) {
            return (
                StatusCode::OK,
                Json(json!({ "success": false, "message": "Search Failed" })),
            );
        }
        let needle = search.to_lowercase();
        let habitats = fixture.habitats.lock().unwrap();
        let matches: Vec<&Value> = habitats
            .iter()
            .filter(|h| {
                h["name"]
                    .as_str()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .collect();
        return (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "habitats": matches,
                "total_habitats": matches.len(),
            })),
        );
    }

    let name = body["name"].as_str().unwrap_or_default().to_string();
    let Some(region_id) = body["region_id"].as_u64() else {
        return bad_request();
    };
    if name.is_empty() || !fixture.regions.iter().any(|r| r["id"] == json!(region_id)) {
        return bad_request();
    }

    let mut habitats = fixture.habitats.lock().unwrap();
    if habitats.iter().any(|h| h["name"] == json!(name.as_str())) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "success": false, "error": 422, "message": "Habitat resource already exist" })),
        );
    }
    let id = fixture.next_habitat_id.fetch_add(1, Ordering::SeqCst);
    let habitat = json!({ "id": id, "name": name, "region_id": region_id });
    habitats.push(habitat.clone());
    drop(habitats);

    // Optional back-link: attach the new habitat to an existing bird.
    if let Some(bird_id) = body["bird"].as_u64() {
        let mut birds = fixture.birds.lock().unwrap();
        if let Some(bird) = birds.iter_mut().find(|b| b["id"] == json!(bird_id))
            && let Some(refs) = bird["habitats"].as_array_mut()
        {
            refs.push(json!({ "id": id, "name": habitat["name"] }));
        }
    }

    (
        StatusCode::OK,
        Json(json!({ "success": true, "habitat": habitat })),
    )
}

async fn patch_habitat(
    State(fixture): State<Arc<Fixture>>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some(region_id) = body["region_id"].as_u64()
        && !fixture.regions.iter().any(|r| r["id"] == json!(region_id))
    {
        return bad_request();
    }

    let mut habitats = fixture.habitats.lock().unwrap();
    let Some(habitat) = habitats.iter_mut().find(|h| h["id"] == json!(id)) else {
        return not_found();
    };
    if let Some(name) = body["name"].as_str() {
        habitat["name"] = json!(name);
    }
    if let Some(region_id) = body["region_id"].as_u64() {
        habitat["region_id"] = json!(region_id);
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "habitat": id })),
    )
}

async fn delete_habitat(
    State(fixture): State<Arc<Fixture>>,
    Path(id): Path<u64>,
) -> (StatusCode, Json<Value>) {
    let mut habitats = fixture.habitats.lock().unwrap();
    let before = habitats.len();
    habitats.retain(|h| h["id"] != json!(id));
    if habitats.len() == before {
        return not_found();
    }
    (StatusCode::OK, Json(json!({ "success": true, "deleted": id })))
}

async fn list_regions(State(fixture): State<Arc<Fixture>>) -> Json<Value> {
    Json(json!({ "success": true, "regions": fixture.regions }))
}

async fn token_endpoint(
    State(fixture): State<Arc<Fixture>>,
    Json(_body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if fixture.deny_token.load(Ordering::SeqCst) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "access_denied",
                "error_description": "Wrong email or password.",
            })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "access_token": mint_token(&OWNER_PERMISSIONS),
            "token_type": "Bearer",
            "expires_in": 600,
        })),
    )
}

pub fn router(fixture: Arc<Fixture>) -> Router {
    Router::new()
        .route("/birds", get(list_birds).post(create_bird))
        .route(
            "/birds/{id}",
            get(get_bird).patch(patch_bird).delete(delete_bird),
        )
        .route("/habitats", get(list_habitats).post(post_habitats))
        .route(
            "/habitats/{id}",
            get(get_habitat).patch(patch_habitat).delete(delete_habitat),
        )
        .route("/regions", get(list_regions))
        .route("/oauth/token", post(token_endpoint))
        .with_state(fixture)
}

pub async fn spawn(fixture: Arc<Fixture>) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(fixture);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Mint a signed HS256 token carrying the given permissions. The console
/// never verifies signatures, so any well-formed JWT works; signing keeps
/// the fixture honest about token shape.
pub fn mint_token(permissions: &[&str]) -> String {
    let claims = json!({
        "iss": "https://fixture.test/",
        "sub": "auth0|fixture",
        "aud": "birds",
        "exp": 4_102_444_800u64,
        "permissions": permissions,
    });
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"fixture-secret"),
    )
    .unwrap()
}

/// Provider that hands out a canned token (or fails when given none),
/// standing in for the identity provider.
pub struct StaticProvider {
    pub token: Option<String>,
}

#[async_trait::async_trait]
impl TokenProvider for StaticProvider {
    async fn acquire(&self) -> Result<AcquiredToken, TokenError> {
        match &self.token {
            Some(token) => Ok(AcquiredToken {
                access_token: token.clone(),
                expires_in: Some(600),
            }),
            None => Err(TokenError::MissingToken),
        }
    }
}

pub struct Console {
    pub session: SessionManager,
    pub birds: BirdsApi,
    pub habitats: HabitatsApi,
    pub regions: RegionsApi,
}

/// Build the console's session/gateway graph against the fixture, signed
/// in when a token is supplied.
pub async fn connect(addr: SocketAddr, token: Option<String>) -> Console {
    let signed_in = token.is_some();
    let session = SessionManager::new(Arc::new(StaticProvider { token }));
    if signed_in {
        session.ensure_token().await.unwrap();
    }

    let base = Url::parse(&format!("http://{addr}/")).unwrap();
    let client = ApiClient::new(reqwest::Client::new(), base, session.handle());
    Console {
        birds: BirdsApi::new(client.clone()),
        habitats: HabitatsApi::new(client.clone()),
        regions: RegionsApi::new(client),
        session,
    }
}
