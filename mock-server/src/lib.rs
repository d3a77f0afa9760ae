use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const MAX_CODE_LEN: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub code: String,
}

/// Body of create and update, and the shape of a seed entry.
#[derive(Clone, Debug, Deserialize)]
pub struct NewCountry {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Default)]
pub struct Store {
    countries: BTreeMap<i32, Country>,
    last_id: i32,
    requests: BTreeMap<&'static str, u64>,
}

impl Store {
    fn insert(&mut self, input: NewCountry) -> Country {
        self.last_id += 1;
        let country = Country {
            id: self.last_id,
            name: input.name,
            code: input.code,
        };
        self.countries.insert(country.id, country.clone());
        country
    }

    fn count(&mut self, operation: &'static str) {
        *self.requests.entry(operation).or_insert(0) += 1;
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Failure responses. `BadRequest` carries a structured `{"message": ...}` body.
#[derive(Debug)]
pub enum Failure {
    BadRequest(String),
    NotFound,
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        match self {
            Failure::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            Failure::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

pub fn app() -> Router {
    app_with_seed(Vec::new())
}

/// Router whose store starts with `seed`, ids assigned in order from 1.
pub fn app_with_seed(seed: Vec<NewCountry>) -> Router {
    let mut store = Store::default();
    for entry in seed {
        store.insert(entry);
    }
    let db: Db = Arc::new(RwLock::new(store));
    let api = Router::new()
        .route("/countries", get(list_countries).post(create_country))
        .route(
            "/countries/{id}",
            get(get_country).put(update_country).delete(delete_country),
        )
        .route("/countries/code/{name}", get(code_by_name))
        .route("/countries/country/{code}", get(name_by_code))
        .route("/requests", get(request_counts))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_seed(listener, Vec::new()).await
}

pub async fn run_with_seed(listener: TcpListener, seed: Vec<NewCountry>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_seed(seed)).await
}

fn validate(input: NewCountry) -> Result<NewCountry, Failure> {
    let name = input.name.trim();
    let code = input.code.trim();
    if name.is_empty() || code.is_empty() {
        return Err(Failure::BadRequest("Country name and code are required".to_string()));
    }
    if code.chars().count() > MAX_CODE_LEN {
        return Err(Failure::BadRequest(format!(
            "Country code must be at most {MAX_CODE_LEN} characters"
        )));
    }
    Ok(NewCountry {
        name: name.to_string(),
        code: code.to_string(),
    })
}

async fn list_countries(State(db): State<Db>) -> Json<Vec<Country>> {
    let mut store = db.write().await;
    store.count("list");
    Json(store.countries.values().cloned().collect())
}

async fn create_country(
    State(db): State<Db>,
    Json(input): Json<NewCountry>,
) -> Result<(StatusCode, Json<Country>), Failure> {
    let mut store = db.write().await;
    store.count("create");
    let country = store.insert(validate(input)?);
    info!("created country {} ({})", country.id, country.code);
    Ok((StatusCode::CREATED, Json(country)))
}

async fn get_country(State(db): State<Db>, Path(id): Path<i32>) -> Result<Json<Country>, Failure> {
    let mut store = db.write().await;
    store.count("get");
    store.countries.get(&id).cloned().map(Json).ok_or(Failure::NotFound)
}

async fn update_country(
    State(db): State<Db>,
    Path(id): Path<i32>,
    Json(input): Json<NewCountry>,
) -> Result<Json<Country>, Failure> {
    let mut store = db.write().await;
    store.count("update");
    let input = validate(input)?;
    let country = store.countries.get_mut(&id).ok_or(Failure::NotFound)?;
    country.name = input.name;
    country.code = input.code;
    Ok(Json(country.clone()))
}

/// Always 204: deleting an absent id is not an error.
async fn delete_country(State(db): State<Db>, Path(id): Path<i32>) -> StatusCode {
    let mut store = db.write().await;
    store.count("delete");
    if store.countries.remove(&id).is_some() {
        info!("deleted country {id}");
    }
    StatusCode::NO_CONTENT
}

async fn code_by_name(State(db): State<Db>, Path(name): Path<String>) -> Result<String, Failure> {
    let mut store = db.write().await;
    store.count("code_by_name");
    store
        .countries
        .values()
        .find(|c| c.name == name)
        .map(|c| c.code.clone())
        .ok_or(Failure::NotFound)
}

async fn name_by_code(State(db): State<Db>, Path(code): Path<String>) -> Result<String, Failure> {
    let mut store = db.write().await;
    store.count("name_by_code");
    store
        .countries
        .values()
        .find(|c| c.code == code)
        .map(|c| c.name.clone())
        .ok_or(Failure::NotFound)
}

async fn request_counts(State(db): State<Db>) -> Json<BTreeMap<&'static str, u64>> {
    Json(db.read().await.requests.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, code: &str) -> NewCountry {
        NewCountry {
            name: name.to_string(),
            code: code.to_string(),
        }
    }

    #[test]
    fn country_serializes_to_json() {
        let country = Country {
            id: 7,
            name: "Testland".to_string(),
            code: "TL".to_string(),
        };
        let json = serde_json::to_value(&country).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Testland");
        assert_eq!(json["code"], "TL");
    }

    #[test]
    fn new_country_rejects_missing_code() {
        let result: Result<NewCountry, _> = serde_json::from_str(r#"{"name":"Testland"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn ids_are_assigned_in_order() {
        let mut store = Store::default();
        assert_eq!(store.insert(input("A", "AA")).id, 1);
        assert_eq!(store.insert(input("B", "BB")).id, 2);
    }

    #[test]
    fn validate_trims_and_checks_code_length() {
        let ok = validate(input("  Testland ", " TL ")).unwrap();
        assert_eq!(ok.name, "Testland");
        assert_eq!(ok.code, "TL");
        assert!(matches!(validate(input("", "TL")), Err(Failure::BadRequest(_))));
        assert!(matches!(validate(input("Testland", "TOOL")), Err(Failure::BadRequest(_))));
    }

    #[test]
    fn request_counter_accumulates() {
        let mut store = Store::default();
        store.count("list");
        store.count("list");
        store.count("get");
        assert_eq!(store.requests["list"], 2);
        assert_eq!(store.requests["get"], 1);
    }
}
