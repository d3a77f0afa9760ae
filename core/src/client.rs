//! Stateless HTTP request builder and response parser for the country API.
//!
//! # Design
//! `CountryClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use crate::error::ApiError;
use crate::http::{encode_segment, HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Country, CountryInput};

/// Synchronous, stateless client for the country API.
#[derive(Debug, Clone)]
pub struct CountryClient {
    base_url: String,
}

impl CountryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_countries(&self) -> HttpRequest {
        self.get(format!("{}/countries", self.base_url))
    }

    pub fn build_get_country(&self, id: i32) -> HttpRequest {
        self.get(format!("{}/countries/{id}", self.base_url))
    }

    pub fn build_create_country(&self, input: &CountryInput) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, format!("{}/countries", self.base_url), input)
    }

    pub fn build_update_country(&self, id: i32, input: &CountryInput) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Put, format!("{}/countries/{id}", self.base_url), input)
    }

    pub fn build_delete_country(&self, id: i32) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/countries/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `name` is escaped as a single path segment.
    pub fn build_code_by_name(&self, name: &str) -> HttpRequest {
        self.get(format!("{}/countries/code/{}", self.base_url, encode_segment(name)))
    }

    /// `code` is escaped as a single path segment.
    pub fn build_name_by_code(&self, code: &str) -> HttpRequest {
        self.get(format!("{}/countries/country/{}", self.base_url, encode_segment(code)))
    }

    pub fn parse_list_countries(&self, response: HttpResponse) -> Result<Vec<Country>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_get_country(&self, response: HttpResponse) -> Result<Country, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_country(&self, response: HttpResponse) -> Result<Country, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_update_country(&self, response: HttpResponse) -> Result<Country, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_delete_country(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }

    pub fn parse_code_by_name(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        Ok(bare_string(&response.body))
    }

    pub fn parse_name_by_code(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        Ok(bare_string(&response.body))
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn json(&self, method: HttpMethod, path: String, input: &CountryInput) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Lookup endpoints answer with plain text; tolerate a JSON-quoted string too.
fn bare_string(body: &str) -> String {
    serde_json::from_str::<String>(body).unwrap_or_else(|_| body.trim().to_string())
}
