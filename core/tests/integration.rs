//! Drive the controller against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then executes every request the
//! controller issues over real HTTP using ureq. Validates request building,
//! response parsing and the load-after-write cycle end to end.

use std::collections::BTreeMap;

use country_core::{
    Action, CountryClient, CountryListClient, Effect, FormMode, HttpMethod, HttpRequest, HttpResponse,
    Lookup, Placeholder, Row, Transport, TransportError,
};
use mock_server::NewCountry;

/// Executes requests with ureq, returning 4xx/5xx responses as data.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse::new(status, body))
    }
}

/// Start the mock server on a random port and return its `/api` base URL.
fn start_server(seed: Vec<NewCountry>) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with_seed(listener, seed).await
        })
        .unwrap();
    });

    format!("http://{addr}/api")
}

fn request_counts(transport: &UreqTransport, base_url: &str) -> BTreeMap<String, u64> {
    let req = HttpRequest {
        method: HttpMethod::Get,
        path: format!("{base_url}/requests"),
        headers: Vec::new(),
        body: None,
    };
    let response = transport.execute(&req).unwrap();
    serde_json::from_str(&response.body).unwrap()
}

fn country_ids(controller: &CountryListClient) -> Vec<i32> {
    controller
        .rows()
        .iter()
        .filter_map(|row| match row {
            Row::Country { id, .. } => Some(*id),
            Row::Placeholder(_) => None,
        })
        .collect()
}

#[test]
fn crud_lifecycle() {
    let base_url = start_server(Vec::new());
    let transport = UreqTransport::new();
    let mut controller = CountryListClient::new(CountryClient::new(&base_url));

    // Step 1: refresh: empty placeholder.
    controller.perform(Action::Refresh, &transport);
    assert_eq!(controller.rows(), vec![Row::Placeholder(Placeholder::Empty)]);

    // Step 2: create: exactly one reload follows.
    controller.perform(Action::SetName("Testland".into()), &transport);
    controller.perform(Action::SetCode("TL".into()), &transport);
    assert!(controller.perform(Action::Submit, &transport).is_none());
    assert_eq!(controller.form().mode(), FormMode::Empty);
    assert_eq!(country_ids(&controller), vec![1]);
    let counts = request_counts(&transport, &base_url);
    assert_eq!(counts["create"], 1);
    assert_eq!(counts["list"], 2);

    // Step 3: begin edit: no mutation on the server.
    let effect = controller.perform(Action::BeginEdit(1), &transport);
    assert_eq!(effect, Some(Effect::FocusForm));
    assert_eq!(controller.form().mode(), FormMode::Editing(1));
    assert_eq!(controller.form().code, "TL");
    let counts = request_counts(&transport, &base_url);
    assert!(!counts.contains_key("update"));

    // Step 4: rejected update keeps the form.
    controller.perform(Action::SetCode("TOOLONG".into()), &transport);
    controller.perform(Action::Submit, &transport);
    assert_eq!(controller.form().mode(), FormMode::Editing(1));
    assert_eq!(
        controller.notices().latest().unwrap().message,
        "Error: Country code must be at most 3 characters"
    );

    // Step 5: update.
    controller.perform(Action::SetCode("TS".into()), &transport);
    controller.perform(Action::Submit, &transport);
    assert_eq!(controller.form().mode(), FormMode::Empty);
    match &controller.rows()[0] {
        Row::Country { id, code, .. } => {
            assert_eq!(*id, 1);
            assert_eq!(code, "TS");
        }
        other => panic!("expected a country row, got {other:?}"),
    }

    // Step 6: lookups.
    controller.perform(Action::LookupCode("Testland".into()), &transport);
    assert_eq!(controller.lookup(Lookup::CodeByName).to_string(), "Code: TS");
    controller.perform(Action::LookupName("TS".into()), &transport);
    assert_eq!(controller.lookup(Lookup::NameByCode).to_string(), "Country: Testland");
    controller.perform(Action::LookupCode("Wonderland".into()), &transport);
    assert_eq!(controller.lookup(Lookup::CodeByName).to_string(), "Country not found");

    // Step 7: delete needs confirmation.
    let effect = controller.perform(Action::Remove(1), &transport);
    assert!(matches!(effect, Some(Effect::Confirm { id: 1, .. })));
    assert!(!request_counts(&transport, &base_url).contains_key("delete"));
    controller.perform(Action::Confirm(true), &transport);
    assert_eq!(controller.rows(), vec![Row::Placeholder(Placeholder::Empty)]);
    assert_eq!(controller.notices().latest().unwrap().message, "Country deleted successfully");

    let counts = request_counts(&transport, &base_url);
    assert_eq!(counts["delete"], 1);
    assert_eq!(counts["update"], 2);
    // initial + create + update + delete; the rejected update did not reload
    assert_eq!(counts["list"], 4);
}

#[test]
fn seeded_lookup_with_escaped_name() {
    let base_url = start_server(vec![NewCountry {
        name: "Costa Rica".to_string(),
        code: "CR".to_string(),
    }]);
    let transport = UreqTransport::new();
    let mut controller = CountryListClient::new(CountryClient::new(&base_url));

    controller.perform(Action::LookupCode("Costa Rica".into()), &transport);
    assert_eq!(controller.lookup(Lookup::CodeByName).to_string(), "Code: CR");
}

#[test]
fn unreachable_server_is_not_fatal() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let transport = UreqTransport::new();
    let mut controller = CountryListClient::new(CountryClient::new(&format!("http://{addr}/api")));

    controller.perform(Action::Refresh, &transport);
    assert_eq!(controller.rows(), vec![Row::Placeholder(Placeholder::LoadError)]);

    controller.perform(Action::SetName("Testland".into()), &transport);
    controller.perform(Action::SetCode("TL".into()), &transport);
    controller.perform(Action::Submit, &transport);
    assert_eq!(controller.form().name, "Testland");
    assert_eq!(
        controller.notices().latest().unwrap().message,
        "Error: Could not reach server"
    );
}
