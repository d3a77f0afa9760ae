//! The country list controller.
//!
//! # Design
//! `CountryListClient` owns every piece of client state: the form, the last
//! fetched list, the two lookup results, the notice board and the table of
//! in-flight requests. It never performs I/O. `dispatch` turns a user action
//! into at most one `Effect`; when that effect is a request, the host executes
//! it and reports the outcome through `complete`, which may in turn yield the
//! follow-up effect (the reload after a mutation).
//!
//! Completions are applied in the order they arrive, whatever order the
//! requests were issued in. There is no cancellation.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, warn};

use crate::client::CountryClient;
use crate::error::ApiError;
use crate::form::FormState;
use crate::http::{HttpRequest, HttpResponse, TransportError};
use crate::notice::{NoticeBoard, NoticeKind};
use crate::view::{render_table, ListState, Lookup, LookupState, LookupView, Row};

pub type Ticket = u64;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this country?";

/// A discrete user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refresh,
    SetName(String),
    SetCode(String),
    Submit,
    Clear,
    BeginEdit(i32),
    Remove(i32),
    Confirm(bool),
    LookupCode(String),
    LookupName(String),
    Dismiss(u64),
}

/// Something the host has to do on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Execute the request, then call `complete` with the same ticket.
    Request(Ticket, HttpRequest),
    /// Ask the user, then dispatch `Action::Confirm`.
    Confirm { id: i32, prompt: String },
    /// Bring the edit form into view.
    FocusForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Refresh,
    Create,
    Update(i32),
    Load(i32),
    Delete(i32),
    LookupCode,
    LookupName,
}

/// Executes requests for `CountryListClient::perform`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug)]
pub struct CountryListClient {
    client: CountryClient,
    form: FormState,
    list: ListState,
    notices: NoticeBoard,
    code_lookup: LookupState,
    name_lookup: LookupState,
    awaiting_confirmation: Option<i32>,
    in_flight: HashMap<Ticket, Operation>,
    next_ticket: Ticket,
}

impl CountryListClient {
    pub fn new(client: CountryClient) -> Self {
        Self {
            client,
            form: FormState::default(),
            list: ListState::default(),
            notices: NoticeBoard::default(),
            code_lookup: LookupState::default(),
            name_lookup: LookupState::default(),
            awaiting_confirmation: None,
            in_flight: HashMap::new(),
            next_ticket: 0,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn rows(&self) -> Vec<Row> {
        render_table(&self.list)
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn lookup(&self, lookup: Lookup) -> LookupView<'_> {
        let state = match lookup {
            Lookup::CodeByName => &self.code_lookup,
            Lookup::NameByCode => &self.name_lookup,
        };
        LookupView { lookup, state }
    }

    pub fn awaiting_confirmation(&self) -> Option<i32> {
        self.awaiting_confirmation
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Drop notices whose delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        self.notices.expire(now);
    }

    /// Handle one user action.
    pub fn dispatch(&mut self, action: Action, now: Instant) -> Option<Effect> {
        self.tick(now);
        match action {
            Action::Refresh => Some(self.refresh()),
            Action::SetName(name) => {
                self.form.name = name;
                None
            }
            Action::SetCode(code) => {
                self.form.code = code;
                None
            }
            Action::Submit => self.submit(now),
            Action::Clear => {
                self.form.clear();
                None
            }
            Action::BeginEdit(id) => Some(self.begin_edit(id)),
            Action::Remove(id) => {
                self.awaiting_confirmation = Some(id);
                Some(Effect::Confirm {
                    id,
                    prompt: DELETE_PROMPT.to_string(),
                })
            }
            Action::Confirm(answer) => self.confirm(answer),
            Action::LookupCode(name) => self.lookup_code_by_name(&name),
            Action::LookupName(code) => self.lookup_name_by_code(&code),
            Action::Dismiss(id) => {
                if !self.notices.dismiss(id) {
                    debug!("dismiss: no live notice #{id}");
                }
                None
            }
        }
    }

    /// Apply the outcome of the request issued under `ticket`.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<HttpResponse, TransportError>,
        now: Instant,
    ) -> Option<Effect> {
        self.tick(now);
        let Some(operation) = self.in_flight.remove(&ticket) else {
            warn!("completion for unknown ticket {ticket}");
            return None;
        };
        let response = outcome.map_err(ApiError::from);
        debug!("ticket {ticket} ({operation:?}) completed");

        match operation {
            Operation::Refresh => {
                match response.and_then(|r| self.client.parse_list_countries(r)) {
                    Ok(countries) => self.list = ListState::Loaded(countries),
                    Err(err) => {
                        warn!("refresh failed: {err}");
                        self.list = ListState::Failed;
                    }
                }
                None
            }
            Operation::Create | Operation::Update(_) => {
                let parsed = response.and_then(|r| match operation {
                    Operation::Create => self.client.parse_create_country(r),
                    _ => self.client.parse_update_country(r),
                });
                match parsed {
                    Ok(country) => {
                        let verb = if operation == Operation::Create { "created" } else { "updated" };
                        debug!("country {} {verb}", country.id);
                        self.notices.success(format!("Country {verb} successfully"), now);
                        self.form.clear();
                        Some(self.refresh())
                    }
                    Err(err) => {
                        warn!("submit failed: {err}");
                        self.notices.error(err.user_message(), now);
                        None
                    }
                }
            }
            Operation::Load(id) => match response.and_then(|r| self.client.parse_get_country(r)) {
                Ok(country) => {
                    self.form.populate(&country);
                    Some(Effect::FocusForm)
                }
                Err(err) => {
                    warn!("loading country {id} failed: {err}");
                    self.notices.post(NoticeKind::Error, "Error loading country data", now);
                    None
                }
            },
            Operation::Delete(id) => match response.and_then(|r| self.client.parse_delete_country(r)) {
                Ok(()) => {
                    self.notices.success("Country deleted successfully", now);
                    Some(self.refresh())
                }
                Err(err) => {
                    warn!("deleting country {id} failed: {err}");
                    self.notices.error(err.user_message(), now);
                    None
                }
            },
            Operation::LookupCode => {
                self.code_lookup = lookup_state(response.and_then(|r| self.client.parse_code_by_name(r)));
                None
            }
            Operation::LookupName => {
                self.name_lookup = lookup_state(response.and_then(|r| self.client.parse_name_by_code(r)));
                None
            }
        }
    }

    /// Dispatch `action` and execute every request it leads to, in order,
    /// through `transport`. Returns the first non-request effect, if any.
    pub fn perform<T: Transport + ?Sized>(&mut self, action: Action, transport: &T) -> Option<Effect> {
        let mut effect = self.dispatch(action, Instant::now());
        loop {
            match effect {
                Some(Effect::Request(ticket, request)) => {
                    let outcome = transport.execute(&request);
                    effect = self.complete(ticket, outcome, Instant::now());
                }
                other => return other,
            }
        }
    }

    fn refresh(&mut self) -> Effect {
        let request = self.client.build_list_countries();
        self.issue(Operation::Refresh, request)
    }

    fn submit(&mut self, now: Instant) -> Option<Effect> {
        let input = match self.form.validate() {
            Ok(input) => input,
            Err(err) => {
                self.notices.post(NoticeKind::Error, err.user_message(), now);
                return None;
            }
        };
        let (operation, built) = match self.form.id {
            Some(id) => (Operation::Update(id), self.client.build_update_country(id, &input)),
            None => (Operation::Create, self.client.build_create_country(&input)),
        };
        match built {
            Ok(request) => Some(self.issue(operation, request)),
            Err(err) => {
                self.notices.error(err.user_message(), now);
                None
            }
        }
    }

    fn begin_edit(&mut self, id: i32) -> Effect {
        let request = self.client.build_get_country(id);
        self.issue(Operation::Load(id), request)
    }

    fn confirm(&mut self, answer: bool) -> Option<Effect> {
        let Some(id) = self.awaiting_confirmation.take() else {
            debug!("confirmation with nothing pending");
            return None;
        };
        if !answer {
            debug!("delete of country {id} cancelled");
            return None;
        }
        let request = self.client.build_delete_country(id);
        Some(self.issue(Operation::Delete(id), request))
    }

    fn lookup_code_by_name(&mut self, name: &str) -> Option<Effect> {
        let name = name.trim();
        if name.is_empty() {
            self.code_lookup = LookupState::Invalid("Please enter a country name".to_string());
            return None;
        }
        self.code_lookup = LookupState::Pending;
        let request = self.client.build_code_by_name(name);
        Some(self.issue(Operation::LookupCode, request))
    }

    fn lookup_name_by_code(&mut self, code: &str) -> Option<Effect> {
        let code = code.trim();
        if code.is_empty() {
            self.name_lookup = LookupState::Invalid("Please enter a country code".to_string());
            return None;
        }
        self.name_lookup = LookupState::Pending;
        let request = self.client.build_name_by_code(code);
        Some(self.issue(Operation::LookupName, request))
    }

    fn issue(&mut self, operation: Operation, request: HttpRequest) -> Effect {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        debug!("ticket {ticket}: {} {}", request.method, request.path);
        self.in_flight.insert(ticket, operation);
        Effect::Request(ticket, request)
    }
}

fn lookup_state(result: Result<String, ApiError>) -> LookupState {
    match result {
        Ok(value) => LookupState::Found(value),
        Err(ApiError::NotFound) => LookupState::NotFound,
        Err(err) => {
            warn!("lookup failed: {err}");
            LookupState::Failed
        }
    }
}
