//! Render state into rows and result lines.
//!
//! Rendering is a pure function of controller state, borrowed. The `Display`
//! impls give the text form used by the terminal host.

use std::fmt;

use crate::notice::{Notice, NoticeKind};
use crate::types::Country;

/// What the last `GET /countries` left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    NotLoaded,
    Loaded(Vec<Country>),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit(i32),
    Delete(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Empty,
    LoadError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Country {
        id: i32,
        name: String,
        code: String,
        actions: [RowAction; 2],
    },
    Placeholder(Placeholder),
}

impl Row {
    pub fn actions(&self) -> &[RowAction] {
        match self {
            Row::Country { actions, .. } => actions.as_slice(),
            Row::Placeholder(_) => &[],
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::Country { id, name, code, .. } => {
                write!(f, "{id:>4} | {name} | {code} | [edit] [delete]")
            }
            Row::Placeholder(Placeholder::Empty) => f.write_str("No countries found"),
            Row::Placeholder(Placeholder::LoadError) => f.write_str("Error loading countries"),
        }
    }
}

/// One row per country in server order, or a single placeholder row.
///
/// Before the first load there are no rows at all.
pub fn render_table(list: &ListState) -> Vec<Row> {
    match list {
        ListState::NotLoaded => Vec::new(),
        ListState::Failed => vec![Row::Placeholder(Placeholder::LoadError)],
        ListState::Loaded(countries) if countries.is_empty() => {
            vec![Row::Placeholder(Placeholder::Empty)]
        }
        ListState::Loaded(countries) => countries
            .iter()
            .map(|c| Row::Country {
                id: c.id,
                name: c.name.clone(),
                code: c.code.clone(),
                actions: [RowAction::Edit(c.id), RowAction::Delete(c.id)],
            })
            .collect(),
    }
}

/// Which of the two lookups a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    CodeByName,
    NameByCode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LookupState {
    #[default]
    Idle,
    Pending,
    Found(String),
    NotFound,
    Invalid(String),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupView<'a> {
    pub lookup: Lookup,
    pub state: &'a LookupState,
}

impl fmt::Display for LookupView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lookup, self.state) {
            (_, LookupState::Idle) => Ok(()),
            (_, LookupState::Pending) => f.write_str("Looking up..."),
            (Lookup::CodeByName, LookupState::Found(code)) => write!(f, "Code: {code}"),
            (Lookup::NameByCode, LookupState::Found(name)) => write!(f, "Country: {name}"),
            (Lookup::CodeByName, LookupState::NotFound) => f.write_str("Country not found"),
            (Lookup::NameByCode, LookupState::NotFound) => f.write_str("Code not found"),
            (_, LookupState::Invalid(msg)) => f.write_str(msg),
            (_, LookupState::Failed) => f.write_str("Server error"),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "!!",
        };
        write!(f, "[{tag}] #{} {}", self.id, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(id: i32, name: &str, code: &str) -> Country {
        Country {
            id,
            name: name.into(),
            code: code.into(),
        }
    }

    #[test]
    fn empty_collection_renders_one_placeholder_without_actions() {
        let rows = render_table(&ListState::Loaded(Vec::new()));
        assert_eq!(rows, vec![Row::Placeholder(Placeholder::Empty)]);
        assert!(rows[0].actions().is_empty());
        assert_eq!(rows[0].to_string(), "No countries found");
    }

    #[test]
    fn failure_renders_one_error_row() {
        let rows = render_table(&ListState::Failed);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].actions().is_empty());
        assert_eq!(rows[0].to_string(), "Error loading countries");
    }

    #[test]
    fn rows_follow_server_order() {
        let list = ListState::Loaded(vec![country(5, "Bravo", "BR"), country(1, "Alpha", "AL")]);
        let rows = render_table(&list);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].actions(), &[RowAction::Edit(5), RowAction::Delete(5)]);
        assert_eq!(rows[1].to_string(), "   1 | Alpha | AL | [edit] [delete]");
    }

    #[test]
    fn not_loaded_renders_nothing() {
        assert!(render_table(&ListState::NotLoaded).is_empty());
    }

    #[test]
    fn lookup_texts_differ_per_direction() {
        let not_found = LookupState::NotFound;
        let code = LookupView { lookup: Lookup::CodeByName, state: &not_found };
        let name = LookupView { lookup: Lookup::NameByCode, state: &not_found };
        assert_eq!(code.to_string(), "Country not found");
        assert_eq!(name.to_string(), "Code not found");

        let found = LookupState::Found("TL".into());
        let code = LookupView { lookup: Lookup::CodeByName, state: &found };
        assert_eq!(code.to_string(), "Code: TL");

        let failed = LookupState::Failed;
        let code = LookupView { lookup: Lookup::CodeByName, state: &failed };
        assert_eq!(code.to_string(), "Server error");
    }
}
