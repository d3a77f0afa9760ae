//! Line-oriented terminal session over a `CountryListClient`.
//!
//! Reads commands from any `BufRead`, drives each one to completion through a
//! `Transport`, and re-renders to any `Write` after every command. Request
//! failures only ever produce notices; the loop ends on `quit` or end of input.

use std::io::{self, BufRead, Write};

use country_core::{Action, CountryListClient, Effect, FormMode, Lookup, Transport};
use log::debug;

use crate::command::{self, Command, HELP};

pub struct Session<'a, T: Transport + ?Sized> {
    controller: CountryListClient,
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Session<'a, T> {
    pub fn new(controller: CountryListClient, transport: &'a T) -> Self {
        Self { controller, transport }
    }

    pub fn controller(&self) -> &CountryListClient {
        &self.controller
    }

    /// Load the list once, then serve commands until `quit` or EOF.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> io::Result<()> {
        self.apply(Action::Refresh, &mut input, &mut out)?;
        self.render(&mut out)?;

        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            match command::parse(&line) {
                Ok(None) => continue,
                Ok(Some(Command::Quit)) => return Ok(()),
                Ok(Some(Command::Help)) => writeln!(out, "{HELP}")?,
                Ok(Some(Command::Act(action))) => {
                    self.apply(action, &mut input, &mut out)?;
                    self.render(&mut out)?;
                }
                Err(err) => writeln!(out, "{err}\n{HELP}")?,
            }
        }
    }

    /// Perform one action, answering a delete prompt from `input` if asked.
    fn apply<R: BufRead, W: Write>(&mut self, action: Action, input: &mut R, out: &mut W) -> io::Result<()> {
        match self.controller.perform(action, self.transport) {
            Some(Effect::Confirm { id, prompt }) => {
                write!(out, "{prompt} [y/N] ")?;
                out.flush()?;
                let mut answer = String::new();
                input.read_line(&mut answer)?;
                let confirmed = command::is_yes(&answer);
                debug!("delete of {id} confirmed: {confirmed}");
                self.controller.perform(Action::Confirm(confirmed), self.transport);
            }
            Some(Effect::FocusForm) => {
                let form = self.controller.form();
                writeln!(out, "editing: {} / {}", form.name, form.code)?;
            }
            Some(Effect::Request(..)) | None => {}
        }
        Ok(())
    }

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for notice in self.controller.notices().live() {
            writeln!(out, "{notice}")?;
        }
        for row in self.controller.rows() {
            writeln!(out, "{row}")?;
        }
        for lookup in [Lookup::CodeByName, Lookup::NameByCode] {
            let view = self.controller.lookup(lookup).to_string();
            if !view.is_empty() {
                writeln!(out, "{view}")?;
            }
        }
        let form = self.controller.form();
        match form.mode() {
            FormMode::Editing(id) => writeln!(out, "form: #{id} name={:?} code={:?}", form.name, form.code),
            FormMode::Empty => writeln!(out, "form: new name={:?} code={:?}", form.name, form.code),
        }
    }
}
