//! Application state and event loop.
//!
//! One screen, one cycle: fill the form, submit, wait for the service,
//! show the result or an error notification.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use churn_core::client::PredictionBackend;
use churn_core::domain::assessment::Assessment;
use churn_core::domain::prediction::AccountType;
use churn_core::form::ChurnForm;

use crate::ui;
use crate::worker::{self, PredictJobHandle, PredictOutcome};

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);
const INPUT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    created_at: Instant,
}

impl Notification {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= NOTIFICATION_TTL
    }
}

/// Focusable controls in tab order: the account selector, the five
/// toggles, then the numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Account,
    Toggle(usize),
    Number(usize),
}

pub struct App {
    pub form: ChurnForm,
    pub focus: Focus,
    pub result: Option<Assessment>,
    pub notifications: Vec<Notification>,
    pending: Option<PredictJobHandle>,
    backend: Arc<dyn PredictionBackend>,
    runtime: tokio::runtime::Handle,
    should_quit: bool,
}

impl App {
    pub fn new(backend: Arc<dyn PredictionBackend>, runtime: tokio::runtime::Handle) -> Self {
        Self {
            form: ChurnForm::default(),
            focus: Focus::Account,
            result: None,
            notifications: Vec::new(),
            pending: None,
            backend,
            runtime,
            should_quit: false,
        }
    }

    pub fn loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_job();
            self.expire_notifications(Instant::now());

            terminal.draw(|f| ui::render(f, self))?;

            if event::poll(INPUT_POLL)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // The loading overlay is blocking: no form input or re-submit can
        // happen while a request is in flight.
        if self.loading() {
            return;
        }

        match key.code {
            KeyCode::Esc => self.dismiss_notifications(),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => self.submit(),
            _ => self.handle_focused_key(key.code),
        }
    }

    fn handle_focused_key(&mut self, code: KeyCode) {
        match self.focus {
            Focus::Account => match code {
                KeyCode::Left => self.cycle_account(-1),
                KeyCode::Right | KeyCode::Char(' ') => self.cycle_account(1),
                KeyCode::Char('1') => self.form.select_account(AccountType::Standard),
                KeyCode::Char('2') => self.form.select_account(AccountType::Premium),
                KeyCode::Char('3') => self.form.select_account(AccountType::Metal),
                _ => {}
            },
            Focus::Toggle(i) => {
                if code == KeyCode::Char(' ') {
                    self.form.toggle(i);
                }
            }
            Focus::Number(i) => {
                let Some(field) = self.form.numbers.get_mut(i) else {
                    return;
                };
                match code {
                    KeyCode::Char(c) => field.push_char(c),
                    KeyCode::Backspace => field.delete_char(),
                    KeyCode::Delete => field.clear(),
                    _ => {}
                }
            }
        }
    }

    fn cycle_account(&mut self, step: i32) {
        let all = AccountType::ALL;
        let next = match self.form.account_type {
            None => 0,
            Some(current) => {
                let pos = all.iter().position(|a| *a == current).unwrap_or(0) as i32;
                (pos + step).rem_euclid(all.len() as i32) as usize
            }
        };
        self.form.select_account(all[next]);
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Account => Focus::Toggle(0),
            Focus::Toggle(i) if i + 1 < self.form.toggles.len() => Focus::Toggle(i + 1),
            Focus::Toggle(_) => Focus::Number(0),
            Focus::Number(i) if i + 1 < self.form.numbers.len() => Focus::Number(i + 1),
            Focus::Number(_) => Focus::Account,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Account => Focus::Number(self.form.numbers.len() - 1),
            Focus::Toggle(0) => Focus::Account,
            Focus::Toggle(i) => Focus::Toggle(i - 1),
            Focus::Number(0) => Focus::Toggle(self.form.toggles.len() - 1),
            Focus::Number(i) => Focus::Number(i - 1),
        };
    }

    /// Submit is only reachable when the form is complete; the request is
    /// built from current field values and handed to a background job.
    fn submit(&mut self) {
        if self.pending.is_some() || !self.form.is_complete() {
            return;
        }

        match self.form.to_request() {
            Ok(request) => {
                self.pending = Some(worker::spawn(
                    self.runtime.clone(),
                    self.backend.clone(),
                    request,
                ));
            }
            Err(err) => self.notify(format!("{err:#}")),
        }
    }

    fn poll_job(&mut self) {
        let Some(job) = &self.pending else {
            return;
        };
        let Some(outcome) = job.try_recv() else {
            return;
        };

        // Every completion path clears the loading overlay.
        self.pending = None;
        self.apply_outcome(outcome);
    }

    fn apply_outcome(&mut self, outcome: PredictOutcome) {
        match outcome {
            PredictOutcome::Success(assessment) => {
                self.result = Some(assessment);
            }
            PredictOutcome::Failure { message } => self.notify(message),
        }
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification::new(message));
    }

    fn expire_notifications(&mut self, now: Instant) {
        self.notifications.retain(|n| !n.expired(now));
    }

    fn dismiss_notifications(&mut self) {
        self.notifications.clear();
    }
}
