//! Interactive study planner screen.
//!
//! This module contains the `PlannerApp` struct which manages the planner
//! TUI state: the due-sorted task table, the completion gauge, the quote
//! banner and the add-task form.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::quotes::random_quote;
use crate::store::{format_due_relative, parse_due_input, TaskStore};
use crate::task::due_format;
use crate::tui::colors::{DARK_GREEN, DARK_PURPLE, DARK_RED, GOLD};
use crate::tui::input::InputField;
use crate::tui::utils::centered_rect;

/// Screens within the planner.
#[derive(Clone, Copy, PartialEq)]
enum PlannerState {
    TaskList,
    AddTask,
    ConfirmDelete,
}

/// Fields of the add-task form, in tab order.
const FORM_TITLE: usize = 0;
const FORM_DUE: usize = 1;

/// Main application state for the planner interface.
///
/// All session state (current quote included) lives here rather than in
/// process-wide globals, so the screen can be torn down and rebuilt cleanly.
pub struct PlannerApp {
    state: PlannerState,
    store: TaskStore,
    tasks_path: PathBuf,
    table_state: TableState,
    sorted_ids: Vec<u64>,
    title_field: InputField,
    due_field: InputField,
    form_field: usize,
    quote: &'static str,
    status_message: String,
    pending_delete: Option<u64>,
    should_exit: bool,
}

impl PlannerApp {
    /// Create a new planner, loading the task store from the given path.
    pub fn new(tasks_path: &Path) -> Self {
        let store = TaskStore::load_or_default(tasks_path);
        let mut app = PlannerApp {
            state: PlannerState::TaskList,
            store,
            tasks_path: tasks_path.to_path_buf(),
            table_state: TableState::default(),
            sorted_ids: Vec::new(),
            title_field: InputField::new(),
            due_field: InputField::new(),
            form_field: FORM_TITLE,
            quote: random_quote(&mut rand::thread_rng()),
            status_message: String::new(),
            pending_delete: None,
            should_exit: false,
        };
        app.refresh_view();
        app
    }

    /// Rebuild the due-sorted ID view and keep the selection in range.
    fn refresh_view(&mut self) {
        self.sorted_ids = self.store.sorted_by_due().iter().map(|t| t.id).collect();
        if self.sorted_ids.is_empty() {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0);
            self.table_state
                .select(Some(selected.min(self.sorted_ids.len() - 1)));
        }
    }

    /// ID of the task under the cursor, if any.
    fn selected_id(&self) -> Option<u64> {
        self.table_state
            .selected()
            .and_then(|i| self.sorted_ids.get(i).copied())
    }

    /// Persist the store, surfacing failures in the status bar.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.tasks_path) {
            self.status_message = format!("Failed to save tasks: {e}");
        }
    }

    /// Main event loop for the planner.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            self.handle_input()?;

            if self.should_exit {
                break;
            }
        }
        Ok(())
    }

    /// Handle keyboard input based on current state.
    fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match self.state {
                    PlannerState::TaskList => self.handle_task_list_input(key.code),
                    PlannerState::AddTask => self.handle_add_task_input(key.code),
                    PlannerState::ConfirmDelete => self.handle_confirm_input(key.code),
                }
            }
        }
        Ok(())
    }

    fn handle_task_list_input(&mut self, key: KeyCode) {
        self.status_message.clear();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char('a') => {
                self.title_field.clear();
                self.due_field.clear();
                self.form_field = FORM_TITLE;
                self.state = PlannerState::AddTask;
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    if self.store.mark_done(id).is_ok() {
                        self.persist();
                        self.refresh_view();
                        self.status_message = format!("Task {id} marked done.");
                    }
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.selected_id() {
                    self.pending_delete = Some(id);
                    self.state = PlannerState::ConfirmDelete;
                }
            }
            KeyCode::Char('r') => {
                self.quote = random_quote(&mut rand::thread_rng());
            }
            _ => {}
        }
    }

    fn handle_add_task_input(&mut self, key: KeyCode) {
        let field = match self.form_field {
            FORM_TITLE => &mut self.title_field,
            _ => &mut self.due_field,
        };
        match key {
            KeyCode::Esc => self.state = PlannerState::TaskList,
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                self.form_field = 1 - self.form_field;
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => field.handle_char(c),
            KeyCode::Backspace => field.handle_backspace(),
            KeyCode::Left => field.move_cursor_left(),
            KeyCode::Right => field.move_cursor_right(),
            _ => {}
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(id) = self.pending_delete.take() {
                    match self.store.delete(id) {
                        Ok(removed) => {
                            self.persist();
                            self.refresh_view();
                            self.status_message = format!("Deleted '{}'", removed.title);
                        }
                        Err(e) => self.status_message = e.to_string(),
                    }
                }
                self.state = PlannerState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.pending_delete = None;
                self.state = PlannerState::TaskList;
            }
            _ => {}
        }
    }

    /// Validate the add-task form and append the task on success.
    fn submit_form(&mut self) {
        if self.title_field.value.trim().is_empty() {
            self.status_message = "Task title cannot be empty.".to_string();
            return;
        }
        let Some(due) = parse_due_input(&self.due_field.value) else {
            self.status_message =
                "Could not parse due date. Try YYYY-MM-DD HH:MM:SS, today or in 3d.".to_string();
            return;
        };

        match self.store.add(&self.title_field.value, due) {
            Ok(id) => {
                self.persist();
                self.refresh_view();
                self.state = PlannerState::TaskList;
                self.status_message = format!("Task {id} added.");
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn move_selection(&mut self, delta: i64) {
        if self.sorted_ids.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, self.sorted_ids.len() as i64 - 1);
        self.table_state.select(Some(next as usize));
    }

    /// Main render function.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Quote banner
                Constraint::Length(3), // Progress gauge
                Constraint::Min(0),    // Task table
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_quote(f, chunks[0]);
        self.render_gauge(f, chunks[1]);
        self.render_task_table(f, chunks[2]);
        self.render_status_bar(f, chunks[3]);

        match self.state {
            PlannerState::AddTask => self.render_add_form(f),
            PlannerState::ConfirmDelete => self.render_confirm_delete(f),
            PlannerState::TaskList => {}
        }
    }

    /// Render the quote banner across the top.
    fn render_quote(&self, f: &mut Frame, area: Rect) {
        let quote = Paragraph::new(Line::from(Span::styled(
            self.quote,
            Style::default().add_modifier(Modifier::ITALIC),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DARK_PURPLE)),
        )
        .alignment(Alignment::Center);
        f.render_widget(quote, area);
    }

    /// Render the completion gauge.
    fn render_gauge(&self, f: &mut Frame, area: Rect) {
        let done = self.store.tasks.iter().filter(|t| t.done).count();
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Progress ({} of {} done)",
                done,
                self.store.tasks.len()
            )))
            .gauge_style(Style::default().fg(GOLD))
            .percent(self.store.progress_percent() as u16);
        f.render_widget(gauge, area);
    }

    /// Render the due-sorted task table.
    fn render_task_table(&mut self, f: &mut Frame, area: Rect) {
        let header_cells = ["", "ID", "Due", "When", "Title"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let today = Local::now().date_naive();
        let rows: Vec<Row> = self
            .sorted_ids
            .iter()
            .filter_map(|&id| self.store.get(id))
            .map(|task| {
                let style = if task.done {
                    Style::default().fg(DARK_GREEN)
                } else if task.due.date() < today {
                    Style::default().fg(DARK_RED).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };

                Row::new(vec![
                    Cell::from(if task.done { "✅" } else { "⏳" }),
                    Cell::from(task.id.to_string()),
                    Cell::from(task.due.format(due_format::FORMAT).to_string()),
                    Cell::from(format_due_relative(task.due, today)),
                    Cell::from(task.title.clone()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(2),  // Done marker
            Constraint::Length(4),  // ID
            Constraint::Length(19), // Due
            Constraint::Length(9),  // When
            Constraint::Min(20),    // Title
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Study Tasks ({})", self.sorted_ids.len())),
            )
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol("► ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    /// Render the add-task form as a centered overlay.
    fn render_add_form(&self, f: &mut Frame) {
        let area = centered_rect(60, 40, f.area());
        f.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title field
                Constraint::Length(3), // Due field
                Constraint::Min(0),    // Spacer
            ])
            .split(area);

        let active_style = Style::default().fg(Color::Yellow);
        let idle_style = Style::default();

        let title = Paragraph::new(self.title_field.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Task")
                .border_style(if self.form_field == FORM_TITLE {
                    active_style
                } else {
                    idle_style
                }),
        );
        f.render_widget(title, chunks[0]);

        let due = Paragraph::new(self.due_field.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Due (YYYY-MM-DD HH:MM:SS, today, in 3d)")
                .border_style(if self.form_field == FORM_DUE {
                    active_style
                } else {
                    idle_style
                }),
        );
        f.render_widget(due, chunks[1]);

        let (chunk, field) = match self.form_field {
            FORM_TITLE => (chunks[0], &self.title_field),
            _ => (chunks[1], &self.due_field),
        };
        f.set_cursor_position((chunk.x + field.cursor as u16 + 1, chunk.y + 1));
    }

    /// Render the delete confirmation dialog.
    fn render_confirm_delete(&self, f: &mut Frame) {
        let area = centered_rect(50, 30, f.area());
        f.render_widget(Clear, area);

        let title = self
            .pending_delete
            .and_then(|id| self.store.get(id))
            .map(|t| t.title.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        let confirmation_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Delete this task?",
                Style::default().add_modifier(Modifier::BOLD).fg(Color::Red),
            )),
            Line::from(""),
            Line::from(title),
            Line::from(""),
            Line::from("Press Y to confirm, N or Esc to cancel"),
        ];

        let confirmation = Paragraph::new(confirmation_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Delete Task")
                    .border_style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(confirmation, area);
    }

    /// Render the status bar with context-appropriate help text.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                PlannerState::TaskList => {
                    "↑↓ navigate, a add, d done, x delete, r quote, q quit".to_string()
                }
                PlannerState::AddTask => {
                    "Tab to switch field, Enter to add, Esc to cancel".to_string()
                }
                PlannerState::ConfirmDelete => "Press Y to confirm, N or Esc to cancel".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }
}
