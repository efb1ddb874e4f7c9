//! Interactive quiz screen.
//!
//! Runs a generated quiz one question at a time, then shows a results view
//! marking each answer and the final score.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::quiz::Question;
use crate::tui::colors::{DARK_GREEN, DARK_RED};

/// Screens within the quiz runner.
#[derive(Clone, Copy, PartialEq)]
enum QuizState {
    Answering,
    Results,
}

/// One quiz run: the questions, the user's picks and the derived score.
///
/// Session state is held here explicitly so a run is self-contained and a
/// fresh session starts clean.
pub struct QuizApp {
    questions: Vec<Question>,
    picked: Vec<Option<usize>>,
    current: usize,
    option_state: ListState,
    state: QuizState,
    should_exit: bool,
}

impl QuizApp {
    /// Create a quiz session over the given questions.
    pub fn new(questions: Vec<Question>) -> Self {
        let picked = vec![None; questions.len()];
        let mut app = QuizApp {
            questions,
            picked,
            current: 0,
            option_state: ListState::default(),
            state: QuizState::Answering,
            should_exit: false,
        };
        app.option_state.select(Some(0));
        app
    }

    /// Number of correctly answered questions.
    ///
    /// Correctness compares option text against the answer keyword, so
    /// duplicate options that match the keyword still count.
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.picked)
            .filter(|(q, pick)| {
                pick.and_then(|i| q.options.get(i))
                    .map(|text| *text == q.answer)
                    .unwrap_or(false)
            })
            .count()
    }

    /// Main event loop for the quiz.
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
                    QuizState::Answering => self.handle_answering_input(key.code),
                    QuizState::Results => self.handle_results_input(key.code),
                }
            }
        }
        Ok(())
    }

    fn handle_answering_input(&mut self, key: KeyCode) {
        let option_count = self.questions[self.current].options.len();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Up => {
                let selected = self.option_state.selected().unwrap_or(0);
                self.option_state.select(Some(selected.saturating_sub(1)));
            }
            KeyCode::Down => {
                let selected = self.option_state.selected().unwrap_or(0);
                self.option_state
                    .select(Some((selected + 1).min(option_count - 1)));
            }
            KeyCode::Enter => {
                self.picked[self.current] = self.option_state.selected();
                if self.current + 1 < self.questions.len() {
                    self.current += 1;
                    self.option_state.select(Some(0));
                } else {
                    self.state = QuizState::Results;
                }
            }
            _ => {}
        }
    }

    fn handle_results_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => self.should_exit = true,
            _ => {}
        }
    }

    /// Main render function.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.area());

        match self.state {
            QuizState::Answering => self.render_question(f, chunks[0]),
            QuizState::Results => self.render_results(f, chunks[0]),
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Render the current question with its options.
    fn render_question(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Prompt
                Constraint::Min(0),    // Options
            ])
            .split(area);

        let question = &self.questions[self.current];

        let prompt = Paragraph::new(question.prompt.as_str())
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Question {} of {}",
                self.current + 1,
                self.questions.len()
            )))
            .wrap(Wrap { trim: true });
        f.render_widget(prompt, chunks[0]);

        let options: Vec<ListItem> = question
            .options
            .iter()
            .map(|option| ListItem::new(Line::from(format!("  {}", option))))
            .collect();

        let list = List::new(options)
            .block(Block::default().borders(Borders::ALL).title("Pick the missing word"))
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol("► ");

        f.render_stateful_widget(list, chunks[1], &mut self.option_state);
    }

    /// Render the per-question verdicts and the final score.
    fn render_results(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from("")];
        for (i, (question, pick)) in self.questions.iter().zip(&self.picked).enumerate() {
            let picked_text = pick
                .and_then(|p| question.options.get(p))
                .map(|s| s.as_str())
                .unwrap_or("-");
            if picked_text == question.answer {
                lines.push(Line::from(Span::styled(
                    format!("✅ Q{} correct: {}", i + 1, question.answer),
                    Style::default().fg(DARK_GREEN),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    format!(
                        "❌ Q{} wrong: picked '{}', answer was '{}'",
                        i + 1,
                        picked_text,
                        question.answer
                    ),
                    Style::default().fg(DARK_RED),
                )));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Final score: {}/{}", self.score(), self.questions.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        let results = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Results"))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });

        f.render_widget(results, area);
    }

    /// Render the status bar with context-appropriate help text.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = match self.state {
            QuizState::Answering => "↑↓ choose an answer, Enter to confirm, q to abandon",
            QuizState::Results => "Press Enter or q to exit",
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: &str, options: &[&str]) -> Question {
        Question {
            prompt: "prompt?".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_score_counts_matching_picks() {
        let mut app = QuizApp::new(vec![
            question("alpha", &["alpha", "beta", "gamma"]),
            question("delta", &["delta", "beta", "gamma"]),
        ]);
        assert_eq!(app.score(), 0);

        app.picked[0] = Some(0); // alpha, correct
        app.picked[1] = Some(2); // gamma, wrong
        assert_eq!(app.score(), 1);

        app.picked[1] = Some(0);
        assert_eq!(app.score(), 2);
    }

    #[test]
    fn test_unanswered_questions_score_zero() {
        let app = QuizApp::new(vec![question("alpha", &["alpha", "beta"])]);
        assert_eq!(app.score(), 0);
    }
}
