//! # Interactive Branch Picker
//!
//! A small fuzzy finder built on ratatui and crossterm. The user types a
//! query, the candidate list is re-ranked on every keystroke and Enter
//! confirms either the highlighted branch or, when nothing matches, the typed
//! text itself (so a tag or commit can be compared too).
//!
//! ## Keys
//!
//! - Type to filter, Backspace to delete, Ctrl+U to clear
//! - Up/Down, Tab/Shift+Tab or Ctrl+P/Ctrl+N to move the highlight
//! - Enter to confirm, Esc or Ctrl+C to cancel

use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use gitlog_core::{BranchFilter, BranchName};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};

/// Something that can ask the user for one branch.
///
/// `filter` holds the candidates listed at startup; implementations call
/// [`BranchFilter::suggest`] as the user types. `Ok(None)` means the user
/// cancelled.
pub trait BranchSelector {
  fn select(&mut self, prompt: &str, filter: &mut BranchFilter) -> Result<Option<BranchName>>;
}

/// Query text, ranked suggestions and highlight position.
#[derive(Debug, Clone)]
pub struct PickerState {
  query: String,
  suggestions: Vec<BranchName>,
  selected_index: usize,
}

/// Actions that can result from key input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
  /// Keep reading keys
  Continue,
  /// Abort the selection
  Cancel,
  /// The user settled on this branch
  Confirm(BranchName),
}

impl PickerState {
  /// Start with an empty query showing every candidate.
  pub fn new(filter: &mut BranchFilter) -> Self {
    Self {
      query: String::new(),
      suggestions: filter.suggest(""),
      selected_index: 0,
    }
  }

  pub fn query(&self) -> &str {
    &self.query
  }

  pub fn suggestions(&self) -> &[BranchName] {
    &self.suggestions
  }

  pub fn selected_index(&self) -> usize {
    self.selected_index
  }

  /// The highlighted suggestion, if any.
  pub fn selected(&self) -> Option<&BranchName> {
    self.suggestions.get(self.selected_index)
  }

  /// Move to the next item
  pub fn next(&mut self) {
    if !self.suggestions.is_empty() {
      self.selected_index = (self.selected_index + 1) % self.suggestions.len();
    }
  }

  /// Move to the previous item
  pub fn previous(&mut self) {
    if !self.suggestions.is_empty() {
      if self.selected_index == 0 {
        self.selected_index = self.suggestions.len() - 1;
      } else {
        self.selected_index -= 1;
      }
    }
  }

  fn refilter(&mut self, filter: &mut BranchFilter) {
    self.suggestions = filter.suggest(&self.query);
    self.selected_index = 0;
  }

  /// Handle key input and return the action to take
  pub fn handle_key(&mut self, key_code: KeyCode, modifiers: KeyModifiers, filter: &mut BranchFilter) -> PickerAction {
    let control = modifiers.contains(KeyModifiers::CONTROL);

    match key_code {
      KeyCode::Char('c') if control => PickerAction::Cancel,
      KeyCode::Esc => PickerAction::Cancel,
      KeyCode::Enter => match self.selected().cloned().or_else(|| BranchName::parse(&self.query)) {
        Some(branch) => PickerAction::Confirm(branch),
        None => PickerAction::Continue,
      },
      KeyCode::Down | KeyCode::Tab => {
        self.next();
        PickerAction::Continue
      }
      KeyCode::Char('n') if control => {
        self.next();
        PickerAction::Continue
      }
      KeyCode::Up | KeyCode::BackTab => {
        self.previous();
        PickerAction::Continue
      }
      KeyCode::Char('p') if control => {
        self.previous();
        PickerAction::Continue
      }
      KeyCode::Char('u') if control => {
        self.query.clear();
        self.refilter(filter);
        PickerAction::Continue
      }
      KeyCode::Backspace => {
        if self.query.pop().is_some() {
          self.refilter(filter);
        }
        PickerAction::Continue
      }
      KeyCode::Char(c) if !control => {
        self.query.push(c);
        self.refilter(filter);
        PickerAction::Continue
      }
      _ => PickerAction::Continue,
    }
  }
}

/// [`BranchSelector`] that draws a full-screen picker on the terminal.
#[derive(Debug, Default)]
pub struct TerminalPicker;

impl BranchSelector for TerminalPicker {
  fn select(&mut self, prompt: &str, filter: &mut BranchFilter) -> Result<Option<BranchName>> {
    let mut state = PickerState::new(filter);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_picker(&mut terminal, &mut state, prompt, filter);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
  }
}

fn run_picker(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  state: &mut PickerState,
  prompt: &str,
  filter: &mut BranchFilter,
) -> Result<Option<BranchName>> {
  let mut list_state = ListState::default();

  loop {
    list_state.select((!state.suggestions().is_empty()).then_some(state.selected_index()));
    terminal.draw(|f| render(f, state, prompt, &mut list_state))?;

    if let Event::Key(key) = event::read()? {
      if key.kind != KeyEventKind::Press {
        continue;
      }

      match state.handle_key(key.code, key.modifiers, filter) {
        PickerAction::Continue => {}
        PickerAction::Cancel => return Ok(None),
        PickerAction::Confirm(branch) => {
          tracing::debug!("Picked {}", branch);
          return Ok(Some(branch));
        }
      }
    }
  }
}

fn render(f: &mut Frame, state: &PickerState, prompt: &str, list_state: &mut ListState) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(3), Constraint::Min(0)])
    .split(f.area());

  let input = Paragraph::new(Line::from(vec![
    Span::styled("> ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
    Span::raw(state.query()),
  ]))
  .block(Block::default().borders(Borders::ALL).title(prompt.to_string()));
  f.render_widget(input, chunks[0]);

  let items: Vec<ListItem> = state
    .suggestions()
    .iter()
    .map(|branch| ListItem::new(Line::from(branch.to_string())))
    .collect();

  let list = List::new(items)
    .block(
      Block::default()
        .borders(Borders::ALL)
        .title("↑/↓ to move, Enter to select, Esc/Ctrl+C to cancel"),
    )
    .highlight_style(
      Style::default()
        .add_modifier(Modifier::BOLD)
        .bg(Color::Blue)
        .fg(Color::White),
    )
    .highlight_symbol("► ");
  f.render_stateful_widget(list, chunks[1], list_state);

  let cursor_x = chunks[0].x + 3 + state.query().chars().count() as u16;
  f.set_cursor_position((cursor_x, chunks[0].y + 1));
}
