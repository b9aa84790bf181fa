//! Event handling for the TUI.
//!
//! A single handler routes key presses: text-entry modes (complaint input,
//! path entry, remark editing) capture printable characters first, then
//! global navigation keys apply, then whatever the mounted view binds.

use crate::config::TuiPreferences;
use crate::tasks::Job;
use crate::tui::app::{App, MountedView, TabKind};
use crate::tui::theme;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::time::Duration;

/// Application event.
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
}

/// Polls the terminal with a fixed tick rate.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub const fn new(tick_rate: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate),
        }
    }

    /// Poll for the next event, falling back to a tick on timeout.
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}

/// Handle a key press and update app state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits, even from a text-entry mode.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => app.toggle_help(),
            _ => {}
        }
        return;
    }

    // Tab navigation stays available from text-entry modes; it is the only
    // way off the submission tab, whose whole surface is a text input.
    match key.code {
        KeyCode::Tab => {
            app.next_tab();
            return;
        }
        KeyCode::BackTab => {
            app.prev_tab();
            return;
        }
        _ => {}
    }

    if in_text_entry(app) {
        handle_text_entry(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('T') => {
            let new_theme = theme::toggle_theme();
            let prefs = TuiPreferences {
                theme: new_theme.name().to_string(),
            };
            if let Err(err) = prefs.save() {
                tracing::warn!("failed to save preferences: {err}");
            }
        }
        KeyCode::Char('1') => app.switch_tab(TabKind::Submission),
        KeyCode::Char('2') => app.switch_tab(TabKind::Batch),
        KeyCode::Char('3') => app.switch_tab(TabKind::Review),
        KeyCode::Char('4') => app.switch_tab(TabKind::Insights),
        _ => handle_view_key(app, key),
    }
}

/// True while the mounted view is capturing raw text.
fn in_text_entry(app: &App) -> bool {
    match &app.view {
        // The submission tab is always in text entry.
        MountedView::Submission(_) => true,
        MountedView::Batch(state) => state.editing_path,
        MountedView::Review(state) => state.editing_remark,
        MountedView::Insights(_) => false,
    }
}

fn handle_text_entry(app: &mut App, key: KeyEvent) {
    // Jobs are collected first: dispatching needs `&App` while the view
    // state is still mutably borrowed inside the match.
    let mut jobs: Vec<Job> = Vec::new();
    match &mut app.view {
        MountedView::Submission(state) => match key.code {
            KeyCode::Enter => {
                jobs.extend(state.submit());
            }
            KeyCode::Backspace => state.pop_input(),
            KeyCode::Char(c) => state.push_input(c),
            _ => {}
        },
        MountedView::Batch(state) => match key.code {
            KeyCode::Esc => {
                state.editing_path = false;
                state.path_input.clear();
            }
            KeyCode::Enter => {
                state.editing_path = false;
                let path = state.path_input.trim().to_string();
                state.path_input.clear();
                if !path.is_empty() {
                    state.select_file(PathBuf::from(path));
                }
            }
            KeyCode::Backspace => {
                state.path_input.pop();
            }
            KeyCode::Char(c) => state.path_input.push(c),
            _ => {}
        },
        MountedView::Review(state) => match key.code {
            KeyCode::Esc | KeyCode::Enter => state.editing_remark = false,
            KeyCode::Backspace => state.pop_remark_char(),
            KeyCode::Char(c) => state.push_remark_char(c),
            _ => {}
        },
        _ => {}
    }
    app.dispatch_all(jobs);
}

fn handle_view_key(app: &mut App, key: KeyEvent) {
    let mut jobs: Vec<Job> = Vec::new();
    match &mut app.view {
        // Submission keys are handled by the text-entry path.
        MountedView::Submission(_) => {}
        MountedView::Batch(state) => match key.code {
            KeyCode::Char('f') => {
                state.editing_path = true;
                state.path_input.clear();
            }
            KeyCode::Char('a') | KeyCode::Enter => {
                jobs.extend(state.start_analysis());
            }
            KeyCode::Char('h') => state.toggle_history(),
            KeyCode::Char('x') => state.clear_selection(),
            KeyCode::Down | KeyCode::Char('j') => state.scroll_preview_down(),
            KeyCode::Up | KeyCode::Char('k') => state.scroll_preview_up(),
            _ => {}
        },
        MountedView::Review(state) => match key.code {
            KeyCode::Down | KeyCode::Char('j') => state.select_next(),
            KeyCode::Up | KeyCode::Char('k') => state.select_prev(),
            KeyCode::Char('e') => {
                if state.selected_item().is_some() {
                    state.editing_remark = true;
                }
            }
            KeyCode::Char('l') => state.cycle_label(),
            KeyCode::Char('d') => state.delete_selected(),
            KeyCode::Char('p') => {
                jobs.extend(state.push_all());
            }
            _ => {}
        },
        MountedView::Insights(state) => match key.code {
            KeyCode::Char('r') => {
                jobs = state.refresh();
            }
            KeyCode::Down | KeyCode::Char('j') => state.scroll_plan_down(),
            KeyCode::Up | KeyCode::Char('k') => state.scroll_plan_up(),
            _ => {}
        },
    }
    app.dispatch_all(jobs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BackendClient, BackendConfig};
    use crate::session::{MemoryStore, SharedStore};
    use crate::tasks::TaskRunner;
    use std::sync::Arc;

    fn app() -> App {
        let client = BackendClient::new(BackendConfig::default()).unwrap();
        let (runner, _rx) = TaskRunner::new(client);
        let store: SharedStore = Arc::new(MemoryStore::new());
        App::new(runner, store)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_flows_into_submission_input() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('h')));
        handle_key_event(&mut app, key(KeyCode::Char('i')));
        match &app.view {
            MountedView::Submission(state) => assert_eq!(state.input, "hi"),
            _ => panic!("submission should be mounted"),
        }
    }

    #[test]
    fn test_q_types_on_submission_but_quits_elsewhere() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);

        handle_key_event(&mut app, key(KeyCode::Tab));
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_text_entry() {
        let mut app = app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_number_keys_switch_tabs_outside_submission() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Tab));
        handle_key_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.active_tab, TabKind::Review);
    }

    #[test]
    fn test_review_has_no_manual_refetch_key() {
        let mut app = app();
        app.switch_tab(TabKind::Review);
        if let MountedView::Review(state) = &mut app.view {
            state.on_queue(Ok(vec![]));
            assert!(!state.loading);
        } else {
            panic!("review should be mounted");
        }

        // The queue is fetched once per mount; 'r' is not bound here.
        handle_key_event(&mut app, key(KeyCode::Char('r')));
        match &app.view {
            MountedView::Review(state) => assert!(!state.loading),
            _ => panic!("review should still be mounted"),
        }
    }

    #[test]
    fn test_path_entry_selects_file() {
        let mut app = app();
        app.switch_tab(TabKind::Batch);
        handle_key_event(&mut app, key(KeyCode::Char('f')));
        for c in "data.csv".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        handle_key_event(&mut app, key(KeyCode::Enter));
        match &app.view {
            MountedView::Batch(state) => {
                assert!(!state.editing_path);
                assert_eq!(state.selected_file, Some(PathBuf::from("data.csv")));
            }
            _ => panic!("batch should be mounted"),
        }
    }
}
