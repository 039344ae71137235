//! Event handler for the TUI
//!
//! Routes keyboard events to the active dialog or view, and task results
//! back into the application state.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Key(_) | Event::Mouse(_) | Event::Resize(_, _) => {}
        Event::Tick => app.tick(),
        Event::Loaded { generation, result } => app.on_loaded(generation, *result),
        Event::Deleted(result) => app.on_deleted(result),
        Event::Exported(result) => app.on_exported(result),
        Event::LoggedOut => app.on_logged_out(),
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.active_dialog {
        ActiveDialog::None => handle_normal_key(app, key),
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::Filter => handle_filter_key(app, key),
        ActiveDialog::ConfirmDelete(id) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.delete_transaction(id),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('u') {
            app.clear_filter();
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),
        KeyCode::Char('/') | KeyCode::Char('f') => app.open_dialog(ActiveDialog::Filter),
        KeyCode::Char('1') => app.switch_view(ActiveView::Dashboard),
        KeyCode::Char('2') => app.switch_view(ActiveView::Transactions),
        KeyCode::Char('3') => app.switch_view(ActiveView::Budgets),
        KeyCode::Tab => app.cycle_view(),
        KeyCode::Char('[') => app.prev_month(),
        KeyCode::Char(']') => app.next_month(),
        KeyCode::Char('r') => app.reload_now(),
        KeyCode::Char('e') => app.export_pdf(),
        KeyCode::Char('L') => app.logout(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('d') | KeyCode::Delete if app.active_view == ActiveView::Transactions => {
            app.request_delete()
        }
        _ => {}
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('u') {
            app.clear_filter();
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.close_dialog(),
        KeyCode::Tab | KeyCode::Down => app.filter_form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.filter_form.prev_field(),
        KeyCode::Left => app.filter_form.input_mut().move_left(),
        KeyCode::Right => app.filter_form.input_mut().move_right(),
        KeyCode::Home => app.filter_form.input_mut().move_start(),
        KeyCode::End => app.filter_form.input_mut().move_end(),
        KeyCode::Backspace => {
            app.filter_form.input_mut().backspace();
            app.on_filter_changed();
        }
        KeyCode::Delete => {
            app.filter_form.input_mut().delete();
            app.on_filter_changed();
        }
        KeyCode::Char(c) => {
            app.filter_form.input_mut().insert(c);
            app.on_filter_changed();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::config::Settings;
    use crate::session::SessionContext;
    use crate::tui::dialogs::filter::FilterField;
    use std::sync::mpsc;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_typing_in_filter_debounces_reload() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let client = ApiClient::new("http://127.0.0.1:9/api/", SessionContext::in_memory()).unwrap();
        let (sender, _receiver) = mpsc::channel();
        let mut app = App::new(client, Settings::default(), rt.handle().clone(), sender);

        handle_event(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.active_dialog, ActiveDialog::Filter);

        for c in "loyer".chars() {
            handle_event(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.filter_form.value(FilterField::Search), "loyer");
        assert_eq!(app.query.filter.q.as_deref(), Some("loyer"));
        assert!(app.loading);

        handle_event(&mut app, key(KeyCode::Enter));
        assert!(!app.has_dialog());

        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let client = ApiClient::new("http://127.0.0.1:9/api/", SessionContext::in_memory()).unwrap();
        let (sender, _receiver) = mpsc::channel();
        let mut app = App::new(client, Settings::default(), rt.handle().clone(), sender);

        handle_event(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.active_dialog, ActiveDialog::Help);
        handle_event(&mut app, key(KeyCode::Char('x')));
        assert!(!app.has_dialog());
        assert!(!app.should_quit);
    }
}
