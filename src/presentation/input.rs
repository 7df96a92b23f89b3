use crate::application::{App, AppMode, FormField};
use crate::domain::WizardStep;
use crate::infrastructure::ManifestExporter;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

/// Byte offset of the `cursor`-th character of `text`.
fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Shared line-editing keys for the text and filename buffers.
fn edit_buffer(buffer: &mut String, cursor: &mut usize, key: KeyCode) {
    let len = buffer.chars().count();
    match key {
        KeyCode::Backspace => {
            if *cursor > 0 {
                buffer.remove(byte_index(buffer, *cursor - 1));
                *cursor -= 1;
            }
        }
        KeyCode::Delete => {
            if *cursor < len {
                buffer.remove(byte_index(buffer, *cursor));
            }
        }
        KeyCode::Left => {
            if *cursor > 0 {
                *cursor -= 1;
            }
        }
        KeyCode::Right => {
            if *cursor < len {
                *cursor += 1;
            }
        }
        KeyCode::Home => {
            *cursor = 0;
        }
        KeyCode::End => {
            *cursor = len;
        }
        KeyCode::Char(c) => {
            let at = byte_index(buffer, *cursor);
            buffer.insert(at, c);
            *cursor += 1;
        }
        _ => {}
    }
}

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Editing => Self::handle_editing_mode(app, key),
            AppMode::Picker => Self::handle_picker_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportManifest => Self::handle_filename_input_mode(app, key),
            AppMode::Alert => Self::handle_alert_mode(app, key),
            AppMode::Success => Self::handle_success_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        let on_summary = app.store.current_step() == WizardStep::Summary;

        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                if on_summary {
                    app.start_manifest_export();
                }
            }
            return;
        }

        let selected = app.selected_field();
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
            KeyCode::Enter | KeyCode::Char('s') if on_summary => {
                app.request_submit();
            }
            KeyCode::Enter => app.activate_selected(),
            KeyCode::Char('e') => match selected {
                Some(FormField::Entity(entity)) => app.start_count_editing(entity),
                Some(field) => app.start_editing(field),
                None => {}
            },
            KeyCode::Char(' ') => {
                if let Some(FormField::Entity(entity)) = selected {
                    app.toggle_entity(entity);
                }
            }
            KeyCode::Char('+') | KeyCode::Right => {
                if let Some(FormField::Entity(entity)) = selected {
                    app.adjust_entity_count(entity, 1);
                }
            }
            KeyCode::Char('-') | KeyCode::Left => {
                if let Some(FormField::Entity(entity)) = selected {
                    app.adjust_entity_count(entity, -1);
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(FormField::Entity(entity)) = selected {
                    app.start_count_editing(entity);
                    app.input = c.to_string();
                    app.cursor_position = 1;
                }
            }
            KeyCode::Tab | KeyCode::Char('n') => {
                app.next_step();
            }
            KeyCode::BackTab | KeyCode::Esc | KeyCode::Char('b') => {
                app.previous_step();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            other => edit_buffer(&mut app.input, &mut app.cursor_position, other),
        }
    }

    fn handle_picker_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.picker_up(),
            KeyCode::Down | KeyCode::Char('j') => app.picker_down(),
            KeyCode::Enter => app.confirm_picker(),
            KeyCode::Esc => app.cancel_picker(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_manifest_filename();
                match app.payload() {
                    Ok(payload) => {
                        let result = ManifestExporter::export_manifest(&payload, &app.catalog, &filename);
                        app.set_export_result(result);
                    }
                    Err(e) => {
                        app.cancel_filename_input();
                        app.status_message = Some(format!("Export failed: {}", e));
                    }
                }
            }
            KeyCode::Esc => app.cancel_filename_input(),
            other => edit_buffer(&mut app.filename_input, &mut app.cursor_position, other),
        }
    }

    fn handle_alert_mode(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_alert();
        }
    }

    fn handle_success_mode(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('n')) {
            app.start_new_order();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::tests::{MockApi, app_at_summary, filled_detail, sample_catalog};
    use crate::domain::Entity;

    /// One turn of the event loop: handle the key, then run a pending submit.
    fn press(app: &mut App, key: KeyCode, api: &MockApi) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
        if app.submitting {
            app.submit(api);
        }
    }

    #[test]
    fn test_typing_into_field() {
        let api = MockApi::accepting("x");
        let mut app = App::default();

        press(&mut app, KeyCode::Enter, &api);
        assert!(matches!(app.mode, AppMode::Editing));
        for c in "Rapat".chars() {
            press(&mut app, KeyCode::Char(c), &api);
        }
        press(&mut app, KeyCode::Backspace, &api);
        press(&mut app, KeyCode::Enter, &api);

        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.store.form_data().judul_pekerjaan, "Rapa");
    }

    #[test]
    fn test_editing_handles_multibyte_characters() {
        let api = MockApi::accepting("x");
        let mut app = App::default();
        app.start_editing(FormField::DropPoint);
        for c in "Gedung é".chars() {
            press(&mut app, KeyCode::Char(c), &api);
        }
        press(&mut app, KeyCode::Left, &api);
        press(&mut app, KeyCode::Char('X'), &api);
        press(&mut app, KeyCode::End, &api);
        press(&mut app, KeyCode::Backspace, &api);
        press(&mut app, KeyCode::Enter, &api);
        assert_eq!(app.store.form_data().drop_point, "Gedung X");
    }

    #[test]
    fn test_escape_cancels_editing() {
        let api = MockApi::accepting("x");
        let mut app = App::default();
        press(&mut app, KeyCode::Enter, &api);
        press(&mut app, KeyCode::Char('z'), &api);
        press(&mut app, KeyCode::Esc, &api);
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.store.form_data().judul_pekerjaan.is_empty());
    }

    #[test]
    fn test_tab_respects_step_gate() {
        let api = MockApi::accepting("x");
        let mut app = App::new(sample_catalog());
        press(&mut app, KeyCode::Tab, &api);
        assert_eq!(app.store.current_step(), WizardStep::Detail);

        filled_detail(&mut app);
        press(&mut app, KeyCode::Tab, &api);
        assert_eq!(app.store.current_step(), WizardStep::Pemesan);

        press(&mut app, KeyCode::Esc, &api);
        assert_eq!(app.store.current_step(), WizardStep::Detail);
    }

    #[test]
    fn test_entity_keys() {
        let api = MockApi::accepting("x");
        let mut app = App::default();
        app.store.set_current_step(WizardStep::Pemesan);
        press(&mut app, KeyCode::Down, &api);
        assert_eq!(app.selected_field(), Some(FormField::Entity(Entity::Ips)));

        press(&mut app, KeyCode::Char(' '), &api);
        press(&mut app, KeyCode::Char('+'), &api);
        assert!(app.store.form_data().is_selected(Entity::Ips));
        assert_eq!(app.store.form_data().count_for(Entity::Ips), 2);

        press(&mut app, KeyCode::Char('1'), &api);
        press(&mut app, KeyCode::Char('2'), &api);
        press(&mut app, KeyCode::Enter, &api);
        assert_eq!(app.store.form_data().count_for(Entity::Ips), 12);
    }

    #[test]
    fn test_picker_keys() {
        let api = MockApi::accepting("x");
        let mut app = App::default();
        press(&mut app, KeyCode::Down, &api);
        press(&mut app, KeyCode::Enter, &api);
        assert!(matches!(app.mode, AppMode::Picker));
        press(&mut app, KeyCode::Down, &api);
        press(&mut app, KeyCode::Down, &api);
        press(&mut app, KeyCode::Enter, &api);
        assert_eq!(app.field_value(FormField::Category), "Makan Malam");

        press(&mut app, KeyCode::Enter, &api);
        press(&mut app, KeyCode::Esc, &api);
        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.field_value(FormField::Category), "Makan Malam");
    }

    #[test]
    fn test_enter_on_summary_submits() {
        let api = MockApi::accepting("SR-9");
        let mut app = app_at_summary();
        press(&mut app, KeyCode::Enter, &api);
        assert!(matches!(app.mode, AppMode::Success));
        assert_eq!(api.calls.get(), 1);

        press(&mut app, KeyCode::Enter, &api);
        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.store.current_step(), WizardStep::Detail);
    }

    #[test]
    fn test_submit_key_only_marks_pending() {
        let mut app = app_at_summary();
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.submitting);
        assert_eq!(app.store.current_step(), WizardStep::Summary);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('s'), KeyModifiers::NONE);
        assert!(app.submitting);

        let api = MockApi::accepting("SR-10");
        app.submit(&api);
        assert_eq!(api.calls.get(), 1);
        assert!(!app.submitting);
    }

    #[test]
    fn test_alert_dismissed_and_draft_kept() {
        let api = MockApi::with_response(Err(crate::infrastructure::ApiError::Status(500)));
        let mut app = app_at_summary();
        press(&mut app, KeyCode::Char('s'), &api);
        assert!(matches!(app.mode, AppMode::Alert));

        press(&mut app, KeyCode::Char('x'), &api);
        assert!(matches!(app.mode, AppMode::Alert));
        press(&mut app, KeyCode::Enter, &api);
        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.store.current_step(), WizardStep::Summary);
        assert_eq!(app.store.form_data().count_for(Entity::Plnip), 3);
    }

    #[test]
    fn test_manifest_export_keys() {
        let api = MockApi::accepting("x");
        let mut app = app_at_summary();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert!(matches!(app.mode, AppMode::ExportManifest));
        app.filename_input = path.to_string_lossy().to_string();
        press(&mut app, KeyCode::Enter, &api);

        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.status_message.unwrap().starts_with("Manifest exported"));
        assert!(path.exists());
    }

    #[test]
    fn test_help_toggle() {
        let api = MockApi::accepting("x");
        let mut app = App::default();
        press(&mut app, KeyCode::Char('?'), &api);
        assert!(matches!(app.mode, AppMode::Help));
        press(&mut app, KeyCode::Down, &api);
        assert_eq!(app.help_scroll, 1);
        press(&mut app, KeyCode::Esc, &api);
        assert!(matches!(app.mode, AppMode::Normal));
    }
}
