use crate::application::{App, AppMode, FormField, Picker};
use crate::domain::{OrderType, WizardStep};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    if app.store.current_step() == WizardStep::Summary {
        render_summary(f, app, chunks[1]);
    } else {
        render_form(f, app, chunks[1]);
    }
    render_status_bar(f, app, chunks[2]);

    match app.mode {
        AppMode::Picker => {
            if let Some(picker) = &app.picker {
                render_picker_popup(f, picker);
            }
        }
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Alert => render_message_popup(
            f,
            "Submission failed",
            app.alert.as_deref().unwrap_or_default(),
            Color::Red,
        ),
        AppMode::Success => {
            let text = match &app.confirmation {
                Some(confirmation) => format!(
                    "Order {} accepted.\n{} portions for \"{}\".\n\nEnter: new order | q: quit",
                    confirmation.id,
                    confirmation.order.employee_orders.len(),
                    confirmation.order.judul_pekerjaan
                ),
                None => "Order accepted.".to_string(),
            };
            render_message_popup(f, "Pesanan terkirim", &text, Color::Green);
        }
        _ => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = WizardStep::ALL
        .iter()
        .map(|step| Line::from(format!("{}. {}", step.index() + 1, step.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("Pesan Makan"))
        .select(app.store.current_step().index())
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::LightBlue));
    f.render_widget(tabs, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let fields = app.fields();
    let rows: Vec<Row> = fields
        .iter()
        .map(|field| {
            let value = if app.mode == AppMode::Editing && app.editing_field == Some(*field) {
                format!("{}_", app.input)
            } else {
                app.field_value(*field)
            };
            Row::new(vec![
                Cell::from(field.label()).style(Style::default().fg(Color::Yellow)),
                Cell::from(value),
            ])
        })
        .collect();

    let gate = if app.can_proceed() { "ready" } else { "incomplete" };
    let title = format!("{} ({})", app.store.current_step().title(), gate);
    let table = Table::new(rows, [Constraint::Length(24), Constraint::Min(10)])
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .column_spacing(1);

    let mut state = TableState::default();
    if !fields.is_empty() {
        state.select(Some(app.selected_row.min(fields.len() - 1)));
    }
    f.render_stateful_widget(table, area, &mut state);
}

/// Plain-text preview of what will be submitted.
pub fn summary_text(app: &App) -> String {
    let draft = app.store.form_data();
    let mut lines = vec![
        format!("Judul Pekerjaan : {}", draft.judul_pekerjaan),
        format!(
            "Kategori        : {}",
            draft.category.map(|c| c.to_string()).unwrap_or_default()
        ),
        format!("Drop Point      : {}", draft.drop_point),
        format!("PIC             : {} ({})", draft.pic.name, draft.pic.nomor_hp),
        format!(
            "Asman           : {} - {} ({})",
            draft.supervisor.name, draft.supervisor.sub_bidang, draft.supervisor.nomor_hp
        ),
        String::new(),
    ];
    for entity in draft.selected() {
        lines.push(format!("{:<6} {} orang", entity.code(), draft.count_for(entity)));
    }
    lines.push(String::new());

    match draft.order_type {
        Some(OrderType::Bulk) => {
            lines.push(format!(
                "Bulk: {} x {}",
                draft.total_headcount(),
                app.field_value(FormField::BulkMenu)
            ));
            if !draft.bulk_order.note.trim().is_empty() {
                lines.push(format!("Catatan: {}", draft.bulk_order.note));
            }
        }
        Some(OrderType::Detail) => {
            let mut orders: Vec<_> = draft.employee_orders.iter().collect();
            orders.sort_by_key(|order| (order.entity, order.index));
            for order in orders {
                let menu = order
                    .items
                    .first()
                    .map(|item| {
                        if item.menu_name.is_empty() {
                            item.menu_item_id.clone()
                        } else {
                            item.menu_name.clone()
                        }
                    })
                    .unwrap_or_default();
                let mut line = format!(
                    "{:<6} #{} {} - {}",
                    order.entity.code(),
                    order.index + 1,
                    order.employee_name,
                    menu
                );
                if !order.note.trim().is_empty() {
                    line.push_str(&format!(" ({})", order.note));
                }
                lines.push(line);
            }
        }
        None => lines.push("No order type chosen".to_string()),
    }
    lines.join("\n")
}

fn render_summary(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.submitting { "Summary (submitting...)" } else { "Summary" };
    let summary = Paragraph::new(summary_text(app))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(summary, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else if app.store.current_step() == WizardStep::Summary {
                "Enter/s: submit | Ctrl+E: export manifest | Esc: back | F1/?: help | q: quit".to_string()
            } else {
                "↑↓: move | Enter: edit | Tab: next | Esc: back | F1/?: help | q: quit".to_string()
            }
        }
        AppMode::Editing => format!("Editing: {} (Enter to save, Esc to cancel)", app.input),
        AppMode::Picker => "↑↓: choose | Enter: select | Esc: cancel".to_string(),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::ExportManifest => format!("Export manifest as: {} (Enter to export, Esc to cancel)", app.filename_input),
        AppMode::Alert => "Enter/Esc: dismiss".to_string(),
        AppMode::Success => "Enter: new order | q: quit".to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::Picker => Style::default().fg(Color::Yellow),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::ExportManifest => Style::default().fg(Color::Magenta),
            AppMode::Alert => Style::default().fg(Color::Red),
            AppMode::Success => Style::default().fg(Color::Green),
        });
    f.render_widget(input, area);
}

fn popup_area(area: Rect) -> Rect {
    Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    }
}

fn render_picker_popup(f: &mut Frame, picker: &Picker) {
    let area = popup_area(f.area());
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = picker
        .options
        .iter()
        .map(|option| ListItem::new(option.label.clone()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(picker.field.label()))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    state.select(Some(picker.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_message_popup(f: &mut Frame, title: &str, text: &str, color: Color) {
    let area = f.area();
    let popup = Rect {
        x: area.width / 4,
        y: area.height / 3,
        width: area.width / 2,
        height: (area.height / 3).max(5),
    };
    f.render_widget(Clear, popup);
    let message = Paragraph::new(text.to_string())
        .block(Block::default().borders(Borders::ALL).title(title.to_string()).style(Style::default().fg(color)))
        .wrap(Wrap { trim: true });
    f.render_widget(message, popup);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = popup_area(f.area());

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"MEAL ORDER WIZARD

=== STEPS ===
1. Detail       Job title, meal category, drop point, PIC and Asman
2. Pemesan      Entities (PLNIP, IPS, KOP, RSU, MITRA, OTHER) and headcount
3. Menu         Order type and menu choice
4. Summary      Review and submit

Tab moves to the next step once the current step is complete.
Esc goes back one step without any checks.

=== FIELDS ===
↑↓ or j/k       Move between fields
Enter           Edit the field, or open its list of choices
e               Type a value instead of picking from a list
Esc             Cancel editing or close a list

Choosing a PIC from the employee list also fills in the
Asman of their department. Choosing a Sub Bidang fills in
that department's Asman.

=== PEMESAN ===
Space           Select or deselect the entity
+ / -           Raise or lower the headcount
0-9             Type a headcount

Changing an entity's selection or headcount clears the
per-person menu choices of that entity.

=== MENU ===
detail          One menu choice per person
bulk            One menu choice for everyone

Switching between detail and bulk clears every menu choice
made so far.

=== SUMMARY ===
Enter or s      Submit the order
Ctrl+E          Export a CSV manifest for the kitchen

When a submission fails the order stays as it is, so it can
be submitted again after dismissing the alert.

=== GENERAL ===
F1 or ?         Show this help (scroll with ↑↓, PgUp/PgDn, Home)
q               Quit application"#.to_string()
}
