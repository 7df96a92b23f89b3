//! Wizard controller for the meal order form.
//!
//! `App` owns the order store and everything the terminal UI needs around
//! it: the focused field, the text edit buffer, pickers, and the outcome
//! of the last submission.

use std::path::Path;

use chrono::Utc;
use tracing::{error, info, warn};

use super::store::OrderStore;
use crate::domain::{
    BulkOrderPatch, Catalog, Confirmation, DomainResult, EmployeeOrder, Entity, FormDataPatch,
    MAX_HEADCOUNT, MealCategory, MenuSelection, OrderPayload, OrderType, PicPatch, SupervisorPatch, WizardStep,
    build_payload, can_proceed, missing_detail_fields,
};
use crate::infrastructure::{CatalogRepository, ExportError, OrderApi};

/// Represents the current mode of the application.
///
/// The mode determines how key presses are interpreted and which popups
/// are drawn over the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    /// Moving between fields and steps
    Normal,
    /// Typing into a text field
    Editing,
    /// Choosing one value from a list
    Picker,
    /// Help screen is displayed
    Help,
    /// Manifest export dialog is open
    ExportManifest,
    /// Blocking alert after a failed submission
    Alert,
    /// The order was accepted by the server
    Success,
}

/// A row of the current step that the user can focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    JudulPekerjaan,
    Category,
    DropPoint,
    PicName,
    PicPhone,
    SubBidang,
    SupervisorName,
    SupervisorPhone,
    Entity(Entity),
    OrderType,
    BulkMenu,
    BulkNote,
    EmployeeName(Entity, usize),
    EmployeeMenu(Entity, usize),
    EmployeeNote(Entity, usize),
}

impl FormField {
    pub fn label(&self) -> String {
        match self {
            FormField::JudulPekerjaan => "Judul Pekerjaan".to_string(),
            FormField::Category => "Kategori".to_string(),
            FormField::DropPoint => "Drop Point".to_string(),
            FormField::PicName => "Nama PIC".to_string(),
            FormField::PicPhone => "No. HP PIC".to_string(),
            FormField::SubBidang => "Sub Bidang".to_string(),
            FormField::SupervisorName => "Nama Asman".to_string(),
            FormField::SupervisorPhone => "No. HP Asman".to_string(),
            FormField::Entity(entity) => entity.to_string(),
            FormField::OrderType => "Tipe Pesanan".to_string(),
            FormField::BulkMenu => "Menu".to_string(),
            FormField::BulkNote => "Catatan".to_string(),
            FormField::EmployeeName(entity, index) => format!("{} #{} Nama", entity, index + 1),
            FormField::EmployeeMenu(entity, index) => format!("{} #{} Menu", entity, index + 1),
            FormField::EmployeeNote(entity, index) => format!("{} #{} Catatan", entity, index + 1),
        }
    }

    /// Whether the field can be filled by typing.
    pub fn accepts_text(&self) -> bool {
        !matches!(
            self,
            FormField::Category | FormField::OrderType | FormField::Entity(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    pub field: FormField,
    pub options: Vec<PickerOption>,
    pub selected: usize,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use mealorder::application::App;
/// use mealorder::domain::WizardStep;
///
/// let app = App::default();
/// assert_eq!(app.store.current_step(), WizardStep::Detail);
/// assert_eq!(app.selected_row, 0);
/// ```
#[derive(Debug)]
pub struct App {
    /// The order draft and step pointer
    pub store: OrderStore,
    /// Menu and employee reference data
    pub catalog: Catalog,
    /// Current application mode
    pub mode: AppMode,
    /// Focused row within the current step
    pub selected_row: usize,
    /// Field being edited in editing mode
    pub editing_field: Option<FormField>,
    /// Current input buffer (for editing mode)
    pub input: String,
    /// Cursor position within the input buffer, in characters
    pub cursor_position: usize,
    /// Open picker, if any
    pub picker: Option<Picker>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Message of the blocking alert
    pub alert: Option<String>,
    /// Last accepted order, shown on the success screen
    pub confirmation: Option<Confirmation>,
    /// Input buffer for the manifest filename
    pub filename_input: String,
    /// Set between a submit request and the backend call
    pub submitting: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            store: OrderStore::new(),
            catalog,
            mode: AppMode::Normal,
            selected_row: 0,
            editing_field: None,
            input: String::new(),
            cursor_position: 0,
            picker: None,
            help_scroll: 0,
            status_message: None,
            alert: None,
            confirmation: None,
            filename_input: String::new(),
            submitting: false,
        }
    }

    /// Loads menu and employee data from the backend.
    ///
    /// A fetched catalog is written to `fallback` so it stays usable offline.
    /// When the backend is unreachable the fallback file is read instead.
    pub fn refresh_catalog(&mut self, api: &dyn OrderApi, fallback: Option<&Path>) {
        match api.fetch_catalog() {
            Ok(catalog) => {
                info!(
                    menu_items = catalog.menu_items.len(),
                    departments = catalog.employees_by_department.len(),
                    "catalog fetched"
                );
                if let Some(path) = fallback {
                    if let Err(e) = CatalogRepository::save_catalog(&catalog, path) {
                        warn!(error = %e, path = %path.display(), "could not cache catalog");
                    }
                }
                self.catalog = catalog;
            }
            Err(e) => {
                warn!(error = %e, "catalog fetch failed");
                match fallback.map(CatalogRepository::load_catalog) {
                    Some(Ok(catalog)) => {
                        self.catalog = catalog;
                        self.status_message = Some("Offline: using cached catalog".to_string());
                    }
                    Some(Err(file_error)) => {
                        warn!(error = %file_error, "catalog file unavailable");
                        self.status_message = Some(format!("Catalog unavailable: {}", e));
                    }
                    None => {
                        self.status_message = Some(format!("Catalog unavailable: {}", e));
                    }
                }
            }
        }
    }

    /// Rows of the current step, top to bottom.
    pub fn fields(&self) -> Vec<FormField> {
        let draft = self.store.form_data();
        match self.store.current_step() {
            WizardStep::Detail => vec![
                FormField::JudulPekerjaan,
                FormField::Category,
                FormField::DropPoint,
                FormField::PicName,
                FormField::PicPhone,
                FormField::SubBidang,
                FormField::SupervisorName,
                FormField::SupervisorPhone,
            ],
            WizardStep::Pemesan => Entity::ALL.into_iter().map(FormField::Entity).collect(),
            WizardStep::Menu => {
                let mut fields = vec![FormField::OrderType];
                match draft.order_type {
                    Some(OrderType::Bulk) => {
                        fields.push(FormField::BulkMenu);
                        fields.push(FormField::BulkNote);
                    }
                    Some(OrderType::Detail) => {
                        for entity in draft.selected() {
                            for index in 0..draft.count_for(entity) as usize {
                                fields.push(FormField::EmployeeName(entity, index));
                                fields.push(FormField::EmployeeMenu(entity, index));
                                fields.push(FormField::EmployeeNote(entity, index));
                            }
                        }
                    }
                    None => {}
                }
                fields
            }
            WizardStep::Summary => Vec::new(),
        }
    }

    pub fn selected_field(&self) -> Option<FormField> {
        self.fields().get(self.selected_row).copied()
    }

    /// Text shown next to a field's label.
    pub fn field_value(&self, field: FormField) -> String {
        let draft = self.store.form_data();
        match field {
            FormField::JudulPekerjaan => draft.judul_pekerjaan.clone(),
            FormField::Category => draft.category.map(|c| c.to_string()).unwrap_or_default(),
            FormField::DropPoint => draft.drop_point.clone(),
            FormField::PicName => draft.pic.name.clone(),
            FormField::PicPhone => draft.pic.nomor_hp.clone(),
            FormField::SubBidang => draft.supervisor.sub_bidang.clone(),
            FormField::SupervisorName => draft.supervisor.name.clone(),
            FormField::SupervisorPhone => draft.supervisor.nomor_hp.clone(),
            FormField::Entity(entity) => format!(
                "[{}] {} orang",
                if draft.is_selected(entity) { "x" } else { " " },
                draft.count_for(entity)
            ),
            FormField::OrderType => draft.order_type.map(|t| t.to_string()).unwrap_or_default(),
            FormField::BulkMenu => self.menu_label(&draft.bulk_order.menu_item_id),
            FormField::BulkNote => draft.bulk_order.note.clone(),
            FormField::EmployeeName(entity, index) => draft
                .employee_order(entity, index)
                .map(|order| order.employee_name.clone())
                .unwrap_or_default(),
            FormField::EmployeeMenu(entity, index) => draft
                .employee_order(entity, index)
                .and_then(|order| order.items.first())
                .map(|item| {
                    if item.menu_name.is_empty() {
                        item.menu_item_id.clone()
                    } else {
                        item.menu_name.clone()
                    }
                })
                .unwrap_or_default(),
            FormField::EmployeeNote(entity, index) => draft
                .employee_order(entity, index)
                .map(|order| order.note.clone())
                .unwrap_or_default(),
        }
    }

    fn menu_label(&self, menu_item_id: &str) -> String {
        self.catalog
            .menu_item(menu_item_id)
            .map(|item| item.name.clone())
            .unwrap_or_else(|| menu_item_id.to_string())
    }

    pub fn move_selection_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let len = self.fields().len();
        if self.selected_row + 1 < len {
            self.selected_row += 1;
        }
    }

    /// Runs the default action of the focused field.
    pub fn activate_selected(&mut self) {
        let Some(field) = self.selected_field() else {
            return;
        };
        match field {
            FormField::Entity(entity) => self.toggle_entity(entity),
            FormField::Category | FormField::OrderType => self.open_picker(field),
            FormField::PicName if !self.catalog.employees_by_department.is_empty() => {
                self.open_picker(field)
            }
            FormField::SubBidang if !self.catalog.employees_by_department.is_empty() => {
                self.open_picker(field)
            }
            FormField::BulkMenu | FormField::EmployeeMenu(..)
                if !self.catalog.menu_for(self.store.form_data().category).is_empty() =>
            {
                self.open_picker(field)
            }
            _ => self.start_editing(field),
        }
    }

    /// Switches to editing mode for `field`, loading its current value.
    pub fn start_editing(&mut self, field: FormField) {
        if !field.accepts_text() {
            return;
        }
        self.input = match field {
            FormField::BulkMenu => self.store.form_data().bulk_order.menu_item_id.clone(),
            FormField::EmployeeMenu(entity, index) => self
                .store
                .form_data()
                .employee_order(entity, index)
                .and_then(|order| order.first_menu_item_id())
                .unwrap_or_default()
                .to_string(),
            _ => self.field_value(field),
        };
        self.cursor_position = self.input.chars().count();
        self.editing_field = Some(field);
        self.mode = AppMode::Editing;
        self.status_message = None;
    }

    /// Starts editing the headcount of an entity.
    pub fn start_count_editing(&mut self, entity: Entity) {
        self.input = self.store.form_data().count_for(entity).to_string();
        self.cursor_position = self.input.chars().count();
        self.editing_field = Some(FormField::Entity(entity));
        self.mode = AppMode::Editing;
    }

    /// Applies the input buffer to the edited field and returns to normal mode.
    pub fn finish_editing(&mut self) {
        if let Some(field) = self.editing_field.take() {
            let value = std::mem::take(&mut self.input);
            if let Err(message) = self.commit_text(field, value) {
                self.status_message = Some(message);
            }
        }
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.editing_field = None;
        self.input.clear();
        self.cursor_position = 0;
    }

    fn commit_text(&mut self, field: FormField, value: String) -> Result<(), String> {
        match field {
            FormField::JudulPekerjaan => self.store.update_form_data(FormDataPatch {
                judul_pekerjaan: Some(value),
                ..FormDataPatch::default()
            }),
            FormField::DropPoint => self.store.update_form_data(FormDataPatch {
                drop_point: Some(value),
                ..FormDataPatch::default()
            }),
            FormField::Category => {
                let patch = FormDataPatch::category_label(&value).map_err(|e| e.to_string())?;
                self.store.update_form_data(patch);
            }
            FormField::PicName => self.store.update_pic(PicPatch {
                name: Some(value),
                nomor_hp: None,
            }),
            FormField::PicPhone => self.store.update_pic(PicPatch {
                name: None,
                nomor_hp: Some(value),
            }),
            FormField::SubBidang => self.store.update_supervisor(SupervisorPatch {
                sub_bidang: Some(value),
                ..SupervisorPatch::default()
            }),
            FormField::SupervisorName => self.store.update_supervisor(SupervisorPatch {
                name: Some(value),
                ..SupervisorPatch::default()
            }),
            FormField::SupervisorPhone => self.store.update_supervisor(SupervisorPatch {
                nomor_hp: Some(value),
                ..SupervisorPatch::default()
            }),
            FormField::Entity(entity) => {
                let count = value
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid headcount: {}", value.trim()))?;
                self.store
                    .update_entity_count(entity, count)
                    .map_err(|e| e.to_string())?;
                if count > 0 && !self.store.form_data().is_selected(entity) {
                    self.store.toggle_entity(entity);
                }
            }
            FormField::OrderType => {
                let order_type = value.parse::<OrderType>().map_err(|e| e.to_string())?;
                self.set_order_type(order_type);
            }
            FormField::BulkMenu => self.store.update_bulk_order(BulkOrderPatch {
                menu_item_id: Some(value.trim().to_string()),
                note: None,
            }),
            FormField::BulkNote => self.store.update_bulk_order(BulkOrderPatch {
                menu_item_id: None,
                note: Some(value),
            }),
            FormField::EmployeeName(entity, index) => {
                let employee_id = self
                    .catalog
                    .find_employee(&value)
                    .map(|employee| employee.id.clone())
                    .unwrap_or_default();
                self.update_slot(entity, index, |order| {
                    order.employee_name = value;
                    order.employee_id = employee_id;
                })
                .map_err(|e| e.to_string())?;
            }
            FormField::EmployeeMenu(entity, index) => {
                let id = value.trim().to_string();
                let name = self
                    .catalog
                    .menu_item(&id)
                    .map(|item| item.name.clone())
                    .unwrap_or_default();
                self.update_slot(entity, index, |order| {
                    order.items = vec![MenuSelection {
                        menu_item_id: id,
                        menu_name: name,
                    }];
                })
                .map_err(|e| e.to_string())?;
            }
            FormField::EmployeeNote(entity, index) => {
                self.update_slot(entity, index, |order| order.note = value)
                    .map_err(|e| e.to_string())?;
            }
        }
        Ok(())
    }

    fn update_slot<F>(&mut self, entity: Entity, index: usize, edit: F) -> DomainResult<()>
    where
        F: FnOnce(&mut EmployeeOrder),
    {
        let mut order = self
            .store
            .form_data()
            .employee_order(entity, index)
            .cloned()
            .unwrap_or_else(|| EmployeeOrder::blank(entity, index));
        edit(&mut order);
        self.store.upsert_employee_order(order)
    }

    pub fn open_picker(&mut self, field: FormField) {
        let options: Vec<PickerOption> = match field {
            FormField::Category => MealCategory::ALL
                .into_iter()
                .map(|category| PickerOption {
                    label: category.label().to_string(),
                    value: category.label().to_string(),
                })
                .collect(),
            FormField::OrderType => [OrderType::Detail, OrderType::Bulk]
                .into_iter()
                .map(|order_type| PickerOption {
                    label: match order_type {
                        OrderType::Detail => "detail - menu per person".to_string(),
                        OrderType::Bulk => "bulk - one menu for everyone".to_string(),
                    },
                    value: order_type.label().to_string(),
                })
                .collect(),
            FormField::PicName => self
                .catalog
                .all_employees()
                .into_iter()
                .map(|(department, employee)| PickerOption {
                    label: format!("{} ({})", employee.name, department),
                    value: employee.name.clone(),
                })
                .collect(),
            FormField::SubBidang => self
                .catalog
                .departments()
                .into_iter()
                .map(|department| PickerOption {
                    label: department.to_string(),
                    value: department.to_string(),
                })
                .collect(),
            FormField::BulkMenu | FormField::EmployeeMenu(..) => self
                .catalog
                .menu_for(self.store.form_data().category)
                .into_iter()
                .map(|item| PickerOption {
                    label: item.name.clone(),
                    value: item.id.clone(),
                })
                .collect(),
            _ => Vec::new(),
        };
        if options.is_empty() {
            self.start_editing(field);
            return;
        }
        let current = self.field_value(field);
        let selected = options
            .iter()
            .position(|option| option.value == current || option.label == current)
            .unwrap_or(0);
        self.picker = Some(Picker {
            field,
            options,
            selected,
        });
        self.mode = AppMode::Picker;
        self.status_message = None;
    }

    pub fn picker_up(&mut self) {
        if let Some(picker) = self.picker.as_mut() {
            picker.selected = picker.selected.saturating_sub(1);
        }
    }

    pub fn picker_down(&mut self) {
        if let Some(picker) = self.picker.as_mut() {
            if picker.selected + 1 < picker.options.len() {
                picker.selected += 1;
            }
        }
    }

    pub fn cancel_picker(&mut self) {
        self.picker = None;
        self.mode = AppMode::Normal;
    }

    /// Applies the highlighted option to the picker's field.
    pub fn confirm_picker(&mut self) {
        self.mode = AppMode::Normal;
        let Some(picker) = self.picker.take() else {
            return;
        };
        let Some(option) = picker.options.get(picker.selected) else {
            return;
        };
        let value = option.value.clone();
        match picker.field {
            FormField::PicName => self.choose_pic(&value),
            FormField::SubBidang => self.choose_department(&value),
            field => {
                if let Err(message) = self.commit_text(field, value) {
                    self.status_message = Some(message);
                }
            }
        }
    }

    /// Fills the PIC from the directory and the supervisor of their department.
    pub fn choose_pic(&mut self, name: &str) {
        let nomor_hp = self
            .catalog
            .find_employee(name)
            .map(|employee| employee.nomor_hp.clone());
        self.store.update_pic(PicPatch {
            name: Some(name.to_string()),
            nomor_hp,
        });
        if let Some(department) = self.catalog.department_of(name).map(str::to_string) {
            self.choose_department(&department);
        }
    }

    pub fn choose_department(&mut self, department: &str) {
        match self.catalog.supervisor_for(department) {
            Some(supervisor) => self.store.update_supervisor(supervisor.into()),
            None => self.store.update_supervisor(SupervisorPatch {
                sub_bidang: Some(department.to_string()),
                ..SupervisorPatch::default()
            }),
        }
    }

    pub fn toggle_entity(&mut self, entity: Entity) {
        self.store.toggle_entity(entity);
        let draft = self.store.form_data();
        if draft.is_selected(entity) && draft.count_for(entity) == 0 {
            self.set_entity_count(entity, 1);
        }
    }

    /// Raises or lowers an entity's headcount within `0..=MAX_HEADCOUNT`.
    pub fn adjust_entity_count(&mut self, entity: Entity, delta: i64) {
        let current = i64::from(self.store.form_data().count_for(entity));
        let target = (current + delta).max(0);
        let count = target.min(i64::from(MAX_HEADCOUNT)) as u32;
        if !self.store.form_data().is_selected(entity) && count > 0 {
            self.store.toggle_entity(entity);
        }
        self.set_entity_count(entity, count);
        if target > i64::from(MAX_HEADCOUNT) {
            self.status_message = Some(format!(
                "Headcount for {} is limited to {}",
                entity, MAX_HEADCOUNT
            ));
        }
    }

    fn set_entity_count(&mut self, entity: Entity, count: u32) {
        if let Err(e) = self.store.update_entity_count(entity, count) {
            warn!(error = %e, "headcount rejected");
            self.status_message = Some(e.to_string());
        }
    }

    /// Sets the ordering mode. Choosing the mode already set keeps the selections.
    pub fn set_order_type(&mut self, order_type: OrderType) {
        let previous = self.store.form_data().order_type;
        if previous == Some(order_type) {
            return;
        }
        self.store.set_order_type(order_type);
        if order_type == OrderType::Detail {
            self.store.ensure_employee_slots();
        }
        if previous.is_some() {
            self.status_message =
                Some("Order type changed: previous menu choices were cleared".to_string());
        }
    }

    pub fn can_proceed(&self) -> bool {
        can_proceed(self.store.current_step(), self.store.form_data())
    }

    /// Advances one step when the current step's gate allows it.
    pub fn next_step(&mut self) -> bool {
        let step = self.store.current_step();
        let Some(next) = step.next() else {
            return false;
        };
        if !self.can_proceed() {
            self.status_message = Some(self.blocked_reason(step));
            return false;
        }
        if next == WizardStep::Menu
            && self.store.form_data().order_type == Some(OrderType::Detail)
        {
            self.store.ensure_employee_slots();
        }
        self.store.set_current_step(next);
        self.selected_row = 0;
        self.status_message = None;
        true
    }

    /// Goes back one step. Never validated.
    pub fn previous_step(&mut self) -> bool {
        match self.store.current_step().previous() {
            Some(previous) => {
                self.store.set_current_step(previous);
                self.selected_row = 0;
                self.status_message = None;
                true
            }
            None => false,
        }
    }

    fn blocked_reason(&self, step: WizardStep) -> String {
        match step {
            WizardStep::Detail => format!(
                "Please fill in: {}",
                missing_detail_fields(self.store.form_data()).join(", ")
            ),
            WizardStep::Pemesan => {
                "Select at least one entity, each with a headcount above zero".to_string()
            }
            WizardStep::Menu => match self.store.form_data().order_type {
                None => "Choose an order type".to_string(),
                Some(OrderType::Bulk) => "Choose a menu for the bulk order".to_string(),
                Some(OrderType::Detail) => {
                    "Every person needs a name and a menu choice".to_string()
                }
            },
            WizardStep::Summary => String::new(),
        }
    }

    pub fn payload(&self) -> DomainResult<OrderPayload> {
        build_payload(self.store.form_data(), Utc::now())
    }

    /// Marks the order for submission so the next frame can show it as in
    /// flight before the blocking call runs. Refused outside the summary
    /// step or while a submission is already pending.
    pub fn request_submit(&mut self) -> bool {
        if self.store.current_step() != WizardStep::Summary || self.submitting {
            return false;
        }
        self.submitting = true;
        self.status_message = Some("Submitting order...".to_string());
        true
    }

    /// Sends the draft to the backend from the summary step.
    ///
    /// On success the draft is reset and the confirmation kept for the
    /// success screen. On failure the draft stays untouched for a retry.
    /// Clears the pending flag set by [`App::request_submit`].
    pub fn submit(&mut self, api: &dyn OrderApi) {
        self.submitting = false;
        self.status_message = None;
        if self.store.current_step() != WizardStep::Summary {
            return;
        }
        let payload = match self.payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.alert = Some(e.to_string());
                self.mode = AppMode::Alert;
                return;
            }
        };

        let result = api.submit_order(&payload);

        match result {
            Ok(id) => {
                info!(%id, "order submitted");
                self.confirmation = Some(Confirmation { id, order: payload });
                self.store.reset_step();
                self.selected_row = 0;
                self.mode = AppMode::Success;
            }
            Err(e) => {
                error!(error = %e, "order submission failed");
                self.alert = Some(e.user_message());
                self.mode = AppMode::Alert;
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.mode = AppMode::Normal;
    }

    /// Leaves the success screen for a fresh order.
    pub fn start_new_order(&mut self) {
        self.confirmation = None;
        self.store.reset_step();
        self.selected_row = 0;
        self.mode = AppMode::Normal;
    }

    /// Switches to manifest export mode to prompt for a filename.
    pub fn start_manifest_export(&mut self) {
        self.mode = AppMode::ExportManifest;
        self.filename_input = "order-manifest.csv".to_string();
        self.cursor_position = self.filename_input.chars().count();
        self.status_message = None;
    }

    /// Returns the filename input if not empty, otherwise the default name.
    pub fn get_manifest_filename(&self) -> String {
        if self.filename_input.trim().is_empty() {
            "order-manifest.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    pub fn set_export_result(&mut self, result: Result<String, ExportError>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Manifest exported to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }
}
