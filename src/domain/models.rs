use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Institution codes an order can be grouped and billed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Entity {
    Plnip,
    Ips,
    Kop,
    Rsu,
    Mitra,
    Other,
}

impl Entity {
    /// Display order used by the wizard screens.
    pub const ALL: [Entity; 6] = [
        Entity::Plnip,
        Entity::Ips,
        Entity::Kop,
        Entity::Rsu,
        Entity::Mitra,
        Entity::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Entity::Plnip => "PLNIP",
            Entity::Ips => "IPS",
            Entity::Kop => "KOP",
            Entity::Rsu => "RSU",
            Entity::Mitra => "MITRA",
            Entity::Other => "OTHER",
        }
    }
}

// Ordered by code so that sorting matches the backend's "entity asc".
impl Ord for Entity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(other.code())
    }
}

impl PartialOrd for Entity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Entity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Entity::ALL
            .into_iter()
            .find(|entity| entity.code() == code)
            .ok_or_else(|| DomainError::UnknownEntity(s.to_string()))
    }
}

/// Meal-time label of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealCategory {
    #[serde(rename = "Sarapan")]
    Sarapan,
    #[serde(rename = "Makan Siang")]
    MakanSiang,
    #[serde(rename = "Makan Malam")]
    MakanMalam,
    #[serde(rename = "Snack")]
    Snack,
}

impl MealCategory {
    pub const ALL: [MealCategory; 4] = [
        MealCategory::Sarapan,
        MealCategory::MakanSiang,
        MealCategory::MakanMalam,
        MealCategory::Snack,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealCategory::Sarapan => "Sarapan",
            MealCategory::MakanSiang => "Makan Siang",
            MealCategory::MakanMalam => "Makan Malam",
            MealCategory::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MealCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MealCategory::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownCategory(s.to_string()))
    }
}

/// How menu items are chosen for the headcount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// One menu selection per person.
    Detail,
    /// One menu selection shared by every person.
    Bulk,
}

impl OrderType {
    pub fn label(&self) -> &'static str {
        match self {
            OrderType::Detail => "detail",
            OrderType::Bulk => "bulk",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detail" => Ok(OrderType::Detail),
            "bulk" => Ok(OrderType::Bulk),
            _ => Err(DomainError::UnknownOrderType(s.to_string())),
        }
    }
}

/// Service request type. This wizard only produces meal requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequestType {
    #[default]
    #[serde(rename = "MEAL")]
    Meal,
}

/// Wizard step pointer. Being an enum, it can never leave `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    Detail,
    Pemesan,
    Menu,
    Summary,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Detail,
        WizardStep::Pemesan,
        WizardStep::Menu,
        WizardStep::Summary,
    ];

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Detail => 0,
            WizardStep::Pemesan => 1,
            WizardStep::Menu => 2,
            WizardStep::Summary => 3,
        }
    }

    pub fn from_index(index: usize) -> Result<Self, DomainError> {
        WizardStep::ALL
            .get(index)
            .copied()
            .ok_or(DomainError::InvalidStep(index))
    }

    pub fn next(&self) -> Option<WizardStep> {
        WizardStep::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| WizardStep::ALL[i])
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Detail => "Detail",
            WizardStep::Pemesan => "Pemesan",
            WizardStep::Menu => "Menu",
            WizardStep::Summary => "Summary",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pic {
    pub name: String,
    pub nomor_hp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supervisor {
    pub name: String,
    pub sub_bidang: String,
    pub nomor_hp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSelection {
    pub menu_item_id: String,
    pub menu_name: String,
}

/// Menu choice of one person in a detail order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeOrder {
    pub entity: Entity,
    /// Position of this person within the entity's headcount.
    pub index: usize,
    pub employee_name: String,
    pub employee_id: String,
    pub items: Vec<MenuSelection>,
    pub note: String,
}

impl EmployeeOrder {
    /// An empty slot for the `index`-th person of `entity`.
    pub fn blank(entity: Entity, index: usize) -> Self {
        Self {
            entity,
            index,
            employee_name: String::new(),
            employee_id: String::new(),
            items: Vec::new(),
            note: String::new(),
        }
    }

    pub fn first_menu_item_id(&self) -> Option<&str> {
        self.items.first().map(|item| item.menu_item_id.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOrder {
    pub menu_item_id: String,
    pub note: String,
}

/// Largest headcount accepted for a single entity.
pub const MAX_HEADCOUNT: u32 = 500;

/// The in-progress order held by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub judul_pekerjaan: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub category: Option<MealCategory>,
    pub drop_point: String,
    pub pic: Pic,
    pub supervisor: Supervisor,
    pub selected_entities: BTreeMap<Entity, bool>,
    pub entity_counts: BTreeMap<Entity, u32>,
    pub order_type: Option<OrderType>,
    pub employee_orders: Vec<EmployeeOrder>,
    pub bulk_order: BulkOrder,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            judul_pekerjaan: String::new(),
            request_type: RequestType::Meal,
            category: None,
            drop_point: String::new(),
            pic: Pic::default(),
            supervisor: Supervisor::default(),
            selected_entities: Entity::ALL.into_iter().map(|e| (e, false)).collect(),
            entity_counts: Entity::ALL.into_iter().map(|e| (e, 0)).collect(),
            order_type: None,
            employee_orders: Vec::new(),
            bulk_order: BulkOrder::default(),
        }
    }
}

impl OrderDraft {
    pub fn is_selected(&self, entity: Entity) -> bool {
        self.selected_entities.get(&entity).copied().unwrap_or(false)
    }

    pub fn count_for(&self, entity: Entity) -> u32 {
        self.entity_counts.get(&entity).copied().unwrap_or(0)
    }

    /// Selected entities in display order.
    pub fn selected(&self) -> Vec<Entity> {
        Entity::ALL
            .into_iter()
            .filter(|entity| self.is_selected(*entity))
            .collect()
    }

    /// Total headcount over the selected entities.
    pub fn total_headcount(&self) -> u64 {
        self.selected()
            .into_iter()
            .map(|e| u64::from(self.count_for(e)))
            .sum()
    }

    pub fn employee_order(&self, entity: Entity, index: usize) -> Option<&EmployeeOrder> {
        self.employee_orders
            .iter()
            .find(|order| order.entity == entity && order.index == index)
    }

    pub fn orders_for(&self, entity: Entity) -> impl Iterator<Item = &EmployeeOrder> {
        self.employee_orders
            .iter()
            .filter(move |order| order.entity == entity)
    }
}

/// Shallow patch over the top-level text fields of a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDataPatch {
    pub judul_pekerjaan: Option<String>,
    pub category: Option<MealCategory>,
    pub drop_point: Option<String>,
}

impl FormDataPatch {
    /// Builds a category patch from a free-form label, rejecting unknown labels.
    pub fn category_label(label: &str) -> Result<Self, DomainError> {
        Ok(Self {
            category: Some(label.parse()?),
            ..Self::default()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PicPatch {
    pub name: Option<String>,
    pub nomor_hp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupervisorPatch {
    pub name: Option<String>,
    pub sub_bidang: Option<String>,
    pub nomor_hp: Option<String>,
}

impl From<Supervisor> for SupervisorPatch {
    fn from(supervisor: Supervisor) -> Self {
        Self {
            name: Some(supervisor.name),
            sub_bidang: Some(supervisor.sub_bidang),
            nomor_hp: Some(supervisor.nomor_hp),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOrderPatch {
    pub menu_item_id: Option<String>,
    pub note: Option<String>,
}
