//! Conversion of a completed draft into the service-request wire payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};
use super::models::{
    Entity, MAX_HEADCOUNT, MealCategory, OrderDraft, OrderType, Pic, RequestType, Supervisor,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadItem {
    pub menu_item_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadEmployeeOrder {
    pub employee_name: String,
    pub entity: Entity,
    pub items: Vec<PayloadItem>,
}

/// Body of `POST /service-requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub judul_pekerjaan: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub category: MealCategory,
    pub drop_point: String,
    pub supervisor: Supervisor,
    pub pic: Pic,
    pub request_date: DateTime<Utc>,
    pub required_date: DateTime<Utc>,
    pub employee_orders: Vec<PayloadEmployeeOrder>,
}

impl OrderPayload {
    pub fn headcount_for(&self, entity: Entity) -> usize {
        self.employee_orders
            .iter()
            .filter(|order| order.entity == entity)
            .count()
    }
}

/// What the confirmation screen receives once the server accepted an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub id: String,
    #[serde(flatten)]
    pub order: OrderPayload,
}

fn single_item(menu_item_id: &str) -> Vec<PayloadItem> {
    vec![PayloadItem {
        menu_item_id: menu_item_id.to_string(),
        quantity: 1,
    }]
}

/// Builds the wire payload from `draft`, stamping both dates with `now`.
///
/// Bulk orders expand into one placeholder order per head of every selected
/// entity. Detail orders are emitted sorted by `(entity, index)` so the same
/// draft always yields the same payload. A selected entity with more than
/// [`MAX_HEADCOUNT`] heads is rejected before anything is expanded.
pub fn build_payload(draft: &OrderDraft, now: DateTime<Utc>) -> DomainResult<OrderPayload> {
    let category = draft
        .category
        .ok_or(DomainError::IncompleteDraft("category is not set"))?;
    let order_type = draft
        .order_type
        .ok_or(DomainError::IncompleteDraft("order type is not chosen"))?;
    for entity in draft.selected() {
        let count = draft.count_for(entity);
        if count > MAX_HEADCOUNT {
            return Err(DomainError::HeadcountTooLarge {
                entity,
                count,
                max: MAX_HEADCOUNT,
            });
        }
    }

    let employee_orders = match order_type {
        OrderType::Bulk => {
            let mut entities = draft.selected();
            entities.sort();
            entities
                .into_iter()
                .flat_map(|entity| {
                    (0..draft.count_for(entity)).map(move |_| PayloadEmployeeOrder {
                        employee_name: format!("Pegawai {}", entity),
                        entity,
                        items: single_item(&draft.bulk_order.menu_item_id),
                    })
                })
                .collect()
        }
        OrderType::Detail => {
            let mut orders: Vec<_> = draft.employee_orders.iter().collect();
            orders.sort_by_key(|order| (order.entity, order.index));
            orders
                .into_iter()
                .map(|order| PayloadEmployeeOrder {
                    employee_name: order.employee_name.trim().to_string(),
                    entity: order.entity,
                    items: order
                        .items
                        .iter()
                        .flat_map(|item| single_item(&item.menu_item_id))
                        .collect(),
                })
                .collect()
        }
    };

    Ok(OrderPayload {
        judul_pekerjaan: draft.judul_pekerjaan.clone(),
        request_type: draft.request_type,
        category,
        drop_point: draft.drop_point.clone(),
        supervisor: draft.supervisor.clone(),
        pic: draft.pic.clone(),
        request_date: now,
        required_date: now,
        employee_orders,
    })
}
