//! Order draft store.
//!
//! Holds the draft and the wizard step pointer. The UI never writes fields
//! directly; every change goes through one of the named operations below,
//! which keep the per-entity orders consistent with the entity selection.

use tracing::debug;

use crate::domain::{
    BulkOrder, BulkOrderPatch, DomainError, DomainResult, EmployeeOrder, Entity, FormDataPatch,
    MAX_HEADCOUNT, OrderDraft, OrderType, PicPatch, SupervisorPatch, WizardStep,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderStore {
    current_step: WizardStep,
    form_data: OrderDraft,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn form_data(&self) -> &OrderDraft {
        &self.form_data
    }

    pub fn set_current_step(&mut self, step: WizardStep) {
        debug!(step = step.index(), "step changed");
        self.current_step = step;
    }

    /// Back to the first step with an empty draft.
    pub fn reset_step(&mut self) {
        debug!("order draft reset");
        self.current_step = WizardStep::Detail;
        self.form_data = OrderDraft::default();
    }

    pub fn update_form_data(&mut self, patch: FormDataPatch) {
        if let Some(judul) = patch.judul_pekerjaan {
            self.form_data.judul_pekerjaan = judul;
        }
        if let Some(category) = patch.category {
            self.form_data.category = Some(category);
        }
        if let Some(drop_point) = patch.drop_point {
            self.form_data.drop_point = drop_point;
        }
    }

    pub fn toggle_entity(&mut self, entity: Entity) {
        let selected = self.form_data.selected_entities.entry(entity).or_insert(false);
        *selected = !*selected;
        debug!(%entity, selected = *selected, "entity toggled");
        self.drop_orders_for(entity);
    }

    /// Counts above [`MAX_HEADCOUNT`] are rejected and leave the draft as is.
    pub fn update_entity_count(&mut self, entity: Entity, count: u32) -> DomainResult<()> {
        if count > MAX_HEADCOUNT {
            return Err(DomainError::HeadcountTooLarge {
                entity,
                count,
                max: MAX_HEADCOUNT,
            });
        }
        debug!(%entity, count, "entity count updated");
        self.form_data.entity_counts.insert(entity, count);
        self.drop_orders_for(entity);
        Ok(())
    }

    /// Switching mode discards every selection made under the previous mode.
    pub fn set_order_type(&mut self, order_type: OrderType) {
        debug!(%order_type, "order type set");
        self.form_data.order_type = Some(order_type);
        self.form_data.employee_orders.clear();
        self.form_data.bulk_order = BulkOrder::default();
    }

    /// Replaces the per-person orders.
    ///
    /// Entries for unselected entities, or beyond an entity's headcount, are
    /// dropped so the list never outlives the selection it was built for.
    pub fn update_employee_orders(&mut self, orders: Vec<EmployeeOrder>) {
        let total = orders.len();
        let kept: Vec<EmployeeOrder> = orders
            .into_iter()
            .filter(|order| self.slot_check(order.entity, order.index).is_ok())
            .collect();
        if kept.len() != total {
            debug!(dropped = total - kept.len(), "discarded out-of-range employee orders");
        }
        self.form_data.employee_orders = kept;
    }

    /// Inserts or replaces the order occupying `(order.entity, order.index)`.
    pub fn upsert_employee_order(&mut self, order: EmployeeOrder) -> DomainResult<()> {
        self.slot_check(order.entity, order.index)?;
        let orders = &mut self.form_data.employee_orders;
        match orders
            .iter_mut()
            .find(|existing| existing.entity == order.entity && existing.index == order.index)
        {
            Some(existing) => *existing = order,
            None => orders.push(order),
        }
        Ok(())
    }

    /// Creates blank orders for every headcount slot that has none yet.
    pub fn ensure_employee_slots(&mut self) {
        for entity in self.form_data.selected() {
            for index in 0..self.form_data.count_for(entity) as usize {
                if self.form_data.employee_order(entity, index).is_none() {
                    self.form_data
                        .employee_orders
                        .push(EmployeeOrder::blank(entity, index));
                }
            }
        }
    }

    pub fn update_bulk_order(&mut self, patch: BulkOrderPatch) {
        let bulk = &mut self.form_data.bulk_order;
        if let Some(menu_item_id) = patch.menu_item_id {
            bulk.menu_item_id = menu_item_id;
        }
        if let Some(note) = patch.note {
            bulk.note = note;
        }
    }

    pub fn update_pic(&mut self, patch: PicPatch) {
        let pic = &mut self.form_data.pic;
        if let Some(name) = patch.name {
            pic.name = name;
        }
        if let Some(nomor_hp) = patch.nomor_hp {
            pic.nomor_hp = nomor_hp;
        }
    }

    pub fn update_supervisor(&mut self, patch: SupervisorPatch) {
        let supervisor = &mut self.form_data.supervisor;
        if let Some(name) = patch.name {
            supervisor.name = name;
        }
        if let Some(sub_bidang) = patch.sub_bidang {
            supervisor.sub_bidang = sub_bidang;
        }
        if let Some(nomor_hp) = patch.nomor_hp {
            supervisor.nomor_hp = nomor_hp;
        }
    }

    fn slot_check(&self, entity: Entity, index: usize) -> DomainResult<()> {
        if !self.form_data.is_selected(entity) {
            return Err(DomainError::EntityNotSelected(entity));
        }
        let count = self.form_data.count_for(entity);
        if index >= count as usize {
            return Err(DomainError::SlotOutOfRange { entity, index, count });
        }
        Ok(())
    }

    fn drop_orders_for(&mut self, entity: Entity) {
        self.form_data
            .employee_orders
            .retain(|order| order.entity != entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MealCategory, MenuSelection, is_pemesan_step_valid, is_detail_step_valid};

    fn named_order(entity: Entity, index: usize, name: &str) -> EmployeeOrder {
        EmployeeOrder {
            employee_name: name.to_string(),
            items: vec![MenuSelection {
                menu_item_id: "M1".to_string(),
                menu_name: "Nasi Goreng".to_string(),
            }],
            ..EmployeeOrder::blank(entity, index)
        }
    }

    fn store_with(entity: Entity, count: u32) -> OrderStore {
        let mut store = OrderStore::new();
        store.toggle_entity(entity);
        store.update_entity_count(entity, count).unwrap();
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = OrderStore::new();
        assert_eq!(store.current_step(), WizardStep::Detail);
        assert_eq!(store.form_data(), &OrderDraft::default());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut store = store_with(Entity::Ips, 2);
        store.set_current_step(WizardStep::Menu);
        store.reset_step();
        let once = store.clone();
        store.reset_step();
        assert_eq!(store, once);
        assert_eq!(store, OrderStore::new());
    }

    #[test]
    fn test_update_form_data_merges_shallowly() {
        let mut store = OrderStore::new();
        store.update_form_data(FormDataPatch {
            judul_pekerjaan: Some("Rapat".to_string()),
            ..FormDataPatch::default()
        });
        store.update_form_data(FormDataPatch::category_label("Makan Siang").unwrap());

        let draft = store.form_data();
        assert_eq!(draft.judul_pekerjaan, "Rapat");
        assert_eq!(draft.category, Some(MealCategory::MakanSiang));
        assert!(draft.drop_point.is_empty());
    }

    #[test]
    fn test_unknown_category_label_never_reaches_store() {
        assert_eq!(
            FormDataPatch::category_label("Brunch"),
            Err(DomainError::UnknownCategory("Brunch".to_string()))
        );
    }

    #[test]
    fn test_detail_step_after_category_update() {
        let mut store = OrderStore::new();
        store.update_form_data(FormDataPatch {
            judul_pekerjaan: Some("Rapat".to_string()),
            drop_point: Some("Gedung A".to_string()),
            ..FormDataPatch::default()
        });
        store.update_pic(PicPatch {
            name: Some("Andi".to_string()),
            nomor_hp: Some("0811".to_string()),
        });
        store.update_supervisor(SupervisorPatch {
            name: Some("Budi".to_string()),
            sub_bidang: Some("Keuangan".to_string()),
            nomor_hp: Some("0812".to_string()),
        });
        assert!(!is_detail_step_valid(store.form_data()));

        store.update_form_data(FormDataPatch::category_label("Makan Siang").unwrap());
        assert!(is_detail_step_valid(store.form_data()));
    }

    #[test]
    fn test_toggle_then_zero_count_blocks_pemesan() {
        let mut store = OrderStore::new();
        store.toggle_entity(Entity::Kop);
        store.update_entity_count(Entity::Kop, 0).unwrap();
        assert!(!is_pemesan_step_valid(store.form_data()));
    }

    #[test]
    fn test_toggle_entity_drops_its_orders() {
        let mut store = store_with(Entity::Ips, 1);
        store.toggle_entity(Entity::Rsu);
        store.update_entity_count(Entity::Rsu, 1).unwrap();
        store.upsert_employee_order(named_order(Entity::Ips, 0, "Andi")).unwrap();
        store.upsert_employee_order(named_order(Entity::Rsu, 0, "Budi")).unwrap();

        store.toggle_entity(Entity::Ips);
        let draft = store.form_data();
        assert!(!draft.is_selected(Entity::Ips));
        assert_eq!(draft.orders_for(Entity::Ips).count(), 0);
        assert_eq!(draft.orders_for(Entity::Rsu).count(), 1);
    }

    #[test]
    fn test_entity_count_cap() {
        let mut store = store_with(Entity::Plnip, 2);
        store.upsert_employee_order(named_order(Entity::Plnip, 0, "Andi")).unwrap();

        assert_eq!(
            store.update_entity_count(Entity::Plnip, MAX_HEADCOUNT + 1),
            Err(DomainError::HeadcountTooLarge {
                entity: Entity::Plnip,
                count: MAX_HEADCOUNT + 1,
                max: MAX_HEADCOUNT,
            })
        );
        assert_eq!(store.form_data().count_for(Entity::Plnip), 2);
        assert_eq!(store.form_data().orders_for(Entity::Plnip).count(), 1);

        store.update_entity_count(Entity::Plnip, MAX_HEADCOUNT).unwrap();
        assert_eq!(store.form_data().count_for(Entity::Plnip), MAX_HEADCOUNT);
    }

    #[test]
    fn test_count_change_drops_orders() {
        let mut store = store_with(Entity::Mitra, 2);
        store.upsert_employee_order(named_order(Entity::Mitra, 0, "Andi")).unwrap();
        store.update_entity_count(Entity::Mitra, 3).unwrap();
        assert!(store.form_data().employee_orders.is_empty());
    }

    #[test]
    fn test_set_order_type_discards_selections() {
        let mut store = store_with(Entity::Plnip, 1);
        store.set_order_type(OrderType::Detail);
        store.upsert_employee_order(named_order(Entity::Plnip, 0, "Andi")).unwrap();

        store.set_order_type(OrderType::Bulk);
        let draft = store.form_data();
        assert!(draft.employee_orders.is_empty());
        assert_eq!(draft.bulk_order, BulkOrder::default());
        assert_eq!(draft.order_type, Some(OrderType::Bulk));

        store.update_bulk_order(BulkOrderPatch {
            menu_item_id: Some("M1".to_string()),
            note: None,
        });
        store.set_order_type(OrderType::Bulk);
        assert!(store.form_data().bulk_order.menu_item_id.is_empty());
    }

    #[test]
    fn test_upsert_replaces_existing_slot() {
        let mut store = store_with(Entity::Ips, 2);
        store.upsert_employee_order(named_order(Entity::Ips, 1, "Andi")).unwrap();
        store.upsert_employee_order(named_order(Entity::Ips, 1, "Budi")).unwrap();

        let draft = store.form_data();
        assert_eq!(draft.employee_orders.len(), 1);
        assert_eq!(draft.employee_order(Entity::Ips, 1).unwrap().employee_name, "Budi");
    }

    #[test]
    fn test_upsert_rejects_invalid_slots() {
        let mut store = store_with(Entity::Ips, 1);
        assert_eq!(
            store.upsert_employee_order(named_order(Entity::Kop, 0, "Andi")),
            Err(DomainError::EntityNotSelected(Entity::Kop))
        );
        assert_eq!(
            store.upsert_employee_order(named_order(Entity::Ips, 1, "Andi")),
            Err(DomainError::SlotOutOfRange {
                entity: Entity::Ips,
                index: 1,
                count: 1
            })
        );
        assert!(store.form_data().employee_orders.is_empty());
    }

    #[test]
    fn test_update_employee_orders_filters_stale_entries() {
        let mut store = store_with(Entity::Ips, 1);
        store.update_employee_orders(vec![
            named_order(Entity::Ips, 0, "Andi"),
            named_order(Entity::Ips, 1, "Budi"),
            named_order(Entity::Kop, 0, "Citra"),
        ]);
        let names: Vec<&str> = store
            .form_data()
            .employee_orders
            .iter()
            .map(|order| order.employee_name.as_str())
            .collect();
        assert_eq!(names, vec!["Andi"]);
    }

    #[test]
    fn test_unselected_entities_never_hold_orders() {
        let mut store = store_with(Entity::Ips, 2);
        store.toggle_entity(Entity::Kop);
        store.update_entity_count(Entity::Kop, 1).unwrap();
        store.ensure_employee_slots();
        store.toggle_entity(Entity::Kop);
        store.update_employee_orders(vec![named_order(Entity::Kop, 0, "Citra")]);
        store.toggle_entity(Entity::Ips);

        let draft = store.form_data();
        for entity in Entity::ALL {
            if !draft.is_selected(entity) {
                assert_eq!(draft.orders_for(entity).count(), 0, "{entity} holds orders");
            }
        }
    }

    #[test]
    fn test_ensure_employee_slots_preserves_existing() {
        let mut store = store_with(Entity::Rsu, 3);
        store.upsert_employee_order(named_order(Entity::Rsu, 1, "Andi")).unwrap();
        store.ensure_employee_slots();

        let draft = store.form_data();
        assert_eq!(draft.orders_for(Entity::Rsu).count(), 3);
        assert_eq!(draft.employee_order(Entity::Rsu, 1).unwrap().employee_name, "Andi");
        assert!(draft.employee_order(Entity::Rsu, 2).unwrap().employee_name.is_empty());
    }

    #[test]
    fn test_scoped_patches_leave_other_fields() {
        let mut store = OrderStore::new();
        store.update_pic(PicPatch {
            name: Some("Andi".to_string()),
            nomor_hp: None,
        });
        store.update_pic(PicPatch {
            name: None,
            nomor_hp: Some("0811".to_string()),
        });
        store.update_bulk_order(BulkOrderPatch {
            menu_item_id: None,
            note: Some("tanpa sambal".to_string()),
        });

        let draft = store.form_data();
        assert_eq!(draft.pic.name, "Andi");
        assert_eq!(draft.pic.nomor_hp, "0811");
        assert_eq!(draft.bulk_order.note, "tanpa sambal");
        assert!(draft.bulk_order.menu_item_id.is_empty());
    }
}
