//! Step gates of the order wizard.
//!
//! Each gate decides whether the data of one step is complete enough to
//! move forward. They are pure functions over the draft and never error:
//! an incomplete step simply keeps the "Next" action disabled.

use super::models::{MAX_HEADCOUNT, OrderDraft, OrderType, WizardStep};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Labels of the detail fields that still need a value.
pub fn missing_detail_fields(draft: &OrderDraft) -> Vec<&'static str> {
    let checks = [
        ("Judul Pekerjaan", is_blank(&draft.judul_pekerjaan)),
        ("Kategori", draft.category.is_none()),
        ("Drop Point", is_blank(&draft.drop_point)),
        ("Nama PIC", is_blank(&draft.pic.name)),
        ("No. HP PIC", is_blank(&draft.pic.nomor_hp)),
        ("Nama Asman", is_blank(&draft.supervisor.name)),
        ("No. HP Asman", is_blank(&draft.supervisor.nomor_hp)),
        ("Sub Bidang", is_blank(&draft.supervisor.sub_bidang)),
    ];
    checks
        .into_iter()
        .filter(|(_, missing)| *missing)
        .map(|(label, _)| label)
        .collect()
}

pub fn is_detail_step_valid(draft: &OrderDraft) -> bool {
    missing_detail_fields(draft).is_empty()
}

/// At least one entity selected, and every selected entity has a headcount
/// between 1 and [`MAX_HEADCOUNT`].
pub fn is_pemesan_step_valid(draft: &OrderDraft) -> bool {
    let selected = draft.selected();
    !selected.is_empty()
        && selected
            .into_iter()
            .all(|entity| (1..=MAX_HEADCOUNT).contains(&draft.count_for(entity)))
}

pub fn is_menu_step_valid(draft: &OrderDraft) -> bool {
    match draft.order_type {
        Some(OrderType::Bulk) => !is_blank(&draft.bulk_order.menu_item_id),
        Some(OrderType::Detail) => draft.selected().into_iter().all(|entity| {
            let orders: Vec<_> = draft.orders_for(entity).collect();
            orders.len() == draft.count_for(entity) as usize
                && orders.iter().all(|order| {
                    !is_blank(&order.employee_name)
                        && order.first_menu_item_id().is_some_and(|id| !is_blank(id))
                })
        }),
        None => false,
    }
}

/// Gate for leaving `step` forward. The summary step is always open.
pub fn can_proceed(step: WizardStep, draft: &OrderDraft) -> bool {
    match step {
        WizardStep::Detail => is_detail_step_valid(draft),
        WizardStep::Pemesan => is_pemesan_step_valid(draft),
        WizardStep::Menu => is_menu_step_valid(draft),
        WizardStep::Summary => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{EmployeeOrder, Entity, MealCategory, MenuSelection};

    fn detail_draft() -> OrderDraft {
        let mut draft = OrderDraft::default();
        draft.judul_pekerjaan = "Rapat Anggaran".to_string();
        draft.drop_point = "Gedung A Lt. 3".to_string();
        draft.pic.name = "Andi".to_string();
        draft.pic.nomor_hp = "0811".to_string();
        draft.supervisor.name = "Budi".to_string();
        draft.supervisor.nomor_hp = "0812".to_string();
        draft.supervisor.sub_bidang = "Keuangan".to_string();
        draft
    }

    fn order(entity: Entity, index: usize, name: &str, menu: &str) -> EmployeeOrder {
        EmployeeOrder {
            employee_name: name.to_string(),
            items: vec![MenuSelection {
                menu_item_id: menu.to_string(),
                menu_name: String::new(),
            }],
            ..EmployeeOrder::blank(entity, index)
        }
    }

    fn select(draft: &mut OrderDraft, entity: Entity, count: u32) {
        draft.selected_entities.insert(entity, true);
        draft.entity_counts.insert(entity, count);
    }

    #[test]
    fn test_detail_requires_category() {
        let mut draft = detail_draft();
        assert!(!is_detail_step_valid(&draft));
        assert_eq!(missing_detail_fields(&draft), vec!["Kategori"]);

        draft.category = Some(MealCategory::MakanSiang);
        assert!(is_detail_step_valid(&draft));
    }

    #[test]
    fn test_detail_rejects_whitespace_only_fields() {
        let mut draft = detail_draft();
        draft.category = Some(MealCategory::Sarapan);
        draft.supervisor.sub_bidang = "   ".to_string();
        assert!(!is_detail_step_valid(&draft));
        assert_eq!(missing_detail_fields(&draft), vec!["Sub Bidang"]);
    }

    #[test]
    fn test_pemesan_needs_a_selection() {
        let mut draft = OrderDraft::default();
        assert!(!is_pemesan_step_valid(&draft));

        // A count without a selection does not count.
        draft.entity_counts.insert(Entity::Ips, 4);
        assert!(!is_pemesan_step_valid(&draft));

        select(&mut draft, Entity::Ips, 4);
        assert!(is_pemesan_step_valid(&draft));
    }

    #[test]
    fn test_pemesan_rejects_zero_count_selection() {
        let mut draft = OrderDraft::default();
        select(&mut draft, Entity::Plnip, 2);
        select(&mut draft, Entity::Kop, 0);
        assert!(!is_pemesan_step_valid(&draft));
    }

    #[test]
    fn test_pemesan_headcount_cap() {
        let mut draft = OrderDraft::default();
        select(&mut draft, Entity::Rsu, MAX_HEADCOUNT);
        assert!(is_pemesan_step_valid(&draft));

        select(&mut draft, Entity::Rsu, MAX_HEADCOUNT + 1);
        assert!(!is_pemesan_step_valid(&draft));
    }

    #[test]
    fn test_menu_without_order_type() {
        let mut draft = OrderDraft::default();
        select(&mut draft, Entity::Plnip, 1);
        assert!(!is_menu_step_valid(&draft));
    }

    #[test]
    fn test_menu_bulk_needs_menu_item() {
        let mut draft = OrderDraft::default();
        select(&mut draft, Entity::Plnip, 3);
        draft.order_type = Some(OrderType::Bulk);
        assert!(!is_menu_step_valid(&draft));

        draft.bulk_order.menu_item_id = " ".to_string();
        assert!(!is_menu_step_valid(&draft));

        draft.bulk_order.menu_item_id = "M1".to_string();
        assert!(is_menu_step_valid(&draft));
    }

    #[test]
    fn test_menu_detail_requires_exact_count() {
        let mut draft = OrderDraft::default();
        select(&mut draft, Entity::Ips, 2);
        draft.order_type = Some(OrderType::Detail);
        draft.employee_orders = vec![order(Entity::Ips, 0, "Andi", "M1")];
        assert!(!is_menu_step_valid(&draft));

        draft.employee_orders.push(order(Entity::Ips, 1, "Budi", "M2"));
        assert!(is_menu_step_valid(&draft));

        draft.employee_orders.push(order(Entity::Ips, 2, "Citra", "M2"));
        assert!(!is_menu_step_valid(&draft));
    }

    #[test]
    fn test_menu_detail_requires_name_and_first_item() {
        let mut draft = OrderDraft::default();
        select(&mut draft, Entity::Rsu, 2);
        draft.order_type = Some(OrderType::Detail);
        draft.employee_orders = vec![
            order(Entity::Rsu, 0, "Andi", "M1"),
            order(Entity::Rsu, 1, "  ", "M1"),
        ];
        assert!(!is_menu_step_valid(&draft));

        draft.employee_orders[1].employee_name = "Budi".to_string();
        draft.employee_orders[1].items.clear();
        assert!(!is_menu_step_valid(&draft));

        draft.employee_orders[1].items = vec![MenuSelection {
            menu_item_id: "M3".to_string(),
            menu_name: "Soto".to_string(),
        }];
        assert!(is_menu_step_valid(&draft));
    }

    #[test]
    fn test_menu_detail_checks_every_selected_entity() {
        let mut draft = OrderDraft::default();
        select(&mut draft, Entity::Ips, 1);
        select(&mut draft, Entity::Mitra, 1);
        draft.order_type = Some(OrderType::Detail);
        draft.employee_orders = vec![order(Entity::Ips, 0, "Andi", "M1")];
        assert!(!is_menu_step_valid(&draft));

        draft.employee_orders.push(order(Entity::Mitra, 0, "Budi", "M1"));
        assert!(is_menu_step_valid(&draft));
    }

    #[test]
    fn test_can_proceed_per_step() {
        let draft = OrderDraft::default();
        assert!(!can_proceed(WizardStep::Detail, &draft));
        assert!(!can_proceed(WizardStep::Pemesan, &draft));
        assert!(!can_proceed(WizardStep::Menu, &draft));
        assert!(can_proceed(WizardStep::Summary, &draft));
    }
}
