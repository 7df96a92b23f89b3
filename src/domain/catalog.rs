//! Read-only reference data consumed by the wizard pickers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::models::{MealCategory, Supervisor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<MealCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub nomor_hp: String,
    #[serde(default)]
    pub is_supervisor: bool,
}

/// Menu items and the employee directory, grouped by department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
    #[serde(default)]
    pub employees_by_department: BTreeMap<String, Vec<Employee>>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.menu_items.is_empty() && self.employees_by_department.is_empty()
    }

    pub fn departments(&self) -> Vec<&str> {
        self.employees_by_department.keys().map(String::as_str).collect()
    }

    /// Resolves the supervisor of a department.
    ///
    /// The first employee flagged as supervisor wins; otherwise the first
    /// employee listed for the department is used.
    pub fn supervisor_for(&self, department: &str) -> Option<Supervisor> {
        let employees = self.employees_by_department.get(department)?;
        let head = employees
            .iter()
            .find(|employee| employee.is_supervisor)
            .or_else(|| employees.first())?;
        Some(Supervisor {
            name: head.name.clone(),
            sub_bidang: department.to_string(),
            nomor_hp: head.nomor_hp.clone(),
        })
    }

    pub fn department_of(&self, employee_name: &str) -> Option<&str> {
        self.employees_by_department
            .iter()
            .find(|(_, employees)| employees.iter().any(|e| e.name == employee_name))
            .map(|(department, _)| department.as_str())
    }

    pub fn find_employee(&self, name: &str) -> Option<&Employee> {
        let wanted = name.trim();
        self.employees_by_department
            .values()
            .flatten()
            .find(|employee| employee.name.eq_ignore_ascii_case(wanted))
    }

    /// Every employee paired with their department, sorted by name.
    pub fn all_employees(&self) -> Vec<(&str, &Employee)> {
        let mut employees: Vec<(&str, &Employee)> = self
            .employees_by_department
            .iter()
            .flat_map(|(department, list)| list.iter().map(move |e| (department.as_str(), e)))
            .collect();
        employees.sort_by(|a, b| a.1.name.cmp(&b.1.name));
        employees
    }

    /// Menu items offered for a category. Uncategorised items are always offered.
    pub fn menu_for(&self, category: Option<MealCategory>) -> Vec<&MenuItem> {
        self.menu_items
            .iter()
            .filter(|item| match (category, item.category) {
                (Some(wanted), Some(actual)) => wanted == actual,
                _ => true,
            })
            .collect()
    }

    pub fn menu_item(&self, id: &str) -> Option<&MenuItem> {
        self.menu_items.iter().find(|item| item.id == id)
    }

    /// Groups a flat employee list by department.
    pub fn group_employees<I>(employees: I) -> BTreeMap<String, Vec<Employee>>
    where
        I: IntoIterator<Item = (String, Employee)>,
    {
        let mut grouped: BTreeMap<String, Vec<Employee>> = BTreeMap::new();
        for (department, employee) in employees {
            grouped.entry(department).or_default().push(employee);
        }
        grouped
    }
}
