//! Sparse `UPDATE` statements built from patch structs.
//!
//! Column names come only from the fixed identifiers below; caller data is
//! always bound as a parameter.

use rusqlite::ToSql;

use super::row::encode_timestamp;
use crate::storage::types::{BudgetPatch, TransactionPatch};

/// Column/value pairs for the present fields of a patch.
#[derive(Default)]
pub(crate) struct Assignments {
    columns: Vec<&'static str>,
    params: Vec<Box<dyn ToSql>>,
}

impl Assignments {
    fn set<T: ToSql + 'static>(&mut self, column: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.columns.push(column);
            self.params.push(Box::new(value));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// `UPDATE <table> SET a = ?, b = ? WHERE id = ?` plus its bound parameters.
    pub fn into_update(mut self, table: &'static str, id: i64) -> (String, Vec<Box<dyn ToSql>>) {
        let set_clause = self
            .columns
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        self.params.push(Box::new(id));
        (
            format!("UPDATE {} SET {} WHERE id = ?", table, set_clause),
            self.params,
        )
    }
}

impl From<&TransactionPatch> for Assignments {
    fn from(patch: &TransactionPatch) -> Self {
        let mut assignments = Assignments::default();
        assignments.set("type", patch.kind.map(|kind| kind.as_str()));
        assignments.set("amount", patch.amount);
        assignments.set("category", patch.category.clone());
        assignments.set("description", patch.description.clone());
        assignments.set("date", patch.date.as_ref().map(encode_timestamp));
        assignments.set("image", patch.image.clone());
        assignments
    }
}

impl From<&BudgetPatch> for Assignments {
    fn from(patch: &BudgetPatch) -> Self {
        let mut assignments = Assignments::default();
        assignments.set("amount", patch.amount);
        assignments.set("period", patch.period.map(|period| period.as_str()));
        assignments.set("category", patch.category.clone());
        assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::types::BudgetPeriod;

    #[test]
    fn test_only_present_fields_are_assigned() {
        let patch = TransactionPatch::new().amount(500.0).description("Rent - March");
        let assignments = Assignments::from(&patch);

        assert_eq!(assignments.columns(), &["amount", "description"]);

        let (sql, params) = assignments.into_update("transactions", 9);
        assert_eq!(sql, "UPDATE transactions SET amount = ?, description = ? WHERE id = ?");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_clearing_image_is_an_assignment() {
        let patch = TransactionPatch::new().image(None);
        let assignments = Assignments::from(&patch);

        assert_eq!(assignments.columns(), &["image"]);
    }

    #[test]
    fn test_empty_patch_has_no_assignments() {
        assert!(Assignments::from(&TransactionPatch::new()).is_empty());
        assert!(Assignments::from(&BudgetPatch::new()).is_empty());
    }

    #[test]
    fn test_budget_patch_columns() {
        let patch = BudgetPatch::new().period(BudgetPeriod::Weekly).category("Shopping");
        let assignments = Assignments::from(&patch);

        assert_eq!(assignments.columns(), &["period", "category"]);
    }
}
