//! Fixed categorical mappings and the per-column imputation policy.

use crate::domain::{Column, ColumnKind};

/// Closed, invertible label → code table.
#[derive(Debug, PartialEq, Eq)]
pub struct CategoricalMapping {
    pub name: &'static str,
    entries: &'static [(&'static str, i64)],
}

impl CategoricalMapping {
    pub fn code(&self, label: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|&(_, code)| code)
    }

    pub fn label(&self, code: i64) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|&&(_, c)| c == code)
            .map(|&(label, _)| label)
    }

    pub fn entries(&self) -> &'static [(&'static str, i64)] {
        self.entries
    }
}

pub static CONTRACT: CategoricalMapping = CategoricalMapping {
    name: "contract",
    entries: &[("One year", 0), ("Two year", 1), ("Month-to-month", 2)],
};

pub static INTERNET_SERVICE: CategoricalMapping = CategoricalMapping {
    name: "internet service",
    entries: &[("DSL", 0), ("Fiber optic", 1)],
};

pub static PAYMENT_METHOD: CategoricalMapping = CategoricalMapping {
    name: "payment method",
    entries: &[
        ("Mailed check", 0),
        ("Bank transfer", 1),
        ("Credit card", 2),
        ("Electronic check", 3),
    ],
};

/// Shared by the yes/no service columns.
pub static YES_NO: CategoricalMapping = CategoricalMapping {
    name: "yes/no",
    entries: &[("Yes", 0), ("No", 1)],
};

/// Mapping for a categorical column; `None` for integer and flag columns.
pub fn mapping_for(column: Column) -> Option<&'static CategoricalMapping> {
    match column {
        Column::Contract => Some(&CONTRACT),
        Column::InternetService => Some(&INTERNET_SERVICE),
        Column::PaymentMethod => Some(&PAYMENT_METHOD),
        Column::OnlineSecurity
        | Column::TechSupport
        | Column::StreamingTv
        | Column::StreamingMovies => Some(&YES_NO),
        Column::CustomerId
        | Column::Tenure
        | Column::SeniorCitizen
        | Column::PaperlessBilling
        | Column::Churn => None,
    }
}

/// What the encoder does with a value it cannot encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imputation {
    /// Replace with the mean code of the rows in the same column that did encode.
    MeanOfEncoded,
    /// Fail with `InvalidValue`.
    Reject,
}

pub fn imputation_for(column: Column) -> Imputation {
    match column.kind() {
        ColumnKind::Categorical => Imputation::MeanOfEncoded,
        ColumnKind::Integer | ColumnKind::Flag => Imputation::Reject,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_categorical_column_has_a_mapping() {
        for column in Column::ALL {
            assert_eq!(
                mapping_for(column).is_some(),
                column.kind() == ColumnKind::Categorical,
                "{column}"
            );
        }
    }

    #[test]
    fn codes_are_unique_within_each_mapping() {
        for mapping in [&CONTRACT, &INTERNET_SERVICE, &PAYMENT_METHOD, &YES_NO] {
            let mut codes: Vec<i64> = mapping.entries().iter().map(|&(_, c)| c).collect();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), mapping.entries().len(), "{}", mapping.name);
        }
    }

    #[test]
    fn contract_codes_match_fixed_table() {
        assert_eq!(CONTRACT.code("Two year"), Some(1));
        assert_eq!(CONTRACT.label(1), Some("Two year"));
        assert_eq!(CONTRACT.code("Month-to-month"), Some(2));
        assert_eq!(CONTRACT.code("month-to-month"), None);
        assert_eq!(CONTRACT.label(99), None);
    }
}
