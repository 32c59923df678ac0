//! Shared fixtures for unit tests.

use crate::domain::{Schema, Table, Value};

/// A small reference dataset in canonical column order, as CSV.
pub const SAMPLE_CSV: &str = "\
CustomerID,Tenure,Contract,InternetService,PaymentMethod,OnlineSecurity,TechSupport,StreamingTV,StreamingMovies,SeniorCitizen,PaperlessBilling,Churn
1,12,One year,DSL,Mailed check,Yes,No,No,Yes,0,1,False
2,1,Month-to-month,Fiber optic,Electronic check,No,No,Yes,Yes,1,1,True
3,48,Two year,DSL,Bank transfer,Yes,Yes,No,Yes,0,0,False
4,30,Month-to-month,Fiber optic,Credit card,No,Yes,Yes,Yes,0,1,True
5,7,One year,,Electronic check,No,No,No,Yes,1,0,False
6,60,Two year,DSL,Credit card,Yes,Yes,Yes,Yes,0,0,False
";

fn text(s: &str) -> Value {
    if s.is_empty() {
        Value::Missing
    } else {
        Value::Text(s.to_string())
    }
}

/// The same rows as [`SAMPLE_CSV`], built in memory.
pub fn sample_table() -> Table {
    let raw: [(f64, f64, &str, &str, &str, [&str; 4], [bool; 3]); 6] = [
        (1.0, 12.0, "One year", "DSL", "Mailed check", ["Yes", "No", "No", "Yes"], [false, true, false]),
        (2.0, 1.0, "Month-to-month", "Fiber optic", "Electronic check", ["No", "No", "Yes", "Yes"], [true, true, true]),
        (3.0, 48.0, "Two year", "DSL", "Bank transfer", ["Yes", "Yes", "No", "Yes"], [false, false, false]),
        (4.0, 30.0, "Month-to-month", "Fiber optic", "Credit card", ["No", "Yes", "Yes", "Yes"], [false, true, true]),
        (5.0, 7.0, "One year", "", "Electronic check", ["No", "No", "No", "Yes"], [true, false, false]),
        (6.0, 60.0, "Two year", "DSL", "Credit card", ["Yes", "Yes", "Yes", "Yes"], [false, false, false]),
    ];

    let rows = raw
        .iter()
        .map(|(id, tenure, contract, internet, payment, services, flags)| {
            let mut row = vec![
                Value::Number(*id),
                Value::Number(*tenure),
                text(contract),
                text(internet),
                text(payment),
            ];
            row.extend(services.iter().map(|s| text(s)));
            row.extend(flags.iter().map(|&b| Value::Flag(b)));
            row
        })
        .collect();

    Table::new(Schema::canonical(), rows)
}
