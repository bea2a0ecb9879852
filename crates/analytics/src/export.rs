//! CSV serialization of employee sequences.
//!
//! Rows are written in exactly the order given, so exporting the output of
//! `AnalyticsEngine::apply` reproduces what the user saw on screen.

use crate::error::AnalyticsError;
use core_types::Employee;
use std::io::Write;

/// Column names of the export, matching the `Employee` attribute names.
pub const CSV_HEADER: [&str; 10] = [
    "id",
    "name",
    "age",
    "gender",
    "role",
    "department",
    "salary",
    "date_of_joining",
    "performance_score",
    "promotion_count",
];

/// Suggested file name for downloads of a filtered export.
pub const EXPORT_FILE_NAME: &str = "employees_filtered.csv";

/// Writes a header row and one record per employee to `writer`.
///
/// The header is always written, even for an empty sequence.
pub fn write_csv<W: Write>(writer: W, employees: &[Employee]) -> Result<(), AnalyticsError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for employee in employees {
        csv_writer.serialize(employee)?;
    }
    csv_writer.flush()?;

    tracing::debug!(rows = employees.len(), "Wrote employee CSV export.");
    Ok(())
}

/// Convenience wrapper around `write_csv` for callers that need the whole
/// document in memory, such as an HTTP response body.
pub fn to_csv_string(employees: &[Employee]) -> Result<String, AnalyticsError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, employees)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Gender;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_export_still_has_a_header() {
        let csv = to_csv_string(&[]).unwrap();
        assert_eq!(
            csv,
            "id,name,age,gender,role,department,salary,date_of_joining,performance_score,promotion_count\n"
        );
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let employee = Employee {
            id: 9,
            name: "Desai, Arjun".to_string(),
            age: 30,
            gender: Gender::M,
            role: "Ops Lead".to_string(),
            department: "Operations".to_string(),
            salary: dec!(52000),
            date_of_joining: NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
            performance_score: 4,
            promotion_count: 1,
        };

        let csv = to_csv_string(&[employee]).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert_eq!(row, "9,\"Desai, Arjun\",30,M,Ops Lead,Operations,52000,2020-09-01,4,1");
    }
}
