use analytics::FilterSpec;
use serde::Deserialize;
use std::str::FromStr;

/// Raw filter inputs from the query string.
///
/// Everything arrives as text and is parsed leniently: a value that does not
/// parse is dropped and places no constraint on the query, rather than
/// failing the request. Every key may repeat; for single-valued filters the
/// last usable occurrence wins.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub name: Vec<String>,
    pub search: Vec<String>,
    pub role: Vec<String>,
    pub department: Vec<String>,
    pub departments: Vec<String>,
    pub salary_min: Vec<String>,
    pub salary_max: Vec<String>,
    pub performance_min: Vec<String>,
    pub performance_max: Vec<String>,
    pub joining_year: Vec<String>,
    pub joining_year_min: Vec<String>,
    pub joining_year_max: Vec<String>,
}

impl FilterParams {
    pub fn into_spec(self) -> FilterSpec {
        FilterSpec {
            name: last_text(self.name),
            search: last_text(self.search),
            role: last_text(self.role),
            department: last_text(self.department),
            departments: self
                .departments
                .into_iter()
                .filter(|d| !d.trim().is_empty())
                .collect(),
            salary_min: last_parsed(self.salary_min),
            salary_max: last_parsed(self.salary_max),
            performance_min: last_parsed(self.performance_min),
            performance_max: last_parsed(self.performance_max),
            joining_year: last_parsed(self.joining_year),
            joining_year_min: last_parsed(self.joining_year_min),
            joining_year_max: last_parsed(self.joining_year_max),
        }
    }
}

fn last_text(values: Vec<String>) -> Option<String> {
    values.into_iter().rev().find(|v| !v.trim().is_empty())
}

fn last_parsed<T: FromStr>(values: Vec<String>) -> Option<T> {
    values.iter().rev().find_map(|v| v.trim().parse().ok())
}
