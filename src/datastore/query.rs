//! Row Queries
//!
//! A small filter/order/limit description that renders to PostgREST
//! query parameters (`col=eq.v`, `order=col.asc`, `select=...`) and can
//! also be evaluated directly against JSON rows by the in-memory store.

use serde_json::Value;
use std::cmp::Ordering;

use super::Table;

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl Op {
    fn as_str(&self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Neq => "neq",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::In => "in",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: Op,
    /// One value, or the member list for [`Op::In`]
    pub values: Vec<String>,
}

impl Filter {
    fn param_value(&self) -> String {
        match self.op {
            Op::In => {
                let members: Vec<String> = self.values.iter().map(|v| quote_member(v)).collect();
                format!("in.({})", members.join(","))
            }
            op => format!(
                "{}.{}",
                op.as_str(),
                self.values.first().map(String::as_str).unwrap_or_default()
            ),
        }
    }

    /// Evaluate against a JSON row; a missing column never matches
    pub fn matches(&self, row: &Value) -> bool {
        let cell = match row.get(&self.column) {
            Some(Value::Null) | None => return false,
            Some(cell) => cell,
        };

        if self.op == Op::In {
            return self
                .values
                .iter()
                .any(|v| compare(cell, v) == Ordering::Equal);
        }

        let Some(value) = self.values.first() else {
            return false;
        };
        let ordering = compare(cell, value);
        match self.op {
            Op::Eq => ordering == Ordering::Equal,
            Op::Neq => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            Op::In => false,
        }
    }
}

/// PostgREST reserves `,` `(` `)` `"` inside `in.(...)` lists
fn quote_member(value: &str) -> String {
    if value.contains(|c: char| matches!(c, ',' | '(' | ')' | '"' | ' ')) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Text form of a cell for comparisons
fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric when both sides are numbers, otherwise lexicographic
/// (ISO dates and `HH:MM` times order correctly as text)
fn compare(cell: &Value, value: &str) -> Ordering {
    if let (Some(a), Ok(b)) = (cell.as_f64(), value.parse::<f64>()) {
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }
    cell_text(cell).as_str().cmp(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Related row pulled in alongside an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Embed {
    Patient,
    Doctor,
}

impl Embed {
    /// Related table, which is also the key the embedded object lands under
    pub fn table(&self) -> Table {
        match self {
            Embed::Patient => Table::Patients,
            Embed::Doctor => Table::Doctors,
        }
    }

    /// Column on the parent row holding the related id
    pub fn foreign_key(&self) -> &'static str {
        match self {
            Embed::Patient => "patient_id",
            Embed::Doctor => "doctor_id",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Embed::Patient => &["name"],
            Embed::Doctor => &["name", "specialty"],
        }
    }

    fn select_clause(&self) -> String {
        format!("{}({})", self.table().name(), self.columns().join(","))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    pub limit: Option<usize>,
    pub embeds: Vec<Embed>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    fn filter(mut self, column: &str, op: Op, value: impl ToString) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            op,
            values: vec![value.to_string()],
        });
        self
    }

    pub fn eq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, Op::Eq, value)
    }

    pub fn neq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, Op::Neq, value)
    }

    pub fn gt(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, Op::Gt, value)
    }

    pub fn gte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, Op::Gte, value)
    }

    pub fn lt(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, Op::Lt, value)
    }

    pub fn lte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, Op::Lte, value)
    }

    pub fn in_list<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.filters.push(Filter {
            column: column.to_string(),
            op: Op::In,
            values: values.into_iter().map(|v| v.to_string()).collect(),
        });
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        if !self.embeds.contains(&embed) {
            self.embeds.push(embed);
        }
        self
    }

    /// `select` column list
    pub fn select_clause(&self) -> String {
        let mut parts = vec!["*".to_string()];
        parts.extend(self.embeds.iter().map(Embed::select_clause));
        parts.join(",")
    }

    /// PostgREST query string pairs
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select_clause())];

        params.extend(
            self.filters
                .iter()
                .map(|f| (f.column.clone(), f.param_value())),
        );

        if !self.order.is_empty() {
            let order: Vec<String> = self
                .order
                .iter()
                .map(|o| format!("{}.{}", o.column, if o.ascending { "asc" } else { "desc" }))
                .collect();
            params.push(("order".to_string(), order.join(",")));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }

    /// Whether every filter accepts the row
    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    /// Sort rows by the query's order clauses; nulls sort last
    pub fn sort(&self, rows: &mut [Value]) {
        if self.order.is_empty() {
            return;
        }
        rows.sort_by(|a, b| {
            for order in &self.order {
                let ordering = match (a.get(&order.column), b.get(&order.column)) {
                    (Some(x), Some(y)) if !x.is_null() && !y.is_null() => {
                        let ord = compare(x, &cell_text(y));
                        if order.ascending {
                            ord
                        } else {
                            ord.reverse()
                        }
                    }
                    (Some(x), _) if !x.is_null() => Ordering::Less,
                    (_, Some(y)) if !y.is_null() => Ordering::Greater,
                    _ => Ordering::Equal,
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_rendering() {
        let query = Query::new()
            .eq("status", "scheduled")
            .gte("date", "2025-04-09")
            .in_list("status", ["scheduled", "confirmed"])
            .order_by("date", true)
            .order_by("time", false)
            .limit(10)
            .embed(Embed::Patient)
            .embed(Embed::Doctor);

        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*,patients(name),doctors(name,specialty)".to_string()),
                ("status".to_string(), "eq.scheduled".to_string()),
                ("date".to_string(), "gte.2025-04-09".to_string()),
                ("status".to_string(), "in.(scheduled,confirmed)".to_string()),
                ("order".to_string(), "date.asc,time.desc".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_in_members_quoted() {
        let query = Query::new().in_list("name", ["Silva, Maria", "Ana"]);
        assert_eq!(query.to_params()[1].1, "in.(\"Silva, Maria\",Ana)");
    }

    #[test]
    fn test_row_matching() {
        let row = json!({ "date": "2025-04-10", "status": "confirmed", "day_of_week": 4 });

        assert!(Query::new().eq("status", "confirmed").matches(&row));
        assert!(Query::new().gte("date", "2025-04-10").matches(&row));
        assert!(!Query::new().gt("date", "2025-04-10").matches(&row));
        assert!(Query::new().lt("day_of_week", 10).matches(&row));
        assert!(Query::new().in_list("status", ["scheduled", "confirmed"]).matches(&row));
        assert!(!Query::new().eq("missing", "x").matches(&row));
        assert!(Query::new().matches(&row));
    }

    #[test]
    fn test_sort_rows() {
        let mut rows = vec![
            json!({ "date": "2025-04-11", "time": "08:00" }),
            json!({ "date": "2025-04-10", "time": "09:00" }),
            json!({ "date": "2025-04-10", "time": "08:30" }),
            json!({ "date": null, "time": "07:00" }),
        ];
        Query::new()
            .order_by("date", true)
            .order_by("time", true)
            .sort(&mut rows);

        let times: Vec<&str> = rows.iter().map(|r| r["time"].as_str().unwrap()).collect();
        assert_eq!(times, vec!["08:30", "09:00", "08:00", "07:00"]);
    }
}
