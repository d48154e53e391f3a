//! Validator/coercer
//!
//! [`build_program`] turns a declarative field list into a
//! [`ValidatorProgram`], itself plain data, so individual rules can be
//! inspected and tested without running the whole thing. Running the program
//! coerces raw form input (a JSON object) into a normalized [`ValueSet`] or
//! a complete per-field error map. Errors are collected, never fail-fast,
//! and partial success is never returned.
//!
//! Repeated-section rows are carried structurally (array of objects with
//! scalar cells); per-cell numeric strictness is intentionally left to the
//! aggregation stage, which applies the lenient zero-substitution policy.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use shared_types::{
    parse_number, FieldErrors, FieldSchema, FieldType, FieldValue, RowValues, Template, ValueSet,
};

use crate::resolver::check_data_uri;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap();
}

/// Date layouts accepted on input. Everything normalizes to `%Y-%m-%d`.
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Coercion rule for one field. Mirrors [`FieldType`] closed-world, with
/// select carrying its allowed values.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercionRule {
    Text,
    TextArea,
    Date,
    Number,
    Email,
    Boolean { default: bool },
    File,
    /// Empty `allowed` degrades to free text.
    Select { allowed: Vec<String> },
}

/// One executable rule of a validator program.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub rule: CoercionRule,
}

/// Structural rule for one repeated section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRule {
    pub id: String,
    pub label: String,
    /// Column ids, used by the numbered-slot flattening adapter.
    pub columns: Vec<String>,
}

/// A compiled-from-data validation program: one rule per field, one
/// structural rule per repeated section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatorProgram {
    pub rules: Vec<FieldRule>,
    pub sections: Vec<SectionRule>,
}

/// Build a validator program from a flat field list.
pub fn build_program(fields: &[FieldSchema]) -> ValidatorProgram {
    ValidatorProgram {
        rules: fields.iter().map(field_rule).collect(),
        sections: Vec::new(),
    }
}

fn field_rule(field: &FieldSchema) -> FieldRule {
    let rule = match field.field_type {
        FieldType::Text => CoercionRule::Text,
        FieldType::TextArea => CoercionRule::TextArea,
        FieldType::Date => CoercionRule::Date,
        FieldType::Number => CoercionRule::Number,
        FieldType::Email => CoercionRule::Email,
        FieldType::Boolean => CoercionRule::Boolean {
            default: field
                .default_value
                .as_ref()
                .and_then(FieldValue::as_bool)
                .unwrap_or(false),
        },
        FieldType::File => CoercionRule::File,
        FieldType::Select => {
            if field.options.is_empty() {
                tracing::warn!(
                    field = %field.id,
                    "select field has no options; degrading to free text"
                );
            }
            CoercionRule::Select {
                allowed: field.options.iter().map(|o| o.value.clone()).collect(),
            }
        }
    };
    FieldRule {
        id: field.id.clone(),
        label: field.label.clone(),
        required: field.required,
        rule,
    }
}

impl ValidatorProgram {
    /// Build a program covering a template's flat fields, its section
    /// toggles (booleans, default off), and its row structures.
    pub fn for_template(template: &Template) -> Self {
        let mut program = build_program(&template.fields);
        for section in &template.sections {
            program.rules.push(FieldRule {
                id: section.toggle_id.clone(),
                label: section.label.clone(),
                required: false,
                rule: CoercionRule::Boolean { default: false },
            });
            program.sections.push(SectionRule {
                id: section.id.clone(),
                label: section.label.clone(),
                columns: section.columns.iter().map(|c| c.id.clone()).collect(),
            });
        }
        program
    }

    /// Run the program. Pure function of `(self, raw)`: either every field
    /// coerces and the full value set is returned, or the complete error map
    /// is. Never a partial result.
    pub fn validate(&self, raw: &Map<String, Value>) -> Result<ValueSet, FieldErrors> {
        let mut values = ValueSet::new();
        let mut errors = FieldErrors::new();

        for rule in &self.rules {
            match coerce_field(rule, raw.get(&rule.id)) {
                Ok(Some(value)) => values.insert(rule.id.clone(), value),
                Ok(None) => {} // optional and absent
                Err(message) => {
                    errors.insert(rule.id.clone(), message);
                }
            }
        }

        for section in &self.sections {
            match coerce_section(section, raw) {
                Ok(Some(rows)) => values.insert(section.id.clone(), rows),
                Ok(None) => {}
                Err(message) => {
                    errors.insert(section.id.clone(), message);
                }
            }
        }

        if errors.is_empty() {
            Ok(values)
        } else {
            Err(errors)
        }
    }
}

/// Coerce one field. `Ok(None)` means optional-and-absent (the field stays
/// out of the value set).
fn coerce_field(rule: &FieldRule, raw: Option<&Value>) -> Result<Option<FieldValue>, String> {
    match &rule.rule {
        CoercionRule::Text | CoercionRule::TextArea => coerce_text(rule, raw),
        CoercionRule::Email => coerce_email(rule, raw),
        CoercionRule::Date => coerce_date(rule, raw),
        CoercionRule::Number => coerce_number(rule, raw),
        CoercionRule::Boolean { default } => Ok(Some(coerce_boolean(raw, *default))),
        CoercionRule::File => coerce_file(rule, raw),
        CoercionRule::Select { allowed } => coerce_select(rule, allowed, raw),
    }
}

fn coerce_text(rule: &FieldRule, raw: Option<&Value>) -> Result<Option<FieldValue>, String> {
    match scalar_string(raw) {
        None => {
            if rule.required {
                Err(format!("{} is required", rule.label))
            } else {
                Ok(None)
            }
        }
        Some(s) => {
            if rule.required && s.trim().is_empty() {
                Err(format!("{} is required", rule.label))
            } else {
                // Pass-through, embedded newlines preserved.
                Ok(Some(FieldValue::Text(s)))
            }
        }
    }
}

fn coerce_email(rule: &FieldRule, raw: Option<&Value>) -> Result<Option<FieldValue>, String> {
    let s = match scalar_string(raw) {
        None => {
            return if rule.required {
                Err(format!("{} is required", rule.label))
            } else {
                Ok(None)
            }
        }
        Some(s) => s.trim().to_string(),
    };
    if s.is_empty() {
        return if rule.required {
            Err(format!("{} is required", rule.label))
        } else {
            Ok(Some(FieldValue::Text(s)))
        };
    }
    if EMAIL_RE.is_match(&s) {
        Ok(Some(FieldValue::Text(s)))
    } else {
        Err(format!("{} must be a valid email address", rule.label))
    }
}

fn coerce_date(rule: &FieldRule, raw: Option<&Value>) -> Result<Option<FieldValue>, String> {
    let s = match scalar_string(raw) {
        None => {
            return if rule.required {
                Err(format!("{} is required", rule.label))
            } else {
                Ok(None)
            }
        }
        Some(s) => s.trim().to_string(),
    };
    if s.is_empty() {
        return if rule.required {
            Err(format!("{} is required", rule.label))
        } else {
            Ok(None)
        };
    }
    match normalize_date(&s) {
        Some(date) => Ok(Some(FieldValue::Text(date.format("%Y-%m-%d").to_string()))),
        None => Err(format!("{} must be a valid date (YYYY-MM-DD)", rule.label)),
    }
}

fn coerce_number(rule: &FieldRule, raw: Option<&Value>) -> Result<Option<FieldValue>, String> {
    let raw = match raw {
        None | Some(Value::Null) => {
            return if rule.required {
                Err(format!("{} is required", rule.label))
            } else {
                Ok(None)
            }
        }
        Some(v) => v,
    };
    let parsed = match raw {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) if s.trim().is_empty() => {
            return if rule.required {
                Err(format!("{} is required", rule.label))
            } else {
                Ok(None) // empty optional number is absent, never NaN
            };
        }
        Value::String(s) => parse_number(s),
        _ => None,
    };
    match parsed {
        Some(n) => Ok(Some(FieldValue::Number(n))),
        None => Err(format!("{} must be a number", rule.label)),
    }
}

/// Booleans are never "missing": absent input takes the schema default.
fn coerce_boolean(raw: Option<&Value>, default: bool) -> FieldValue {
    let value = match raw {
        None | Some(Value::Null) => default,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0).unwrap_or(default),
        Some(Value::String(s)) => {
            // JS-style truthiness with the usual falsy spellings.
            !matches!(s.trim().to_lowercase().as_str(), "" | "false" | "0" | "no" | "off")
        }
        Some(_) => default,
    };
    FieldValue::Bool(value)
}

fn coerce_file(rule: &FieldRule, raw: Option<&Value>) -> Result<Option<FieldValue>, String> {
    let s = match scalar_string(raw) {
        None => {
            return if rule.required {
                Err(format!("{} is required", rule.label))
            } else {
                Ok(None)
            }
        }
        Some(s) => s,
    };
    if s.is_empty() {
        return if rule.required {
            Err(format!("{} is required", rule.label))
        } else {
            Ok(Some(FieldValue::Text(s)))
        };
    }
    // Only resolver output is accepted here; reading files is the
    // resolver's job, not validation's.
    if !s.starts_with("data:") {
        return Err(format!(
            "{} has not been resolved to embeddable content",
            rule.label
        ));
    }
    match check_data_uri(&s) {
        Ok(()) => Ok(Some(FieldValue::Text(s))),
        Err(e) => Err(format!("{}: {}", rule.label, e)),
    }
}

fn coerce_select(
    rule: &FieldRule,
    allowed: &[String],
    raw: Option<&Value>,
) -> Result<Option<FieldValue>, String> {
    // No options configured: degrade to free text.
    if allowed.is_empty() {
        return coerce_text(rule, raw);
    }
    let s = match scalar_string(raw) {
        None => {
            return if rule.required {
                Err(format!("{} is required", rule.label))
            } else {
                Ok(None)
            }
        }
        Some(s) => s,
    };
    if s.is_empty() {
        return if rule.required {
            Err(format!("{} is required", rule.label))
        } else {
            Ok(Some(FieldValue::Text(s)))
        };
    }
    if allowed.iter().any(|a| a == &s) {
        Ok(Some(FieldValue::Text(s)))
    } else {
        Err(format!(
            "{} must be one of: {}",
            rule.label,
            allowed.join(", ")
        ))
    }
}

/// Read a raw scalar as a string. `None` for absent/null; numbers and bools
/// stringify (form layers are stringly-typed); arrays/objects do not.
fn scalar_string(raw: Option<&Value>) -> Option<String> {
    match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    }
}

/// Normalize a date string: exact `%Y-%m-%d` first, then the other accepted
/// layouts. Calendar validity comes from chrono.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(raw, layout).ok())
}

/// Coerce one repeated section. The raw value must be an array of objects
/// with scalar cells; cells are carried verbatim, with numeric leniency
/// deferred to aggregation. Falls back to the numbered-slot flattening
/// adapter when the array form is absent.
fn coerce_section(section: &SectionRule, raw: &Map<String, Value>) -> Result<Option<FieldValue>, String> {
    let value = match raw.get(&section.id) {
        Some(v) => v,
        None => {
            return Ok(flatten_numbered_slots(raw, &section.id, &section.columns)
                .map(FieldValue::Rows));
        }
    };
    let items = match value {
        Value::Null => return Ok(None),
        Value::Array(items) => items,
        _ => return Err(format!("{} must be a list of rows", section.label)),
    };
    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let object = match item {
            Value::Object(object) => object,
            _ => {
                return Err(format!(
                    "{} row {} must be an object",
                    section.label,
                    index + 1
                ))
            }
        };
        let mut row = RowValues::new();
        for (key, cell) in object {
            match cell {
                Value::Null => {}
                Value::Bool(b) => {
                    row.insert(key.clone(), FieldValue::Bool(*b));
                }
                Value::Number(n) => {
                    if let Some(n) = n.as_f64() {
                        row.insert(key.clone(), FieldValue::Number(n));
                    }
                }
                Value::String(s) => {
                    row.insert(key.clone(), FieldValue::Text(s.clone()));
                }
                Value::Array(_) | Value::Object(_) => {
                    return Err(format!(
                        "{} row {} field '{}' must be a scalar",
                        section.label,
                        index + 1,
                        key
                    ));
                }
            }
        }
        rows.push(row);
    }
    Ok(Some(FieldValue::Rows(rows)))
}

/// One-time adapter for legacy numbered-slot payloads: keys like
/// `workItem3Rate` fold into the `workItems` row array (`rate` column of row
/// 3). Rows are ordered by slot index; absent slots leave no gap.
pub fn flatten_numbered_slots(
    raw: &Map<String, Value>,
    section_id: &str,
    columns: &[String],
) -> Option<Vec<RowValues>> {
    let singular = section_id.strip_suffix('s').unwrap_or(section_id);
    let pattern = Regex::new(&format!(
        "^{}([0-9]+)([A-Z][A-Za-z0-9]*)$",
        regex::escape(singular)
    ))
    .expect("slot pattern is valid");

    let mut slots: std::collections::BTreeMap<u32, RowValues> = std::collections::BTreeMap::new();
    for (key, value) in raw {
        let captures = match pattern.captures(key) {
            Some(c) => c,
            None => continue,
        };
        let index: u32 = match captures[1].parse() {
            Ok(i) => i,
            Err(_) => continue,
        };
        let column = decapitalize(&captures[2]);
        if !columns.iter().any(|c| c == &column) {
            continue;
        }
        let cell = match value {
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => match n.as_f64() {
                Some(n) => FieldValue::Number(n),
                None => continue,
            },
            Value::String(s) => FieldValue::Text(s.clone()),
            _ => continue,
        };
        slots.entry(index).or_default().insert(column, cell);
    }

    if slots.is_empty() {
        None
    } else {
        Some(slots.into_values().collect())
    }
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shared_types::{SectionSchema, SelectOption};

    fn raw(value: serde_json::Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_program_is_introspectable_field_by_field() {
        let fields = vec![
            FieldSchema::email("clientEmail", "Client Email").required(),
            FieldSchema::select(
                "unit",
                "Unit",
                vec![SelectOption::new("Pcs", "Pieces"), SelectOption::new("Kg", "Kilograms")],
            ),
        ];
        let program = build_program(&fields);
        assert_eq!(program.rules.len(), 2);
        assert_eq!(program.rules[0].rule, CoercionRule::Email);
        assert!(program.rules[0].required);
        assert_eq!(
            program.rules[1].rule,
            CoercionRule::Select {
                allowed: vec!["Pcs".to_string(), "Kg".to_string()]
            }
        );
    }

    #[test]
    fn test_required_email_rejects_invalid_and_empty() {
        let program = build_program(&[FieldSchema::email("email", "Email").required()]);

        let errors = program.validate(&raw(json!({"email": "not-an-email"}))).unwrap_err();
        assert!(errors.contains_key("email"));

        let errors = program.validate(&raw(json!({"email": ""}))).unwrap_err();
        assert!(errors.contains_key("email"));

        let values = program.validate(&raw(json!({"email": "a@b.com"}))).unwrap();
        assert_eq!(values.get_str("email"), Some("a@b.com"));
    }

    #[test]
    fn test_optional_email_allows_empty_string() {
        let program = build_program(&[FieldSchema::email("email", "Email")]);
        let values = program.validate(&raw(json!({"email": ""}))).unwrap();
        assert_eq!(values.get_str("email"), Some(""));
    }

    #[test]
    fn test_optional_number_absent_is_absent_not_nan() {
        let program = build_program(&[FieldSchema::number("otherCosts", "Other Costs")]);
        let values = program.validate(&Map::new()).unwrap();
        assert!(!values.contains("otherCosts"));

        // Empty string behaves like absent for an optional number.
        let values = program.validate(&raw(json!({"otherCosts": ""}))).unwrap();
        assert!(!values.contains("otherCosts"));
    }

    #[test]
    fn test_number_coerces_numeric_strings_and_rejects_garbage() {
        let program = build_program(&[FieldSchema::number("rate", "Rate")]);
        let values = program.validate(&raw(json!({"rate": "1,200.50"}))).unwrap();
        assert_eq!(values.get_number("rate"), Some(1200.50));

        let errors = program.validate(&raw(json!({"rate": "abc"}))).unwrap_err();
        assert_eq!(errors.get("rate").unwrap(), "Rate must be a number");
    }

    #[test]
    fn test_select_rejects_values_outside_option_set() {
        let program = build_program(&[FieldSchema::select(
            "unit",
            "Unit",
            vec![SelectOption::new("Pcs", "Pieces"), SelectOption::new("Kg", "Kilograms")],
        )]);
        let errors = program.validate(&raw(json!({"unit": "Litre"}))).unwrap_err();
        assert!(errors.get("unit").unwrap().contains("must be one of"));

        let values = program.validate(&raw(json!({"unit": "Kg"}))).unwrap();
        assert_eq!(values.get_str("unit"), Some("Kg"));
    }

    #[test]
    fn test_select_without_options_degrades_to_free_text() {
        let program = build_program(&[FieldSchema::select("custom", "Custom", vec![])]);
        let values = program.validate(&raw(json!({"custom": "anything"}))).unwrap();
        assert_eq!(values.get_str("custom"), Some("anything"));
    }

    #[test]
    fn test_date_normalizes_parseable_layouts() {
        let program = build_program(&[FieldSchema::date("orderDate", "Order Date")]);
        for input in ["2026-08-08", "2026/08/08", "08/08/2026", "08-08-2026"] {
            let values = program.validate(&raw(json!({"orderDate": input}))).unwrap();
            assert_eq!(values.get_str("orderDate"), Some("2026-08-08"), "input {input}");
        }
    }

    #[test]
    fn test_date_rejects_impossible_calendar_dates() {
        let program = build_program(&[FieldSchema::date("orderDate", "Order Date").required()]);
        let errors = program.validate(&raw(json!({"orderDate": "2026-02-30"}))).unwrap_err();
        assert!(errors.contains_key("orderDate"));
    }

    #[test]
    fn test_boolean_is_never_missing() {
        let program = build_program(&[
            FieldSchema::boolean("flag", "Flag").required(),
            FieldSchema::boolean("defaulted", "Defaulted").with_default(true),
        ]);
        let values = program.validate(&Map::new()).unwrap();
        assert_eq!(values.get_bool("flag"), Some(false));
        assert_eq!(values.get_bool("defaulted"), Some(true));

        let values = program.validate(&raw(json!({"flag": "yes"}))).unwrap();
        assert_eq!(values.get_bool("flag"), Some(true));
        let values = program.validate(&raw(json!({"flag": "off"}))).unwrap();
        assert_eq!(values.get_bool("flag"), Some(false));
    }

    #[test]
    fn test_file_accepts_only_resolver_output() {
        let program = build_program(&[FieldSchema::file("logo", "Logo")]);

        // 1x1 PNG, base64
        let png = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";
        let uri = format!("data:image/png;base64,{png}");
        let values = program.validate(&raw(json!({"logo": uri}))).unwrap();
        assert!(values.get_str("logo").unwrap().starts_with("data:image/png"));

        let errors = program
            .validate(&raw(json!({"logo": "/tmp/logo.png"})))
            .unwrap_err();
        assert!(errors.get("logo").unwrap().contains("not been resolved"));
    }

    #[test]
    fn test_errors_are_collected_not_fail_fast() {
        let program = build_program(&[
            FieldSchema::text("name", "Name").required(),
            FieldSchema::email("email", "Email").required(),
            FieldSchema::number("costs", "Costs"),
        ]);
        let errors = program
            .validate(&raw(json!({"email": "nope", "costs": "x"})))
            .unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_section_rows_carry_cells_verbatim() {
        let template = Template {
            id: "t".into(),
            name: "T".into(),
            description: String::new(),
            fields: vec![],
            sections: vec![SectionSchema {
                id: "workItems".into(),
                label: "Work Description".into(),
                toggle_id: "includeWorkDescriptionTable".into(),
                key_field: "description".into(),
                columns: vec![
                    FieldSchema::text("description", "Description"),
                    FieldSchema::number("area", "Area"),
                    FieldSchema::number("rate", "Rate"),
                ],
                formula: shared_types::RowFormula::product("area", "rate"),
            }],
        };
        let program = ValidatorProgram::for_template(&template);
        // "abc" survives validation untouched; leniency belongs to compute.
        let values = program
            .validate(&raw(json!({
                "workItems": [{"description": "X", "area": "abc", "rate": "20"}]
            })))
            .unwrap();
        let rows = values.get_rows("workItems").unwrap();
        assert_eq!(rows[0]["area"].as_str(), Some("abc"));
        // Toggle defaults to off.
        assert_eq!(values.get_bool("includeWorkDescriptionTable"), Some(false));
    }

    #[test]
    fn test_section_rejects_non_array_shape() {
        let template = Template {
            id: "t".into(),
            name: "T".into(),
            description: String::new(),
            fields: vec![],
            sections: vec![SectionSchema {
                id: "workItems".into(),
                label: "Work Description".into(),
                toggle_id: "includeWorkDescriptionTable".into(),
                key_field: "description".into(),
                columns: vec![FieldSchema::text("description", "Description")],
                formula: shared_types::RowFormula::direct("amount"),
            }],
        };
        let program = ValidatorProgram::for_template(&template);
        let errors = program
            .validate(&raw(json!({"workItems": "not rows"})))
            .unwrap_err();
        assert_eq!(
            errors.get("workItems").unwrap(),
            "Work Description must be a list of rows"
        );
    }

    #[test]
    fn test_numbered_slots_flatten_into_rows() {
        let columns = vec![
            "description".to_string(),
            "area".to_string(),
            "rate".to_string(),
        ];
        let raw = raw(json!({
            "workItem2Description": "Ceiling",
            "workItem2Rate": "15",
            "workItem1Description": "Paint wall",
            "workItem1Area": "100",
            "workItem1Rate": "20",
        }));
        let rows = flatten_numbered_slots(&raw, "workItems", &columns).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["description"].as_str(), Some("Paint wall"));
        assert_eq!(rows[1]["description"].as_str(), Some("Ceiling"));
        assert!(!rows[1].contains_key("area"));
    }
}
