// Filter form state
//
// The form keeps a draft (one text buffer per field) that changes on every
// keystroke and is only committed on submit. Pulling the observed values for
// a field "expands" that field so the user can pick one instead of typing.
//
// Reset clears the expanded field and its options but leaves the draft text
// alone; the next submit will commit whatever is still typed in. It also
// retires the ticket of any values request still in flight, so a late reply
// cannot expand a field again.

use super::RequestTicket;
use crate::api::models::{Action, Field, FilterCriteria, FilterValue};
use std::collections::BTreeMap;
use std::fmt;

/// Errors that can occur when committing the form
#[derive(Debug, Clone, PartialEq)]
pub enum FilterFormError {
    /// Price input is not a number
    InvalidPrice(String),
}

impl fmt::Display for FilterFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrice(text) => write!(f, "Цена должна быть числом: '{}'", text),
        }
    }
}

impl std::error::Error for FilterFormError {}

/// Draft filter plus value-selection state
#[derive(Debug, Clone)]
pub struct FilterForm {
    /// Draft text per field
    inputs: BTreeMap<Field, String>,
    /// Field receiving keystrokes
    active: Field,
    /// Field whose observed values are currently listed
    selected_field: Option<Field>,
    /// Observed non-null values for `selected_field`
    options: Vec<FilterValue>,
    /// Highlighted option
    option_cursor: usize,
    /// Bumped on every reset
    values_generation: u64,
}

impl FilterForm {
    pub fn new() -> Self {
        Self {
            inputs: BTreeMap::new(),
            active: Field::Product,
            selected_field: None,
            options: Vec::new(),
            option_cursor: 0,
            values_generation: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Draft editing
    // ─────────────────────────────────────────────────────────────

    pub fn input(&self, field: Field) -> &str {
        self.inputs.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set_input(&mut self, field: Field, text: impl Into<String>) {
        self.inputs.insert(field, text.into());
    }

    pub fn active_field(&self) -> Field {
        self.active
    }

    pub fn focus(&mut self, field: Field) {
        self.active = field;
    }

    pub fn focus_next(&mut self) {
        let idx = Field::ALL.iter().position(|f| *f == self.active).unwrap_or(0);
        self.active = Field::ALL[(idx + 1) % Field::ALL.len()];
    }

    pub fn focus_prev(&mut self) {
        let idx = Field::ALL.iter().position(|f| *f == self.active).unwrap_or(0);
        self.active = Field::ALL[(idx + Field::ALL.len() - 1) % Field::ALL.len()];
    }

    pub fn push_char(&mut self, c: char) {
        self.inputs.entry(self.active).or_default().push(c);
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.inputs.get_mut(&self.active) {
            text.pop();
        }
    }

    pub fn clear_active(&mut self) {
        self.inputs.remove(&self.active);
    }

    // ─────────────────────────────────────────────────────────────
    // Value selection
    // ─────────────────────────────────────────────────────────────

    /// Request to issue when the user asks for a field's values
    pub fn on_field_change(&self, field: Field) -> Action {
        Action::field_values(field)
    }

    /// Ticket a values reply must carry to be applied
    pub fn values_ticket(&self) -> RequestTicket {
        RequestTicket(self.values_generation)
    }

    /// Apply the reply to `get_fields(field)`
    ///
    /// Nulls and non-scalars are dropped, duplicates collapsed (first wins),
    /// and `field` becomes the expanded field.
    pub fn set_field_values(&mut self, field: Field, values: &[serde_json::Value]) {
        let mut options: Vec<FilterValue> = Vec::new();
        for value in values.iter().filter_map(FilterValue::from_json) {
            if !options.contains(&value) {
                options.push(value);
            }
        }
        tracing::debug!(
            "{} distinct values for '{}' ({} raw)",
            options.len(),
            field,
            values.len()
        );
        self.options = options;
        self.option_cursor = 0;
        self.selected_field = Some(field);
    }

    pub fn selected_field(&self) -> Option<Field> {
        self.selected_field
    }

    pub fn options(&self) -> &[FilterValue] {
        &self.options
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    /// Whether the option list is showing
    pub fn has_options(&self) -> bool {
        self.selected_field.is_some() && !self.options.is_empty()
    }

    pub fn option_down(&mut self) {
        if self.option_cursor + 1 < self.options.len() {
            self.option_cursor += 1;
        }
    }

    pub fn option_up(&mut self) {
        self.option_cursor = self.option_cursor.saturating_sub(1);
    }

    /// Copy option `index` into the draft of the expanded field
    pub fn choose_value(&mut self, index: usize) -> bool {
        let (Some(field), Some(value)) = (self.selected_field, self.options.get(index)) else {
            return false;
        };
        let text = value.to_string();
        self.inputs.insert(field, text);
        true
    }

    /// Choose the highlighted option
    pub fn choose_highlighted(&mut self) -> bool {
        self.choose_value(self.option_cursor)
    }

    // ─────────────────────────────────────────────────────────────
    // Commit / reset
    // ─────────────────────────────────────────────────────────────

    /// Build the filter to commit; the draft is left as is
    pub fn submit(&self) -> Result<FilterCriteria, FilterFormError> {
        let mut criteria = FilterCriteria::new();
        for (field, raw) in &self.inputs {
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }
            let value = match field {
                Field::Price => {
                    let number = text
                        .replace(',', ".")
                        .parse::<f64>()
                        .ok()
                        .filter(|n| n.is_finite())
                        .ok_or_else(|| FilterFormError::InvalidPrice(text.to_string()))?;
                    FilterValue::Number(number)
                }
                Field::Product | Field::Brand => FilterValue::Text(text.to_string()),
            };
            criteria.set(*field, value);
        }
        Ok(criteria)
    }

    /// Collapse value selection; draft text is kept
    pub fn reset(&mut self) {
        self.selected_field = None;
        self.options.clear();
        self.option_cursor = 0;
        self.values_generation += 1;
    }
}

impl Default for FilterForm {
    fn default() -> Self {
        Self::new()
    }
}
