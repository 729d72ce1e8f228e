use crate::error::{CheckoutError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CUSTOMER_NAME: &str = "customer_name";
pub const CUSTOMER_BANK: &str = "customer_bank";

/// One customer-entered field.
///
/// `is_touched` flips to true on the first interaction (or forced validation)
/// and never goes back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub value: String,
    pub is_touched: bool,
}

impl FieldState {
    /// A field the UI should flag: touched and still empty.
    pub fn is_error(&self) -> bool {
        self.is_touched && self.value.is_empty()
    }
}

/// Declares one field a method store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

pub type MethodStoreState = BTreeMap<String, FieldState>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    FieldSet { field: String, value: String },
    FieldTouched { field: String },
}

impl StoreAction {
    pub fn set(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::FieldSet {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn touch(field: impl Into<String>) -> Self {
        Self::FieldTouched {
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            StoreAction::FieldSet { field, .. } | StoreAction::FieldTouched { field } => field,
        }
    }
}

/// Applies an action to a state, returning the next state.
///
/// Actions naming a field the state does not hold leave it unchanged; callers
/// that need to reject them go through [`MethodStore::dispatch`].
pub fn reduce(mut state: MethodStoreState, action: &StoreAction) -> MethodStoreState {
    match action {
        StoreAction::FieldSet { field, value } => {
            if let Some(entry) = state.get_mut(field) {
                entry.value = value.clone();
                entry.is_touched = true;
            }
        }
        StoreAction::FieldTouched { field } => {
            if let Some(entry) = state.get_mut(field) {
                entry.is_touched = true;
            }
        }
    }
    state
}

/// Result of a forced validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub invalid_fields: Vec<String>,
    pub state: MethodStoreState,
}

/// Isolated field state for a single payment method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodStore {
    namespace: String,
    schema: Vec<FieldSpec>,
    state: MethodStoreState,
}

impl MethodStore {
    pub fn new(namespace: impl Into<String>, schema: Vec<FieldSpec>) -> Self {
        let state = schema
            .iter()
            .map(|spec| (spec.name.to_string(), FieldState::default()))
            .collect();
        Self {
            namespace: namespace.into(),
            schema,
            state,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn schema(&self) -> &[FieldSpec] {
        &self.schema
    }

    pub fn state(&self) -> &MethodStoreState {
        &self.state
    }

    pub fn get_field(&self, name: &str) -> Result<&FieldState> {
        self.state.get(name).ok_or_else(|| self.unknown_field(name))
    }

    pub fn dispatch(&mut self, action: StoreAction) -> Result<()> {
        if !self.state.contains_key(action.field()) {
            return Err(self.unknown_field(action.field()));
        }
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, &action);
        Ok(())
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.dispatch(StoreAction::set(name, value))
    }

    pub fn touch_field(&mut self, name: &str) -> Result<()> {
        self.dispatch(StoreAction::touch(name))
    }

    /// Pure check, leaves touched flags alone.
    pub fn is_valid(&self) -> bool {
        self.missing_required().next().is_none()
    }

    /// Touches every required field that is still empty so the UI can show
    /// its error, and reports whether the form may be submitted.
    pub fn validate_and_touch(&mut self) -> ValidationOutcome {
        let missing: Vec<String> = self.missing_required().map(str::to_string).collect();
        for field in &missing {
            let state = std::mem::take(&mut self.state);
            self.state = reduce(state, &StoreAction::touch(field.as_str()));
        }
        ValidationOutcome {
            is_valid: missing.is_empty(),
            invalid_fields: missing,
            state: self.state.clone(),
        }
    }

    pub fn validate(&mut self) -> bool {
        self.validate_and_touch().is_valid
    }

    /// Fields currently flagged as errors.
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.state
            .iter()
            .filter(|(_, field)| field.is_error())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Current values keyed by field name, as sent to the processor.
    pub fn values(&self) -> BTreeMap<String, String> {
        self.state
            .iter()
            .map(|(name, field)| (name.clone(), field.value.clone()))
            .collect()
    }

    fn missing_required(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schema
            .iter()
            .filter(|spec| spec.required)
            .filter(|spec| {
                self.state
                    .get(spec.name)
                    .is_none_or(|field| field.value.is_empty())
            })
            .map(|spec| spec.name)
    }

    fn unknown_field(&self, name: &str) -> CheckoutError {
        CheckoutError::UnknownFieldError {
            namespace: self.namespace.clone(),
            field: name.to_string(),
        }
    }
}

pub fn create_eps_store() -> MethodStore {
    tracing::debug!("creating a new eps payment method store");
    MethodStore::new(
        "eps",
        vec![
            FieldSpec::required(CUSTOMER_NAME),
            FieldSpec::optional(CUSTOMER_BANK),
        ],
    )
}

pub fn create_wechat_store() -> MethodStore {
    tracing::debug!("creating a new wechat payment method store");
    MethodStore::new("wechat", vec![FieldSpec::required(CUSTOMER_NAME)])
}
