use super::ports::{PaymentSubmitter, Translate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a payment method, unique within a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentMethodId(String);

impl PaymentMethodId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PaymentMethodId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PaymentMethodId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PaymentMethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logo {
    Eps,
    WeChat,
}

/// A form input bound to a store field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    /// Untranslated label.
    pub label: &'static str,
    pub autocomplete: &'static str,
}

/// Opaque description of something the UI renders.
///
/// Store-bound variants carry the namespace they read from; what they show
/// depends on that store's state at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Empty,
    Label {
        text: &'static str,
        translatable: bool,
        logo: Option<Logo>,
    },
    Form {
        namespace: String,
        fields: Vec<FormField>,
    },
    PayButton {
        namespace: String,
    },
    Summary {
        namespace: String,
        field: &'static str,
    },
}

pub type AriaLabelProvider = Arc<dyn Fn(&dyn Translate) -> String + Send + Sync>;

/// Immutable description of one payment method's UI surface and submit path.
#[derive(Clone)]
pub struct PaymentMethodDescriptor {
    pub id: PaymentMethodId,
    pub label: Content,
    pub active_form: Content,
    pub submit_control: Content,
    pub inactive_summary: Content,
    pub aria_label: AriaLabelProvider,
    /// `None` for methods whose submit is a no-op.
    pub submitter: Option<Arc<dyn PaymentSubmitter>>,
}

impl PaymentMethodDescriptor {
    pub fn aria_label(&self, translator: &dyn Translate) -> String {
        (self.aria_label)(translator)
    }
}

impl fmt::Debug for PaymentMethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentMethodDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("active_form", &self.active_form)
            .field("submit_control", &self.submit_control)
            .field("inactive_summary", &self.inactive_summary)
            .field("has_submitter", &self.submitter.is_some())
            .finish()
    }
}
