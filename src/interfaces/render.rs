use crate::domain::line_item::Total;
use crate::domain::payment_method::Content;
use crate::domain::ports::Translate;
use crate::domain::store::MethodStoreState;
use crate::domain::transaction::FormStatus;

pub const FIELD_REQUIRED: &str = "This field is required";

/// What store-bound content needs to know when it is drawn.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub state: Option<&'a MethodStoreState>,
    pub form_status: FormStatus,
    pub total: &'a Total,
}

/// Draws descriptor content as plain text.
pub struct TextRenderer<'a> {
    translator: &'a dyn Translate,
}

impl<'a> TextRenderer<'a> {
    pub fn new(translator: &'a dyn Translate) -> Self {
        Self { translator }
    }

    pub fn render(&self, content: &Content, view: &RenderView<'_>) -> String {
        match content {
            Content::Empty => String::new(),
            Content::Label {
                text, translatable, ..
            } => {
                if *translatable {
                    self.translator.translate(text)
                } else {
                    text.to_string()
                }
            }
            Content::Form { fields, .. } => fields
                .iter()
                .map(|field| {
                    let state = view.state.and_then(|state| state.get(field.name));
                    let mut line = format!(
                        "{}: {}",
                        self.translator.translate(field.label),
                        state.map(|s| s.value.as_str()).unwrap_or_default()
                    );
                    if state.is_some_and(|s| s.is_error()) {
                        line.push_str(&format!(" ({})", self.translator.translate(FIELD_REQUIRED)));
                    }
                    if view.form_status != FormStatus::Ready {
                        line.push_str(" [disabled]");
                    }
                    line
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Content::PayButton { .. } => self.button_contents(view.form_status, view.total),
            Content::Summary { field, .. } => view
                .state
                .and_then(|state| state.get(*field))
                .map(|s| s.value.clone())
                .unwrap_or_default(),
        }
    }

    /// Pay button caption for the given form status.
    pub fn button_contents(&self, form_status: FormStatus, total: &Total) -> String {
        match form_status {
            FormStatus::Submitting => self.translator.translate("Processing…"),
            FormStatus::Ready => self
                .translator
                .translate_with("Pay %s", &[total.display_value.as_str()]),
            _ => self.translator.translate("Please wait…"),
        }
    }
}
