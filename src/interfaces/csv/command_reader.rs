use crate::application::checkout::CheckoutCommand;
use crate::domain::payment_method::PaymentMethodId;
use crate::error::{CheckoutError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum Action {
    Select,
    Set,
    Touch,
    Submit,
}

/// One row of the command file.
#[derive(Debug, Deserialize)]
struct CommandRecord {
    action: Action,
    method: String,
    field: Option<String>,
    value: Option<String>,
}

impl TryFrom<CommandRecord> for CheckoutCommand {
    type Error = CheckoutError;

    fn try_from(record: CommandRecord) -> Result<Self> {
        let method = PaymentMethodId::from(record.method);
        let action = record.action;
        let needs_field = || {
            CheckoutError::InvalidCommand(format!("{:?} on `{}` needs a field", action, method))
        };
        match action {
            Action::Select => Ok(CheckoutCommand::Select(method)),
            Action::Submit => Ok(CheckoutCommand::Submit(method)),
            Action::Touch => {
                let field = record.field.ok_or_else(needs_field)?;
                Ok(CheckoutCommand::TouchField { method, field })
            }
            Action::Set => {
                let field = record.field.ok_or_else(needs_field)?;
                let value = record.value.unwrap_or_default();
                Ok(CheckoutCommand::SetField {
                    method,
                    field,
                    value,
                })
            }
        }
    }
}

/// Reads checkout commands from a CSV source.
///
/// Columns are `action, method, field, value`; whitespace is trimmed and the
/// trailing columns may be left out for `select` and `submit`.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and parses commands.
    pub fn commands(self) -> impl Iterator<Item = Result<CheckoutCommand>> {
        self.reader.into_deserialize().map(|result| {
            result
                .map_err(CheckoutError::from)
                .and_then(|record: CommandRecord| CheckoutCommand::try_from(record))
        })
    }
}
