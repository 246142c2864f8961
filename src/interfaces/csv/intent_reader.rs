use crate::domain::order::LineId;
use crate::domain::tip::TipSelection;
use crate::error::{OrderError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum IntentKind {
    Connect,
    Add,
    Remove,
    Tip,
    Pay,
}

#[derive(Debug, Deserialize)]
struct IntentRecord {
    action: IntentKind,
    value: Option<String>,
}

/// A user action forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ConnectWallet,
    /// Select a menu item by its display name.
    AddItem(String),
    RemoveLine(LineId),
    SetTip(TipSelection),
    Pay,
}

impl TryFrom<IntentRecord> for Intent {
    type Error = OrderError;

    fn try_from(record: IntentRecord) -> Result<Self> {
        let value = record.value.filter(|v| !v.is_empty());
        match (record.action, value) {
            (IntentKind::Connect, _) => Ok(Intent::ConnectWallet),
            (IntentKind::Pay, _) => Ok(Intent::Pay),
            (IntentKind::Add, Some(name)) => Ok(Intent::AddItem(name)),
            (IntentKind::Remove, Some(line)) => line
                .parse()
                .map(Intent::RemoveLine)
                .map_err(|_| OrderError::InvalidIntent(format!("'{line}' is not a line id"))),
            (IntentKind::Tip, Some(tip)) => tip.parse().map(Intent::SetTip),
            (action, None) => Err(OrderError::InvalidIntent(format!(
                "{action:?} requires a value"
            ))),
        }
    }
}

/// Reads a script of user intents from a CSV source with an `action,value`
/// header.
pub struct IntentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> IntentReader<R> {
    /// Creates a new `IntentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and validates intents.
    pub fn intents(self) -> impl Iterator<Item = Result<Intent>> {
        self.reader
            .into_deserialize::<IntentRecord>()
            .map(|result| result.map_err(OrderError::from).and_then(Intent::try_from))
    }
}
