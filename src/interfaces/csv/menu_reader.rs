use crate::domain::menu::{MenuCatalog, MenuEntry};
use crate::error::{OrderError, Result};
use std::io::Read;

/// Reads menu entries from a CSV source with a `name,price` header.
pub struct MenuReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> MenuReader<R> {
    /// Creates a new `MenuReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily deserializes menu entries.
    pub fn entries(self) -> impl Iterator<Item = Result<MenuEntry>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(OrderError::from))
    }

    /// Reads every entry and validates them into a catalog.
    pub fn into_catalog(self) -> Result<MenuCatalog> {
        let entries = self.entries().collect::<Result<Vec<_>>>()?;
        MenuCatalog::new(entries)
    }
}
