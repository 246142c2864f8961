#![allow(dead_code)]

use crypticvalley::application::controller::OrderController;
use crypticvalley::config::NetworkConfig;
use crypticvalley::domain::menu::{MenuCatalog, MenuEntry, MenuItemId};
use crypticvalley::infrastructure::simulated::SimulatedWallet;
use rust_decimal_macros::dec;
use std::io::{Error, Write};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Writes an intent script (`action,value` rows) to a temporary file.
pub fn write_script(rows: &[(&str, &str)]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    {
        let mut wtr = csv::Writer::from_writer(file.as_file_mut());
        wtr.write_record(["action", "value"])?;
        for (action, value) in rows {
            wtr.write_record([*action, *value])?;
        }
        wtr.flush()?;
    }
    file.flush()?;
    Ok(file)
}

pub fn test_catalog() -> Arc<MenuCatalog> {
    Arc::new(
        MenuCatalog::new([
            MenuEntry::new("Gobi Paratha", dec!(0.0001)),
            MenuEntry::new("Aloo Paratha", dec!(0.0020)),
            MenuEntry::new("Muli Paratha", dec!(0.003)),
            MenuEntry::new("Paneer Butter Masala", dec!(0.0100)),
        ])
        .expect("valid catalog"),
    )
}

pub fn controller(wallet: SimulatedWallet) -> OrderController {
    OrderController::new(test_catalog(), Box::new(wallet), NetworkConfig::default())
}

pub fn item_id(controller: &OrderController, name: &str) -> MenuItemId {
    controller
        .catalog()
        .find_by_name(name)
        .expect("item on the menu")
        .id
}
