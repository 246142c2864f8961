//! CSV adapters: menu and intent-script readers, order snapshot writer.

pub mod intent_reader;
pub mod menu_reader;
pub mod order_writer;
