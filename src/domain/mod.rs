//! Domain model of the ordering page: menu, order, money and payment types,
//! plus the port to the external wallet.

pub mod menu;
pub mod money;
pub mod order;
pub mod payment;
pub mod ports;
pub mod tip;
