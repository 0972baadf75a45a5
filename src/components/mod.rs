pub(crate) mod menu;
pub mod ui;
