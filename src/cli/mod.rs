pub mod predict;
pub mod ui;
