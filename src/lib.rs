pub mod chat;
pub mod history;
pub mod render;
pub mod storage;
pub mod theme;
pub mod types;
pub mod ui;
pub mod views;
