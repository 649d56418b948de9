pub mod about;
pub mod chat;

pub use about::AboutView;
pub use chat::ChatView;
