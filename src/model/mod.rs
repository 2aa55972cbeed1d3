pub mod history;
pub mod language;
pub mod pen;
pub mod text;
