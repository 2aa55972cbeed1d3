pub mod canvas;
pub mod history;
pub mod phrases;
pub mod remote;
pub mod resolver;
pub mod store;
