pub mod document;
pub mod element;
