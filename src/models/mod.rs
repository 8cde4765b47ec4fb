//! Wire models for workbook resources

pub mod named_item;
pub mod table;

pub use named_item::NamedItem;
pub use table::TableColumn;
