//! Domain layer

pub mod catalog;
pub mod date_window;
pub mod money;
pub mod sale_record;

pub use catalog::Catalog;
pub use date_window::DateWindow;
pub use money::Money;
pub use sale_record::SaleRecord;
