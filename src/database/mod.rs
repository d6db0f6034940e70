pub mod store;

pub use store::{PrimaryKeyOf, SeaOrmStore, Store, build_select};
