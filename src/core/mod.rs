// Entity field schemas and the trait that publishes them

pub mod schema;
pub mod traits;

pub use schema::{FieldDef, FieldKind, FieldSource, JoinDef};
pub use traits::Filterable;
