pub mod cursor;
pub use cursor::Cursor;

pub mod db;
pub use db::Db;

mod descriptor;
pub use descriptor::{normalize_column_label, TypeDescriptor};

mod model;
pub use model::{FieldRegistry, Model};

pub use rowmap_core::{
    bail, driver, err,
    stmt::{self, Type, Value},
    Error, Result,
};
