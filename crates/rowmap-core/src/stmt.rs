mod ty;
pub use ty::Type;

mod ty_chrono;
mod ty_decimal;

mod value;
pub use value::Value;

mod value_chrono;
mod value_decimal;
