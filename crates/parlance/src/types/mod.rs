mod number;
mod value;

pub use number::{NumberOptions, NumberValue};
pub use value::{Args, Value};
