pub mod driver;
pub mod libxml2;
pub mod sink;
pub mod utils;
pub mod validator;

pub use driver::{validate_file, validate_patterns};
pub use sink::{ErrorPrinter, ErrorSink};
pub use validator::Validator;
