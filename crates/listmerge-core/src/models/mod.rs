pub mod campaign;
pub mod criteria;
pub mod field;
pub mod record;
pub mod status;
pub mod tag;

pub use campaign::*;
pub use criteria::*;
pub use field::*;
pub use record::*;
pub use status::*;
pub use tag::*;
