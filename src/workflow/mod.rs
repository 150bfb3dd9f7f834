pub mod conversion;
pub mod definition;
pub mod handle;

pub use conversion::*;
pub use definition::*;
pub use handle::*;
