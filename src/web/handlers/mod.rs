pub mod analysis_handlers;
pub mod page_handlers;
pub mod system_handlers;

pub use analysis_handlers::*;
pub use page_handlers::*;
pub use system_handlers::*;
