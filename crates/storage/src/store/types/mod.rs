#![forbid(unsafe_code)]

mod comments;
mod notifications;
mod requests;
mod taxonomy;
mod templates;

pub use comments::*;
pub use notifications::*;
pub use requests::*;
pub use taxonomy::*;
pub use templates::*;
