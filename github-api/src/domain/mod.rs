mod issue;
mod label;
mod repository;
mod search;
mod user;

pub use issue::*;
pub use label::*;
pub use repository::*;
pub use search::*;
pub use user::*;
