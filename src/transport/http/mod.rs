pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod global;
    pub mod health;
    pub mod progress;
    pub mod user;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
