pub mod auth;
pub mod movies;
pub mod reviews;
pub mod routes;
pub mod session;
pub mod state;
pub mod stats;
pub mod watchlist;

pub use routes::create_router;
pub use session::CurrentUser;
pub use state::AppState;
