//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → echo.rs (map request, serialize, X-Error)
//!     → Send to client
//! ```

pub mod echo;
pub mod server;

pub use echo::{echo_handler, X_ERROR};
pub use server::{AppState, EchoServer};
