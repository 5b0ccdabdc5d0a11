//! # Reorder Cache
//!
//! 推算結果記憶化與補貨作業階段

pub mod memo;
pub mod session;

// Re-export 主要類型
pub use memo::{ProjectionCache, ProjectionKey};
pub use session::ReorderSession;
