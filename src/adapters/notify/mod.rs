//! Notification transports
//!
//! - [`traits`] - Transport abstraction used by [`crate::core::notify::Notifier`]
//! - [`sns`] - Amazon SNS implementation

pub mod sns;
pub mod traits;

pub use sns::SnsTransport;
pub use traits::NotificationTransport;
