mod activity_repository;
mod complaint_repository;
mod expense_repository;
mod notice_repository;
mod otp_repository;
mod owner_repository;
mod password_reset_repository;
mod payment_repository;
mod property_repository;
mod room_repository;
mod tenant_repository;
mod user_repository;

pub use activity_repository::*;
pub use complaint_repository::*;
pub use expense_repository::*;
pub use notice_repository::*;
pub use otp_repository::*;
pub use owner_repository::*;
pub use password_reset_repository::*;
pub use payment_repository::*;
pub use property_repository::*;
pub use room_repository::*;
pub use tenant_repository::*;
pub use user_repository::*;
