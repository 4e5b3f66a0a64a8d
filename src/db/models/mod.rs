mod activity;
mod complaint;
mod expense;
mod notice;
mod otp;
mod owner;
mod password_reset;
mod payment;
mod property;
mod room;
mod tenant;
mod user;

pub use activity::*;
pub use complaint::*;
pub use expense::*;
pub use notice::*;
pub use otp::*;
pub use owner::*;
pub use password_reset::*;
pub use payment::*;
pub use property::*;
pub use room::*;
pub use tenant::*;
pub use user::*;
