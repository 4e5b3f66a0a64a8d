mod mailer;
mod receipt;

pub use mailer::*;
pub use receipt::*;
