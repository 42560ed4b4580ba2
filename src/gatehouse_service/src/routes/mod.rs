pub mod error;
pub mod forgot_password;
pub mod health;
pub mod login;
pub mod logout;
pub mod register;
pub mod reset_password;

pub use error::ApiError;
pub use forgot_password::{ForgotPasswordRequest, forgot_password};
pub use health::health;
pub use login::{LoginRequest, SessionResponse, login};
pub use logout::logout;
pub use register::{RegisterRequest, register};
pub use reset_password::{ResetPasswordRequest, reset_password};
