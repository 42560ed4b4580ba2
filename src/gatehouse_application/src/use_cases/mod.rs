pub mod login;
pub mod logout;
pub mod redeem_reset;
pub mod register;
pub mod request_reset;
