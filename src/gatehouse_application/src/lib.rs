pub mod use_cases;

pub use use_cases::{
    login::{LoginError, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    redeem_reset::{RedeemResetError, RedeemResetUseCase},
    register::{RegisterError, RegisterUseCase},
    request_reset::{RequestResetError, RequestResetUseCase},
};
