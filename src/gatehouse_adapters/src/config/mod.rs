pub mod settings;

pub use settings::{
    AuthSettings, CorsSettings, NotifierSettings, PostgresSettings, RedisSettings, Settings,
    SettingsError,
};
