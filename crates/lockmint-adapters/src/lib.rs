pub mod abi;
pub mod chain;
pub mod clock;
pub mod config;
pub mod hero;
pub mod lock_pool;
pub mod lp_token;

pub use chain::ChainClient;
pub use clock::SystemClockAdapter;
pub use config::StakeConfig;
pub use hero::HeroNftClient;
pub use lock_pool::LockPoolClient;
pub use lp_token::LpTokenClient;
