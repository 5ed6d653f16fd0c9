pub mod address;
pub mod builder;
pub mod changes;
pub mod error;
pub mod instruction;
pub mod keypair;
pub mod operation;
pub mod rpc;
pub mod simulation;
pub mod skeleton;

// Re-exports to eliminate the need for downstream dependencies to pin the same versions
pub mod re_exports {
    pub use async_trait;
    pub use base64;
    pub use ed25519_dalek;
    pub use eyre;
    pub use tokio;
}
