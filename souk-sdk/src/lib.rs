pub mod client;
pub mod error;
pub mod rpc;
pub mod session;
pub mod types;

pub mod prelude {
    pub use crate::{
        client::{Shop, Wallet},
        error::{Error, ProviderError},
        rpc::RpcClient,
        session::{Session, Snapshot},
        types::{Address, Item, ItemDraft, TxHash},
    };
}
