use async_trait::async_trait;

use crate::{
    error::Error,
    types::{Address, Item, ItemDraft, TxHash},
};

/// The wallet side of the provider: authorizes access to the user's
/// accounts. The first address returned is treated as the active account.
#[async_trait]
pub trait Wallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, Error>;
}

/// Binding to the deployed marketplace contract. Reads are free queries;
/// `add_item` and `buy_item` are sender-paid writes. All state lives behind
/// this trait; the client only ever holds snapshots of it.
#[async_trait]
pub trait Shop {
    /// The bound contract's own network address.
    fn address(&self) -> Address;

    async fn item_count(&self) -> Result<u64, Error>;
    async fn item(&self, index: u64) -> Result<Item, Error>;
    async fn bought_items(&self, owner: Address) -> Result<Vec<u64>, Error>;
    async fn sold_items(&self, owner: Address) -> Result<Vec<u64>, Error>;
    async fn add_item(&self, from: Address, draft: &ItemDraft) -> Result<TxHash, Error>;
    async fn buy_item(&self, from: Address, index: u64, token: Address) -> Result<TxHash, Error>;
}
