use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    client::{Shop, Wallet},
    error::{Error, ProviderError},
    types::{Address, Item, ItemDraft, TxHash},
};

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 client for a gateway node fronting both the wallet and the
/// marketplace contract. One instance is one contract binding: the contract
/// address is fixed at construction and threaded into every call.
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    contract: Address,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, contract: Address) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            contract,
            next_id: AtomicU64::new(1),
        }
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, Error> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!(method, "rpc request");
        let response: RpcResponse<T> = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::from)?
            .json()
            .await
            .map_err(ProviderError::from)?;
        if let Some(err) = response.error {
            debug!(method, code = err.code, "rpc error frame");
            return Err(ProviderError::classify(err.code, err.message).into());
        }
        response.result.ok_or(Error::EmptyResponse)
    }
}

#[async_trait]
impl Wallet for RpcClient {
    async fn request_accounts(&self) -> Result<Vec<Address>, Error> {
        self.request("eth_requestAccounts", json!([])).await
    }
}

#[async_trait]
impl Shop for RpcClient {
    fn address(&self) -> Address {
        self.contract
    }

    async fn item_count(&self) -> Result<u64, Error> {
        self.request("shop_itemCount", json!([self.contract])).await
    }

    async fn item(&self, index: u64) -> Result<Item, Error> {
        self.request("shop_items", json!([self.contract, index]))
            .await
    }

    async fn bought_items(&self, owner: Address) -> Result<Vec<u64>, Error> {
        self.request("shop_getBoughtItems", json!([self.contract, owner]))
            .await
    }

    async fn sold_items(&self, owner: Address) -> Result<Vec<u64>, Error> {
        self.request("shop_getSoldItems", json!([self.contract, owner]))
            .await
    }

    async fn add_item(&self, from: Address, draft: &ItemDraft) -> Result<TxHash, Error> {
        self.request("shop_addItem", json!([self.contract, from, draft]))
            .await
    }

    async fn buy_item(&self, from: Address, index: u64, token: Address) -> Result<TxHash, Error> {
        self.request("shop_buyItem", json!([self.contract, from, index, token]))
            .await
    }
}
