use ethers::types::{H160, H256};
use serde::{Deserialize, Serialize};

pub type Address = H160;
pub type TxHash = H256;

/// A single listing as the contract reports it. An item has no identifier of
/// its own; its identity is its index in the contract's ordered sequence.
/// Field names follow the contract ABI on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub description: String,
    pub location: String,
    pub price: u64,
    pub sold: bool,
}

/// The five add-form fields, passed to the contract verbatim. What the
/// contract ends up storing is authoritative, not this draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub description: String,
    pub location: String,
    pub price: u64,
}
