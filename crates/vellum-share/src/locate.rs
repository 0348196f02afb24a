//! Deterministic store locations.
//!
//! Records a user must find again from names alone live at ids derived from
//! those names. Everything else lives at random ids reachable only through
//! these.

use vellum_core::ObjectId;

/// Where `user`'s encrypted identity record lives.
pub fn identity(user: &str) -> ObjectId {
    ObjectId::derive("identity", &[user])
}

/// Where `owner`'s share list lives.
pub fn share_list(owner: &str) -> ObjectId {
    ObjectId::derive("share-list", &[owner])
}

/// Where `user`'s intermediate for `filename` lives.
pub fn intermediate(user: &str, filename: &str) -> ObjectId {
    ObjectId::derive("intermediate", &[user, filename])
}

/// Where the hub for `owner` sharing `filename` with `recipient` lives.
pub fn share_hub(owner: &str, recipient: &str, filename: &str) -> ObjectId {
    ObjectId::derive("share-hub", &[owner, recipient, filename])
}
