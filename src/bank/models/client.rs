use crate::ids::{AccountId, ClientId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    /// Opaque to the core, verified by the authentication layer
    pub credential: String,
    pub admin: bool,
    pub checking_account: Option<AccountId>,
}

impl Client {
    pub fn new(id: ClientId, name: impl Into<String>, credential: impl Into<String>, admin: bool) -> Self {
        return Self {
            id,
            name: name.into(),
            credential: credential.into(),
            admin,
            checking_account: None,
        };
    }
}
