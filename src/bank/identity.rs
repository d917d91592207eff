use crate::error::Missing;
use crate::models::Client;
use crate::stores::ClientStore;
use crate::{BankError, BankResult};

/// Tells who sent a request. Implemented by the authentication layer; the core never looks at
/// credentials itself.
pub trait IdentityResolver {
    type Context: ?Sized;

    fn authenticated_name(&self, context: &Self::Context) -> Option<String>;
}

/// Resolves the requesting client before any service call, and so before any lock is taken
pub fn resolve_requester<R: IdentityResolver>(
    resolver: &R,
    context: &R::Context,
    clients: &dyn ClientStore,
) -> BankResult<Client> {
    let name = resolver
        .authenticated_name(context)
        .ok_or_else(|| BankError::PermissionDenied("request is not authenticated".to_string()))?;

    return clients
        .find_by_name(&name)
        .ok_or(BankError::NotFound(Missing::Client(name)));
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ids::ClientId;
    use crate::stores::InMemoryClientStore;

    struct HeaderIdentity;

    impl IdentityResolver for HeaderIdentity {
        type Context = str;

        fn authenticated_name(&self, context: &str) -> Option<String> {
            context.strip_prefix("Basic ").map(str::to_string)
        }
    }

    #[test]
    fn resolves_requester_by_name() {
        let clients = InMemoryClientStore::new();
        let alice = Client::new(ClientId(1), "alice", "secret", false);
        clients.save(alice.clone());

        assert_eq!(resolve_requester(&HeaderIdentity, "Basic alice", &clients), Ok(alice));
        assert_eq!(
            resolve_requester(&HeaderIdentity, "Basic bob", &clients),
            Err(BankError::NotFound(Missing::Client("bob".to_string())))
        );
        assert!(matches!(
            resolve_requester(&HeaderIdentity, "anonymous", &clients),
            Err(BankError::PermissionDenied(_))
        ));
    }
}
