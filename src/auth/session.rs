//! Authenticated sessions.
//!
//! The dispatcher only reads two things from its authentication collaborator:
//! the access token and the shop it belongs to. [`AuthContext`] names that
//! capability and [`Session`] is the stock implementation. How the token was
//! obtained is not this crate's concern.

use crate::auth::AuthScopes;
use crate::config::{AccessToken, ShopDomain};
use chrono::{DateTime, Utc};

/// Read-only authentication capability consumed by the dispatcher.
pub trait AuthContext: Send + Sync {
    /// The Admin API access token.
    fn access_token(&self) -> &AccessToken;

    /// The shop the token grants access to.
    fn shop(&self) -> &ShopDomain;

    /// Returns `false` when calls must not be attempted with this context.
    fn is_active(&self) -> bool {
        true
    }
}

/// An authenticated session for one shop.
///
/// # Example
///
/// ```rust
/// use shopify_endpoints::{AccessToken, AuthContext, Session, ShopDomain};
///
/// let session = Session::new(
///     ShopDomain::new("my-store").unwrap(),
///     AccessToken::new("shpat_123").unwrap(),
///     "read_products".parse().unwrap(),
///     None,
/// );
///
/// assert!(session.is_active());
/// assert_eq!(session.shop().as_ref(), "my-store.myshopify.com");
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    /// The shop this session is for.
    pub shop: ShopDomain,

    /// The access token for API authentication.
    pub access_token: AccessToken,

    /// The OAuth scopes granted to this session.
    pub scopes: AuthScopes,

    /// When this session expires, if applicable.
    pub expires: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a new session.
    #[must_use]
    pub const fn new(
        shop: ShopDomain,
        access_token: AccessToken,
        scopes: AuthScopes,
        expires: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            shop,
            access_token,
            scopes,
            expires,
        }
    }

    /// Returns `true` if this session has expired.
    ///
    /// Sessions without an expiration time never expire.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires.is_some_and(|expires| Utc::now() > expires)
    }
}

impl AuthContext for Session {
    fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    fn is_active(&self) -> bool {
        !self.expired()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};
