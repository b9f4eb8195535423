//
//  abuseipdb-client
//  api/factory.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Client reuse policy.
//!
//! [`ClientFactory`] keeps at most one [`AbuseIpDbClient`] alive and hands out
//! shared handles to it. It is an ordinary value owned by whoever composes the
//! application (the CLI dispatcher, a daemon's startup code); there is no
//! hidden global.
//!
//! | Cached client | Requested key | `replace_on_key_change` | Result |
//! |---------------|---------------|-------------------------|--------|
//! | none | any | any | new client |
//! | key A | A | any | same client |
//! | key A | B | `true` | new client for B, A dropped by the factory |
//! | key A | B | `false` | `Err(ApiError::KeyMismatch)` |

use std::sync::Arc;

use tracing::debug;

use super::client::{AbuseIpDbClient, ClientOptions};
use super::common::ApiError;

/// Owns the single active client, keyed by API key.
#[derive(Debug, Default)]
pub struct ClientFactory {
    options: ClientOptions,
    instance: Option<Arc<AbuseIpDbClient>>,
}

impl ClientFactory {
    /// Creates an empty factory; clients are built with `options`.
    pub fn new(options: ClientOptions) -> Self {
        Self {
            options,
            instance: None,
        }
    }

    /// Returns the client for `api_key`, constructing or replacing it as needed.
    ///
    /// Handles returned earlier stay valid after a replacement; they simply
    /// keep pointing at the old client.
    ///
    /// # Errors
    ///
    /// - [`ApiError::KeyMismatch`] if a client for another key exists and
    ///   `replace_on_key_change` is `false`
    /// - [`ApiError::ClientBuild`] if a new client cannot be constructed
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use abuseipdb_client::api::{ClientFactory, ClientOptions};
    ///
    /// let mut factory = ClientFactory::new(ClientOptions::default());
    /// let first = factory.get_instance("key-a", false)?;
    /// let again = factory.get_instance("key-a", false)?;
    /// assert!(Arc::ptr_eq(&first, &again));
    ///
    /// assert!(factory.get_instance("key-b", false).is_err());
    /// let replaced = factory.get_instance("key-b", true)?;
    /// assert_eq!(replaced.api_key(), "key-b");
    /// # Ok::<(), abuseipdb_client::api::ApiError>(())
    /// ```
    pub fn get_instance(
        &mut self,
        api_key: &str,
        replace_on_key_change: bool,
    ) -> Result<Arc<AbuseIpDbClient>, ApiError> {
        match &self.instance {
            Some(client) if client.api_key() == api_key => return Ok(Arc::clone(client)),
            Some(_) if !replace_on_key_change => return Err(ApiError::KeyMismatch),
            Some(_) => debug!("API key changed; replacing client"),
            None => debug!("Creating API client"),
        }

        let client = Arc::new(AbuseIpDbClient::with_options(api_key, self.options.clone())?);
        self.instance = Some(Arc::clone(&client));
        Ok(client)
    }

    /// The cached client, if one has been created.
    pub fn current(&self) -> Option<&Arc<AbuseIpDbClient>> {
        self.instance.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_returns_same_instance() {
        let mut factory = ClientFactory::default();
        let a = factory.get_instance("key", false).unwrap();
        let b = factory.get_instance("key", false).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_key_mismatch_without_replacement() {
        let mut factory = ClientFactory::default();
        let original = factory.get_instance("key-a", false).unwrap();

        let err = factory.get_instance("key-b", false).unwrap_err();
        assert!(matches!(err, ApiError::KeyMismatch));

        // The cached client is untouched.
        let current = factory.current().unwrap();
        assert!(Arc::ptr_eq(current, &original));
    }

    #[test]
    fn test_key_change_with_replacement() {
        let mut factory = ClientFactory::default();
        let original = factory.get_instance("key-a", false).unwrap();
        let replaced = factory.get_instance("key-b", true).unwrap();

        assert!(!Arc::ptr_eq(&original, &replaced));
        assert_eq!(replaced.api_key(), "key-b");
        assert_eq!(original.api_key(), "key-a");
        assert!(Arc::ptr_eq(factory.current().unwrap(), &replaced));
    }

    #[test]
    fn test_options_are_applied() {
        let mut factory = ClientFactory::new(ClientOptions {
            base_url: "http://localhost:8080/api/v2/".to_string(),
            ..ClientOptions::default()
        });
        let client = factory.get_instance("key", false).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v2");
    }
}
