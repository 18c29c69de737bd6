//! Splitwise API client
//!
//! Authenticates once at construction (cached token or a fresh
//! client-credentials grant) and then exposes the REST operations as typed
//! calls.

use log::{error, info};
use serde_json::Value;

use super::transport::Transport;
use crate::config::{ClientCredentials, Settings};
use crate::error::{SplitrError, SplitrResult};
use crate::models::{
    CreateExpenseResponse, CurrentUserResponse, ExpenseRequest, ExpensesResponse, Token,
};
use crate::storage::TokenStore;

/// Which expenses `get_expenses` should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseScope {
    Group(u64),
    Friend(u64),
}

impl ExpenseScope {
    fn query(&self) -> (&'static str, String) {
        match self {
            ExpenseScope::Group(id) => ("group_id", id.to_string()),
            ExpenseScope::Friend(id) => ("friend_id", id.to_string()),
        }
    }
}

/// Authenticated client for the Splitwise v3.0 API
pub struct SplitwiseClient<T: Transport> {
    transport: T,
    token: Token,
    settings: Settings,
}

impl<T: Transport> SplitwiseClient<T> {
    /// Authenticate and build a client
    ///
    /// A token found in `store` is used as-is. Otherwise a client-credentials
    /// grant is performed and the result saved to `store`.
    ///
    /// # Errors
    ///
    /// Any failure of the grant is returned as [`SplitrError::Authentication`].
    pub fn connect(
        settings: &Settings,
        credentials: &ClientCredentials,
        store: &dyn TokenStore,
        transport: T,
    ) -> SplitrResult<Self> {
        let token = match store.load()?.filter(Token::is_usable) {
            Some(token) => token,
            None => {
                let token = authenticate(&transport, &settings.token_url, credentials)?;
                store.save(&token)?;
                token
            }
        };

        Ok(Self::with_token(settings, token, transport))
    }

    /// Build a client around an already-obtained token
    pub fn with_token(settings: &Settings, token: Token, transport: T) -> Self {
        Self {
            transport,
            token,
            settings: settings.clone(),
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get information about the authenticated user
    pub fn get_current_user(&self) -> SplitrResult<CurrentUserResponse> {
        let url = self.settings.endpoint("get_current_user");
        let body = self.transport.get(&url, &self.token, &[])?;
        Ok(serde_json::from_value(body)?)
    }

    /// List expenses for a group or a friend
    pub fn get_expenses(&self, scope: ExpenseScope) -> SplitrResult<ExpensesResponse> {
        let url = self.settings.endpoint("get_expenses");
        let body = self.transport.get(&url, &self.token, &[scope.query()])?;
        Ok(serde_json::from_value(body)?)
    }

    pub fn get_expenses_by_group_id(&self, group_id: u64) -> SplitrResult<ExpensesResponse> {
        self.get_expenses(ExpenseScope::Group(group_id))
    }

    pub fn get_expenses_by_friend_id(&self, friend_id: u64) -> SplitrResult<ExpensesResponse> {
        self.get_expenses(ExpenseScope::Friend(friend_id))
    }

    /// Create an expense
    ///
    /// The returned body must be checked with
    /// [`ApiResponse::error_messages`](crate::models::ApiResponse::error_messages):
    /// the API rejects expenses inside successful HTTP responses.
    pub fn create_expense(&self, request: &ExpenseRequest) -> SplitrResult<CreateExpenseResponse> {
        let payload = Value::Object(request.to_payload()?);

        info!("Creating an expense with Splitwise");
        let url = self.settings.endpoint("create_expense");
        let body = self.transport.post_json(&url, &self.token, &payload)?;
        Ok(serde_json::from_value(body)?)
    }
}

fn authenticate<T: Transport>(
    transport: &T,
    token_url: &str,
    credentials: &ClientCredentials,
) -> SplitrResult<Token> {
    info!("Authenticating with Splitwise");

    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", credentials.client_id()),
        ("client_secret", credentials.client_secret()),
        ("scope", ""),
    ];

    let token = transport
        .request_token(token_url, &form)
        .map_err(|e| {
            error!("Failed to authenticate: {}", e);
            match e {
                SplitrError::Authentication { .. } => e,
                other => SplitrError::Authentication {
                    message: other.to_string(),
                    status_code: None,
                },
            }
        })?;

    if !token.is_usable() {
        error!("Failed to authenticate: token endpoint returned an empty access token");
        return Err(SplitrError::authentication(
            "token endpoint returned an empty access token",
        ));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{Call, FakeTransport, TokenBehavior};
    use crate::models::{ApiResponse, Money, ParticipantShare};
    use crate::storage::MemoryTokenStore;
    use serde_json::json;

    fn credentials() -> ClientCredentials {
        ClientCredentials::new("my-id", "my-secret")
    }

    fn connected(transport: FakeTransport) -> SplitwiseClient<FakeTransport> {
        let store = MemoryTokenStore::with_token(Token::bearer("cached"));
        SplitwiseClient::connect(&Settings::default(), &credentials(), &store, transport).unwrap()
    }

    #[test]
    fn test_fresh_grant_is_cached() {
        let store = MemoryTokenStore::new();
        let client = SplitwiseClient::connect(
            &Settings::default(),
            &credentials(),
            &store,
            FakeTransport::granting("fresh"),
        )
        .unwrap();

        assert_eq!(client.transport().token_requests(), 1);
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.token().unwrap().access_token, "fresh");
        assert_eq!(client.token().access_token, "fresh");

        let form = client.transport().last_token_form();
        assert!(form.contains(&("grant_type".into(), "client_credentials".into())));
        assert!(form.contains(&("client_id".into(), "my-id".into())));
        assert!(form.contains(&("client_secret".into(), "my-secret".into())));
        assert!(form.contains(&("scope".into(), "".into())));
    }

    #[test]
    fn test_cached_token_skips_grant() {
        let store = MemoryTokenStore::new();
        let first = SplitwiseClient::connect(
            &Settings::default(),
            &credentials(),
            &store,
            FakeTransport::granting("fresh"),
        )
        .unwrap();
        assert_eq!(first.transport().token_requests(), 1);

        let second = SplitwiseClient::connect(
            &Settings::default(),
            &credentials(),
            &store,
            FakeTransport::granting("other"),
        )
        .unwrap();
        assert_eq!(second.transport().token_requests(), 0);
        assert_eq!(second.token().access_token, "fresh");
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_empty_cached_token_triggers_grant() {
        let store = MemoryTokenStore::with_token(Token::bearer(""));
        let client = SplitwiseClient::connect(
            &Settings::default(),
            &credentials(),
            &store,
            FakeTransport::granting("fresh"),
        )
        .unwrap();
        assert_eq!(client.transport().token_requests(), 1);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_rejected_grant_is_authentication_error() {
        let store = MemoryTokenStore::new();
        let transport = FakeTransport::new(TokenBehavior::Reject {
            status: 401,
            body: "invalid_client".into(),
        });

        let err = SplitwiseClient::connect(&Settings::default(), &credentials(), &store, transport)
            .err()
            .unwrap();

        assert!(err.is_authentication());
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_unreachable_token_endpoint_is_authentication_error() {
        let store = MemoryTokenStore::new();
        let transport = FakeTransport::new(TokenBehavior::Unreachable);

        let err = SplitwiseClient::connect(&Settings::default(), &credentials(), &store, transport)
            .err()
            .unwrap();

        assert!(err.is_authentication());
        assert_eq!(err.status_code(), None);
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_empty_granted_token_rejected() {
        let store = MemoryTokenStore::new();
        let transport = FakeTransport::new(TokenBehavior::Grant(Token::bearer("")));

        let err = SplitwiseClient::connect(&Settings::default(), &credentials(), &store, transport)
            .err()
            .unwrap();
        assert!(err.is_authentication());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_get_current_user() {
        let client = connected(
            FakeTransport::granting("unused")
                .respond_with(json!({"user": {"id": 13065056, "first_name": "Shawn"}})),
        );

        let response = client.get_current_user().unwrap();
        assert_eq!(response.user.unwrap().id, 13065056);
        assert_eq!(
            client.transport().calls(),
            vec![Call::Get {
                url: "https://secure.splitwise.com/api/v3.0/get_current_user".into(),
                query: vec![],
            }]
        );
    }

    #[test]
    fn test_get_expenses_scopes() {
        let client = connected(FakeTransport::granting("unused"));

        client.get_expenses_by_group_id(12345).unwrap();
        client.get_expenses_by_friend_id(678).unwrap();

        let calls = client.transport().calls();
        assert_eq!(
            calls[0],
            Call::Get {
                url: "https://secure.splitwise.com/api/v3.0/get_expenses".into(),
                query: vec![("group_id".into(), "12345".into())],
            }
        );
        assert_eq!(
            calls[1],
            Call::Get {
                url: "https://secure.splitwise.com/api/v3.0/get_expenses".into(),
                query: vec![("friend_id".into(), "678".into())],
            }
        );
    }

    #[test]
    fn test_create_expense_posts_flat_payload() {
        let client = connected(FakeTransport::granting("unused").respond_with(json!({
            "expenses": [{"id": 1, "description": "Pizza", "cost": "50.0"}],
            "errors": {}
        })));

        let request = ExpenseRequest::new(0, "Pizza", Money::from_cents(5000))
            .with_user(ParticipantShare::new(
                13065056,
                Money::from_cents(2500),
                Money::from_cents(5000),
            ))
            .with_user(ParticipantShare::new(
                13065035,
                Money::from_cents(2500),
                Money::zero(),
            ));

        let response = client.create_expense(&request).unwrap();
        assert!(response.is_success());

        let bodies = client.transport().posted_bodies();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["users__0__user_id"], json!(13065056));
        assert_eq!(bodies[0]["users__1__owed_share"], json!("25.00"));
    }

    #[test]
    fn test_create_expense_surfaces_in_band_errors() {
        let client = connected(FakeTransport::granting("unused").respond_with(json!({
            "expenses": [],
            "errors": {"base": ["Cost must be a number"]}
        })));

        let request = ExpenseRequest::new(0, "Bad", Money::from_cents(100)).with_user(
            ParticipantShare::new(1, Money::from_cents(100), Money::from_cents(100)),
        );

        let response = client.create_expense(&request).unwrap();
        assert_eq!(response.error_messages(), vec!["Cost must be a number".to_string()]);
    }

    #[test]
    fn test_create_expense_without_users_sends_nothing() {
        let client = connected(FakeTransport::granting("unused"));
        let request = ExpenseRequest::new(0, "Nobody", Money::from_cents(100));

        assert!(matches!(
            client.create_expense(&request),
            Err(SplitrError::Validation(_))
        ));
        assert!(client.transport().calls().is_empty());
    }
}
