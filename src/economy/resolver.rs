//! The `Resolver` answers a stream of placeholder requests with a shared balance formatter.
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::economy::{AccountId, BalanceFormatter, Economy};

/// A placeholder lookup for an account.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Request {
    /// The account the placeholder is resolved for, absent for anonymous lookups.
    #[serde(default, deserialize_with = "deserialize_account")]
    account: Option<AccountId>,

    /// The placeholder directive, e.g. `balance_commas`.
    placeholder: String,
}

/// Treats an empty account cell as an absent account.
fn deserialize_account<'de, D>(deserializer: D) -> Result<Option<AccountId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<AccountId> = Option::deserialize(deserializer)?;
    Ok(value.filter(|account| !account.is_empty()))
}

impl Request {
    /// Creates a request for the given account and placeholder.
    #[cfg(test)]
    pub fn new(account: Option<AccountId>, placeholder: impl Into<String>) -> Self {
        Request {
            account,
            placeholder: placeholder.into(),
        }
    }
}

/// The answer to a [`Request`].
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Response {
    /// The account the placeholder was resolved for.
    account: Option<AccountId>,

    /// The placeholder as requested.
    placeholder: String,

    /// Whether the placeholder is a balance placeholder at all.
    matched: bool,

    /// The rendered value, empty when unmatched.
    value: String,
}

impl Response {
    /// Gets the rendered value, or `None` if the placeholder was not matched.
    #[cfg(test)]
    pub fn value(&self) -> Option<&str> {
        self.matched.then_some(self.value.as_str())
    }
}

/// Resolves requests received over a channel, keeping the responses in arrival order.
pub struct Resolver<E> {
    /// The formatter shared with anyone else resolving placeholders.
    formatter: Arc<BalanceFormatter<E>>,
    /// A channel receiver for incoming requests.
    receiver: mpsc::Receiver<Request>,
    /// Responses produced so far.
    responses: Vec<Response>,
}

impl<E: Economy> Resolver<E> {
    /// Creates a resolver answering requests with the given formatter.
    pub fn new(formatter: Arc<BalanceFormatter<E>>, receiver: mpsc::Receiver<Request>) -> Self {
        Resolver {
            formatter,
            receiver,
            responses: Vec::new(),
        }
    }

    /// Retrieves all responses produced so far.
    pub fn get_responses(&self) -> &[Response] {
        &self.responses
    }

    /// Resolves a single request.
    fn resolve(&self, request: Request) -> Response {
        let value = self
            .formatter
            .on_request(request.account.as_ref(), &request.placeholder);
        Response {
            account: request.account,
            placeholder: request.placeholder,
            matched: value.is_some(),
            value: value.unwrap_or_default(),
        }
    }

    /// Runs the resolver loop until the sending side of the channel is closed.
    pub async fn run(&mut self) {
        while let Some(request) = self.receiver.recv().await {
            let response = self.resolve(request);
            if !response.matched {
                log::warn!("No balance placeholder named {}", response.placeholder);
            }
            self.responses.push(response);
        }
        log::info!("Resolved {} placeholders", self.responses.len());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use csv::{ReaderBuilder, Trim};

    use super::{Request, Resolver, Response};
    use crate::economy::{BalanceFormatter, Ledger};

    fn formatter() -> Arc<BalanceFormatter<Ledger>> {
        let mut ledger = Ledger::new(2);
        ledger.set_balance("alice", 1234567.891);
        Arc::new(BalanceFormatter::new(ledger))
    }

    #[tokio::test]
    async fn test_resolve_requests() {
        let (sender, receiver) = tokio::sync::mpsc::channel(100);
        let mut resolver = Resolver::new(formatter(), receiver);
        assert!(resolver.get_responses().is_empty());
        for placeholder in ["balance", "balance_commas", "balance_formatted", "balance_oops"] {
            sender
                .send(Request::new(Some("alice".to_string()), placeholder))
                .await
                .unwrap();
        }
        sender.send(Request::new(None, "balance")).await.unwrap();
        drop(sender); // Close the sender to signal no more requests will be sent
        resolver.run().await;

        let values = resolver
            .get_responses()
            .iter()
            .map(|response| response.value())
            .collect::<Vec<_>>();
        assert_eq!(
            values,
            vec![
                Some("1234567.89"),
                Some("1,234,568"),
                Some("1.2M"),
                None,
                Some(""),
            ]
        );
    }

    #[tokio::test]
    async fn test_shared_formatter() {
        let formatter = formatter();
        let (sender, receiver) = tokio::sync::mpsc::channel(10);
        let mut resolver = Resolver::new(Arc::clone(&formatter), receiver);
        sender
            .send(Request::new(Some("alice".to_string()), "balance_1dp"))
            .await
            .unwrap();
        drop(sender);
        resolver.run().await;
        assert_eq!(resolver.get_responses()[0].value(), Some("1234567.9"));
        assert_eq!(formatter.precisions().len(), 1);
    }

    #[test]
    fn test_empty_account_is_absent() {
        let data = "account,placeholder\n,balance\nbob , balance_fixed\n";
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(data.as_bytes());
        let requests = reader
            .deserialize::<Request>()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(
            requests,
            vec![
                Request::new(None, "balance"),
                Request::new(Some("bob".to_string()), "balance_fixed"),
            ]
        );
    }

    #[test]
    fn test_response_columns() {
        let response = Response {
            account: Some("alice".to_string()),
            placeholder: "balance_oops".to_string(),
            matched: false,
            value: String::new(),
        };
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&response).unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(output, "account,placeholder,matched,value\nalice,balance_oops,false,\n");
    }
}
