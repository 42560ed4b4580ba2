use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use gatehouse_core::{Identity, Notifier, NotifyError};

/// Delivers reset tokens by email through a Postmark-compatible HTTP API.
#[derive(Clone)]
pub struct PostmarkNotifier {
    http_client: Client,
    base_url: String,
    sender: Identity,
    authorization_token: Secret<String>,
}

impl PostmarkNotifier {
    pub fn new(
        base_url: String,
        sender: Identity,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for PostmarkNotifier {
    #[tracing::instrument(name = "Sending reset email", skip_all)]
    async fn send_reset_token(
        &self,
        recipient: &Identity,
        token: &str,
    ) -> Result<(), NotifyError> {
        let base = Url::parse(&self.base_url).map_err(|e| NotifyError::Delivery(e.to_string()))?;
        let url = base
            .join("/email")
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let text_body = format!("Use this token to reset your password: {token}");
        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject: RESET_SUBJECT,
            text_body: &text_body,
            message_stream: MESSAGE_STREAM,
        };

        let request = self
            .http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?
            .error_for_status()
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        Ok(())
    }
}

const RESET_SUBJECT: &str = "Password reset";
const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn identity(raw: &str) -> Identity {
        Identity::try_from(Secret::from(raw.to_owned())).unwrap()
    }

    fn notifier(base_url: String) -> PostmarkNotifier {
        PostmarkNotifier::new(
            base_url,
            identity("no-reply@example.com"),
            Secret::from("server-token".to_owned()),
            Client::new(),
        )
    }

    #[tokio::test]
    async fn test_sends_one_authenticated_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/email"))
            .and(header_exists(POSTMARK_AUTH_HEADER))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        notifier(server.uri())
            .send_reset_token(&identity("alice@example.com"), "signed-reset-token")
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8(requests[0].body.clone()).unwrap();
        assert!(body.contains("alice@example.com"));
        assert!(body.contains("signed-reset-token"));
    }

    #[tokio::test]
    async fn test_server_error_surfaces_as_delivery_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/email"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = notifier(server.uri())
            .send_reset_token(&identity("alice@example.com"), "signed-reset-token")
            .await;

        assert!(matches!(result, Err(NotifyError::Delivery(_))));
    }
}
