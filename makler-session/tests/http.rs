use std::sync::Arc;

use async_trait::async_trait;
use httpmock::prelude::*;

use makler_core::MaklerError;
use makler_session::{Authenticator, RequestOptions, Session, Transport};

/// Authenticator that logs in against a mock server's `/login` endpoint
/// using the default HTTP transport.
struct SiteAuth {
    base: String,
}

#[async_trait]
impl Authenticator for SiteAuth {
    fn broker(&self) -> &'static str {
        "site"
    }

    async fn login(
        &self,
        transport: &dyn Transport,
        account: &str,
        secret: &str,
    ) -> Result<(), MaklerError> {
        let opts = RequestOptions::new()
            .form("account", account)
            .form("password", secret);
        let resp = transport
            .issue(makler_session::Method::POST, &format!("{}/login", self.base), &opts)
            .await?;
        if !resp.is_success() {
            return Err(MaklerError::login("site", format!("status {}", resp.status)));
        }
        Ok(())
    }
}

#[tokio::test]
async fn issue_sends_standard_headers_on_the_wire() {
    let server = MockServer::start_async().await;
    let login = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/login")
                .form_urlencoded_tuple("account", "123456");
            then.status(200).body("welcome");
        })
        .await;
    let data = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/quote")
                .query_param("symbol", "sh600000")
                .header("x-requested-with", "XMLHttpRequest")
                .header(
                    "user-agent",
                    "Mozilla/5.0 (Windows NT 6.1; WOW64; Trident/7.0; rv:11.0) like Gecko",
                )
                .header("pragma", "no-cache");
            then.status(200).body("var hq_str=\"...\";");
        })
        .await;

    let auth = Arc::new(SiteAuth {
        base: server.base_url(),
    });
    let session = Session::new(auth, "123456", "hunter2");

    let resp = session
        .get(
            &format!("{}/quote", server.base_url()),
            RequestOptions::new().query("symbol", "sh600000"),
        )
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "var hq_str=\"...\";");
    login.assert_async().await;
    data.assert_async().await;
}

#[tokio::test]
async fn non_success_status_surfaces_as_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/login");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/quote");
            then.status(404).body("gone");
        })
        .await;

    let auth = Arc::new(SiteAuth {
        base: server.base_url(),
    });
    let session = Session::new(auth, "123456", "hunter2");

    let err = session
        .get(&format!("{}/quote", server.base_url()), RequestOptions::new())
        .await
        .unwrap_err();
    match err {
        MaklerError::Status { status, .. } => assert_eq!(status, 404),
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_login_status_surfaces_as_a_login_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/login");
            then.status(403).body("denied");
        })
        .await;

    let auth = Arc::new(SiteAuth {
        base: server.base_url(),
    });
    let session = Session::new(auth, "123456", "wrong");

    let err = session
        .get(&format!("{}/quote", server.base_url()), RequestOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, MaklerError::Login { .. }));
}
