//! reqwest-backed client for the fund API.

use std::time::Duration;

use async_trait::async_trait;
use fund_domain::{
    CaseConfirmation, CaseDecision, CasePayload, CaseReview, ProfileConfirmation,
    SubmissionPayload,
};
use reqwest::{header::ACCEPT, Client, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{ApiError, ApiResult, AuthContext, FundTransport};

pub const COMPLETE_PROFILE_PATH: &str = "/members/complete-profile";
pub const CASES_PATH: &str = "/cases";
pub const ADMIN_CASES_PATH: &str = "/admin/cases";

/// Fund API client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client with reqwest's default timeout policy.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| ApiError::Transport(format!("failed to build HTTP client: {err}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}/admin/cases/{case_id}/{approve|reject}` with the note as a
    /// query parameter. The case id is percent-encoded as one path segment.
    fn review_url(&self, review: &CaseReview) -> ApiResult<Url> {
        let mut url = Url::parse(&self.endpoint(ADMIN_CASES_PATH))
            .map_err(|err| ApiError::Transport(format!("invalid base URL: {err}")))?;
        let (action, key) = match review.decision {
            CaseDecision::Approve { .. } => ("approve", "notes"),
            CaseDecision::Reject { .. } => ("reject", "reason"),
        };
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("invalid base URL: {}", self.base_url)))?
            .push(&review.case_id)
            .push(action);
        if let Some(note) = review.decision.note() {
            url.query_pairs_mut().append_pair(key, note);
        }
        Ok(url)
    }

    /// Sends one authenticated JSON POST. No retries.
    async fn post_json<B, T>(&self, auth: &AuthContext, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let url = self.endpoint(path);
        debug!(%url, "POST");
        self.send(&url, self.http.post(&url).json(body), auth).await
    }

    async fn send<T>(&self, url: &str, request: RequestBuilder, auth: &AuthContext) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let response = request
            .bearer_auth(auth.token())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let error = ApiError::from_response(status.as_u16(), &text);
            warn!(url, status = status.as_u16(), %error, "request rejected");
            return Err(error);
        }
        Ok(decode_body(&text))
    }
}

/// Decodes a 2xx body. The server has already accepted the request, so an
/// empty or unreadable body yields `T::default()` instead of an error.
fn decode_body<T: DeserializeOwned + Default>(text: &str) -> T {
    if text.trim().is_empty() {
        return T::default();
    }
    serde_json::from_str(text).unwrap_or_else(|err| {
        warn!(%err, "accepted response has an unreadable body");
        T::default()
    })
}

#[async_trait]
impl FundTransport for ApiClient {
    async fn complete_profile(
        &self,
        auth: &AuthContext,
        payload: &SubmissionPayload,
    ) -> ApiResult<ProfileConfirmation> {
        self.post_json(auth, COMPLETE_PROFILE_PATH, payload).await
    }

    async fn submit_case(
        &self,
        auth: &AuthContext,
        payload: &CasePayload,
    ) -> ApiResult<CaseConfirmation> {
        self.post_json(auth, CASES_PATH, payload).await
    }

    async fn review_case(
        &self,
        auth: &AuthContext,
        review: &CaseReview,
    ) -> ApiResult<CaseConfirmation> {
        let url = self.review_url(review)?;
        debug!(%url, "PATCH");
        self.send(url.as_str(), self.http.patch(url.clone()), auth).await
    }
}
