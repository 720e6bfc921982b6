use async_trait::async_trait;
use fund_domain::{
    CaseConfirmation, CasePayload, CaseReview, ProfileConfirmation, SubmissionPayload,
};

use crate::{ApiResult, AuthContext};

/// Submission endpoints of the fund API.
///
/// Implemented by [`crate::ApiClient`]; sessions depend on the trait so they
/// can run against any transport.
#[async_trait]
pub trait FundTransport: Send + Sync {
    async fn complete_profile(
        &self,
        auth: &AuthContext,
        payload: &SubmissionPayload,
    ) -> ApiResult<ProfileConfirmation>;

    async fn submit_case(
        &self,
        auth: &AuthContext,
        payload: &CasePayload,
    ) -> ApiResult<CaseConfirmation>;

    /// Records an approve or reject decision and returns the updated case.
    async fn review_case(
        &self,
        auth: &AuthContext,
        review: &CaseReview,
    ) -> ApiResult<CaseConfirmation>;
}
