use async_trait::async_trait;

use crate::api::{ApiClient, ApiResult};
use crate::models::{EnrollmentRequest, Team};

/// Source of team rosters for `ParticipantReconciler::select_team`.
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    async fn fetch_team(&self, team_id: i64) -> ApiResult<Team>;
}

/// Sink for enrollment batches produced by `ParticipantReconciler::submit`.
#[async_trait]
pub trait EnrollmentGateway: Send + Sync {
    async fn submit_participants(&self, event_id: i64, request: &EnrollmentRequest) -> ApiResult<()>;
}

#[async_trait]
impl TeamDirectory for ApiClient {
    async fn fetch_team(&self, team_id: i64) -> ApiResult<Team> {
        ApiClient::fetch_team(self, team_id).await
    }
}

#[async_trait]
impl EnrollmentGateway for ApiClient {
    async fn submit_participants(&self, event_id: i64, request: &EnrollmentRequest) -> ApiResult<()> {
        ApiClient::submit_participants(self, event_id, request).await
    }
}
