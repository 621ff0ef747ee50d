use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::candidate_dto::{
        CandidateListQuery, CandidateListResponse, CreateCandidatePayload, CreateCandidateResponse,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/candidates",
    request_body = CreateCandidatePayload,
    responses(
        (status = 201, description = "Candidate added successfully", body = Json<CreateCandidateResponse>),
        (status = 400, description = "Missing or invalid field, no offers, or unknown offer"),
        (status = 409, description = "Candidate with this email already exists"),
        (status = 500, description = "Database error")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl IntoResponse> {
    let id = state.candidate_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateCandidateResponse {
            message: "Candidate added successfully".to_string(),
            id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/candidates",
    params(
        ("page" = Option<i64>, Query, description = "Page number, defaults to 1"),
        ("limit" = Option<i64>, Query, description = "Items per page, defaults to 10")
    ),
    responses(
        (status = 200, description = "Page of candidates", body = Json<CandidateListResponse>),
        (status = 500, description = "Database error")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    let result: CandidateListResponse = state
        .candidate_service
        .list(query.page(), query.limit())
        .await?;
    Ok(Json(result))
}
