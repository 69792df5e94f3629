// ==========================================
// Case batch HTTP route tests
// ==========================================
// Router driven with tower::ServiceExt::oneshot
// ==========================================

mod test_helpers;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use crm_core::api::{CaseBatchResponse, ErrorBody, AUTHOR_HEADER, CASE_BATCH_PATH};
use crm_core::app::AppState;
use crm_core::repository::ContractorRepository;
use crm_core::router;
use test_helpers::{assurant_row, create_test_db, csv_bytes, ASSURANT_HEADER};
use tower::ServiceExt;

const BOUNDARY: &str = "crm-core-test-boundary";

fn multipart_body(company: Option<&str>, file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(company) = company {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"company\"\r\n\r\n{}\r\n",
                BOUNDARY, company
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(author: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(CASE_BATCH_PATH)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(author) = author {
        builder = builder.header(AUTHOR_HEADER, author);
    }
    builder.body(Body::from(body)).unwrap()
}

async fn app_with_assurant(db_path: &str) -> AppState {
    let state = AppState::new(db_path).await.unwrap();
    state.contractor_repo.create("Assurant", None).await.unwrap();
    state
}

#[tokio::test]
async fn test_upload_returns_created_with_case_ids() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let state = app_with_assurant(&db_path).await;
    let csv = csv_bytes(
        &ASSURANT_HEADER,
        &[
            assurant_row("111", "Ana Souza", "1,234.56"),
            assurant_row("222", "Bruno Lima", "10.00"),
        ],
    );

    let response = router(state)
        .oneshot(upload_request(
            Some("ana"),
            multipart_body(Some("Assurant"), Some(("claims.csv", csv.as_slice()))),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: CaseBatchResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.case_ids.len(), 2);
}

#[tokio::test]
async fn test_missing_author_is_unauthorized() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let state = app_with_assurant(&db_path).await;
    let csv = csv_bytes(&ASSURANT_HEADER, &[assurant_row("111", "Ana", "1.00")]);

    let response = router(state)
        .oneshot(upload_request(
            None,
            multipart_body(Some("Assurant"), Some(("claims.csv", csv.as_slice()))),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_statuses_and_body() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let state = app_with_assurant(&db_path).await;
    let csv = csv_bytes(&ASSURANT_HEADER, &[assurant_row("111", "Ana", "abc")]);

    let cases: Vec<(Vec<u8>, StatusCode, &str)> = vec![
        (
            multipart_body(Some("Assurant"), Some(("report.pdf", &b"%PDF"[..]))),
            StatusCode::BAD_REQUEST,
            "validation",
        ),
        (
            multipart_body(None, Some(("claims.csv", csv.as_slice()))),
            StatusCode::BAD_REQUEST,
            "validation",
        ),
        (
            multipart_body(Some("Assurant"), Some(("claims.csv", csv.as_slice()))),
            StatusCode::BAD_REQUEST,
            "parser",
        ),
        (
            multipart_body(Some("Unknown Co"), Some(("claims.csv", csv.as_slice()))),
            StatusCode::NOT_FOUND,
            "not_found",
        ),
    ];

    for (body, status, kind) in cases {
        let response = router(state.clone())
            .oneshot(upload_request(Some("ana"), body))
            .await
            .unwrap();

        assert_eq!(response.status(), status);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.metadata["error_kind"], kind);
        assert!(!error.message.is_empty());
    }
}

#[tokio::test]
async fn test_health() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let state = AppState::new(&db_path).await.unwrap();

    let response = router(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
