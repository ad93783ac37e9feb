//! Services and repositories against a throwaway SQLite file.
//!
//! The connection lives in a process-wide cell, so every case runs inside
//! one test on one runtime.

use axum::{extract::Path, http::StatusCode, Json};
use chrono::NaiveDate;
use contracts::domain::a001_resume::aggregate::ResumeDto;
use contracts::domain::a002_posting::aggregate::PostingDto;
use contracts::domain::a003_application::aggregate::ApplicationDto;
use contracts::domain::a004_response_type::aggregate::ResponseTypeDto;
use contracts::domain::a005_response::aggregate::ResponseDto;

use super::{a001_resume, a002_posting, a003_application, a004_response_type, a005_response};
use crate::handlers;
use crate::shared::data::db::initialize_database;
use crate::shared::error::{status_of, ServiceError};

const MISSING: i64 = 9999;

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn resume(data: &str) -> ResumeDto {
    ResumeDto { data: data.into() }
}

fn posting(title: &str) -> PostingDto {
    PostingDto {
        platform: "LinkedIn".into(),
        company: "Acme".into(),
        title: title.into(),
        salary: Some(85000.0),
        description: None,
        responsibilities: "Build services".into(),
        qualifications: "Rust".into(),
        remote: Some(true),
    }
}

fn missing_parent(err: &anyhow::Error) -> Option<(&'static str, i64)> {
    match err.downcast_ref::<ServiceError>() {
        Some(ServiceError::MissingParent { entity, id }) => Some((*entity, *id)),
        _ => None,
    }
}

#[tokio::test]
async fn test_crud_against_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    initialize_database(&dir.path().join("jobs.db")).await.unwrap();

    resume_round_trip().await;
    unknown_ids_yield_none().await;
    blank_input_is_rejected().await;
    application_needs_existing_parents().await;
    response_needs_existing_parents().await;
    handlers_map_failures_to_status().await;
}

async fn resume_round_trip() {
    let first = a001_resume::service::create(resume("First CV")).await.unwrap();
    let second = a001_resume::service::create(resume("Second CV")).await.unwrap();

    let ids: Vec<i64> = a001_resume::service::list_all()
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let edited = a001_resume::service::update(first.id, resume("Edited CV"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edited.id, first.id);
    assert_eq!(edited.data, "Edited CV");
    assert_eq!(
        a001_resume::service::get_by_id(first.id).await.unwrap(),
        Some(edited)
    );

    let deleted = a001_resume::service::delete(second.id).await.unwrap();
    assert_eq!(deleted, Some(second.clone()));
    assert_eq!(a001_resume::service::get_by_id(second.id).await.unwrap(), None);
    assert_eq!(a001_resume::service::delete(second.id).await.unwrap(), None);
}

async fn unknown_ids_yield_none() {
    assert_eq!(a001_resume::service::get_by_id(MISSING).await.unwrap(), None);
    assert_eq!(
        a001_resume::service::update(MISSING, resume("CV")).await.unwrap(),
        None
    );
    assert_eq!(a002_posting::service::delete(MISSING).await.unwrap(), None);
    assert_eq!(
        a002_posting::service::update(MISSING, posting("Engineer"))
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        a004_response_type::service::delete(MISSING).await.unwrap(),
        None
    );
}

async fn blank_input_is_rejected() {
    let before = a001_resume::service::list_all().await.unwrap().len();

    let err = a001_resume::service::create(resume("   ")).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ServiceError>(),
        Some(ServiceError::Invalid(_))
    ));
    assert_eq!(status_of(&err), StatusCode::BAD_REQUEST);

    let err = a004_response_type::service::create(ResponseTypeDto { name: "".into() })
        .await
        .unwrap_err();
    assert_eq!(status_of(&err), StatusCode::BAD_REQUEST);

    assert_eq!(a001_resume::service::list_all().await.unwrap().len(), before);
}

async fn application_needs_existing_parents() {
    let posting = a002_posting::service::create(posting("Engineer")).await.unwrap();
    let resume = a001_resume::service::create(resume("CV")).await.unwrap();
    let before = a003_application::service::list_all().await.unwrap().len();

    let err = a003_application::service::create(ApplicationDto {
        posting_id: posting.id,
        resume_id: MISSING,
        date_submitted: date("2024-01-10"),
    })
    .await
    .unwrap_err();
    assert_eq!(missing_parent(&err), Some(("resumes", MISSING)));
    assert_eq!(status_of(&err), StatusCode::BAD_REQUEST);

    let err = a003_application::service::create(ApplicationDto {
        posting_id: MISSING,
        resume_id: resume.id,
        date_submitted: date("2024-01-10"),
    })
    .await
    .unwrap_err();
    assert_eq!(missing_parent(&err), Some(("postings", MISSING)));
    assert_eq!(
        a003_application::service::list_all().await.unwrap().len(),
        before
    );

    let valid = ApplicationDto {
        posting_id: posting.id,
        resume_id: resume.id,
        date_submitted: date("2024-01-10"),
    };
    let application = a003_application::service::create(valid.clone())
        .await
        .unwrap();
    assert_eq!(application.date_submitted, date("2024-01-10"));
    assert_eq!(
        a003_application::service::get_by_id(application.id)
            .await
            .unwrap(),
        Some(application.clone())
    );

    // Parents are checked on update too
    let err = a003_application::service::update(
        application.id,
        ApplicationDto {
            posting_id: MISSING,
            ..valid.clone()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(missing_parent(&err), Some(("postings", MISSING)));
    assert_eq!(
        a003_application::service::update(MISSING, valid).await.unwrap(),
        None
    );
}

async fn response_needs_existing_parents() {
    let posting = a002_posting::service::create(posting("Lead")).await.unwrap();
    let resume = a001_resume::service::create(resume("Lead CV")).await.unwrap();
    let application = a003_application::service::create(ApplicationDto {
        posting_id: posting.id,
        resume_id: resume.id,
        date_submitted: date("2024-02-01"),
    })
    .await
    .unwrap();
    let interview = a004_response_type::service::create(ResponseTypeDto {
        name: "Interview".into(),
    })
    .await
    .unwrap();

    let err = a005_response::service::create(ResponseDto {
        application_id: application.id,
        response_type_id: MISSING,
        date_received: date("2024-02-05"),
        data: None,
    })
    .await
    .unwrap_err();
    assert_eq!(missing_parent(&err), Some(("response_types", MISSING)));

    let err = a005_response::service::create(ResponseDto {
        application_id: MISSING,
        response_type_id: interview.id,
        date_received: date("2024-02-05"),
        data: None,
    })
    .await
    .unwrap_err();
    assert_eq!(missing_parent(&err), Some(("applications", MISSING)));

    let response = a005_response::service::create(ResponseDto {
        application_id: application.id,
        response_type_id: interview.id,
        date_received: date("2024-02-05"),
        data: Some("Tuesday 10am".into()),
    })
    .await
    .unwrap();
    assert_eq!(response.data.as_deref(), Some("Tuesday 10am"));
    assert_eq!(
        a005_response::service::delete(response.id).await.unwrap(),
        Some(response)
    );
}

async fn handlers_map_failures_to_status() {
    let err = handlers::a003_application::create(Json(ApplicationDto {
        posting_id: MISSING,
        resume_id: MISSING,
        date_submitted: date("2024-03-01"),
    }))
    .await
    .unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);

    assert_eq!(
        handlers::a001_resume::get_by_id(Path(MISSING))
            .await
            .unwrap_err(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        handlers::a002_posting::delete(Path(MISSING))
            .await
            .unwrap_err(),
        StatusCode::NOT_FOUND
    );

    let Json(offer) = handlers::a004_response_type::create(Json(ResponseTypeDto {
        name: "Offer".into(),
    }))
    .await
    .unwrap();
    assert_eq!(offer.name, "Offer");
}
