// Mapping from DomainError kinds to HTTP status and error code.
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_decision_validation_kinds_to_400() {
    let cases = [
        (ValidationKind::InvalidDecisionForm, ErrorCode::InvalidDecisionForm),
        (ValidationKind::InvalidReason, ErrorCode::InvalidReason),
        (ValidationKind::InvalidRound, ErrorCode::InvalidRound),
        (ValidationKind::InvalidSession, ErrorCode::InvalidSession),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "bad").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 400);
    }

    let app: AppError = DomainError::validation_other("bad field").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
}

#[test]
fn maps_not_found_kinds() {
    let app: AppError = DomainError::not_found(NotFoundKind::Decision, "no decision").into();
    assert_eq!(app.code().as_str(), "DECISION_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::not_found(NotFoundKind::Participant, "no code").into();
    assert_eq!(app.code().as_str(), "PARTICIPANT_NOT_FOUND");

    let app: AppError = DomainError::not_found(NotFoundKind::Other("x".into()), "gone").into();
    assert_eq!(app.code().as_str(), "NOT_FOUND");
}

#[test]
fn maps_conflicts() {
    let app: AppError = DomainError::conflict(ConflictKind::UniqueCode, "dup code").into();
    assert_eq!(app.code().as_str(), "CODE_CONFLICT");
    assert_eq!(app.status().as_u16(), 409);

    let app: AppError = DomainError::conflict(ConflictKind::Other("u".into()), "dup").into();
    assert_eq!(app.code().as_str(), "CONFLICT");
}

#[test]
fn maps_infra() {
    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "timeout").into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.status().as_u16(), 503);

    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "4 rows").into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert_eq!(app.status().as_u16(), 500);

    let app: AppError = DomainError::infra(InfraErrorKind::Other("x".into()), "other").into();
    assert_eq!(app.code().as_str(), "DB_ERROR");
    assert_eq!(app.status().as_u16(), 500);
}
