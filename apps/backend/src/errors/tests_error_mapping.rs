// Mapping from store-level errors to HTTP errors, without a server or store.
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_400() {
    let app: AppError = DomainError::validation("bad field").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_conflicts() {
    let app: AppError = DomainError::conflict(ConflictKind::UniqueEmail, "email exists").into();
    assert_eq!(app.code().as_str(), "USER_EXISTS");
    assert_eq!(app.status().as_u16(), 400);

    let app: AppError =
        DomainError::conflict(ConflictKind::Other("Custom".into()), "custom conflict").into();
    assert_eq!(app.code(), ErrorCode::Conflict);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_not_found_kinds() {
    let cases = [
        (NotFoundKind::User, ErrorCode::UserNotFound, 404),
        (NotFoundKind::Profile, ErrorCode::ProfileNotFound, 400),
        (NotFoundKind::Post, ErrorCode::PostNotFound, 404),
        (NotFoundKind::Comment, ErrorCode::CommentNotFound, 404),
        (NotFoundKind::Other("Thing".into()), ErrorCode::NotFound, 404),
    ];

    for (kind, code, status) in cases {
        let app: AppError = DomainError::not_found(kind, "missing").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), status);
    }
}

#[test]
fn maps_infra_errors() {
    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "slow").into();
    assert_eq!(app.code(), ErrorCode::DbUnavailable);
    assert_eq!(app.status().as_u16(), 500);

    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "bad doc").into();
    assert_eq!(app.code(), ErrorCode::DbError);
    assert_eq!(app.status().as_u16(), 500);
}
