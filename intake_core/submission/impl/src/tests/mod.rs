use intake_core_submission_contracts::{
    dispatch::MockSubmissionDispatchService, SubmissionFeatureService, SubmissionSubmitError,
};
use intake_demo::submission::{raw_submission1, SUBMISSION1, SUBMISSION2};
use intake_models::submission::{RawSubmission, SubmissionField};
use intake_utils::assert_matches;
use pretty_assertions::assert_eq;

use crate::SubmissionFeatureServiceImpl;

type Sut = SubmissionFeatureServiceImpl<MockSubmissionDispatchService>;

#[tokio::test]
async fn ok() {
    // Arrange
    let dispatch = MockSubmissionDispatchService::new().with_dispatch(SUBMISSION1.clone());

    let sut = SubmissionFeatureServiceImpl { dispatch };

    // Act
    let result = sut.submit(raw_submission1()).await;

    // Assert
    result.unwrap();
}

#[tokio::test]
async fn ok_passes_payload_unchanged() {
    // Arrange
    let dispatch = MockSubmissionDispatchService::new().with_dispatch(SUBMISSION2.clone());

    let sut = SubmissionFeatureServiceImpl { dispatch };

    // Act
    let result = sut.submit(RawSubmission::from(&*SUBMISSION2)).await;

    // Assert
    result.unwrap();
}

#[tokio::test]
async fn dispatch_failed() {
    // Arrange
    let dispatch = MockSubmissionDispatchService::new()
        .with_dispatch_error(SUBMISSION1.clone(), "Connection refused");

    let sut = SubmissionFeatureServiceImpl { dispatch };

    // Act
    let result = sut.submit(raw_submission1()).await;

    // Assert
    assert_matches!(
        result,
        Err(SubmissionSubmitError::Dispatch(err)) if err.to_string() == "Connection refused"
    );
}

#[tokio::test]
async fn invalid_is_not_dispatched() {
    for (field, value) in [
        (SubmissionField::Name, String::new()),
        (SubmissionField::Email, "not-an-email".into()),
        (SubmissionField::Email, "John Doe <john@example.com>".into()),
        (SubmissionField::Message, String::new()),
        (SubmissionField::Name, "a".repeat(256)),
        (SubmissionField::Email, format!("{}@example.com", "a".repeat(244))),
        (SubmissionField::Message, "a".repeat(2001)),
    ] {
        // Arrange
        let sut = Sut::default();

        // Act
        let result = sut
            .submit(raw_submission1().with(field.as_str(), value))
            .await;

        // Assert
        let Err(SubmissionSubmitError::Invalid(errors)) = result else {
            panic!("expected validation error for {field}, got {result:?}");
        };
        assert_eq!(errors.fields().collect::<Vec<_>>(), [field]);
    }
}

#[tokio::test]
async fn all_invalid_fields_are_reported() {
    // Arrange
    let sut = Sut::default();

    // Act
    let result = sut
        .submit(
            RawSubmission::new()
                .with("email", "foo")
                .with("message", "Hi"),
        )
        .await;

    // Assert
    let Err(SubmissionSubmitError::Invalid(errors)) = result else {
        panic!("expected validation error, got {result:?}");
    };
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        [SubmissionField::Name, SubmissionField::Email]
    );
}
