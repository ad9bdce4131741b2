use std::sync::LazyLock;

use intake_models::submission::{RawSubmission, Submission};

pub static SUBMISSION1: LazyLock<Submission> = LazyLock::new(|| Submission {
    name: "Max Mustermann".try_into().unwrap(),
    email: "max.mustermann@example.de".try_into().unwrap(),
    message: "Hello World!".try_into().unwrap(),
});

pub static SUBMISSION2: LazyLock<Submission> = LazyLock::new(|| Submission {
    name: "Erika Musterfrau".try_into().unwrap(),
    email: "erika+contact@example.com".try_into().unwrap(),
    message: "Grüße aus Köln!\n\nIch hätte eine Frage zu eurem Angebot.".try_into().unwrap(),
});

/// The raw form of [`SUBMISSION1`] as a client would send it.
pub fn raw_submission1() -> RawSubmission {
    RawSubmission::from(&*SUBMISSION1)
}
