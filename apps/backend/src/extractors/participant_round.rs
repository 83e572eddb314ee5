use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// `{code}` and `{round}` from a participant page path.
///
/// Only the shape is checked here; whether the code exists and the round
/// is in range is decided by the decisions service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRound {
    pub code: String,
    pub round_number: i32,
}

fn extract(req: &HttpRequest) -> Result<ParticipantRound, AppError> {
    let code = req
        .match_info()
        .get("code")
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            AppError::bad_request(ErrorCode::BadRequest, "Missing participant code")
        })?;

    let raw_round = req
        .match_info()
        .get("round")
        .ok_or_else(|| AppError::bad_request(ErrorCode::InvalidRound, "Missing round"))?;
    let round_number = raw_round.parse::<i32>().map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidRound,
            format!("Invalid round: {raw_round}"),
        )
    })?;

    Ok(ParticipantRound {
        code: code.to_string(),
        round_number,
    })
}

impl FromRequest for ParticipantRound {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
