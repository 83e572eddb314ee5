//! Decision page submissions in either wire encoding.
//!
//! `application/x-www-form-urlencoded` carries the positional
//! `form-<i>-id` / `form-<i>-player_decision` / `form-<i>-reason` fields;
//! `application/json` carries `{"decisions": [{id, player_decision, reason}]}`.
//! Both become the same `Vec<SubmittedAnswer>`.

use std::collections::HashMap;

use actix_web::dev::Payload;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, FromRequest, HttpRequest};
use serde::Deserialize;

use crate::domain::answers::{parse_legacy_form, SubmittedAnswer};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::validated_json::{parse_json, read_body};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionSubmission(pub Vec<SubmittedAnswer>);

impl DecisionSubmission {
    pub fn into_inner(self) -> Vec<SubmittedAnswer> {
        self.0
    }
}

#[derive(Debug, Deserialize)]
struct JsonSubmission {
    decisions: Vec<JsonAnswer>,
}

#[derive(Debug, Deserialize)]
struct JsonAnswer {
    id: i64,
    #[serde(default)]
    player_decision: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

impl From<JsonAnswer> for SubmittedAnswer {
    fn from(a: JsonAnswer) -> Self {
        Self {
            id: a.id,
            player_decision: a.player_decision.unwrap_or_default(),
            reason: a.reason.unwrap_or_default(),
        }
    }
}

enum Encoding {
    Form,
    Json,
}

fn encoding_of(req: &HttpRequest) -> Result<Encoding, AppError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "application/x-www-form-urlencoded" => Ok(Encoding::Form),
        "application/json" => Ok(Encoding::Json),
        _ => Err(AppError::bad_request(
            ErrorCode::InvalidDecisionForm,
            "Submit decisions as application/x-www-form-urlencoded or application/json",
        )),
    }
}

/// Parse a urlencoded body into the positional answers.
pub fn parse_form_body(body: &[u8]) -> Result<Vec<SubmittedAnswer>, AppError> {
    let text = std::str::from_utf8(body).map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidDecisionForm, "Form body is not UTF-8")
    })?;
    let fields = web::Query::<HashMap<String, String>>::from_query(text)
        .map_err(|_| {
            AppError::bad_request(ErrorCode::InvalidDecisionForm, "Malformed form body")
        })?
        .into_inner();
    Ok(parse_legacy_form(&fields)?)
}

/// Parse a JSON body into answers.
pub fn parse_json_body(body: &[u8]) -> Result<Vec<SubmittedAnswer>, AppError> {
    let parsed: JsonSubmission = parse_json(body, ErrorCode::InvalidDecisionForm)?;
    Ok(parsed.decisions.into_iter().map(SubmittedAnswer::from).collect())
}

impl FromRequest for DecisionSubmission {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let encoding = encoding_of(req);
        let payload = payload.take();

        Box::pin(async move {
            let encoding = encoding?;
            let body = read_body(payload).await?;
            let answers = match encoding {
                Encoding::Form => parse_form_body(&body)?,
                Encoding::Json => parse_json_body(&body)?,
            };
            Ok(DecisionSubmission(answers))
        })
    }
}
