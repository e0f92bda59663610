use crate::assistant::{AskError, Assistant};
use crate::models::{AskRequest, AskResponse, ErrorResponse};
use actix_web::{post, web, HttpResponse, Responder};
use tracing::{error, info};

#[post("/ask")]
pub async fn ask(req: web::Json<AskRequest>, assistant: web::Data<Assistant>) -> impl Responder {
    info!(question = %req.question, "Answering question");

    match assistant.answer(&req.question).await {
        Ok(answer) => {
            info!(kind = answer.kind(), "Question answered");
            HttpResponse::Ok().json(AskResponse {
                answer: answer.render(),
                kind: answer.kind().to_string(),
                sql: answer.sql().map(|s| s.to_string()),
            })
        }
        Err(AskError::EmptyQuestion) => HttpResponse::BadRequest().json(ErrorResponse {
            error: AskError::EmptyQuestion.to_string(),
        }),
        Err(e) => {
            error!(error = %e, "Failed to answer question");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("An error occurred: {}", e),
            })
        }
    }
}
