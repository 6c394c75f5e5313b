use actix_web::{get, post, web, HttpResponse};

use crate::api::models::{ChatMessageRequest, ChatMessageResponse};
use crate::chat::ChatService;
use crate::error::AppError;

#[post("/message")]
pub async fn send_message(
    service: web::Data<ChatService>,
    req: web::Json<ChatMessageRequest>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();

    let result = service
        .process_message(&req.message, req.session_id.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ChatMessageResponse {
        reply: result.reply,
        session_id: result.session_id,
    }))
}

#[get("/{session_id}")]
pub async fn get_conversation(
    service: web::Data<ChatService>,
    session_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    match service.get_conversation(&session_id.into_inner())? {
        Some(view) => Ok(HttpResponse::Ok().json(view)),
        None => Err(AppError::NotFound("Conversation not found".to_string())),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/chat")
            .service(send_message)
            .service(get_conversation),
    );
}
