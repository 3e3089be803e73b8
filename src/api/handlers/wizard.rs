// src/api/handlers/wizard.rs
use actix_web::{
    web::{self, Data, Json, Path},
    HttpResponse, Scope,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::info;
use uuid::Uuid;

use crate::api::types::{
    AadhaarBody, LivenessBody, OccupationBody, OtpVerifyBody, PanVerifyBody, ScreenView,
    SessionView, SubmitBody,
};
use crate::core::services::wizard::WizardService;
use crate::core::wizard::state::UserInfo;
use crate::core::wizard::steps::WizardStep;
use crate::utils::error::KycError;
use crate::verification::AadhaarUpload;

pub fn scope() -> Scope {
    web::scope("/kyc")
        .service(web::resource("/session").route(web::post().to(create_session)))
        .service(
            web::resource("/session/{id}")
                .route(web::get().to(get_session))
                .route(web::delete().to(discard_session)),
        )
        .service(web::resource("/session/{id}/begin").route(web::post().to(begin)))
        .service(web::resource("/session/{id}/user-info").route(web::post().to(submit_user_info)))
        .service(web::resource("/session/{id}/otp/send").route(web::post().to(send_otp)))
        .service(web::resource("/session/{id}/otp/verify").route(web::post().to(verify_otp)))
        .service(web::resource("/session/{id}/pan").route(web::post().to(verify_pan)))
        .service(web::resource("/session/{id}/aadhaar").route(web::post().to(verify_aadhaar)))
        .service(web::resource("/session/{id}/liveness").route(web::post().to(verify_liveness)))
        .service(
            web::resource("/session/{id}/liveness/skip").route(web::post().to(skip_liveness)),
        )
        .service(
            web::resource("/session/{id}/occupation").route(web::post().to(set_occupation)),
        )
        .service(web::resource("/session/{id}/review").route(web::get().to(review)))
        .service(web::resource("/session/{id}/submit").route(web::post().to(submit)))
        .service(web::resource("/session/{id}/back").route(web::post().to(go_back)))
        .service(web::resource("/screen/{index}").route(web::get().to(screen)))
}

async fn create_session(service: Data<WizardService>) -> Result<HttpResponse, KycError> {
    let id = service.start_session().await;
    let state = service.session(&id).await?;
    Ok(HttpResponse::Created().json(SessionView::new(id, &state)))
}

async fn get_session(
    service: Data<WizardService>,
    id: Path<Uuid>,
) -> Result<HttpResponse, KycError> {
    let state = service.session(&id).await?;
    Ok(HttpResponse::Ok().json(SessionView::new(*id, &state)))
}

async fn discard_session(
    service: Data<WizardService>,
    id: Path<Uuid>,
) -> Result<HttpResponse, KycError> {
    if service.discard(&id).await {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(KycError::Session(format!("unknown session {id}")))
    }
}

async fn begin(service: Data<WizardService>, id: Path<Uuid>) -> Result<HttpResponse, KycError> {
    let state = service.begin(&id).await?;
    Ok(HttpResponse::Ok().json(SessionView::new(*id, &state)))
}

async fn submit_user_info(
    service: Data<WizardService>,
    id: Path<Uuid>,
    body: Json<UserInfo>,
) -> Result<HttpResponse, KycError> {
    let state = service.submit_user_info(&id, body.into_inner()).await?;
    info!("User info saved for session {}", id);
    Ok(HttpResponse::Ok().json(SessionView::new(*id, &state)))
}

async fn send_otp(service: Data<WizardService>, id: Path<Uuid>) -> Result<HttpResponse, KycError> {
    service.send_otp(&id).await?;
    Ok(HttpResponse::Accepted().finish())
}

async fn verify_otp(
    service: Data<WizardService>,
    id: Path<Uuid>,
    body: Json<OtpVerifyBody>,
) -> Result<HttpResponse, KycError> {
    let state = service.verify_otp(&id, &body.code).await?;
    Ok(HttpResponse::Ok().json(SessionView::new(*id, &state)))
}

async fn verify_pan(
    service: Data<WizardService>,
    id: Path<Uuid>,
    body: Json<PanVerifyBody>,
) -> Result<HttpResponse, KycError> {
    let state = service.verify_pan(&id, &body.name_on_pan).await?;
    Ok(HttpResponse::Ok().json(SessionView::new(*id, &state)))
}

async fn verify_aadhaar(
    service: Data<WizardService>,
    id: Path<Uuid>,
    body: Json<AadhaarBody>,
) -> Result<HttpResponse, KycError> {
    let body = body.into_inner();
    let file = BASE64
        .decode(&body.file)
        .map_err(|_| KycError::Validation("file must be base64 encoded".into()))?;
    let upload = AadhaarUpload {
        file_name: body.file_name,
        file,
        share_code: body.share_code,
    };
    let state = service.verify_aadhaar(&id, upload).await?;
    Ok(HttpResponse::Ok().json(SessionView::new(*id, &state)))
}

async fn verify_liveness(
    service: Data<WizardService>,
    id: Path<Uuid>,
    body: Json<LivenessBody>,
) -> Result<HttpResponse, KycError> {
    let state = service.verify_liveness(&id, &body.image).await?;
    Ok(HttpResponse::Ok().json(SessionView::new(*id, &state)))
}

async fn skip_liveness(
    service: Data<WizardService>,
    id: Path<Uuid>,
) -> Result<HttpResponse, KycError> {
    let state = service.skip_liveness(&id).await?;
    Ok(HttpResponse::Ok().json(SessionView::new(*id, &state)))
}

async fn set_occupation(
    service: Data<WizardService>,
    id: Path<Uuid>,
    body: Json<OccupationBody>,
) -> Result<HttpResponse, KycError> {
    let body = body.into_inner();
    let state = service
        .set_occupation(&id, body.occupation, body.profession)
        .await?;
    Ok(HttpResponse::Ok().json(SessionView::new(*id, &state)))
}

async fn review(service: Data<WizardService>, id: Path<Uuid>) -> Result<HttpResponse, KycError> {
    let breakdown = service.review(&id).await?;
    Ok(HttpResponse::Ok().json(breakdown))
}

async fn submit(
    service: Data<WizardService>,
    id: Path<Uuid>,
    body: Json<SubmitBody>,
) -> Result<HttpResponse, KycError> {
    let breakdown = service.submit(&id, body.terms_accepted).await?;
    Ok(HttpResponse::Ok().json(breakdown))
}

async fn go_back(service: Data<WizardService>, id: Path<Uuid>) -> Result<HttpResponse, KycError> {
    let state = service.back(&id).await?;
    Ok(HttpResponse::Ok().json(SessionView::new(*id, &state)))
}

/// The step switch the browser shell renders from: any index outside the
/// wizard falls back to the welcome screen.
async fn screen(index: Path<i64>) -> Result<HttpResponse, KycError> {
    Ok(HttpResponse::Ok().json(ScreenView {
        screen: WizardStep::from_index(*index).screen(),
    }))
}
