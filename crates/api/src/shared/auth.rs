use crate::error::ClassmateError;
use actix_web::HttpRequest;
use classmate_reminders_infra::ClassmateContext;

const ADMIN_API_KEY_HEADER: &str = "classmate-admin-api-key";

/// Guards the administrative routes (manual scan trigger and test-email
/// diagnostic) with the configured api key
pub fn protect_admin_route(
    http_req: &HttpRequest,
    ctx: &ClassmateContext,
) -> Result<(), ClassmateError> {
    let api_key = http_req
        .headers()
        .get(ADMIN_API_KEY_HEADER)
        .and_then(|header| header.to_str().ok());

    match api_key {
        Some(api_key) if api_key == ctx.config.admin_api_key => Ok(()),
        Some(_) => Err(ClassmateError::Unauthorized(
            "Invalid admin api key provided".into(),
        )),
        None => Err(ClassmateError::Unauthorized(format!(
            "Missing the `{}` header",
            ADMIN_API_KEY_HEADER
        ))),
    }
}
