//! REST API helpers for communicating with the job-portal backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` with a browser
//! `FormData` body.
//! Server-side (SSR): stubs returning `SubmitError::Unavailable` since the
//! upload is only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is folded into `SubmitError` so the workflow can decide what
//! the user sees; nothing here panics or touches UI state.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ApplicationPayload, ResumeFile};
use crate::config::ClientConfig;

/// Backend path for creating a job application.
pub const CREATE_APPLICATION_PATH: &str = "/api/v1/application/createApplication";

/// File types suggested by the resume picker.
pub const RESUME_ACCEPT: &str = ".pdf, .doc, .docx";

/// Why an application could not be submitted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("failed to encode application form: {0}")]
    Encode(String),
    #[error("application request failed: {0}")]
    Network(String),
    #[error("backend rejected application with status {0}")]
    Status(u16),
    #[error("application upload is only available in the browser")]
    Unavailable,
}

/// One multipart part value.
#[derive(Clone, Debug, PartialEq)]
pub enum FormValue<'a> {
    Text(String),
    File(&'a ResumeFile),
}

pub fn application_endpoint(config: &ClientConfig) -> String {
    config.url(CREATE_APPLICATION_PATH)
}

/// Ordered multipart fields for `createApplication`.
///
/// Blank experience and education are sent as empty text; a missing resume
/// leaves the `resume` part out entirely, rather than sending the `"NaN"` and
/// `"undefined"` strings a loosely typed form encoder would produce.
pub fn application_form_fields(payload: &ApplicationPayload) -> Vec<(&'static str, FormValue<'_>)> {
    let mut fields = vec![
        ("name", FormValue::Text(payload.name.clone())),
        (
            "experience",
            FormValue::Text(payload.experience.map(|years| years.to_string()).unwrap_or_default()),
        ),
        ("skills", FormValue::Text(payload.skills.clone())),
        (
            "education",
            FormValue::Text(payload.education.map(|e| e.as_str().to_owned()).unwrap_or_default()),
        ),
    ];
    if let Some(resume) = &payload.resume {
        fields.push(("resume", FormValue::File(resume)));
    }
    fields.push(("jobID", FormValue::Text(payload.job_id.clone())));
    fields.push(("userID", FormValue::Text(payload.user_id.clone())));
    fields
}

#[cfg(any(test, feature = "hydrate"))]
fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Submit an application via `POST {base}/api/v1/application/createApplication`.
///
/// The response body is not read; any 2xx status counts as accepted.
///
/// # Errors
///
/// Returns `SubmitError` if the form cannot be built, the request fails in
/// transit, or the backend answers with a non-2xx status.
pub async fn create_application(config: &ClientConfig, payload: &ApplicationPayload) -> Result<(), SubmitError> {
    #[cfg(feature = "hydrate")]
    {
        let form = build_form_data(payload)?;
        let url = application_endpoint(config);
        let resp = gloo_net::http::Request::post(&url)
            .body(form)
            .map_err(|e| SubmitError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;
        if !is_success_status(resp.status()) {
            return Err(SubmitError::Status(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, payload);
        Err(SubmitError::Unavailable)
    }
}

#[cfg(feature = "hydrate")]
fn build_form_data(payload: &ApplicationPayload) -> Result<web_sys::FormData, SubmitError> {
    let encode_err = |e: wasm_bindgen::JsValue| SubmitError::Encode(format!("{e:?}"));
    let form = web_sys::FormData::new().map_err(encode_err)?;
    for (name, value) in application_form_fields(payload) {
        match value {
            FormValue::Text(text) => form.append_with_str(name, &text).map_err(encode_err)?,
            FormValue::File(resume) => {
                let blob = resume_blob(resume).map_err(encode_err)?;
                form.append_with_blob_and_filename(name, &blob, &resume.name)
                    .map_err(encode_err)?;
            }
        }
    }
    Ok(form)
}

#[cfg(feature = "hydrate")]
fn resume_blob(resume: &ResumeFile) -> Result<web_sys::Blob, wasm_bindgen::JsValue> {
    let bytes = js_sys::Uint8Array::from(resume.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    if !resume.content_type.is_empty() {
        options.set_type(&resume.content_type);
    }
    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

/// Read a picked file into memory.
///
/// # Errors
///
/// Returns an error string if the browser refuses to read the file.
#[cfg(feature = "hydrate")]
pub async fn read_resume_file(file: &web_sys::File) -> Result<ResumeFile, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(ResumeFile { name: file.name(), content_type: file.type_(), bytes })
}
