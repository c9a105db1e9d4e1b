use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::codec::{decode_image, encode_image};
use super::config::FaceFusionConfig;
use super::signing::{authorization, CONTENT_TYPE};
use super::FusionError;

const SERVICE: &str = "facefusion";
const ACTION: &str = "FaceFusion";
const API_VERSION: &str = "2018-12-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FusionRequest<'a> {
    pub project_id: &'a str,
    pub model_id: &'a str,
    pub image: &'a str,
    pub rsp_img_type: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FusionEnvelope {
    response: FusionResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FusionResponse {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiError {
    code: String,
    message: String,
}

/// Pulls the base64 image out of a raw API response body.
pub fn parse_response(body: &str) -> Result<String, FusionError> {
    let envelope: FusionEnvelope = serde_json::from_str(body)?;
    let response = envelope.response;
    if let Some(request_id) = &response.request_id {
        debug!("face fusion request id {request_id}");
    }
    if let Some(error) = response.error {
        return Err(FusionError::Api {
            code: error.code,
            message: error.message,
        });
    }
    response
        .image
        .filter(|image| !image.is_empty())
        .ok_or(FusionError::MissingImage)
}

pub struct FaceFusionClient {
    config: FaceFusionConfig,
    http: reqwest::blocking::Client,
}

impl FaceFusionClient {
    pub fn new(config: FaceFusionConfig) -> Result<Self, FusionError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &FaceFusionConfig {
        &self.config
    }

    /// JSON body for one fusion call with an already encoded image.
    pub fn request_body(&self, image_base64: &str) -> Result<String, FusionError> {
        let request = FusionRequest {
            project_id: &self.config.project_id,
            model_id: &self.config.model_id,
            image: image_base64,
            rsp_img_type: "base64",
        };
        Ok(serde_json::to_string(&request)?)
    }

    /// Sends the image at `image_path` through the configured model and writes the result to `output_path`.
    pub fn fuse(&self, image_path: &Path, output_path: &Path) -> Result<(), FusionError> {
        let body = self.request_body(&encode_image(image_path)?)?;
        let timestamp = Utc::now().timestamp();
        let host = self.config.endpoint.as_str();
        let auth = authorization(
            &self.config.secret_id,
            &self.config.secret_key,
            SERVICE,
            host,
            timestamp,
            &body,
        );

        info!("face fusion: {} -> {}", image_path.display(), output_path.display());
        let response = self
            .http
            .post(format!("https://{host}/"))
            .header("Authorization", auth)
            .header("Content-Type", CONTENT_TYPE)
            .header("Host", host)
            .header("X-TC-Action", ACTION)
            .header("X-TC-Version", API_VERSION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("X-TC-Region", self.config.region.as_str())
            .body(body)
            .send()?
            .error_for_status()?;

        let image = parse_response(&response.text()?)?;
        decode_image(&image, output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_project_model_and_image() {
        let client = FaceFusionClient::new(FaceFusionConfig::new("id", "key")).unwrap();
        let body: serde_json::Value =
            serde_json::from_str(&client.request_body("aGVsbG8=").unwrap()).unwrap();
        assert_eq!(body["ProjectId"], "303269");
        assert_eq!(body["ModelId"], "qc_303269_330150_8");
        assert_eq!(body["Image"], "aGVsbG8=");
        assert_eq!(body["RspImgType"], "base64");
    }

    #[test]
    fn response_image_is_returned() {
        let body = r#"{"Response":{"Image":"aGVsbG8=","RequestId":"r-1"}}"#;
        assert_eq!(parse_response(body).unwrap(), "aGVsbG8=");
    }

    #[test]
    fn api_error_is_surfaced() {
        let body = r#"{"Response":{"Error":{"Code":"AuthFailure.SignatureFailure","Message":"bad sig"},"RequestId":"r-2"}}"#;
        match parse_response(body) {
            Err(FusionError::Api { code, message }) => {
                assert_eq!(code, "AuthFailure.SignatureFailure");
                assert_eq!(message, "bad sig");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_image_and_garbage() {
        assert!(matches!(
            parse_response(r#"{"Response":{"RequestId":"r-3"}}"#),
            Err(FusionError::MissingImage)
        ));
        assert!(matches!(parse_response("<html>"), Err(FusionError::Json(_))));
    }
}
