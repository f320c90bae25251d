mod support;

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use support::{MockOcrSpace, start_front_end};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];

const PARSED_OK: &str = r#"{
    "ParsedResults": [{"ParsedText": "Sehr geehrte Damen und Herren\r\n", "ErrorMessage": "", "FileParseExitCode": 1}],
    "OCRExitCode": 1,
    "IsErroredOnProcessing": false
}"#;

const PARSED_ERROR: &str = r#"{
    "OCRExitCode": 3,
    "IsErroredOnProcessing": true,
    "ErrorMessage": ["Unable to recognize the file type"]
}"#;

fn upload_form(use_cache: bool) -> Form {
    let form = Form::new()
        .part("images", Part::bytes(PNG_BYTES.to_vec()).file_name("brief.png"))
        .text("language", "de");
    if use_cache {
        form.text("use_cache", "on")
    } else {
        form
    }
}

async fn upload(base_url: &str, form: Form) -> (StatusCode, String) {
    let res = reqwest::Client::new()
        .post(format!("{base_url}/recognize"))
        .multipart(form)
        .send()
        .await
        .expect("request should succeed");
    let status = res.status();
    (status, res.text().await.expect("expected html body"))
}

#[tokio::test]
async fn uploaded_image_shows_recognized_text_and_is_cached() {
    let upstream = MockOcrSpace::start(PARSED_OK).await;
    let data_dir = tempfile::tempdir().expect("create temp data dir");
    let base_url = start_front_end(&upstream.url, data_dir.path()).await;

    let (status, html) = upload(&base_url, upload_form(false)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Sehr geehrte Damen und Herren"));
    assert!(!html.contains("(cached)"));

    let (status, html) = upload(&base_url, upload_form(true)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("(cached)"));
    assert_eq!(upstream.hits(), 1);

    let stats: Value = reqwest::get(format!("{base_url}/stats"))
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("expected json body");
    assert_eq!(stats["total_processed"], 1);
    assert_eq!(stats["total_success"], 1);

    let index = reqwest::get(format!("{base_url}/"))
        .await
        .expect("request should succeed")
        .text()
        .await
        .expect("expected html body");
    assert_eq!(index.matches("/export.txt").count(), 2);
    assert!(data_dir.path().join("history").join("history.json").exists());
}

#[tokio::test]
async fn ocr_processing_error_is_shown_next_to_the_file() {
    let upstream = MockOcrSpace::start(PARSED_ERROR).await;
    let data_dir = tempfile::tempdir().expect("create temp data dir");
    let base_url = start_front_end(&upstream.url, data_dir.path()).await;

    let (status, html) = upload(&base_url, upload_form(false)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error: Unable to recognize the file type"));

    let stats: Value = reqwest::get(format!("{base_url}/stats"))
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("expected json body");
    assert_eq!(stats["total_failed"], 1);
}
